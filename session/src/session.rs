//! Client-side mirror of the item store plus UI-only state.
//!
//! The session owns a cached copy of the store's collection, the id of the
//! single item selected for detail display, and the loading/error flags the
//! UI renders. Every operation keeps two things true: the selection always
//! names an id present in the cache, and a failed call never partially
//! overwrites the cache.

use findmy_model::Item;

use crate::{api::ItemApi, error::SessionError};

pub struct ItemSession<A: ItemApi> {
    api: A,
    items: Vec<Item>,
    selected_item_id: Option<String>,
    loading: bool,
    error: Option<String>,
    // bumped on every refresh; completions carrying an older number are stale
    refresh_seq: u64,
}

impl<A: ItemApi> ItemSession<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            items: Vec::new(),
            selected_item_id: None,
            loading: false,
            error: None,
            refresh_seq: 0,
        }
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn selected_item_id(&self) -> Option<&str> {
        self.selected_item_id.as_deref()
    }

    pub fn selected_item(&self) -> Option<&Item> {
        let id = self.selected_item_id.as_deref()?;
        self.items.iter().find(|item| item.id == id)
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Fetches the full collection and replaces the cache wholesale. On
    /// failure the previous cache stays untouched and `error` is set.
    pub async fn refresh(&mut self) {
        let seq = self.begin_refresh();
        let result = self.api.list_items().await;
        self.complete_refresh(seq, result);
    }

    fn begin_refresh(&mut self) -> u64 {
        self.refresh_seq += 1;
        self.loading = true;
        self.error = None;
        self.refresh_seq
    }

    fn complete_refresh(&mut self, seq: u64, result: Result<Vec<Item>, SessionError>) {
        if seq != self.refresh_seq {
            // a newer refresh owns the cache now
            return;
        }
        self.loading = false;

        match result {
            Ok(items) => {
                self.items = items;
                self.drop_dangling_selection();
            }
            Err(err) => self.error = Some(err.to_string()),
        }
    }

    /// Sets the selection. An id absent from the cache resolves to no
    /// selection rather than an error.
    pub fn select(&mut self, id: Option<&str>) {
        self.selected_item_id = id
            .filter(|id| self.items.iter().any(|item| item.id == *id))
            .map(str::to_string);
    }

    /// Rings the item and merges only the returned `last_seen` into the
    /// cached copy, leaving every other field as the cache had it.
    pub async fn ring(&mut self, id: &str) {
        self.loading = true;
        self.error = None;

        match self.api.ring_item(id).await {
            Ok(updated) => {
                if let Some(item) = self.items.iter_mut().find(|item| item.id == id) {
                    item.last_seen = updated.last_seen;
                }
            }
            Err(err) => self.error = Some(err.to_string()),
        }

        self.loading = false;
    }

    /// Registers a new item with the store and appends it to the cache.
    pub async fn add(&mut self, name: &str, kind: &str) {
        self.loading = true;
        self.error = None;

        match self.api.create_item(name, kind).await {
            Ok(item) => self.items.push(item),
            Err(err) => self.error = Some(err.to_string()),
        }

        self.loading = false;
    }

    /// Deletes the item from the store, then from the cache.
    pub async fn remove(&mut self, id: &str) {
        self.loading = true;
        self.error = None;

        match self.api.delete_item(id).await {
            Ok(()) => {
                self.items.retain(|item| item.id != id);
                self.drop_dangling_selection();
            }
            Err(err) => self.error = Some(err.to_string()),
        }

        self.loading = false;
    }

    fn drop_dangling_selection(&mut self) {
        let dangling = self
            .selected_item_id
            .as_deref()
            .is_some_and(|id| !self.items.iter().any(|item| item.id == id));
        if dangling {
            self.selected_item_id = None;
        }
    }
}
