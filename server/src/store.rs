//! Authoritative in-memory item collection.
//!
//! The store is the single source of truth for `last_seen`. All access goes
//! through one coarse `RwLock`; every write is small (push one item, touch one
//! timestamp), so no finer-grained locking is needed.

use chrono::Utc;
use findmy_model::{Item, Location};
use rand::Rng;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::AppError;

/// Base coordinate new items jitter around.
pub const BASE_LAT: f64 = 18.52;
pub const BASE_LNG: f64 = 73.85;

const JITTER_DEGREES: f64 = 0.005;
const MAX_SYNTHETIC_DISTANCE: f64 = 5.0;

pub struct ItemStore {
    items: RwLock<Vec<Item>>,
}

impl ItemStore {
    pub fn new() -> Self {
        Self {
            items: RwLock::new(Vec::new()),
        }
    }

    /// All items belonging to `owner_id`, in insertion order.
    pub async fn list(&self, owner_id: &str) -> Vec<Item> {
        self.items
            .read()
            .await
            .iter()
            .filter(|item| item.user_id == owner_id)
            .cloned()
            .collect()
    }

    /// Registers a new item with a synthetic distance and location.
    pub async fn create(&self, owner_id: &str, name: &str, kind: &str) -> Result<Item, AppError> {
        if name.trim().is_empty() {
            return Err(AppError::Validation("name must not be empty".into()));
        }
        if kind.trim().is_empty() {
            return Err(AppError::Validation("type must not be empty".into()));
        }

        let mut items = self.items.write().await;
        let mut rng = rand::thread_rng();

        let item = Item {
            id: Uuid::new_v4().to_string(),
            user_id: owner_id.to_string(),
            name: name.to_string(),
            kind: kind.to_string(),
            distance: rng.gen_range(0.0..MAX_SYNTHETIC_DISTANCE),
            location: Some(Location {
                lat: BASE_LAT + rng.gen_range(-JITTER_DEGREES..JITTER_DEGREES),
                lng: BASE_LNG + rng.gen_range(-JITTER_DEGREES..JITTER_DEGREES),
            }),
            last_seen: Utc::now(),
        };

        items.push(item.clone());
        Ok(item)
    }

    /// Pings the item's tracker: moves `last_seen` forward and returns the
    /// updated item. Never touches `location` or `distance`.
    pub async fn ring(&self, id: &str, owner_id: &str) -> Result<Item, AppError> {
        let mut items = self.items.write().await;

        let item = items
            .iter_mut()
            .find(|item| item.id == id && item.user_id == owner_id)
            .ok_or(AppError::ItemNotFound)?;

        // last_seen only ever moves forward
        item.last_seen = item.last_seen.max(Utc::now());
        Ok(item.clone())
    }

    /// Removes an item. Foreign ids look the same as unknown ids to the
    /// caller.
    pub async fn remove(&self, id: &str, owner_id: &str) -> Result<(), AppError> {
        let mut items = self.items.write().await;

        let pos = items
            .iter()
            .position(|item| item.id == id && item.user_id == owner_id)
            .ok_or(AppError::ItemNotFound)?;

        items.remove(pos);
        Ok(())
    }

    /// Inserts a fully-formed item, used when seeding demo data.
    pub async fn insert(&self, item: Item) {
        self.items.write().await.push(item);
    }

    pub async fn len(&self) -> usize {
        self.items.read().await.len()
    }
}
