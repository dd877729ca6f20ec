//! In-memory `ItemApi` used by session and auth-gate tests.

use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use findmy_model::{AuthResponse, Item, User};
use uuid::Uuid;

use crate::{api::ItemApi, error::SessionError};

pub const DEMO_EMAIL: &str = "demo@example.com";
pub const DEMO_PASSWORD: &str = "password123";

pub struct FakeApi {
    items: Mutex<Vec<Item>>,
    token: Mutex<Option<String>>,
    fail_listing: AtomicBool,
}

impl FakeApi {
    pub fn new() -> Self {
        Self {
            items: Mutex::new(Vec::new()),
            token: Mutex::new(None),
            fail_listing: AtomicBool::new(false),
        }
    }

    pub fn seed(&self, name: &str, kind: &str) -> Item {
        let item = Item {
            id: Uuid::new_v4().to_string(),
            user_id: "demo".to_string(),
            name: name.to_string(),
            kind: kind.to_string(),
            distance: 2.0,
            location: None,
            last_seen: Utc::now(),
        };
        self.items.lock().unwrap().push(item.clone());
        item
    }

    pub fn clear(&self) {
        self.items.lock().unwrap().clear();
    }

    pub fn remaining(&self) -> usize {
        self.items.lock().unwrap().len()
    }

    /// The next `list_items` call fails with a transient error.
    pub fn fail_next_listing(&self) {
        self.fail_listing.store(true, Ordering::SeqCst);
    }

    pub fn stored_token(&self) -> Option<String> {
        self.token.lock().unwrap().clone()
    }

    fn demo_auth() -> AuthResponse {
        AuthResponse {
            user: User {
                id: "demo".to_string(),
                name: "Demo User".to_string(),
                email: DEMO_EMAIL.to_string(),
                phone_number: None,
            },
            token: Uuid::new_v4().to_string(),
        }
    }
}

#[async_trait]
impl ItemApi for FakeApi {
    async fn login(&self, email: &str, password: &str) -> Result<AuthResponse, SessionError> {
        if email == DEMO_EMAIL && password == DEMO_PASSWORD {
            let auth = Self::demo_auth();
            self.set_token(Some(auth.token.clone()));
            Ok(auth)
        } else {
            Err(SessionError::Auth("Invalid credentials".to_string()))
        }
    }

    async fn register(
        &self,
        _name: &str,
        email: &str,
        _password: &str,
        _phone_number: Option<&str>,
    ) -> Result<AuthResponse, SessionError> {
        if email == DEMO_EMAIL {
            return Err(SessionError::Validation("User already exists".to_string()));
        }
        let auth = Self::demo_auth();
        self.set_token(Some(auth.token.clone()));
        Ok(auth)
    }

    async fn list_items(&self) -> Result<Vec<Item>, SessionError> {
        if self.fail_listing.swap(false, Ordering::SeqCst) {
            return Err(SessionError::Transient("connection refused".to_string()));
        }
        Ok(self.items.lock().unwrap().clone())
    }

    async fn create_item(&self, name: &str, kind: &str) -> Result<Item, SessionError> {
        if name.trim().is_empty() || kind.trim().is_empty() {
            return Err(SessionError::Validation(
                "name must not be empty".to_string(),
            ));
        }
        Ok(self.seed(name, kind))
    }

    async fn ring_item(&self, id: &str) -> Result<Item, SessionError> {
        let mut items = self.items.lock().unwrap();
        let item = items
            .iter_mut()
            .find(|item| item.id == id)
            .ok_or_else(|| SessionError::NotFound("Item not found".to_string()))?;

        item.last_seen = item.last_seen.max(Utc::now());

        // mangle every field the session must NOT merge back
        let mut response = item.clone();
        response.distance = 9999.0;
        response.name = "should-be-ignored".to_string();
        Ok(response)
    }

    async fn delete_item(&self, id: &str) -> Result<(), SessionError> {
        let mut items = self.items.lock().unwrap();
        let pos = items
            .iter()
            .position(|item| item.id == id)
            .ok_or_else(|| SessionError::NotFound("Item not found".to_string()))?;
        items.remove(pos);
        Ok(())
    }

    fn set_token(&self, token: Option<String>) {
        *self.token.lock().unwrap() = token;
    }
}
