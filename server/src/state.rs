use std::sync::Arc;

use chrono::Utc;
use findmy_model::{Item, Location};
use tracing::info;
use uuid::Uuid;

use crate::{auth::AuthRegistry, config::Config, store::ItemStore};

pub type SharedState = Arc<AppState>;

pub struct AppState {
    pub config: Config,
    pub store: ItemStore,
    pub auth: AuthRegistry,
}

impl AppState {
    pub async fn new() -> SharedState {
        Self::with_config(Config::load()).await
    }

    pub async fn with_config(config: Config) -> SharedState {
        let seed = config.seed_demo;

        let state = Arc::new(Self {
            config,
            store: ItemStore::new(),
            auth: AuthRegistry::new(),
        });

        if seed {
            seed_demo_data(&state).await;
        }

        state
    }
}

/// Seeds the demo user and their four well-known items.
async fn seed_demo_data(state: &AppState) {
    let demo = match state
        .auth
        .register(
            "Demo User",
            "demo@example.com",
            "password123",
            Some("+1234567890".to_string()),
        )
        .await
    {
        Ok(response) => response.user,
        // register only fails on a duplicate email; seeding runs once
        Err(_) => return,
    };

    let fixtures = [
        ("Mobile Phone", "Mobile", 2.0, 18.5204, 73.8567),
        ("Laptop", "Laptop", 3.0, 18.5194, 73.8547),
        ("Wallet", "Wallet", 1.2, 18.5224, 73.8587),
        ("Bike", "Bike", 3.0, 18.5184, 73.8557),
    ];

    for (name, kind, distance, lat, lng) in fixtures {
        state
            .store
            .insert(Item {
                id: Uuid::new_v4().to_string(),
                user_id: demo.id.clone(),
                name: name.to_string(),
                kind: kind.to_string(),
                distance,
                location: Some(Location { lat, lng }),
                last_seen: Utc::now(),
            })
            .await;
    }

    info!("Seeded demo user with {} items", fixtures.len());
}
