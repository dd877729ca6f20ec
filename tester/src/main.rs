//! Manual exercise of a locally running findmy server.
//!
//! Start the server (`cargo run -p findmy-server`), then run this to walk the
//! demo flow: log in as the demo user, list the seeded items, ring the first
//! one and show the moved timestamp.

use std::sync::Arc;

use findmy_session::{AuthGate, HttpApi, ItemSession};

#[tokio::main]
async fn main() {
    let api = Arc::new(HttpApi::new("http://localhost:5000").unwrap());

    let mut gate = AuthGate::new(api.clone());
    gate.login("demo@example.com", "password123").await;

    if !gate.is_authenticated() {
        println!("Login failed: {:?}", gate.error());
        return;
    }
    println!("Logged in as {}", gate.user().unwrap().name);

    let mut session = ItemSession::new(api);
    session.refresh().await;

    if let Some(error) = session.error() {
        println!("Refresh failed: {error}");
        return;
    }

    for item in session.items() {
        println!(
            "{} [{}] {:.1}m last seen {}",
            item.name, item.kind, item.distance, item.last_seen
        );
    }

    let Some(first) = session.items().first().map(|item| item.id.clone()) else {
        println!("No items to ring");
        return;
    };

    session.select(Some(&first));
    let before = session.selected_item().unwrap().last_seen;

    session.ring(&first).await;

    let after = session.selected_item().unwrap().last_seen;
    println!("Rang {first}: lastSeen {before} -> {after}");
}
