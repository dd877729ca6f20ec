//! Shared wire types for the findmy item-tracking demo.
//!
//! Everything here crosses the HTTP boundary as camelCase JSON, matching the
//! payload shapes the browser client expects.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Coordinate pair in signed floating-point degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub lat: f64,
    pub lng: f64,
}

/// A physical object registered for tracking.
///
/// `distance` is a synthetic meters-from-viewer value, not real telemetry.
/// `last_seen` starts at creation time and is only ever moved forward by a
/// successful ring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: String,
    pub user_id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub distance: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
    pub last_seen: DateTime<Utc>,
}

/// A registered user, as returned to clients. Passwords never appear here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub user: User,
    pub token: String,
}

/// Body for `POST /items`. The owner comes from the bearer token, never from
/// the payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateItemRequest {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
}

/// Error body shape shared by every failing endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiMessage {
    pub message: String,
}
