//! Client side of the findmy lost-item demo: the item session cache, the
//! auth gate, and the HTTP transport they share.
//!
//! The intended wiring mirrors a UI application root: construct one
//! [`HttpApi`] wrapped in an `Arc`, hand clones to one [`AuthGate`] and one
//! [`ItemSession`], and pass references down from there — no ambient
//! singletons.

pub mod api;
pub mod auth;
pub mod error;
pub mod session;

#[cfg(test)]
pub(crate) mod fake;

pub use api::{HttpApi, ItemApi};
pub use auth::AuthGate;
pub use error::SessionError;
pub use session::ItemSession;
