use thiserror::Error;

/// Client-side failure taxonomy. Everything here is recoverable by retrying
/// the user action; nothing is fatal to the process.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SessionError {
    #[error("invalid request: {0}")]
    Validation(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("authentication failed: {0}")]
    Auth(String),

    #[error("transient failure: {0}")]
    Transient(String),
}
