//! Errors returned by `ShoppingListClient` parse and build methods.
//!
//! `NotFound` and `Rejected` get their own variants because callers act on
//! them (drop a stale row, show the message next to the input). Everything
//! else unexpected lands in `Http` with the raw status and body.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// 404: the item does not exist.
    #[error("item not found")]
    NotFound,

    /// 400 with an `{"error": ...}` body, carrying the server's message.
    #[error("rejected: {0}")]
    Rejected(String),

    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    #[error("deserialization failed: {0}")]
    Deserialization(#[source] serde_json::Error),

    #[error("serialization failed: {0}")]
    Serialization(#[source] serde_json::Error),
}
