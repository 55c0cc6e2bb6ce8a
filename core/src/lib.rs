//! Client core for the shopping list API.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network. The caller executes the HTTP round-trip, so the
//! core stays deterministic and works with any transport.

pub mod client;
pub mod error;
pub mod http;
pub mod types;

pub use client::ShoppingListClient;
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use types::{CreateItem, Item, UpdateItem};
