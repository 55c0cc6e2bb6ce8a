//! Item DTOs as seen by API clients.
//!
//! Defined independently of the server crate; the live integration test
//! catches drift between the two.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: i64,
    pub name: String,
    /// `0` or `1` on the wire.
    pub is_completed: u8,
    pub display_order: Option<i64>,
    pub created_at: String,
    pub updated_at: String,
}

impl Item {
    pub fn completed(&self) -> bool {
        self.is_completed != 0
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateItem {
    pub name: String,
}

/// Omitting `name` leaves the item unchanged and just fetches it back.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateItem {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}
