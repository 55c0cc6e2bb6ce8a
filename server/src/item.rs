//! Shopping list item and the request payloads that act on it.
//!
//! # Design
//! `Item` is both the row shape read from the `items` table and the JSON
//! representation returned by the API. The completion flag is a `bool` in
//! Rust but travels as `0`/`1` on the wire, matching how the column is stored.

use rusqlite::Row;
use serde::{Deserialize, Serialize};

/// Columns selected for every item query, in `Item::from_row` order.
pub(crate) const ITEM_COLUMNS: &str =
    "id, name, is_completed, display_order, created_at, updated_at";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: i64,
    pub name: String,
    #[serde(with = "completion_flag")]
    pub is_completed: bool,
    /// `None` only for legacy rows inserted without an order.
    pub display_order: Option<i64>,
    pub created_at: String,
    pub updated_at: String,
}

impl Item {
    pub(crate) fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        let completed: Option<i64> = row.get(2)?;
        Ok(Self {
            id: row.get(0)?,
            name: row.get(1)?,
            is_completed: completed.unwrap_or(0) != 0,
            display_order: row.get(3)?,
            created_at: row.get(4)?,
            updated_at: row.get(5)?,
        })
    }
}

/// Body of `POST /api/items`.
#[derive(Debug, Deserialize)]
pub struct CreateItem {
    pub name: String,
}

/// Body of `PUT /api/items/{id}`. Unknown fields are ignored and an absent
/// `name` leaves the item untouched.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateItem {
    #[serde(default)]
    pub name: Option<String>,
}

mod completion_flag {
    use serde::de::{self, Deserializer, Unexpected};
    use serde::{Deserialize, Serializer};

    pub fn serialize<S: Serializer>(value: &bool, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(u8::from(*value))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
        match u8::deserialize(deserializer)? {
            0 => Ok(false),
            1 => Ok(true),
            other => Err(de::Error::invalid_value(
                Unexpected::Unsigned(u64::from(other)),
                &"0 or 1",
            )),
        }
    }
}
