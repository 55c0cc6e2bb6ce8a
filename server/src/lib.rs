//! Shopping list web service.
//!
//! # Overview
//! A JSON API over a single SQLite `items` table plus the static page that
//! drives it. Handlers validate input, call one [`ItemStore`] operation, and
//! serialize the result; failures leave through [`AppError`].

pub mod config;
pub mod error;
pub mod item;
pub mod store;
pub mod validation;

use axum::{
    extract::{rejection::JsonRejection, FromRequestParts, Path, State},
    http::{request::Parts, StatusCode},
    response::Html,
    routing::{get, put},
    Json, Router,
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio::net::TcpListener;

pub use config::Config;
pub use error::{AppError, ErrorBody};
pub use item::{CreateItem, Item, UpdateItem};
pub use store::{ItemStore, StoreError};

use validation::{normalize_item_name, NAME_REQUIRED, UPDATE_BODY_REQUIRED};

const INDEX_PAGE: &str = include_str!("../static/index.html");

pub fn app(store: ItemStore) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/api/items", get(list_items).post(create_item))
        .route(
            "/api/items/{id}",
            get(get_item).put(update_item).delete(delete_item),
        )
        .route("/api/items/{id}/toggle", put(toggle_item))
        .with_state(store)
}

pub async fn run(listener: TcpListener, store: ItemStore) -> Result<(), std::io::Error> {
    axum::serve(listener, app(store)).await
}

/// Integer `{id}` path segment; anything else is a 400 with an error body.
pub struct ItemId(pub i64);

impl<S: Send + Sync> FromRequestParts<S> for ItemId {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id) = Path::<i64>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| AppError::Validation(rejection.body_text()))?;
        Ok(ItemId(id))
    }
}

/// Decode a JSON body that must be an object; anything else is a 400 with `message`.
fn object_body<T: DeserializeOwned>(
    payload: Result<Json<Value>, JsonRejection>,
    message: &'static str,
) -> Result<T, AppError> {
    let rejected = |reason: String| {
        tracing::debug!(%reason, "unusable request body");
        AppError::Validation(message.to_string())
    };
    match payload {
        Ok(Json(body @ Value::Object(_))) => {
            serde_json::from_value(body).map_err(|err| rejected(err.to_string()))
        }
        Ok(Json(other)) => Err(rejected(format!("expected a JSON object, got {other}"))),
        Err(rejection) => Err(rejected(rejection.body_text())),
    }
}

async fn index() -> Html<&'static str> {
    Html(INDEX_PAGE)
}

async fn list_items(State(store): State<ItemStore>) -> Result<Json<Vec<Item>>, AppError> {
    let items = store.list().await?;
    tracing::debug!(count = items.len(), "retrieved items");
    Ok(Json(items))
}

async fn create_item(
    State(store): State<ItemStore>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<Item>), AppError> {
    let input: CreateItem = object_body(payload, NAME_REQUIRED)?;
    let name = normalize_item_name(&input.name)?;
    let item = store.append(name).await?;
    tracing::debug!(id = item.id, name = %item.name, order = ?item.display_order, "created item");
    Ok((StatusCode::CREATED, Json(item)))
}

async fn get_item(
    State(store): State<ItemStore>,
    ItemId(id): ItemId,
) -> Result<Json<Item>, AppError> {
    store.get(id).await?.map(Json).ok_or(AppError::NotFound(id))
}

async fn update_item(
    State(store): State<ItemStore>,
    ItemId(id): ItemId,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Item>, AppError> {
    let input: UpdateItem = object_body(payload, UPDATE_BODY_REQUIRED)?;
    let item = match input.name {
        Some(raw) => {
            let name = normalize_item_name(&raw)?;
            store.update_name(id, name).await?
        }
        None => store.get(id).await?,
    };
    item.map(Json).ok_or(AppError::NotFound(id))
}

async fn delete_item(
    State(store): State<ItemStore>,
    ItemId(id): ItemId,
) -> Result<StatusCode, AppError> {
    let removed = store.delete(id).await?;
    tracing::debug!(id, removed, "deleted item");
    Ok(StatusCode::NO_CONTENT)
}

async fn toggle_item(
    State(store): State<ItemStore>,
    ItemId(id): ItemId,
) -> Result<Json<Item>, AppError> {
    let item = store.toggle_completed(id).await?;
    item.map(Json).ok_or(AppError::NotFound(id))
}
