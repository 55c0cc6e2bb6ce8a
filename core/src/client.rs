//! Request builder and response parser for the shopping list API.
//!
//! # Design
//! `ShoppingListClient` holds only a `base_url`. Each operation is a
//! `build_*` method producing an `HttpRequest` and a `parse_*` method
//! consuming the matching `HttpResponse`; the caller does the round-trip.

use serde::de::DeserializeOwned;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{CreateItem, Item, UpdateItem};

#[derive(Debug, Clone)]
pub struct ShoppingListClient {
    base_url: String,
}

impl ShoppingListClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn items_url(&self) -> String {
        format!("{}/api/items", self.base_url)
    }

    fn item_url(&self, id: i64) -> String {
        format!("{}/api/items/{id}", self.base_url)
    }

    pub fn build_list_items(&self) -> HttpRequest {
        HttpRequest::empty(HttpMethod::Get, self.items_url())
    }

    pub fn build_get_item(&self, id: i64) -> HttpRequest {
        HttpRequest::empty(HttpMethod::Get, self.item_url(id))
    }

    pub fn build_create_item(&self, input: &CreateItem) -> Result<HttpRequest, ApiError> {
        let body = serde_json::to_string(input).map_err(ApiError::Serialization)?;
        Ok(HttpRequest::json(HttpMethod::Post, self.items_url(), body))
    }

    pub fn build_update_item(&self, id: i64, input: &UpdateItem) -> Result<HttpRequest, ApiError> {
        let body = serde_json::to_string(input).map_err(ApiError::Serialization)?;
        Ok(HttpRequest::json(HttpMethod::Put, self.item_url(id), body))
    }

    pub fn build_toggle_item(&self, id: i64) -> HttpRequest {
        HttpRequest::empty(HttpMethod::Put, format!("{}/toggle", self.item_url(id)))
    }

    pub fn build_delete_item(&self, id: i64) -> HttpRequest {
        HttpRequest::empty(HttpMethod::Delete, self.item_url(id))
    }

    pub fn parse_list_items(&self, response: HttpResponse) -> Result<Vec<Item>, ApiError> {
        parse_json(response, 200)
    }

    pub fn parse_get_item(&self, response: HttpResponse) -> Result<Item, ApiError> {
        parse_json(response, 200)
    }

    pub fn parse_create_item(&self, response: HttpResponse) -> Result<Item, ApiError> {
        parse_json(response, 201)
    }

    pub fn parse_update_item(&self, response: HttpResponse) -> Result<Item, ApiError> {
        parse_json(response, 200)
    }

    pub fn parse_toggle_item(&self, response: HttpResponse) -> Result<Item, ApiError> {
        parse_json(response, 200)
    }

    /// Deleting a missing item also answers 204, so `NotFound` never comes from here.
    pub fn parse_delete_item(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response, 204)
    }
}

fn parse_json<T: DeserializeOwned>(response: HttpResponse, expected: u16) -> Result<T, ApiError> {
    check_status(&response, expected)?;
    serde_json::from_str(&response.body).map_err(ApiError::Deserialization)
}

fn check_status(response: &HttpResponse, expected: u16) -> Result<(), ApiError> {
    match response.status {
        status if status == expected => Ok(()),
        404 => Err(ApiError::NotFound),
        400 => match response.error_message() {
            Some(message) => Err(ApiError::Rejected(message)),
            None => Err(ApiError::Http {
                status: 400,
                body: response.body.clone(),
            }),
        },
        status => Err(ApiError::Http {
            status,
            body: response.body.clone(),
        }),
    }
}
