//! Stateless HTTP request builder and response parser for the contacts API.
//!
//! # Design
//! `ContactsClient` holds only the collection URL and carries no mutable
//! state between calls. Each CRUD operation is split into a `build_*` method
//! that produces an `HttpRequest` and a `parse_*` method that consumes an
//! `HttpResponse`. The round-trip itself belongs to a `Transport`.
//!
//! Any 2xx status counts as success: backends answer create with 200 or 201
//! and delete with 200 or 204.

use serde::de::DeserializeOwned;

use crate::error::FetchError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{Contact, ContactId, NewContact};

/// Synchronous, stateless client for the contacts collection.
#[derive(Debug, Clone)]
pub struct ContactsClient {
    base_url: String,
}

impl ContactsClient {
    /// `base_url` is the collection URL itself, e.g.
    /// `http://localhost:3002/contacts`.
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn item_url(&self, id: ContactId) -> String {
        format!("{}/{id}", self.base_url)
    }

    pub fn build_list(&self) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: self.base_url.clone(),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn build_get(&self, id: ContactId) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: self.item_url(id),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn build_create(&self, input: &NewContact) -> Result<HttpRequest, FetchError> {
        let body = serde_json::to_string(input).map_err(|e| FetchError::Encode(e.to_string()))?;
        Ok(HttpRequest {
            method: HttpMethod::Post,
            path: self.base_url.clone(),
            headers: json_headers(),
            body: Some(body),
        })
    }

    /// The full contact goes into the body; the server replaces the record.
    pub fn build_update(&self, contact: &Contact) -> Result<HttpRequest, FetchError> {
        let body = serde_json::to_string(contact).map_err(|e| FetchError::Encode(e.to_string()))?;
        Ok(HttpRequest {
            method: HttpMethod::Put,
            path: self.item_url(contact.id),
            headers: json_headers(),
            body: Some(body),
        })
    }

    pub fn build_delete(&self, id: ContactId) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Delete,
            path: self.item_url(id),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn parse_list(&self, response: HttpResponse) -> Result<Vec<Contact>, FetchError> {
        decode(response)
    }

    pub fn parse_get(&self, response: HttpResponse) -> Result<Contact, FetchError> {
        decode(response)
    }

    pub fn parse_create(&self, response: HttpResponse) -> Result<Contact, FetchError> {
        decode(response)
    }

    pub fn parse_update(&self, response: HttpResponse) -> Result<Contact, FetchError> {
        decode(response)
    }

    pub fn parse_delete(&self, response: HttpResponse) -> Result<(), FetchError> {
        check_status(&response)
    }
}

fn json_headers() -> Vec<(String, String)> {
    vec![("content-type".to_string(), "application/json".to_string())]
}

fn decode<T: DeserializeOwned>(response: HttpResponse) -> Result<T, FetchError> {
    check_status(&response)?;
    serde_json::from_str(&response.body).map_err(|e| FetchError::Decode(e.to_string()))
}

/// Map non-success status codes to the appropriate `FetchError` variant.
fn check_status(response: &HttpResponse) -> Result<(), FetchError> {
    if response.is_success() {
        return Ok(());
    }
    if response.status == 404 {
        return Err(FetchError::NotFound);
    }
    Err(FetchError::Status {
        status: response.status,
        body: response.body.clone(),
    })
}
