//! Client configuration.
//!
//! The backend collection URL comes from `CONTACTS_API_BASE_URL`; an unset or
//! blank variable falls back to the local mock server.

use tracing::debug;

use crate::api::ContactsApi;
use crate::store::ContactStore;
use crate::transport::ReqwestTransport;

pub const BASE_URL_ENV: &str = "CONTACTS_API_BASE_URL";
pub const DEFAULT_BASE_URL: &str = "http://localhost:3002/contacts";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

impl ClientConfig {
    pub fn from_env() -> Self {
        Self::from_base_url(std::env::var(BASE_URL_ENV).ok())
    }

    fn from_base_url(value: Option<String>) -> Self {
        match value {
            Some(url) if !url.trim().is_empty() => {
                debug!(base_url = %url, "using base url from environment");
                Self {
                    base_url: url.trim().to_string(),
                }
            }
            _ => Self::default(),
        }
    }

    /// Store talking to the configured backend over HTTP. Must be called
    /// from within a Tokio runtime.
    pub fn connect(&self) -> ContactStore<ReqwestTransport> {
        ContactStore::new(ContactsApi::new(&self.base_url, ReqwestTransport::new()))
    }
}
