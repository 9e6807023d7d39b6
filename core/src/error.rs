//! Error types for the contacts API client.
//!
//! # Design
//! Every backend failure is a `FetchError`. The store does not branch on the
//! variant; it only records the rendered message. `NotFound` still gets its
//! own variant because the edit view navigates away on an unknown id, and
//! `Status` keeps the raw status code and body for debugging.

use thiserror::Error;

/// Errors returned by `ContactsClient` parse methods and by transports.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// The server returned 404: the requested contact does not exist.
    #[error("contact not found")]
    NotFound,

    /// The server returned a non-2xx status other than 404.
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// The request never produced a response (connection refused, DNS, ...).
    #[error("transport failed: {0}")]
    Transport(String),

    /// The response body could not be decoded into the expected type.
    #[error("decoding response failed: {0}")]
    Decode(String),

    /// The request payload could not be encoded to JSON.
    #[error("encoding request failed: {0}")]
    Encode(String),
}
