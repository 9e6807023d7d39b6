//! Client core for the contacts service.
//!
//! # Overview
//! Talks to a REST collection of contacts and keeps a local, searchable copy
//! of it for a UI to render.
//!
//! # Design
//! - `ContactsClient` is stateless and sans-IO: `build_*` produces an
//!   `HttpRequest`, `parse_*` consumes an `HttpResponse`.
//! - A `Transport` performs the round-trip; `ReqwestTransport` is the
//!   production one. `ContactsApi` joins the two into one async call per
//!   backend operation.
//! - `ContactsState::apply` is the pure transition function for the cached
//!   list, the filtered view, and the loading/error slots.
//! - `ContactStore` owns that state in a single actor task so concurrent
//!   operations mutate it one at a time.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod filter;
pub mod http;
pub mod state;
pub mod store;
pub mod transport;
pub mod types;
pub mod validation;

pub use api::ContactsApi;
pub use client::ContactsClient;
pub use config::ClientConfig;
pub use error::FetchError;
pub use filter::filter_contacts;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use state::{Action, ContactsState, ListView, Operation, Phase};
pub use store::ContactStore;
pub use transport::{ReqwestTransport, Transport};
pub use types::{Contact, ContactId, NewContact};
pub use validation::{validate_contact, ValidationErrors};
