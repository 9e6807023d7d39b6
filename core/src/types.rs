//! Domain DTOs for the contacts API.
//!
//! # Design
//! These types mirror the mock-server's schema but are defined independently.
//! Integration tests catch any schema drift between the two crates.

use serde::{Deserialize, Serialize};

/// Server-assigned contact identifier. Never invented on the client side.
pub type ContactId = u64;

/// A contact record as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Contact {
    pub id: ContactId,
    pub name: String,
    pub email: String,
    pub phone: String,
}

/// Request payload for creating a contact: a contact without its id.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewContact {
    pub name: String,
    pub email: String,
    pub phone: String,
}

impl Contact {
    pub fn with_id(id: ContactId, details: NewContact) -> Self {
        Self {
            id,
            name: details.name,
            email: details.email,
            phone: details.phone,
        }
    }

    /// Editable fields of this contact, e.g. to prefill an edit form.
    pub fn details(&self) -> NewContact {
        NewContact {
            name: self.name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
        }
    }
}
