//! Client-side checks for contact form input.
//!
//! Runs before `ContactStore::add` / `ContactStore::save`; invalid input
//! never reaches the network.

use thiserror::Error;

use crate::types::NewContact;

/// Which form field a validation message belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Email,
    Phone,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: Field,
    pub message: &'static str,
}

/// All problems found in one contact, in form order.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid contact: {}", describe(.0))]
pub struct ValidationErrors(pub Vec<FieldError>);

impl ValidationErrors {
    pub fn get(&self, field: Field) -> Option<&'static str> {
        self.0.iter().find(|e| e.field == field).map(|e| e.message)
    }
}

fn describe(errors: &[FieldError]) -> String {
    errors.iter().map(|e| e.message).collect::<Vec<_>>().join(", ")
}

pub fn validate_contact(input: &NewContact) -> Result<(), ValidationErrors> {
    let mut errors = Vec::new();

    if input.name.trim().is_empty() {
        errors.push(FieldError {
            field: Field::Name,
            message: "name is required",
        });
    }

    if input.email.trim().is_empty() {
        errors.push(FieldError {
            field: Field::Email,
            message: "email is required",
        });
    } else if !is_valid_email(&input.email) {
        errors.push(FieldError {
            field: Field::Email,
            message: "email is invalid",
        });
    }

    if input.phone.trim().is_empty() {
        errors.push(FieldError {
            field: Field::Phone,
            message: "phone is required",
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ValidationErrors(errors))
    }
}

/// `local@domain.tld` with no whitespace and a single `@`.
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    // Some dot in the domain must have text on both sides.
    domain
        .char_indices()
        .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len())
}
