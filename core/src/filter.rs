//! Search filter for the contact list.

use crate::types::Contact;

/// Contacts whose name contains `query`, ignoring case. Order is preserved
/// and an empty query keeps everything.
pub fn filter_contacts(contacts: &[Contact], query: &str) -> Vec<Contact> {
    let needle = query.to_lowercase();
    contacts
        .iter()
        .filter(|contact| matches(contact, &needle))
        .cloned()
        .collect()
}

/// `needle` must already be lowercased.
fn matches(contact: &Contact, needle: &str) -> bool {
    needle.is_empty() || contact.name.to_lowercase().contains(needle)
}
