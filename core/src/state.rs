//! Contact list state and its transition function.
//!
//! # Design
//! `ContactsState::apply` is the only way state changes. Every async store
//! operation produces a `Phase::Pending` action when it is issued and a
//! `Fulfilled` or `Rejected` action when its response arrives. The store
//! actor feeds these actions through `apply` one at a time, so the
//! transition rules below can be tested without a runtime or a server.
//!
//! `filtered_contacts` is recomputed from `contacts` by `SetSearchQuery`.
//! The other actions patch it alongside `contacts`:
//! - a reload replaces both lists and does not reapply the query,
//! - a created contact is prepended to both lists, matching or not,
//! - a saved contact replaces its entry in each list where present,
//! - a removed contact is dropped from both lists.

use crate::filter::filter_contacts;
use crate::types::{Contact, ContactId};

/// The asynchronous store operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    LoadAll,
    LoadById,
    Add,
    Save,
    Remove,
}

impl Operation {
    pub fn name(&self) -> &'static str {
        match self {
            Operation::LoadAll => "load_all",
            Operation::LoadById => "load_by_id",
            Operation::Add => "add",
            Operation::Save => "save",
            Operation::Remove => "remove",
        }
    }

    /// Prefix of the message stored in `ContactsState::error` on failure.
    pub fn failure_message(&self) -> &'static str {
        match self {
            Operation::LoadAll => "Failed to fetch contacts",
            Operation::LoadById => "Failed to fetch contact",
            Operation::Add => "Failed to create contact",
            Operation::Save => "Failed to update contact",
            Operation::Remove => "Failed to delete contact",
        }
    }
}

/// Where an async operation is in its lifecycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase<T> {
    Pending,
    Fulfilled(T),
    Rejected(String),
}

impl<T> Phase<T> {
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Phase<U> {
        match self {
            Phase::Pending => Phase::Pending,
            Phase::Fulfilled(value) => Phase::Fulfilled(f(value)),
            Phase::Rejected(message) => Phase::Rejected(message),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// `ticket` orders reloads by issue time; see `ContactsState::apply`.
    LoadAll { ticket: u64, phase: Phase<Vec<Contact>> },
    LoadById(Phase<Contact>),
    Add(Phase<Contact>),
    Save(Phase<Contact>),
    Remove(Phase<ContactId>),
    SetSearchQuery(String),
    ClearCurrentContact,
}

impl Action {
    pub fn operation(&self) -> Option<Operation> {
        match self {
            Action::LoadAll { .. } => Some(Operation::LoadAll),
            Action::LoadById(_) => Some(Operation::LoadById),
            Action::Add(_) => Some(Operation::Add),
            Action::Save(_) => Some(Operation::Save),
            Action::Remove(_) => Some(Operation::Remove),
            Action::SetSearchQuery(_) | Action::ClearCurrentContact => None,
        }
    }
}

/// What the list view should render for the current state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListView<'a> {
    Loading,
    Failed(&'a str),
    Empty { query: &'a str },
    Contacts(&'a [Contact]),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactsState {
    pub contacts: Vec<Contact>,
    pub filtered_contacts: Vec<Contact>,
    pub search_query: String,
    pub loading: bool,
    pub error: Option<String>,
    pub current_contact: Option<Contact>,
    in_flight: usize,
    last_list_ticket: u64,
}

impl ContactsState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of async operations issued but not yet settled.
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    /// Applies one action. Returns `false` when a reload result was dropped
    /// because a reload issued later has already been applied.
    ///
    /// Tickets only guard the lists. A rejected reload always records its
    /// error, stale or not, since `error` tracks the latest failure.
    pub fn apply(&mut self, action: Action) -> bool {
        match action {
            Action::SetSearchQuery(query) => {
                self.filtered_contacts = filter_contacts(&self.contacts, &query);
                self.search_query = query;
                true
            }
            Action::ClearCurrentContact => {
                self.current_contact = None;
                true
            }
            Action::LoadAll { ticket, phase } => match phase {
                Phase::Pending => self.begin(),
                Phase::Rejected(message) => self.fail(message),
                Phase::Fulfilled(contacts) => {
                    self.settle();
                    if ticket <= self.last_list_ticket {
                        return false;
                    }
                    self.last_list_ticket = ticket;
                    self.filtered_contacts = contacts.clone();
                    self.contacts = contacts;
                    true
                }
            },
            Action::LoadById(phase) => match phase {
                Phase::Pending => self.begin(),
                Phase::Rejected(message) => self.fail(message),
                Phase::Fulfilled(contact) => {
                    self.settle();
                    self.current_contact = Some(contact);
                    true
                }
            },
            Action::Add(phase) => match phase {
                Phase::Pending => self.begin(),
                Phase::Rejected(message) => self.fail(message),
                Phase::Fulfilled(contact) => {
                    self.settle();
                    self.contacts.insert(0, contact.clone());
                    self.filtered_contacts.insert(0, contact);
                    true
                }
            },
            Action::Save(phase) => match phase {
                Phase::Pending => self.begin(),
                Phase::Rejected(message) => self.fail(message),
                Phase::Fulfilled(contact) => {
                    self.settle();
                    replace_by_id(&mut self.contacts, &contact);
                    replace_by_id(&mut self.filtered_contacts, &contact);
                    true
                }
            },
            Action::Remove(phase) => match phase {
                Phase::Pending => self.begin(),
                Phase::Rejected(message) => self.fail(message),
                Phase::Fulfilled(id) => {
                    self.settle();
                    self.contacts.retain(|c| c.id != id);
                    self.filtered_contacts.retain(|c| c.id != id);
                    true
                }
            },
        }
    }

    pub fn list_view(&self) -> ListView<'_> {
        if self.loading && self.filtered_contacts.is_empty() {
            return ListView::Loading;
        }
        if let Some(message) = &self.error {
            return ListView::Failed(message);
        }
        if self.filtered_contacts.is_empty() {
            return ListView::Empty {
                query: &self.search_query,
            };
        }
        ListView::Contacts(&self.filtered_contacts)
    }

    fn begin(&mut self) -> bool {
        self.in_flight += 1;
        self.loading = true;
        self.error = None;
        true
    }

    fn settle(&mut self) {
        self.in_flight = self.in_flight.saturating_sub(1);
        self.loading = self.in_flight > 0;
    }

    fn fail(&mut self, message: String) -> bool {
        self.settle();
        self.error = Some(message);
        true
    }
}

/// Replaces the entry with the same id in place. Missing ids are ignored.
fn replace_by_id(list: &mut [Contact], contact: &Contact) {
    if let Some(slot) = list.iter_mut().find(|c| c.id == contact.id) {
        *slot = contact.clone();
    }
}
