//! Process-wide contact store.
//!
//! # Design
//! `ContactsState` is owned by a single actor task. Every mutation, from any
//! handle, travels through one unbounded command queue and is applied in
//! queue order, so state changes never interleave. Network calls do not go
//! through the actor: each operation runs its backend call in its own task
//! and only enqueues the resulting `Phase`.
//!
//! Operations are spawned, so dropping the future returned by e.g.
//! `ContactStore::remove` does not abort the request; the result is still
//! applied when it arrives.
//!
//! UIs observe the store through `subscribe` (a `watch` channel refreshed
//! after every applied action) or take a consistent snapshot with `state`.

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::{mpsc, oneshot, watch};
use tracing::{debug, warn};

use crate::api::ContactsApi;
use crate::error::FetchError;
use crate::state::{Action, ContactsState, Operation, Phase};
use crate::transport::Transport;
use crate::types::{Contact, ContactId, NewContact};

enum Command {
    Apply {
        action: Action,
        applied: Option<oneshot::Sender<()>>,
    },
    Snapshot(oneshot::Sender<ContactsState>),
}

pub struct ContactStore<T> {
    api: Arc<ContactsApi<T>>,
    commands: mpsc::UnboundedSender<Command>,
    updates: watch::Receiver<ContactsState>,
    tickets: Arc<AtomicU64>,
}

impl<T> Clone for ContactStore<T> {
    fn clone(&self) -> Self {
        Self {
            api: Arc::clone(&self.api),
            commands: self.commands.clone(),
            updates: self.updates.clone(),
            tickets: Arc::clone(&self.tickets),
        }
    }
}

impl<T: Transport> ContactStore<T> {
    /// Starts the store actor. Must be called from within a Tokio runtime.
    /// The actor stops once every handle has been dropped.
    pub fn new(api: ContactsApi<T>) -> Self {
        let (commands, queue) = mpsc::unbounded_channel();
        let (publisher, updates) = watch::channel(ContactsState::new());
        tokio::spawn(run_actor(queue, publisher));
        Self {
            api: Arc::new(api),
            commands,
            updates,
            tickets: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Reloads the whole list. The active search query is not reapplied.
    ///
    /// Returns the list the backend sent. If a reload issued later has
    /// already been applied, that list is not adopted by the store; read
    /// `state` or `subscribe` for what is actually displayed.
    pub async fn load_all(&self) -> Result<Vec<Contact>, FetchError> {
        let ticket = self.tickets.fetch_add(1, Ordering::Relaxed) + 1;
        self.enqueue(Action::LoadAll {
            ticket,
            phase: Phase::Pending,
        });
        let api = Arc::clone(&self.api);
        self.complete(Operation::LoadAll, async move { api.list().await }, move |phase| {
            Action::LoadAll { ticket, phase }
        })
        .await
    }

    /// Fetches one contact into `current_contact`, e.g. to prefill an edit form.
    pub async fn load_by_id(&self, id: ContactId) -> Result<Contact, FetchError> {
        self.enqueue(Action::LoadById(Phase::Pending));
        let api = Arc::clone(&self.api);
        self.complete(
            Operation::LoadById,
            async move { api.get_by_id(id).await },
            Action::LoadById,
        )
        .await
    }

    pub async fn add(&self, input: NewContact) -> Result<Contact, FetchError> {
        self.enqueue(Action::Add(Phase::Pending));
        let api = Arc::clone(&self.api);
        self.complete(Operation::Add, async move { api.create(&input).await }, Action::Add)
            .await
    }

    pub async fn save(&self, contact: Contact) -> Result<Contact, FetchError> {
        self.enqueue(Action::Save(Phase::Pending));
        let api = Arc::clone(&self.api);
        self.complete(Operation::Save, async move { api.update(&contact).await }, Action::Save)
            .await
    }

    /// On failure the lists are untouched; undoing any optimistic UI removal
    /// is up to the caller.
    pub async fn remove(&self, id: ContactId) -> Result<(), FetchError> {
        self.enqueue(Action::Remove(Phase::Pending));
        let api = Arc::clone(&self.api);
        self.complete(
            Operation::Remove,
            async move { api.delete_by_id(id).await },
            move |phase| Action::Remove(phase.map(|()| id)),
        )
        .await
    }
}

impl<T> ContactStore<T> {
    pub fn set_search_query(&self, query: impl Into<String>) {
        self.enqueue(Action::SetSearchQuery(query.into()));
    }

    pub fn clear_current_contact(&self) {
        self.enqueue(Action::ClearCurrentContact);
    }

    /// Snapshot taken after every command enqueued before this call.
    pub async fn state(&self) -> ContactsState {
        let (reply, snapshot) = oneshot::channel();
        if self.commands.send(Command::Snapshot(reply)).is_ok() {
            if let Ok(state) = snapshot.await {
                return state;
            }
        }
        self.updates.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<ContactsState> {
        self.updates.clone()
    }

    fn enqueue(&self, action: Action) {
        let command = Command::Apply {
            action,
            applied: None,
        };
        if self.commands.send(command).is_err() {
            warn!("contact store actor has stopped, action dropped");
        }
    }

    /// Runs `call` in its own task and applies its settled phase. A panic in
    /// the task is applied as a rejection so the pending action never leaks.
    async fn complete<R, F, A>(&self, operation: Operation, call: F, action: A) -> Result<R, FetchError>
    where
        R: Clone + Send + 'static,
        F: Future<Output = Result<R, FetchError>> + Send + 'static,
        A: Fn(Phase<R>) -> Action + Clone + Send + 'static,
    {
        let commands = self.commands.clone();
        let settle_action = action.clone();
        let task = tokio::spawn(async move {
            let result = call.await;
            let phase = match &result {
                Ok(value) => Phase::Fulfilled(value.clone()),
                Err(err) => rejected(operation, err),
            };
            settle(&commands, settle_action(phase)).await;
            result
        });
        match task.await {
            Ok(result) => result,
            Err(join_error) => {
                let err = FetchError::Transport(format!("{} task failed: {join_error}", operation.name()));
                settle(&self.commands, action(rejected(operation, &err))).await;
                Err(err)
            }
        }
    }
}

fn rejected<R>(operation: Operation, err: &FetchError) -> Phase<R> {
    warn!(operation = operation.name(), error = %err, "store operation failed");
    Phase::Rejected(format!("{}: {err}", operation.failure_message()))
}

/// Enqueues a settled action and waits until the actor has applied it.
async fn settle(commands: &mpsc::UnboundedSender<Command>, action: Action) {
    let (applied, done) = oneshot::channel();
    let command = Command::Apply {
        action,
        applied: Some(applied),
    };
    if commands.send(command).is_ok() {
        let _ = done.await;
    }
}

async fn run_actor(mut queue: mpsc::UnboundedReceiver<Command>, publisher: watch::Sender<ContactsState>) {
    let mut state = ContactsState::new();
    while let Some(command) = queue.recv().await {
        match command {
            Command::Apply { action, applied } => {
                let operation = action.operation().map(|op| op.name()).unwrap_or("sync");
                if state.apply(action) {
                    debug!(operation, in_flight = state.in_flight(), "applied store action");
                } else {
                    warn!(operation, "discarded reload older than the current list");
                }
                publisher.send_replace(state.clone());
                if let Some(applied) = applied {
                    let _ = applied.send(());
                }
            }
            Command::Snapshot(reply) => {
                let _ = reply.send(state.clone());
            }
        }
    }
    debug!("contact store actor stopped");
}
