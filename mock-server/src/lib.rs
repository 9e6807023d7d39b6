use std::{path::Path as FsPath, sync::Arc};

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::{net::TcpListener, sync::RwLock};
use tracing::{debug, info};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub id: u64,
    pub name: String,
    pub email: String,
    pub phone: String,
}

#[derive(Deserialize)]
pub struct NewContact {
    pub name: String,
    pub email: String,
    pub phone: String,
}

/// Contacts in insertion order; list responses preserve it.
pub type Db = Arc<RwLock<Vec<Contact>>>;

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("reading seed file failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("seed file is not a JSON array of contacts: {0}")]
    Json(#[from] serde_json::Error),
}

pub fn app() -> Router {
    app_with(Vec::new())
}

pub fn app_with(contacts: Vec<Contact>) -> Router {
    let db: Db = Arc::new(RwLock::new(contacts));
    Router::new()
        .route("/contacts", get(list_contacts).post(create_contact))
        .route(
            "/contacts/{id}",
            get(get_contact).put(update_contact).delete(delete_contact),
        )
        .with_state(db)
}

pub async fn load_seed(path: &FsPath) -> Result<Vec<Contact>, SeedError> {
    let raw = tokio::fs::read_to_string(path).await?;
    let contacts: Vec<Contact> = serde_json::from_str(&raw)?;
    info!(count = contacts.len(), path = %path.display(), "loaded seed contacts");
    Ok(contacts)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    run_with(listener, Vec::new()).await
}

pub async fn run_with(listener: TcpListener, contacts: Vec<Contact>) -> Result<(), std::io::Error> {
    axum::serve(listener, app_with(contacts)).await
}

async fn list_contacts(State(db): State<Db>) -> Json<Vec<Contact>> {
    let contacts = db.read().await;
    Json(contacts.clone())
}

async fn create_contact(
    State(db): State<Db>,
    Json(input): Json<NewContact>,
) -> Result<(StatusCode, Json<Contact>), StatusCode> {
    let mut contacts = db.write().await;
    let id = contacts
        .iter()
        .map(|c| c.id)
        .max()
        .unwrap_or(0)
        .checked_add(1)
        .ok_or(StatusCode::INTERNAL_SERVER_ERROR)?;
    let contact = Contact {
        id,
        name: input.name,
        email: input.email,
        phone: input.phone,
    };
    contacts.push(contact.clone());
    debug!(id, "created contact");
    Ok((StatusCode::CREATED, Json(contact)))
}

async fn get_contact(
    State(db): State<Db>,
    Path(id): Path<u64>,
) -> Result<Json<Contact>, StatusCode> {
    let contacts = db.read().await;
    contacts
        .iter()
        .find(|c| c.id == id)
        .cloned()
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

/// Full replacement; the path id wins over any id in the body.
async fn update_contact(
    State(db): State<Db>,
    Path(id): Path<u64>,
    Json(input): Json<NewContact>,
) -> Result<Json<Contact>, StatusCode> {
    let mut contacts = db.write().await;
    let contact = contacts
        .iter_mut()
        .find(|c| c.id == id)
        .ok_or(StatusCode::NOT_FOUND)?;
    contact.name = input.name;
    contact.email = input.email;
    contact.phone = input.phone;
    debug!(id, "updated contact");
    Ok(Json(contact.clone()))
}

async fn delete_contact(
    State(db): State<Db>,
    Path(id): Path<u64>,
) -> Result<StatusCode, StatusCode> {
    let mut contacts = db.write().await;
    let index = contacts
        .iter()
        .position(|c| c.id == id)
        .ok_or(StatusCode::NOT_FOUND)?;
    contacts.remove(index);
    debug!(id, "deleted contact");
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contact_serializes_to_json() {
        let contact = Contact {
            id: 1,
            name: "Anna Ivanova".to_string(),
            email: "anna@example.com".to_string(),
            phone: "+7 900 000-00-00".to_string(),
        };
        let json = serde_json::to_value(&contact).unwrap();
        assert_eq!(json["id"], 1);
        assert_eq!(json["name"], "Anna Ivanova");
        assert_eq!(json["email"], "anna@example.com");
        assert_eq!(json["phone"], "+7 900 000-00-00");
    }

    #[test]
    fn new_contact_ignores_extra_id() {
        let input: NewContact =
            serde_json::from_str(r#"{"id":9,"name":"A","email":"a@b.c","phone":"1"}"#).unwrap();
        assert_eq!(input.name, "A");
    }

    #[test]
    fn new_contact_rejects_missing_phone() {
        let result: Result<NewContact, _> =
            serde_json::from_str(r#"{"name":"A","email":"a@b.c"}"#);
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn load_seed_rejects_non_array() {
        let path = std::env::temp_dir().join(format!("contacts-seed-{}.json", std::process::id()));
        tokio::fs::write(&path, r#"{"contacts":[]}"#).await.unwrap();
        let err = load_seed(&path).await.unwrap_err();
        tokio::fs::remove_file(&path).await.unwrap();
        assert!(matches!(err, SeedError::Json(_)));
    }

    #[tokio::test]
    async fn load_seed_missing_file_is_io_error() {
        let err = load_seed(FsPath::new("/nonexistent/contacts.json")).await.unwrap_err();
        assert!(matches!(err, SeedError::Io(_)));
    }
}
