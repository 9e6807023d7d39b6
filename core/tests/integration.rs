//! Full store lifecycle against the live mock server.
//!
//! # Design
//! Starts the mock server on a random port, then drives every store
//! operation over real HTTP through `ReqwestTransport`. Validates that the
//! core's request building, response parsing, and state merging work
//! end-to-end with the actual server.

use contacts_core::{
    validate_contact, ClientConfig, ContactStore, ContactsApi, FetchError, NewContact,
    ReqwestTransport,
};

async fn start_server(seed: Vec<mock_server::Contact>) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(mock_server::run_with(listener, seed));
    format!("http://{addr}/contacts")
}

fn input(name: &str, email: &str, phone: &str) -> NewContact {
    NewContact {
        name: name.to_string(),
        email: email.to_string(),
        phone: phone.to_string(),
    }
}

#[tokio::test]
async fn crud_lifecycle() {
    // Step 1: start mock server on a random port.
    let base_url = start_server(Vec::new()).await;
    let store = ClientConfig { base_url }.connect();

    // Step 2: load: empty.
    assert!(store.load_all().await.unwrap().is_empty());

    // Step 3: create two contacts; each is prepended locally.
    let anna = input("Anna Ivanova", "anna@example.com", "+7 900 000-00-01");
    validate_contact(&anna).unwrap();
    let anna = store.add(anna).await.unwrap();
    let boris = store.add(input("Boris", "b@x.com", "123")).await.unwrap();
    assert_ne!(anna.id, boris.id);

    let state = store.state().await;
    assert_eq!(state.contacts, vec![boris.clone(), anna.clone()]);

    // Step 4: the server lists in insertion order; reload adopts it.
    store.load_all().await.unwrap();
    let state = store.state().await;
    assert_eq!(state.contacts, vec![anna.clone(), boris.clone()]);
    assert_eq!(state.filtered_contacts, state.contacts);

    // Step 5: search.
    store.set_search_query("IVAN");
    assert_eq!(store.state().await.filtered_contacts, vec![anna.clone()]);

    // Step 6: fetch one for editing, then save the edit.
    store.load_by_id(anna.id).await.unwrap();
    let mut edited = store.state().await.current_contact.unwrap();
    assert_eq!(edited, anna);
    edited.name = "Anna Petrova".to_string();
    let saved = store.save(edited.clone()).await.unwrap();
    assert_eq!(saved, edited);

    let state = store.state().await;
    assert_eq!(state.contacts[0], edited);
    assert_eq!(state.filtered_contacts, vec![edited.clone()]);

    // Step 7: delete.
    store.remove(boris.id).await.unwrap();
    assert_eq!(store.state().await.contacts, vec![edited.clone()]);

    // Step 8: get after delete: not found.
    let err = store.load_by_id(boris.id).await.unwrap_err();
    assert_eq!(err, FetchError::NotFound);
    assert!(store.state().await.error.is_some());

    // Step 9: delete again: rejected, list untouched.
    let err = store.remove(boris.id).await.unwrap_err();
    assert_eq!(err, FetchError::NotFound);
    let state = store.state().await;
    assert_eq!(state.contacts, vec![edited]);
    assert!(!state.loading);
}

#[tokio::test]
async fn seeded_server_is_listed_in_order() {
    let seed = vec![
        mock_server::Contact {
            id: 3,
            name: "Vera".to_string(),
            email: "v@x.com".to_string(),
            phone: "3".to_string(),
        },
        mock_server::Contact {
            id: 1,
            name: "Anna".to_string(),
            email: "a@x.com".to_string(),
            phone: "1".to_string(),
        },
    ];
    let base_url = start_server(seed).await;
    let transport = ReqwestTransport::with_client(reqwest::Client::new());
    let api = ContactsApi::new(&format!("{base_url}/"), transport);
    assert_eq!(api.client().base_url(), base_url);
    let store = ContactStore::new(api);

    let contacts = store.load_all().await.unwrap();
    let ids: Vec<u64> = contacts.iter().map(|c| c.id).collect();
    assert_eq!(ids, vec![3, 1]);

    let created = store.add(input("Gleb", "g@x.com", "7")).await.unwrap();
    assert_eq!(created.id, 4);
}

#[tokio::test]
async fn unreachable_backend_sets_error() {
    let addr = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap();
    let store = ClientConfig {
        base_url: format!("http://{addr}/contacts"),
    }
    .connect();

    let err = store.load_all().await.unwrap_err();
    assert!(matches!(err, FetchError::Transport(_)));
    let state = store.state().await;
    assert!(state.error.unwrap().starts_with("Failed to fetch contacts"));
    assert!(!state.loading);
}
