//! Backend client: one network call per logical operation.
//!
//! Joins the sans-IO `ContactsClient` with a `Transport`. No retries, no
//! caching, no timeouts beyond what the transport applies.

use tracing::debug;

use crate::client::ContactsClient;
use crate::error::FetchError;
use crate::http::{HttpRequest, HttpResponse};
use crate::transport::Transport;
use crate::types::{Contact, ContactId, NewContact};

#[derive(Debug, Clone)]
pub struct ContactsApi<T> {
    client: ContactsClient,
    transport: T,
}

impl<T: Transport> ContactsApi<T> {
    pub fn new(base_url: &str, transport: T) -> Self {
        Self {
            client: ContactsClient::new(base_url),
            transport,
        }
    }

    pub fn client(&self) -> &ContactsClient {
        &self.client
    }

    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, FetchError> {
        debug!(method = request.method.as_str(), path = %request.path, "sending request");
        let response = self.transport.execute(request).await?;
        debug!(status = response.status, "received response");
        Ok(response)
    }

    pub async fn list(&self) -> Result<Vec<Contact>, FetchError> {
        let response = self.send(self.client.build_list()).await?;
        self.client.parse_list(response)
    }

    pub async fn get_by_id(&self, id: ContactId) -> Result<Contact, FetchError> {
        let response = self.send(self.client.build_get(id)).await?;
        self.client.parse_get(response)
    }

    pub async fn create(&self, input: &NewContact) -> Result<Contact, FetchError> {
        let request = self.client.build_create(input)?;
        let response = self.send(request).await?;
        self.client.parse_create(response)
    }

    pub async fn update(&self, contact: &Contact) -> Result<Contact, FetchError> {
        let request = self.client.build_update(contact)?;
        let response = self.send(request).await?;
        self.client.parse_update(response)
    }

    pub async fn delete_by_id(&self, id: ContactId) -> Result<(), FetchError> {
        let response = self.send(self.client.build_delete(id)).await?;
        self.client.parse_delete(response)
    }
}
