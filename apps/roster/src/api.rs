use async_trait::async_trait;
use products_hr::{DeleteReceipt, Employee, EmployeeDraft, ErrorBody};
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::ClientError;

pub const DEFAULT_API_URL: &str = "http://localhost:5000/api/employees";

/// The four calls the grid makes against the roster API.
#[async_trait]
pub trait EmployeeApi: Send + Sync {
    async fn list(&self) -> Result<Vec<Employee>, ClientError>;
    async fn create(&self, draft: &EmployeeDraft) -> Result<Employee, ClientError>;
    async fn update(&self, id: i32, draft: &EmployeeDraft) -> Result<Employee, ClientError>;
    async fn delete(&self, id: i32) -> Result<DeleteReceipt, ClientError>;
}

#[derive(Clone, Debug)]
pub struct HttpEmployeeApi {
    client: Client,
    base_url: String,
}

impl HttpEmployeeApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn item_url(&self, id: i32) -> String {
        format!("{}/{}", self.base_url, id)
    }
}

async fn send<T: DeserializeOwned>(request: RequestBuilder) -> Result<T, ClientError> {
    let response = request.send().await.map_err(ClientError::Transport)?;
    decode(response).await
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
    let status = response.status();
    debug!(%status, url = %response.url(), "roster api response");
    if status.is_success() {
        return response.json::<T>().await.map_err(ClientError::Decode);
    }
    let message = response.json::<ErrorBody>().await.ok().map(|body| body.error);
    Err(ClientError::Api {
        status: status.as_u16(),
        message,
    })
}

#[async_trait]
impl EmployeeApi for HttpEmployeeApi {
    async fn list(&self) -> Result<Vec<Employee>, ClientError> {
        send(self.client.get(&self.base_url)).await
    }

    async fn create(&self, draft: &EmployeeDraft) -> Result<Employee, ClientError> {
        send(self.client.post(&self.base_url).json(draft)).await
    }

    async fn update(&self, id: i32, draft: &EmployeeDraft) -> Result<Employee, ClientError> {
        send(self.client.put(self.item_url(id)).json(draft)).await
    }

    async fn delete(&self, id: i32) -> Result<DeleteReceipt, ClientError> {
        send(self.client.delete(self.item_url(id))).await
    }
}
