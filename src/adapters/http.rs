use crate::domain::model::{Cleaner, Client, Job, JobPatch, NewJob};
use crate::domain::ports::{RecordStore, StoreConfig};
use crate::utils::error::{EngineError, Result};
use async_trait::async_trait;
use reqwest::{Method, RequestBuilder, StatusCode};
use std::time::Duration;

/// Record store reached over a REST API:
/// `GET /clients/{id}`, `GET /cleaners/{id}`, `GET /jobs?clientId=..`,
/// `POST /jobs`, `PATCH /jobs/{id}`.
pub struct HttpRecordStore {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl HttpRecordStore {
    pub fn new(config: &impl StoreConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds()))
            .build()?;
        Ok(Self {
            client,
            base_url: config.base_url().trim_end_matches('/').to_string(),
            api_key: config.api_key().map(|k| k.to_string()),
        })
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}/{}", self.base_url, path);
        let builder = self.client.request(method, url);
        match &self.api_key {
            Some(key) => builder.bearer_auth(key),
            None => builder,
        }
    }

    async fn expect_success(response: reqwest::Response) -> Result<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let message = response.text().await.unwrap_or_default();
        Err(EngineError::StoreError {
            status: status.as_u16(),
            message: message.chars().take(300).collect(),
        })
    }

    /// 404 maps to `Ok(None)`; missing records are data, not transport
    /// failures.
    async fn get_optional<T: serde::de::DeserializeOwned>(&self, path: &str) -> Result<Option<T>> {
        let response = self.request(Method::GET, path).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let response = Self::expect_success(response).await?;
        Ok(Some(response.json().await?))
    }
}

#[async_trait]
impl RecordStore for HttpRecordStore {
    async fn list_jobs(&self, client_id: Option<&str>) -> Result<Vec<Job>> {
        let mut builder = self.request(Method::GET, "jobs");
        if let Some(id) = client_id {
            builder = builder.query(&[("clientId", id)]);
        }
        tracing::debug!(client = ?client_id, "listing jobs");
        let response = Self::expect_success(builder.send().await?).await?;
        Ok(response.json().await?)
    }

    async fn create_job(&self, fields: NewJob) -> Result<Job> {
        let response = self.request(Method::POST, "jobs").json(&fields).send().await?;
        let response = Self::expect_success(response).await?;
        Ok(response.json().await?)
    }

    async fn update_job(&self, id: &str, fields: JobPatch) -> Result<Job> {
        let response = self
            .request(Method::PATCH, &format!("jobs/{}", id))
            .json(&fields)
            .send()
            .await?;
        let response = Self::expect_success(response).await?;
        Ok(response.json().await?)
    }

    async fn get_client(&self, id: &str) -> Result<Option<Client>> {
        self.get_optional(&format!("clients/{}", id)).await
    }

    async fn get_cleaner(&self, id: &str) -> Result<Option<Cleaner>> {
        self.get_optional(&format!("cleaners/{}", id)).await
    }
}
