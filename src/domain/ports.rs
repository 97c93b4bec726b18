use crate::domain::model::{Cleaner, Client, Job, JobPatch, NewJob};
use crate::utils::error::Result;
use async_trait::async_trait;

/// CRUD surface of the hosted record store. The engine computes its whole
/// plan from one read pass before any write goes out, so implementations
/// only need per-call consistency.
#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn list_jobs(&self, client_id: Option<&str>) -> Result<Vec<Job>>;
    async fn create_job(&self, fields: NewJob) -> Result<Job>;
    async fn update_job(&self, id: &str, fields: JobPatch) -> Result<Job>;
    async fn get_client(&self, id: &str) -> Result<Option<Client>>;
    async fn get_cleaner(&self, id: &str) -> Result<Option<Cleaner>>;
}

pub trait StoreConfig: Send + Sync {
    fn base_url(&self) -> &str;
    fn api_key(&self) -> Option<&str>;
    fn timeout_seconds(&self) -> u64;
}
