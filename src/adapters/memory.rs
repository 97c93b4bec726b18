use crate::domain::model::{Cleaner, Client, Job, JobPatch, JobStatus, NewJob};
use crate::domain::ports::RecordStore;
use crate::utils::error::{EngineError, Result};
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

#[derive(Default)]
struct Inner {
    clients: HashMap<String, Client>,
    cleaners: HashMap<String, Cleaner>,
    jobs: Vec<Job>,
    next_id: u64,
    failing_job_ids: HashSet<String>,
}

/// In-process record store used by tests and local dry runs. Ids are
/// assigned sequentially (`job-1`, `job-2`, ...).
#[derive(Default)]
pub struct InMemoryRecordStore {
    inner: Mutex<Inner>,
}

impl InMemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_client(&self, client: Client) {
        let mut inner = self.inner.lock().unwrap();
        inner.clients.insert(client.id.clone(), client);
    }

    pub fn insert_cleaner(&self, cleaner: Cleaner) {
        let mut inner = self.inner.lock().unwrap();
        inner.cleaners.insert(cleaner.id.clone(), cleaner);
    }

    pub fn insert_job(&self, job: Job) {
        let mut inner = self.inner.lock().unwrap();
        inner.jobs.push(job);
    }

    /// Makes updates against the given job id fail, for exercising the
    /// collect-and-continue write path.
    pub fn fail_updates_for(&self, job_id: &str) {
        let mut inner = self.inner.lock().unwrap();
        inner.failing_job_ids.insert(job_id.to_string());
    }

    pub fn jobs(&self) -> Vec<Job> {
        self.inner.lock().unwrap().jobs.clone()
    }
}

#[async_trait]
impl RecordStore for InMemoryRecordStore {
    async fn list_jobs(&self, client_id: Option<&str>) -> Result<Vec<Job>> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .jobs
            .iter()
            .filter(|j| client_id.map_or(true, |id| j.client_id == id))
            .cloned()
            .collect())
    }

    async fn create_job(&self, fields: NewJob) -> Result<Job> {
        let mut inner = self.inner.lock().unwrap();
        inner.next_id += 1;
        let job = Job {
            id: format!("job-{}", inner.next_id),
            client_id: fields.client_id,
            cleaner_ids: fields.cleaner_ids,
            date: fields.date,
            start_time: Some(fields.start_time),
            end_time: Some(fields.end_time),
            duration_hours: Some(fields.duration_hours),
            status: fields.status,
            amount_charged: fields.amount_charged,
            client_hourly_rate: fields.client_hourly_rate,
            profit: fields.profit,
            is_recurring: fields.is_recurring,
            recurrence_frequency: Some(fields.recurrence_frequency),
            bedrooms: fields.bedrooms,
            bathrooms: fields.bathrooms,
            address: fields.address,
        };
        inner.jobs.push(job.clone());
        Ok(job)
    }

    async fn update_job(&self, id: &str, fields: JobPatch) -> Result<Job> {
        let mut inner = self.inner.lock().unwrap();
        if inner.failing_job_ids.contains(id) {
            return Err(EngineError::StoreError {
                status: 500,
                message: format!("simulated failure updating {}", id),
            });
        }
        let job = inner
            .jobs
            .iter_mut()
            .find(|j| j.id == id)
            .ok_or_else(|| EngineError::NotFound {
                entity: "job".to_string(),
                id: id.to_string(),
            })?;
        if let Some(date) = fields.date {
            job.date = date;
        }
        if let Some(start) = fields.start_time {
            job.start_time = Some(start);
        }
        if let Some(end) = fields.end_time {
            job.end_time = Some(end);
        }
        if let Some(cleaners) = fields.cleaner_ids {
            job.cleaner_ids = cleaners;
        }
        Ok(job.clone())
    }

    async fn get_client(&self, id: &str) -> Result<Option<Client>> {
        Ok(self.inner.lock().unwrap().clients.get(id).cloned())
    }

    async fn get_cleaner(&self, id: &str) -> Result<Option<Cleaner>> {
        Ok(self.inner.lock().unwrap().cleaners.get(id).cloned())
    }
}

impl InMemoryRecordStore {
    /// Convenience for seeding a plain scheduled job in tests.
    pub fn seed_job(
        &self,
        id: &str,
        client_id: &str,
        date: chrono::NaiveDate,
        status: JobStatus,
    ) -> Job {
        let job = Job {
            id: id.to_string(),
            client_id: client_id.to_string(),
            cleaner_ids: vec![],
            date,
            start_time: Some("9:00 AM".to_string()),
            end_time: Some("12:00 PM".to_string()),
            duration_hours: Some(3.0),
            status,
            amount_charged: None,
            client_hourly_rate: None,
            profit: None,
            is_recurring: true,
            recurrence_frequency: None,
            bedrooms: None,
            bathrooms: None,
            address: None,
        };
        self.insert_job(job.clone());
        job
    }
}
