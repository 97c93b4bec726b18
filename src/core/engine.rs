use crate::core::expand::plan_generate;
use crate::core::reschedule::plan_reschedule;
use crate::core::sync_mode::plan_sync;
use crate::domain::model::{
    Cleaner, Client, Frequency, GenerateReport, GenerateRequest, JobPatch, RescheduleReport,
    RescheduleRequest, RescheduleScope, SyncReport, SyncRequest,
};
use crate::domain::ports::RecordStore;
use crate::utils::error::{EngineError, Result};
use chrono::NaiveDate;
use std::collections::HashSet;

/// Orchestrates the three scheduling operations against an injected record
/// store. Each operation reads its whole snapshot first, computes a plan
/// with the pure planners, then applies writes one by one. A failing write
/// is logged and counted, never aborts the rest of the plan, and nothing
/// already applied is rolled back.
pub struct SchedulingEngine<S: RecordStore> {
    store: S,
    today_override: Option<NaiveDate>,
}

impl<S: RecordStore> SchedulingEngine<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            today_override: None,
        }
    }

    /// Pins "today" for deterministic runs; tests and replays use this.
    pub fn with_today(store: S, today: NaiveDate) -> Self {
        Self {
            store,
            today_override: Some(today),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn today(&self) -> NaiveDate {
        self.today_override
            .unwrap_or_else(|| chrono::Local::now().date_naive())
    }

    async fn require_client(&self, id: &str) -> Result<Option<Client>> {
        self.store.get_client(id).await
    }

    async fn lookup_cleaner(&self, id: Option<&str>) -> Result<Option<Cleaner>> {
        match id {
            Some(id) => {
                let found = self.store.get_cleaner(id).await?;
                if found.is_none() {
                    tracing::warn!(cleaner = %id, "preferred cleaner not found, jobs get no payout figures");
                }
                Ok(found)
            }
            None => Ok(None),
        }
    }

    pub async fn generate(&self, req: &GenerateRequest) -> Result<GenerateReport> {
        let today = self.today();
        tracing::info!(client = %req.client_id, "generate: reading snapshot");

        let Some(client) = self.require_client(&req.client_id).await? else {
            return Ok(GenerateReport {
                success: false,
                created_count: 0,
                skipped_count: 0,
                message: not_found_message("client", &req.client_id),
            });
        };

        let jobs = self.store.list_jobs(Some(&req.client_id)).await?;
        let existing_dates: HashSet<NaiveDate> = jobs.iter().map(|j| j.date).collect();

        let cleaner_id = req
            .preferred_cleaner
            .clone()
            .or_else(|| client.preferred_cleaner_ids.first().cloned());
        let cleaner = self.lookup_cleaner(cleaner_id.as_deref()).await?;

        let plan = match plan_generate(&client, cleaner.as_ref(), req, &existing_dates, today) {
            Ok(plan) => plan,
            Err(EngineError::MissingConfigError { field }) => {
                return Ok(GenerateReport {
                    success: false,
                    created_count: 0,
                    skipped_count: 0,
                    message: format!("Cannot generate: missing {}", field),
                });
            }
            Err(e) => return Err(e),
        };

        let planned = plan.creates.len();
        let mut created = 0usize;
        let mut failed = 0usize;
        for fields in plan.creates {
            let date = fields.date;
            match self.store.create_job(fields).await {
                Ok(job) => {
                    tracing::debug!(job = %job.id, date = %date, "created recurring job");
                    created += 1;
                }
                Err(e) => {
                    tracing::warn!(date = %date, error = %e, "job create failed, continuing");
                    failed += 1;
                }
            }
        }

        tracing::info!(
            created,
            skipped = plan.skipped,
            failed,
            planned,
            "generate finished"
        );
        Ok(GenerateReport {
            success: true,
            created_count: created,
            skipped_count: plan.skipped,
            message: batch_message("Created", created, plan.skipped, failed),
        })
    }

    pub async fn sync(&self, req: &SyncRequest) -> Result<SyncReport> {
        let today = self.today();
        tracing::info!(client = %req.client_id, "sync: reading snapshot");

        let Some(client) = self.require_client(&req.client_id).await? else {
            return Ok(SyncReport {
                success: false,
                updated_count: 0,
                message: not_found_message("client", &req.client_id),
            });
        };

        let jobs = self.store.list_jobs(Some(&req.client_id)).await?;
        let frequency = req
            .frequency
            .as_deref()
            .map(Frequency::parse)
            .unwrap_or(client.recurrence_frequency);

        let patches = plan_sync(&jobs, req, frequency, today);
        let (updated, failed) = self.apply_patches(patches).await;

        tracing::info!(updated, failed, "sync finished");
        Ok(SyncReport {
            success: true,
            updated_count: updated,
            message: batch_message("Updated", updated, 0, failed),
        })
    }

    pub async fn reschedule(&self, req: &RescheduleRequest) -> Result<RescheduleReport> {
        tracing::info!(job = %req.job_id, scope = ?req.scope, "reschedule: reading snapshot");

        // Single needs no snapshot, but the plan/apply split stays uniform.
        let jobs = match req.scope {
            RescheduleScope::Single => Vec::new(),
            RescheduleScope::AllFuture => self.store.list_jobs(Some(&req.client_id)).await?,
        };

        let plan = plan_reschedule(&jobs, req);
        let (updated, failed) = self.apply_patches(plan.patches).await;

        tracing::info!(updated, failed, day_diff = plan.day_diff, "reschedule finished");
        let message = if plan.day_diff == 0 {
            "Dates are identical, nothing to move".to_string()
        } else {
            let mut m = format!(
                "Moved {} job(s) by {} day(s)",
                updated,
                plan.day_diff
            );
            if failed > 0 {
                m.push_str(&format!(", {} update(s) failed", failed));
            }
            m
        };
        Ok(RescheduleReport {
            success: true,
            message,
            updated_count: updated,
            day_diff: match req.scope {
                RescheduleScope::AllFuture => Some(plan.day_diff),
                RescheduleScope::Single => None,
            },
        })
    }

    async fn apply_patches(&self, patches: Vec<(String, JobPatch)>) -> (usize, usize) {
        let mut updated = 0usize;
        let mut failed = 0usize;
        for (id, patch) in patches {
            match self.store.update_job(&id, patch).await {
                Ok(_) => updated += 1,
                Err(e) => {
                    tracing::warn!(job = %id, error = %e, "job update failed, continuing");
                    failed += 1;
                }
            }
        }
        (updated, failed)
    }
}

fn not_found_message(entity: &str, id: &str) -> String {
    EngineError::NotFound {
        entity: entity.to_string(),
        id: id.to_string(),
    }
    .user_friendly_message()
}

fn batch_message(verb: &str, done: usize, skipped: usize, failed: usize) -> String {
    let mut message = format!("{} {} job(s)", verb, done);
    if skipped > 0 {
        message.push_str(&format!(", skipped {} already scheduled", skipped));
    }
    if failed > 0 {
        message.push_str(&format!(", {} write(s) failed", failed));
    }
    message
}
