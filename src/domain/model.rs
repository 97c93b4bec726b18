use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Recurrence period. Monthly is a fixed 4-week approximation, not a
/// calendar month; see `timeutil::advance_by_frequency`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Frequency {
    #[default]
    Weekly,
    BiWeekly,
    Monthly,
}

impl From<String> for Frequency {
    fn from(s: String) -> Self {
        Frequency::parse(&s)
    }
}

impl From<Frequency> for String {
    fn from(f: Frequency) -> Self {
        match f {
            Frequency::Weekly => "weekly".to_string(),
            Frequency::BiWeekly => "biweekly".to_string(),
            Frequency::Monthly => "monthly".to_string(),
        }
    }
}

impl Frequency {
    /// Unknown strings default to Weekly rather than failing; the record
    /// store is free-form on this field.
    pub fn parse(s: &str) -> Frequency {
        match s.trim().to_lowercase().as_str() {
            "biweekly" | "bi-weekly" | "bi_weekly" => Frequency::BiWeekly,
            "monthly" => Frequency::Monthly,
            _ => Frequency::Weekly,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PricingType {
    #[default]
    #[serde(rename = "perCleaning", alias = "per_cleaning", alias = "flat")]
    PerCleaning,
    #[serde(rename = "hourly")]
    Hourly,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JobStatus {
    Pending,
    Scheduled,
    InProgress,
    Completed,
    Cancelled,
}

impl JobStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, JobStatus::Completed | JobStatus::Cancelled)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub is_recurring: bool,
    /// Weekday names in configuration order; expansion iterates this order.
    #[serde(default)]
    pub recurring_days: Vec<String>,
    #[serde(default)]
    pub recurrence_frequency: Frequency,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recurring_start_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recurring_end_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_cleaning_date: Option<NaiveDate>,
    /// Ordered; the first entry is the primary cleaner.
    #[serde(default)]
    pub preferred_cleaner_ids: Vec<String>,
    #[serde(default)]
    pub pricing_type: PricingType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub charge_per_cleaning: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hourly_rate: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bedrooms: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bathrooms: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cleaner {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub hourly_rate: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: String,
    pub client_id: String,
    #[serde(default)]
    pub cleaner_ids: Vec<String>,
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_hours: Option<f64>,
    pub status: JobStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount_charged: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_hourly_rate: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profit: Option<f64>,
    #[serde(default)]
    pub is_recurring: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recurrence_frequency: Option<Frequency>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bedrooms: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bathrooms: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

impl Job {
    /// Completed/Cancelled jobs are never touched by sync or reschedule.
    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    /// Same-day counts as future.
    pub fn is_future(&self, today: NaiveDate) -> bool {
        self.date >= today
    }
}

/// Fields for a job create. Optional fields are omitted from the wire
/// payload entirely when unset.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewJob {
    pub client_id: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub cleaner_ids: Vec<String>,
    pub date: NaiveDate,
    pub start_time: String,
    pub end_time: String,
    pub duration_hours: f64,
    pub status: JobStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount_charged: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_hourly_rate: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profit: Option<f64>,
    pub is_recurring: bool,
    pub recurrence_frequency: Frequency,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bedrooms: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bathrooms: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

/// Sparse job update. Only set fields reach the record store, so a patch
/// that stays empty produces no storage call at all.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cleaner_ids: Option<Vec<String>>,
}

impl JobPatch {
    pub fn is_empty(&self) -> bool {
        self.date.is_none()
            && self.start_time.is_none()
            && self.end_time.is_none()
            && self.cleaner_ids.is_none()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    pub client_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recurring_days: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recurring_start_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recurring_end_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferred_cleaner: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frequency: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weeks_to_generate: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncRequest {
    pub client_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recurring_days: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recurring_start_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recurring_end_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferred_cleaner: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frequency: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RescheduleScope {
    #[serde(rename = "single")]
    Single,
    #[serde(rename = "all_future")]
    AllFuture,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RescheduleRequest {
    pub job_id: String,
    pub client_id: String,
    pub current_date: NaiveDate,
    pub new_date: NaiveDate,
    pub scope: RescheduleScope,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateReport {
    pub success: bool,
    pub created_count: usize,
    pub skipped_count: usize,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncReport {
    pub success: bool,
    pub updated_count: usize,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RescheduleReport {
    pub success: bool,
    pub message: String,
    pub updated_count: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub day_diff: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frequency_parse_defaults_to_weekly() {
        assert_eq!(Frequency::parse("biweekly"), Frequency::BiWeekly);
        assert_eq!(Frequency::parse("Bi-Weekly"), Frequency::BiWeekly);
        assert_eq!(Frequency::parse("monthly"), Frequency::Monthly);
        assert_eq!(Frequency::parse("weekly"), Frequency::Weekly);
        assert_eq!(Frequency::parse("fortnightly-ish"), Frequency::Weekly);
        assert_eq!(Frequency::parse(""), Frequency::Weekly);
    }

    #[test]
    fn test_terminal_status() {
        assert!(JobStatus::Completed.is_terminal());
        assert!(JobStatus::Cancelled.is_terminal());
        assert!(!JobStatus::Scheduled.is_terminal());
        assert!(!JobStatus::Pending.is_terminal());
        assert!(!JobStatus::InProgress.is_terminal());
    }

    #[test]
    fn test_job_patch_empty_detection() {
        let patch = JobPatch::default();
        assert!(patch.is_empty());

        let patch = JobPatch {
            start_time: Some("9:00 AM".to_string()),
            ..Default::default()
        };
        assert!(!patch.is_empty());
    }

    #[test]
    fn test_job_wire_format_round_trip() {
        let json = serde_json::json!({
            "id": "job-1",
            "clientId": "cli-1",
            "date": "2025-03-10",
            "status": "Scheduled",
            "startTime": "9:00 AM",
            "isRecurring": true,
            "recurrenceFrequency": "biweekly"
        });
        let job: Job = serde_json::from_value(json).unwrap();
        assert_eq!(job.date, chrono::NaiveDate::from_ymd_opt(2025, 3, 10).unwrap());
        assert_eq!(job.recurrence_frequency, Some(Frequency::BiWeekly));
        assert!(job.end_time.is_none());

        let back = serde_json::to_value(&job).unwrap();
        assert_eq!(back["clientId"], "cli-1");
        assert_eq!(back["date"], "2025-03-10");
        // unset optionals must not appear on the wire
        assert!(back.get("endTime").is_none());
    }
}
