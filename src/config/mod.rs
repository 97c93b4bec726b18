pub mod file;

use crate::domain::model::{
    GenerateRequest, RescheduleRequest, RescheduleScope, SyncRequest,
};
use crate::domain::ports::StoreConfig;
use crate::utils::error::{EngineError, Result};
use crate::utils::validation::{
    validate_date, validate_non_empty_string, validate_range, validate_required_field,
    validate_url, Validate,
};
use clap::{Parser, Subcommand};
use file::FileConfig;
use std::path::PathBuf;

const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

#[derive(Debug, Clone, Parser)]
#[command(name = "tidysched")]
#[command(about = "Recurring-job scheduling engine for a cleaning-service CRM")]
pub struct Cli {
    /// Record store base URL; overrides the config file
    #[arg(long)]
    pub base_url: Option<String>,

    /// Bearer token for the record store
    #[arg(long)]
    pub api_key: Option<String>,

    /// TOML file with a [store] section
    #[arg(long)]
    pub config: Option<PathBuf>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Expand a client's recurring schedule into future jobs
    Generate {
        #[arg(long)]
        client_id: String,
        /// Weekday names, comma separated; defaults to the client record
        #[arg(long, value_delimiter = ',')]
        days: Vec<String>,
        #[arg(long)]
        start_time: Option<String>,
        #[arg(long)]
        end_time: Option<String>,
        #[arg(long)]
        cleaner: Option<String>,
        #[arg(long)]
        frequency: Option<String>,
        #[arg(long)]
        weeks: Option<u32>,
    },
    /// Re-point existing future jobs at an updated schedule
    Sync {
        #[arg(long)]
        client_id: String,
        #[arg(long, value_delimiter = ',')]
        days: Vec<String>,
        #[arg(long)]
        start_time: Option<String>,
        #[arg(long)]
        end_time: Option<String>,
        #[arg(long)]
        cleaner: Option<String>,
        #[arg(long)]
        frequency: Option<String>,
    },
    /// Move one job, optionally shifting all later jobs by the same delta
    Reschedule {
        #[arg(long)]
        job_id: String,
        #[arg(long)]
        client_id: String,
        /// Current date of the job, YYYY-MM-DD
        #[arg(long)]
        current_date: String,
        /// Target date, YYYY-MM-DD
        #[arg(long)]
        new_date: String,
        /// "single" or "all_future"
        #[arg(long, default_value = "single")]
        scope: String,
    },
}

/// Connection settings after merging the config file with CLI flags; flags
/// win.
#[derive(Debug, Clone)]
pub struct StoreSettings {
    pub base_url: String,
    pub api_key: Option<String>,
    pub timeout_seconds: u64,
}

impl StoreConfig for StoreSettings {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }

    fn timeout_seconds(&self) -> u64 {
        self.timeout_seconds
    }
}

impl Validate for StoreSettings {
    fn validate(&self) -> Result<()> {
        validate_url("base_url", &self.base_url)?;
        validate_range("timeout_seconds", self.timeout_seconds, 1, 600)?;
        if let Some(key) = &self.api_key {
            validate_non_empty_string("api_key", key)?;
        }
        Ok(())
    }
}

impl Cli {
    pub fn store_settings(&self) -> Result<StoreSettings> {
        let section = match &self.config {
            Some(path) => FileConfig::from_file(path)?.store,
            None => Default::default(),
        };

        let base_url = self.base_url.clone().or(section.base_url);
        let base_url = validate_required_field("base_url", &base_url)?.clone();

        Ok(StoreSettings {
            base_url,
            api_key: self.api_key.clone().or(section.api_key),
            timeout_seconds: section.timeout_seconds.unwrap_or(DEFAULT_TIMEOUT_SECONDS),
        })
    }
}

fn none_if_empty(days: &[String]) -> Option<Vec<String>> {
    if days.is_empty() {
        None
    } else {
        Some(days.to_vec())
    }
}

fn parse_scope(raw: &str) -> Result<RescheduleScope> {
    match raw {
        "single" => Ok(RescheduleScope::Single),
        "all_future" => Ok(RescheduleScope::AllFuture),
        other => Err(EngineError::InvalidConfigValueError {
            field: "scope".to_string(),
            value: other.to_string(),
            reason: "Expected 'single' or 'all_future'".to_string(),
        }),
    }
}

/// Engine request built from a subcommand.
pub enum EngineRequest {
    Generate(GenerateRequest),
    Sync(SyncRequest),
    Reschedule(RescheduleRequest),
}

impl Command {
    pub fn to_request(&self) -> Result<EngineRequest> {
        match self {
            Command::Generate {
                client_id,
                days,
                start_time,
                end_time,
                cleaner,
                frequency,
                weeks,
            } => Ok(EngineRequest::Generate(GenerateRequest {
                client_id: client_id.clone(),
                recurring_days: none_if_empty(days),
                recurring_start_time: start_time.clone(),
                recurring_end_time: end_time.clone(),
                preferred_cleaner: cleaner.clone(),
                frequency: frequency.clone(),
                weeks_to_generate: *weeks,
            })),
            Command::Sync {
                client_id,
                days,
                start_time,
                end_time,
                cleaner,
                frequency,
            } => Ok(EngineRequest::Sync(SyncRequest {
                client_id: client_id.clone(),
                recurring_days: none_if_empty(days),
                recurring_start_time: start_time.clone(),
                recurring_end_time: end_time.clone(),
                preferred_cleaner: cleaner.clone(),
                frequency: frequency.clone(),
            })),
            Command::Reschedule {
                job_id,
                client_id,
                current_date,
                new_date,
                scope,
            } => Ok(EngineRequest::Reschedule(RescheduleRequest {
                job_id: job_id.clone(),
                client_id: client_id.clone(),
                current_date: validate_date("current_date", current_date)?,
                new_date: validate_date("new_date", new_date)?,
                scope: parse_scope(scope)?,
            })),
        }
    }
}
