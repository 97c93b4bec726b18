pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use crate::adapters::{http::HttpRecordStore, memory::InMemoryRecordStore};
pub use crate::config::{Cli, Command, EngineRequest, StoreSettings};
pub use crate::core::engine::SchedulingEngine;
pub use crate::domain::model::{
    Cleaner, Client, Frequency, GenerateReport, GenerateRequest, Job, JobPatch, JobStatus, NewJob,
    PricingType, RescheduleReport, RescheduleRequest, RescheduleScope, SyncReport, SyncRequest,
};
pub use crate::domain::ports::{RecordStore, StoreConfig};
pub use crate::utils::error::{EngineError, Result};
