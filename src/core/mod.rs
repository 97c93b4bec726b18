pub mod engine;
pub mod expand;
pub mod pricing;
pub mod reschedule;
pub mod sync_mode;
pub mod timeutil;

pub use crate::domain::model::{
    Cleaner, Client, Frequency, GenerateReport, GenerateRequest, Job, JobPatch, JobStatus, NewJob,
    PricingType, RescheduleReport, RescheduleRequest, RescheduleScope, SyncReport, SyncRequest,
};
pub use crate::domain::ports::{RecordStore, StoreConfig};
pub use crate::utils::error::Result;
