use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Record store request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("Record store rejected request ({status}): {message}")]
    StoreError { status: u16, message: String },

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Missing configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value for {field} ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    #[error("Unrecognized clock time: {value}")]
    InvalidTimeFormat { value: String },

    #[error("Processing error: {message}")]
    ProcessingError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Configuration,
    Data,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl EngineError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            EngineError::ApiError(_) | EngineError::StoreError { .. } => ErrorCategory::Network,
            EngineError::MissingConfigError { .. }
            | EngineError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            EngineError::NotFound { .. }
            | EngineError::InvalidTimeFormat { .. }
            | EngineError::SerializationError(_)
            | EngineError::ProcessingError { .. } => ErrorCategory::Data,
            EngineError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            EngineError::InvalidTimeFormat { .. } => ErrorSeverity::Low,
            EngineError::ApiError(_) | EngineError::StoreError { .. } => ErrorSeverity::Medium,
            EngineError::MissingConfigError { .. }
            | EngineError::InvalidConfigValueError { .. }
            | EngineError::NotFound { .. }
            | EngineError::ProcessingError { .. }
            | EngineError::SerializationError(_) => ErrorSeverity::High,
            EngineError::IoError(_) => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            EngineError::ApiError(_) | EngineError::StoreError { .. } => {
                "Check the record store URL, API key and network connectivity".to_string()
            }
            EngineError::MissingConfigError { field } => {
                format!("Provide a value for '{}' before retrying", field)
            }
            EngineError::InvalidConfigValueError { field, .. } => {
                format!("Correct the value supplied for '{}'", field)
            }
            EngineError::NotFound { entity, .. } => {
                format!("Verify the {} id exists in the record store", entity)
            }
            EngineError::InvalidTimeFormat { .. } => {
                "Use 'H:MM AM/PM' or 24-hour 'HH:MM' time strings".to_string()
            }
            EngineError::SerializationError(_) => {
                "Inspect the record payload for unexpected field shapes".to_string()
            }
            EngineError::ProcessingError { .. } => {
                "Review the client's recurrence configuration".to_string()
            }
            EngineError::IoError(_) => "Check file permissions and disk space".to_string(),
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            EngineError::ApiError(_) | EngineError::StoreError { .. } => {
                format!("Could not reach the record store: {}", self)
            }
            EngineError::NotFound { entity, id } => format!("No {} with id '{}'", entity, id),
            _ => self.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, EngineError>;
