use crate::utils::error::{EngineError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Optional TOML file carrying record-store connection settings:
///
/// ```toml
/// [store]
/// base_url = "https://records.example.com/api"
/// api_key = "..."
/// timeout_seconds = 30
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileConfig {
    pub store: StoreSection,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoreSection {
    pub base_url: Option<String>,
    pub api_key: Option<String>,
    pub timeout_seconds: Option<u64>,
}

impl FileConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        toml::from_str(&raw).map_err(|e| EngineError::InvalidConfigValueError {
            field: "config".to_string(),
            value: path.display().to_string(),
            reason: format!("Invalid TOML: {}", e),
        })
    }
}
