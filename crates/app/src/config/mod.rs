use gateway_core::DEFAULT_API_BASE_URL;
use serde::{Deserialize, Serialize};

/// User-editable client settings, persisted as TOML by the CLI.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct AppConfig {
    pub api_base_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_filter: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            log_filter: None,
        }
    }
}
