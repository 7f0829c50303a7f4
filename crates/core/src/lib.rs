use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Storage key the bearer token is persisted under.
pub const ACCESS_TOKEN_KEY: &str = "accessToken";

pub const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:8000";

pub const USAGE_SUMMARY_PATH: &str = "/usage/summary";
pub const TOKEN_PATH: &str = "/token";
pub const REGISTER_PATH: &str = "/register";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelUsage {
    pub input_tokens: u64,
    pub output_tokens: u64,
    pub requests: u64,
}

/// Aggregate usage snapshot returned by `GET /usage/summary`.
///
/// The client never merges snapshots; each fetch replaces the previous copy.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UsageSummary {
    pub total_requests: u64,
    pub total_input_tokens: u64,
    pub total_output_tokens: u64,
    pub estimated_total_cost_usd: f64,
    #[serde(default)]
    pub model_usage: BTreeMap<String, ModelUsage>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
}

fn default_token_type() -> String {
    "bearer".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterResponse {
    pub msg: String,
}

/// How a non-success HTTP status should be treated by callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FailureClass {
    pub retryable: bool,
    pub forces_logout: bool,
}

/// Failure policy for backend responses.
///
/// Only 401 and 403 invalidate the session. `retryable` is advisory: nothing
/// in the client retries automatically.
pub fn classify_failure(status: u16) -> FailureClass {
    let forces_logout = matches!(status, 401 | 403);
    let retryable = matches!(status, 408 | 429 | 500..=599);
    FailureClass {
        retryable,
        forces_logout,
    }
}

/// Human-readable text for a backend error body.
///
/// Bodies shaped like `{"detail": "..."}` yield the detail string; anything
/// else is rendered as compact JSON.
pub fn describe_detail(detail: &Value) -> String {
    match detail {
        Value::String(text) => text.clone(),
        Value::Object(map) => match map.get("detail") {
            Some(Value::String(text)) => text.clone(),
            _ => detail.to_string(),
        },
        Value::Null => "no detail".to_string(),
        other => other.to_string(),
    }
}
