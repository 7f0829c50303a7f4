use gateway_core::{
    LoginRequest, REGISTER_PATH, RegisterRequest, RegisterResponse, TOKEN_PATH, TokenResponse,
    USAGE_SUMMARY_PATH, UsageSummary,
};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{ClientError, Result};

/// Async client for the gateway backend.
///
/// No request timeout is configured; callers wait on the transport's own
/// error behaviour.
#[derive(Clone, Debug)]
pub struct GatewayClient {
    base_url: String,
    http: reqwest::Client,
}

impl GatewayClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .build()
            .map_err(ClientError::transport)?;
        Self::with_http_client(base_url, http)
    }

    pub fn with_http_client(base_url: impl Into<String>, http: reqwest::Client) -> Result<Self> {
        let base_url = normalize_base_url(&base_url.into())?;
        Ok(Self { base_url, http })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// `GET /usage/summary` with the token as bearer credential.
    ///
    /// A JSON `null` body yields `Ok(None)`.
    pub async fn usage_summary(&self, token: &str) -> Result<Option<UsageSummary>> {
        let url = self.url(USAGE_SUMMARY_PATH);
        tracing::debug!(%url, "fetching usage summary");
        let response = self
            .http
            .get(&url)
            .bearer_auth(token)
            .send()
            .await
            .map_err(ClientError::transport)?;
        read_json(response).await
    }

    /// Exchanges credentials for a bearer token via the form-encoded `POST /token`.
    pub async fn login(&self, username: &str, password: &str) -> Result<TokenResponse> {
        let url = self.url(TOKEN_PATH);
        tracing::debug!(%url, username, "requesting access token");
        let form = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };
        let response = self
            .http
            .post(&url)
            .form(&form)
            .send()
            .await
            .map_err(ClientError::transport)?;
        read_json(response).await
    }

    pub async fn register(&self, request: &RegisterRequest) -> Result<RegisterResponse> {
        let url = self.url(REGISTER_PATH);
        tracing::debug!(%url, username = %request.username, "registering user");
        let response = self
            .http
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(ClientError::transport)?;
        read_json(response).await
    }
}

fn normalize_base_url(raw: &str) -> Result<String> {
    let trimmed = raw.trim().trim_end_matches('/');
    let has_host = trimmed
        .strip_prefix("http://")
        .or_else(|| trimmed.strip_prefix("https://"))
        .is_some_and(|rest| !rest.is_empty());
    if !has_host {
        return Err(ClientError::InvalidBaseUrl(raw.to_string()));
    }
    Ok(trimmed.to_string())
}

async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
    let status = response.status();
    let body = response.bytes().await.map_err(ClientError::transport)?;
    if !status.is_success() {
        let detail = parse_detail(&body);
        tracing::debug!(status = status.as_u16(), %detail, "backend returned error status");
        return Err(ClientError::Status {
            status: status.as_u16(),
            detail,
        });
    }
    Ok(serde_json::from_slice(&body)?)
}

// Error bodies that are not JSON are kept verbatim as a string detail.
fn parse_detail(body: &[u8]) -> Value {
    if body.is_empty() {
        return Value::Null;
    }
    serde_json::from_slice(body)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(body).into_owned()))
}
