use gateway_client::{ClientError, GatewayClient};
use gateway_core::{RegisterRequest, describe_detail};

use crate::error::{AppError, Result};
use crate::session::{SessionEvent, SessionEvents, SharedStore};

pub struct LoginView {
    client: GatewayClient,
    store: SharedStore,
    events: SessionEvents,
    error: Option<String>,
    notice: Option<String>,
}

impl LoginView {
    pub fn new(client: GatewayClient, store: SharedStore, events: SessionEvents) -> Self {
        Self {
            client,
            store,
            events,
            error: None,
            notice: None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Exchanges the credentials for a token. On success the token is stored
    /// and `LoggedIn` is sent; on failure the error is kept for display.
    pub async fn submit(&mut self, username: &str, password: &str) -> bool {
        self.notice = None;
        if username.trim().is_empty() || password.is_empty() {
            self.error = Some("Username and password are required.".to_string());
            return false;
        }

        let token = match self.client.login(username.trim(), password).await {
            Ok(token) => token,
            Err(err) => {
                tracing::warn!(error = %err, "login failed");
                self.error = Some(format!("Login failed: {}", failure_text(&err)));
                return false;
            }
        };

        if let Err(err) = self.store.set(&token.access_token) {
            tracing::error!(error = %err, "failed to persist access token");
            self.error = Some(format!("Login failed: {err}"));
            return false;
        }

        tracing::info!(username = username.trim(), "logged in");
        self.error = None;
        if self.events.send(SessionEvent::LoggedIn).is_err() {
            tracing::debug!("session container is gone; login not delivered");
        }
        true
    }

    /// Creates an account. Does not log in.
    pub async fn register(&mut self, username: &str, email: &str, password: &str) -> Result<String> {
        if username.trim().is_empty() || email.trim().is_empty() || password.is_empty() {
            return Err(AppError::InvalidInput(
                "username, email and password are required".to_string(),
            ));
        }
        let request = RegisterRequest {
            username: username.trim().to_string(),
            email: email.trim().to_string(),
            password: password.to_string(),
        };
        match self.client.register(&request).await {
            Ok(response) => {
                tracing::info!(username = %request.username, "registered");
                self.error = None;
                self.notice = Some(response.msg.clone());
                Ok(response.msg)
            }
            Err(err) => {
                self.error = Some(format!("Registration failed: {}", failure_text(&err)));
                Err(err.into())
            }
        }
    }

    pub fn render(&self) -> String {
        let mut out = String::from("Log in to view usage");
        if let Some(notice) = &self.notice {
            out.push('\n');
            out.push_str(notice);
        }
        if let Some(error) = &self.error {
            out.push('\n');
            out.push_str(error);
        }
        out
    }
}

fn failure_text(err: &ClientError) -> String {
    match err {
        ClientError::Status { status, detail } => {
            format!("{} ({})", describe_detail(detail), status)
        }
        other => other.to_string(),
    }
}
