use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use gateway_client::{ClientError, GatewayClient};
use gateway_core::UsageSummary;
use thiserror::Error;

use crate::render;
use crate::session::{SessionEvents, SharedStore, end_session};

#[derive(Debug, Clone, PartialEq)]
pub enum DashboardState {
    Loading,
    Failed(String),
    Empty,
    Ready(UsageSummary),
}

impl DashboardState {
    pub fn is_loading(&self) -> bool {
        matches!(self, DashboardState::Loading)
    }
}

#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("No access token found. Please log in.")]
    MissingToken,
    #[error("Failed to fetch usage data: {0}")]
    Http(ClientError),
    #[error("An error occurred: {0}")]
    Unexpected(String),
}

impl From<ClientError> for DashboardError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::Status { .. } => DashboardError::Http(err),
            other => DashboardError::Unexpected(other.to_string()),
        }
    }
}

/// Lets an owner tear the view down while a fetch is still in flight.
#[derive(Clone, Debug)]
pub struct MountHandle {
    mounted: Arc<AtomicBool>,
}

impl MountHandle {
    pub fn teardown(&self) {
        self.mounted.store(false, Ordering::SeqCst);
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted.load(Ordering::SeqCst)
    }
}

pub struct DashboardView {
    client: GatewayClient,
    store: SharedStore,
    events: SessionEvents,
    state: DashboardState,
    mounted: Arc<AtomicBool>,
}

impl DashboardView {
    pub fn new(client: GatewayClient, store: SharedStore, events: SessionEvents) -> Self {
        Self {
            client,
            store,
            events,
            state: DashboardState::Loading,
            mounted: Arc::new(AtomicBool::new(true)),
        }
    }

    pub fn state(&self) -> &DashboardState {
        &self.state
    }

    pub fn handle(&self) -> MountHandle {
        MountHandle {
            mounted: self.mounted.clone(),
        }
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted.load(Ordering::SeqCst)
    }

    pub fn teardown(&self) {
        self.handle().teardown();
    }

    /// Runs one fetch cycle and applies its result.
    pub async fn mount(&mut self) -> &DashboardState {
        self.state = DashboardState::Loading;
        let next = self.fetch_cycle().await;
        self.apply(next);
        &self.state
    }

    /// Performs the fetch without touching view state.
    ///
    /// Authorization failures end the session as part of this cycle.
    pub async fn fetch_cycle(&self) -> DashboardState {
        match self.load().await {
            Ok(Some(summary)) => {
                tracing::info!(
                    total_requests = summary.total_requests,
                    models = summary.model_usage.len(),
                    "usage summary loaded"
                );
                DashboardState::Ready(summary)
            }
            Ok(None) => DashboardState::Empty,
            Err(err) => {
                tracing::warn!(error = %err, "usage summary unavailable");
                DashboardState::Failed(err.to_string())
            }
        }
    }

    async fn load(&self) -> Result<Option<UsageSummary>, DashboardError> {
        let token = self
            .store
            .get()
            .map_err(|err| DashboardError::Unexpected(err.to_string()))?
            .ok_or(DashboardError::MissingToken)?;

        match self.client.usage_summary(&token).await {
            Ok(summary) => Ok(summary),
            Err(err) => {
                if err.forces_logout() {
                    // A torn-down view may hold a token that a newer login already replaced.
                    if self.is_mounted() {
                        tracing::info!(status = ?err.status(), "credential rejected; logging out");
                        self.logout();
                    } else {
                        tracing::debug!(status = ?err.status(), "credential rejected after teardown");
                    }
                }
                Err(err.into())
            }
        }
    }

    /// Replaces the state unless the view was torn down. Returns whether it applied.
    pub fn apply(&mut self, state: DashboardState) -> bool {
        if !self.is_mounted() {
            tracing::debug!("dashboard torn down; discarding fetch result");
            return false;
        }
        self.state = state;
        true
    }

    pub fn logout_available(&self) -> bool {
        !self.state.is_loading()
    }

    pub fn logout(&self) {
        end_session(self.store.as_ref(), &self.events);
    }

    pub fn render(&self) -> String {
        render::render_dashboard(&self.state)
    }
}
