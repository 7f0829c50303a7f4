use gateway_client::GatewayClient;
use tokio::sync::mpsc::{self, UnboundedReceiver};

use crate::dashboard::DashboardView;
use crate::error::Result;
use crate::login::LoginView;
use crate::session::{SessionEvent, SessionEvents, SharedStore};

pub const APP_TITLE: &str = "AI Gateway Dashboard";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Unauthenticated,
    Authenticated,
}

pub enum ActiveView {
    Login(LoginView),
    Dashboard(DashboardView),
}

/// Top-level owner of the authenticated flag. Shows exactly one child view.
pub struct SessionContainer {
    client: GatewayClient,
    store: SharedStore,
    events_tx: SessionEvents,
    events_rx: UnboundedReceiver<SessionEvent>,
    state: SessionState,
    view: ActiveView,
}

impl SessionContainer {
    /// Reads the store once; a present credential means authenticated. Validity
    /// is left to the backend.
    pub fn init(client: GatewayClient, store: SharedStore) -> Result<Self> {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let state = if store.get()?.is_some() {
            SessionState::Authenticated
        } else {
            SessionState::Unauthenticated
        };
        tracing::debug!(?state, "session container initialized");
        let view = build_view(state, &client, &store, &events_tx);
        Ok(Self {
            client,
            store,
            events_tx,
            events_rx,
            state,
            view,
        })
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_authenticated(&self) -> bool {
        self.state == SessionState::Authenticated
    }

    pub fn view(&self) -> &ActiveView {
        &self.view
    }

    pub fn login_view_mut(&mut self) -> Option<&mut LoginView> {
        match &mut self.view {
            ActiveView::Login(view) => Some(view),
            ActiveView::Dashboard(_) => None,
        }
    }

    pub fn dashboard_mut(&mut self) -> Option<&mut DashboardView> {
        match &mut self.view {
            ActiveView::Dashboard(view) => Some(view),
            ActiveView::Login(_) => None,
        }
    }

    pub fn on_login_success(&mut self) {
        if self.is_authenticated() {
            return;
        }
        self.transition(SessionState::Authenticated);
    }

    /// Clears the credential and returns to the login view.
    pub fn on_logout(&mut self) {
        if let Err(err) = self.store.clear() {
            tracing::warn!(error = %err, "failed to clear stored access token");
        }
        if !self.is_authenticated() {
            return;
        }
        self.transition(SessionState::Unauthenticated);
    }

    pub fn handle_event(&mut self, event: SessionEvent) {
        match event {
            SessionEvent::LoggedIn => self.on_login_success(),
            SessionEvent::LoggedOut => self.on_logout(),
        }
    }

    /// Applies every event the child views have sent. Returns how many were handled.
    pub fn pump_events(&mut self) -> usize {
        let mut handled = 0;
        while let Ok(event) = self.events_rx.try_recv() {
            self.handle_event(event);
            handled += 1;
        }
        handled
    }

    /// Mounts the dashboard if it is the active view. Events it emits are left
    /// queued so the caller can render the failure before switching views.
    pub async fn mount_active(&mut self) {
        if let Some(dashboard) = self.dashboard_mut() {
            dashboard.mount().await;
        }
    }

    pub fn render(&self) -> String {
        let body = match &self.view {
            ActiveView::Login(view) => view.render(),
            ActiveView::Dashboard(view) => view.render(),
        };
        format!("{APP_TITLE}\n\n{body}")
    }

    fn transition(&mut self, state: SessionState) {
        if let ActiveView::Dashboard(view) = &self.view {
            view.teardown();
        }
        tracing::info!(from = ?self.state, to = ?state, "session state changed");
        self.state = state;
        self.view = build_view(state, &self.client, &self.store, &self.events_tx);
    }
}

fn build_view(
    state: SessionState,
    client: &GatewayClient,
    store: &SharedStore,
    events: &SessionEvents,
) -> ActiveView {
    match state {
        SessionState::Authenticated => ActiveView::Dashboard(DashboardView::new(
            client.clone(),
            store.clone(),
            events.clone(),
        )),
        SessionState::Unauthenticated => {
            ActiveView::Login(LoginView::new(client.clone(), store.clone(), events.clone()))
        }
    }
}
