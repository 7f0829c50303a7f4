mod db;
mod memory;

use std::sync::Arc;

use tokio::sync::mpsc::UnboundedSender;

use crate::error::Result;

pub use db::DbSessionStore;
pub use memory::MemorySessionStore;

/// Single-slot credential storage (`accessToken`).
pub trait SessionStore: Send + Sync {
    fn get(&self) -> Result<Option<String>>;
    fn set(&self, token: &str) -> Result<()>;
    fn clear(&self) -> Result<()>;
}

pub type SharedStore = Arc<dyn SessionStore>;

/// Notifications a child view sends up to the session container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    LoggedIn,
    LoggedOut,
}

pub type SessionEvents = UnboundedSender<SessionEvent>;

/// Clears the stored credential and tells the container the session ended.
///
/// A storage failure is logged but does not stop the notification.
pub fn end_session(store: &dyn SessionStore, events: &SessionEvents) {
    if let Err(err) = store.clear() {
        tracing::warn!(error = %err, "failed to clear stored access token");
    }
    if events.send(SessionEvent::LoggedOut).is_err() {
        tracing::debug!("session container is gone; logout not delivered");
    }
}
