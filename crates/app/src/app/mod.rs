use std::sync::Arc;

use gateway_client::GatewayClient;

use crate::config::AppConfig;
use crate::container::SessionContainer;
use crate::error::Result;
use crate::login::LoginView;
use crate::session::{DbSessionStore, MemorySessionStore, SharedStore};
use crate::startup::{AppPaths, ensure_app_data_dir};

/// Application state shared by front ends.
#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub client: GatewayClient,
    pub store: SharedStore,
}

impl AppState {
    pub fn new(config: AppConfig, store: SharedStore) -> Result<Self> {
        let client = GatewayClient::new(config.api_base_url.as_str())?;
        Ok(Self {
            config,
            client,
            store,
        })
    }

    /// State backed by the on-disk session store under `paths`.
    pub fn open(config: AppConfig, paths: &AppPaths) -> Result<Self> {
        ensure_app_data_dir(paths)?;
        let store = DbSessionStore::open(&paths.db_path)?;
        Self::new(config, Arc::new(store))
    }

    /// State whose credential lives only as long as the process.
    pub fn ephemeral(config: AppConfig) -> Result<Self> {
        Self::new(config, Arc::new(MemorySessionStore::default()))
    }

    pub fn container(&self) -> Result<SessionContainer> {
        SessionContainer::init(self.client.clone(), self.store.clone())
    }

    /// A login view detached from any container. A stored credential stays in
    /// place until a new login replaces it.
    pub fn login_view(&self) -> LoginView {
        let (events, _) = tokio::sync::mpsc::unbounded_channel();
        LoginView::new(self.client.clone(), self.store.clone(), events)
    }

    pub fn has_credential(&self) -> Result<bool> {
        Ok(self.store.get()?.is_some())
    }

    /// Clears the stored credential. Returns whether one was present.
    pub fn logout(&self) -> Result<bool> {
        let present = self.has_credential()?;
        self.store.clear()?;
        Ok(present)
    }
}
