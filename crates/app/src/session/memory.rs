use std::sync::{Mutex, MutexGuard};

use crate::error::{AppError, Result};
use crate::session::SessionStore;

#[derive(Debug, Default)]
pub struct MemorySessionStore {
    slot: Mutex<Option<String>>,
}

impl MemorySessionStore {
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            slot: Mutex::new(Some(token.into())),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Option<String>>> {
        self.slot
            .lock()
            .map_err(|_| AppError::Message("session store lock poisoned".to_string()))
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self) -> Result<Option<String>> {
        Ok(self.lock()?.clone())
    }

    fn set(&self, token: &str) -> Result<()> {
        *self.lock()? = Some(token.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        *self.lock()? = None;
        Ok(())
    }
}
