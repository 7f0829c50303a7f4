use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use gateway_core::ACCESS_TOKEN_KEY;
use gateway_db::Db;

use crate::error::{AppError, Result};
use crate::session::SessionStore;

/// Session store persisted in the SQLite `local_storage` table.
pub struct DbSessionStore {
    db: Mutex<Db>,
}

impl DbSessionStore {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let mut db = Db::open(path)?;
        db.migrate()?;
        Ok(Self { db: Mutex::new(db) })
    }

    fn db(&self) -> Result<MutexGuard<'_, Db>> {
        self.db
            .lock()
            .map_err(|_| AppError::Message("session db lock poisoned".to_string()))
    }
}

impl SessionStore for DbSessionStore {
    fn get(&self) -> Result<Option<String>> {
        Ok(self.db()?.get_item(ACCESS_TOKEN_KEY)?)
    }

    fn set(&self, token: &str) -> Result<()> {
        self.db()?.set_item(ACCESS_TOKEN_KEY, token)?;
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        self.db()?.remove_item(ACCESS_TOKEN_KEY)?;
        Ok(())
    }
}
