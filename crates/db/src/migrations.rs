use rusqlite::Connection;

use crate::Db;
use crate::error::Result;

const MIGRATION_0001: &str = include_str!("../migrations/0001_local_storage.sql");

/// Each entry names the table it creates; a migration whose table exists is skipped.
const MIGRATIONS: &[(&str, &str, &str)] =
    &[("0001_local_storage", "local_storage", MIGRATION_0001)];

impl Db {
    pub fn migrate(&mut self) -> Result<()> {
        let tx = self.conn.transaction()?;
        for (_, table, sql) in MIGRATIONS {
            if table_exists(&tx, table)? {
                continue;
            }
            tx.execute_batch(sql)?;
        }
        tx.commit()?;
        Ok(())
    }

    pub fn has_table(&self, table: &str) -> Result<bool> {
        table_exists(&self.conn, table)
    }
}

fn table_exists(conn: &Connection, table: &str) -> Result<bool> {
    let mut stmt =
        conn.prepare("SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1")?;
    let mut rows = stmt.query([table])?;
    Ok(rows.next()?.is_some())
}
