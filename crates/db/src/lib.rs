use std::path::Path;
use std::time::Duration;

use rusqlite::Connection;

mod error;
mod helpers;
mod memory;
mod migrations;
mod sessions;
mod settings;
mod store;
mod types;

pub use error::{DbError, Result};
pub use memory::MemoryStore;
pub use migrations::MIGRATIONS;
pub use store::{SessionStore, SqliteStore};
pub use types::{SessionFilter, SessionOrder};

pub struct Db {
    conn: Connection,
}

impl Db {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let conn = Connection::open(path)?;
        conn.pragma_update(None, "journal_mode", "WAL")?;
        conn.pragma_update(None, "synchronous", "NORMAL")?;
        conn.pragma_update(None, "temp_store", "MEMORY")?;
        conn.busy_timeout(Duration::from_secs(5))?;
        Ok(Self { conn })
    }
}
