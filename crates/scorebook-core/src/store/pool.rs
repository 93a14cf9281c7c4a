use std::path::Path;
use std::time::Duration;

use r2d2::CustomizeConnection;
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::Connection;
use tracing::{debug, warn};

use crate::error::{Error, Result};

/// A checked-out connection; returns to its pool on drop
pub type PooledConnection = r2d2::PooledConnection<SqliteConnectionManager>;

/// Pragmas applied to every connection the pool opens
#[derive(Debug)]
struct ConnectionSetup {
    busy_timeout: Duration,
    wal: bool,
}

impl CustomizeConnection<Connection, rusqlite::Error> for ConnectionSetup {
    fn on_acquire(&self, conn: &mut Connection) -> std::result::Result<(), rusqlite::Error> {
        conn.busy_timeout(self.busy_timeout)?;
        if self.wal {
            let mode: String =
                conn.pragma_update_and_check(None, "journal_mode", "WAL", |row| row.get(0))?;
            debug!("journal_mode = {}", mode);
        }
        Ok(())
    }
}

/// Bounded `r2d2` pool of SQLite connections.
///
/// A connection is checked out for the duration of one statement. Checkout
/// waits up to the pool timeout and is not retried.
#[derive(Clone)]
pub struct ConnectionPool {
    inner: r2d2::Pool<SqliteConnectionManager>,
    timeout: Duration,
}

impl ConnectionPool {
    /// Pool of `size` WAL connections to the database file at `path`
    pub fn open<P: AsRef<Path>>(path: P, size: usize, timeout: Duration) -> Result<Self> {
        let manager = SqliteConnectionManager::file(path);
        let builder = r2d2::Pool::builder()
            .max_size(size.max(1) as u32)
            .connection_timeout(timeout)
            .connection_customizer(Box::new(ConnectionSetup {
                busy_timeout: timeout,
                wal: true,
            }));
        Self::build(builder, manager, timeout)
    }

    /// Single in-memory connection kept open for the pool's lifetime
    pub fn in_memory(timeout: Duration) -> Result<Self> {
        let manager = SqliteConnectionManager::memory();
        let builder = r2d2::Pool::builder()
            .max_size(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connection_timeout(timeout)
            .connection_customizer(Box::new(ConnectionSetup {
                busy_timeout: timeout,
                wal: false,
            }));
        Self::build(builder, manager, timeout)
    }

    fn build(
        builder: r2d2::Builder<SqliteConnectionManager>,
        manager: SqliteConnectionManager,
        timeout: Duration,
    ) -> Result<Self> {
        let inner = builder
            .build(manager)
            .map_err(|e| Error::Store(format!("failed to open connection pool: {}", e)))?;
        Ok(Self { inner, timeout })
    }

    pub fn size(&self) -> usize {
        self.inner.max_size() as usize
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Number of open connections not currently checked out
    pub fn idle_count(&self) -> usize {
        self.inner.state().idle_connections as usize
    }

    pub fn acquire(&self) -> Result<PooledConnection> {
        self.inner.get().map_err(|e| {
            warn!(
                "No store connection became available within {:?}: {}",
                self.timeout, e
            );
            Error::StoreTimeout(self.timeout)
        })
    }
}
