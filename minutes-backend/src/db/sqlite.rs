//! SQLite connection pool and schema setup

use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use std::path::Path;
use std::time::Duration;

pub type DbConn = PooledConnection<SqliteConnectionManager>;

pub type DbResult<T> = Result<T, DbError>;

#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("connection pool error: {0}")]
    Pool(#[from] r2d2::Error),
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("failed to prepare database directory: {0}")]
    Io(#[from] std::io::Error),
}

const MAX_POOL_SIZE: u32 = 8;
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Handle to the meetings database, shared across actix workers.
pub struct Database {
    pool: Pool<SqliteConnectionManager>,
}

impl Database {
    /// Open (or create) the database file and run migrations
    pub fn new(database_url: &str) -> DbResult<Self> {
        if let Some(parent) = Path::new(database_url).parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let manager = SqliteConnectionManager::file(database_url).with_init(|conn| {
            conn.busy_timeout(BUSY_TIMEOUT)?;
            conn.execute_batch("PRAGMA journal_mode = WAL;")
        });
        let pool = Pool::builder().max_size(MAX_POOL_SIZE).build(manager)?;

        let db = Self { pool };
        db.init()?;
        log::info!("[DB] Opened database at {}", database_url);
        Ok(db)
    }

    pub fn conn(&self) -> DbResult<DbConn> {
        Ok(self.pool.get()?)
    }

    fn init(&self) -> DbResult<()> {
        let conn = self.conn()?;

        // AUTOINCREMENT keeps ids of deleted meetings from being handed out again
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS meeting_records (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                title TEXT NOT NULL,
                content TEXT NOT NULL,
                summary TEXT,
                action_items TEXT,
                created_at TEXT NOT NULL,
                updated_at TEXT
            );
            CREATE INDEX IF NOT EXISTS idx_meeting_records_title ON meeting_records(title);
            CREATE INDEX IF NOT EXISTS idx_meeting_records_created_at ON meeting_records(created_at);",
        )?;

        Ok(())
    }
}
