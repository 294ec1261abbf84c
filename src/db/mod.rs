// Database layer — SQLite storage for reports and dashboard reference data.
//
// We use rusqlite with the "bundled" feature so there's no system SQLite
// dependency. The database file lives wherever ECOTRACK_DB_PATH points
// (defaults to ./environmental_tracker.db).

pub mod models;
pub mod queries;
pub mod schema;
pub mod seed;
pub mod sqlite;
pub mod traits;

pub use sqlite::SqliteDatabase;
pub use traits::Database;

use anyhow::{Context, Result};
use rusqlite::{Connection, OpenFlags};
use std::path::Path;
use std::sync::Arc;

/// Open (or create) the database and run migrations.
///
/// This is the bootstrap entry point, called by `ecotrack init`. The server
/// never creates the database on its own.
pub fn initialize(db_path: &str) -> Result<Connection> {
    // Create parent directories if needed
    if let Some(parent) = Path::new(db_path).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory for database: {}", db_path))?;
        }
    }

    let conn = Connection::open(db_path)
        .with_context(|| format!("Failed to open database at {}", db_path))?;

    // WAL lets dashboard reads proceed while a report is being written
    conn.pragma_update(None, "journal_mode", "WAL")?;
    conn.pragma_update(None, "foreign_keys", "ON")?;

    schema::create_tables(&conn)?;

    Ok(conn)
}

/// Open a connection to an existing database file.
///
/// Never creates the file. Foreign keys are enabled per connection since
/// SQLite doesn't persist that setting.
pub fn connect(db_path: &Path) -> Result<Connection> {
    let conn = Connection::open_with_flags(
        db_path,
        OpenFlags::SQLITE_OPEN_READ_WRITE
            | OpenFlags::SQLITE_OPEN_URI
            | OpenFlags::SQLITE_OPEN_NO_MUTEX,
    )
    .with_context(|| format!("Failed to open database at {}", db_path.display()))?;

    conn.pragma_update(None, "foreign_keys", "ON")?;

    Ok(conn)
}

/// Get a `Database` handle for an existing file (fails if it doesn't exist yet).
pub fn open_sqlite(db_path: &str) -> Result<Arc<dyn Database>> {
    if !Path::new(db_path).exists() {
        anyhow::bail!(
            "Database not found at {}. Run `ecotrack init` first.",
            db_path
        );
    }
    Ok(Arc::new(SqliteDatabase::new(db_path)))
}
