use crate::core::error::ShelfError;
use rusqlite::Connection;
use std::fs;
use std::path::Path;

pub fn db_connect(db_path: &Path) -> Result<Connection, ShelfError> {
    if let Some(parent) = db_path.parent() {
        fs::create_dir_all(parent).map_err(ShelfError::Io)?;
    }
    let conn = Connection::open(db_path)?;
    conn.busy_timeout(std::time::Duration::from_secs(5))
        .map_err(ShelfError::Sqlite)?;
    conn.query_row("PRAGMA journal_mode=WAL;", [], |_| Ok(()))
        .map_err(ShelfError::Sqlite)?;
    Ok(conn)
}

pub fn memory_connect() -> Result<Connection, ShelfError> {
    Ok(Connection::open_in_memory()?)
}
