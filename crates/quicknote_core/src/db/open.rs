//! Connection bootstrap utilities for SQLite.
//!
//! # Responsibility
//! - Open file or in-memory SQLite connections.
//! - Configure the busy timeout shared by every handle.
//! - Run the `notes` table step for bootstrap opens.
//!
//! # Invariants
//! - Connections returned by [`open_db`] / [`open_db_in_memory`] have the table.
//! - Connections returned by [`connect`] are configured but never touch the schema.

use super::schema::ensure_schema;
use super::{DbError, DbResult};
use log::{debug, error, info};
use rusqlite::Connection;
use std::path::Path;
use std::time::{Duration, Instant};

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Opens a SQLite database file and applies the schema step.
///
/// # Side effects
/// - Creates the database file when absent.
/// - Emits `db_open` logging events with duration and status.
pub fn open_db(path: impl AsRef<Path>) -> DbResult<Connection> {
    let path = path.as_ref();
    open_with("file", path.display().to_string(), true, || {
        Connection::open(path)
    })
}

/// Opens an in-memory SQLite database and applies the schema step.
pub fn open_db_in_memory() -> DbResult<Connection> {
    open_with("memory", ":memory:".to_string(), true, Connection::open_in_memory)
}

/// Runs the idempotent schema initialization against `path`.
///
/// Safe to call on every process start; existing rows are left untouched.
pub fn initialize(path: impl AsRef<Path>) -> DbResult<()> {
    let path = path.as_ref();
    let conn = open_db(path)?;
    drop(conn);
    info!(
        "event=db_initialize module=db status=ok path={}",
        path.display()
    );
    Ok(())
}

/// Opens a per-call handle to an already initialized database.
///
/// The handle is released when the returned connection is dropped.
pub fn connect(path: impl AsRef<Path>) -> DbResult<Connection> {
    let path = path.as_ref();
    open_with("handle", path.display().to_string(), false, || {
        Connection::open(path)
    })
}

fn open_with(
    mode: &'static str,
    target: String,
    create_schema: bool,
    open: impl FnOnce() -> rusqlite::Result<Connection>,
) -> DbResult<Connection> {
    let started_at = Instant::now();
    debug!("event=db_open module=db status=start mode={mode}");

    let mut conn = match open() {
        Ok(conn) => conn,
        Err(err) => {
            error!(
                "event=db_open module=db status=error mode={mode} duration_ms={} error_code=db_open_failed error={}",
                started_at.elapsed().as_millis(),
                err
            );
            return Err(DbError::Open {
                target,
                source: err,
            });
        }
    };

    match bootstrap_connection(&mut conn, create_schema) {
        Ok(()) => {
            debug!(
                "event=db_open module=db status=ok mode={mode} duration_ms={}",
                started_at.elapsed().as_millis()
            );
            Ok(conn)
        }
        Err(err) => {
            error!(
                "event=db_open module=db status=error mode={mode} duration_ms={} error_code=db_bootstrap_failed error={}",
                started_at.elapsed().as_millis(),
                err
            );
            Err(err)
        }
    }
}

fn bootstrap_connection(conn: &mut Connection, create_schema: bool) -> DbResult<()> {
    conn.busy_timeout(BUSY_TIMEOUT)?;
    if create_schema {
        ensure_schema(conn)?;
    }
    Ok(())
}
