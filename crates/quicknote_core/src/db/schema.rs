//! The `notes` table definition.
//!
//! There is exactly one schema step. It is written with `IF NOT EXISTS`, so
//! running it against a database that already holds the table (from this
//! build or any earlier one) leaves existing rows untouched.

use super::{DbError, DbResult};
use rusqlite::Connection;

const NOTES_TABLE_SQL: &str = include_str!("schema.sql");

/// Creates the `notes` table when it is absent.
pub fn ensure_schema(conn: &Connection) -> DbResult<()> {
    conn.execute_batch(NOTES_TABLE_SQL)
        .map_err(DbError::Schema)
}
