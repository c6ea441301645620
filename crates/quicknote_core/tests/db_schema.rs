use quicknote_core::db::{connect, initialize, open_db, open_db_in_memory, DbError};
use quicknote_core::{NoteRepository, RepoError, SqliteNoteRepository};
use rusqlite::Connection;

#[test]
fn open_db_in_memory_creates_notes_table() {
    let conn = open_db_in_memory().unwrap();

    assert_table_exists(&conn, "notes");
}

#[test]
fn initialize_twice_keeps_existing_rows() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("notes.db");

    initialize(&path).unwrap();
    let created = {
        let conn = connect(&path).unwrap();
        let repo = SqliteNoteRepository::try_new(&conn).unwrap();
        repo.create_note("kept", "survives re-init").unwrap()
    };

    initialize(&path).unwrap();
    initialize(&path).unwrap();

    let conn = connect(&path).unwrap();
    let repo = SqliteNoteRepository::try_new(&conn).unwrap();
    assert_eq!(repo.get_note(&created.id).unwrap(), Some(created));
    assert_eq!(repo.count_notes().unwrap(), 1);
}

#[test]
fn initialize_keeps_table_created_by_another_process() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("existing.db");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch(
        "CREATE TABLE notes (id TEXT PRIMARY KEY, title TEXT NOT NULL, content TEXT NOT NULL);
         INSERT INTO notes (id, title, content) VALUES ('0badcafe', 'old', 'row');",
    )
    .unwrap();
    drop(conn);

    initialize(&path).unwrap();

    let conn = connect(&path).unwrap();
    let repo = SqliteNoteRepository::try_new(&conn).unwrap();
    let note = repo.get_note("0badcafe").unwrap().unwrap();
    assert_eq!(note.title, "old");
    assert_eq!(repo.count_notes().unwrap(), 1);
}

#[test]
fn open_db_in_missing_directory_reports_open_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("no-such-dir").join("notes.db");

    let err = open_db(&path).unwrap_err();
    match err {
        DbError::Open { target, .. } => assert!(target.ends_with("notes.db")),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn repository_rejects_uninitialized_database() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("empty.db");

    let conn = connect(&path).unwrap();
    let err = SqliteNoteRepository::try_new(&conn).err().unwrap();
    assert!(matches!(err, RepoError::MissingRequiredTable("notes")));
}

fn assert_table_exists(conn: &Connection, table_name: &str) {
    let exists: i64 = conn
        .query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM sqlite_master
                WHERE type = 'table' AND name = ?1
            );",
            [table_name],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(exists, 1, "table {table_name} does not exist");
}
