//! SQLite storage layer for the record store
//!
//! Uses rusqlite over a single database file. The two-table schema is
//! created on open, idempotently; one statement runs per call and rusqlite
//! autocommits it, so no lock outlives a method body.

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use rusqlite::{params, Connection, OptionalExtension};

use crate::error::ServerResult;
use crate::models::{Collection, Record, RecordInput};

/// Thread-safe database wrapper
#[derive(Clone)]
pub struct Database {
    conn: Arc<Mutex<Connection>>,
    path: PathBuf,
}

impl Database {
    /// Open or create the database at the given path
    pub fn open(path: impl Into<PathBuf>) -> ServerResult<Self> {
        let path = path.into();

        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(&path)?;

        let db = Self {
            conn: Arc::new(Mutex::new(conn)),
            path,
        };

        db.init_schema()?;
        Ok(db)
    }

    /// Open an in-memory database (for testing)
    pub fn open_in_memory() -> ServerResult<Self> {
        let conn = Connection::open_in_memory()?;
        let db = Self {
            conn: Arc::new(Mutex::new(conn)),
            path: PathBuf::from(":memory:"),
        };
        db.init_schema()?;
        Ok(db)
    }

    /// Get the database file path
    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    /// Get database file size in bytes
    pub fn size_bytes(&self) -> Option<u64> {
        std::fs::metadata(&self.path).ok().map(|m| m.len())
    }

    /// Create both collection tables if absent. Safe to run on every start;
    /// existing rows are untouched.
    fn init_schema(&self) -> ServerResult<()> {
        let conn = self.conn.lock().unwrap();

        for collection in Collection::ALL {
            conn.execute_batch(&format!(
                r#"
                CREATE TABLE IF NOT EXISTS {} (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    title TEXT NOT NULL,
                    completed BOOLEAN DEFAULT FALSE,
                    number INTEGER DEFAULT 0
                )
                "#,
                collection.table()
            ))?;
        }

        Ok(())
    }

    // ========================================================================
    // Records
    //
    // Table names come from the fixed Collection enum; all values are bound
    // parameters.
    // ========================================================================

    pub fn create_record(
        &self,
        collection: Collection,
        input: &RecordInput,
    ) -> ServerResult<Record> {
        let conn = self.conn.lock().unwrap();

        conn.execute(
            &format!(
                "INSERT INTO {} (title, completed, number) VALUES (?, ?, ?)",
                collection.table()
            ),
            params![input.title, input.completed, input.number],
        )?;

        Ok(input.clone().into_record(conn.last_insert_rowid()))
    }

    /// All records in the collection, id ascending.
    pub fn list_records(&self, collection: Collection) -> ServerResult<Vec<Record>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(&format!(
            "SELECT id, title, completed, number FROM {} ORDER BY id ASC",
            collection.table()
        ))?;

        let records = stmt
            .query_map([], row_to_record)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(records)
    }

    pub fn get_record(&self, collection: Collection, id: i64) -> ServerResult<Option<Record>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(&format!(
            "SELECT id, title, completed, number FROM {} WHERE id = ?",
            collection.table()
        ))?;

        let record = stmt.query_row([id], row_to_record).optional()?;
        Ok(record)
    }

    /// Full replace of title/completed/number. Returns false when no row
    /// matched the id.
    pub fn update_record(
        &self,
        collection: Collection,
        id: i64,
        input: &RecordInput,
    ) -> ServerResult<bool> {
        let conn = self.conn.lock().unwrap();

        let rows_affected = conn.execute(
            &format!(
                "UPDATE {} SET title = ?, completed = ?, number = ? WHERE id = ?",
                collection.table()
            ),
            params![input.title, input.completed, input.number, id],
        )?;

        Ok(rows_affected > 0)
    }

    /// Returns false when no row matched the id.
    pub fn delete_record(&self, collection: Collection, id: i64) -> ServerResult<bool> {
        let conn = self.conn.lock().unwrap();

        let rows_affected = conn.execute(
            &format!("DELETE FROM {} WHERE id = ?", collection.table()),
            params![id],
        )?;

        Ok(rows_affected > 0)
    }
}

fn row_to_record(row: &rusqlite::Row<'_>) -> rusqlite::Result<Record> {
    Ok(Record {
        id: row.get(0)?,
        title: row.get(1)?,
        completed: row.get(2)?,
        number: row.get(3)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(title: &str, completed: bool, number: i64) -> RecordInput {
        RecordInput {
            title: title.to_string(),
            completed,
            number,
        }
    }

    #[test]
    fn create_then_get_roundtrip() {
        let db = Database::open_in_memory().unwrap();

        let created = db
            .create_record(Collection::Todo, &input("buy milk", false, 0))
            .unwrap();
        assert!(created.id > 0);
        assert_eq!(created.title, "buy milk");

        let fetched = db.get_record(Collection::Todo, created.id).unwrap().unwrap();
        assert_eq!(fetched, created);
    }

    #[test]
    fn ids_are_monotonic_within_a_collection() {
        let db = Database::open_in_memory().unwrap();

        let first = db
            .create_record(Collection::Number, &input("a", false, 1))
            .unwrap();
        let second = db
            .create_record(Collection::Number, &input("b", false, 2))
            .unwrap();
        assert!(second.id > first.id);
    }

    #[test]
    fn collections_are_independent() {
        let db = Database::open_in_memory().unwrap();

        let todo = db
            .create_record(Collection::Todo, &input("only a todo", false, 0))
            .unwrap();

        assert!(db.get_record(Collection::Number, todo.id).unwrap().is_none());
        assert!(db.list_records(Collection::Number).unwrap().is_empty());
        assert_eq!(db.list_records(Collection::Todo).unwrap().len(), 1);
    }

    #[test]
    fn get_missing_returns_none() {
        let db = Database::open_in_memory().unwrap();
        assert!(db.get_record(Collection::Todo, 9999).unwrap().is_none());
    }

    #[test]
    fn update_replaces_all_fields() {
        let db = Database::open_in_memory().unwrap();

        let created = db
            .create_record(Collection::Todo, &input("draft", false, 1))
            .unwrap();

        let replaced = input("final", true, 42);
        assert!(db
            .update_record(Collection::Todo, created.id, &replaced)
            .unwrap());

        let fetched = db.get_record(Collection::Todo, created.id).unwrap().unwrap();
        assert_eq!(fetched.title, "final");
        assert!(fetched.completed);
        assert_eq!(fetched.number, 42);
        assert_eq!(fetched.id, created.id);
    }

    #[test]
    fn update_missing_affects_nothing() {
        let db = Database::open_in_memory().unwrap();

        assert!(!db
            .update_record(Collection::Todo, 9999, &input("ghost", false, 0))
            .unwrap());
        assert!(db.list_records(Collection::Todo).unwrap().is_empty());
    }

    #[test]
    fn delete_removes_the_row() {
        let db = Database::open_in_memory().unwrap();

        let created = db
            .create_record(Collection::Number, &input("gone soon", false, 7))
            .unwrap();

        assert!(db.delete_record(Collection::Number, created.id).unwrap());
        assert!(db
            .get_record(Collection::Number, created.id)
            .unwrap()
            .is_none());
        assert!(!db.delete_record(Collection::Number, created.id).unwrap());
    }

    #[test]
    fn list_tracks_creates_minus_deletes() {
        let db = Database::open_in_memory().unwrap();

        let mut ids = Vec::new();
        for i in 0..5 {
            let record = db
                .create_record(Collection::Todo, &input(&format!("item {}", i), false, i))
                .unwrap();
            ids.push(record.id);
        }
        db.delete_record(Collection::Todo, ids[1]).unwrap();
        db.delete_record(Collection::Todo, ids[3]).unwrap();

        let listed = db.list_records(Collection::Todo).unwrap();
        assert_eq!(listed.len(), 3);
        // id ascending
        let listed_ids: Vec<i64> = listed.iter().map(|r| r.id).collect();
        assert_eq!(listed_ids, vec![ids[0], ids[2], ids[4]]);
    }

    #[test]
    fn schema_init_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("app.db");

        let db = Database::open(&path).unwrap();
        let created = db
            .create_record(Collection::Todo, &input("survives reopen", true, 3))
            .unwrap();
        drop(db);

        // Reopening reruns schema creation; data must be untouched.
        let reopened = Database::open(&path).unwrap();
        let fetched = reopened
            .get_record(Collection::Todo, created.id)
            .unwrap()
            .unwrap();
        assert_eq!(fetched, created);
    }
}
