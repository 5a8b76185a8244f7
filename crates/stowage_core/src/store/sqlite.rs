//! SQLite-backed store implementation.
//!
//! # Responsibility
//! - Open file or in-memory SQLite databases and apply schema migrations.
//! - Persist staged records as one transaction per `commit`.
//! - Revert the newest transaction on `undo`.
//!
//! # Invariants
//! - Schema version is tracked via `PRAGMA user_version`.
//! - Object ids are assigned at staging time and never reused, so a record's
//!   id is stable from `add` onward.
//! - Record fields are stored as one JSON document per row; decoding failures
//!   surface as `StoreError::InvalidData` instead of being masked.

use log::{error, info};
use rusqlite::{params, Connection, OptionalExtension};
use std::collections::BTreeMap;
use std::path::Path;

use super::{FieldValue, ObjectId, Query, Record, Store, StoreError, StoreResult};

#[derive(Debug, Clone, Copy)]
struct Migration {
    version: u32,
    sql: &'static str,
}

const MIGRATIONS: &[Migration] = &[Migration {
    version: 1,
    sql: include_str!("0001_init.sql"),
}];

fn latest_version() -> u32 {
    MIGRATIONS.last().map_or(0, |migration| migration.version)
}

/// Transactional record store on a single SQLite database.
///
/// Staged records live in memory until `commit`; a crash before commit loses
/// only the staged batch, never committed data.
pub struct SqliteStore {
    conn: Connection,
    staged: Vec<Record>,
    next_object_id: ObjectId,
}

impl SqliteStore {
    /// Opens a store database file, creating and migrating it as needed.
    ///
    /// # Side effects
    /// - Emits `store_open` logging events with status.
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        info!("event=store_open module=store status=start mode=file");

        let conn = match Connection::open(path) {
            Ok(conn) => conn,
            Err(err) => {
                error!("event=store_open module=store status=error mode=file error={err}");
                return Err(err.into());
            }
        };

        match Self::bootstrap(conn) {
            Ok(store) => {
                info!("event=store_open module=store status=ok mode=file");
                Ok(store)
            }
            Err(err) => {
                error!("event=store_open module=store status=error mode=file error={err}");
                Err(err)
            }
        }
    }

    /// Opens an in-memory store, used by tests.
    pub fn open_in_memory() -> StoreResult<Self> {
        let conn = Connection::open_in_memory()?;
        Self::bootstrap(conn)
    }

    fn bootstrap(mut conn: Connection) -> StoreResult<Self> {
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        conn.busy_timeout(std::time::Duration::from_secs(5))?;
        apply_migrations(&mut conn)?;

        let next_object_id: ObjectId = conn.query_row(
            "SELECT COALESCE(MAX(object_id), 0) + 1 FROM objects;",
            [],
            |row| row.get(0),
        )?;

        Ok(Self {
            conn,
            staged: Vec::new(),
            next_object_id,
        })
    }
}

fn apply_migrations(conn: &mut Connection) -> StoreResult<()> {
    let current_version = current_user_version(conn)?;
    let latest = latest_version();

    if current_version > latest {
        return Err(StoreError::UnsupportedSchemaVersion {
            db_version: current_version,
            latest_supported: latest,
        });
    }

    if current_version == latest {
        return Ok(());
    }

    let tx = conn.transaction()?;
    for migration in MIGRATIONS {
        if migration.version <= current_version {
            continue;
        }

        tx.execute_batch(migration.sql)?;
        tx.execute_batch(&format!("PRAGMA user_version = {};", migration.version))?;
    }
    tx.commit()?;

    Ok(())
}

fn current_user_version(conn: &Connection) -> StoreResult<u32> {
    let version = conn.query_row("PRAGMA user_version;", [], |row| row.get::<_, u32>(0))?;
    Ok(version)
}

impl Store for SqliteStore {
    fn add(&mut self, mut record: Record) -> StoreResult<ObjectId> {
        let object_id = self.next_object_id;
        self.next_object_id += 1;

        record.object_id = Some(object_id);
        self.staged.push(record);

        Ok(object_id)
    }

    fn commit(&mut self, description: &str) -> StoreResult<()> {
        if self.staged.is_empty() {
            return Ok(());
        }

        let tx = self.conn.transaction()?;
        tx.execute("INSERT INTO txns (description) VALUES (?1);", [description])?;
        let txn_id = tx.last_insert_rowid();

        for record in &self.staged {
            let fields = serde_json::to_string(record.fields())?;
            tx.execute(
                "INSERT INTO objects (object_id, txn_id, fields) VALUES (?1, ?2, ?3);",
                params![record.object_id, txn_id, fields],
            )?;
        }
        tx.commit()?;

        info!(
            "event=store_commit module=store status=ok txn_id={txn_id} records={}",
            self.staged.len()
        );
        self.staged.clear();

        Ok(())
    }

    fn undo(&mut self) -> StoreResult<Option<String>> {
        let newest: Option<(i64, String)> = self
            .conn
            .query_row(
                "SELECT txn_id, description FROM txns ORDER BY txn_id DESC LIMIT 1;",
                [],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .optional()?;

        let Some((txn_id, description)) = newest else {
            return Ok(None);
        };

        // objects rows go away through the ON DELETE CASCADE reference.
        self.conn
            .execute("DELETE FROM txns WHERE txn_id = ?1;", [txn_id])?;

        info!("event=store_undo module=store status=ok txn_id={txn_id} description={description}");

        Ok(Some(description))
    }

    fn query(&self, query: &Query) -> StoreResult<Vec<Record>> {
        let mut stmt = self
            .conn
            .prepare("SELECT object_id, fields FROM objects ORDER BY object_id;")?;
        let mut rows = stmt.query([])?;

        let mut records = Vec::new();
        while let Some(row) = rows.next()? {
            let object_id: ObjectId = row.get(0)?;
            let fields_json: String = row.get(1)?;
            let fields: BTreeMap<String, FieldValue> = serde_json::from_str(&fields_json)
                .map_err(|err| {
                    StoreError::InvalidData(format!(
                        "object {object_id} holds undecodable fields: {err}"
                    ))
                })?;

            let record = Record::with_id(object_id, fields);
            if query.matches(&record) {
                records.push(record);
            }
        }

        Ok(records)
    }
}
