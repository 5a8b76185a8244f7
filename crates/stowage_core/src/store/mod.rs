//! Transactional object store abstraction.
//!
//! # Responsibility
//! - Define the four-operation store contract the inventory logic consumes:
//!   `add`, `commit`, `undo`, `query`.
//! - Define the dynamically-shaped `Record` and the closed `Query` predicate
//!   set used to retrieve records.
//!
//! # Invariants
//! - `add` stages a record; it becomes visible to `query` only after `commit`.
//! - `undo` reverts exactly the most recent committed transaction.
//! - `query` results are ordered by object id.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

mod sqlite;

pub use sqlite::SqliteStore;

/// Store-assigned identifier of a persisted record.
pub type ObjectId = i64;

pub type StoreResult<T> = Result<T, StoreError>;

/// Persistence-layer error for store operations and record decoding.
#[derive(Debug)]
pub enum StoreError {
    Sqlite(rusqlite::Error),
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },
    InvalidData(String),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::UnsupportedSchemaVersion {
                db_version,
                latest_supported,
            } => write!(
                f,
                "store schema version {db_version} is newer than supported {latest_supported}"
            ),
            Self::InvalidData(message) => write!(f, "invalid stored record: {message}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::UnsupportedSchemaVersion { .. } => None,
            Self::InvalidData(_) => None,
        }
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(value: serde_json::Error) -> Self {
        Self::InvalidData(value.to_string())
    }
}

/// Value of a single record field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Number(i64),
    Text(String),
}

impl FieldValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(value) => Some(value),
            Self::Number(_) => None,
        }
    }

    pub fn as_number(&self) -> Option<i64> {
        match self {
            Self::Number(value) => Some(*value),
            Self::Text(_) => None,
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        Self::Number(value)
    }
}

/// Loosely-shaped record addressed by field name.
///
/// Typed domain models convert to and from this shape at the store boundary,
/// so SQL and serialization details never leak into inventory logic.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Record {
    object_id: Option<ObjectId>,
    fields: BTreeMap<String, FieldValue>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_id(object_id: ObjectId, fields: BTreeMap<String, FieldValue>) -> Self {
        Self {
            object_id: Some(object_id),
            fields,
        }
    }

    /// Returns the store-assigned id, or `None` before the record is staged.
    pub fn object_id(&self) -> Option<ObjectId> {
        self.object_id
    }

    pub fn set(&mut self, field: &str, value: impl Into<FieldValue>) {
        self.fields.insert(field.to_string(), value.into());
    }

    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.fields.get(field)
    }

    pub fn text(&self, field: &str) -> Option<&str> {
        self.get(field).and_then(FieldValue::as_text)
    }

    pub fn number(&self, field: &str) -> Option<i64> {
        self.get(field).and_then(FieldValue::as_number)
    }

    pub(crate) fn fields(&self) -> &BTreeMap<String, FieldValue> {
        &self.fields
    }
}

/// Closed predicate set for record retrieval.
///
/// Only these three variants are ever needed; keeping the set closed avoids a
/// general expression tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Query {
    /// Field holds exactly this value.
    Equals(&'static str, FieldValue),
    /// Text field contains this phrase as a contiguous word sequence,
    /// compared case-insensitively.
    Phrase(&'static str, String),
    /// All sub-queries match.
    And(Vec<Query>),
}

impl Query {
    pub fn matches(&self, record: &Record) -> bool {
        match self {
            Self::Equals(field, value) => record.get(field) == Some(value),
            Self::Phrase(field, phrase) => record
                .text(field)
                .is_some_and(|value| phrase_matches(value, phrase)),
            Self::And(queries) => queries.iter().all(|query| query.matches(record)),
        }
    }
}

fn phrase_matches(value: &str, phrase: &str) -> bool {
    let needle: Vec<String> = lowercase_words(phrase);
    if needle.is_empty() {
        return false;
    }

    let haystack: Vec<String> = lowercase_words(value);
    if haystack.len() < needle.len() {
        return false;
    }

    haystack
        .windows(needle.len())
        .any(|window| window == needle.as_slice())
}

fn lowercase_words(value: &str) -> Vec<String> {
    value
        .split_whitespace()
        .map(str::to_lowercase)
        .collect()
}

/// Four-operation store contract consumed by the inventory logic.
///
/// # Contract
/// - `add` assigns and returns the object id immediately, but the record is
///   only queryable after the next `commit`.
/// - `commit` persists all records staged since the previous commit as one
///   transaction tagged with a human-readable description.
/// - `undo` reverts the most recent committed transaction and returns its
///   description, or `None` when there is nothing to undo.
/// - `query` returns committed records matching the predicate, ordered by
///   object id.
pub trait Store {
    fn add(&mut self, record: Record) -> StoreResult<ObjectId>;
    fn commit(&mut self, description: &str) -> StoreResult<()>;
    fn undo(&mut self) -> StoreResult<Option<String>>;
    fn query(&self, query: &Query) -> StoreResult<Vec<Record>>;
}
