//! Location domain model.
//!
//! # Invariants
//! - `num_bins` is fixed at creation; bins are numbered `1..=num_bins`.
//! - Names are not required to be unique; ambiguity is a resolution-time
//!   error, not a schema constraint.

use crate::store::{ObjectId, Query, Record, StoreError};

/// A named storage unit holding a fixed number of bins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    /// Store-assigned id; `None` until the location is staged.
    pub object_id: Option<ObjectId>,
    pub name: String,
    pub num_bins: i64,
}

impl Location {
    pub fn new(name: impl Into<String>, num_bins: i64) -> Self {
        Self {
            object_id: None,
            name: name.into(),
            num_bins,
        }
    }

    /// Predicate matching every location record.
    pub fn query_all() -> Query {
        Query::Equals("type", "location".into())
    }

    /// Predicate matching locations whose name contains `name` as a phrase,
    /// case-insensitively.
    pub fn query_named(name: &str) -> Query {
        Query::And(vec![
            Query::Equals("type", "location".into()),
            Query::Phrase("name", name.to_string()),
        ])
    }

    pub fn to_record(&self) -> Record {
        let mut record = Record::new();
        record.set("type", "location");
        record.set("name", self.name.as_str());
        record.set("num_bins", self.num_bins);
        record
    }
}

impl TryFrom<&Record> for Location {
    type Error = StoreError;

    fn try_from(record: &Record) -> Result<Self, Self::Error> {
        let object_id = record.object_id().ok_or_else(|| {
            StoreError::InvalidData("location record has no object id".to_string())
        })?;
        let name = record.text("name").ok_or_else(|| {
            StoreError::InvalidData(format!("location {object_id} has no name"))
        })?;
        let num_bins = record.number("num_bins").ok_or_else(|| {
            StoreError::InvalidData(format!("location {object_id} has no bin count"))
        })?;

        if num_bins < 1 {
            return Err(StoreError::InvalidData(format!(
                "location {object_id} declares {num_bins} bins"
            )));
        }

        Ok(Self {
            object_id: Some(object_id),
            name: name.to_string(),
            num_bins,
        })
    }
}
