//! Item domain model and the size/weight table.
//!
//! # Invariants
//! - `location_id` always references an existing location at read time.
//! - `bin_no` lies within the owning location's declared range.
//! - Every `ItemSize` has a fixed load weight used for bin balancing.

use crate::store::{ObjectId, Query, Record, StoreError};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Closed size enumeration for tracked items.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemSize {
    S,
    M,
    L,
    X,
}

impl ItemSize {
    /// Load weight contributed to a bin by one item of this size.
    pub fn weight(self) -> i64 {
        match self {
            Self::S => 2,
            Self::M => 3,
            Self::L => 4,
            Self::X => 6,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::S => "S",
            Self::M => "M",
            Self::L => "L",
            Self::X => "X",
        }
    }
}

impl Display for ItemSize {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Size token could not be recognized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseSizeError {
    token: String,
}

impl Display for ParseSizeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid size `{}`: expected one of S, M, L, X", self.token)
    }
}

impl Error for ParseSizeError {}

impl std::str::FromStr for ItemSize {
    type Err = ParseSizeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "S" => Ok(Self::S),
            "M" => Ok(Self::M),
            "L" => Ok(Self::L),
            "X" => Ok(Self::X),
            _ => Err(ParseSizeError {
                token: s.to_string(),
            }),
        }
    }
}

/// A tracked object assigned to one bin of one location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    /// Store-assigned id; `None` until the item is staged.
    pub object_id: Option<ObjectId>,
    pub location_id: ObjectId,
    pub bin_no: i64,
    pub name: String,
    pub size: ItemSize,
}

impl Item {
    pub fn new(
        location_id: ObjectId,
        bin_no: i64,
        name: impl Into<String>,
        size: ItemSize,
    ) -> Self {
        Self {
            object_id: None,
            location_id,
            bin_no,
            name: name.into(),
            size,
        }
    }

    /// Predicate matching every item record.
    pub fn query_all() -> Query {
        Query::Equals("type", "item".into())
    }

    /// Predicate matching items stored at one location.
    pub fn query_at(location_id: ObjectId) -> Query {
        Query::And(vec![
            Query::Equals("type", "item".into()),
            Query::Equals("location_id", location_id.into()),
        ])
    }

    pub fn to_record(&self) -> Record {
        let mut record = Record::new();
        record.set("type", "item");
        record.set("name", self.name.as_str());
        record.set("location_id", self.location_id);
        record.set("bin_no", self.bin_no);
        record.set("size", self.size.as_str());
        record
    }
}

impl TryFrom<&Record> for Item {
    type Error = StoreError;

    fn try_from(record: &Record) -> Result<Self, Self::Error> {
        let object_id = record
            .object_id()
            .ok_or_else(|| StoreError::InvalidData("item record has no object id".to_string()))?;
        let name = record
            .text("name")
            .ok_or_else(|| StoreError::InvalidData(format!("item {object_id} has no name")))?;
        let location_id = record.number("location_id").ok_or_else(|| {
            StoreError::InvalidData(format!("item {object_id} has no location reference"))
        })?;
        let bin_no = record
            .number("bin_no")
            .ok_or_else(|| StoreError::InvalidData(format!("item {object_id} has no bin")))?;
        let size_text = record
            .text("size")
            .ok_or_else(|| StoreError::InvalidData(format!("item {object_id} has no size")))?;
        let size = size_text.parse::<ItemSize>().map_err(|err| {
            StoreError::InvalidData(format!("item {object_id}: {err}"))
        })?;

        Ok(Self {
            object_id: Some(object_id),
            location_id,
            bin_no,
            name: name.to_string(),
            size,
        })
    }
}
