//! Inventory-level error taxonomy.
//!
//! # Responsibility
//! - Collect every failure a command can report before mutating the store.
//! - Wrap store and I/O failures so they propagate unchanged.
//!
//! # Invariants
//! - All command-local variants are detected before any record is committed.
//! - No variant triggers a retry; undo is the only corrective mechanism.

use crate::store::StoreError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type InventoryResult<T> = Result<T, InventoryError>;

#[derive(Debug)]
pub enum InventoryError {
    /// Address token does not match the `LOCATION[/BIN]` grammar.
    AddressSyntax { token: String },
    /// No location matches the given name.
    LocationNotFound { name: String },
    /// More than one location matches the given name.
    AmbiguousLocation {
        name: String,
        candidates: Vec<String>,
    },
    /// Explicit bin number falls outside `1..=num_bins`.
    BinRange {
        location: String,
        bin: i64,
        num_bins: i64,
    },
    /// Command argument failed a basic type or range check.
    Validation(String),
    /// Store-level failure; fatal for the current command.
    Store(StoreError),
    /// Input or output stream failure during interactive intake.
    Io(std::io::Error),
}

impl Display for InventoryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AddressSyntax { token } => write!(
                f,
                "invalid address `{token}`: expected LOCATION or LOCATION/BIN with a bin number of at least 1"
            ),
            Self::LocationNotFound { name } => {
                write!(f, "no location matches \"{name}\"")
            }
            Self::AmbiguousLocation { name, candidates } => write!(
                f,
                "location name \"{name}\" matches multiple locations: {}",
                candidates.join(", ")
            ),
            Self::BinRange {
                location,
                bin,
                num_bins,
            } => write!(
                f,
                "location {location} only has {num_bins} bins, got bin {bin}"
            ),
            Self::Validation(message) => write!(f, "{message}"),
            Self::Store(err) => write!(f, "{err}"),
            Self::Io(err) => write!(f, "{err}"),
        }
    }
}

impl Error for InventoryError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            Self::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<StoreError> for InventoryError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

impl From<std::io::Error> for InventoryError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}
