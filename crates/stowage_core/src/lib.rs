//! Core domain logic for Stowage, a personal inventory tracker.
//! This crate is the single source of truth for addressing, balancing and
//! listing invariants; the CLI is a thin shell around it.

pub mod address;
pub mod balance;
pub mod error;
pub mod intake;
pub mod listing;
pub mod logging;
pub mod model;
pub mod service;
pub mod store;

pub use address::{resolve_location, AddressParseError, ItemAddress};
pub use balance::choose_bin;
pub use error::{InventoryError, InventoryResult};
pub use listing::{list_items, ListingRow};
pub use logging::{default_log_level, init_logging};
pub use model::item::{Item, ItemSize, ParseSizeError};
pub use model::location::Location;
pub use service::inventory::InventoryService;
pub use store::{FieldValue, ObjectId, Query, Record, SqliteStore, Store, StoreError, StoreResult};
