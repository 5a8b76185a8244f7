//! Typed domain models for locations and items.
//!
//! # Responsibility
//! - Define the canonical `Location` and `Item` shapes used by inventory
//!   logic.
//! - Convert between typed models and loosely-shaped store records at the
//!   persistence boundary.
//!
//! # Invariants
//! - Every persisted item references an existing location by object id.
//! - `ItemSize` is a closed enumeration and every size has a defined weight.

pub mod item;
pub mod location;
