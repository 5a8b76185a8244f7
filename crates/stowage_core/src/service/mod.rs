//! Use-case services over the store.
//!
//! # Responsibility
//! - Orchestrate address resolution, balancing, listing and persistence into
//!   command-level entry points.
//! - Keep callers (CLI, tests) decoupled from store details.

pub mod inventory;
