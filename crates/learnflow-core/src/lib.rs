//! Core types and trait definitions for LearnFlow.
//!
//! This crate is deliberately free of database and runtime dependencies.
//! It owns the course catalog model, the persisted user-data record, the
//! progress formula, and the [`store::SnapshotStore`] abstraction that
//! storage backends implement.

pub mod catalog;
pub mod error;
pub mod identity;
pub mod progress;
pub mod record;
pub mod store;

pub use error::{Error, Result};

#[cfg(test)]
mod tests;
