//! High-level tracker API for progressing orders through the pipeline.
//!
//! The [`Tracker`] is the central coordinator between interface layers and
//! the database, and the sole mutator of record for an order's stage map
//! and current-stage pointer.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │   Interfaces    │    │   Operations    │    │    Database     │
//! │ (CLI commands)  │───▶│ (order_ops,     │───▶│   (via db/)     │
//! │                 │    │  stage_ops)     │    │                 │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! All operations are async; blocking SQLite work runs on the tokio
//! blocking pool. Field validation and the installation permission gate
//! resolve before any database write (fail fast, no partial writes).

use std::path::PathBuf;
use std::sync::Arc;

use crate::directory::WarehouseDirectory;

// Module declarations
pub mod builder;
pub mod order_ops;
pub mod stage_ops;

#[cfg(test)]
mod tests;

// Re-export the main types
pub use builder::TrackerBuilder;

/// Main tracker interface for managing orders and stage transitions.
pub struct Tracker {
    pub(crate) db_path: PathBuf,
    pub(crate) directory: Arc<dyn WarehouseDirectory>,
}

impl Tracker {
    /// Creates a new tracker with the specified database path and
    /// warehouse directory.
    pub(crate) fn new(db_path: PathBuf, directory: Arc<dyn WarehouseDirectory>) -> Self {
        Self { db_path, directory }
    }
}
