//! Core library for the Solarflow order pipeline tracker.
//!
//! This crate provides the business logic for progressing solar installation
//! orders through a fixed fulfilment pipeline, including stage transitions,
//! per-stage payload validation, database operations, and error handling.
//!
//! # Pipeline Model
//!
//! Every order moves through the same eleven stages, from estimate through
//! subsidy disbursal. Stage order is a compile-time constant
//! ([`models::STAGES`]); per-order progress is a persisted status map from
//! which each stage's effective status (`pending`, `completed`, `locked`) is
//! derived. The [`Tracker`] is the sole mutator of that map.
//!
//! # Display Architecture
//!
//! Domain models implement [`std::fmt::Display`] for direct formatting, and
//! wrapper types in [`display`] cover collections and operation results, so
//! the same data renders consistently across output contexts.
//!
//! # Quick Start
//!
//! ```rust
//! use solarflow_core::{TrackerBuilder, params::CreateOrder};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! // Create a tracker instance
//! let tracker = TrackerBuilder::new()
//!     .with_database_path(Some("orders.db"))
//!     .build()
//!     .await?;
//!
//! // Create a new order; it starts at the estimate stage
//! let order = tracker
//!     .create_order(&CreateOrder {
//!         customer: "Asha Verma".to_string(),
//!         phone: Some("9876543210".to_string()),
//!         email: None,
//!         gstin: None,
//!         site_address: None,
//!     })
//!     .await?;
//! println!("Created order: {}", order);
//! # Ok(())
//! # }
//! ```

pub mod db;
pub mod directory;
pub mod display;
pub mod error;
pub mod models;
pub mod params;
pub mod tracker;

pub(crate) mod validate;

// Re-export commonly used types
pub use db::Database;
pub use directory::{DbWarehouseDirectory, StaticWarehouseDirectory, WarehouseDirectory};
pub use display::{CreateResult, LocalDateTime, OrderSummaries, UpdateResult, Warehouses};
pub use error::{Result, TrackerError};
pub use models::{
    CompletionFilter, Order, OrderFilter, OrderSummary, StageDescriptor, StageKey, StageMap,
    StagePayload, StageStatus, Warehouse, STAGES,
};
pub use params::{AddWarehouse, CompleteStage, CreateOrder, Id, ListOrders};
pub use tracker::{Tracker, TrackerBuilder};
