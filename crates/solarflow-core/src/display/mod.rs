//! Display formatting for orders, stages, and operation results.
//!
//! Domain models carry their own `Display` implementations; newtype wrappers
//! cover collections and operation outcomes so every output context renders
//! through the same logic.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │  Domain Models  │    │ Wrapper Types   │    │   Formatted     │
//! │ (Order, stages) │───▶│ (results,       │───▶│    Output       │
//! │                 │    │  collections)   │    │   (Terminal)    │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! - [`collections`]: Collection wrappers (OrderSummaries, Warehouses)
//! - [`results`]: Operation result wrappers (CreateResult, UpdateResult)
//! - [`datetime`]: Timestamp formatting in the system timezone
//! - [`models`]: Display implementations for domain models, including the
//!   per-order pipeline board

pub mod collections;
pub mod datetime;
pub mod models;
pub mod results;

pub use collections::{OrderSummaries, Warehouses};
pub use datetime::LocalDateTime;
pub use results::{CreateResult, UpdateResult};
