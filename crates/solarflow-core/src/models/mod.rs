//! Domain models for the order pipeline.

pub mod filters;
pub mod order;
pub mod payload;
pub mod stage;
pub mod warehouse;

pub use filters::{CompletionFilter, OrderFilter};
pub use order::{Order, OrderSummary};
pub use payload::StagePayload;
pub use stage::{is_selectable, StageDescriptor, StageKey, StageMap, StageStatus, STAGES};
pub use warehouse::Warehouse;
