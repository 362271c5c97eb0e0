//! Parameter structures for tracker operations.
//!
//! Interface-agnostic parameter types shared by the CLI and any future
//! surface. CLI argument structs convert into these via `From`, keeping
//! framework derives out of the core.

use serde::{Deserialize, Serialize};

use crate::models::{OrderFilter, StagePayload};

/// Generic parameters for operations requiring just an order ID.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Id {
    /// The ID of the order to operate on
    pub id: u64,
}

/// Parameters for creating a new order.
///
/// A new order starts with the first pipeline stage pending and every other
/// stage locked.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateOrder {
    /// Customer name (required)
    pub customer: String,
    /// Customer contact phone
    pub phone: Option<String>,
    /// Customer contact email
    pub email: Option<String>,
    /// Customer tax identifier (GSTIN)
    pub gstin: Option<String>,
    /// Installation site address
    pub site_address: Option<String>,
}

/// Parameters for listing orders.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ListOrders {
    /// Completion filter applied to the listing
    #[serde(default)]
    pub filter: OrderFilter,
}

/// Parameters for completing (or re-submitting) a stage of an order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompleteStage {
    /// The order being progressed
    pub order_id: u64,
    /// The stage's business fields, tagged by stage key
    pub payload: StagePayload,
    /// Acting user, required for permission-gated stages
    pub actor: Option<String>,
}

/// Parameters for registering a warehouse with its manager.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AddWarehouse {
    /// Warehouse display name (required)
    pub name: String,
    /// User who manages the warehouse (required)
    pub manager: String,
}
