//! Order model definition and related functionality.

use std::collections::BTreeMap;

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::{StageKey, StageMap, StageStatus};

/// An order progressing through the fulfilment pipeline.
///
/// The tracker is the sole mutator of `current_stage` and `stages`; every
/// other field may be edited by the stage forms through payload merges.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Order {
    /// Unique identifier for the order
    pub id: u64,

    /// Customer name
    pub customer: String,

    /// Customer contact phone
    pub phone: Option<String>,

    /// Customer contact email
    pub email: Option<String>,

    /// Customer tax identifier (15-character GSTIN)
    pub gstin: Option<String>,

    /// Installation site address
    pub site_address: Option<String>,

    /// The stage currently open for editing; `None` once the final stage
    /// completes
    pub current_stage: Option<StageKey>,

    /// Persisted per-stage status map
    #[serde(default)]
    pub stages: StageMap,

    /// Completion timestamps, one per completed stage (UTC)
    #[serde(default)]
    pub completed_at: BTreeMap<StageKey, Timestamp>,

    /// Set when the estimate was skipped through the zero-amount shortcut
    #[serde(default)]
    pub zero_amount_estimate: bool,

    /// Merged business fields submitted by the stage forms
    #[serde(default)]
    pub details: serde_json::Map<String, serde_json::Value>,

    /// Timestamp when the order was created (UTC)
    pub created_at: Timestamp,

    /// Timestamp when the order was last updated (UTC)
    pub updated_at: Timestamp,
}

impl Order {
    /// Effective status of a stage, derived from the persisted map.
    pub fn stage_status(&self, key: StageKey) -> StageStatus {
        self.stages.status_of(key)
    }

    /// Sequence index of the current stage, if any.
    pub fn current_index(&self) -> Option<usize> {
        self.current_stage.map(StageKey::index)
    }

    /// Whether a stage may be selected in a rendering surface.
    pub fn is_selectable(&self, key: StageKey) -> bool {
        super::is_selectable(key.index(), self.current_index(), self.stage_status(key))
    }

    /// Whether every stage has completed and the pipeline is terminal.
    pub fn pipeline_complete(&self) -> bool {
        self.current_stage.is_none() && self.stages.all_completed()
    }

    /// The installer assigned during the crew-assignment stage, if any.
    pub fn assigned_installer(&self) -> Option<&str> {
        self.details.get("installer").and_then(|value| value.as_str())
    }

    /// The warehouse chosen during the planner stage, if any.
    pub fn planned_warehouse_id(&self) -> Option<i64> {
        self.details
            .get("planned_warehouse_id")
            .and_then(serde_json::Value::as_i64)
    }
}

/// Lightweight listing row for an order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderSummary {
    pub id: u64,
    pub customer: String,
    pub current_stage: Option<StageKey>,
    pub completed_stages: usize,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
