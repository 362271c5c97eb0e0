//! The fixed stage table and per-stage status derivation.
//!
//! The eleven-stage fulfilment sequence is a compile-time constant
//! ([`STAGES`]) shared by the transition logic and every rendering surface,
//! so stage order is never inferred from ad-hoc positions.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Type-safe identifier for one stage of the order pipeline.
///
/// Variant order is the pipeline order; [`StageKey::index`] relies on it.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum StageKey {
    EstimateGenerated,
    EstimatePaid,
    Planner,
    Delivery,
    AssignFabricatorAndInstaller,
    Fabrication,
    Installation,
    NetmeterApply,
    NetmeterInstalled,
    SubsidyClaim,
    SubsidyDisbursed,
}

/// A `{key, label}` pair describing one stage of the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StageDescriptor {
    pub key: StageKey,
    pub label: &'static str,
}

/// The ordered stage table. This is the single source of truth for stage
/// order and display labels.
pub const STAGES: [StageDescriptor; 11] = [
    StageDescriptor { key: StageKey::EstimateGenerated, label: "Estimate Generated" },
    StageDescriptor { key: StageKey::EstimatePaid, label: "Estimate Paid" },
    StageDescriptor { key: StageKey::Planner, label: "Planner" },
    StageDescriptor { key: StageKey::Delivery, label: "Delivery" },
    StageDescriptor { key: StageKey::AssignFabricatorAndInstaller, label: "Assign Fabricator & Installer" },
    StageDescriptor { key: StageKey::Fabrication, label: "Fabrication" },
    StageDescriptor { key: StageKey::Installation, label: "Installation" },
    StageDescriptor { key: StageKey::NetmeterApply, label: "Net Meter Application" },
    StageDescriptor { key: StageKey::NetmeterInstalled, label: "Net Meter Installed" },
    StageDescriptor { key: StageKey::SubsidyClaim, label: "Subsidy Claim" },
    StageDescriptor { key: StageKey::SubsidyDisbursed, label: "Subsidy Disbursed" },
];

impl StageKey {
    /// The first stage of the pipeline.
    pub const FIRST: StageKey = StageKey::EstimateGenerated;

    /// Stable string form used in persistence and on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            StageKey::EstimateGenerated => "estimate_generated",
            StageKey::EstimatePaid => "estimate_paid",
            StageKey::Planner => "planner",
            StageKey::Delivery => "delivery",
            StageKey::AssignFabricatorAndInstaller => "assign_fabricator_and_installer",
            StageKey::Fabrication => "fabrication",
            StageKey::Installation => "installation",
            StageKey::NetmeterApply => "netmeter_apply",
            StageKey::NetmeterInstalled => "netmeter_installed",
            StageKey::SubsidyClaim => "subsidy_claim",
            StageKey::SubsidyDisbursed => "subsidy_disbursed",
        }
    }

    /// Display label from the stage table.
    pub fn label(&self) -> &'static str {
        STAGES[self.index()].label
    }

    /// Sequence index of this stage within [`STAGES`].
    pub const fn index(self) -> usize {
        self as usize
    }

    /// The stage that follows this one, or `None` for the final stage.
    pub fn next(self) -> Option<StageKey> {
        STAGES.get(self.index() + 1).map(|descriptor| descriptor.key)
    }

    /// The stage that precedes this one, or `None` for the first stage.
    pub fn previous(self) -> Option<StageKey> {
        self.index()
            .checked_sub(1)
            .map(|position| STAGES[position].key)
    }
}

impl fmt::Display for StageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StageKey {
    type Err = crate::error::TrackerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        STAGES
            .iter()
            .map(|descriptor| descriptor.key)
            .find(|key| key.as_str() == s)
            .ok_or_else(|| crate::error::TrackerError::UnknownStage(s.to_string()))
    }
}

/// Type-safe enumeration of per-stage statuses.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StageStatus {
    /// Stage is reachable but not yet completed
    Pending,

    /// Stage data has been submitted and accepted
    Completed,

    /// Stage is not yet reachable because a prior stage is incomplete
    Locked,
}

impl FromStr for StageStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(StageStatus::Pending),
            "completed" => Ok(StageStatus::Completed),
            "locked" => Ok(StageStatus::Locked),
            _ => Err(format!("Invalid stage status: {s}")),
        }
    }
}

impl StageStatus {
    /// Convert to the persisted string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            StageStatus::Pending => "pending",
            StageStatus::Completed => "completed",
            StageStatus::Locked => "locked",
        }
    }

    /// Status with consistent icon formatting for display.
    pub fn with_icon(&self) -> &'static str {
        match self {
            StageStatus::Completed => "✓ Completed",
            StageStatus::Pending => "○ Pending",
            StageStatus::Locked => "· Locked",
        }
    }
}

/// The persisted status map of an order.
///
/// Keys not present are `locked`; an absent or empty map means only the
/// first stage is pending and every other stage is locked.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct StageMap(BTreeMap<StageKey, StageStatus>);

impl StageMap {
    /// An empty map (brand-new order: first stage pending by default).
    pub fn new() -> Self {
        Self::default()
    }

    /// Derives the effective status of a stage from the persisted map.
    ///
    /// `completed` when the map says so; `pending` when the map says so or
    /// when the map is empty and the stage is the first in the sequence;
    /// `locked` otherwise. No side effects.
    pub fn status_of(&self, key: StageKey) -> StageStatus {
        match self.0.get(&key) {
            Some(status) => *status,
            None if self.0.is_empty() && key.index() == 0 => StageStatus::Pending,
            None => StageStatus::Locked,
        }
    }

    /// Whether the map explicitly marks a stage completed.
    pub fn is_completed(&self, key: StageKey) -> bool {
        matches!(self.0.get(&key), Some(StageStatus::Completed))
    }

    /// Records a status for a stage.
    pub fn set(&mut self, key: StageKey, status: StageStatus) {
        self.0.insert(key, status);
    }

    /// Whether every stage in the pipeline is completed.
    pub fn all_completed(&self) -> bool {
        STAGES.iter().all(|descriptor| self.is_completed(descriptor.key))
    }

    /// Number of completed stages.
    pub fn completed_count(&self) -> usize {
        STAGES
            .iter()
            .filter(|descriptor| self.is_completed(descriptor.key))
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Whether a stage may be selected for viewing/editing.
///
/// A stage is selectable unless it is locked and lies beyond the current
/// stage. Selecting a non-selectable stage is a no-op at the caller, not an
/// error.
pub fn is_selectable(
    stage_index: usize,
    current_index: Option<usize>,
    status: StageStatus,
) -> bool {
    status != StageStatus::Locked || current_index.is_some_and(|current| stage_index <= current)
}
