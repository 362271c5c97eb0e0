//! Filter types for order listing.

use serde::{Deserialize, Serialize};

/// Pipeline completion filter for order listings.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CompletionFilter {
    /// Orders with a current stage still open
    InProgress,
    /// Orders whose pipeline has fully completed
    Completed,
}

/// Filter criteria for listing orders.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct OrderFilter {
    /// Restrict by pipeline completion; `None` lists everything
    pub completion: Option<CompletionFilter>,
}
