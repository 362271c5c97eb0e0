//! Warehouse model for the manager-lookup collaborator.

use serde::{Deserialize, Serialize};

/// A company warehouse with its managing user.
///
/// Only the fields the installation permission gate needs; full company
/// profile management lives outside this tool.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Warehouse {
    pub id: i64,
    pub name: String,
    pub manager: String,
}
