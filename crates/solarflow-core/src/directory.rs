//! Warehouse-manager lookup collaborator.
//!
//! Deciding whether an actor manages a warehouse is an external concern: the
//! installation permission gate consults this trait rather than local order
//! state. The default implementation reads the warehouse registry in the
//! tracker's own database; tests substitute [`StaticWarehouseDirectory`].

use std::collections::HashMap;
use std::path::PathBuf;

use async_trait::async_trait;
use tokio::task;

use crate::db::Database;
use crate::error::{Result, TrackerError};

/// Lookup seam for the installation permission gate.
#[async_trait]
pub trait WarehouseDirectory: Send + Sync {
    /// Whether `actor` manages the given warehouse.
    async fn is_warehouse_manager(&self, actor: &str, warehouse_id: i64) -> Result<bool>;
}

/// Directory backed by the `warehouses` table of the tracker database.
pub struct DbWarehouseDirectory {
    db_path: PathBuf,
}

impl DbWarehouseDirectory {
    pub fn new(db_path: PathBuf) -> Self {
        Self { db_path }
    }
}

#[async_trait]
impl WarehouseDirectory for DbWarehouseDirectory {
    async fn is_warehouse_manager(&self, actor: &str, warehouse_id: i64) -> Result<bool> {
        let db_path = self.db_path.clone();
        let actor = actor.to_string();

        task::spawn_blocking(move || {
            let db = Database::new(&db_path)?;
            Ok(db.warehouse_manager(warehouse_id)?.as_deref() == Some(actor.as_str()))
        })
        .await
        .map_err(|e| TrackerError::Configuration {
            message: format!("Task join error: {e}"),
        })?
    }
}

/// Fixed in-memory directory, used in tests and offline tooling.
#[derive(Debug, Clone, Default)]
pub struct StaticWarehouseDirectory {
    managers: HashMap<i64, Vec<String>>,
}

impl StaticWarehouseDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `manager` for `warehouse_id`.
    pub fn with_manager(mut self, warehouse_id: i64, manager: impl Into<String>) -> Self {
        self.managers
            .entry(warehouse_id)
            .or_default()
            .push(manager.into());
        self
    }
}

#[async_trait]
impl WarehouseDirectory for StaticWarehouseDirectory {
    async fn is_warehouse_manager(&self, actor: &str, warehouse_id: i64) -> Result<bool> {
        Ok(self
            .managers
            .get(&warehouse_id)
            .is_some_and(|managers| managers.iter().any(|manager| manager == actor)))
    }
}
