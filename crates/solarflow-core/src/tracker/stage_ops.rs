//! Stage-transition operations for the Tracker.
//!
//! Validation and the installation permission gate resolve here, before the
//! transactional database work; the transaction itself re-checks ordering
//! against the persisted row.

use tokio::task;

use super::Tracker;
use crate::{
    db::Database,
    error::{Result, TrackerError},
    models::{Order, StageKey},
    params::{CompleteStage, Id},
};

impl Tracker {
    /// Completes (or re-submits) a stage of an order.
    ///
    /// The payload's stage must be the order's current stage, or already
    /// completed, in which case only the stage's business fields are
    /// updated. The installation stage additionally requires the acting
    /// user to be the assigned installer or the manager of the planned
    /// warehouse.
    pub async fn complete_stage(&self, params: &CompleteStage) -> Result<Order> {
        params.payload.validate()?;

        if params.payload.stage() == StageKey::Installation {
            self.check_installation_permission(params.order_id, params.actor.as_deref())
                .await?;
        }

        let db_path = self.db_path.clone();
        let order_id = params.order_id;
        let payload = params.payload.clone();

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            db.complete_stage(order_id, &payload)
        })
        .await
        .map_err(|e| TrackerError::Configuration {
            message: format!("Task join error: {e}"),
        })?
    }

    /// Marks a zero-amount estimate as generated and paid in one step,
    /// opening the planner stage.
    pub async fn skip_zero_amount_estimate(&self, params: &Id) -> Result<Order> {
        let db_path = self.db_path.clone();
        let order_id = params.id;

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            db.skip_zero_amount_estimate(order_id)
        })
        .await
        .map_err(|e| TrackerError::Configuration {
            message: format!("Task join error: {e}"),
        })?
    }

    /// Updates a stage's business fields without changing its status.
    pub async fn update_stage_fields(&self, params: &CompleteStage) -> Result<Order> {
        params.payload.validate()?;

        let db_path = self.db_path.clone();
        let order_id = params.order_id;
        let payload = params.payload.clone();

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            db.update_stage_fields(order_id, &payload)
        })
        .await
        .map_err(|e| TrackerError::Configuration {
            message: format!("Task join error: {e}"),
        })?
    }

    /// Installation may only be completed by the assigned installer or by
    /// the manager of the warehouse chosen during planning.
    async fn check_installation_permission(
        &self,
        order_id: u64,
        actor: Option<&str>,
    ) -> Result<()> {
        let actor = actor.ok_or_else(|| TrackerError::Permission {
            actor: "<unknown>".to_string(),
            stage: StageKey::Installation,
        })?;

        let order = self
            .get_order(&Id { id: order_id })
            .await?
            .ok_or(TrackerError::OrderNotFound { id: order_id })?;

        if order.assigned_installer() == Some(actor) {
            return Ok(());
        }

        if let Some(warehouse_id) = order.planned_warehouse_id() {
            if self
                .directory
                .is_warehouse_manager(actor, warehouse_id)
                .await?
            {
                return Ok(());
            }
        }

        Err(TrackerError::Permission {
            actor: actor.to_string(),
            stage: StageKey::Installation,
        })
    }
}
