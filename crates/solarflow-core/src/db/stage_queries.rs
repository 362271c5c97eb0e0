//! Transactional stage-transition queries.
//!
//! Every transition runs in a single transaction that re-checks the current
//! stage against the persisted row, applies the stage-map mutation and
//! payload merge together, and re-reads the canonical row before commit.
//! Callers render from the returned order, never from a locally computed
//! copy.

use jiff::Timestamp;
use rusqlite::{params, Transaction};

use crate::{
    error::{DatabaseResultExt, Result, TrackerError},
    models::{Order, StageKey, StagePayload, StageStatus},
};

use super::order_queries::SELECT_ORDER_SQL;

const UPDATE_STAGES_SQL: &str = "UPDATE orders SET current_stage = ?1, stages = ?2, completed_at = ?3, zero_amount_estimate = ?4, details = ?5, updated_at = ?6 WHERE id = ?7";
const UPDATE_DETAILS_SQL: &str = "UPDATE orders SET details = ?1, updated_at = ?2 WHERE id = ?3";

fn load_order(tx: &Transaction, order_id: u64) -> Result<Order> {
    use rusqlite::OptionalExtension;

    tx.query_row(
        SELECT_ORDER_SQL,
        params![order_id as i64],
        super::Database::build_order_from_row,
    )
    .optional()
    .db_context("Failed to load order")?
    .ok_or(TrackerError::OrderNotFound { id: order_id })
}

fn reload_order(tx: &Transaction, order_id: u64) -> Result<Order> {
    tx.query_row(
        SELECT_ORDER_SQL,
        params![order_id as i64],
        super::Database::build_order_from_row,
    )
    .db_context("Failed to re-read order")
}

fn merge_details(order: &mut Order, payload: &StagePayload) -> Result<()> {
    for (field, value) in payload.to_details()? {
        order.details.insert(field, value);
    }
    Ok(())
}

fn persist_stage_state(tx: &Transaction, order: &Order, now: &str) -> Result<()> {
    tx.execute(
        UPDATE_STAGES_SQL,
        params![
            order.current_stage.map(|key| key.as_str()),
            serde_json::to_string(&order.stages)?,
            serde_json::to_string(&order.completed_at)?,
            i64::from(order.zero_amount_estimate),
            serde_json::to_string(&order.details)?,
            now,
            order.id as i64
        ],
    )
    .db_context("Failed to update order stages")?;
    Ok(())
}

impl super::Database {
    /// Completes the current stage of an order.
    ///
    /// Marks the stage completed, unlocks the next stage (or clears the
    /// current pointer after the final stage), stamps the completion
    /// timestamp, and merges the stage's business fields. Re-submitting an
    /// already-completed stage degrades to a field-only update that leaves
    /// the stage map and current pointer untouched.
    pub fn complete_stage(&mut self, order_id: u64, payload: &StagePayload) -> Result<Order> {
        let stage = payload.stage();
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let mut order = load_order(&tx, order_id)?;
        let now = Timestamp::now();
        let now_str = now.to_string();

        if order.stages.is_completed(stage) {
            // Field-only re-submission; statuses are monotonic.
            merge_details(&mut order, payload)?;
            tx.execute(
                UPDATE_DETAILS_SQL,
                params![serde_json::to_string(&order.details)?, &now_str, order.id as i64],
            )
            .db_context("Failed to update order details")?;
        } else {
            if order.current_stage != Some(stage) {
                return Err(TrackerError::OutOfOrder {
                    stage,
                    current: order.current_stage,
                });
            }
            if let Some(previous) = stage.previous() {
                if !order.stages.is_completed(previous) {
                    return Err(TrackerError::OutOfOrder {
                        stage,
                        current: order.current_stage,
                    });
                }
            }

            order.stages.set(stage, StageStatus::Completed);
            let next = stage.next();
            if let Some(next) = next {
                order.stages.set(next, StageStatus::Pending);
            }
            order.current_stage = next;
            order.completed_at.insert(stage, now);
            merge_details(&mut order, payload)?;
            persist_stage_state(&tx, &order, &now_str)?;
        }

        let updated = reload_order(&tx, order_id)?;
        tx.commit().db_context("Failed to commit transaction")?;
        Ok(updated)
    }

    /// Applies the zero-amount estimate shortcut.
    ///
    /// One transition marks both estimate stages completed and opens the
    /// planner stage; the intermediate estimate-paid-is-current state is
    /// never materialized.
    pub fn skip_zero_amount_estimate(&mut self, order_id: u64) -> Result<Order> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let mut order = load_order(&tx, order_id)?;
        if order.current_stage != Some(StageKey::EstimateGenerated) {
            return Err(TrackerError::OutOfOrder {
                stage: StageKey::EstimateGenerated,
                current: order.current_stage,
            });
        }

        let now = Timestamp::now();
        let now_str = now.to_string();

        order.stages.set(StageKey::EstimateGenerated, StageStatus::Completed);
        order.stages.set(StageKey::EstimatePaid, StageStatus::Completed);
        order.stages.set(StageKey::Planner, StageStatus::Pending);
        order.current_stage = Some(StageKey::Planner);
        order.completed_at.insert(StageKey::EstimateGenerated, now);
        order.completed_at.insert(StageKey::EstimatePaid, now);
        order.zero_amount_estimate = true;
        persist_stage_state(&tx, &order, &now_str)?;

        let updated = reload_order(&tx, order_id)?;
        tx.commit().db_context("Failed to commit transaction")?;
        Ok(updated)
    }

    /// Updates a stage's business fields without touching the stage map.
    ///
    /// The explicit "update" action for a current or completed stage;
    /// locked stages reject with `OutOfOrder`.
    pub fn update_stage_fields(&mut self, order_id: u64, payload: &StagePayload) -> Result<Order> {
        let stage = payload.stage();
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let mut order = load_order(&tx, order_id)?;
        if order.stages.status_of(stage) == StageStatus::Locked {
            return Err(TrackerError::OutOfOrder {
                stage,
                current: order.current_stage,
            });
        }

        let now_str = Timestamp::now().to_string();
        merge_details(&mut order, payload)?;
        tx.execute(
            UPDATE_DETAILS_SQL,
            params![serde_json::to_string(&order.details)?, &now_str, order.id as i64],
        )
        .db_context("Failed to update order details")?;

        let updated = reload_order(&tx, order_id)?;
        tx.commit().db_context("Failed to commit transaction")?;
        Ok(updated)
    }
}
