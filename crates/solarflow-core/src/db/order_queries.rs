//! Order CRUD operations and queries.

use std::collections::BTreeMap;

use jiff::Timestamp;
use rusqlite::{params, types::Type, OptionalExtension};

use crate::{
    error::{DatabaseResultExt, Result, TrackerError},
    models::{CompletionFilter, Order, OrderFilter, OrderSummary, StageKey, StageMap, StageStatus},
    params::CreateOrder,
};

// Optimized SQL queries as const strings for compile-time optimization
const INSERT_ORDER_SQL: &str = "INSERT INTO orders (customer, phone, email, gstin, site_address, current_stage, stages, completed_at, zero_amount_estimate, details, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)";
pub(super) const SELECT_ORDER_SQL: &str = "SELECT id, customer, phone, email, gstin, site_address, current_stage, stages, completed_at, zero_amount_estimate, details, created_at, updated_at FROM orders WHERE id = ?1";
const SELECT_SUMMARIES_SQL: &str =
    "SELECT id, customer, current_stage, stages, created_at, updated_at FROM orders";

fn json_column_error(index: usize, source: serde_json::Error) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(index, Type::Text, Box::new(source))
}

fn timestamp_column(row: &rusqlite::Row, index: usize) -> rusqlite::Result<Timestamp> {
    row.get::<_, String>(index)?
        .parse::<Timestamp>()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(index, Type::Text, Box::new(e)))
}

fn stage_key_column(row: &rusqlite::Row, index: usize) -> rusqlite::Result<Option<StageKey>> {
    match row.get::<_, Option<String>>(index)? {
        Some(text) => text
            .parse::<StageKey>()
            .map(Some)
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(index, Type::Text, Box::new(e))),
        None => Ok(None),
    }
}

impl super::Database {
    /// Helper function to construct an Order from a database row
    pub(super) fn build_order_from_row(row: &rusqlite::Row) -> rusqlite::Result<Order> {
        let stages: StageMap = serde_json::from_str(&row.get::<_, String>(7)?)
            .map_err(|e| json_column_error(7, e))?;
        let completed_at: BTreeMap<StageKey, Timestamp> =
            serde_json::from_str(&row.get::<_, String>(8)?)
                .map_err(|e| json_column_error(8, e))?;
        let details: serde_json::Map<String, serde_json::Value> =
            serde_json::from_str(&row.get::<_, String>(10)?)
                .map_err(|e| json_column_error(10, e))?;

        Ok(Order {
            id: row.get::<_, i64>(0)? as u64,
            customer: row.get(1)?,
            phone: row.get(2)?,
            email: row.get(3)?,
            gstin: row.get(4)?,
            site_address: row.get(5)?,
            current_stage: stage_key_column(row, 6)?,
            stages,
            completed_at,
            zero_amount_estimate: row.get::<_, i64>(9)? != 0,
            details,
            created_at: timestamp_column(row, 11)?,
            updated_at: timestamp_column(row, 12)?,
        })
    }

    /// Creates a new order with the first pipeline stage pending.
    pub fn create_order(&mut self, order: &CreateOrder) -> Result<Order> {
        let now = Timestamp::now();
        let now_str = now.to_string();

        let mut stages = StageMap::new();
        stages.set(StageKey::FIRST, StageStatus::Pending);
        let stages_json = serde_json::to_string(&stages)?;

        self.connection
            .execute(
                INSERT_ORDER_SQL,
                params![
                    &order.customer,
                    order.phone.as_deref(),
                    order.email.as_deref(),
                    order.gstin.as_deref(),
                    order.site_address.as_deref(),
                    StageKey::FIRST.as_str(),
                    &stages_json,
                    "{}",
                    0i64,
                    "{}",
                    &now_str,
                    &now_str
                ],
            )
            .db_context("Failed to insert order")?;

        let id = self.connection.last_insert_rowid() as u64;

        Ok(Order {
            id,
            customer: order.customer.clone(),
            phone: order.phone.clone(),
            email: order.email.clone(),
            gstin: order.gstin.clone(),
            site_address: order.site_address.clone(),
            current_stage: Some(StageKey::FIRST),
            stages,
            completed_at: BTreeMap::new(),
            zero_amount_estimate: false,
            details: serde_json::Map::new(),
            created_at: now,
            updated_at: now,
        })
    }

    /// Retrieves a single order by its ID.
    pub fn get_order(&self, order_id: u64) -> Result<Option<Order>> {
        let mut stmt = self
            .connection
            .prepare(SELECT_ORDER_SQL)
            .db_context("Failed to prepare query")?;

        let order = stmt
            .query_row(params![order_id as i64], Self::build_order_from_row)
            .optional()
            .map_err(|e| TrackerError::database_error("Failed to get order", e))?;

        Ok(order)
    }

    /// Lists order summaries, optionally filtered by pipeline completion.
    pub fn list_orders(&self, filter: OrderFilter) -> Result<Vec<OrderSummary>> {
        let sql = match filter.completion {
            Some(CompletionFilter::InProgress) => {
                format!("{SELECT_SUMMARIES_SQL} WHERE current_stage IS NOT NULL ORDER BY id")
            }
            Some(CompletionFilter::Completed) => {
                format!("{SELECT_SUMMARIES_SQL} WHERE current_stage IS NULL ORDER BY id")
            }
            None => format!("{SELECT_SUMMARIES_SQL} ORDER BY id"),
        };

        let mut stmt = self
            .connection
            .prepare(&sql)
            .db_context("Failed to prepare query")?;

        let summaries = stmt
            .query_map([], |row| {
                let stages: StageMap = serde_json::from_str(&row.get::<_, String>(3)?)
                    .map_err(|e| json_column_error(3, e))?;
                Ok(OrderSummary {
                    id: row.get::<_, i64>(0)? as u64,
                    customer: row.get(1)?,
                    current_stage: stage_key_column(row, 2)?,
                    completed_stages: stages.completed_count(),
                    created_at: timestamp_column(row, 4)?,
                    updated_at: timestamp_column(row, 5)?,
                })
            })
            .db_context("Failed to query orders")?
            .collect::<std::result::Result<Vec<_>, _>>()
            .db_context("Failed to fetch orders")?;

        Ok(summaries)
    }
}
