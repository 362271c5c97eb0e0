//! Order and warehouse operations for the Tracker.

use tokio::task;

use super::Tracker;
use crate::{
    db::Database,
    error::{Result, TrackerError},
    models::{Order, OrderSummary, Warehouse},
    params::{AddWarehouse, CreateOrder, Id, ListOrders},
    validate,
};

impl Tracker {
    /// Creates a new order for a customer.
    ///
    /// The order starts at the first pipeline stage: the estimate stage is
    /// pending and every later stage is locked. Contact fields are optional
    /// but validated for shape when present.
    pub async fn create_order(&self, params: &CreateOrder) -> Result<Order> {
        validate::require_text("customer", &Some(params.customer.clone()))?;
        validate::check_phone("phone", &params.phone)?;
        validate::check_email("email", &params.email)?;
        validate::check_gstin("gstin", &params.gstin)?;

        let db_path = self.db_path.clone();
        let params = params.clone();

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            db.create_order(&params)
        })
        .await
        .map_err(|e| TrackerError::Configuration {
            message: format!("Task join error: {e}"),
        })?
    }

    /// Retrieves an order by its ID.
    pub async fn get_order(&self, params: &Id) -> Result<Option<Order>> {
        let db_path = self.db_path.clone();
        let order_id = params.id;

        task::spawn_blocking(move || {
            let db = Database::new(&db_path)?;
            db.get_order(order_id)
        })
        .await
        .map_err(|e| TrackerError::Configuration {
            message: format!("Task join error: {e}"),
        })?
    }

    /// Lists order summaries with optional completion filtering.
    pub async fn list_orders(&self, params: &ListOrders) -> Result<Vec<OrderSummary>> {
        let db_path = self.db_path.clone();
        let filter = params.filter;

        task::spawn_blocking(move || {
            let db = Database::new(&db_path)?;
            db.list_orders(filter)
        })
        .await
        .map_err(|e| TrackerError::Configuration {
            message: format!("Task join error: {e}"),
        })?
    }

    /// Registers a warehouse with its managing user.
    pub async fn add_warehouse(&self, params: &AddWarehouse) -> Result<Warehouse> {
        validate::require_text("name", &Some(params.name.clone()))?;
        validate::require_text("manager", &Some(params.manager.clone()))?;

        let db_path = self.db_path.clone();
        let params = params.clone();

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            db.add_warehouse(&params)
        })
        .await
        .map_err(|e| TrackerError::Configuration {
            message: format!("Task join error: {e}"),
        })?
    }

    /// Lists all registered warehouses.
    pub async fn list_warehouses(&self) -> Result<Vec<Warehouse>> {
        let db_path = self.db_path.clone();

        task::spawn_blocking(move || {
            let db = Database::new(&db_path)?;
            db.list_warehouses()
        })
        .await
        .map_err(|e| TrackerError::Configuration {
            message: format!("Task join error: {e}"),
        })?
    }
}
