//! Warehouse queries backing the manager-lookup collaborator.

use rusqlite::{params, OptionalExtension};

use crate::{
    error::{DatabaseResultExt, Result},
    models::Warehouse,
    params::AddWarehouse,
};

const INSERT_WAREHOUSE_SQL: &str = "INSERT INTO warehouses (name, manager) VALUES (?1, ?2)";
const SELECT_WAREHOUSES_SQL: &str = "SELECT id, name, manager FROM warehouses ORDER BY id";
const SELECT_MANAGER_SQL: &str = "SELECT manager FROM warehouses WHERE id = ?1";

impl super::Database {
    /// Registers a warehouse with its managing user.
    pub fn add_warehouse(&mut self, warehouse: &AddWarehouse) -> Result<Warehouse> {
        self.connection
            .execute(
                INSERT_WAREHOUSE_SQL,
                params![&warehouse.name, &warehouse.manager],
            )
            .db_context("Failed to insert warehouse")?;

        Ok(Warehouse {
            id: self.connection.last_insert_rowid(),
            name: warehouse.name.clone(),
            manager: warehouse.manager.clone(),
        })
    }

    /// Lists all registered warehouses.
    pub fn list_warehouses(&self) -> Result<Vec<Warehouse>> {
        let mut stmt = self
            .connection
            .prepare(SELECT_WAREHOUSES_SQL)
            .db_context("Failed to prepare query")?;

        let warehouses = stmt
            .query_map([], |row| {
                Ok(Warehouse {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    manager: row.get(2)?,
                })
            })
            .db_context("Failed to query warehouses")?
            .collect::<std::result::Result<Vec<_>, _>>()
            .db_context("Failed to fetch warehouses")?;

        Ok(warehouses)
    }

    /// The manager of a warehouse, if the warehouse exists.
    pub fn warehouse_manager(&self, warehouse_id: i64) -> Result<Option<String>> {
        self.connection
            .query_row(SELECT_MANAGER_SQL, params![warehouse_id], |row| row.get(0))
            .optional()
            .db_context("Failed to query warehouse manager")
    }
}
