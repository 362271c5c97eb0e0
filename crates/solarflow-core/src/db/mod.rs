//! Database operations and SQLite management for orders and warehouses.
//!
//! Low-level persistence for the pipeline tracker: connection handling,
//! schema management, and the transactional stage-transition queries. The
//! stage map and merged stage-form fields are stored as JSON columns.

use std::path::Path;

use rusqlite::Connection;

use crate::error::{DatabaseResultExt, Result};

pub mod migrations;
pub mod order_queries;
pub mod stage_queries;
pub mod warehouse_queries;

/// Database connection and operations handler.
pub struct Database {
    connection: Connection,
}

impl Database {
    /// Creates a new database connection and initializes the schema.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let connection = Connection::open(path).db_context("Failed to open database connection")?;

        let db = Self { connection };
        db.initialize_schema()?;
        Ok(db)
    }
}
