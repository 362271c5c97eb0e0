//! Builder for creating and configuring Tracker instances.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::task;

use super::Tracker;
use crate::{
    db::Database,
    directory::{DbWarehouseDirectory, WarehouseDirectory},
    error::{Result, TrackerError},
};

/// Builder for creating and configuring Tracker instances.
#[derive(Default)]
pub struct TrackerBuilder {
    database_path: Option<PathBuf>,
    directory: Option<Arc<dyn WarehouseDirectory>>,
}

impl TrackerBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a custom database file path.
    ///
    /// If not specified, uses XDG Base Directory specification:
    /// `$XDG_DATA_HOME/solarflow/orders.db` or
    /// `~/.local/share/solarflow/orders.db`
    pub fn with_database_path<P: AsRef<Path>>(mut self, path: Option<P>) -> Self {
        if let Some(path) = path {
            self.database_path = Some(path.as_ref().to_path_buf());
        }
        self
    }

    /// Substitutes the warehouse directory used by the installation
    /// permission gate. Defaults to the database-backed directory.
    pub fn with_warehouse_directory(mut self, directory: Arc<dyn WarehouseDirectory>) -> Self {
        self.directory = Some(directory);
        self
    }

    /// Builds the configured tracker instance.
    ///
    /// # Errors
    ///
    /// Returns `TrackerError::FileSystem` if the database path is invalid
    /// Returns `TrackerError::Database` if database initialization fails
    pub async fn build(self) -> Result<Tracker> {
        let db_path = if let Some(path) = self.database_path {
            path
        } else {
            Self::default_database_path()?
        };

        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| TrackerError::FileSystem {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let db_path_clone = db_path.clone();
        task::spawn_blocking(move || {
            let _db = Database::new(&db_path_clone)?;
            Ok::<(), TrackerError>(())
        })
        .await
        .map_err(|e| TrackerError::Configuration {
            message: format!("Task join error: {e}"),
        })??;

        let directory = self
            .directory
            .unwrap_or_else(|| Arc::new(DbWarehouseDirectory::new(db_path.clone())));

        Ok(Tracker::new(db_path, directory))
    }

    /// Returns the default database path following XDG Base Directory
    /// specification.
    fn default_database_path() -> Result<PathBuf> {
        xdg::BaseDirectories::with_prefix("solarflow")
            .place_data_file("orders.db")
            .map_err(|e| TrackerError::XdgDirectory(e.to_string()))
    }
}
