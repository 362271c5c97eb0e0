//! Error types for the order pipeline tracker.

use std::path::PathBuf;

use thiserror::Error;

use crate::models::StageKey;

/// Comprehensive error type for all tracker operations.
#[derive(Error, Debug)]
pub enum TrackerError {
    /// Database connection or query errors. The in-memory order is left
    /// unchanged; the same submission may be retried safely.
    #[error("Database error: {message}")]
    Database {
        message: String,
        #[source]
        source: rusqlite::Error,
    },
    /// Order not found for the given ID
    #[error("Order with ID {id} not found")]
    OrderNotFound { id: u64 },
    /// A required business field is missing or fails a field-level check.
    /// Resolved locally before any database write is attempted.
    #[error("Invalid value for field '{field}': {reason}")]
    Validation { field: String, reason: String },
    /// Attempt to complete a stage that is not the current stage
    #[error("Stage '{stage}' is not the current stage (current: {})", display_current(.current))]
    OutOfOrder {
        stage: StageKey,
        current: Option<StageKey>,
    },
    /// Actor lacks the role required for a gated stage
    #[error("Actor '{actor}' is not permitted to complete stage '{stage}'")]
    Permission { actor: String, stage: StageKey },
    /// Stage key string did not match any stage in the pipeline
    #[error("Unknown stage: {0}")]
    UnknownStage(String),
    /// File system operation errors
    #[error("File system error at path '{path}': {source}")]
    FileSystem {
        path: PathBuf,
        source: std::io::Error,
    },
    /// XDG directory specification errors
    #[error("XDG directory error: {0}")]
    XdgDirectory(String),
    /// Serialization/deserialization errors
    #[error("Serialization error: {source}")]
    Serialization {
        #[from]
        source: serde_json::Error,
    },
    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

fn display_current(current: &Option<StageKey>) -> &'static str {
    match current {
        Some(key) => key.as_str(),
        None => "pipeline complete",
    }
}

impl TrackerError {
    /// Creates a validation error for a named field.
    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Creates a database error with additional context.
    pub fn database_error(message: &str, source: rusqlite::Error) -> Self {
        Self::Database {
            message: message.into(),
            source,
        }
    }
}

/// Specialized extension trait for database-related Results.
pub trait DatabaseResultExt<T> {
    /// Map database errors with a message.
    fn db_context(self, message: &str) -> Result<T>;
}

impl<T> DatabaseResultExt<T> for std::result::Result<T, rusqlite::Error> {
    fn db_context(self, message: &str) -> Result<T> {
        self.map_err(|e| TrackerError::database_error(message, e))
    }
}

/// Result type alias for tracker operations
pub type Result<T> = std::result::Result<T, TrackerError>;
