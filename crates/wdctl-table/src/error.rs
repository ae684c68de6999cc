//! Error types for table construction and rendering.

use thiserror::Error;

/// Errors that can occur while filling or printing a table.
#[derive(Debug, Error)]
pub enum TableError {
    /// A row was added before any column was defined.
    #[error("failed to initialize output table: no columns defined")]
    NoColumns,

    /// Cell data was set for a column the table does not have.
    #[error("column {column} out of range (table has {columns} columns)")]
    ColumnOutOfRange {
        /// Requested column index
        column: usize,
        /// Number of defined columns
        columns: usize,
    },

    /// Writing the rendered table failed.
    #[error("failed to write table: {0}")]
    Io(#[from] std::io::Error),

    /// JSON encoding failed.
    #[error("failed to encode table as JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized `Result` type for table operations.
pub type TableResult<T> = Result<T, TableError>;
