//! Error types for wdctl-core.

use thiserror::Error;
use wdctl_table::TableError;

/// Errors raised while parsing the user's selection or printing a report.
#[derive(Debug, Error)]
pub enum CoreError {
    /// One or more `--flags` names are not in the flag catalog.
    #[error("unknown flag: {}", .0.join(", "))]
    UnknownFlag(Vec<String>),

    /// One or more `--output` names are not in the column catalog.
    #[error("unknown column: {}", .0.join(", "))]
    UnknownColumn(Vec<String>),

    /// More columns were requested than the catalog holds.
    #[error("too many columns: {got} given, at most {max} allowed")]
    TooManyColumns {
        /// Catalog size
        max: usize,
        /// Number of names given
        got: usize,
    },

    /// A comma separated list has an empty entry.
    #[error("empty entry in list \"{0}\"")]
    EmptyListItem(String),

    /// Table construction or rendering failed.
    #[error(transparent)]
    Table(#[from] TableError),

    /// Writing to the output stream failed.
    #[error("failed to write output: {0}")]
    Io(#[from] std::io::Error),

    /// JSON encoding failed.
    #[error("failed to encode JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized `Result` type for wdctl-core.
pub type CoreResult<T> = Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            CoreError::UnknownFlag(vec!["CARD".into()]).to_string(),
            "unknown flag: CARD"
        );
        assert_eq!(
            CoreError::UnknownColumn(vec!["a".into(), "b".into()]).to_string(),
            "unknown column: a, b"
        );
        assert_eq!(
            CoreError::TooManyColumns { max: 4, got: 5 }.to_string(),
            "too many columns: 5 given, at most 4 allowed"
        );
    }
}
