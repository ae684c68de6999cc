//! Prelude for wdctl-table.
//!
//! This module re-exports the most commonly used types for convenient importing.

pub use crate::column::{ColumnFlags, ColumnSpec, DataKind, WidthHint};
pub use crate::error::{TableError, TableResult};
pub use crate::table::{OutputMode, Row, Table, TableOptions};
