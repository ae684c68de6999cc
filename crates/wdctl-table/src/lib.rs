//! # wdctl-table
//!
//! A small table renderer driven by column definitions and row data.
//!
//! Callers describe each column once (name, width hint, alignment and
//! truncation flags, data kind), append rows, and print the table in one of
//! four modes:
//!
//! - **Normal**: space separated, padded columns with an optional heading line
//! - **Raw**: unpadded, single-space separated, whitespace escaped
//! - **Pairs**: `NAME="value"` per cell, one line per row
//! - **JSON**: `{"<table>": [{"<column>": value, ...}]}`
//!
//! ## Example
//!
//! ```rust
//! use wdctl_table::prelude::*;
//!
//! let mut table = Table::new(TableOptions::default());
//! table.define_column(ColumnSpec::new("NAME", WidthHint::Chars(10)));
//! table.define_column(ColumnSpec::new("ON", WidthHint::Chars(1)).flags(ColumnFlags::RIGHT));
//!
//! let row = table.add_row()?;
//! row.set_data(0, "fan")?;
//! row.set_data(1, "1")?;
//!
//! assert_eq!(table.render_to_string()?, "NAME ON\nfan   1\n");
//! # Ok::<(), wdctl_table::TableError>(())
//! ```

#![deny(clippy::unwrap_used)]
#![deny(missing_docs)]

pub mod column;
pub mod error;
mod escape;
mod layout;
pub mod prelude;
pub mod table;
pub mod term;

pub use column::{ColumnFlags, ColumnSpec, DataKind, WidthHint};
pub use error::{TableError, TableResult};
pub use table::{OutputMode, Row, Table, TableOptions};
pub use term::terminal_width;
