//! Flags report: one row per supported, selected flag.

use std::fmt;
use std::io::Write;

use tracing::debug;
use wdctl_table::{Table, TableOptions};

use crate::bitmask::classify;
use crate::columns::{ColumnId, ColumnSelection};
use crate::error::CoreResult;
use crate::flags::{FLAGS, FlagDescriptor, FlagFilter};
use crate::snapshot::WatchdogSnapshot;

/// Non-fatal findings while building a report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportWarning {
    /// The device advertises option bits missing from the flag catalog.
    UnknownFlags {
        /// Device node path
        device: String,
        /// Unrecognized bits
        bits: u32,
    },
}

impl fmt::Display for ReportWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownFlags { device, bits } => {
                write!(f, "{device}: unknown flags 0x{bits:x}")
            }
        }
    }
}

/// A filled flags table plus the warnings raised while filling it.
#[derive(Debug, Clone)]
pub struct Report {
    table: Table,
    warnings: Vec<ReportWarning>,
}

impl Report {
    /// The flags table.
    #[must_use]
    pub fn table(&self) -> &Table {
        &self.table
    }

    /// Warnings to show the user.
    #[must_use]
    pub fn warnings(&self) -> &[ReportWarning] {
        &self.warnings
    }

    /// Take the warnings, dropping the table.
    #[must_use]
    pub fn into_warnings(self) -> Vec<ReportWarning> {
        self.warnings
    }

    /// Print the table.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    pub fn print<W: Write>(&self, out: &mut W) -> CoreResult<()> {
        self.table.print(out)?;
        Ok(())
    }

    /// Render the table into a `String`.
    ///
    /// # Errors
    ///
    /// Returns an error if rendering fails.
    pub fn render(&self) -> CoreResult<String> {
        Ok(self.table.render_to_string()?)
    }
}

fn bool_cell(set: bool) -> &'static str {
    if set { "1" } else { "0" }
}

fn cell(id: ColumnId, flag: &FlagDescriptor, snapshot: &WatchdogSnapshot) -> &'static str {
    match id {
        ColumnId::Flag => flag.name,
        ColumnId::Description => flag.description,
        ColumnId::Status => bool_cell(snapshot.status_set(flag.bit)),
        ColumnId::BootStatus => bool_cell(snapshot.boot_status_set(flag.bit)),
    }
}

/// Catalog flags the device supports and `filter` lets through, in catalog
/// order, plus the supported bits the catalog does not know.
#[must_use]
pub fn reported_flags(
    snapshot: &WatchdogSnapshot,
    filter: FlagFilter,
) -> (Vec<&'static FlagDescriptor>, u32) {
    let classified = classify(snapshot.options, &FLAGS);
    let rows = classified
        .recognized
        .into_iter()
        .filter(|flag| filter.allows(flag.bit))
        .collect();
    (rows, classified.unknown)
}

/// Build the flags table for `snapshot`.
///
/// Columns appear in selection order, rows in flag catalog order.
///
/// # Errors
///
/// Returns an error if the selection is empty or a cell cannot be set.
pub fn build_report(
    snapshot: &WatchdogSnapshot,
    columns: &ColumnSelection,
    filter: FlagFilter,
    options: TableOptions,
) -> CoreResult<Report> {
    let mut table = Table::new(options);
    for col in columns.descriptors() {
        table.define_column(col.spec());
    }

    let (flags, unknown) = reported_flags(snapshot, filter);
    for flag in &flags {
        let row = table.add_row()?;
        for (idx, id) in columns.ids().iter().enumerate() {
            row.set_data(idx, cell(*id, flag, snapshot))?;
        }
    }

    let mut warnings = Vec::new();
    if unknown != 0 {
        warnings.push(ReportWarning::UnknownFlags {
            device: snapshot.device.clone(),
            bits: unknown,
        });
    }

    debug!(
        device = %snapshot.device,
        rows = flags.len(),
        columns = columns.ids().len(),
        "built flags report"
    );

    Ok(Report { table, warnings })
}
