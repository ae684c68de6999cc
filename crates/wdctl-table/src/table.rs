//! Table model and printers.

use std::io::Write;

use serde_json::{Map, Value};

use crate::column::{ColumnSpec, DataKind};
use crate::error::{TableError, TableResult};
use crate::term::DEFAULT_TERM_WIDTH;
use crate::{escape, layout};

/// Output format of a table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputMode {
    /// Padded, aligned columns.
    #[default]
    Normal,
    /// Unpadded cells separated by one space.
    Raw,
    /// `NAME="value"` pairs.
    Pairs,
    /// A JSON object holding an array of row objects.
    Json,
}

/// Rendering options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableOptions {
    /// Output format.
    pub mode: OutputMode,
    /// Print the heading line (normal and raw modes).
    pub headings: bool,
    /// Terminal width used to fit truncatable columns.
    pub term_width: usize,
    /// Name of the row array in JSON output.
    pub name: String,
}

impl Default for TableOptions {
    fn default() -> Self {
        Self {
            mode: OutputMode::Normal,
            headings: true,
            term_width: DEFAULT_TERM_WIDTH,
            name: String::from("table"),
        }
    }
}

/// One table line. Unset cells print as empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row {
    cells: Vec<Option<String>>,
}

impl Row {
    pub(crate) fn from_cells(cells: Vec<Option<String>>) -> Self {
        Self { cells }
    }

    /// Set the data of column `column`.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::ColumnOutOfRange`] if the table has no such column.
    pub fn set_data(&mut self, column: usize, data: impl Into<String>) -> TableResult<()> {
        let columns = self.cells.len();
        let cell = self
            .cells
            .get_mut(column)
            .ok_or(TableError::ColumnOutOfRange { column, columns })?;
        *cell = Some(data.into());
        Ok(())
    }

    /// Cell data of column `column`, if set.
    #[must_use]
    pub fn data(&self, column: usize) -> Option<&str> {
        self.cells.get(column).and_then(|c| c.as_deref())
    }

    /// All cells in column order, unset cells as `""`.
    pub fn cells(&self) -> impl Iterator<Item = &str> {
        self.cells.iter().map(|c| c.as_deref().unwrap_or(""))
    }
}

/// A table of defined columns and rows.
#[derive(Debug, Clone, Default)]
pub struct Table {
    options: TableOptions,
    columns: Vec<ColumnSpec>,
    rows: Vec<Row>,
}

impl Table {
    /// Create an empty table.
    #[must_use]
    pub fn new(options: TableOptions) -> Self {
        Self {
            options,
            columns: Vec::new(),
            rows: Vec::new(),
        }
    }

    /// Define the next column and return its index.
    pub fn define_column(&mut self, spec: ColumnSpec) -> usize {
        self.columns.push(spec);
        self.columns.len().saturating_sub(1)
    }

    /// Append an empty row and return it for filling.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::NoColumns`] if no column was defined yet.
    pub fn add_row(&mut self) -> TableResult<&mut Row> {
        if self.columns.is_empty() {
            return Err(TableError::NoColumns);
        }
        self.rows
            .push(Row::from_cells(vec![None; self.columns.len()]));
        self.rows.last_mut().ok_or(TableError::NoColumns)
    }

    /// Defined columns.
    #[must_use]
    pub fn columns(&self) -> &[ColumnSpec] {
        &self.columns
    }

    /// Rows added so far.
    #[must_use]
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Rendering options.
    #[must_use]
    pub fn options(&self) -> &TableOptions {
        &self.options
    }

    /// Print the table.
    ///
    /// # Errors
    ///
    /// Returns an error if the table has no columns, if writing fails,
    /// or if JSON encoding fails.
    pub fn print<W: Write>(&self, out: &mut W) -> TableResult<()> {
        if self.columns.is_empty() {
            return Err(TableError::NoColumns);
        }
        match self.options.mode {
            OutputMode::Normal => self.print_normal(out),
            OutputMode::Raw => self.print_raw(out),
            OutputMode::Pairs => self.print_pairs(out),
            OutputMode::Json => self.print_json(out),
        }
    }

    /// Render the table into a `String`.
    ///
    /// # Errors
    ///
    /// See [`Table::print`].
    pub fn render_to_string(&self) -> TableResult<String> {
        let mut buf = Vec::new();
        self.print(&mut buf)?;
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }

    fn print_normal<W: Write>(&self, out: &mut W) -> TableResult<()> {
        let widths = layout::column_widths(
            &self.columns,
            &self.rows,
            self.options.headings,
            self.options.term_width,
        );

        if self.shows_headings() {
            self.print_aligned(out, &widths, self.columns.iter().map(ColumnSpec::name))?;
        }
        for row in &self.rows {
            self.print_aligned(out, &widths, row.cells())?;
        }
        Ok(())
    }

    /// A table without rows prints nothing, not even its heading line.
    fn shows_headings(&self) -> bool {
        self.options.headings && !self.rows.is_empty()
    }

    fn print_aligned<'a, W: Write>(
        &self,
        out: &mut W,
        widths: &[usize],
        cells: impl Iterator<Item = &'a str>,
    ) -> TableResult<()> {
        let last = self.columns.len().saturating_sub(1);
        let mut line = String::new();

        for (idx, ((col, width), data)) in self.columns.iter().zip(widths).zip(cells).enumerate() {
            if idx > 0 {
                line.push(' ');
            }
            let flags = col.column_flags();
            let data = if flags.is_truncate() {
                layout::truncate(data, *width)
            } else {
                data
            };
            let pad = width.saturating_sub(layout::cell_width(data));

            if flags.is_right() {
                line.extend(std::iter::repeat_n(' ', pad));
                line.push_str(data);
            } else {
                line.push_str(data);
                if idx != last {
                    line.extend(std::iter::repeat_n(' ', pad));
                }
            }
        }

        writeln!(out, "{line}")?;
        Ok(())
    }

    fn print_raw<W: Write>(&self, out: &mut W) -> TableResult<()> {
        if self.shows_headings() {
            let names: Vec<String> = self.columns.iter().map(|c| escape::raw(c.name())).collect();
            writeln!(out, "{}", names.join(" "))?;
        }
        for row in &self.rows {
            let cells: Vec<String> = row.cells().map(escape::raw).collect();
            writeln!(out, "{}", cells.join(" "))?;
        }
        Ok(())
    }

    fn print_pairs<W: Write>(&self, out: &mut W) -> TableResult<()> {
        for row in &self.rows {
            let pairs: Vec<String> = self
                .columns
                .iter()
                .zip(row.cells())
                .map(|(col, data)| format!("{}={}", col.name(), escape::quoted(data)))
                .collect();
            writeln!(out, "{}", pairs.join(" "))?;
        }
        Ok(())
    }

    /// Rows as a JSON array of objects keyed by lower-cased column name.
    #[must_use]
    pub fn json_rows(&self) -> Value {
        let rows = self
            .rows
            .iter()
            .map(|row| {
                let object: Map<String, Value> = self
                    .columns
                    .iter()
                    .enumerate()
                    .map(|(idx, col)| {
                        (
                            col.name().to_lowercase(),
                            json_value(col.data_kind(), row.data(idx)),
                        )
                    })
                    .collect();
                Value::Object(object)
            })
            .collect();
        Value::Array(rows)
    }

    fn print_json<W: Write>(&self, out: &mut W) -> TableResult<()> {
        let mut root = Map::new();
        root.insert(self.options.name.clone(), self.json_rows());
        serde_json::to_writer_pretty(&mut *out, &Value::Object(root))?;
        writeln!(out)?;
        Ok(())
    }
}

fn json_value(kind: DataKind, data: Option<&str>) -> Value {
    match (kind, data) {
        (_, None) => Value::Null,
        (DataKind::Boolean, Some("1")) => Value::Bool(true),
        (DataKind::Boolean, Some("0")) => Value::Bool(false),
        (_, Some(s)) => Value::String(s.to_string()),
    }
}
