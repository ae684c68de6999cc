//! Report column catalog and column selection.

use wdctl_table::{ColumnFlags, ColumnSpec, DataKind, WidthHint};

use crate::error::{CoreError, CoreResult};
use crate::list;

/// Identifier of a report column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnId {
    /// Flag name
    Flag,
    /// Flag description
    Description,
    /// Live status bit
    Status,
    /// Boot status bit
    BootStatus,
}

/// Static description of a report column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnDescriptor {
    /// Column identifier.
    pub id: ColumnId,
    /// Heading, also the name accepted by `--output`.
    pub name: &'static str,
    /// Width hint for the renderer.
    pub hint: WidthHint,
    /// Alignment and truncation.
    pub flags: ColumnFlags,
    /// JSON data kind.
    pub kind: DataKind,
    /// One-line help text.
    pub help: &'static str,
}

impl ColumnDescriptor {
    /// Renderer definition of this column.
    #[must_use]
    pub fn spec(&self) -> ColumnSpec {
        ColumnSpec::new(self.name, self.hint)
            .flags(self.flags)
            .kind(self.kind)
    }
}

/// The column catalog, in default output order.
pub static COLUMNS: [ColumnDescriptor; 4] = [
    ColumnDescriptor {
        id: ColumnId::Flag,
        name: "FLAG",
        hint: WidthHint::Chars(14),
        flags: ColumnFlags::empty(),
        kind: DataKind::Text,
        help: "flag name",
    },
    ColumnDescriptor {
        id: ColumnId::Description,
        name: "DESCRIPTION",
        hint: WidthHint::Percent(10),
        flags: ColumnFlags::TRUNCATE,
        kind: DataKind::Text,
        help: "flag description",
    },
    ColumnDescriptor {
        id: ColumnId::Status,
        name: "STATUS",
        hint: WidthHint::Chars(1),
        flags: ColumnFlags::RIGHT,
        kind: DataKind::Boolean,
        help: "flag status",
    },
    ColumnDescriptor {
        id: ColumnId::BootStatus,
        name: "BOOT-STATUS",
        hint: WidthHint::Chars(1),
        flags: ColumnFlags::RIGHT,
        kind: DataKind::Boolean,
        help: "flag boot status",
    },
];

/// Resolve a column name, ignoring ASCII case. Prefixes do not match.
#[must_use]
pub fn resolve_column_name(name: &str) -> Option<ColumnId> {
    COLUMNS
        .iter()
        .find(|col| col.name.eq_ignore_ascii_case(name))
        .map(|col| col.id)
}

/// Catalog entry of `id`.
#[must_use]
pub fn column_info(id: ColumnId) -> &'static ColumnDescriptor {
    match id {
        ColumnId::Flag => &COLUMNS[0],
        ColumnId::Description => &COLUMNS[1],
        ColumnId::Status => &COLUMNS[2],
        ColumnId::BootStatus => &COLUMNS[3],
    }
}

/// Ordered list of columns to print. Duplicates are allowed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSelection(Vec<ColumnId>);

impl Default for ColumnSelection {
    fn default() -> Self {
        Self(COLUMNS.iter().map(|col| col.id).collect())
    }
}

impl ColumnSelection {
    /// Build a selection from explicit ids.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::TooManyColumns`] when more ids than catalog
    /// entries are given.
    pub fn new(ids: Vec<ColumnId>) -> CoreResult<Self> {
        if ids.len() > COLUMNS.len() {
            return Err(CoreError::TooManyColumns {
                max: COLUMNS.len(),
                got: ids.len(),
            });
        }
        Ok(Self(ids))
    }

    /// Parse a comma separated `--output` list.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::UnknownColumn`] naming every unknown entry,
    /// [`CoreError::TooManyColumns`], or [`CoreError::EmptyListItem`].
    pub fn parse(list: &str) -> CoreResult<Self> {
        list::parse_id_array(
            list,
            COLUMNS.len(),
            resolve_column_name,
            CoreError::UnknownColumn,
        )
        .map(Self)
    }

    /// Selected ids in output order.
    #[must_use]
    pub fn ids(&self) -> &[ColumnId] {
        &self.0
    }

    /// Catalog entries in output order.
    pub fn descriptors(&self) -> impl Iterator<Item = &'static ColumnDescriptor> + '_ {
        self.0.iter().map(|id| column_info(*id))
    }
}
