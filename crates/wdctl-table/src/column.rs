//! Column definitions.

use bitflags::bitflags;

/// Width hint of a column.
///
/// The hint is a lower bound used only when the table does not fit the
/// terminal and truncatable columns have to give up space.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidthHint {
    /// Fixed number of characters.
    Chars(usize),
    /// Percentage of the terminal width.
    Percent(u16),
}

impl WidthHint {
    /// Smallest width, in chars, this hint allows on a terminal of
    /// `term_width` columns.
    #[must_use]
    pub fn min_width(self, term_width: usize) -> usize {
        match self {
            Self::Chars(n) => n,
            Self::Percent(p) => term_width.saturating_mul(usize::from(p)) / 100,
        }
    }
}

bitflags! {
    /// Alignment and truncation flags of a column.
    #[repr(transparent)]
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ColumnFlags: u8 {
        /// Cells may be cut to make the table fit the terminal.
        const TRUNCATE = 0b0000_0001;

        /// Cells are right aligned.
        const RIGHT    = 0b0000_0010;
    }
}

impl ColumnFlags {
    /// Whether the column may be truncated.
    #[must_use]
    pub const fn is_truncate(self) -> bool {
        self.contains(Self::TRUNCATE)
    }

    /// Whether the column is right aligned.
    #[must_use]
    pub const fn is_right(self) -> bool {
        self.contains(Self::RIGHT)
    }
}

/// How cell data is typed in JSON output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DataKind {
    /// Emitted as a JSON string.
    #[default]
    Text,
    /// `"1"` and `"0"` are emitted as JSON booleans.
    Boolean,
}

/// Definition of one table column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSpec {
    name: String,
    hint: WidthHint,
    flags: ColumnFlags,
    kind: DataKind,
}

impl ColumnSpec {
    /// Create a left aligned text column.
    #[must_use]
    pub fn new(name: impl Into<String>, hint: WidthHint) -> Self {
        Self {
            name: name.into(),
            hint,
            flags: ColumnFlags::empty(),
            kind: DataKind::Text,
        }
    }

    /// Set alignment and truncation flags.
    #[must_use]
    pub fn flags(mut self, flags: ColumnFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Set the JSON data kind.
    #[must_use]
    pub fn kind(mut self, kind: DataKind) -> Self {
        self.kind = kind;
        self
    }

    /// Column heading.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Width hint.
    #[must_use]
    pub fn hint(&self) -> WidthHint {
        self.hint
    }

    /// Alignment and truncation flags.
    #[must_use]
    pub fn column_flags(&self) -> ColumnFlags {
        self.flags
    }

    /// JSON data kind.
    #[must_use]
    pub fn data_kind(&self) -> DataKind {
        self.kind
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percent_hint_scales_with_terminal() {
        assert_eq!(WidthHint::Percent(10).min_width(80), 8);
        assert_eq!(WidthHint::Percent(10).min_width(5), 0);
        assert_eq!(WidthHint::Chars(14).min_width(5), 14);
    }

    #[test]
    fn test_flags_combine() {
        let flags = ColumnFlags::TRUNCATE | ColumnFlags::RIGHT;
        assert!(flags.is_truncate());
        assert!(flags.is_right());
        assert!(!ColumnFlags::empty().is_truncate());
        assert!(!ColumnFlags::empty().is_right());
    }

    #[test]
    fn test_builder_sets_fields() {
        let spec = ColumnSpec::new("STATUS", WidthHint::Chars(1))
            .flags(ColumnFlags::RIGHT)
            .kind(DataKind::Boolean);
        assert_eq!(spec.name(), "STATUS");
        assert_eq!(spec.hint(), WidthHint::Chars(1));
        assert!(spec.column_flags().is_right());
        assert_eq!(spec.data_kind(), DataKind::Boolean);
    }
}
