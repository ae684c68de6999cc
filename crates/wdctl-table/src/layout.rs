//! Column width computation for normal mode.

use crate::column::ColumnSpec;
use crate::table::Row;

pub(crate) fn cell_width(data: &str) -> usize {
    data.chars().count()
}

/// Cut `data` to at most `width` chars.
pub(crate) fn truncate(data: &str, width: usize) -> &str {
    match data.char_indices().nth(width) {
        Some((idx, _)) => data.get(..idx).unwrap_or(data),
        None => data,
    }
}

fn total_width(widths: &[usize]) -> usize {
    let separators = widths.len().saturating_sub(1);
    widths
        .iter()
        .fold(separators, |acc, w| acc.saturating_add(*w))
}

/// Natural width of every column, shrunk to fit `term_width` where
/// truncatable columns allow it.
pub(crate) fn column_widths(
    columns: &[ColumnSpec],
    rows: &[Row],
    headings: bool,
    term_width: usize,
) -> Vec<usize> {
    let mut widths: Vec<usize> = columns
        .iter()
        .map(|col| if headings { cell_width(col.name()) } else { 0 })
        .collect();

    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row.cells()) {
            *width = (*width).max(cell_width(cell));
        }
    }

    let total = total_width(&widths);
    if total > term_width {
        let mut overflow = total.saturating_sub(term_width);
        for (width, col) in widths.iter_mut().zip(columns) {
            if overflow == 0 {
                break;
            }
            if !col.column_flags().is_truncate() {
                continue;
            }
            let floor = col.hint().min_width(term_width).max(1);
            let cut = width.saturating_sub(floor).min(overflow);
            *width = width.saturating_sub(cut);
            overflow = overflow.saturating_sub(cut);
        }
    }

    widths
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::column::{ColumnFlags, WidthHint};

    fn row(cells: &[&str]) -> Row {
        Row::from_cells(cells.iter().map(|c| Some((*c).to_string())).collect())
    }

    #[test]
    fn test_truncate_counts_chars() {
        assert_eq!(truncate("watchdog", 5), "watch");
        assert_eq!(truncate("wd", 5), "wd");
        assert_eq!(truncate("äöü", 2), "äö");
    }

    #[test]
    fn test_widths_follow_widest_cell() {
        let columns = [
            ColumnSpec::new("FLAG", WidthHint::Chars(14)),
            ColumnSpec::new("STATUS", WidthHint::Chars(1)),
        ];
        let rows = [row(&["KEEPALIVEPING", "1"]), row(&["FANFAULT", "0"])];
        assert_eq!(column_widths(&columns, &rows, true, 80), vec![13, 6]);
        assert_eq!(column_widths(&columns, &rows, false, 80), vec![13, 1]);
    }

    #[test]
    fn test_truncatable_column_shrinks_to_fit() {
        let columns = [
            ColumnSpec::new("A", WidthHint::Chars(1)),
            ColumnSpec::new("B", WidthHint::Percent(10)).flags(ColumnFlags::TRUNCATE),
        ];
        let rows = [row(&["xxxx", "yyyyyyyyyyyyyyyyyyyy"])];
        // 4 + 1 + 20 = 25 chars on a 20 column terminal
        assert_eq!(column_widths(&columns, &rows, true, 20), vec![4, 15]);
    }

    #[test]
    fn test_shrink_stops_at_hint() {
        let columns = [
            ColumnSpec::new("A", WidthHint::Chars(1)),
            ColumnSpec::new("B", WidthHint::Percent(50)).flags(ColumnFlags::TRUNCATE),
        ];
        let rows = [row(&["xxxxxxxxxx", "yyyyyyyyyyyyyyyyyyyy"])];
        assert_eq!(column_widths(&columns, &rows, true, 20), vec![10, 10]);
    }
}
