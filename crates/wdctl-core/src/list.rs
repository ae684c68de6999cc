//! Comma separated name lists resolved against a catalog.
//!
//! Both parsers look up every entry before failing, so all unknown names
//! of a list are reported together.

use crate::error::{CoreError, CoreResult};

fn split(list: &str) -> CoreResult<Vec<&str>> {
    let items: Vec<&str> = list.split(',').map(str::trim).collect();
    if items.iter().any(|item| item.is_empty()) {
        return Err(CoreError::EmptyListItem(list.to_string()));
    }
    Ok(items)
}

/// OR together the bits of every name in `list`.
///
/// An empty list yields an empty mask.
///
/// # Errors
///
/// Returns the error built by `unknown` from every name `resolve` rejects,
/// or [`CoreError::EmptyListItem`] for an empty entry.
pub fn parse_bitmask(
    list: &str,
    resolve: impl Fn(&str) -> Option<u32>,
    unknown: impl FnOnce(Vec<String>) -> CoreError,
) -> CoreResult<u32> {
    let mut mask = 0u32;
    let mut rejected = Vec::new();
    if list.trim().is_empty() {
        return Ok(mask);
    }

    for name in split(list)? {
        match resolve(name) {
            Some(bit) => mask |= bit,
            None => rejected.push(name.to_string()),
        }
    }

    if rejected.is_empty() {
        Ok(mask)
    } else {
        Err(unknown(rejected))
    }
}

/// Resolve every name in `list` to an id, keeping order and duplicates.
///
/// # Errors
///
/// Returns [`CoreError::TooManyColumns`] when the list holds more than `max`
/// entries, the error built by `unknown` for unresolved names, or
/// [`CoreError::EmptyListItem`] for an empty entry.
pub fn parse_id_array<T>(
    list: &str,
    max: usize,
    resolve: impl Fn(&str) -> Option<T>,
    unknown: impl FnOnce(Vec<String>) -> CoreError,
) -> CoreResult<Vec<T>> {
    let names = split(list)?;
    if names.len() > max {
        return Err(CoreError::TooManyColumns {
            max,
            got: names.len(),
        });
    }

    let mut ids = Vec::with_capacity(names.len());
    let mut rejected = Vec::new();
    for name in names {
        match resolve(name) {
            Some(id) => ids.push(id),
            None => rejected.push(name.to_string()),
        }
    }

    if rejected.is_empty() {
        Ok(ids)
    } else {
        Err(unknown(rejected))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type TestResult = Result<(), Box<dyn std::error::Error>>;

    fn digit(name: &str) -> Option<u32> {
        name.parse::<u32>().ok().filter(|n| *n < 8).map(|n| 1 << n)
    }

    #[test]
    fn test_bitmask_ors_bits() -> TestResult {
        assert_eq!(parse_bitmask("0,2", digit, CoreError::UnknownFlag)?, 0b101);
        assert_eq!(parse_bitmask("3,3", digit, CoreError::UnknownFlag)?, 0b1000);
        Ok(())
    }

    #[test]
    fn test_bitmask_reports_every_unknown_name() -> TestResult {
        match parse_bitmask("0,x,9", digit, CoreError::UnknownFlag) {
            Err(CoreError::UnknownFlag(names)) => assert_eq!(names, vec!["x", "9"]),
            other => return Err(format!("expected UnknownFlag, got {other:?}").into()),
        }
        Ok(())
    }

    #[test]
    fn test_empty_entry_is_rejected() {
        assert!(matches!(
            parse_bitmask("0,,1", digit, CoreError::UnknownFlag),
            Err(CoreError::EmptyListItem(_))
        ));
        assert!(matches!(
            parse_id_array("", 4, digit, CoreError::UnknownColumn),
            Err(CoreError::EmptyListItem(_))
        ));
    }

    #[test]
    fn test_empty_bitmask_list_is_empty_mask() -> TestResult {
        assert_eq!(parse_bitmask("", digit, CoreError::UnknownFlag)?, 0);
        assert_eq!(parse_bitmask("  ", digit, CoreError::UnknownFlag)?, 0);
        Ok(())
    }

    #[test]
    fn test_id_array_keeps_order_and_duplicates() -> TestResult {
        let ids = parse_id_array("2,0,2", 4, digit, CoreError::UnknownColumn)?;
        assert_eq!(ids, vec![4, 1, 4]);
        Ok(())
    }

    #[test]
    fn test_id_array_bounded() {
        assert!(matches!(
            parse_id_array("0,1,2,3,4", 4, digit, CoreError::UnknownColumn),
            Err(CoreError::TooManyColumns { max: 4, got: 5 })
        ));
    }
}
