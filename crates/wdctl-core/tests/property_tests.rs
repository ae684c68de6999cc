//! Property-based tests for flag resolution and report invariants.

#![cfg(test)]

use proptest::prelude::*;
use wdctl_core::flags::{flag_by_name, known_bits};
use wdctl_core::prelude::*;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn prop_strict_prefix_never_resolves(idx in 0usize..FLAGS.len(), cut in 1usize..13) {
        let name = FLAGS.get(idx).map_or("OVERHEAT", |flag| flag.name);
        let cut = cut.min(name.len().saturating_sub(1)).max(1);
        let prefix = name.get(..cut).unwrap_or(name);
        prop_assume!(prefix.len() < name.len());
        prop_assert!(flag_by_name(prefix).is_none());
    }

    #[test]
    fn prop_names_resolve_in_any_case(idx in 0usize..FLAGS.len()) {
        if let Some(flag) = FLAGS.get(idx) {
            let lower = flag.name.to_ascii_lowercase();
            prop_assert_eq!(flag_by_name(&lower).map(|f| f.bit), Some(flag.bit));
        }
    }

    #[test]
    fn prop_rows_match_supported_known_bits(options in any::<u32>()) {
        let snapshot = WatchdogSnapshot::new("/dev/watchdog").with_options(options);
        let report = build_report(
            &snapshot,
            &ColumnSelection::default(),
            FlagFilter::all(),
            TableOptions::default(),
        );
        prop_assert!(report.is_ok());
        if let Ok(report) = report {
            let expected = (options & known_bits()).count_ones() as usize;
            prop_assert_eq!(report.table().rows().len(), expected);
            prop_assert_eq!(report.warnings().is_empty(), options & !known_bits() == 0);
        }
    }

    #[test]
    fn prop_filter_never_adds_rows(options in any::<u32>(), filter in any::<u32>()) {
        let snapshot = WatchdogSnapshot::new("/dev/watchdog").with_options(options);
        let report = build_report(
            &snapshot,
            &ColumnSelection::default(),
            FlagFilter::from_mask(filter),
            TableOptions::default(),
        );
        prop_assert!(report.is_ok());
        if let Ok(report) = report {
            let limit = if filter == 0 { options } else { options & filter };
            prop_assert_eq!(
                report.table().rows().len(),
                (limit & known_bits()).count_ones() as usize
            );
        }
    }
}
