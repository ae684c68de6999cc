//! Watchdog capability flag catalog.
//!
//! Bit values follow `<linux/watchdog.h>`. The same bits are used for the
//! supported-options mask reported by `WDIOC_GETSUPPORT` and for the
//! status and boot status masks.

use crate::error::{CoreError, CoreResult};
use crate::list;

/// Reset due to CPU overheat
pub const WDIOF_OVERHEAT: u32 = 0x0001;
/// Fan failed
pub const WDIOF_FANFAULT: u32 = 0x0002;
/// External relay 1
pub const WDIOF_EXTERN1: u32 = 0x0004;
/// External relay 2
pub const WDIOF_EXTERN2: u32 = 0x0008;
/// Power bad/power fault
pub const WDIOF_POWERUNDER: u32 = 0x0010;
/// Card previously reset the CPU
pub const WDIOF_CARDRESET: u32 = 0x0020;
/// Power over voltage
pub const WDIOF_POWEROVER: u32 = 0x0040;
/// Set timeout (in seconds)
pub const WDIOF_SETTIMEOUT: u32 = 0x0080;
/// Supports magic close char
pub const WDIOF_MAGICCLOSE: u32 = 0x0100;
/// Pretimeout (in seconds)
pub const WDIOF_PRETIMEOUT: u32 = 0x0200;
/// Keep alive ping reply
pub const WDIOF_KEEPALIVEPING: u32 = 0x8000;

/// One named capability flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlagDescriptor {
    /// Single-bit mask.
    pub bit: u32,
    /// Canonical upper-case name.
    pub name: &'static str,
    /// Human readable description.
    pub description: &'static str,
}

/// The flag catalog, in output order.
pub static FLAGS: [FlagDescriptor; 11] = [
    FlagDescriptor {
        bit: WDIOF_CARDRESET,
        name: "CARDRESET",
        description: "Card previously reset the CPU",
    },
    FlagDescriptor {
        bit: WDIOF_EXTERN1,
        name: "EXTERN1",
        description: "External relay 1",
    },
    FlagDescriptor {
        bit: WDIOF_EXTERN2,
        name: "EXTERN2",
        description: "External relay 2",
    },
    FlagDescriptor {
        bit: WDIOF_FANFAULT,
        name: "FANFAULT",
        description: "Fan failed",
    },
    FlagDescriptor {
        bit: WDIOF_KEEPALIVEPING,
        name: "KEEPALIVEPING",
        description: "Keep alive ping reply",
    },
    FlagDescriptor {
        bit: WDIOF_MAGICCLOSE,
        name: "MAGICCLOSE",
        description: "Supports magic close char",
    },
    FlagDescriptor {
        bit: WDIOF_OVERHEAT,
        name: "OVERHEAT",
        description: "Reset due to CPU overheat",
    },
    FlagDescriptor {
        bit: WDIOF_POWEROVER,
        name: "POWEROVER",
        description: "Power over voltage",
    },
    FlagDescriptor {
        bit: WDIOF_POWERUNDER,
        name: "POWERUNDER",
        description: "Power bad/power fault",
    },
    FlagDescriptor {
        bit: WDIOF_PRETIMEOUT,
        name: "PRETIMEOUT",
        description: "Pretimeout (in seconds)",
    },
    FlagDescriptor {
        bit: WDIOF_SETTIMEOUT,
        name: "SETTIMEOUT",
        description: "Set timeout (in seconds)",
    },
];

/// Every bit the catalog knows about.
#[must_use]
pub fn known_bits() -> u32 {
    FLAGS.iter().fold(0, |mask, flag| mask | flag.bit)
}

/// Look a flag up by name. The whole name must match, ignoring ASCII case.
#[must_use]
pub fn flag_by_name(name: &str) -> Option<&'static FlagDescriptor> {
    FLAGS
        .iter()
        .find(|flag| flag.name.eq_ignore_ascii_case(name))
}

/// Resolve a flag name to its bit.
#[must_use]
pub fn resolve_flag_name(name: &str) -> Option<u32> {
    flag_by_name(name).map(|flag| flag.bit)
}

/// Restriction on which flags are reported.
///
/// An empty filter restricts nothing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FlagFilter(u32);

impl FlagFilter {
    /// A filter that lets every flag through.
    #[must_use]
    pub const fn all() -> Self {
        Self(0)
    }

    /// A filter restricting output to the bits of `mask`.
    #[must_use]
    pub const fn from_mask(mask: u32) -> Self {
        Self(mask)
    }

    /// Parse a comma separated list of flag names.
    ///
    /// An empty list restricts nothing.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::UnknownFlag`] naming every unknown entry, or
    /// [`CoreError::EmptyListItem`].
    pub fn parse(list: &str) -> CoreResult<Self> {
        list::parse_bitmask(list, resolve_flag_name, CoreError::UnknownFlag).map(Self)
    }

    /// The raw mask; zero when unrestricted.
    #[must_use]
    pub const fn mask(self) -> u32 {
        self.0
    }

    /// Whether the filter restricts anything.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Whether `bit` passes the filter.
    #[must_use]
    pub const fn allows(self, bit: u32) -> bool {
        self.is_empty() || self.0 & bit != 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type TestResult = Result<(), Box<dyn std::error::Error>>;

    #[test]
    fn test_catalog_bits_are_single_and_distinct() {
        let mut seen = 0u32;
        for flag in &FLAGS {
            assert_eq!(flag.bit.count_ones(), 1, "{} is not a single bit", flag.name);
            assert_eq!(seen & flag.bit, 0, "{} reuses a bit", flag.name);
            seen |= flag.bit;
        }
        assert_eq!(seen, known_bits());
    }

    #[test]
    fn test_resolve_is_case_insensitive() {
        assert_eq!(resolve_flag_name("MAGICCLOSE"), Some(WDIOF_MAGICCLOSE));
        assert_eq!(resolve_flag_name("magicclose"), Some(WDIOF_MAGICCLOSE));
        assert_eq!(resolve_flag_name("KeepAlivePing"), Some(WDIOF_KEEPALIVEPING));
    }

    #[test]
    fn test_resolve_rejects_prefix_and_extension() {
        assert_eq!(resolve_flag_name("CARD"), None);
        assert_eq!(resolve_flag_name("CARDRESETX"), None);
        assert_eq!(resolve_flag_name(""), None);
    }

    #[test]
    fn test_filter_parse() -> TestResult {
        let filter = FlagFilter::parse("settimeout,OVERHEAT")?;
        assert_eq!(filter.mask(), WDIOF_SETTIMEOUT | WDIOF_OVERHEAT);
        assert!(filter.allows(WDIOF_OVERHEAT));
        assert!(!filter.allows(WDIOF_FANFAULT));
        Ok(())
    }

    #[test]
    fn test_empty_filter_allows_everything() {
        let filter = FlagFilter::all();
        assert!(filter.is_empty());
        assert!(FLAGS.iter().all(|flag| filter.allows(flag.bit)));
    }

    #[test]
    fn test_filter_parse_empty_list() -> TestResult {
        assert_eq!(FlagFilter::parse("")?, FlagFilter::all());
        Ok(())
    }

    #[test]
    fn test_filter_parse_unknown_names() {
        assert!(matches!(
            FlagFilter::parse("CARD,FANFAULT,bogus"),
            Err(CoreError::UnknownFlag(names)) if names == ["CARD", "bogus"]
        ));
    }
}
