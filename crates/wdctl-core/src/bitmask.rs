//! Split a device mask into catalog entries and leftover bits.

use crate::flags::FlagDescriptor;

/// Something that stands for a single bit of a mask.
pub trait MaskBit {
    /// The bit value.
    fn bit(&self) -> u32;
}

impl MaskBit for u32 {
    fn bit(&self) -> u32 {
        *self
    }
}

impl MaskBit for FlagDescriptor {
    fn bit(&self) -> u32 {
        self.bit
    }
}

/// Result of [`classify`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classified<'a, T> {
    /// Catalog entries whose bit is set, in catalog order.
    pub recognized: Vec<&'a T>,
    /// Bits set in the mask that no catalog entry claims.
    pub unknown: u32,
}

/// Walk `catalog` in order, collecting the entries set in `mask` and
/// clearing every catalog bit from a working copy of it.
pub fn classify<T: MaskBit>(mask: u32, catalog: &[T]) -> Classified<'_, T> {
    let mut remaining = mask;
    let mut recognized = Vec::new();

    for entry in catalog {
        let bit = entry.bit();
        if mask & bit != 0 {
            recognized.push(entry);
        }
        remaining &= !bit;
    }

    Classified {
        recognized,
        unknown: remaining,
    }
}
