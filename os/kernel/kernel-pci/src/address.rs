//! # PCI function addresses
//!
//! A [`PciAddress`] names one configuration-space function by bus, slot
//! (device) and function number. It also knows the two encodings the
//! transports need:
//!
//! ```text
//! Legacy CAM index (written to 0xCF8 or an index register):
//!  31  30      24 23     16 15    11 10   8 7        2 1 0
//! +---+----------+---------+--------+------+----------+---+
//! | E | reserved |   bus   |  slot  | func | register | 0 |
//! +---+----------+---------+--------+------+----------+---+
//!
//! ECAM byte offset (added to the ECAM window base):
//!  27     20 19    15 14   12 11            2 1 0
//! +---------+--------+------+---------------+---+
//! |   bus   |  slot  | func |   register    | 0 |
//! +---------+--------+------+---------------+---+
//! ```

use core::fmt;

/// Highest slot (device) number on a bus.
pub const MAX_SLOT: u8 = 31;

/// Highest function number within a slot.
pub const MAX_FUNCTION: u8 = 7;

/// Bus / slot / function triple. Immutable value type.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct PciAddress {
    bus: u8,
    slot: u8,
    func: u8,
}

impl PciAddress {
    /// Enable bit of the legacy configuration address register.
    const CAM_ENABLE: u32 = 1 << 31;

    /// # Panics
    /// If `slot > 31` or `func > 7`.
    #[must_use]
    pub const fn new(bus: u8, slot: u8, func: u8) -> Self {
        assert!(slot <= MAX_SLOT, "PCI slot out of range");
        assert!(func <= MAX_FUNCTION, "PCI function out of range");
        Self { bus, slot, func }
    }

    /// Non-panicking variant of [`PciAddress::new`].
    #[must_use]
    pub const fn try_new(bus: u8, slot: u8, func: u8) -> Option<Self> {
        if slot <= MAX_SLOT && func <= MAX_FUNCTION {
            Some(Self { bus, slot, func })
        } else {
            None
        }
    }

    #[must_use]
    pub const fn bus(&self) -> u8 {
        self.bus
    }

    #[must_use]
    pub const fn slot(&self) -> u8 {
        self.slot
    }

    #[must_use]
    pub const fn func(&self) -> u8 {
        self.func
    }

    /// Same slot, other function.
    #[must_use]
    pub const fn with_func(self, func: u8) -> Self {
        Self::new(self.bus, self.slot, func)
    }

    /// Legacy 0xCF8-style configuration index for the dword containing `offset`.
    #[must_use]
    pub const fn cam_index(&self, offset: u16) -> u32 {
        Self::CAM_ENABLE
            | ((self.bus as u32) << 16)
            | ((self.slot as u32) << 11)
            | ((self.func as u32) << 8)
            | (offset as u32 & 0xFC)
    }

    /// ECAM byte offset of the dword containing `offset`.
    #[must_use]
    pub const fn ecam_offset(&self, offset: u16) -> usize {
        ((self.bus as usize) << 20)
            | ((self.slot as usize) << 15)
            | ((self.func as usize) << 12)
            | (offset as usize & 0xFFC)
    }
}

impl fmt::Display for PciAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02x}:{:02x}.{}", self.bus, self.slot, self.func)
    }
}
