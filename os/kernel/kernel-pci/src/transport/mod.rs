//! # Configuration-space transports
//!
//! A transport moves aligned 32-bit words between the CPU and one function's
//! configuration space. Everything narrower is built on top in
//! [`ConfigAccess`], so a transport only implements three methods.
//!
//! | Transport       | Mechanism                                  | Typical platform       |
//! |-----------------|--------------------------------------------|------------------------|
//! | [`PortIo`]      | I/O ports `0xCF8` (index) / `0xCFC` (data) | PC / x86               |
//! | [`Ecam`]        | flat memory window, one page per function  | QEMU `virt`, PCIe      |
//! | [`IndexedIo`]   | memory-mapped index and data registers     | SoC host bridges       |
//!
//! Each transport also reports the physical window that memory BARs are
//! carved out of. Index-then-data transports are not atomic; the `&mut self`
//! receivers make the single owner of a transport the only one driving it.

mod ecam;
mod indexed_io;
#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
mod port_io;

pub use ecam::Ecam;
pub use indexed_io::IndexedIo;
#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
pub use port_io::PortIo;

use crate::{MmioRange, PciAddress};

/// Raw dword access to configuration space.
pub trait ConfigSpace {
    /// Read the dword containing `offset`. The low two bits of `offset` are
    /// ignored. Absent functions read as all ones.
    fn read_dword(&mut self, addr: PciAddress, offset: u16) -> u32;

    /// Write the dword containing `offset`.
    fn write_dword(&mut self, addr: PciAddress, offset: u16, value: u32);

    /// Physical window memory BARs are assigned from.
    fn mmio_range(&self) -> MmioRange;
}

impl<T: ConfigSpace + ?Sized> ConfigSpace for &mut T {
    fn read_dword(&mut self, addr: PciAddress, offset: u16) -> u32 {
        (**self).read_dword(addr, offset)
    }

    fn write_dword(&mut self, addr: PciAddress, offset: u16, value: u32) {
        (**self).write_dword(addr, offset, value);
    }

    fn mmio_range(&self) -> MmioRange {
        (**self).mmio_range()
    }
}

/// Width of a configuration access.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
#[repr(u8)]
pub enum AccessWidth {
    Byte = 1,
    Word = 2,
    Dword = 4,
}

impl AccessWidth {
    /// Anything other than 1, 2 or 4 yields `None`.
    #[must_use]
    pub const fn from_bytes(bytes: usize) -> Option<Self> {
        match bytes {
            1 => Some(Self::Byte),
            2 => Some(Self::Word),
            4 => Some(Self::Dword),
            _ => None,
        }
    }

    #[must_use]
    pub const fn bytes(self) -> u16 {
        self as u16
    }

    #[must_use]
    pub const fn mask(self) -> u32 {
        match self {
            Self::Byte => 0xFF,
            Self::Word => 0xFFFF,
            Self::Dword => 0xFFFF_FFFF,
        }
    }
}

/// Sized reads and writes on top of [`ConfigSpace`].
///
/// Every call touches hardware; nothing is cached. Sub-dword writes are
/// read-modify-write of the containing dword, so the neighbouring bytes are
/// written back with whatever was just read.
pub trait ConfigAccess: ConfigSpace {
    /// Read `width` bytes at `offset`, zero-extended.
    ///
    /// # Panics
    /// If `offset` is not a multiple of the width.
    fn read(&mut self, addr: PciAddress, width: AccessWidth, offset: u16) -> u32 {
        assert_aligned(width, offset);
        let shift = u32::from(offset & 3) * 8;
        (self.read_dword(addr, offset) >> shift) & width.mask()
    }

    /// Write the low `width` bytes of `value` at `offset`.
    ///
    /// # Panics
    /// If `offset` is not a multiple of the width.
    fn write(&mut self, addr: PciAddress, width: AccessWidth, offset: u16, value: u32) {
        assert_aligned(width, offset);
        if width == AccessWidth::Dword {
            self.write_dword(addr, offset, value);
            return;
        }

        let shift = u32::from(offset & 3) * 8;
        let mask = width.mask() << shift;
        let current = self.read_dword(addr, offset);
        let merged = (current & !mask) | ((value << shift) & mask);
        self.write_dword(addr, offset, merged);
    }

    #[allow(clippy::cast_possible_truncation)]
    fn read_u8(&mut self, addr: PciAddress, offset: u16) -> u8 {
        self.read(addr, AccessWidth::Byte, offset) as u8
    }

    #[allow(clippy::cast_possible_truncation)]
    fn read_u16(&mut self, addr: PciAddress, offset: u16) -> u16 {
        self.read(addr, AccessWidth::Word, offset) as u16
    }

    fn read_u32(&mut self, addr: PciAddress, offset: u16) -> u32 {
        self.read(addr, AccessWidth::Dword, offset)
    }

    fn write_u8(&mut self, addr: PciAddress, offset: u16, value: u8) {
        self.write(addr, AccessWidth::Byte, offset, u32::from(value));
    }

    fn write_u16(&mut self, addr: PciAddress, offset: u16, value: u16) {
        self.write(addr, AccessWidth::Word, offset, u32::from(value));
    }

    fn write_u32(&mut self, addr: PciAddress, offset: u16, value: u32) {
        self.write(addr, AccessWidth::Dword, offset, value);
    }
}

impl<T: ConfigSpace + ?Sized> ConfigAccess for T {}

#[inline]
fn assert_aligned(width: AccessWidth, offset: u16) {
    // Natural alignment also rules out straddling a dword boundary.
    assert!(
        offset % width.bytes() == 0,
        "misaligned {}-byte config access at {offset:#x}",
        width.bytes()
    );
}
