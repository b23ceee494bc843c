//! # MMIO register block (BAR 2)
//!
//! ```text
//! 0x000 - 0x3FF  EDID blob
//! 0x400 - 0x41F  VGA ports 0x3C0..0x3DF, remapped 1:1
//! 0x500 - 0x517  dispi registers, 16 bit, offset = index * 2
//! 0x600 - 0x607  QEMU extended registers, 32 bit (PCI revision 2+)
//! ```

use bitfield_struct::bitfield;

/// VGA attribute controller index port (0x3C0).
pub const VGA_ATTRIBUTE: usize = 0x400;
/// Palette address source bit; clearing it blanks the screen.
pub const VGA_UNBLANK: u8 = 0x20;

pub const DISPI_BASE: usize = 0x500;

pub const INDEX_ID: usize = 0x0;
pub const INDEX_XRES: usize = 0x1;
pub const INDEX_YRES: usize = 0x2;
pub const INDEX_BPP: usize = 0x3;
pub const INDEX_ENABLE: usize = 0x4;
pub const INDEX_BANK: usize = 0x5;
pub const INDEX_VIRT_WIDTH: usize = 0x6;
pub const INDEX_VIRT_HEIGHT: usize = 0x7;
pub const INDEX_X_OFFSET: usize = 0x8;
pub const INDEX_Y_OFFSET: usize = 0x9;

/// Byte offset of dispi register `index`.
#[must_use]
pub const fn dispi_offset(index: usize) -> usize {
    DISPI_BASE + index * 2
}

/// Size in bytes of the QEMU extended region.
pub const QEMU_EXT_SIZE: usize = 0x600;
pub const QEMU_EXT_ENDIANNESS: usize = 0x604;
pub const ENDIAN_LITTLE: u32 = 0x1E1E_1E1E;
pub const ENDIAN_BIG: u32 = 0xBEBE_BEBE;

/// First PCI revision that carries the extended registers.
pub const QEMU_EXT_REVISION: u8 = 2;

/// Bytes of BAR 2 the driver touches.
pub const MMIO_LEN: usize = 0x608;

/// Values of the ID register for the interface versions.
pub const ID_MIN: u16 = 0xB0C0;
pub const ID_MAX: u16 = 0xB0C5;

/// Enable register (index 4).
#[bitfield(u16)]
#[derive(Eq, PartialEq)]
pub struct DispiEnable {
    pub enabled: bool,
    pub get_caps: bool,
    #[bits(3)]
    __reserved: u8,
    pub dac_8bit: bool,
    pub lfb_enabled: bool,
    /// Keep framebuffer contents across the mode switch.
    pub no_clear_mem: bool,
    #[bits(8)]
    __pad: u8,
}

impl DispiEnable {
    pub const DISABLED: Self = Self::new();

    /// Enabled with the linear framebuffer on.
    #[must_use]
    pub const fn lfb(no_clear: bool) -> Self {
        Self::new()
            .with_enabled(true)
            .with_lfb_enabled(true)
            .with_no_clear_mem(no_clear)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enable_values() {
        assert_eq!(DispiEnable::DISABLED.into_bits(), 0x00);
        assert_eq!(DispiEnable::lfb(false).into_bits(), 0x41);
        assert_eq!(DispiEnable::lfb(true).into_bits(), 0xC1);
        assert_eq!(DispiEnable::new().with_dac_8bit(true).into_bits(), 0x20);
    }

    #[test]
    fn register_offsets() {
        assert_eq!(dispi_offset(INDEX_ID), 0x500);
        assert_eq!(dispi_offset(INDEX_ENABLE), 0x508);
        assert_eq!(dispi_offset(INDEX_Y_OFFSET), 0x512);
    }
}
