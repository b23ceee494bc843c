//! # Simulated configuration space
//!
//! A [`SimBus`] answers configuration cycles from an in-memory table of
//! functions, the way real hardware would:
//!
//! * absent functions read as all ones and ignore writes;
//! * the id, class and header-type fields are read-only;
//! * BAR registers only latch their implemented address bits, so writing all
//!   ones and reading back reveals the size;
//! * every access is appended to a log, so tests can check what went over
//!   the wire.
//!
//! Enabled for this crate's tests and, through the `sim` feature, for
//! dependent crates' tests.

use crate::{ConfigSpace, MmioRange, PciAddress, header};
use alloc::collections::BTreeMap;
use alloc::vec::Vec;

/// One logged configuration cycle.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SimAccess {
    Read { addr: PciAddress, offset: u16 },
    Write { addr: PciAddress, offset: u16, value: u32 },
}

/// A function's 256-byte configuration space plus its BAR decoders.
#[derive(Debug, Clone)]
pub struct SimFunction {
    config: [u32; 64],
    /// Address bits each BAR register latches. Zero: unimplemented.
    bar_writable: [u32; 6],
}

impl SimFunction {
    #[must_use]
    pub fn new(vendor: u16, device: u16) -> Self {
        let mut config = [0; 64];
        config[0] = (u32::from(device) << 16) | u32::from(vendor);
        Self {
            config,
            bar_writable: [0; 6],
        }
    }

    #[must_use]
    pub fn with_class(mut self, class: u8, subclass: u8, prog_if: u8) -> Self {
        let revision = self.config[2] & 0xFF;
        self.config[2] = (u32::from(class) << 24) | (u32::from(subclass) << 16) | (u32::from(prog_if) << 8) | revision;
        self
    }

    #[must_use]
    pub fn with_revision(mut self, revision: u8) -> Self {
        self.config[2] = (self.config[2] & !0xFF) | u32::from(revision);
        self
    }

    /// Set the multifunction bit of the header type.
    #[must_use]
    pub fn multifunction(mut self) -> Self {
        self.config[3] |= 0x0080_0000;
        self
    }

    /// Turn this into a PCI-to-PCI bridge forwarding to `secondary`.
    #[must_use]
    pub fn bridge(mut self, primary: u8, secondary: u8) -> Self {
        self = self.with_class(0x06, 0x04, 0x00);
        self.config[3] = (self.config[3] & !0x007F_0000) | 0x0001_0000;
        self.config[6] = (u32::from(secondary) << 16) | (u32::from(secondary) << 8) | u32::from(primary);
        self
    }

    /// 32-bit memory BAR of `size` bytes (power of two, at least 16).
    #[must_use]
    pub fn with_mem_bar(mut self, index: usize, size: u32, prefetchable: bool) -> Self {
        assert!(size.is_power_of_two() && size >= 16);
        self.bar_writable[index] = !(size - 1) & header::BAR_MEM_ADDR_MASK;
        self.config[4 + index] = if prefetchable { header::BAR_PREFETCHABLE } else { 0 };
        self
    }

    /// 64-bit memory BAR occupying registers `index` and `index + 1`.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn with_mem64_bar(mut self, index: usize, size: u64, prefetchable: bool) -> Self {
        assert!(size.is_power_of_two() && size >= 16);
        let writable = !(size - 1);
        self.bar_writable[index] = (writable as u32) & header::BAR_MEM_ADDR_MASK;
        self.bar_writable[index + 1] = (writable >> 32) as u32;
        let prefetch = if prefetchable { header::BAR_PREFETCHABLE } else { 0 };
        self.config[4 + index] = header::BAR_TYPE_64 | prefetch;
        self.config[5 + index] = 0;
        self
    }

    /// I/O BAR of `size` bytes decoding 16 address bits, like most devices.
    #[must_use]
    pub fn with_io_bar(mut self, index: usize, size: u32) -> Self {
        assert!(size.is_power_of_two() && size >= 4);
        self.bar_writable[index] = !(size - 1) & 0x0000_FFFC;
        self.config[4 + index] = header::BAR_IO;
        self
    }

    #[must_use]
    pub fn with_subsystem(mut self, vendor: u16, id: u16) -> Self {
        self.config[11] = (u32::from(id) << 16) | u32::from(vendor);
        self
    }

    #[must_use]
    pub fn with_interrupt(mut self, line: u8, pin: u8) -> Self {
        self.config[15] = (self.config[15] & !0xFFFF) | (u32::from(pin) << 8) | u32::from(line);
        self
    }

    fn layout(&self) -> u32 {
        (self.config[3] >> 16) & 0x7F
    }

    fn write(&mut self, index: usize, value: u32) {
        let bar_count = if self.layout() == 0 { 6 } else { 2 };
        match index {
            0 | 2 => {}
            3 => self.config[3] = (value & !0x00FF_0000) | (self.config[3] & 0x00FF_0000),
            4..=9 if index - 4 < bar_count => {
                let writable = self.bar_writable[index - 4];
                self.config[index] = (value & writable) | (self.config[index] & !writable);
            }
            i if i < self.config.len() => self.config[i] = value,
            _ => {}
        }
    }
}

/// In-memory configuration space.
#[derive(Debug, Clone)]
pub struct SimBus {
    functions: BTreeMap<PciAddress, SimFunction>,
    window: MmioRange,
    log: Vec<SimAccess>,
}

impl Default for SimBus {
    fn default() -> Self {
        Self::new()
    }
}

impl SimBus {
    /// Empty bus with the PC-style memory window `0x8000_0000..0xE000_0000`.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            functions: BTreeMap::new(),
            window: MmioRange::new(0x8000_0000, 0xE000_0000),
            log: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_mmio_range(mut self, window: MmioRange) -> Self {
        self.window = window;
        self
    }

    pub fn insert(&mut self, addr: PciAddress, function: SimFunction) -> &mut Self {
        self.functions.insert(addr, function);
        self
    }

    /// Raw dword, bypassing decoders and the log.
    #[must_use]
    pub fn peek(&self, addr: PciAddress, offset: u16) -> u32 {
        self.functions
            .get(&addr)
            .and_then(|f| f.config.get(usize::from(offset >> 2)).copied())
            .unwrap_or(u32::MAX)
    }

    /// Store a raw dword, bypassing decoders and the log.
    pub fn poke(&mut self, addr: PciAddress, offset: u16, value: u32) {
        if let Some(slot) = self
            .functions
            .get_mut(&addr)
            .and_then(|f| f.config.get_mut(usize::from(offset >> 2)))
        {
            *slot = value;
        }
    }

    #[must_use]
    pub fn log(&self) -> &[SimAccess] {
        &self.log
    }

    pub fn clear_log(&mut self) {
        self.log.clear();
    }
}

impl ConfigSpace for SimBus {
    fn read_dword(&mut self, addr: PciAddress, offset: u16) -> u32 {
        let offset = offset & !3;
        self.log.push(SimAccess::Read { addr, offset });
        match self.functions.get(&addr) {
            Some(f) => f.config.get(usize::from(offset >> 2)).copied().unwrap_or(0),
            None => u32::MAX,
        }
    }

    fn write_dword(&mut self, addr: PciAddress, offset: u16, value: u32) {
        let offset = offset & !3;
        self.log.push(SimAccess::Write { addr, offset, value });
        if let Some(f) = self.functions.get_mut(&addr) {
            f.write(usize::from(offset >> 2), value);
        }
    }

    fn mmio_range(&self) -> MmioRange {
        self.window
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ConfigAccess;

    const A: PciAddress = PciAddress::new(0, 1, 0);

    #[test]
    fn absent_functions_float_high() {
        let mut bus = SimBus::new();
        assert_eq!(bus.read_u32(A, 0), u32::MAX);
        bus.write_u32(A, 0x10, 0);
        assert_eq!(bus.read_u8(A, header::HEADER_TYPE), 0xFF);
    }

    #[test]
    fn id_registers_are_read_only() {
        let mut bus = SimBus::new();
        bus.insert(A, SimFunction::new(0x1234, 0x1111).with_class(3, 0, 0));
        bus.write_u32(A, 0, 0);
        bus.write_u8(A, header::CLASS, 0x0C);
        assert_eq!(bus.read_u16(A, header::VENDOR_ID), 0x1234);
        assert_eq!(bus.read_u8(A, header::CLASS), 3);
    }

    #[test]
    fn bar_reports_size_mask_and_keeps_flags() {
        let mut bus = SimBus::new();
        bus.insert(
            A,
            SimFunction::new(1, 2)
                .with_mem_bar(0, 0x1000, true)
                .with_io_bar(1, 0x20)
                .with_mem64_bar(2, 0x4000, false),
        );
        bus.write_u32(A, 0x10, u32::MAX);
        bus.write_u32(A, 0x14, u32::MAX);
        bus.write_u32(A, 0x18, u32::MAX);
        bus.write_u32(A, 0x1C, u32::MAX);
        bus.write_u32(A, 0x20, u32::MAX);
        assert_eq!(bus.read_u32(A, 0x10), 0xFFFF_F008);
        assert_eq!(bus.read_u32(A, 0x14), 0x0000_FFE1);
        assert_eq!(bus.read_u32(A, 0x18), 0xFFFF_C004);
        assert_eq!(bus.read_u32(A, 0x1C), 0xFFFF_FFFF);
        assert_eq!(bus.read_u32(A, 0x20), 0);
    }

    #[test]
    fn bridge_exposes_bus_numbers() {
        let mut bus = SimBus::new();
        bus.insert(A, SimFunction::new(0x8086, 0x244E).bridge(0, 1));
        assert_eq!(bus.read_u8(A, header::SECONDARY_BUS), 1);
        assert_eq!(bus.read_u8(A, header::HEADER_TYPE), 0x01);
        assert_eq!(bus.read_u8(A, header::CLASS), 0x06);
    }
}
