use super::ConfigSpace;
use crate::{MmioRange, PciAddress};

/// Enhanced configuration access: every function's 4 KiB configuration page is
/// mapped at `base + (bus << 20 | slot << 15 | func << 12)`.
#[derive(Debug)]
pub struct Ecam {
    base: *mut u8,
    buses: u16,
    window: MmioRange,
}

impl Ecam {
    /// Memory BAR window of the QEMU `virt` machine's PCIe host.
    pub const VIRT_WINDOW: MmioRange = MmioRange::new(0x1000_0000, 0x3EFF_0000);

    /// ECAM base of the QEMU `virt` machine (low window).
    pub const VIRT_BASE: u64 = 0x3F00_0000;

    /// Number of buses the `virt` low ECAM window covers.
    pub const VIRT_BUSES: u16 = 16;

    /// # Safety
    /// `base` must point to a mapped ECAM region covering `buses` buses
    /// (1 MiB each), valid for volatile dword access for the lifetime of the
    /// returned value.
    #[must_use]
    pub const unsafe fn new(base: *mut u8, buses: u16, window: MmioRange) -> Self {
        Self { base, buses, window }
    }

    fn dword_ptr(&self, addr: PciAddress, offset: u16) -> Option<*mut u32> {
        if u16::from(addr.bus()) >= self.buses {
            return None;
        }
        // SAFETY: in bounds of the region promised to `new`.
        Some(unsafe { self.base.add(addr.ecam_offset(offset)) }.cast::<u32>())
    }
}

impl ConfigSpace for Ecam {
    fn read_dword(&mut self, addr: PciAddress, offset: u16) -> u32 {
        match self.dword_ptr(addr, offset) {
            // SAFETY: see `dword_ptr`.
            Some(ptr) => unsafe { ptr.read_volatile() },
            None => u32::MAX,
        }
    }

    fn write_dword(&mut self, addr: PciAddress, offset: u16, value: u32) {
        if let Some(ptr) = self.dword_ptr(addr, offset) {
            // SAFETY: see `dword_ptr`.
            unsafe { ptr.write_volatile(value) }
        }
    }

    fn mmio_range(&self) -> MmioRange {
        self.window
    }
}
