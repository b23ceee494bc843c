use super::ConfigSpace;
use crate::{MmioRange, PciAddress};

/// Configuration access through a pair of memory-mapped registers: write the
/// CAM index to `index`, then move data through `data`.
#[derive(Debug)]
pub struct IndexedIo {
    index: *mut u32,
    data: *mut u32,
    window: MmioRange,
}

impl IndexedIo {
    /// Default memory BAR window.
    pub const DEFAULT_WINDOW: MmioRange = MmioRange::new(0x8000_0000, 0xE000_0000);

    /// # Safety
    /// Both pointers must address the host bridge's index and data registers,
    /// valid for volatile dword access, and nothing else may drive them while
    /// this value exists.
    #[must_use]
    pub const unsafe fn new(index: *mut u32, data: *mut u32, window: MmioRange) -> Self {
        Self { index, data, window }
    }
}

impl ConfigSpace for IndexedIo {
    fn read_dword(&mut self, addr: PciAddress, offset: u16) -> u32 {
        // SAFETY: constructor contract.
        unsafe {
            self.index.write_volatile(addr.cam_index(offset));
            self.data.read_volatile()
        }
    }

    fn write_dword(&mut self, addr: PciAddress, offset: u16, value: u32) {
        // SAFETY: constructor contract.
        unsafe {
            self.index.write_volatile(addr.cam_index(offset));
            self.data.write_volatile(value);
        }
    }

    fn mmio_range(&self) -> MmioRange {
        self.window
    }
}
