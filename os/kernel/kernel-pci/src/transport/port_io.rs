use super::ConfigSpace;
use crate::{MmioRange, PciAddress};
use kernel_ports::{inl, outl};

/// Legacy configuration mechanism #1 through I/O ports `0xCF8`/`0xCFC`.
#[derive(Debug)]
pub struct PortIo {
    window: MmioRange,
}

impl PortIo {
    pub const CONFIG_ADDRESS: u16 = 0xCF8;
    pub const CONFIG_DATA: u16 = 0xCFC;

    /// Memory BAR window on a PC-style chipset (QEMU `pc`/`q35`).
    pub const PC_WINDOW: MmioRange = MmioRange::new(0x8000_0000, 0xE000_0000);

    /// # Safety
    /// The caller runs with I/O privilege, a host bridge decodes `0xCF8`/`0xCFC`,
    /// and no other code drives those ports while this value exists.
    #[must_use]
    pub const unsafe fn new(window: MmioRange) -> Self {
        Self { window }
    }
}

impl ConfigSpace for PortIo {
    fn read_dword(&mut self, addr: PciAddress, offset: u16) -> u32 {
        // SAFETY: exclusive port ownership per constructor contract.
        unsafe {
            outl(Self::CONFIG_ADDRESS, addr.cam_index(offset));
            inl(Self::CONFIG_DATA)
        }
    }

    fn write_dword(&mut self, addr: PciAddress, offset: u16, value: u32) {
        // SAFETY: exclusive port ownership per constructor contract.
        unsafe {
            outl(Self::CONFIG_ADDRESS, addr.cam_index(offset));
            outl(Self::CONFIG_DATA, value);
        }
    }

    fn mmio_range(&self) -> MmioRange {
        self.window
    }
}
