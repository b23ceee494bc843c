/// Tunables for enumeration and resource assignment.
///
/// ```
/// use kernel_pci::PciConfig;
///
/// let config = PciConfig::new()
///     .with_device_capacity(32)
///     .with_mmio_cursor(0xF000_0000);
/// assert_eq!(config.device_capacity, 32);
/// ```
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct PciConfig {
    /// Maximum number of functions recorded in the device table.
    pub device_capacity: usize,
    /// Maximum number of buses waiting to be scanned.
    pub bus_worklist_capacity: usize,
    /// Where memory BAR placement starts (exclusive top). `None`: the end of
    /// the transport's memory window.
    pub mmio_cursor: Option<u64>,
    /// Lowest address a memory BAR may occupy. `None`: the start of the
    /// transport's memory window.
    pub mmio_floor: Option<u64>,
    /// Where I/O BAR placement starts (exclusive top).
    pub io_cursor: u32,
    /// Lowest port an I/O BAR may occupy.
    pub io_floor: u32,
}

impl PciConfig {
    pub const DEFAULT_DEVICE_CAPACITY: usize = 128;
    pub const DEFAULT_BUS_WORKLIST_CAPACITY: usize = 256;
    pub const DEFAULT_IO_CURSOR: u32 = 0xF000;
    pub const DEFAULT_IO_FLOOR: u32 = 0x1000;

    #[must_use]
    pub const fn new() -> Self {
        Self {
            device_capacity: Self::DEFAULT_DEVICE_CAPACITY,
            bus_worklist_capacity: Self::DEFAULT_BUS_WORKLIST_CAPACITY,
            mmio_cursor: None,
            mmio_floor: None,
            io_cursor: Self::DEFAULT_IO_CURSOR,
            io_floor: Self::DEFAULT_IO_FLOOR,
        }
    }

    #[must_use]
    pub const fn with_device_capacity(mut self, capacity: usize) -> Self {
        self.device_capacity = capacity;
        self
    }

    #[must_use]
    pub const fn with_bus_worklist_capacity(mut self, capacity: usize) -> Self {
        self.bus_worklist_capacity = capacity;
        self
    }

    #[must_use]
    pub const fn with_mmio_cursor(mut self, cursor: u64) -> Self {
        self.mmio_cursor = Some(cursor);
        self
    }

    #[must_use]
    pub const fn with_mmio_floor(mut self, floor: u64) -> Self {
        self.mmio_floor = Some(floor);
        self
    }

    #[must_use]
    pub const fn with_io_window(mut self, floor: u32, cursor: u32) -> Self {
        self.io_floor = floor;
        self.io_cursor = cursor;
        self
    }
}

impl Default for PciConfig {
    fn default() -> Self {
        Self::new()
    }
}
