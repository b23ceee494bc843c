use crate::PciAddress;

/// Why a BAR could not be placed. The BAR keeps its original value and the
/// enumerator moves on to the next one.
#[derive(Debug, Copy, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BarError {
    #[error("{addr} BAR{bar}: base {base:#x} would fall below the window floor {floor:#x}")]
    BelowFloor {
        addr: PciAddress,
        bar: usize,
        base: u64,
        floor: u64,
    },
    #[error("{addr} BAR{bar}: no room left for {size:#x} bytes")]
    WindowExhausted { addr: PciAddress, bar: usize, size: u64 },
    #[error("{addr} BAR{bar}: 32-bit BAR cannot decode base {base:#x}")]
    Beyond32Bit { addr: PciAddress, bar: usize, base: u64 },
}

/// A bounded table ran out of room during enumeration.
#[derive(Debug, Copy, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TableError {
    #[error("device table full ({capacity} entries)")]
    DeviceTableFull { capacity: usize },
    #[error("bus work list full ({capacity} entries)")]
    BusWorklistFull { capacity: usize },
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReadyError {
    #[error("bus-ready was already signalled")]
    AlreadyNotified,
}
