use kernel_pci::PciAddress;

/// Why a 16x50 function was not attached.
#[derive(Debug, Copy, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SerialError {
    #[error("serial port table full ({capacity} ports)")]
    TooManyPorts { capacity: usize },
    #[error("{addr}: BAR0 is not implemented or was not assigned")]
    MissingBar { addr: PciAddress },
    #[error("{addr}: I/O BAR at {base:#x} is outside the 16-bit port space")]
    PortOutOfRange { addr: PciAddress, base: u64 },
    #[error("{addr}: cannot map registers at {base:#x}")]
    MapFailed { addr: PciAddress, base: u64 },
}
