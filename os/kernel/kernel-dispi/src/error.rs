use kernel_pci::PciAddress;

#[derive(Debug, Copy, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DisplayError {
    #[error("no display {index}")]
    NoSuchDisplay { index: usize },
    #[error("display table full ({capacity} displays)")]
    TooManyDisplays { capacity: usize },
    #[error("unsupported color depth {bpp}")]
    UnsupportedDepth { bpp: u16 },
    #[error("{addr}: BAR{bar} is not a placed memory BAR")]
    MissingBar { addr: PciAddress, bar: usize },
    #[error("{addr}: cannot map BAR{bar}")]
    MapFailed { addr: PciAddress, bar: usize },
    #[error("{width}x{height} at ({x}, {y}) leaves the {virt_width}x{virt_height} virtual screen")]
    ViewportOutOfRange {
        width: u16,
        height: u16,
        x: u16,
        y: u16,
        virt_width: u16,
        virt_height: u16,
    },
    #[error("mode needs {required} bytes, framebuffer has {available}")]
    ModeTooLarge { required: u64, available: u64 },
}
