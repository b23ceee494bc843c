//! # PCI serial port discovery
//!
//! [`SerialPorts::attach`] queues a readiness callback on the PCI bus. When
//! enumeration finishes, every Communication/16x50 function is given decode
//! access, its BAR 0 becomes a [`Uart16550`] and the UART is initialized.
//!
//! ```text
//!  PciBus::init ─► ready chain ─► SerialPorts::scan
//!                                   for each Comm/16x50 (table order):
//!                                     BAR0 I/O  ─► PortRegisters
//!                                     BAR0 mem  ─► MmioMapper ─► MmioRegisters
//!                                     space_enable, init
//! ```
//!
//! The callback borrows the collector, so ports are readable as soon as
//! [`PciBus::init`] returns while the bus stays usable.

use crate::regs::BLOCK_LEN;
use crate::uart::{LineConfig, MmioRegisters, PortRegisters, Uart16550, UartBlock};
use crate::SerialError;
use alloc::vec::Vec;
use core::cell::RefCell;
use kernel_pci::class_code::{class, subclass};
use kernel_pci::{ClassFilter, ConfigSpace, MmioMapper, PciAddress, PciBus};
use log::{info, warn};

/// Most ports recorded by one [`SerialPorts`].
pub const MAX_PORTS: usize = 16;

/// Functions this driver binds to.
pub const SERIAL_FILTER: ClassFilter = ClassFilter::class(class::COMM).with_subclass(subclass::COMM_16X50);

/// One discovered UART.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct SerialPort {
    /// Index into the PCI device table.
    pub device: usize,
    pub address: PciAddress,
    /// Bus address from BAR 0, flag bits stripped.
    pub bar_base: u64,
    pub uart: Uart16550<UartBlock>,
}

impl SerialPort {
    #[must_use]
    pub const fn is_mmio(&self) -> bool {
        self.uart.registers().is_mmio()
    }
}

/// Collects the serial ports found on a PCI bus.
#[derive(Debug)]
pub struct SerialPorts {
    line: LineConfig,
    ports: RefCell<Vec<SerialPort>>,
}

impl SerialPorts {
    #[must_use]
    pub const fn new(line: LineConfig) -> Self {
        Self {
            line,
            ports: RefCell::new(Vec::new()),
        }
    }

    /// Scan `bus` for 16x50 UARTs once it is ready.
    pub fn attach<'cb, T, M>(&'cb self, bus: &mut PciBus<'cb, T>, mapper: &'cb M)
    where
        T: ConfigSpace,
        M: MmioMapper + ?Sized,
    {
        bus.when_ready(move |bus| {
            self.scan(bus, mapper);
        });
    }

    /// Attach every matching function on an enumerated `bus`. Returns the
    /// number of ports added.
    pub fn scan<T, M>(&self, bus: &mut PciBus<'_, T>, mapper: &M) -> usize
    where
        T: ConfigSpace,
        M: MmioMapper + ?Sized,
    {
        let candidates: Vec<(usize, PciAddress)> = bus
            .devices()
            .iter_by_class(SERIAL_FILTER)
            .map(|(i, d)| (i, d.address))
            .collect();
        let mut added = 0;
        for (index, address) in candidates {
            match self.bind(bus, index, address, mapper) {
                Ok(port) => {
                    info!(
                        "serial: {} {} UART at {:#x}",
                        port.address,
                        if port.is_mmio() { "MMIO" } else { "I/O" },
                        port.bar_base
                    );
                    added += 1;
                }
                Err(e @ SerialError::TooManyPorts { .. }) => {
                    warn!("serial: {e}");
                    break;
                }
                Err(e) => warn!("serial: {e}"),
            }
        }
        added
    }

    fn bind<T, M>(
        &self,
        bus: &mut PciBus<'_, T>,
        index: usize,
        address: PciAddress,
        mapper: &M,
    ) -> Result<SerialPort, SerialError>
    where
        T: ConfigSpace,
        M: MmioMapper + ?Sized,
    {
        if self.len() >= MAX_PORTS {
            return Err(SerialError::TooManyPorts { capacity: MAX_PORTS });
        }

        let bar = bus.devices().get(index).and_then(|d| d.bar(0));
        let Some(bar) = bar.filter(|b| b.is_assigned()) else {
            return Err(SerialError::MissingBar { addr: address });
        };
        let base = bar.base();
        let is_mmio = !bar.is_io();

        let block = if is_mmio {
            // SAFETY: the BAR was placed by enumeration and belongs to this device alone.
            let ptr = unsafe { mapper.map_mmio(base, BLOCK_LEN) }.ok_or(SerialError::MapFailed { addr: address, base })?;
            // SAFETY: the mapping stays for the life of the kernel.
            UartBlock::Mmio(unsafe { MmioRegisters::new(ptr) })
        } else {
            let port = u16::try_from(base).map_err(|_| SerialError::PortOutOfRange { addr: address, base })?;
            // SAFETY: the port range was assigned to this 16x50 function.
            UartBlock::Port(unsafe { PortRegisters::new(port) })
        };

        bus.space_enable(index, is_mmio, !is_mmio);

        let uart = Uart16550::new(block);
        uart.init(self.line);

        let port = SerialPort {
            device: index,
            address,
            bar_base: base,
            uart,
        };
        self.ports.borrow_mut().push(port);
        Ok(port)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ports.borrow().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<SerialPort> {
        self.ports.borrow().get(index).copied()
    }

    /// The first port found, used as the kernel console.
    #[must_use]
    pub fn console(&self) -> Option<Uart16550<UartBlock>> {
        self.get(0).map(|p| p.uart)
    }

    /// Snapshot of every port, in discovery order.
    #[must_use]
    pub fn to_vec(&self) -> Vec<SerialPort> {
        self.ports.borrow().clone()
    }
}

impl Default for SerialPorts {
    fn default() -> Self {
        Self::new(LineConfig::DEFAULT)
    }
}
