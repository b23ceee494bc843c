//! # The PCI bus context
//!
//! [`PciBus`] owns everything enumeration produces: the transport, the device
//! table and the readiness chain. Drivers receive it explicitly, either as
//! the argument of their readiness callback or by reference after
//! [`PciBus::init`].
//!
//! ## Enumeration
//!
//! ```text
//! work list: [0]
//!   pop bus ─► already scanned? ─yes─► warn, next
//!      │ no
//!      ▼
//!   for slot in 0..32, func in 0..(multifunction ? 8 : 1):
//!      header type 0xFF or class 0xFF ─► stop this slot
//!      record DeviceSummary
//!      PCI-to-PCI bridge ─► push secondary bus
//!      type-0 header     ─► size and place BARs
//! ```
//!
//! The work list is LIFO, so a bridge's secondary bus is scanned after the
//! rest of the current bus. Capacity problems never stop the walk; they are
//! logged and counted in the [`EnumerationReport`].

use crate::bar::{self, BarAllocator};
use crate::header::{self, CommandRegister, HeaderType};
use crate::ready::{ReadyChain, Registration};
use crate::table::{DeviceSummary, DeviceTable};
use crate::{ConfigAccess, ConfigSpace, PciAddress, PciConfig, ReadyError, TableError};
use alloc::boxed::Box;
use alloc::vec::Vec;
use log::{debug, info, trace, warn};

/// Counts from one enumeration pass.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct EnumerationReport {
    /// Functions recorded in the device table.
    pub devices: usize,
    pub bars_assigned: usize,
    /// Implemented BARs left at their original value.
    pub bars_unassigned: usize,
    /// Functions found after the device table was full.
    pub devices_dropped: usize,
    /// Secondary buses not scanned because the work list was full.
    pub buses_dropped: usize,
}

/// Enumeration context for one PCI segment.
pub struct PciBus<'cb, T: ConfigSpace> {
    transport: T,
    config: PciConfig,
    devices: DeviceTable,
    ready: ReadyChain<'cb, Self>,
}

impl<'cb, T: ConfigSpace> PciBus<'cb, T> {
    #[must_use]
    pub const fn new(transport: T, config: PciConfig) -> Self {
        Self {
            transport,
            devices: DeviceTable::new(config.device_capacity),
            config,
            ready: ReadyChain::new(),
        }
    }

    /// Enumerate, then signal readiness.
    ///
    /// # Errors
    /// [`ReadyError::AlreadyNotified`] if the bus was already initialized; no
    /// scan happens in that case.
    pub fn init(&mut self) -> Result<EnumerationReport, ReadyError> {
        if self.ready.is_ready() {
            return Err(ReadyError::AlreadyNotified);
        }
        let report = self.enumerate();
        info!(
            "PCI: {} devices, {} BARs assigned, {} unassigned",
            report.devices, report.bars_assigned, report.bars_unassigned
        );
        self.notify_ready()?;
        Ok(report)
    }

    /// Walk all buses reachable from bus 0 and fill the device table. Runs
    /// once, from [`PciBus::init`].
    fn enumerate(&mut self) -> EnumerationReport {
        let mut report = EnumerationReport::default();
        let mut alloc = BarAllocator::new(&self.config, self.transport.mmio_range());
        let mut scanned = [false; 256];
        let mut pending: Vec<u8> = Vec::new();
        pending.push(0);

        while let Some(bus) = pending.pop() {
            let seen = &mut scanned[usize::from(bus)];
            if *seen {
                warn!("PCI: bus {bus:#04x} reached twice, skipping");
                continue;
            }
            *seen = true;

            for slot in 0..=crate::address::MAX_SLOT {
                self.scan_slot(bus, slot, &mut pending, &mut alloc, &mut report);
            }
        }

        report
    }

    fn scan_slot(
        &mut self,
        bus: u8,
        slot: u8,
        pending: &mut Vec<u8>,
        alloc: &mut BarAllocator,
        report: &mut EnumerationReport,
    ) {
        let mut functions = 1;
        let mut func = 0;

        while func < functions {
            let addr = PciAddress::new(bus, slot, func);
            trace!("PCI: probing {addr}");

            let raw_header = self.transport.read_u8(addr, header::HEADER_TYPE);
            if raw_header == 0xFF {
                break;
            }
            let header_type = HeaderType::from_bits(raw_header);
            if func == 0 && header_type.multifunction() {
                functions = crate::address::MAX_FUNCTION + 1;
            }

            let class = self.transport.read_u8(addr, header::CLASS);
            if class == 0xFF {
                break;
            }

            if self.devices.is_full() {
                let err = TableError::DeviceTableFull {
                    capacity: self.devices.capacity(),
                };
                warn!("PCI: {addr}: {err}, device dropped");
                report.devices_dropped += 1;
                func += 1;
                continue;
            }

            let mut dev = self.read_summary(addr, class, header_type);

            if dev.is_pci_bridge() {
                let secondary = self.transport.read_u8(addr, header::SECONDARY_BUS);
                if pending.len() < self.config.bus_worklist_capacity {
                    debug!("PCI: {addr} bridges to bus {secondary:#04x}");
                    pending.push(secondary);
                } else {
                    let err = TableError::BusWorklistFull {
                        capacity: self.config.bus_worklist_capacity,
                    };
                    warn!("PCI: {addr}: {err}, bus {secondary:#04x} not scanned");
                    report.buses_dropped += 1;
                }
            } else if header_type.is_endpoint() {
                let assigned = bar::assign_bars(&mut self.transport, addr, alloc);
                report.bars_assigned += assigned.assigned;
                report.bars_unassigned += assigned.unassigned();
                dev.bars = assigned.bars;
            }

            match self.devices.push(dev) {
                Ok(index) => {
                    report.devices += 1;
                    debug!(
                        "PCI: [{index}] {addr} {:04x}:{:04x} {}",
                        dev.vendor_id,
                        dev.device_id,
                        dev.description()
                    );
                }
                Err(err) => {
                    warn!("PCI: {addr}: {err}, device dropped");
                    report.devices_dropped += 1;
                }
            }

            func += 1;
        }
    }

    fn read_summary(&mut self, addr: PciAddress, class: u8, header_type: HeaderType) -> DeviceSummary {
        let t = &mut self.transport;
        let endpoint = header_type.is_endpoint();
        DeviceSummary {
            address: addr,
            vendor_id: t.read_u16(addr, header::VENDOR_ID),
            device_id: t.read_u16(addr, header::DEVICE_ID),
            class,
            subclass: t.read_u8(addr, header::SUBCLASS),
            prog_if: t.read_u8(addr, header::PROG_IF),
            revision: t.read_u8(addr, header::REVISION),
            header_type,
            subsystem_vendor_id: if endpoint { t.read_u16(addr, header::SUBSYSTEM_VENDOR_ID) } else { 0 },
            subsystem_id: if endpoint { t.read_u16(addr, header::SUBSYSTEM_ID) } else { 0 },
            interrupt_line: t.read_u8(addr, header::INTERRUPT_LINE),
            interrupt_pin: t.read_u8(addr, header::INTERRUPT_PIN),
            bars: Default::default(),
        }
    }

    /// Run `callback` once the bus is enumerated; immediately if it already is.
    pub fn when_ready(&mut self, callback: impl FnOnce(&mut Self) + 'cb) {
        if let Registration::RunNow(callback) = self.ready.register(Box::new(callback)) {
            callback(self);
        }
    }

    /// Mark the bus ready and run the pending callbacks in registration
    /// order. [`PciBus::init`] calls this after enumerating.
    ///
    /// # Errors
    /// [`ReadyError::AlreadyNotified`] on every call after the first; nothing
    /// runs in that case.
    pub fn notify_ready(&mut self) -> Result<(), ReadyError> {
        let callbacks = self.ready.take_for_notify()?;
        trace!("PCI: ready, running {} callbacks", callbacks.len());
        for callback in callbacks {
            callback(self);
        }
        Ok(())
    }

    #[must_use]
    pub const fn is_ready(&self) -> bool {
        self.ready.is_ready()
    }

    #[must_use]
    pub const fn devices(&self) -> &DeviceTable {
        &self.devices
    }

    #[must_use]
    pub fn device_count(&self) -> usize {
        self.devices.len()
    }

    #[must_use]
    pub fn device(&self, index: usize) -> Option<&DeviceSummary> {
        self.devices.get(index)
    }

    #[must_use]
    pub fn device_description(&self, index: usize) -> Option<&'static str> {
        self.devices.description(index)
    }

    #[must_use]
    pub const fn config(&self) -> &PciConfig {
        &self.config
    }

    /// Direct access to configuration space, for driver-specific registers.
    pub const fn transport(&mut self) -> &mut T {
        &mut self.transport
    }

    /// Set or clear memory and I/O decoding for device `index`.
    ///
    /// Returns `false` if `index` is out of range.
    pub fn space_enable(&mut self, index: usize, memory: bool, io: bool) -> bool {
        let Some(addr) = self.devices.get(index).map(|d| d.address) else {
            return false;
        };
        let cmd = CommandRegister::from_bits(self.transport.read_u16(addr, header::COMMAND))
            .with_memory_space(memory)
            .with_io_space(io);
        self.transport.write_u16(addr, header::COMMAND, cmd.into_bits());
        true
    }

    /// Give the transport back.
    pub fn into_transport(self) -> T {
        self.transport
    }
}

impl<T: ConfigSpace> core::fmt::Debug for PciBus<'_, T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PciBus")
            .field("config", &self.config)
            .field("devices", &self.devices.len())
            .field("ready", &self.ready)
            .finish_non_exhaustive()
    }
}
