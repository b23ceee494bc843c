//! # Kernel Boot Flow
//!
//! Brings the platform up in one pass on the boot thread:
//!
//! ```text
//!   PciBus::new(transport)
//!        │ SerialPorts::attach   (readiness callback)
//!        ▼
//!   PciBus::init  ── enumerate, assign BARs, notify ──► serial ports initialized
//!        ▼
//!   Displays::probe ─► set_mode ─► fill_test_pattern
//!        ▼
//!   BootSummary
//! ```
//!
//! The transport and the physical-to-virtual mapping are supplied by the
//! caller, so the same flow runs on bare metal and against a simulated bus.

#![cfg_attr(not(any(test, doctest)), no_std)]
#![allow(unsafe_code)]

extern crate alloc;

mod heap;

pub use heap::BumpHeap;

use kernel_dispi::{DisplayMode, Displays};
use kernel_pci::{ConfigSpace, EnumerationReport, MmioMapper, PciBus, PciConfig, ReadyError};
use kernel_serial::{LineConfig, SerialPorts, Uart16550, UartBlock};
use log::{info, warn};

/// Boot-time settings.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct BootConfig {
    pub pci: PciConfig,
    pub serial: LineConfig,
    /// Mode programmed on every display.
    pub display_mode: DisplayMode,
    /// Paint the identification pattern after the mode switch.
    pub test_pattern: bool,
}

impl BootConfig {
    pub const DEFAULT: Self = Self {
        pci: PciConfig::new(),
        serial: LineConfig::DEFAULT,
        display_mode: DisplayMode::DEFAULT,
        test_pattern: true,
    };
}

impl Default for BootConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// What [`boot`] brought up.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct BootSummary {
    pub pci: EnumerationReport,
    pub serial_ports: usize,
    /// First serial port, for console output.
    pub console: Option<Uart16550<UartBlock>>,
    pub displays: usize,
    /// Displays running the configured mode.
    pub displays_configured: usize,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BootError {
    #[error("PCI readiness: {0}")]
    Ready(#[from] ReadyError),
}

/// Enumerate the bus behind `transport` and start every supported device.
///
/// # Errors
/// Only if the bus refuses to become ready, which a fresh bus never does.
pub fn boot<T, M>(transport: T, mapper: &M, config: &BootConfig) -> Result<BootSummary, BootError>
where
    T: ConfigSpace,
    M: MmioMapper + ?Sized,
{
    let serial = SerialPorts::new(config.serial);
    let mut bus = PciBus::new(transport, config.pci);
    serial.attach(&mut bus, mapper);

    let report = bus.init()?;
    for (index, dev) in bus.devices().iter().enumerate() {
        info!(
            "PCI {index:3}: {} {:04x}:{:04x} {}",
            dev.address,
            dev.vendor_id,
            dev.device_id,
            dev.description()
        );
    }

    let mut displays = Displays::probe(&mut bus, mapper);
    let mut configured = 0;
    for index in 0..displays.display_count() {
        let result = displays.set_mode(index, config.display_mode).and_then(|()| {
            if config.test_pattern {
                displays.fill_test_pattern(index)
            } else {
                Ok(())
            }
        });
        match result {
            Ok(()) => configured += 1,
            Err(e) => warn!("display {index}: {e}"),
        }
    }

    let summary = BootSummary {
        pci: report,
        serial_ports: serial.len(),
        console: serial.console(),
        displays: displays.display_count(),
        displays_configured: configured,
    };
    info!(
        "boot: {} PCI functions, {} serial ports, {} displays",
        summary.pci.devices, summary.serial_ports, summary.displays
    );
    Ok(summary)
}
