//! # PCI Bus Enumeration
//!
//! Discovers every function on a PCI segment, gives each memory and I/O BAR
//! an address, and tells interested drivers when the device table is
//! complete. Runs on the boot thread before any scheduler exists.
//!
//! ## Layers
//!
//! ```text
//!   drivers (serial, display, ...)
//!        │ when_ready / next_by_class / bar_get_base / space_enable
//!        ▼
//!   PciBus ── DeviceTable ── ReadyChain
//!        │ enumerate, assign_bars
//!        ▼
//!   ConfigAccess  (sized read / write, read-modify-write for sub-dwords)
//!        ▼
//!   ConfigSpace   (aligned dwords)
//!        ▼
//!   PortIo │ Ecam │ IndexedIo │ SimBus (tests)
//! ```
//!
//! ## Boot sequence
//!
//! ```rust
//! use kernel_pci::{ClassFilter, ConfigSpace, MmioRange, PciAddress, PciBus, PciConfig};
//! use kernel_pci::class_code::class;
//!
//! /// A segment with nothing plugged in.
//! struct EmptySegment;
//!
//! impl ConfigSpace for EmptySegment {
//!     fn read_dword(&mut self, _: PciAddress, _: u16) -> u32 {
//!         u32::MAX
//!     }
//!     fn write_dword(&mut self, _: PciAddress, _: u16, _: u32) {}
//!     fn mmio_range(&self) -> MmioRange {
//!         MmioRange::new(0x8000_0000, 0xE000_0000)
//!     }
//! }
//!
//! let mut bus = PciBus::new(EmptySegment, PciConfig::default());
//! bus.when_ready(|bus| {
//!     let vga = bus.devices().next_by_class(None, ClassFilter::class(class::DISPLAY));
//!     assert_eq!(vga, None);
//! });
//! let report = bus.init().expect("first init");
//! assert_eq!(report.devices, 0);
//! assert!(bus.is_ready());
//! ```
//!
//! ## Resource policy
//!
//! Memory BARs are placed top-down inside the transport's memory window,
//! I/O BARs top-down below `0xF000`. A BAR that does not fit is left at its
//! original value with decoding untouched; enumeration carries on and the
//! [`EnumerationReport`] counts it.
//!
//! ## Concurrency
//!
//! None. Every method takes `&mut self` where it touches hardware, so a
//! single owner serializes the index/data register sequences. A multi-core
//! kernel would put the whole [`PciBus`] behind one lock.

#![cfg_attr(not(any(test, doctest)), no_std)]
#![allow(unsafe_code)]

extern crate alloc;

mod address;
pub mod bar;
mod bus;
pub mod class_code;
mod config;
mod error;
pub mod header;
mod mmio;
pub mod ready;
#[cfg(any(test, feature = "sim"))]
pub mod sim;
mod table;
pub mod transport;

pub use address::{MAX_FUNCTION, MAX_SLOT, PciAddress};
pub use bar::{BAR_COUNT, BarRecord};
pub use bus::{EnumerationReport, PciBus};
pub use class_code::describe;
pub use config::PciConfig;
pub use error::{BarError, ReadyError, TableError};
pub use mmio::{IdentityMapper, MmioMapper, MmioRange};
pub use table::{ClassFilter, DeviceSummary, DeviceTable};
pub use transport::{AccessWidth, ConfigAccess, ConfigSpace, Ecam, IndexedIo};

#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
pub use transport::PortIo;
