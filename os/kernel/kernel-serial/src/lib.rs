//! # 16x50 Serial Ports
//!
//! Polled driver for 16550-compatible UARTs, found either at the legacy COM
//! ports or as PCI Communication/16x50 functions.
//!
//! ```text
//!   SerialPorts::attach ──► PciBus ready chain
//!                               │
//!                               ▼
//!   Comm/16x50 BAR0 ──► UartBlock (Port | Mmio) ──► Uart16550 ──► DebugSink
//! ```
//!
//! A [`Uart16550`] implements [`kernel_debugcon::DebugSink`], so once a
//! port is up the kernel logger can move onto it.
//!
//! ```rust
//! use kernel_serial::{LineConfig, Uart16550, UartRegisters};
//! use core::cell::Cell;
//!
//! /// Transmitter that is always idle and remembers the last byte.
//! #[derive(Default)]
//! struct Loop(Cell<u8>);
//!
//! impl UartRegisters for Loop {
//!     fn read(&self, reg: u8) -> u8 {
//!         if reg == 5 { 0x20 } else { self.0.get() }
//!     }
//!     fn write(&self, _reg: u8, value: u8) {
//!         self.0.set(value);
//!     }
//! }
//!
//! let uart = Uart16550::new(Loop::default());
//! uart.init(LineConfig::DEFAULT);
//! assert!(uart.write_byte(b'!'));
//! assert_eq!(uart.registers().0.get(), b'!');
//! ```

#![cfg_attr(not(any(test, doctest)), no_std)]
#![allow(unsafe_code)]

extern crate alloc;

mod error;
mod ports;
pub mod regs;
mod uart;

pub use error::SerialError;
pub use ports::{MAX_PORTS, SERIAL_FILTER, SerialPort, SerialPorts};
pub use uart::{LineConfig, MmioRegisters, PortRegisters, Uart16550, UartBlock, UartRegisters};
