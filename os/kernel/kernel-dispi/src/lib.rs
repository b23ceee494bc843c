//! # Bochs / QEMU dispi Display
//!
//! Driver for the PCI "standard VGA" (`1234:1111`) through its memory-mapped
//! dispi register block. Mode setting and a linear framebuffer only; no VGA
//! text mode, no banked access.
//!
//! ```text
//!  PciBus (enumerated) ──► Displays::probe ──► Display[0..8]
//!                                                 │ set_mode / set_pos / set_enable
//!                                                 ▼
//!                                  BAR2 + 0x500: dispi registers
//!                                  BAR0:         framebuffer
//! ```
//!
//! Displays keep the order of the device table. Physical addresses turn into
//! pointers only through the caller's [`kernel_pci::MmioMapper`].

#![cfg_attr(not(any(test, doctest)), no_std)]
#![allow(unsafe_code)]

extern crate alloc;

mod display;
mod error;
mod mode;
pub mod regs;

pub use display::{
    DEVICE_ID, Display, Displays, FRAMEBUFFER_BAR, Framebuffer, MAX_DISPLAYS, MMIO_BAR, PATTERN_DARK,
    PATTERN_LIGHT, VENDOR_ID, test_pattern_pixel,
};
pub use error::DisplayError;
pub use mode::{ColorDepth, DisplayMode};
