//! # x86 I/O Port Access
//!
//! Thin wrappers around the `in`/`out` instructions for devices that live in the
//! legacy 16-bit **I/O port space** rather than in memory-mapped I/O (MMIO).
//!
//! ## Users in this workspace
//!
//! ```text
//! 0x00E9          Bochs/QEMU debug console        (kernel-debugcon)
//! 0x0CF8          PCI CONFIG_ADDRESS              (kernel-pci, PortIo transport)
//! 0x0CFC-0x0CFF   PCI CONFIG_DATA                 (kernel-pci, PortIo transport)
//! BAR-assigned    16x50 UART register blocks      (kernel-serial)
//! ```
//!
//! The PCI legacy configuration mechanism is the reason for the 32-bit variants:
//! the address register must be written as a full dword, and the data register
//! is read and written as a dword.
//!
//! ## Safety
//!
//! Every function is `unsafe`. Callers must uphold:
//! - **Privilege:** CPL0, or IOPL / the I/O permission bitmap grants access to
//!   the port. Otherwise the CPU raises `#GP`.
//! - **Correct port:** the port belongs to the intended device, and the access
//!   width matches the register width.
//! - **Serialization:** multi-step protocols (index register, then data register)
//!   are not atomic. Only one agent may drive such a sequence at a time.
//! - **Ordering:** `in`/`out` are ordered with respect to each other but are not
//!   general memory fences.
//!
//! ## Availability
//!
//! Only compiled on `x86`/`x86_64`. Other architectures reach their devices
//! through MMIO and never link against this crate's functions.

#![cfg_attr(not(any(test, doctest)), no_std)]
#![allow(unsafe_code)]

#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
mod x86 {
    /// Write one byte to an I/O port.
    ///
    /// # Safety
    /// See the [crate-level](crate) requirements.
    #[inline]
    pub unsafe fn outb(port: u16, val: u8) {
        unsafe {
            core::arch::asm!("out dx, al", in("dx") port, in("al") val, options(nomem, nostack, preserves_flags));
        }
    }

    /// Read one byte from an I/O port.
    ///
    /// # Safety
    /// See the [crate-level](crate) requirements.
    #[inline]
    pub unsafe fn inb(port: u16) -> u8 {
        let mut v: u8;
        unsafe {
            core::arch::asm!("in al, dx", in("dx") port, out("al") v, options(nomem, nostack, preserves_flags));
        }
        v
    }

    /// Write one 32-bit double word to an I/O port.
    ///
    /// # Safety
    /// See the [crate-level](crate) requirements. `port` should be 4-byte aligned.
    #[inline]
    pub unsafe fn outl(port: u16, val: u32) {
        unsafe {
            core::arch::asm!("out dx, eax", in("dx") port, in("eax") val, options(nomem, nostack, preserves_flags));
        }
    }

    /// Read one 32-bit double word from an I/O port.
    ///
    /// # Safety
    /// See the [crate-level](crate) requirements. `port` should be 4-byte aligned.
    #[inline]
    pub unsafe fn inl(port: u16) -> u32 {
        let mut v: u32;
        unsafe {
            core::arch::asm!("in eax, dx", in("dx") port, out("eax") v, options(nomem, nostack, preserves_flags));
        }
        v
    }
}

#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
pub use x86::{inb, inl, outb, outl};
