//! # Early Debug Console
//!
//! Byte-oriented diagnostic output for bring-up code that runs before any
//! driver, allocator or scheduler exists. Everything here works on the boot
//! thread with nothing but a single output register.
//!
//! ## Output Path
//!
//! ```text
//! log::info!(..)                 debug_trace!(..)
//!     ↓                               ↓
//! DebugLogger (log::Log)        debug_fmt::debug_write
//!     ↓                               ↓
//! SinkWriter (fmt::Write)  ←──────────┘
//!     ↓
//! DebugSink::put_byte
//!     ↓
//! port 0xE9 │ MMIO UART register │ PCI-discovered 16x50 UART
//! ```
//!
//! ## Sinks
//!
//! * [`PortSink`]: one x86 I/O port. [`PortSink::BOCHS`] is the Bochs/QEMU
//!   debug console at `0xE9` (`-debugcon stdio` on the QEMU command line).
//! * [`MmioSink`]: one memory-mapped byte register, e.g. the PL011 data
//!   register of the QEMU `virt` machine at `0x0900_0000`.
//! * Any other type implementing [`DebugSink`], such as the serial driver's UART.
//!
//! ## Logger
//!
//! [`DebugLogger`] routes `log` records to a sink as `"[LEVEL] target: message\n"`
//! without allocating. It is installed from a `static`:
//!
//! ```rust,no_run
//! use kernel_debugcon::{DebugLogger, PortSink};
//! use log::LevelFilter;
//!
//! static LOGGER: DebugLogger<PortSink> = DebugLogger::new(LevelFilter::Debug, &PortSink::BOCHS);
//!
//! LOGGER.init().expect("logger installed once");
//! log::info!("console up");
//! ```
//!
//! ## Feature `enabled`
//!
//! On by default. When disabled, [`debug_trace!`] compiles to nothing and no
//! port access is emitted by it. The logger and sinks remain available.

#![cfg_attr(not(any(test, doctest)), no_std)]
#![allow(unsafe_code)]

mod logger;
mod sink;

pub use logger::DebugLogger;
pub use sink::{DebugSink, MmioSink, PortSink, SinkWriter};

#[cfg(feature = "enabled")]
#[doc(hidden)]
pub mod debug_fmt {
    use crate::SinkWriter;
    use core::fmt;

    /// Format straight onto the architecture's default debug sink.
    #[doc(hidden)]
    #[inline]
    pub fn debug_write(args: fmt::Arguments) {
        #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
        {
            // Best-effort output; nobody can act on a failed debug write.
            let _ = fmt::write(&mut SinkWriter::new(&crate::PortSink::BOCHS), args);
        }

        #[cfg(target_arch = "aarch64")]
        {
            // SAFETY: the virt machine maps its PL011 data register here.
            let sink = unsafe { crate::MmioSink::new(0x0900_0000) };
            let _ = fmt::write(&mut SinkWriter::new(&sink), args);
        }

        #[cfg(not(any(target_arch = "x86", target_arch = "x86_64", target_arch = "aarch64")))]
        let _ = args;
    }
}

#[cfg(not(feature = "enabled"))]
#[doc(hidden)]
pub mod debug_fmt {
    use core::fmt;

    #[doc(hidden)]
    #[inline(always)]
    #[allow(clippy::inline_always)]
    pub const fn debug_write(_: fmt::Arguments) {}
}

/// Formatted output directly to the architecture debug console, bypassing `log`.
///
/// ```rust,ignore
/// debug_trace!("bar_ofs {:#x}\n", offset);
/// ```
#[macro_export]
macro_rules! debug_trace {
    ($($arg:tt)*) => {{
        $crate::debug_fmt::debug_write(core::format_args!($($arg)*));
    }};
}
