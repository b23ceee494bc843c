//! # 16550 UART
//!
//! Polled transmit only. The register block is reached through
//! [`UartRegisters`], so the same driver serves legacy I/O ports, PCI memory
//! BARs and, in tests, a recording fake.

use crate::regs::{self, FifoControl, LineControl, LineStatus, ModemControl};
use core::fmt;
use kernel_debugcon::DebugSink;

/// Byte-wide access to the eight UART registers.
pub trait UartRegisters {
    fn read(&self, reg: u8) -> u8;
    fn write(&self, reg: u8, value: u8);
}

impl<R: UartRegisters + ?Sized> UartRegisters for &R {
    #[inline]
    fn read(&self, reg: u8) -> u8 {
        (**self).read(reg)
    }

    #[inline]
    fn write(&self, reg: u8, value: u8) {
        (**self).write(reg, value);
    }
}

/// Registers at consecutive I/O ports starting at `base`.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct PortRegisters {
    base: u16,
}

impl PortRegisters {
    /// The first legacy COM port.
    pub const COM1: Self = Self { base: 0x3F8 };

    /// # Safety
    /// `base..base + 8` must decode to a 16550-compatible UART.
    #[must_use]
    pub const unsafe fn new(base: u16) -> Self {
        Self { base }
    }

    #[must_use]
    pub const fn base(&self) -> u16 {
        self.base
    }
}

impl UartRegisters for PortRegisters {
    #[inline]
    fn read(&self, reg: u8) -> u8 {
        #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
        {
            // SAFETY: guaranteed by the constructor contract.
            unsafe { kernel_ports::inb(self.base + u16::from(reg)) }
        }

        #[cfg(not(any(target_arch = "x86", target_arch = "x86_64")))]
        {
            let _ = reg;
            0
        }
    }

    #[inline]
    fn write(&self, reg: u8, value: u8) {
        #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
        // SAFETY: guaranteed by the constructor contract.
        unsafe {
            kernel_ports::outb(self.base + u16::from(reg), value);
        }

        #[cfg(not(any(target_arch = "x86", target_arch = "x86_64")))]
        let _ = (reg, value);
    }
}

/// Registers at consecutive bytes of a mapped memory BAR.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct MmioRegisters {
    base: *mut u8,
}

impl MmioRegisters {
    /// # Safety
    /// `base..base + 8` must stay mapped as device memory for the lifetime of
    /// the value and every copy of it.
    #[must_use]
    pub const unsafe fn new(base: *mut u8) -> Self {
        Self { base }
    }
}

impl UartRegisters for MmioRegisters {
    #[inline]
    fn read(&self, reg: u8) -> u8 {
        // SAFETY: guaranteed by the constructor contract.
        unsafe { self.base.add(usize::from(reg)).read_volatile() }
    }

    #[inline]
    fn write(&self, reg: u8, value: u8) {
        // SAFETY: guaranteed by the constructor contract.
        unsafe { self.base.add(usize::from(reg)).write_volatile(value) }
    }
}

/// Either kind of register block, chosen at discovery time.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum UartBlock {
    Port(PortRegisters),
    Mmio(MmioRegisters),
}

impl UartBlock {
    #[must_use]
    pub const fn is_mmio(&self) -> bool {
        matches!(self, Self::Mmio(_))
    }
}

impl UartRegisters for UartBlock {
    #[inline]
    fn read(&self, reg: u8) -> u8 {
        match self {
            Self::Port(p) => p.read(reg),
            Self::Mmio(m) => m.read(reg),
        }
    }

    #[inline]
    fn write(&self, reg: u8, value: u8) {
        match self {
            Self::Port(p) => p.write(reg, value),
            Self::Mmio(m) => m.write(reg, value),
        }
    }
}

// SAFETY: every access is a single byte load or store. Concurrent writers
// can interleave characters but cannot corrupt the device.
unsafe impl Send for MmioRegisters {}
unsafe impl Sync for MmioRegisters {}

/// Line settings programmed by [`Uart16550::init`].
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct LineConfig {
    pub baud: u32,
    pub line: LineControl,
}

impl LineConfig {
    /// 115200 baud, 8N1.
    pub const DEFAULT: Self = Self {
        baud: regs::BASE_BAUD,
        line: LineControl::EIGHT_N_ONE,
    };

    #[must_use]
    pub const fn with_baud(mut self, baud: u32) -> Self {
        self.baud = baud;
        self
    }

    /// Divisor latch value; 0 is clamped to 1.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub const fn divisor(&self) -> u16 {
        if self.baud == 0 {
            return 1;
        }
        let d = regs::BASE_BAUD / self.baud;
        if d == 0 {
            1
        } else if d > u16::MAX as u32 {
            u16::MAX
        } else {
            d as u16
        }
    }
}

impl Default for LineConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// A polled 16550-compatible UART.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Uart16550<R> {
    regs: R,
}

impl<R: UartRegisters> Uart16550<R> {
    /// Spins on a full transmitter before a byte is dropped.
    pub const TX_SPIN_LIMIT: u32 = 100_000;

    #[must_use]
    pub const fn new(regs: R) -> Self {
        Self { regs }
    }

    #[must_use]
    pub const fn registers(&self) -> &R {
        &self.regs
    }

    /// Program line settings, enable and clear the FIFOs, raise DTR, RTS
    /// and OUT2. Interrupts stay off.
    pub fn init(&self, config: LineConfig) {
        let [lo, hi] = config.divisor().to_le_bytes();

        self.regs.write(regs::INTERRUPT_ENABLE, 0);
        self.regs.write(regs::LINE_CONTROL, LineControl::new().with_dlab(true).into_bits());
        self.regs.write(regs::DIVISOR_LOW, lo);
        self.regs.write(regs::DIVISOR_HIGH, hi);
        self.regs.write(regs::LINE_CONTROL, config.line.with_dlab(false).into_bits());
        self.regs.write(
            regs::FIFO_CONTROL,
            FifoControl::new()
                .with_enable(true)
                .with_clear_rx(true)
                .with_clear_tx(true)
                .with_rx_trigger(3)
                .into_bits(),
        );
        self.regs.write(
            regs::MODEM_CONTROL,
            ModemControl::new()
                .with_dtr(true)
                .with_rts(true)
                .with_out2(true)
                .into_bits(),
        );
    }

    #[must_use]
    pub fn line_status(&self) -> LineStatus {
        LineStatus::from_bits(self.regs.read(regs::LINE_STATUS))
    }

    /// Write the scratch register and read it back. A missing UART fails.
    pub fn probe(&self) -> bool {
        self.regs.write(regs::SCRATCH, 0x5A);
        self.regs.read(regs::SCRATCH) == 0x5A
    }

    /// Wait for the holding register to drain, then send `byte`.
    ///
    /// Returns `false` if the transmitter stayed busy for
    /// [`Self::TX_SPIN_LIMIT`] polls; the byte is dropped.
    pub fn write_byte(&self, byte: u8) -> bool {
        for _ in 0..Self::TX_SPIN_LIMIT {
            if self.line_status().thr_empty() {
                self.regs.write(regs::DATA, byte);
                return true;
            }
            core::hint::spin_loop();
        }
        false
    }

    /// Received byte, if one is waiting.
    pub fn read_byte(&self) -> Option<u8> {
        self.line_status()
            .data_ready()
            .then(|| self.regs.read(regs::DATA))
    }
}

impl<R: UartRegisters> DebugSink for Uart16550<R> {
    #[inline]
    fn put_byte(&self, byte: u8) {
        if byte == b'\n' {
            self.write_byte(b'\r');
        }
        self.write_byte(byte);
    }
}

impl<R: UartRegisters> fmt::Write for Uart16550<R> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.put_bytes(s.as_bytes());
        Ok(())
    }
}
