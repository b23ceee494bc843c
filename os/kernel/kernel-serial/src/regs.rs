//! 16550 register map.
//!
//! ```text
//! off  DLAB=0 read   DLAB=0 write   DLAB=1
//!  0   RBR           THR            DLL (divisor low)
//!  1   IER           IER            DLM (divisor high)
//!  2   IIR           FCR
//!  3   LCR           LCR
//!  4   MCR           MCR
//!  5   LSR
//!  6   MSR
//!  7   SCR           SCR
//! ```

use bitfield_struct::bitfield;

pub const DATA: u8 = 0;
pub const INTERRUPT_ENABLE: u8 = 1;
pub const DIVISOR_LOW: u8 = 0;
pub const DIVISOR_HIGH: u8 = 1;
pub const FIFO_CONTROL: u8 = 2;
pub const LINE_CONTROL: u8 = 3;
pub const MODEM_CONTROL: u8 = 4;
pub const LINE_STATUS: u8 = 5;
pub const SCRATCH: u8 = 7;

/// Size of the register block in bytes.
pub const BLOCK_LEN: usize = 8;

/// Input clock divided by 16.
pub const BASE_BAUD: u32 = 115_200;

/// Line control register.
#[bitfield(u8)]
#[derive(Eq, PartialEq)]
pub struct LineControl {
    /// Data bits minus five.
    #[bits(2)]
    pub word_length: u8,
    /// Two stop bits (1.5 for five-bit words).
    pub extra_stop: bool,
    #[bits(3)]
    pub parity: u8,
    pub break_enable: bool,
    /// Divisor latch access.
    pub dlab: bool,
}

impl LineControl {
    /// 8 data bits, no parity, one stop bit.
    pub const EIGHT_N_ONE: Self = Self::new().with_word_length(3);
}

/// FIFO control register (write-only).
#[bitfield(u8)]
#[derive(Eq, PartialEq)]
pub struct FifoControl {
    pub enable: bool,
    pub clear_rx: bool,
    pub clear_tx: bool,
    pub dma_mode: bool,
    #[bits(2)]
    __reserved: u8,
    /// Receive interrupt threshold: 1, 4, 8 or 14 bytes.
    #[bits(2)]
    pub rx_trigger: u8,
}

/// Modem control register.
#[bitfield(u8)]
#[derive(Eq, PartialEq)]
pub struct ModemControl {
    pub dtr: bool,
    pub rts: bool,
    pub out1: bool,
    /// Gates the interrupt line on PC-style boards.
    pub out2: bool,
    pub loopback: bool,
    #[bits(3)]
    __reserved: u8,
}

/// Line status register.
#[bitfield(u8)]
#[derive(Eq, PartialEq)]
pub struct LineStatus {
    pub data_ready: bool,
    pub overrun_error: bool,
    pub parity_error: bool,
    pub framing_error: bool,
    pub break_interrupt: bool,
    /// Transmit holding register empty (bit 5).
    pub thr_empty: bool,
    pub transmitter_idle: bool,
    pub fifo_error: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_encodings() {
        assert_eq!(LineControl::EIGHT_N_ONE.into_bits(), 0x03);
        assert_eq!(LineControl::new().with_dlab(true).into_bits(), 0x80);
        let fifo = FifoControl::new()
            .with_enable(true)
            .with_clear_rx(true)
            .with_clear_tx(true)
            .with_rx_trigger(3);
        assert_eq!(fifo.into_bits(), 0xC7);
        let mcr = ModemControl::new().with_dtr(true).with_rts(true).with_out2(true);
        assert_eq!(mcr.into_bits(), 0x0B);
        assert!(LineStatus::from_bits(0x20).thr_empty());
        assert!(!LineStatus::from_bits(0x1F).thr_empty());
    }
}
