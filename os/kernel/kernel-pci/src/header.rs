//! # Configuration header layout
//!
//! The first 64 bytes of every function's configuration space. Type 0 is an
//! ordinary endpoint, type 1 a PCI-to-PCI bridge; both share the first 16
//! bytes.
//!
//! ```text
//! 0x00 ┌──────────────┬──────────────┐
//!      │  device id   │  vendor id   │
//! 0x04 ├──────────────┼──────────────┤
//!      │    status    │   command    │
//! 0x08 ├──────┬───────┴──────┬───────┤
//!      │class │ subclass│prog│  rev  │
//! 0x0C ├──────┼─────────┼────┴───────┤
//!      │ BIST │ hdr type│ lat │ cache│
//! 0x10 ├──────┴─────────┴─────┴──────┤
//!      │  BAR0 .. BAR5 (type 0)      │
//!      │  BAR0, BAR1, bus numbers    │
//!      │  and windows (type 1)       │
//! 0x3C ├──────┬─────────┬────────────┤
//!      │ ...  │ int pin │  int line  │
//! 0x40 └──────┴─────────┴────────────┘
//! ```
//!
//! Register access goes through offsets; [`ConfigHeader`] only pins the layout
//! down so the offsets can be checked at compile time.

use bitfield_struct::bitfield;
use core::mem::offset_of;

pub const VENDOR_ID: u16 = 0x00;
pub const DEVICE_ID: u16 = 0x02;
pub const COMMAND: u16 = 0x04;
pub const STATUS: u16 = 0x06;
pub const REVISION: u16 = 0x08;
pub const PROG_IF: u16 = 0x09;
pub const SUBCLASS: u16 = 0x0A;
pub const CLASS: u16 = 0x0B;
pub const CACHE_LINE_SIZE: u16 = 0x0C;
pub const LATENCY_TIMER: u16 = 0x0D;
pub const HEADER_TYPE: u16 = 0x0E;
pub const BIST: u16 = 0x0F;
pub const BAR0: u16 = 0x10;
pub const CARDBUS_CIS: u16 = 0x28;
pub const SUBSYSTEM_VENDOR_ID: u16 = 0x2C;
pub const SUBSYSTEM_ID: u16 = 0x2E;
pub const EXPANSION_ROM: u16 = 0x30;
pub const CAPABILITIES: u16 = 0x34;
pub const INTERRUPT_LINE: u16 = 0x3C;
pub const INTERRUPT_PIN: u16 = 0x3D;
pub const MIN_GRANT: u16 = 0x3E;
pub const MAX_LATENCY: u16 = 0x3F;

/// Type 1 (bridge) bus number registers.
pub const PRIMARY_BUS: u16 = 0x18;
pub const SECONDARY_BUS: u16 = 0x19;
pub const SUBORDINATE_BUS: u16 = 0x1A;

/// Vendor id read back from an empty slot.
pub const VENDOR_NONE: u16 = 0xFFFF;

/// BAR flag bits (low bits of the register).
pub const BAR_IO: u32 = 0x1;
pub const BAR_TYPE_MASK: u32 = 0x6;
pub const BAR_TYPE_64: u32 = 0x4;
pub const BAR_PREFETCHABLE: u32 = 0x8;

/// Address bits of a memory BAR.
pub const BAR_MEM_ADDR_MASK: u32 = !0xF;
/// Address bits of an I/O BAR.
pub const BAR_IO_ADDR_MASK: u32 = !0x3;

/// Offset of BAR register `index`.
///
/// # Panics
/// If `index > 5`.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub const fn bar_offset(index: usize) -> u16 {
    assert!(index < 6, "BAR index out of range");
    BAR0 + 4 * index as u16
}

/// Type 0 configuration header.
#[repr(C)]
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct ConfigHeader {
    pub vendor_id: u16,
    pub device_id: u16,
    pub command: u16,
    pub status: u16,
    pub revision: u8,
    pub prog_if: u8,
    pub subclass: u8,
    pub class: u8,
    pub cache_line_size: u8,
    pub latency_timer: u8,
    pub header_type: u8,
    pub bist: u8,
    pub bars: [u32; 6],
    pub cardbus_cis: u32,
    pub subsystem_vendor_id: u16,
    pub subsystem_id: u16,
    pub expansion_rom: u32,
    pub capabilities: u8,
    pub _reserved: [u8; 7],
    pub interrupt_line: u8,
    pub interrupt_pin: u8,
    pub min_grant: u8,
    pub max_latency: u8,
}

/// Type 1 (PCI-to-PCI bridge) configuration header, up to the bus numbers.
#[repr(C)]
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct BridgeHeaderPrefix {
    pub common: [u8; 16],
    pub bars: [u32; 2],
    pub primary_bus: u8,
    pub secondary_bus: u8,
    pub subordinate_bus: u8,
    pub secondary_latency: u8,
}

const _: () = {
    assert!(size_of::<ConfigHeader>() == 0x40);
    assert!(offset_of!(ConfigHeader, vendor_id) == VENDOR_ID as usize);
    assert!(offset_of!(ConfigHeader, device_id) == DEVICE_ID as usize);
    assert!(offset_of!(ConfigHeader, command) == COMMAND as usize);
    assert!(offset_of!(ConfigHeader, status) == STATUS as usize);
    assert!(offset_of!(ConfigHeader, revision) == REVISION as usize);
    assert!(offset_of!(ConfigHeader, prog_if) == PROG_IF as usize);
    assert!(offset_of!(ConfigHeader, subclass) == SUBCLASS as usize);
    assert!(offset_of!(ConfigHeader, class) == CLASS as usize);
    assert!(offset_of!(ConfigHeader, header_type) == HEADER_TYPE as usize);
    assert!(offset_of!(ConfigHeader, bars) == BAR0 as usize);
    assert!(offset_of!(ConfigHeader, cardbus_cis) == CARDBUS_CIS as usize);
    assert!(offset_of!(ConfigHeader, subsystem_vendor_id) == SUBSYSTEM_VENDOR_ID as usize);
    assert!(offset_of!(ConfigHeader, subsystem_id) == SUBSYSTEM_ID as usize);
    assert!(offset_of!(ConfigHeader, expansion_rom) == EXPANSION_ROM as usize);
    assert!(offset_of!(ConfigHeader, capabilities) == CAPABILITIES as usize);
    assert!(offset_of!(ConfigHeader, interrupt_line) == INTERRUPT_LINE as usize);
    assert!(offset_of!(ConfigHeader, interrupt_pin) == INTERRUPT_PIN as usize);
    assert!(offset_of!(ConfigHeader, max_latency) == MAX_LATENCY as usize);

    assert!(offset_of!(BridgeHeaderPrefix, primary_bus) == PRIMARY_BUS as usize);
    assert!(offset_of!(BridgeHeaderPrefix, secondary_bus) == SECONDARY_BUS as usize);
    assert!(offset_of!(BridgeHeaderPrefix, subordinate_bus) == SUBORDINATE_BUS as usize);
};

/// Command register (offset 0x04).
#[bitfield(u16)]
#[derive(Eq, PartialEq)]
pub struct CommandRegister {
    /// Respond to I/O space accesses (bit 0).
    pub io_space: bool,
    /// Respond to memory space accesses (bit 1).
    pub memory_space: bool,
    /// May act as bus master (bit 2).
    pub bus_master: bool,
    /// Special cycles (bit 3).
    pub special_cycles: bool,
    /// Memory write and invalidate (bit 4).
    pub memory_write_invalidate: bool,
    /// VGA palette snoop (bit 5).
    pub vga_palette_snoop: bool,
    /// Parity error response (bit 6).
    pub parity_error_response: bool,
    #[bits(1)]
    __reserved: u8,
    /// SERR# enable (bit 8).
    pub serr_enable: bool,
    /// Fast back-to-back enable (bit 9).
    pub fast_back_to_back: bool,
    /// INTx# disable (bit 10).
    pub interrupt_disable: bool,
    #[bits(5)]
    __pad: u8,
}

/// Header type register (offset 0x0E).
#[bitfield(u8)]
#[derive(Eq, PartialEq)]
pub struct HeaderType {
    /// 0 = endpoint, 1 = PCI-to-PCI bridge, 2 = CardBus bridge.
    #[bits(7)]
    pub layout: u8,
    /// Functions 1..7 of this slot may be populated (bit 7).
    pub multifunction: bool,
}

impl HeaderType {
    pub const ENDPOINT: u8 = 0;
    pub const PCI_BRIDGE: u8 = 1;
    pub const CARDBUS_BRIDGE: u8 = 2;

    #[must_use]
    pub const fn is_endpoint(self) -> bool {
        self.layout() == Self::ENDPOINT
    }
}
