//! # BAR sizing and placement
//!
//! Each type-0 function has up to six Base Address Registers. The enumerator
//! handles the first [`BAR_COUNT`] of them. For every BAR:
//!
//! ```text
//! read original ──► write all ones ──► read back size mask
//!                                          │
//!                 mask == 0 ◄──────────────┤
//!                 restore original         │ size = -mask
//!                                          ▼
//!        base = align_down(cursor, size) - size       (top-down)
//!                                          │
//!           base < floor ◄─────────────────┤
//!           restore original, warn         │
//!                                          ▼
//!        write base, cursor = base, enable decode in COMMAND
//! ```
//!
//! Memory BARs come from the transport's memory window, I/O BARs from the
//! 16-bit port window. Placement is top-down, so the first BAR found gets the
//! highest addresses. A 64-bit memory BAR consumes the next register as its
//! upper half; that slot is recorded as an upper half and never decoded on
//! its own.

use crate::header::{self, CommandRegister};
use crate::{BarError, ConfigAccess, ConfigSpace, MmioRange, PciAddress, PciConfig};
use log::{debug, trace, warn};

/// BAR registers handled per function.
pub const BAR_COUNT: usize = 5;

/// What the enumerator learned about one BAR register.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct BarRecord {
    raw: u64,
    size: u64,
    upper_half: bool,
    assigned: bool,
}

impl BarRecord {
    /// Marker for the register holding the high dword of a 64-bit BAR.
    pub const UPPER_HALF: Self = Self {
        raw: 0,
        size: 0,
        upper_half: true,
        assigned: false,
    };

    /// A register the enumerator did not (or could not) place.
    #[must_use]
    pub const fn unassigned(raw: u64, size: u64) -> Self {
        Self {
            raw,
            size,
            upper_half: false,
            assigned: false,
        }
    }

    #[must_use]
    pub const fn assigned(raw: u64, size: u64) -> Self {
        Self {
            raw,
            size,
            upper_half: false,
            assigned: true,
        }
    }

    /// Register contents including flag bits. For a 64-bit BAR the high dword
    /// is already combined in.
    #[must_use]
    pub const fn raw(&self) -> u64 {
        self.raw
    }

    /// Address with the flag bits cleared.
    #[must_use]
    pub const fn base(&self) -> u64 {
        if self.is_io() {
            self.raw & !0x3
        } else {
            self.raw & !0xF
        }
    }

    /// Decoded size in bytes. Zero for unimplemented registers.
    #[must_use]
    pub const fn size(&self) -> u64 {
        self.size
    }

    #[must_use]
    pub const fn is_upper_half(&self) -> bool {
        self.upper_half
    }

    /// The enumerator placed this BAR.
    #[must_use]
    pub const fn is_assigned(&self) -> bool {
        self.assigned
    }

    #[must_use]
    pub const fn is_io(&self) -> bool {
        !self.upper_half && self.raw & header::BAR_IO as u64 != 0
    }

    #[must_use]
    pub const fn is_64bit(&self) -> bool {
        !self.upper_half
            && !self.is_io()
            && self.raw & header::BAR_TYPE_MASK as u64 == header::BAR_TYPE_64 as u64
    }

    #[must_use]
    pub const fn is_prefetchable(&self) -> bool {
        !self.upper_half && !self.is_io() && self.raw & header::BAR_PREFETCHABLE as u64 != 0
    }
}

/// Top-down cursors for memory and I/O placement.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct BarAllocator {
    mmio_next: u64,
    mmio_floor: u64,
    io_next: u32,
    io_floor: u32,
}

impl BarAllocator {
    #[must_use]
    pub const fn new(config: &PciConfig, window: MmioRange) -> Self {
        Self {
            mmio_next: match config.mmio_cursor {
                Some(cursor) => cursor,
                None => window.end,
            },
            mmio_floor: match config.mmio_floor {
                Some(floor) => floor,
                None => window.start,
            },
            io_next: config.io_cursor,
            io_floor: config.io_floor,
        }
    }

    /// Next free memory address (exclusive top).
    #[must_use]
    pub const fn mmio_cursor(&self) -> u64 {
        self.mmio_next
    }

    #[must_use]
    pub const fn io_cursor(&self) -> u32 {
        self.io_next
    }

    fn place_mmio(&mut self, addr: PciAddress, bar: usize, size: u64, limit_32: bool) -> Result<u64, BarError> {
        let base = align_down(self.mmio_next, size)
            .checked_sub(size)
            .ok_or(BarError::WindowExhausted { addr, bar, size })?;
        if base < self.mmio_floor {
            return Err(BarError::BelowFloor {
                addr,
                bar,
                base,
                floor: self.mmio_floor,
            });
        }
        if limit_32 && base + size - 1 > u64::from(u32::MAX) {
            return Err(BarError::Beyond32Bit { addr, bar, base });
        }
        self.mmio_next = base;
        Ok(base)
    }

    fn place_io(&mut self, addr: PciAddress, bar: usize, size: u64) -> Result<u64, BarError> {
        let base = align_down(u64::from(self.io_next), size)
            .checked_sub(size)
            .ok_or(BarError::WindowExhausted { addr, bar, size })?;
        if base < u64::from(self.io_floor) {
            return Err(BarError::BelowFloor {
                addr,
                bar,
                base,
                floor: u64::from(self.io_floor),
            });
        }
        // Bounded by io_next, which is a u32.
        self.io_next = u32::try_from(base).unwrap_or(self.io_floor);
        Ok(base)
    }
}

/// Result of [`assign_bars`] for one function.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct BarAssignment {
    pub bars: [BarRecord; BAR_COUNT],
    /// Per register: why placement failed, if it did.
    pub failures: [Option<BarError>; BAR_COUNT],
    pub assigned: usize,
}

impl BarAssignment {
    /// Number of implemented BARs that could not be placed.
    #[must_use]
    pub fn unassigned(&self) -> usize {
        self.failures.iter().flatten().count()
    }
}

/// Size, place and program the BARs of one type-0 function.
///
/// Memory and I/O decoding are enabled in the command register as soon as one
/// BAR of that kind is placed. BARs that cannot be placed are restored to
/// their original value and reported in [`BarAssignment::failures`].
#[allow(clippy::cast_possible_truncation)]
pub fn assign_bars<T: ConfigSpace + ?Sized>(
    cs: &mut T,
    addr: PciAddress,
    alloc: &mut BarAllocator,
) -> BarAssignment {
    let mut out = BarAssignment::default();
    let mut index = 0;

    while index < BAR_COUNT {
        let offset = header::bar_offset(index);
        let original = cs.read_u32(addr, offset);
        let is_io = original & header::BAR_IO != 0;
        let is_64 = !is_io && original & header::BAR_TYPE_MASK == header::BAR_TYPE_64;
        let high_offset = offset + 4;
        let original_high = if is_64 { cs.read_u32(addr, high_offset) } else { 0 };
        let original_full = (u64::from(original_high) << 32) | u64::from(original);

        trace!("{addr} BAR{index}: probing {original:#010x}");

        cs.write_u32(addr, offset, u32::MAX);
        if is_64 {
            cs.write_u32(addr, high_offset, u32::MAX);
        }
        let low = cs.read_u32(addr, offset);
        let high = is_64.then(|| cs.read_u32(addr, high_offset));

        let Some(size) = decoded_size(low, high, is_io) else {
            restore(cs, addr, offset, original, is_64.then_some(original_high));
            out.bars[index] = BarRecord::unassigned(original_full, 0);
            index += 1;
            continue;
        };

        let placed = if is_io {
            alloc.place_io(addr, index, size)
        } else {
            alloc.place_mmio(addr, index, size, !is_64)
        };

        match placed {
            Ok(base) => {
                cs.write_u32(addr, offset, base as u32);
                if is_64 {
                    cs.write_u32(addr, high_offset, (base >> 32) as u32);
                }
                let mut raw = u64::from(cs.read_u32(addr, offset));
                if is_64 {
                    raw |= u64::from(cs.read_u32(addr, high_offset)) << 32;
                }

                enable_decode(cs, addr, is_io);
                out.bars[index] = BarRecord::assigned(raw, size);
                out.assigned += 1;
                debug!(
                    "{addr} BAR{index}: {} {size:#x} bytes at {base:#x}",
                    kind_name(is_io, is_64, raw)
                );
            }
            Err(err) => {
                warn!("{err}");
                restore(cs, addr, offset, original, is_64.then_some(original_high));
                out.bars[index] = BarRecord::unassigned(original_full, size);
                out.failures[index] = Some(err);
            }
        }

        if is_64 {
            if index + 1 < BAR_COUNT {
                out.bars[index + 1] = BarRecord::UPPER_HALF;
            }
            index += 2;
        } else {
            index += 1;
        }
    }

    out
}

/// Size of a BAR from its all-ones readback, or `None` if unimplemented.
///
/// The size is the lowest writable address bit. `high` is the readback of the
/// upper register of a 64-bit BAR; devices that hardwire the upper address
/// bits read it back as zero, as do I/O BARs that decode only 16 bits.
fn decoded_size(low: u32, high: Option<u32>, is_io: bool) -> Option<u64> {
    let low = low & if is_io {
        header::BAR_IO_ADDR_MASK
    } else {
        header::BAR_MEM_ADDR_MASK
    };
    let high = if is_io { 0 } else { high.unwrap_or(0) };
    let mask = (u64::from(high) << 32) | u64::from(low);
    if mask == 0 {
        return None;
    }
    Some(1 << mask.trailing_zeros())
}

fn restore<T: ConfigSpace + ?Sized>(cs: &mut T, addr: PciAddress, offset: u16, low: u32, high: Option<u32>) {
    cs.write_u32(addr, offset, low);
    if let Some(high) = high {
        cs.write_u32(addr, offset + 4, high);
    }
}

fn enable_decode<T: ConfigSpace + ?Sized>(cs: &mut T, addr: PciAddress, is_io: bool) {
    let cmd = CommandRegister::from_bits(cs.read_u16(addr, header::COMMAND));
    let cmd = if is_io {
        cmd.with_io_space(true)
    } else {
        cmd.with_memory_space(true)
    };
    cs.write_u16(addr, header::COMMAND, cmd.into_bits());
}

const fn align_down(value: u64, align: u64) -> u64 {
    value & !(align - 1)
}

fn kind_name(is_io: bool, is_64: bool, raw: u64) -> &'static str {
    match (is_io, is_64, raw & u64::from(header::BAR_PREFETCHABLE) != 0) {
        (true, ..) => "io",
        (false, true, true) => "mem64 prefetchable",
        (false, true, false) => "mem64",
        (false, false, true) => "mem32 prefetchable",
        (false, false, false) => "mem32",
    }
}
