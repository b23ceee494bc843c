//! # Display table
//!
//! Every QEMU/Bochs standard VGA (`1234:1111`) found on the bus becomes a
//! [`Display`]: BAR 0 is the linear framebuffer, BAR 2 the register block.
//!
//! ```text
//!   next_by_vendor_device(1234, 1111)
//!        │
//!        ├─ BAR0 ─► mapper ─► framebuffer
//!        ├─ BAR2 ─► mapper ─► dispi registers, unblank
//!        └─ space_enable
//! ```

use crate::regs::{self, DispiEnable};
use crate::{ColorDepth, DisplayError, DisplayMode};
use alloc::vec::Vec;
use kernel_pci::class_code::vendor;
use kernel_pci::{ConfigSpace, MmioMapper, PciAddress, PciBus};
use log::{debug, info, warn};

pub const VENDOR_ID: u16 = vendor::QEMU;
pub const DEVICE_ID: u16 = 0x1111;

/// QEMU stops coping well beyond this.
pub const MAX_DISPLAYS: usize = 8;

pub const FRAMEBUFFER_BAR: usize = 0;
pub const MMIO_BAR: usize = 2;

/// The checkerboard's two colors.
pub const PATTERN_LIGHT: u32 = 0x0012_3456;
pub const PATTERN_DARK: u32 = 0x0065_4321;

/// Pattern color at `(x, y)` on display `display`.
///
/// 64-pixel squares, tinted by bits 0..2 of the display index so that
/// neighbouring screens can be told apart.
#[must_use]
pub const fn test_pattern_pixel(display: usize, x: usize, y: usize) -> u32 {
    let mut pixel = if ((y & 0x40) != 0) ^ ((x & 0x40) != 0) {
        PATTERN_LIGHT
    } else {
        PATTERN_DARK
    };
    if display & 1 != 0 {
        pixel ^= 0x44;
    }
    if display & 2 != 0 {
        pixel ^= 0x4400;
    }
    if display & 4 != 0 {
        pixel ^= 0x44_0000;
    }
    pixel
}

/// Mapped dispi register block.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
struct Registers {
    base: *mut u8,
}

impl Registers {
    fn read(&self, index: usize) -> u16 {
        // SAFETY: `base` maps at least `regs::MMIO_LEN` bytes of BAR 2.
        unsafe { self.base.add(regs::dispi_offset(index)).cast::<u16>().read_volatile() }
    }

    fn write(&self, index: usize, value: u16) {
        // SAFETY: as above.
        unsafe { self.base.add(regs::dispi_offset(index)).cast::<u16>().write_volatile(value) }
    }

    fn read_ext(&self, offset: usize) -> u32 {
        // SAFETY: as above.
        unsafe { self.base.add(offset).cast::<u32>().read_volatile() }
    }

    fn unblank(&self) {
        // SAFETY: as above.
        unsafe { self.base.add(regs::VGA_ATTRIBUTE).write_volatile(regs::VGA_UNBLANK) }
    }
}

/// Where a display's pixels live, valid for the current mode.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Framebuffer {
    /// Start of the linear framebuffer.
    pub pixels: *mut u32,
    /// Bytes per scanline.
    pub pitch: usize,
    pub width: usize,
    pub height: usize,
}

/// One attached standard VGA.
#[derive(Debug)]
pub struct Display {
    pub device: usize,
    pub address: PciAddress,
    revision: u8,
    framebuffer_phys: u64,
    framebuffer_len: u64,
    framebuffer: *mut u8,
    regs: Registers,
    mode: Option<DisplayMode>,
}

impl Display {
    #[must_use]
    pub const fn framebuffer_phys(&self) -> u64 {
        self.framebuffer_phys
    }

    #[must_use]
    pub const fn framebuffer_len(&self) -> u64 {
        self.framebuffer_len
    }

    /// The mode last programmed by [`Displays::set_mode`].
    #[must_use]
    pub const fn mode(&self) -> Option<DisplayMode> {
        self.mode
    }

    /// Interface version from the ID register.
    #[must_use]
    pub fn id(&self) -> u16 {
        self.regs.read(regs::INDEX_ID)
    }

    /// Framebuffer byte order marker, on devices with the QEMU extension.
    #[must_use]
    pub fn framebuffer_endianness(&self) -> Option<u32> {
        if self.revision < regs::QEMU_EXT_REVISION {
            return None;
        }
        let size = self.regs.read_ext(regs::QEMU_EXT_SIZE);
        (size >= 8).then(|| self.regs.read_ext(regs::QEMU_EXT_ENDIANNESS))
    }

    fn framebuffer_view(&self) -> Framebuffer {
        let (width, height, pitch) = self.mode.map_or((0, 0, 0), |m| {
            (usize::from(m.width), usize::from(m.height), m.pitch())
        });
        Framebuffer {
            pixels: self.framebuffer.cast(),
            pitch,
            width,
            height,
        }
    }
}

/// All attached displays, in device table order.
#[derive(Debug, Default)]
pub struct Displays {
    displays: Vec<Display>,
}

impl Displays {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            displays: Vec::new(),
        }
    }

    /// Attach every standard VGA on an enumerated `bus`.
    pub fn probe<T, M>(bus: &mut PciBus<'_, T>, mapper: &M) -> Self
    where
        T: ConfigSpace,
        M: MmioMapper + ?Sized,
    {
        let mut displays = Self::new();
        let mut cursor = None;
        while let Some(index) = bus
            .devices()
            .next_by_vendor_device(cursor, Some(VENDOR_ID), Some(DEVICE_ID))
        {
            cursor = Some(index);
            match displays.attach(bus, index, mapper) {
                Ok(()) => {}
                Err(e @ DisplayError::TooManyDisplays { .. }) => {
                    warn!("dispi: {e}");
                    break;
                }
                Err(e) => warn!("dispi: {e}"),
            }
        }
        displays
    }

    /// Attach device `index` of `bus`.
    ///
    /// # Errors
    /// The table is full, a BAR is missing or cannot be mapped.
    pub fn attach<T, M>(&mut self, bus: &mut PciBus<'_, T>, index: usize, mapper: &M) -> Result<(), DisplayError>
    where
        T: ConfigSpace,
        M: MmioMapper + ?Sized,
    {
        if self.displays.len() >= MAX_DISPLAYS {
            return Err(DisplayError::TooManyDisplays { capacity: MAX_DISPLAYS });
        }
        let Some(dev) = bus.device(index) else {
            return Err(DisplayError::NoSuchDisplay { index });
        };
        let address = dev.address;
        let revision = dev.revision;

        let memory_bar = |bar: usize| {
            dev.bar(bar)
                .filter(|b| b.is_assigned() && !b.is_io())
                .map(|b| (b.base(), b.size()))
                .ok_or(DisplayError::MissingBar { addr: address, bar })
        };
        let (fb_phys, fb_len) = memory_bar(FRAMEBUFFER_BAR)?;
        let (mmio_phys, mmio_len) = memory_bar(MMIO_BAR)?;
        if mmio_len < regs::MMIO_LEN as u64 {
            return Err(DisplayError::MissingBar { addr: address, bar: MMIO_BAR });
        }

        let fb_map_len = usize::try_from(fb_len).map_err(|_| DisplayError::MapFailed {
            addr: address,
            bar: FRAMEBUFFER_BAR,
        })?;
        // SAFETY: both BARs were placed by enumeration and belong to this device.
        let framebuffer = unsafe { mapper.map_mmio(fb_phys, fb_map_len) }.ok_or(DisplayError::MapFailed {
            addr: address,
            bar: FRAMEBUFFER_BAR,
        })?;
        // SAFETY: as above.
        let mmio = unsafe { mapper.map_mmio(mmio_phys, regs::MMIO_LEN) }.ok_or(DisplayError::MapFailed {
            addr: address,
            bar: MMIO_BAR,
        })?;

        bus.space_enable(index, true, true);

        let block = Registers { base: mmio };
        block.unblank();
        debug!("dispi: {address} registers at {mmio_phys:#x}");

        let display = Display {
            device: index,
            address,
            revision,
            framebuffer_phys: fb_phys,
            framebuffer_len: fb_len,
            framebuffer,
            regs: block,
            mode: None,
        };
        info!(
            "dispi: {} {}KiB framebuffer at {:#x}, id {:#06x}",
            address,
            fb_len >> 10,
            fb_phys,
            display.id()
        );
        self.displays.push(display);
        Ok(())
    }

    #[must_use]
    pub fn display_count(&self) -> usize {
        self.displays.len()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Display> {
        self.displays.get(index)
    }

    #[must_use]
    pub fn iter(&self) -> core::slice::Iter<'_, Display> {
        self.displays.iter()
    }

    fn display(&self, index: usize) -> Result<&Display, DisplayError> {
        self.displays.get(index).ok_or(DisplayError::NoSuchDisplay { index })
    }

    /// Disable the display, program `mode`, then apply its enable state.
    ///
    /// # Errors
    /// Unknown display, a visible area that leaves the virtual screen, or a
    /// virtual screen larger than the framebuffer.
    pub fn set_mode(&mut self, index: usize, mode: DisplayMode) -> Result<(), DisplayError> {
        let display = self.display(index)?;
        mode.check_viewport(mode.x, mode.y)?;
        let required = mode.required_bytes();
        if required > display.framebuffer_len {
            return Err(DisplayError::ModeTooLarge {
                required,
                available: display.framebuffer_len,
            });
        }

        let block = display.regs;
        let (virt_width, virt_height) = mode.virtual_size();
        block.write(regs::INDEX_ENABLE, DispiEnable::DISABLED.into_bits());
        block.write(regs::INDEX_XRES, mode.width);
        block.write(regs::INDEX_YRES, mode.height);
        block.write(regs::INDEX_BPP, mode.depth.bits());
        block.write(regs::INDEX_BANK, 0);
        block.write(regs::INDEX_X_OFFSET, mode.x);
        block.write(regs::INDEX_Y_OFFSET, mode.y);
        block.write(regs::INDEX_VIRT_WIDTH, virt_width);
        block.write(regs::INDEX_VIRT_HEIGHT, virt_height);

        self.displays[index].mode = Some(mode);
        self.set_enable(index, mode.enabled, mode.no_clear)
    }

    /// # Errors
    /// Unknown display.
    pub fn set_enable(&mut self, index: usize, enabled: bool, no_clear: bool) -> Result<(), DisplayError> {
        let display = self.display(index)?;
        let value = if enabled {
            DispiEnable::lfb(no_clear)
        } else {
            DispiEnable::DISABLED
        };
        display.regs.write(regs::INDEX_ENABLE, value.into_bits());
        if let Some(mode) = self.displays[index].mode.as_mut() {
            mode.enabled = enabled;
            mode.no_clear = no_clear;
        }
        Ok(())
    }

    /// Pan to `(x, y)` within the virtual screen.
    ///
    /// # Errors
    /// Unknown display, or a position that pushes the visible area past the
    /// virtual screen.
    pub fn set_pos(&mut self, index: usize, x: u16, y: u16) -> Result<(), DisplayError> {
        let display = self.display(index)?;
        if let Some(mode) = display.mode {
            mode.check_viewport(x, y)?;
        }
        display.regs.write(regs::INDEX_X_OFFSET, x);
        display.regs.write(regs::INDEX_Y_OFFSET, y);
        if let Some(mode) = self.displays[index].mode.as_mut() {
            mode.x = x;
            mode.y = y;
        }
        Ok(())
    }

    /// Framebuffer of display `index`; zero-sized until a mode is set.
    ///
    /// # Errors
    /// Unknown display.
    pub fn framebuffer(&self, index: usize) -> Result<Framebuffer, DisplayError> {
        self.display(index).map(Display::framebuffer_view)
    }

    /// Paint the visible area with the identification checkerboard.
    ///
    /// # Errors
    /// Unknown display, or a mode other than 32 bpp.
    pub fn fill_test_pattern(&mut self, index: usize) -> Result<(), DisplayError> {
        let display = self.display(index)?;
        if let Some(mode) = display.mode
            && mode.depth != ColorDepth::Bpp32
        {
            return Err(DisplayError::UnsupportedDepth {
                bpp: mode.depth.bits(),
            });
        }

        let fb = display.framebuffer_view();
        let row_bytes = fb.width * size_of::<u32>();
        let len = usize::try_from(display.framebuffer_len).unwrap_or(usize::MAX);
        let rows = if fb.pitch == 0 || row_bytes > len {
            0
        } else {
            fb.height.min((len - row_bytes) / fb.pitch + 1)
        };
        for y in 0..rows {
            // SAFETY: row `y` ends at `y * pitch + width * 4 <= framebuffer_len`
            // and starts on a pixel boundary.
            let row = unsafe {
                core::slice::from_raw_parts_mut(fb.pixels.cast::<u8>().add(y * fb.pitch).cast::<u32>(), fb.width)
            };
            for (x, pixel) in row.iter_mut().enumerate() {
                *pixel = test_pattern_pixel(index, x, y);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pattern_alternates_every_64_pixels() {
        assert_eq!(test_pattern_pixel(0, 0, 0), PATTERN_DARK);
        assert_eq!(test_pattern_pixel(0, 63, 63), PATTERN_DARK);
        assert_eq!(test_pattern_pixel(0, 64, 0), PATTERN_LIGHT);
        assert_eq!(test_pattern_pixel(0, 0, 64), PATTERN_LIGHT);
        assert_eq!(test_pattern_pixel(0, 64, 64), PATTERN_DARK);
    }

    #[test]
    fn pattern_tint_follows_index_bits() {
        assert_eq!(test_pattern_pixel(1, 0, 0), PATTERN_DARK ^ 0x44);
        assert_eq!(test_pattern_pixel(2, 0, 0), PATTERN_DARK ^ 0x4400);
        assert_eq!(test_pattern_pixel(4, 0, 0), PATTERN_DARK ^ 0x44_0000);
        assert_eq!(test_pattern_pixel(7, 64, 0), PATTERN_LIGHT ^ 0x44_4444);
    }
}
