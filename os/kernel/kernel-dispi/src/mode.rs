use crate::DisplayError;

/// Pixel formats the dispi interface accepts in linear framebuffer mode.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
#[repr(u16)]
pub enum ColorDepth {
    Bpp8 = 8,
    Bpp15 = 15,
    Bpp16 = 16,
    Bpp24 = 24,
    Bpp32 = 32,
}

impl ColorDepth {
    /// # Errors
    /// [`DisplayError::UnsupportedDepth`] for anything but 8, 15, 16, 24, 32.
    pub const fn from_bits(bpp: u16) -> Result<Self, DisplayError> {
        match bpp {
            8 => Ok(Self::Bpp8),
            15 => Ok(Self::Bpp15),
            16 => Ok(Self::Bpp16),
            24 => Ok(Self::Bpp24),
            32 => Ok(Self::Bpp32),
            _ => Err(DisplayError::UnsupportedDepth { bpp }),
        }
    }

    #[must_use]
    pub const fn bits(self) -> u16 {
        self as u16
    }

    /// 15-bit pixels occupy two bytes.
    #[must_use]
    pub const fn bytes_per_pixel(self) -> usize {
        match self {
            Self::Bpp8 => 1,
            Self::Bpp15 | Self::Bpp16 => 2,
            Self::Bpp24 => 3,
            Self::Bpp32 => 4,
        }
    }
}

/// A display mode.
///
/// ```rust
/// use kernel_dispi::{ColorDepth, DisplayMode};
///
/// let mode = DisplayMode::default().with_resolution(800, 600);
/// assert_eq!(mode.depth, ColorDepth::Bpp32);
/// assert_eq!(mode.virtual_size(), (800, 600));
/// assert_eq!(mode.pitch(), 3200);
/// ```
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct DisplayMode {
    pub width: u16,
    pub height: u16,
    pub depth: ColorDepth,
    /// Panning offset into the virtual screen.
    pub x: u16,
    pub y: u16,
    /// Virtual screen size in pixels; `None` uses the visible size.
    pub virt_width: Option<u16>,
    pub virt_height: Option<u16>,
    pub enabled: bool,
    /// Keep framebuffer contents across the switch.
    pub no_clear: bool,
}

impl DisplayMode {
    pub const DEFAULT: Self = Self {
        width: 1024,
        height: 768,
        depth: ColorDepth::Bpp32,
        x: 0,
        y: 0,
        virt_width: None,
        virt_height: None,
        enabled: true,
        no_clear: false,
    };

    #[must_use]
    pub const fn with_resolution(mut self, width: u16, height: u16) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    #[must_use]
    pub const fn with_depth(mut self, depth: ColorDepth) -> Self {
        self.depth = depth;
        self
    }

    #[must_use]
    pub const fn with_offset(mut self, x: u16, y: u16) -> Self {
        self.x = x;
        self.y = y;
        self
    }

    #[must_use]
    pub const fn with_virtual_size(mut self, width: u16, height: u16) -> Self {
        self.virt_width = Some(width);
        self.virt_height = Some(height);
        self
    }

    #[must_use]
    pub const fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    #[must_use]
    pub const fn with_no_clear(mut self, no_clear: bool) -> Self {
        self.no_clear = no_clear;
        self
    }

    /// Virtual width and height in pixels.
    #[must_use]
    pub const fn virtual_size(&self) -> (u16, u16) {
        let w = match self.virt_width {
            Some(w) => w,
            None => self.width,
        };
        let h = match self.virt_height {
            Some(h) => h,
            None => self.height,
        };
        (w, h)
    }

    /// The visible area panned to `(x, y)` lies inside the virtual screen.
    #[must_use]
    pub const fn viewport_fits(&self, x: u16, y: u16) -> bool {
        let (virt_width, virt_height) = self.virtual_size();
        x as u32 + self.width as u32 <= virt_width as u32
            && y as u32 + self.height as u32 <= virt_height as u32
    }

    /// # Errors
    /// [`DisplayError::ViewportOutOfRange`] if [`Self::viewport_fits`] fails
    /// for `(x, y)`.
    pub const fn check_viewport(&self, x: u16, y: u16) -> Result<(), DisplayError> {
        if self.viewport_fits(x, y) {
            return Ok(());
        }
        let (virt_width, virt_height) = self.virtual_size();
        Err(DisplayError::ViewportOutOfRange {
            width: self.width,
            height: self.height,
            x,
            y,
            virt_width,
            virt_height,
        })
    }

    /// Bytes per scanline.
    #[must_use]
    pub const fn pitch(&self) -> usize {
        self.virtual_size().0 as usize * self.depth.bytes_per_pixel()
    }

    /// Framebuffer bytes the virtual screen occupies.
    #[must_use]
    pub const fn required_bytes(&self) -> u64 {
        self.pitch() as u64 * self.virtual_size().1 as u64
    }
}

impl Default for DisplayMode {
    fn default() -> Self {
        Self::DEFAULT
    }
}
