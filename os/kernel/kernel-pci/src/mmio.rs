//! Physical windows and how drivers reach them.

/// Half-open physical address range `[start, end)`.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct MmioRange {
    pub start: u64,
    pub end: u64,
}

impl MmioRange {
    /// # Panics
    /// If `start > end`.
    #[must_use]
    pub const fn new(start: u64, end: u64) -> Self {
        assert!(start <= end, "inverted MMIO range");
        Self { start, end }
    }

    #[must_use]
    pub const fn len(&self) -> u64 {
        self.end - self.start
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }

    #[must_use]
    pub const fn contains(&self, addr: u64) -> bool {
        addr >= self.start && addr < self.end
    }
}

/// Turns a BAR's physical address into something a driver can dereference.
///
/// Drivers never cast BAR values to pointers themselves; they ask the mapper.
/// Firmware running with paging off (or an identity map) uses
/// [`IdentityMapper`].
pub trait MmioMapper {
    /// Map `len` bytes at physical address `phys` for uncached device access.
    ///
    /// Returns `None` if the range cannot be mapped.
    ///
    /// # Safety
    /// `phys..phys + len` must be a device region that nothing else maps with
    /// conflicting attributes. The returned pointer is only valid while the
    /// mapping lives.
    unsafe fn map_mmio(&self, phys: u64, len: usize) -> Option<*mut u8>;
}

/// Physical address == virtual address.
#[derive(Debug, Copy, Clone, Default)]
pub struct IdentityMapper;

impl MmioMapper for IdentityMapper {
    unsafe fn map_mmio(&self, phys: u64, len: usize) -> Option<*mut u8> {
        let start = usize::try_from(phys).ok()?;
        start.checked_add(len)?;
        Some(core::ptr::without_provenance_mut(start))
    }
}

impl<M: MmioMapper + ?Sized> MmioMapper for &M {
    unsafe fn map_mmio(&self, phys: u64, len: usize) -> Option<*mut u8> {
        unsafe { (**self).map_mmio(phys, len) }
    }
}
