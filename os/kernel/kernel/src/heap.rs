//! # Boot heap
//!
//! A bump allocator over a fixed arena. Nothing is ever freed; the boot path
//! allocates its tables once and keeps them.
//!
//! ```text
//! arena: [ used ........ | free ................ ]
//!                        ^ cursor (only grows)
//! ```

use core::alloc::{GlobalAlloc, Layout};
use core::cell::UnsafeCell;
use core::sync::atomic::{AtomicUsize, Ordering};

#[repr(C, align(16))]
struct Arena<const N: usize>(UnsafeCell<[u8; N]>);

/// Fixed-size bump heap, usable as `#[global_allocator]`.
pub struct BumpHeap<const N: usize> {
    cursor: AtomicUsize,
    arena: Arena<N>,
}

// SAFETY: the cursor hands out disjoint ranges; the arena is never read here.
unsafe impl<const N: usize> Sync for BumpHeap<N> {}

impl<const N: usize> BumpHeap<N> {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            cursor: AtomicUsize::new(0),
            arena: Arena(UnsafeCell::new([0; N])),
        }
    }

    #[must_use]
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Bytes handed out so far, padding included.
    #[must_use]
    pub fn used(&self) -> usize {
        self.cursor.load(Ordering::Relaxed)
    }

    /// Claim `layout` and return its offset in the arena.
    fn claim(&self, layout: Layout) -> Option<usize> {
        let base = self.arena.0.get().cast::<u8>() as usize;
        let mut current = self.cursor.load(Ordering::Relaxed);
        loop {
            let start = (base + current).checked_next_multiple_of(layout.align())? - base;
            let end = start.checked_add(layout.size())?;
            if end > N {
                return None;
            }
            match self
                .cursor
                .compare_exchange_weak(current, end, Ordering::AcqRel, Ordering::Relaxed)
            {
                Ok(_) => return Some(start),
                Err(seen) => current = seen,
            }
        }
    }
}

impl<const N: usize> Default for BumpHeap<N> {
    fn default() -> Self {
        Self::new()
    }
}

unsafe impl<const N: usize> GlobalAlloc for BumpHeap<N> {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        match self.claim(layout) {
            // SAFETY: `offset + size <= N`.
            Some(offset) => unsafe { self.arena.0.get().cast::<u8>().add(offset) },
            None => core::ptr::null_mut(),
        }
    }

    unsafe fn dealloc(&self, _ptr: *mut u8, _layout: Layout) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allocations_are_aligned_and_disjoint() {
        let heap = Box::new(BumpHeap::<256>::new());
        let a = unsafe { heap.alloc(Layout::from_size_align(3, 1).unwrap()) };
        let b = unsafe { heap.alloc(Layout::from_size_align(8, 8).unwrap()) };
        assert!(!a.is_null() && !b.is_null());
        assert_eq!(b as usize % 8, 0);
        assert!(b as usize >= a as usize + 3);
        assert!(heap.used() >= 11);
    }

    #[test]
    fn exhaustion_returns_null() {
        let heap = Box::new(BumpHeap::<64>::new());
        let layout = Layout::from_size_align(48, 16).unwrap();
        assert!(!unsafe { heap.alloc(layout) }.is_null());
        assert!(unsafe { heap.alloc(layout) }.is_null());
        assert_eq!(heap.used(), 48);
        assert_eq!(heap.capacity(), 64);
    }
}
