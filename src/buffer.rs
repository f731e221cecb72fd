//! Fixed-address benchmark buffer.
//!
//! [`PinnedBuffer`] owns one heap allocation of `i32` values whose address never
//! changes for the lifetime of the value, so raw addresses taken from it (for the
//! alignment split, or by pointer-walking strategies) stay valid until it is dropped.
//! Release happens in `Drop`, which also runs when a strategy unwinds.

use std::alloc::{alloc_zeroed, dealloc, Layout};
use std::mem;
use std::ops::{Deref, DerefMut};
use std::ptr::NonNull;

use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::{allocation_error, layout_error, Result};

/// Base alignment of every [`PinnedBuffer`] allocation, in bytes.
///
/// Large enough for the widest vector in the crate (32 bytes) and a full
/// x86 cache line, so a skew of zero always starts on a line boundary.
pub const BUFFER_ALIGNMENT: usize = 64;

/// A zero-initialised, fixed-address `[i32]` allocation.
///
/// The usable region may be deliberately skewed `skew` elements past the
/// aligned base, which lets callers exercise every head length of the aligned
/// strategies without depending on where the allocator happens to land.
///
/// # Example
///
/// ```rust
/// use vecdouble::PinnedBuffer;
///
/// let mut buffer = PinnedBuffer::with_skew(7, 3).unwrap();
/// buffer.fill_with(|i| i as i32 + 1);
/// assert_eq!(&buffer[..], &[1, 2, 3, 4, 5, 6, 7]);
/// assert_eq!(buffer.as_ptr() as usize % 64, 12);
/// ```
pub struct PinnedBuffer {
    /// Start of the allocation (the aligned base); dangling when nothing was allocated.
    base: NonNull<i32>,
    len: usize,
    skew: usize,
    layout: Option<Layout>,
}

// SAFETY: PinnedBuffer uniquely owns its allocation, like Box<[i32]>.
unsafe impl Send for PinnedBuffer {}
unsafe impl Sync for PinnedBuffer {}

impl PinnedBuffer {
    /// Allocates `len` zeroed elements starting on a [`BUFFER_ALIGNMENT`] boundary.
    ///
    /// # Errors
    ///
    /// Returns [`DoublerError::LayoutError`](crate::DoublerError::LayoutError) when the
    /// byte size overflows and
    /// [`DoublerError::AllocationError`](crate::DoublerError::AllocationError) when the
    /// allocator cannot satisfy the request. Neither is retried.
    pub fn new(len: usize) -> Result<Self> {
        Self::with_skew(len, 0)
    }

    /// Allocates `len` zeroed elements starting `skew` elements past a
    /// [`BUFFER_ALIGNMENT`] boundary.
    pub fn with_skew(len: usize, skew: usize) -> Result<Self> {
        if len == 0 {
            return Ok(Self {
                base: NonNull::dangling(),
                len: 0,
                skew: 0,
                layout: None,
            });
        }

        let total = len.checked_add(skew).ok_or_else(|| {
            layout_error(len, skew, BUFFER_ALIGNMENT, "element count overflows usize")
        })?;

        let size_bytes = total.checked_mul(mem::size_of::<i32>()).ok_or_else(|| {
            layout_error(len, skew, BUFFER_ALIGNMENT, "byte size overflows usize")
        })?;

        let layout = Layout::from_size_align(size_bytes, BUFFER_ALIGNMENT)
            .map_err(|e| layout_error(len, skew, BUFFER_ALIGNMENT, e.to_string()))?;

        // SAFETY: layout has a non-zero size (len > 0).
        let raw = unsafe { alloc_zeroed(layout) as *mut i32 };

        let base = NonNull::new(raw).ok_or_else(|| {
            allocation_error(size_bytes, BUFFER_ALIGNMENT, "allocator returned null")
        })?;

        debug!(
            "pinned buffer acquired: {len} elements at {:p} (skew {skew})",
            // SAFETY: skew < total, so the offset stays inside the allocation.
            unsafe { base.as_ptr().add(skew) }
        );

        Ok(Self {
            base,
            len,
            skew,
            layout: Some(layout),
        })
    }

    /// Copies `data` into a fresh buffer with zero skew.
    pub fn from_slice(data: &[i32]) -> Result<Self> {
        let mut buffer = Self::new(data.len())?;
        buffer.copy_from_slice(data);
        Ok(buffer)
    }

    /// Overwrites every element with `f(index)`.
    pub fn fill_with(&mut self, mut f: impl FnMut(usize) -> i32) {
        for (i, value) in self.iter_mut().enumerate() {
            *value = f(i);
        }
    }

    /// Overwrites every element with values from a `StdRng` seeded with `seed`.
    ///
    /// The same seed always yields the same contents, across runs and strategies.
    pub fn fill_random(&mut self, seed: u64) {
        let mut rng = StdRng::seed_from_u64(seed);
        for value in self.iter_mut() {
            *value = rng.random::<i32>();
        }
    }

    /// Number of elements in the usable region.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Elements between the aligned base and the first usable element.
    #[inline(always)]
    pub fn skew(&self) -> usize {
        self.skew
    }

    /// Address of element 0. Stable until the buffer is dropped.
    #[inline(always)]
    pub fn as_ptr(&self) -> *const i32 {
        // SAFETY: skew is 0 for the dangling case, and within the allocation otherwise.
        unsafe { self.base.as_ptr().add(self.skew) }
    }

    #[inline(always)]
    pub fn as_mut_ptr(&mut self) -> *mut i32 {
        // SAFETY: see as_ptr.
        unsafe { self.base.as_ptr().add(self.skew) }
    }
}

impl Drop for PinnedBuffer {
    fn drop(&mut self) {
        if let Some(layout) = self.layout.take() {
            debug!("pinned buffer released: {} elements", self.len);
            // SAFETY: base was returned by alloc_zeroed with this exact layout.
            unsafe { dealloc(self.base.as_ptr() as *mut u8, layout) };
        }
    }
}

impl Deref for PinnedBuffer {
    type Target = [i32];

    fn deref(&self) -> &Self::Target {
        // SAFETY: [as_ptr, as_ptr + len) is initialised and owned by self.
        unsafe { std::slice::from_raw_parts(self.as_ptr(), self.len) }
    }
}

impl DerefMut for PinnedBuffer {
    fn deref_mut(&mut self) -> &mut Self::Target {
        // SAFETY: as above, and &mut self guarantees exclusive access.
        unsafe { std::slice::from_raw_parts_mut(self.as_mut_ptr(), self.len) }
    }
}

impl std::fmt::Debug for PinnedBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PinnedBuffer")
            .field("ptr", &self.as_ptr())
            .field("len", &self.len)
            .field("skew", &self.skew)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DoublerError;

    #[test]
    fn test_new_is_zeroed_and_aligned() {
        let buffer = PinnedBuffer::new(100).unwrap();
        assert_eq!(buffer.len(), 100);
        assert!(buffer.iter().all(|&v| v == 0));
        assert_eq!(buffer.as_ptr() as usize % BUFFER_ALIGNMENT, 0);
    }

    #[test]
    fn test_skew_offsets_base_address() {
        for skew in 0..16 {
            let buffer = PinnedBuffer::with_skew(32, skew).unwrap();
            assert_eq!(buffer.skew(), skew);
            assert_eq!(
                buffer.as_ptr() as usize % BUFFER_ALIGNMENT,
                skew * mem::size_of::<i32>()
            );
        }
    }

    #[test]
    fn test_empty_buffer_does_not_allocate() {
        let buffer = PinnedBuffer::with_skew(0, 5).unwrap();
        assert!(buffer.is_empty());
        assert_eq!(buffer.skew(), 0);
        assert_eq!(&buffer[..], &[] as &[i32]);
    }

    #[test]
    fn test_address_is_stable() {
        let mut buffer = PinnedBuffer::new(64).unwrap();
        let before = buffer.as_ptr();
        buffer.fill_with(|i| i as i32);
        buffer.iter_mut().for_each(|v| *v += 1);
        assert_eq!(before, buffer.as_ptr());
    }

    #[test]
    fn test_from_slice_copies_contents() {
        let buffer = PinnedBuffer::from_slice(&[1, -2, 3]).unwrap();
        assert_eq!(&buffer[..], &[1, -2, 3]);
    }

    #[test]
    fn test_fill_random_is_reproducible() {
        let mut a = PinnedBuffer::new(257).unwrap();
        let mut b = PinnedBuffer::with_skew(257, 3).unwrap();
        a.fill_random(42);
        b.fill_random(42);
        assert_eq!(&a[..], &b[..]);

        let mut c = PinnedBuffer::new(257).unwrap();
        c.fill_random(43);
        assert_ne!(&a[..], &c[..]);
    }

    #[test]
    fn test_overflowing_size_is_a_layout_error() {
        let result = PinnedBuffer::new(usize::MAX / 2);
        assert!(matches!(result, Err(DoublerError::LayoutError { .. })));

        let result = PinnedBuffer::with_skew(usize::MAX, 1);
        assert!(matches!(result, Err(DoublerError::LayoutError { .. })));

        // Fits in usize but not in isize::MAX bytes.
        let result = PinnedBuffer::new(usize::MAX / 4);
        assert!(matches!(result, Err(DoublerError::LayoutError { .. })));
    }

    #[test]
    fn test_unsatisfiable_allocation_is_an_allocation_error() {
        let len = 1usize << 58;
        match PinnedBuffer::new(len) {
            Err(DoublerError::AllocationError {
                requested_size,
                requested_alignment,
                ..
            }) => {
                assert_eq!(requested_size, len * mem::size_of::<i32>());
                assert_eq!(requested_alignment, BUFFER_ALIGNMENT);
            }
            other => panic!("expected an allocation error, got {other:?}"),
        }
    }
}
