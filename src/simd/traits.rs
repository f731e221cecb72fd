//! Lane-type traits shared by every SIMD backend.
//!
//! Each backend (`sse`, `avx2`, `neon`, `portable`) exposes one `Copy` vector type
//! that implements these traits for `i32`. The traversal in
//! [`traverse`](crate::simd::traverse) is written once against [`I32Lanes`].

/// Alignment check for a backend's natural vector alignment.
pub trait Alignment<T> {
    fn is_aligned(ptr: *const T) -> bool;
}

/// Loading a full vector from memory.
pub trait SimdLoad<T> {
    type Output;

    /// Loads `LANE_COUNT` elements from an address aligned to the vector width.
    ///
    /// # Safety
    ///
    /// `ptr` must be aligned to the backend's `ALIGNMENT` and valid for reading
    /// `LANE_COUNT` elements.
    unsafe fn load_aligned(ptr: *const T) -> Self::Output;

    /// Loads `LANE_COUNT` elements from any element-aligned address.
    ///
    /// # Safety
    ///
    /// `ptr` must be valid for reading `LANE_COUNT` elements.
    unsafe fn load_unaligned(ptr: *const T) -> Self::Output;
}

/// Storing a full vector to memory.
pub trait SimdStore<T> {
    /// # Safety
    ///
    /// `ptr` must be aligned to the backend's `ALIGNMENT` and valid for writing
    /// `LANE_COUNT` elements.
    unsafe fn store_aligned_at(&self, ptr: *mut T);

    /// # Safety
    ///
    /// `ptr` must be valid for writing `LANE_COUNT` elements.
    unsafe fn store_unaligned_at(&self, ptr: *mut T);
}

/// Lane-wise `x + x`, wrapping on overflow like the hardware integer add.
pub trait SimdDouble {
    fn double(&self) -> Self;
}

/// A fixed-width vector of `i32` lanes.
///
/// # Safety
///
/// Implementors guarantee that:
///
/// - `ALIGNMENT == LANE_COUNT * size_of::<i32>()`, so consecutive vectors of an
///   aligned run all start on an `ALIGNMENT` boundary;
/// - `load_aligned` and `store_aligned_at` only need `ALIGNMENT`-byte alignment,
///   and the unaligned forms only element alignment.
///
/// The instruction set the type needs is a separate, per-call contract; see
/// [`double_lanes`](crate::simd::traverse::double_lanes).
pub unsafe trait I32Lanes:
    Copy + Alignment<i32> + SimdLoad<i32, Output = Self> + SimdStore<i32> + SimdDouble
{
    /// Number of `i32` lanes.
    const LANE_COUNT: usize;

    /// Natural alignment of the vector in bytes. Must equal `LANE_COUNT * 4`.
    const ALIGNMENT: usize;

    /// Loads exactly `LANE_COUNT` elements from `chunk`.
    ///
    /// # Safety
    ///
    /// When `aligned` is true, `chunk` must start on an `ALIGNMENT` boundary.
    #[inline(always)]
    unsafe fn load_chunk(chunk: &[i32], aligned: bool) -> Self {
        debug_assert_eq!(chunk.len(), Self::LANE_COUNT, "chunk must hold one vector");

        if aligned {
            debug_assert!(Self::is_aligned(chunk.as_ptr()), "chunk must be aligned");
            Self::load_aligned(chunk.as_ptr())
        } else {
            Self::load_unaligned(chunk.as_ptr())
        }
    }

    /// Stores exactly `LANE_COUNT` elements to `chunk`.
    ///
    /// # Safety
    ///
    /// When `aligned` is true, `chunk` must start on an `ALIGNMENT` boundary.
    #[inline(always)]
    unsafe fn store_chunk(&self, chunk: &mut [i32], aligned: bool) {
        debug_assert_eq!(chunk.len(), Self::LANE_COUNT, "chunk must hold one vector");

        if aligned {
            debug_assert!(Self::is_aligned(chunk.as_ptr()), "chunk must be aligned");
            self.store_aligned_at(chunk.as_mut_ptr())
        } else {
            self.store_unaligned_at(chunk.as_mut_ptr())
        }
    }
}
