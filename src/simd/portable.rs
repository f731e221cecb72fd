//! Portable array-backed lanes.
//!
//! [`Lanes<N>`] runs the same traversal as the hardware backends with a plain
//! `[i32; N]` register. It stands in for any width the target cannot execute
//! natively (256-bit without AVX2, 128-bit off x86_64/aarch64) and serves as a
//! backend-independent reference in tests.

use std::ptr;

use crate::simd::{Alignment, I32Lanes, SimdDouble, SimdLoad, SimdStore};

/// `N` i32 lanes held in an ordinary array.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Lanes<const N: usize>(pub [i32; N]);

impl<const N: usize> Alignment<i32> for Lanes<N> {
    #[inline(always)]
    fn is_aligned(ptr: *const i32) -> bool {
        (ptr as usize) % (N * 4) == 0
    }
}

impl<const N: usize> SimdLoad<i32> for Lanes<N> {
    type Output = Self;

    #[inline(always)]
    unsafe fn load_aligned(ptr: *const i32) -> Self::Output {
        Self(ptr::read(ptr as *const [i32; N]))
    }

    #[inline(always)]
    unsafe fn load_unaligned(ptr: *const i32) -> Self::Output {
        Self(ptr::read(ptr as *const [i32; N]))
    }
}

impl<const N: usize> SimdStore<i32> for Lanes<N> {
    #[inline(always)]
    unsafe fn store_aligned_at(&self, ptr: *mut i32) {
        ptr::write(ptr as *mut [i32; N], self.0)
    }

    #[inline(always)]
    unsafe fn store_unaligned_at(&self, ptr: *mut i32) {
        ptr::write(ptr as *mut [i32; N], self.0)
    }
}

impl<const N: usize> SimdDouble for Lanes<N> {
    #[inline(always)]
    fn double(&self) -> Self {
        Self(self.0.map(|x| x.wrapping_add(x)))
    }
}

// SAFETY: ALIGNMENT is N * 4, and array reads and writes need element alignment only.
unsafe impl<const N: usize> I32Lanes for Lanes<N> {
    const LANE_COUNT: usize = N;
    const ALIGNMENT: usize = N * 4;
}
