//! SSE2 4-lane i32 SIMD vector implementation.

use std::arch::x86_64::*;

use crate::simd::{Alignment, I32Lanes, SimdDouble, SimdLoad, SimdStore};

/// SSE memory alignment requirement in bytes.
pub const SSE_ALIGNMENT: usize = 16;

/// Number of i32 elements that fit in a 128-bit vector.
pub const LANE_COUNT: usize = 4;

/// SSE2 SIMD vector containing 4 packed i32 values.
#[derive(Copy, Clone, Debug)]
pub struct I32x4 {
    /// 128-bit vector register containing 4 packed i32 values
    pub elements: __m128i,
}

impl Alignment<i32> for I32x4 {
    #[inline(always)]
    fn is_aligned(ptr: *const i32) -> bool {
        (ptr as usize) % core::mem::align_of::<__m128i>() == 0
    }
}

impl SimdLoad<i32> for I32x4 {
    type Output = Self;

    /// Loads 4 elements from 16-byte aligned memory with `_mm_load_si128`.
    #[inline(always)]
    unsafe fn load_aligned(ptr: *const i32) -> Self::Output {
        Self {
            elements: _mm_load_si128(ptr as *const __m128i),
        }
    }

    /// Loads 4 elements from unaligned memory with `_mm_loadu_si128`.
    #[inline(always)]
    unsafe fn load_unaligned(ptr: *const i32) -> Self::Output {
        Self {
            elements: _mm_loadu_si128(ptr as *const __m128i),
        }
    }
}

impl SimdStore<i32> for I32x4 {
    #[inline(always)]
    unsafe fn store_aligned_at(&self, ptr: *mut i32) {
        _mm_store_si128(ptr as *mut __m128i, self.elements)
    }

    #[inline(always)]
    unsafe fn store_unaligned_at(&self, ptr: *mut i32) {
        _mm_storeu_si128(ptr as *mut __m128i, self.elements)
    }
}

impl SimdDouble for I32x4 {
    /// `_mm_add_epi32(x, x)`; wraps on overflow.
    #[inline(always)]
    fn double(&self) -> Self {
        Self {
            // SAFETY: SSE2 is always available on x86_64.
            elements: unsafe { _mm_add_epi32(self.elements, self.elements) },
        }
    }
}

// SAFETY: 4 lanes, 16-byte alignment.
unsafe impl I32Lanes for I32x4 {
    const LANE_COUNT: usize = LANE_COUNT;
    const ALIGNMENT: usize = SSE_ALIGNMENT;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract_elements(vec: &I32x4) -> [i32; 4] {
        let mut result = [0i32; 4];
        unsafe { vec.store_unaligned_at(result.as_mut_ptr()) };
        result
    }

    #[repr(C, align(16))]
    struct Aligned([i32; 8]);

    #[test]
    fn test_is_aligned() {
        let data = Aligned([0; 8]);
        assert!(I32x4::is_aligned(data.0.as_ptr()));
        assert!(!I32x4::is_aligned(unsafe { data.0.as_ptr().add(1) }));
        assert!(I32x4::is_aligned(unsafe { data.0.as_ptr().add(4) }));
    }

    #[test]
    fn test_load_aligned_and_double() {
        let data = Aligned([1, 2, 3, 4, 5, 6, 7, 8]);
        let vec = unsafe { I32x4::load_aligned(data.0.as_ptr().add(4)) };
        assert_eq!(extract_elements(&vec.double()), [10, 12, 14, 16]);
    }

    #[test]
    fn test_load_unaligned_store_aligned() {
        let data = [9, 1, 2, 3, 4];
        let vec = unsafe { I32x4::load_unaligned(data.as_ptr().add(1)) };

        let mut out = Aligned([0; 8]);
        unsafe { vec.double().store_aligned_at(out.0.as_mut_ptr()) };
        assert_eq!(out.0, [2, 4, 6, 8, 0, 0, 0, 0]);
    }

    #[test]
    fn test_double_wraps() {
        let data = [i32::MAX, i32::MIN, -1, 1 << 30];
        let vec = unsafe { I32x4::load_unaligned(data.as_ptr()) };
        assert_eq!(extract_elements(&vec.double()), [-2, 0, -2, i32::MIN]);
    }
}
