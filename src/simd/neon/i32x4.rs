//! NEON 4-lane i32 SIMD vector implementation.

use std::arch::aarch64::*;

use crate::simd::{Alignment, I32Lanes, SimdDouble, SimdLoad, SimdStore};

pub const NEON_ALIGNMENT: usize = 16;

pub const LANE_COUNT: usize = 4;

/// A SIMD vector of 4 packed i32 values
#[derive(Copy, Clone, Debug)]
pub struct I32x4 {
    pub elements: int32x4_t,
}

impl Alignment<i32> for I32x4 {
    #[inline(always)]
    fn is_aligned(ptr: *const i32) -> bool {
        (ptr as usize) % NEON_ALIGNMENT == 0
    }
}

impl SimdLoad<i32> for I32x4 {
    type Output = Self;

    // NEON has no separate aligned load; vld1q_s32 serves both paths.
    #[inline(always)]
    unsafe fn load_aligned(ptr: *const i32) -> Self::Output {
        Self {
            elements: vld1q_s32(ptr),
        }
    }

    #[inline(always)]
    unsafe fn load_unaligned(ptr: *const i32) -> Self::Output {
        Self {
            elements: vld1q_s32(ptr),
        }
    }
}

impl SimdStore<i32> for I32x4 {
    #[inline(always)]
    unsafe fn store_aligned_at(&self, ptr: *mut i32) {
        vst1q_s32(ptr, self.elements)
    }

    #[inline(always)]
    unsafe fn store_unaligned_at(&self, ptr: *mut i32) {
        vst1q_s32(ptr, self.elements)
    }
}

impl SimdDouble for I32x4 {
    #[inline(always)]
    fn double(&self) -> Self {
        Self {
            // SAFETY: NEON is mandatory on aarch64.
            elements: unsafe { vaddq_s32(self.elements, self.elements) },
        }
    }
}

// SAFETY: 4 lanes, 16-byte alignment.
unsafe impl I32Lanes for I32x4 {
    const LANE_COUNT: usize = LANE_COUNT;
    const ALIGNMENT: usize = NEON_ALIGNMENT;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract_elements(vec: &I32x4) -> [i32; 4] {
        let mut result = [0i32; 4];
        unsafe { vec.store_unaligned_at(result.as_mut_ptr()) };
        result
    }

    #[test]
    fn test_load_and_double() {
        let data = [1, -2, 3, -4];
        let vec = unsafe { I32x4::load_unaligned(data.as_ptr()) };
        assert_eq!(extract_elements(&vec.double()), [2, -4, 6, -8]);
    }

    #[test]
    fn test_double_wraps() {
        let data = [i32::MAX, i32::MIN, -1, 1 << 30];
        let vec = unsafe { I32x4::load_unaligned(data.as_ptr()) };
        assert_eq!(extract_elements(&vec.double()), [-2, 0, -2, i32::MIN]);
    }
}
