//! AVX2 8-lane i32 SIMD vector implementation.
//!
//! `I32x8` wraps the 256-bit `__m256i` register and exposes the four memory
//! operations the doubling traversal needs plus a lane-wise wrapping add.
//!
//! # Architecture Requirements
//!
//! - **CPU Support**: Intel Haswell (2013+) or AMD Excavator (2015+)
//! - **Runtime**: every constructor is `unsafe` and its contract includes AVX2
//!   support, which [`avx2_available`](crate::simd::avx2_available) checks

#[cfg(target_arch = "x86")]
use std::arch::x86::*;

#[cfg(target_arch = "x86_64")]
use std::arch::x86_64::*;

use crate::simd::{Alignment, I32Lanes, SimdDouble, SimdLoad, SimdStore};

/// AVX2 memory alignment requirement in bytes.
///
/// `_mm256_load_si256` and `_mm256_store_si256` fault on addresses that are not
/// 32-byte aligned.
pub const AVX_ALIGNMENT: usize = 32;

/// Number of i32 elements that fit in an AVX2 256-bit vector.
pub const LANE_COUNT: usize = 8;

/// AVX2 SIMD vector containing 8 packed i32 values.
///
/// Values of this type only come from the `unsafe` loads below, whose contract
/// requires an AVX2-capable CPU, so the safe arithmetic on an existing value is
/// always executed on hardware that supports it.
#[derive(Copy, Clone, Debug)]
pub struct I32x8 {
    /// AVX2 256-bit vector register containing 8 packed i32 values
    pub elements: __m256i,
}

impl Alignment<i32> for I32x8 {
    /// Checks if a pointer is 32-byte aligned.
    #[inline(always)]
    fn is_aligned(ptr: *const i32) -> bool {
        let ptr = ptr as usize;

        ptr % core::mem::align_of::<__m256i>() == 0
    }
}

impl SimdLoad<i32> for I32x8 {
    type Output = Self;

    /// Loads 8 elements from 32-byte aligned memory with `_mm256_load_si256`.
    ///
    /// # Safety
    ///
    /// The CPU must support AVX2. Pointer must be 32-byte aligned and point to
    /// at least 8 valid i32 values.
    #[inline(always)]
    unsafe fn load_aligned(ptr: *const i32) -> Self::Output {
        Self {
            elements: _mm256_load_si256(ptr as *const __m256i),
        }
    }

    /// Loads 8 elements from unaligned memory with `_mm256_loadu_si256`.
    ///
    /// # Safety
    ///
    /// The CPU must support AVX2. Pointer must point to at least 8 valid i32 values.
    #[inline(always)]
    unsafe fn load_unaligned(ptr: *const i32) -> Self::Output {
        Self {
            elements: _mm256_loadu_si256(ptr as *const __m256i),
        }
    }
}

impl SimdStore<i32> for I32x8 {
    /// Stores 8 elements to 32-byte aligned memory with `_mm256_store_si256`.
    #[inline(always)]
    unsafe fn store_aligned_at(&self, ptr: *mut i32) {
        _mm256_store_si256(ptr as *mut __m256i, self.elements)
    }

    /// Stores 8 elements to unaligned memory with `_mm256_storeu_si256`.
    #[inline(always)]
    unsafe fn store_unaligned_at(&self, ptr: *mut i32) {
        _mm256_storeu_si256(ptr as *mut __m256i, self.elements)
    }
}

impl SimdDouble for I32x8 {
    /// `_mm256_add_epi32(x, x)`; wraps on overflow.
    #[inline(always)]
    fn double(&self) -> Self {
        Self {
            // SAFETY: an I32x8 only exists on AVX2 hardware (see the type docs).
            elements: unsafe { _mm256_add_epi32(self.elements, self.elements) },
        }
    }
}

// SAFETY: 8 lanes, 32-byte alignment.
unsafe impl I32Lanes for I32x8 {
    const LANE_COUNT: usize = LANE_COUNT;
    const ALIGNMENT: usize = AVX_ALIGNMENT;
}
