//! AVX2 entry point for the parameterised doubling traversal.

use crate::simd::avx2::i32x8::I32x8;
use crate::simd::traverse::{double_lanes, Traversal};

/// Runs [`double_lanes`] over 8-lane AVX2 vectors, `UNROLL` vectors per block.
///
/// The function is compiled with AVX2 enabled, so the `#[inline(always)]`
/// traversal and the `I32x8` intrinsics are inlined into a single AVX2 loop.
///
/// # Safety
///
/// The CPU must support AVX2.
#[target_feature(enable = "avx2")]
pub unsafe fn double_lanes_avx2<const UNROLL: usize>(data: &mut [i32], traversal: Traversal) {
    double_lanes::<I32x8, UNROLL>(data, traversal)
}
