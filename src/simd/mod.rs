//! SIMD backends and the shared doubling traversal.
//!
//! | Module       | Width    | Compiled when                               |
//! |--------------|----------|---------------------------------------------|
//! | `sse`        | 128-bit  | `target_arch = "x86_64"` (SSE2 is baseline) |
//! | `avx2`       | 256-bit  | `cfg(avx2)` from the build script, x86_64   |
//! | `neon`       | 128-bit  | `target_arch = "aarch64"`                   |
//! | [`portable`] | any      | always                                      |
//!
//! [`I32x4`] names the best 128-bit lane type of the target. The 256-bit path is
//! chosen at runtime by [`avx2_available`], falling back to `portable::Lanes<8>`.

pub mod align;

pub mod portable;

pub mod slice;

pub mod traits;

pub mod traverse;

#[cfg(target_arch = "x86_64")]
pub mod sse;

#[cfg(all(avx2, target_arch = "x86_64"))]
pub mod avx2;

#[cfg(target_arch = "aarch64")]
pub mod neon;

pub use traits::{Alignment, I32Lanes, SimdDouble, SimdLoad, SimdStore};

/// Best 128-bit lane type for the target.
#[cfg(target_arch = "x86_64")]
pub type I32x4 = sse::i32x4::I32x4;

#[cfg(target_arch = "aarch64")]
pub type I32x4 = neon::i32x4::I32x4;

#[cfg(not(any(target_arch = "x86_64", target_arch = "aarch64")))]
pub type I32x4 = portable::Lanes<4>;

/// Whether the 256-bit AVX2 kernels were compiled in and the running CPU supports them.
#[cfg(all(avx2, target_arch = "x86_64"))]
pub fn avx2_available() -> bool {
    std::arch::is_x86_feature_detected!("avx2")
}

/// Whether the 256-bit AVX2 kernels were compiled in and the running CPU supports them.
#[cfg(not(all(avx2, target_arch = "x86_64")))]
pub fn avx2_available() -> bool {
    false
}

/// Capability selected by the build script (`avx2`, `sse`, `neon` or `fallback`).
pub fn build_capability() -> &'static str {
    if cfg!(avx2) {
        "avx2"
    } else if cfg!(sse) {
        "sse"
    } else if cfg!(neon) {
        "neon"
    } else {
        "fallback"
    }
}
