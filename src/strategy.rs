//! The measured doubling strategies.
//!
//! Every strategy satisfies the same contract: after [`Strategy::apply`] each element
//! holds `x.wrapping_add(x)` of its previous value, and nothing outside the slice is
//! read or written. They differ only in traversal technique. The vector strategies
//! are parameter combinations of [`double_vectorized`] (see [`Strategy::config`]).

use std::fmt;
use std::str::FromStr;
use std::sync::Once;

use log::warn;

use crate::error::{validation_error, DoublerError};
use crate::simd::portable::Lanes;
use crate::simd::slice::{double_mapped, double_raw_pointers, double_scalar};
use crate::simd::traverse::{double_lanes, Pipeline, Traversal};
use crate::simd::{avx2_available, I32x4};

/// Register width of a vector traversal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VectorWidth {
    /// 4 × i32.
    Bits128,
    /// 8 × i32.
    Bits256,
    /// The widest width the running CPU executes natively.
    Native,
}

impl VectorWidth {
    /// Number of i32 lanes this width resolves to on the running CPU.
    pub fn lane_count(self) -> usize {
        match self {
            VectorWidth::Bits128 => 4,
            VectorWidth::Bits256 => 8,
            VectorWidth::Native if avx2_available() => 8,
            VectorWidth::Native => 4,
        }
    }
}

/// Number of independent vectors advanced per loop iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Unroll {
    X1,
    X4,
}

impl Unroll {
    pub fn factor(self) -> usize {
        match self {
            Unroll::X1 => 1,
            Unroll::X4 => 4,
        }
    }
}

/// Parameter combination of one vector strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VectorConfig {
    pub width: VectorWidth,
    pub unroll: Unroll,
    pub traversal: Traversal,
}

impl VectorConfig {
    pub const fn new(width: VectorWidth, unroll: Unroll, aligned: bool, pipeline: Pipeline) -> Self {
        Self {
            width,
            unroll,
            traversal: Traversal::new(aligned, pipeline),
        }
    }

    /// Elements per vector block on the running CPU.
    pub fn block_len(&self) -> usize {
        self.width.lane_count() * self.unroll.factor()
    }
}

/// Doubles `data` in place with the given vector parameters.
///
/// The 128-bit width runs on SSE2 (x86_64), NEON (aarch64) or portable lanes. The
/// 256-bit width runs on AVX2 when it was compiled in and the CPU supports it, and
/// on portable 8-lane arrays otherwise.
pub fn double_vectorized(data: &mut [i32], width: VectorWidth, unroll: Unroll, traversal: Traversal) {
    let wide = match width {
        VectorWidth::Bits128 => false,
        VectorWidth::Bits256 => true,
        VectorWidth::Native => avx2_available(),
    };

    match (wide, unroll) {
        // SAFETY: the 128-bit lane type is baseline for the target (SSE2, NEON or portable).
        (false, Unroll::X1) => unsafe { double_lanes::<I32x4, 1>(data, traversal) },
        (false, Unroll::X4) => unsafe { double_lanes::<I32x4, 4>(data, traversal) },
        (true, Unroll::X1) => double_256::<1>(data, traversal),
        (true, Unroll::X4) => double_256::<4>(data, traversal),
    }
}

fn double_256<const UNROLL: usize>(data: &mut [i32], traversal: Traversal) {
    #[cfg(all(avx2, target_arch = "x86_64"))]
    {
        if avx2_available() {
            // SAFETY: AVX2 support was confirmed at runtime.
            unsafe { crate::simd::avx2::slice::double_lanes_avx2::<UNROLL>(data, traversal) };
            return;
        }
    }

    warn_portable_fallback();
    // SAFETY: portable lanes need no CPU feature.
    unsafe { double_lanes::<Lanes<8>, UNROLL>(data, traversal) }
}

fn warn_portable_fallback() {
    static WARNED: Once = Once::new();
    WARNED.call_once(|| warn!("AVX2 unavailable at runtime; 256-bit strategies use portable lanes"));
}

/// One benchmarked way of doubling a buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// Index loop.
    Traditional,
    /// Pointer-increment loop.
    RawPointers,
    /// Map into a new vector, then copy it back.
    Linq,
    /// Unaligned, widest native width.
    DynamicSizeVector,
    VectorSize128,
    VectorSize256,
    VectorSize128Reordered,
    VectorSize256Reordered,
    VectorSize256Aligned,
    VectorSize128ReorderedAligned,
    VectorSize256ReorderedAligned,
    /// Aligned; the next block is loaded between the add and the store.
    VectorSize256ReorderedAlignedV2,
    /// Aligned; four 256-bit streams per iteration, loads between add and store.
    VectorSize256X4ReorderedAligned,
}

impl Strategy {
    pub const ALL: [Strategy; 13] = [
        Strategy::Traditional,
        Strategy::RawPointers,
        Strategy::Linq,
        Strategy::DynamicSizeVector,
        Strategy::VectorSize128,
        Strategy::VectorSize256,
        Strategy::VectorSize128Reordered,
        Strategy::VectorSize256Reordered,
        Strategy::VectorSize256Aligned,
        Strategy::VectorSize128ReorderedAligned,
        Strategy::VectorSize256ReorderedAligned,
        Strategy::VectorSize256ReorderedAlignedV2,
        Strategy::VectorSize256X4ReorderedAligned,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Strategy::Traditional => "Traditional",
            Strategy::RawPointers => "RawPointers",
            Strategy::Linq => "LINQ",
            Strategy::DynamicSizeVector => "DynamicSizeVector",
            Strategy::VectorSize128 => "VectorSize128",
            Strategy::VectorSize256 => "VectorSize256",
            Strategy::VectorSize128Reordered => "VectorSize128Reordered",
            Strategy::VectorSize256Reordered => "VectorSize256Reordered",
            Strategy::VectorSize256Aligned => "VectorSize256Aligned",
            Strategy::VectorSize128ReorderedAligned => "VectorSize128ReorderedAligned",
            Strategy::VectorSize256ReorderedAligned => "VectorSize256ReorderedAligned",
            Strategy::VectorSize256ReorderedAlignedV2 => "VectorSize256ReorderedAlignedV2",
            Strategy::VectorSize256X4ReorderedAligned => "VectorSize256X4ReorderedAligned",
        }
    }

    /// Vector parameters, or `None` for the scalar and functional strategies.
    pub fn config(&self) -> Option<VectorConfig> {
        use Pipeline::{LoadThenStore, None as Plain, StoreThenLoad};
        use Unroll::{X1, X4};
        use VectorWidth::{Bits128, Bits256, Native};

        let config = match self {
            Strategy::Traditional | Strategy::RawPointers | Strategy::Linq => return None,
            Strategy::DynamicSizeVector => VectorConfig::new(Native, X1, false, Plain),
            Strategy::VectorSize128 => VectorConfig::new(Bits128, X1, false, Plain),
            Strategy::VectorSize256 => VectorConfig::new(Bits256, X1, false, Plain),
            Strategy::VectorSize128Reordered => VectorConfig::new(Bits128, X1, false, StoreThenLoad),
            Strategy::VectorSize256Reordered => VectorConfig::new(Bits256, X1, false, StoreThenLoad),
            Strategy::VectorSize256Aligned => VectorConfig::new(Bits256, X1, true, Plain),
            Strategy::VectorSize128ReorderedAligned => {
                VectorConfig::new(Bits128, X1, true, StoreThenLoad)
            }
            Strategy::VectorSize256ReorderedAligned => {
                VectorConfig::new(Bits256, X1, true, StoreThenLoad)
            }
            Strategy::VectorSize256ReorderedAlignedV2 => {
                VectorConfig::new(Bits256, X1, true, LoadThenStore)
            }
            Strategy::VectorSize256X4ReorderedAligned => {
                VectorConfig::new(Bits256, X4, true, LoadThenStore)
            }
        };

        Some(config)
    }

    /// Doubles `data` in place.
    pub fn apply(&self, data: &mut [i32]) {
        match self {
            Strategy::Traditional => double_scalar(data),
            Strategy::RawPointers => double_raw_pointers(data),
            Strategy::Linq => {
                let doubled = double_mapped(data);
                data.copy_from_slice(&doubled);
            }
            Strategy::DynamicSizeVector
            | Strategy::VectorSize128
            | Strategy::VectorSize256
            | Strategy::VectorSize128Reordered
            | Strategy::VectorSize256Reordered
            | Strategy::VectorSize256Aligned
            | Strategy::VectorSize128ReorderedAligned
            | Strategy::VectorSize256ReorderedAligned
            | Strategy::VectorSize256ReorderedAlignedV2
            | Strategy::VectorSize256X4ReorderedAligned => {
                let Some(config) = self.config() else {
                    unreachable!("{self} has no vector configuration");
                };
                double_vectorized(data, config.width, config.unroll, config.traversal);
            }
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Strategy {
    type Err = DoublerError;

    /// Parses a strategy name, ignoring ASCII case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Strategy::ALL
            .into_iter()
            .find(|strategy| strategy.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| validation_error(format!("unknown strategy `{s}`")))
    }
}
