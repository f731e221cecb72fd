//! # vecdouble
//!
//! Element-wise doubling of a very large `i32` buffer, implemented as a family of
//! interchangeable strategies so their throughput can be compared:
//!
//! - scalar index loop, raw pointer walk, and a functional map into a new vector
//! - 128-bit and 256-bit vector loops, with or without an aligned body, with or
//!   without software pipelining, and a 4-way unrolled variant
//!
//! All vector strategies are parameter combinations of a single traversal
//! ([`simd::traverse::double_lanes`]) that splits the buffer into a scalar head,
//! a vector body and a scalar tail. Timing is left to an external harness; see
//! `benches/` for the criterion suite.
//!
//! ```rust
//! use vecdouble::{PinnedBuffer, Strategy};
//!
//! let mut buffer = PinnedBuffer::from_slice(&[1, 2, 3, 4, 5, 6, 7]).unwrap();
//! Strategy::VectorSize256X4ReorderedAligned.apply(&mut buffer);
//! assert_eq!(&buffer[..], &[2, 4, 6, 8, 10, 12, 14]);
//! ```

pub mod buffer;
pub mod error;
pub mod harness;
pub mod simd;
pub mod strategy;

pub use buffer::PinnedBuffer;
pub use error::{DoublerError, Result};
pub use harness::{IterationGuard, VectorBenchmark};
pub use strategy::{double_vectorized, Strategy, Unroll, VectorConfig, VectorWidth};

/// Elements doubled per measured iteration: just under the 32-bit signed length limit.
pub const ITEMS_COUNT: usize = (1024.0 * 1024.0 * 1024.0 * 1.999999) as usize;

/// Environment variable that overrides [`ITEMS_COUNT`] for benches and smoke runs.
pub const ITEMS_COUNT_ENV: &str = "VECDOUBLE_ITEMS";

/// [`ITEMS_COUNT`], or the value of [`ITEMS_COUNT_ENV`] when it parses as `usize`.
pub fn items_count_from_env() -> usize {
    std::env::var(ITEMS_COUNT_ENV)
        .ok()
        .and_then(|value| value.trim().replace('_', "").parse().ok())
        .unwrap_or(ITEMS_COUNT)
}
