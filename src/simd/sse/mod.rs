//! SSE2 SIMD implementations for 128-bit vector operations.
//!
//! SSE2 is part of the x86_64 baseline, so this backend needs neither build-time
//! nor runtime detection and is compiled on every x86_64 target.
//!
//! # Available Types
//!
//! - [`i32x4::I32x4`]: 128-bit vector containing 4 packed i32 values
//!
//! # Performance Characteristics
//!
//! - **Vector Width**: 128 bits (4 × i32)
//! - **Memory Alignment**: aligned loads and stores require 16-byte boundaries

pub mod i32x4;
