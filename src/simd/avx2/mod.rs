//! AVX2 SIMD implementations for 256-bit vector operations.
//!
//! This module holds the 256-bit doubling backend built on Intel's Advanced Vector
//! Extensions 2 (AVX2).
//!
//! # Architecture Requirements
//!
//! - **CPU Support**: Intel Haswell (2013+) or AMD Excavator (2015+)
//! - **Target Architecture**: x86_64
//! - **Build detection**: compiled only when the build script emits `cfg(avx2)`
//! - **Runtime detection**: entry points re-check `is_x86_feature_detected!("avx2")`
//!   through [`avx2_available`](crate::simd::avx2_available) before running
//!
//! # Available Types
//!
//! - [`i32x8::I32x8`]: 256-bit vector containing 8 packed i32 values
//!
//! # Performance Characteristics
//!
//! - **Vector Width**: 256 bits (8 × i32)
//! - **Memory Alignment**: aligned loads and stores require 32-byte boundaries
//! - **Kernels**: [`slice::double_lanes_avx2`] compiles the shared traversal with
//!   AVX2 enabled so every intrinsic is inlined into the loop

pub mod i32x8;

pub mod slice;
