//! ARM NEON SIMD implementations for 128-bit vector operations.
//!
//! NEON (Advanced SIMD) is mandatory on AArch64, so this backend is compiled on
//! every aarch64 target regardless of what the build script detected.
//!
//! # Available Types
//!
//! - [`i32x4::I32x4`]: 128-bit vector containing 4 packed i32 values
//!
//! # Performance Characteristics
//!
//! - **Vector Width**: 128 bits (4 × i32)
//! - **Memory Alignment**: `vld1q`/`vst1q` accept any element-aligned address;
//!   the aligned traversals still split at 16-byte boundaries so cache-line
//!   splits are avoided
//!
//! # Platform Support
//!
//! - **Apple Silicon**: M1, M2, M3 processors (macOS, iOS)
//! - **AWS Graviton**: Graviton2, Graviton3 processors

pub mod i32x4;
