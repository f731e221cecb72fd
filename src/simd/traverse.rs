//! The parameterised doubling traversal.
//!
//! Every vector strategy is one instantiation of [`double_lanes`]: the lane type
//! fixes the vector width, `UNROLL` the number of independent vectors per block,
//! and [`Traversal`] the alignment policy and the load/store ordering. The buffer
//! is split once by [`Split`]; the head and tail go through
//! [`double_scalar`] and the body through one of three block loops.
//!
//! Each loop advances `ChunksExactMut` over the body, so every block it reads or
//! writes is a whole block inside `[0, len)`. A pipelined loop loads block `i + 1`
//! only after the iterator has produced it, and the last store happens after the
//! loop ends.

use std::array;
use std::mem;

use crate::simd::align::Split;
use crate::simd::slice::double_scalar;
use crate::simd::I32Lanes;

/// Order of loads and stores inside the vector body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pipeline {
    /// Load, double and store each block before touching the next one.
    None,
    /// Load the first block before the loop; each iteration doubles and stores
    /// block `i`, then loads block `i + 1`.
    StoreThenLoad,
    /// Each iteration doubles block `i`, loads block `i + 1`, then stores block `i`.
    LoadThenStore,
}

/// Alignment policy and load/store ordering of one traversal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Traversal {
    /// Peel a scalar head so the body starts on the vector's natural alignment,
    /// then use aligned loads and stores.
    pub aligned: bool,
    pub pipeline: Pipeline,
}

impl Traversal {
    pub const fn new(aligned: bool, pipeline: Pipeline) -> Self {
        Self { aligned, pipeline }
    }
}

/// Doubles `data` in place with `UNROLL` vectors of `V` per block.
///
/// Post-condition: `data'[i] == data[i].wrapping_add(data[i])` for every `i`,
/// whatever the length, base address or traversal.
///
/// # Safety
///
/// The running CPU must support the instructions `V` is built on. SSE2 on
/// x86_64, NEON on aarch64 and [`Lanes`](crate::simd::portable::Lanes) always
/// qualify; AVX2 lanes need a runtime check such as
/// [`avx2_available`](crate::simd::avx2_available).
///
/// # Panics
///
/// Panics if `V::ALIGNMENT` is not `V::LANE_COUNT * 4` or `UNROLL` is zero.
#[inline(always)]
pub unsafe fn double_lanes<V: I32Lanes, const UNROLL: usize>(data: &mut [i32], traversal: Traversal) {
    assert_eq!(
        V::ALIGNMENT,
        V::LANE_COUNT * mem::size_of::<i32>(),
        "ALIGNMENT must span exactly one vector"
    );
    assert!(UNROLL > 0, "UNROLL can't be zero");

    let block = V::LANE_COUNT * UNROLL;
    let aligned = traversal.aligned;

    let Split { head, body, tail } = if aligned {
        Split::aligned(data, V::ALIGNMENT, block)
    } else {
        Split::unaligned(data.len(), block)
    };

    double_scalar(&mut data[head]);

    let body = &mut data[body];
    // SAFETY: the body holds whole blocks and, when aligned, starts on V::ALIGNMENT.
    // Every chunk is one vector wide and ALIGNMENT is one vector, so all stay aligned.
    // CPU support is the caller's contract.
    unsafe {
        match traversal.pipeline {
            Pipeline::None => double_blocks::<V, UNROLL>(body, aligned),
            Pipeline::StoreThenLoad => double_blocks_store_then_load::<V, UNROLL>(body, aligned),
            Pipeline::LoadThenStore => double_blocks_load_then_store::<V, UNROLL>(body, aligned),
        }
    }

    double_scalar(&mut data[tail]);
}

#[inline(always)]
unsafe fn load_block<V: I32Lanes, const UNROLL: usize>(block: &[i32], aligned: bool) -> [V; UNROLL] {
    array::from_fn(|k| {
        let chunk = &block[k * V::LANE_COUNT..(k + 1) * V::LANE_COUNT];
        // SAFETY: forwarded from the caller.
        unsafe { V::load_chunk(chunk, aligned) }
    })
}

#[inline(always)]
unsafe fn store_block<V: I32Lanes, const UNROLL: usize>(
    vectors: &[V; UNROLL],
    block: &mut [i32],
    aligned: bool,
) {
    for (vector, chunk) in vectors.iter().zip(block.chunks_exact_mut(V::LANE_COUNT)) {
        vector.store_chunk(chunk, aligned);
    }
}

#[inline(always)]
fn double_block<V: I32Lanes, const UNROLL: usize>(vectors: &[V; UNROLL]) -> [V; UNROLL] {
    array::from_fn(|k| vectors[k].double())
}

#[inline(always)]
unsafe fn double_blocks<V: I32Lanes, const UNROLL: usize>(body: &mut [i32], aligned: bool) {
    for block in body.chunks_exact_mut(V::LANE_COUNT * UNROLL) {
        let loaded = load_block::<V, UNROLL>(block, aligned);
        store_block(&double_block(&loaded), block, aligned);
    }
}

#[inline(always)]
unsafe fn double_blocks_store_then_load<V: I32Lanes, const UNROLL: usize>(
    body: &mut [i32],
    aligned: bool,
) {
    let mut blocks = body.chunks_exact_mut(V::LANE_COUNT * UNROLL);
    let Some(mut current) = blocks.next() else {
        return;
    };

    let mut loaded = load_block::<V, UNROLL>(current, aligned);

    for next in blocks {
        store_block(&double_block(&loaded), current, aligned);
        loaded = load_block::<V, UNROLL>(next, aligned);
        current = next;
    }

    store_block(&double_block(&loaded), current, aligned);
}

#[inline(always)]
unsafe fn double_blocks_load_then_store<V: I32Lanes, const UNROLL: usize>(
    body: &mut [i32],
    aligned: bool,
) {
    let mut blocks = body.chunks_exact_mut(V::LANE_COUNT * UNROLL);
    let Some(mut current) = blocks.next() else {
        return;
    };

    let mut loaded = load_block::<V, UNROLL>(current, aligned);

    for next in blocks {
        let doubled = double_block(&loaded);
        loaded = load_block::<V, UNROLL>(next, aligned);
        store_block(&doubled, current, aligned);
        current = next;
    }

    store_block(&double_block(&loaded), current, aligned);
}
