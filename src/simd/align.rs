//! Alignment policy for the aligned traversals.
//!
//! This is the only place in the crate that turns a runtime address into an
//! element offset. Everything downstream works on the index ranges of a [`Split`],
//! so the vector loops never do pointer arithmetic of their own.

use std::mem;
use std::ops::Range;

use log::trace;

/// Lowest element offset `a >= 0` such that `(addr + a * elem_size) % align == 0`.
///
/// `addr` must be a multiple of `elem_size` (any `&[i32]` satisfies this) and `align`
/// must be a power of two. When `align` is a multiple of `elem_size` the result is
/// strictly less than `align / elem_size`; when `align <= elem_size` it is always 0.
///
/// # Panics
///
/// Panics if `align` is not a power of two or `elem_size` is zero.
///
/// # Example
///
/// ```rust
/// use vecdouble::simd::align::alignment_offset;
///
/// assert_eq!(alignment_offset(0x1000, 4, 32), 0);
/// assert_eq!(alignment_offset(0x1004, 4, 32), 7);
/// assert_eq!(alignment_offset(0x101c, 4, 16), 1);
/// ```
#[inline(always)]
pub fn alignment_offset(addr: usize, elem_size: usize, align: usize) -> usize {
    assert!(align.is_power_of_two(), "alignment must be a power of two");
    assert!(elem_size > 0, "element size can't be zero");
    debug_assert_eq!(addr % elem_size, 0, "address must be element aligned");

    let misalignment = addr & (align - 1);
    if misalignment == 0 {
        return 0;
    }

    (align - misalignment) / elem_size
}

/// Partition of `[0, len)` into a scalar head, a vectorised body and a scalar tail.
///
/// The three ranges are contiguous, in order, and cover `[0, len)` exactly, so a
/// traversal that visits each range once touches every element exactly once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Split {
    pub head: Range<usize>,
    pub body: Range<usize>,
    pub tail: Range<usize>,
}

impl Split {
    /// Split for unaligned traversals: no head, whole `block`s from index 0.
    pub fn unaligned(len: usize, block: usize) -> Self {
        assert!(block > 0, "block size can't be zero");

        let body_end = len - len % block;

        Self {
            head: 0..0,
            body: 0..body_end,
            tail: body_end..len,
        }
    }

    /// Split for aligned traversals over `data`.
    ///
    /// The head runs up to the first element whose address is a multiple of
    /// `align` bytes (clamped to the slice length). The body holds as many whole
    /// `block`s as fit after that, and the tail holds the rest.
    pub fn aligned(data: &[i32], align: usize, block: usize) -> Self {
        assert!(block > 0, "block size can't be zero");

        let len = data.len();
        let addr = data.as_ptr() as usize;
        let head_end = alignment_offset(addr, mem::size_of::<i32>(), align).min(len);
        let body_end = head_end + (len - head_end) / block * block;

        let split = Self {
            head: 0..head_end,
            body: head_end..body_end,
            tail: body_end..len,
        };

        trace!("aligned split at {addr:#x} (align {align}, block {block}): {split:?}");

        split
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PinnedBuffer;

    #[test]
    fn test_offset_of_aligned_address_is_zero() {
        for align in [8, 16, 32, 64, 128] {
            assert_eq!(alignment_offset(0x10_000, 4, align), 0);
        }
    }

    #[test]
    fn test_offset_every_misalignment() {
        for align in [8usize, 16, 32] {
            let lanes = align / 4;
            for step in 0..lanes {
                let addr = 0x4000 + step * 4;
                let a = alignment_offset(addr, 4, align);
                assert!(a < lanes, "offset {a} must stay under {lanes} lanes");
                assert_eq!((addr + a * 4) % align, 0);
                assert_eq!(a, (lanes - step) % lanes);
            }
        }
    }

    #[test]
    fn test_alignment_smaller_than_element() {
        assert_eq!(alignment_offset(0x1004, 4, 2), 0);
        assert_eq!(alignment_offset(0x1004, 4, 4), 0);
    }

    #[test]
    #[should_panic(expected = "power of two")]
    fn test_non_power_of_two_alignment_panics() {
        alignment_offset(0x1000, 4, 24);
    }

    #[test]
    fn test_unaligned_split() {
        let split = Split::unaligned(7, 4);
        assert_eq!(split.head, 0..0);
        assert_eq!(split.body, 0..4);
        assert_eq!(split.tail, 4..7);

        let split = Split::unaligned(3, 8);
        assert_eq!(split.body, 0..0);
        assert_eq!(split.tail, 0..3);
    }

    #[test]
    fn test_aligned_split_covers_every_element() {
        for skew in 0..16 {
            for len in [0usize, 1, 3, 7, 8, 9, 31, 32, 33, 100, 129] {
                let buffer = PinnedBuffer::with_skew(len, skew).unwrap();
                for (align, block) in [(16, 4), (32, 8), (32, 32)] {
                    let split = Split::aligned(&buffer, align, block);

                    assert_eq!(split.head.start, 0);
                    assert_eq!(split.head.end, split.body.start);
                    assert_eq!(split.body.end, split.tail.start);
                    assert_eq!(split.tail.end, len);
                    assert_eq!(split.body.len() % block, 0);
                    assert!(split.tail.len() < block || split.head.len() == len);

                    if !split.body.is_empty() {
                        let body_addr = buffer[split.body.clone()].as_ptr() as usize;
                        assert_eq!(body_addr % align, 0);
                    }
                }
            }
        }
    }

    #[test]
    fn test_aligned_split_head_is_clamped() {
        // Skew 1 against 32-byte alignment needs a 7-element head.
        let buffer = PinnedBuffer::with_skew(3, 1).unwrap();
        let split = Split::aligned(&buffer, 32, 8);
        assert_eq!(split.head, 0..3);
        assert!(split.body.is_empty());
        assert!(split.tail.is_empty());
    }
}
