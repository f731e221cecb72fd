//! Property-based checks over arbitrary lengths, base offsets and values.

use proptest::prelude::*;

use vecdouble::simd::traverse::{Pipeline, Traversal};
use vecdouble::Strategy as Doubling;
use vecdouble::{double_vectorized, PinnedBuffer, Unroll, VectorWidth};

fn strategy_index() -> impl Strategy<Value = usize> {
    0..Doubling::ALL.len()
}

proptest! {
    /// Property: every strategy agrees with the scalar loop.
    #[test]
    fn prop_matches_scalar(
        values in prop::collection::vec(any::<i32>(), 0..600),
        skew in 0usize..16,
        index in strategy_index(),
    ) {
        let strategy = Doubling::ALL[index];

        let mut expected = values.clone();
        Doubling::Traditional.apply(&mut expected);

        let mut buffer = PinnedBuffer::with_skew(values.len(), skew).unwrap();
        buffer.copy_from_slice(&values);
        strategy.apply(&mut buffer);

        prop_assert_eq!(&buffer[..], &expected[..]);
    }

    /// Property: S(S(x)) == 4x (wrapping)
    #[test]
    fn prop_twice_is_times_four(
        values in prop::collection::vec(any::<i32>(), 0..300),
        index in strategy_index(),
    ) {
        let strategy = Doubling::ALL[index];
        let mut data = values.clone();
        strategy.apply(&mut data);
        strategy.apply(&mut data);

        let expected: Vec<i32> = values.iter().map(|x| x.wrapping_mul(4)).collect();
        prop_assert_eq!(data, expected);
    }

    /// Property: every parameter combination of the vector traversal agrees,
    /// including combinations no named strategy uses.
    #[test]
    fn prop_parameter_grid_agrees(
        values in prop::collection::vec(any::<i32>(), 0..400),
        skew in 0usize..16,
        wide in any::<bool>(),
        unrolled in any::<bool>(),
        aligned in any::<bool>(),
        pipeline in prop_oneof![
            Just(Pipeline::None),
            Just(Pipeline::StoreThenLoad),
            Just(Pipeline::LoadThenStore),
        ],
    ) {
        let width = if wide { VectorWidth::Bits256 } else { VectorWidth::Bits128 };
        let unroll = if unrolled { Unroll::X4 } else { Unroll::X1 };

        let mut buffer = PinnedBuffer::with_skew(values.len(), skew).unwrap();
        buffer.copy_from_slice(&values);
        double_vectorized(&mut buffer, width, unroll, Traversal::new(aligned, pipeline));

        let expected: Vec<i32> = values.iter().map(|x| x.wrapping_add(*x)).collect();
        prop_assert_eq!(&buffer[..], &expected[..]);
    }
}
