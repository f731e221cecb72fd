//! Scalar doubling kernels.
//!
//! These are the baselines the vector strategies are measured against, and
//! [`double_scalar`] also serves as the head and tail loop of every vector traversal.

/// Index-based loop: one load, add and store per element.
#[inline(always)]
#[allow(clippy::needless_range_loop)]
pub fn double_scalar(data: &mut [i32]) {
    for i in 0..data.len() {
        let value = data[i];
        data[i] = value.wrapping_add(value);
    }
}

/// Pointer-increment loop over `[start, end)`.
///
/// Semantically identical to [`double_scalar`]; the loop walks a raw cursor up to
/// the one-past-the-end pointer and compares before every dereference.
#[inline(always)]
pub fn double_raw_pointers(data: &mut [i32]) {
    let range = data.as_mut_ptr_range();
    let mut ptr = range.start;

    while ptr != range.end {
        // SAFETY: start <= ptr < end, all inside `data`.
        unsafe {
            let value = *ptr;
            *ptr = value.wrapping_add(value);
            ptr = ptr.add(1);
        }
    }
}

/// Functional mapping into a freshly allocated vector, preserving order.
#[inline(always)]
pub fn double_mapped(data: &[i32]) -> Vec<i32> {
    data.iter().map(|&x| x.wrapping_add(x)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_doubles_in_place() {
        let mut data = [1, 2, 3, 4, 5, 6, 7];
        double_scalar(&mut data);
        assert_eq!(data, [2, 4, 6, 8, 10, 12, 14]);
    }

    #[test]
    fn test_raw_pointers_matches_scalar() {
        let mut a: Vec<i32> = (-50..50).map(|i| i * 7919).collect();
        let mut b = a.clone();
        double_scalar(&mut a);
        double_raw_pointers(&mut b);
        assert_eq!(a, b);
    }

    #[test]
    fn test_raw_pointers_touches_only_its_range() {
        let mut data = [1, 1, 1, 1, 1];
        double_raw_pointers(&mut data[1..4]);
        assert_eq!(data, [1, 2, 2, 2, 1]);
    }

    #[test]
    fn test_mapped_allocates_new_vector() {
        let data = [i32::MAX, -3, 0];
        assert_eq!(double_mapped(&data), vec![-2, -6, 0]);
        assert_eq!(data, [i32::MAX, -3, 0]);
    }

    #[test]
    fn test_empty_input() {
        let mut empty: [i32; 0] = [];
        double_scalar(&mut empty);
        double_raw_pointers(&mut empty);
        assert!(double_mapped(&empty).is_empty());
    }
}
