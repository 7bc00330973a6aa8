use qs_simd::partition::{scalar, vector, VectorBackend, LANES};
use qs_simd::pivot::{self, PivotSum};
use qs_simd::{partition, partition_scalar, SortError, Split};
use sort_test_tools::patterns;

/// Checks the crossed-bounds contract of `split` for `v[left..=right]` and that nothing outside
/// the range moved.
fn check_split(before: &[u32], after: &[u32], pivot: u32, left: usize, right: usize, split: Split) {
    assert!(left <= split.low_end && split.low_end <= split.high_start);
    assert!(split.high_start <= right + 1);
    assert!(split.high_start - split.low_end <= 1);

    assert!(after[left..split.low_end].iter().all(|&x| x <= pivot));
    assert!(after[split.high_start..=right].iter().all(|&x| x >= pivot));
    assert!(after[split.low_end..split.high_start]
        .iter()
        .all(|&x| x == pivot));

    assert_eq!(before[..left], after[..left]);
    assert_eq!(before[right + 1..], after[right + 1..]);

    let mut range_before = before[left..=right].to_vec();
    let mut range_after = after[left..=right].to_vec();
    range_before.sort_unstable();
    range_after.sort_unstable();
    assert_eq!(range_before, range_after);
}

#[test]
fn example_trace() {
    for partition_fn in [partition, partition_scalar] {
        let mut v = [5, 3, 1, 4, 2];
        let split = partition_fn(&mut v, 2, 0, 4).unwrap();

        assert_eq!(v, [2, 1, 3, 4, 5]);
        assert_eq!(
            split,
            Split {
                low_end: 2,
                high_start: 2
            }
        );
    }
}

#[test]
fn absolute_offsets() {
    let input = patterns::random_uniform(300, 0..=50);
    let (left, right) = (37, 251);
    let pivot = pivot::estimate(&input[left..=right], PivotSum::Widened);

    for partition_fn in [partition, partition_scalar] {
        let mut v = input.clone();
        let split = partition_fn(&mut v, pivot, left, right).unwrap();
        check_split(&input, &v, pivot, left, right, split);
    }
}

#[test]
fn rejects_invalid_ranges() {
    let mut v = [4, 3, 2, 1];

    for partition_fn in [partition, partition_scalar] {
        assert!(matches!(
            partition_fn(&mut v, 2, 3, 1),
            Err(SortError::InvalidRange {
                left: 3,
                right: 1,
                len: 4
            })
        ));
        assert!(matches!(
            partition_fn(&mut v, 2, 0, 4),
            Err(SortError::InvalidRange { .. })
        ));
        assert!(matches!(
            partition_fn(&mut [], 2, 0, 0),
            Err(SortError::InvalidRange { len: 0, .. })
        ));
    }

    assert_eq!(v, [4, 3, 2, 1]);
}

#[test]
fn pivot_outside_values() {
    let input = patterns::random_uniform(1_000, 100..=200);

    for partition_fn in [partition, partition_scalar] {
        let mut v = input.clone();
        let split = partition_fn(&mut v, 50, 0, 999).unwrap();
        check_split(&input, &v, 50, 0, 999, split);
        assert_eq!(split.low_end, 0);

        let mut v = input.clone();
        let split = partition_fn(&mut v, 250, 0, 999).unwrap();
        check_split(&input, &v, 250, 0, 999, split);
        assert_eq!(split.high_start, 1_000);
    }
}

#[test]
fn all_equal_ranges() {
    for len in [1, 2, LANES, 2 * LANES + 1, 3 * LANES, 1_000] {
        let input = patterns::all_equal(len);
        let pivot = input[0];

        for partition_fn in [partition, partition_scalar] {
            let mut v = input.clone();
            let split = partition_fn(&mut v, pivot, 0, len - 1).unwrap();
            check_split(&input, &v, pivot, 0, len - 1, split);
        }
    }
}

#[test]
fn scalar_and_vector_agree() {
    for len in [2, 7, LANES, 17, 24, 25, 48, 49, 100, 1_000, 10_000] {
        for input in [
            patterns::random(len),
            patterns::random_uniform(len, 0..=3),
            patterns::random_high_bit(len),
            patterns::descending(len),
            patterns::saw_mixed(len, 4),
        ] {
            for pivot_sum in [PivotSum::Widened, PivotSum::Wrapping] {
                let pivot = pivot::estimate(&input, pivot_sum);

                let mut v_scalar = input.clone();
                let split_scalar = scalar::partition(&mut v_scalar, pivot);
                check_split(&input, &v_scalar, pivot, 0, len - 1, split_scalar);

                let mut v_vector = input.clone();
                let split_vector = vector::partition(&mut v_vector, pivot);
                check_split(&input, &v_vector, pivot, 0, len - 1, split_vector);

                // Element placement may differ, the count of elements strictly below the pivot
                // on the low side may not.
                let below = input.iter().filter(|&&x| x < pivot).count();
                assert!(split_scalar.low_end >= below);
                assert!(split_vector.low_end >= below);
            }
        }
    }
}

#[test]
fn backends_agree_exactly() {
    if !VectorBackend::Avx2.is_available() {
        return;
    }

    for len in [17, 33, 100, 1_000, 10_000] {
        let input = patterns::random(len);
        let pivot = pivot::estimate(&input, PivotSum::Widened);

        let mut v_portable = input.clone();
        let split_portable = vector::partition_with(&mut v_portable, pivot, VectorBackend::Portable);

        let mut v_avx2 = input.clone();
        let split_avx2 = vector::partition_with(&mut v_avx2, pivot, VectorBackend::Avx2);

        // Both backends run the same lane algorithm.
        assert_eq!(v_portable, v_avx2);
        assert_eq!(split_portable, split_avx2);
    }
}

#[test]
fn missing_pivot_splits_by_value() {
    // With a pivot absent from the range both kernels put exactly the smaller values low.
    let input = patterns::random(5_000)
        .into_iter()
        .map(|x| x | 1)
        .collect::<Vec<_>>();
    let pivot = 1 << 31;

    for partition_fn in [partition, partition_scalar] {
        let mut v = input.clone();
        let split = partition_fn(&mut v, pivot, 0, input.len() - 1).unwrap();

        let below = input.iter().filter(|&&x| x < pivot).count();
        assert_eq!(split.low_end, below);
        assert_eq!(split.high_start, below);
    }
}
