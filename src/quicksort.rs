//! Recursion drivers.
//!
//! Every step picks a pivot, partitions the current range in place and continues on the two
//! resulting sub-ranges. The sequential driver uses plain recursion. The task-parallel driver
//! spawns both sub-ranges as tasks into a `rayon` scope while they are at least `cutoff` wide, and
//! falls back to the sequential driver below that. Sibling tasks own disjoint halves produced by
//! `split_at_mut` after the parent's partition step, so no task can observe another's writes.
//!
//! There is no recursion limit and no small-sort fallback. Inputs that keep producing lopsided
//! splits degrade to quadratic time and linear recursion depth.

use log::{debug, trace};
use rayon::{Scope, ThreadPoolBuilder};

use crate::config::{Kernel, SortConfig};
use crate::error::Result;
use crate::partition::{scalar, vector, Split, VectorBackend};
use crate::pivot::{self, PivotSum};

/// Resolved parameters shared by every step of one sort call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Params {
    pub kernel: Kernel,
    pub backend: VectorBackend,
    pub pivot_sum: PivotSum,
    pub cutoff: usize,
}

impl Params {
    pub(crate) fn from_config(config: &SortConfig) -> Self {
        Self {
            kernel: config.kernel,
            backend: config.resolved_backend(),
            pivot_sum: config.pivot_sum,
            cutoff: config.cutoff,
        }
    }
}

/// Sorts `v` according to `config`.
pub(crate) fn sort(v: &mut [u32], config: &SortConfig) -> Result<()> {
    config.validate()?;

    let params = Params::from_config(config);

    debug!(
        "sorting {} elements: threads={} cutoff={} kernel={:?} backend={:?} pivot_sum={:?}",
        v.len(),
        config.threads,
        params.cutoff,
        params.kernel,
        params.backend,
        params.pivot_sum
    );

    if config.threads == 1 {
        quicksort(v, params);
        Ok(())
    } else {
        quicksort_parallel(v, params, config.threads)
    }
}

/// Picks a pivot and partitions `v`, which holds at least two elements.
#[inline]
fn partition_step(v: &mut [u32], params: Params) -> Split {
    let pivot = pivot::estimate(v, params.pivot_sum);

    let split = match params.kernel {
        Kernel::Scalar => scalar::partition(v, pivot),
        Kernel::Vector => vector::partition_with(v, pivot, params.backend),
    };

    if !split.is_degenerate(v.len()) {
        return split;
    }

    // Only reachable if the sample sum wrapped and the pivot left the value span of `v`. A pivot
    // between the smallest and largest sample always splits off at least one element.
    let widened = pivot::estimate(v, PivotSum::Widened);
    trace!(
        "no progress with pivot {} over {} elements, retrying with {}",
        pivot,
        v.len(),
        widened
    );

    scalar::partition(v, widened)
}

#[inline]
fn halves(v: &mut [u32], split: Split) -> (&mut [u32], &mut [u32]) {
    let (low, rest) = v.split_at_mut(split.low_end);
    (low, &mut rest[split.high_start - split.low_end..])
}

/// Sequential driver.
pub(crate) fn quicksort(mut v: &mut [u32], params: Params) {
    while v.len() > 1 {
        let split = partition_step(v, params);
        let (low, high) = halves(v, split);

        // Recurse into the low side, continue with the high side.
        quicksort(low, params);
        v = high;
    }
}

/// Task-parallel driver. Builds a pool of `threads` workers that lives for this call only.
pub(crate) fn quicksort_parallel(v: &mut [u32], params: Params, threads: usize) -> Result<()> {
    let pool = ThreadPoolBuilder::new()
        .num_threads(threads)
        .thread_name(|i| format!("qs-worker-{i}"))
        .build()?;

    // The scope returns once every task spawned into it, transitively, has finished.
    pool.scope(|s| {
        s.spawn(move |s| sort_task(s, v, params));
    });

    Ok(())
}

fn sort_task<'s>(scope: &Scope<'s>, v: &'s mut [u32], params: Params) {
    if v.len() <= 1 {
        return;
    }

    let split = partition_step(v, params);
    let is_small = v.len() - 1 < params.cutoff;
    let (low, high) = halves(v, split);

    if is_small {
        // Spawning costs more than it gains on small ranges.
        quicksort(low, params);
        quicksort(high, params);
    } else {
        scope.spawn(move |s| sort_task(s, low, params));
        scope.spawn(move |s| sort_task(s, high, params));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(kernel: Kernel, pivot_sum: PivotSum) -> Params {
        Params {
            kernel,
            backend: VectorBackend::detect(),
            pivot_sum,
            cutoff: 16,
        }
    }

    #[test]
    fn halves_skip_pivot_slot() {
        let mut v = [1, 2, 3];
        let (low, high) = halves(
            &mut v,
            Split {
                low_end: 1,
                high_start: 2,
            },
        );

        assert_eq!(low, &[1]);
        assert_eq!(high, &[3]);
    }

    #[test]
    fn wrapped_pivot_still_progresses() {
        // All samples >= 2^31, the wrapped pivot is below every element.
        let mut v = [u32::MAX, 1 << 31, u32::MAX - 5, (1 << 31) + 7, u32::MAX - 1];
        assert!(pivot::estimate(&v, PivotSum::Wrapping) < 1 << 31);

        for kernel in [Kernel::Scalar, Kernel::Vector] {
            let split = partition_step(&mut v, params(kernel, PivotSum::Wrapping));
            assert!(!split.is_degenerate(v.len()));
        }
    }

    #[test]
    fn sequential_and_parallel_agree() {
        let input = (0..5_000u32)
            .map(|i| i.wrapping_mul(2_654_435_761) ^ (i >> 3))
            .collect::<Vec<_>>();

        let mut expected = input.clone();
        expected.sort_unstable();

        for kernel in [Kernel::Scalar, Kernel::Vector] {
            for pivot_sum in [PivotSum::Widened, PivotSum::Wrapping] {
                let mut seq = input.clone();
                quicksort(&mut seq, params(kernel, pivot_sum));
                assert_eq!(seq, expected);

                let mut par = input.clone();
                quicksort_parallel(&mut par, params(kernel, pivot_sum), 4).unwrap();
                assert_eq!(par, expected);
            }
        }
    }
}
