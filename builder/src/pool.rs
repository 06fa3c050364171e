//! Index-ordered worker pool.
//!
//! Jobs are identified by their index in the input list. Workers pop indices
//! from one shared queue and write each result into the slot owned by that
//! index, so the output order is the input order no matter how many workers
//! run or how they interleave.

use std::num::NonZeroUsize;
use std::sync::OnceLock;
use std::thread;

use crossbeam::channel::bounded;

use crate::options::Workers;

/// Resolves a worker request against the number of inputs and the host's
/// available parallelism.
#[must_use]
pub fn resolve_workers(requested: Workers, inputs: usize) -> usize {
    let host = thread::available_parallelism().map_or(1, NonZeroUsize::get);
    resolve_workers_for_host(requested, inputs, host)
}

/// Resolves a worker request for a host with `host` hardware threads.
///
/// - At most one input always builds serially.
/// - [`Workers::Auto`] uses a quarter of the host threads, at least two,
///   capped by the input count and rounded down to a power of two.
/// - [`Workers::Fixed`] is capped by the input count; `0` and `1` are serial.
#[must_use]
pub fn resolve_workers_for_host(requested: Workers, inputs: usize, host: usize) -> usize {
    if inputs <= 1 {
        return 1;
    }
    match requested {
        Workers::Auto => floor_pow2((host / 4).max(2).min(inputs)),
        Workers::Fixed(n) if n <= 1 => 1,
        Workers::Fixed(n) => n.min(inputs),
    }
}

/// Largest power of two not greater than `v`; `1` for `v <= 1`.
const fn floor_pow2(v: usize) -> usize {
    if v <= 1 {
        1
    } else {
        1 << (usize::BITS - 1 - v.leading_zeros())
    }
}

/// Runs `job` for every index in `0..count` on `workers` threads and returns
/// the results in index order.
///
/// Every job runs exactly once; there is no early exit.
pub fn run_indexed<T, F>(count: usize, workers: usize, job: F) -> Vec<T>
where
    T: Send + Sync,
    F: Fn(usize) -> T + Sync,
{
    if workers <= 1 || count <= 1 {
        return (0..count).map(job).collect();
    }

    let slots: Vec<OnceLock<T>> = (0..count).map(|_| OnceLock::new()).collect();

    // Filled and closed before any worker starts.
    let (tx, rx) = bounded(count);
    for index in 0..count {
        if tx.send(index).is_err() {
            break;
        }
    }
    drop(tx);

    let slots_ref = &slots;
    let job = &job;
    thread::scope(|scope| {
        for _ in 0..workers.min(count) {
            let rx = rx.clone();
            scope.spawn(move || {
                for index in rx {
                    // Each index is received once, so its slot is empty.
                    let _ = slots_ref[index].set(job(index));
                }
            });
        }
    });

    // A panicking job propagates out of `scope`, so every slot is filled here.
    slots.into_iter().filter_map(OnceLock::into_inner).collect()
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use super::*;

    #[test]
    fn resolve_table() {
        let host = 20;
        let cases = [
            (Workers::Fixed(0), 100, 1),
            (Workers::Fixed(1), 100, 1),
            (Workers::Fixed(8), 3, 3),
            (Workers::Fixed(6), 100, 6),
            (Workers::Auto, 100, 4),
            (Workers::Auto, 3, 2),
            (Workers::Auto, 1, 1),
            (Workers::Fixed(8), 0, 1),
        ];
        for (requested, inputs, want) in cases {
            assert_eq!(
                resolve_workers_for_host(requested, inputs, host),
                want,
                "{requested:?} with {inputs} inputs"
            );
        }
    }

    #[test]
    fn auto_on_small_host_uses_two() {
        assert_eq!(resolve_workers_for_host(Workers::Auto, 100, 1), 2);
        assert_eq!(resolve_workers_for_host(Workers::Auto, 100, 64), 16);
        assert_eq!(resolve_workers_for_host(Workers::Auto, 100, 48), 8);
    }

    #[test]
    fn floor_pow2_values() {
        assert_eq!(floor_pow2(0), 1);
        assert_eq!(floor_pow2(1), 1);
        assert_eq!(floor_pow2(2), 2);
        assert_eq!(floor_pow2(5), 4);
        assert_eq!(floor_pow2(8), 8);
        assert_eq!(floor_pow2(1023), 512);
    }

    #[test]
    fn resolve_uses_host() {
        assert_eq!(resolve_workers(Workers::Fixed(1), 50), 1);
        assert!(resolve_workers(Workers::Auto, 50) >= 2);
    }

    #[test]
    fn results_follow_index_order() {
        for workers in [1, 2, 4, 8, 16] {
            let out = run_indexed(40, workers, |i| {
                // Later indices finish first.
                thread::sleep(Duration::from_micros(((40 - i) * 20) as u64));
                i * 3
            });
            assert_eq!(out, (0..40).map(|i| i * 3).collect::<Vec<_>>());
        }
    }

    #[test]
    fn every_job_runs_once() {
        let calls = AtomicUsize::new(0);
        let out = run_indexed(100, 8, |i| {
            calls.fetch_add(1, Ordering::Relaxed);
            i
        });
        assert_eq!(out.len(), 100);
        assert_eq!(calls.load(Ordering::Relaxed), 100);
    }

    #[test]
    fn empty_input() {
        let out: Vec<usize> = run_indexed(0, 4, |i| i);
        assert!(out.is_empty());
    }
}
