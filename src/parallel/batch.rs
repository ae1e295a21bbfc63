//! Batch distribution for parallel simulation.
//!
//! Splits a round count into ranges for parallel execution; the batch runner
//! hands each range to one Rayon task so per-round scheduling overhead is
//! amortized.

use crate::combat::batch::{simulate_batch_parallel, BatchSummary};
use crate::combat::simulation::{KillScenario, SimulationError};
use crate::parallel::pool::WorkerPool;
use crate::xp::XpTable;

/// Split `total` items into up to `num_batches` ranges `[start, end)`.
/// Batches are as equal in size as possible; later batches may be smaller.
///
/// # Example
/// ```
/// # use castsim::parallel::batch_ranges;
/// let ranges = batch_ranges(100, 4);
/// assert_eq!(ranges, vec![(0, 25), (25, 50), (50, 75), (75, 100)]);
/// ```
pub fn batch_ranges(total: usize, num_batches: usize) -> Vec<(usize, usize)> {
    if total == 0 || num_batches == 0 {
        return Vec::new();
    }
    let num_batches = num_batches.min(total);
    let base = total / num_batches;
    let remainder = total % num_batches;
    let mut ranges = Vec::with_capacity(num_batches);
    let mut start = 0;
    for i in 0..num_batches {
        let size = base + if i < remainder { 1 } else { 0 };
        let end = start + size;
        ranges.push((start, end));
        start = end;
    }
    ranges
}

/// Run a parallel batch inside a [WorkerPool] so callers can pin the worker
/// count instead of taking Rayon's global default.
pub fn run_batch_rounds(
    rounds: usize,
    scenario: &KillScenario,
    table: &XpTable,
    pool: &WorkerPool,
) -> Result<BatchSummary, SimulationError> {
    pool.install(|| simulate_batch_parallel(rounds, scenario, table))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn batch_ranges_even_split() {
        let r = batch_ranges(100, 4);
        assert_eq!(r, vec![(0, 25), (25, 50), (50, 75), (75, 100)]);
    }

    #[test]
    fn batch_ranges_with_remainder() {
        let r = batch_ranges(10, 3);
        assert_eq!(r, vec![(0, 4), (4, 7), (7, 10)]);
    }

    #[test]
    fn batch_ranges_more_batches_than_items() {
        let r = batch_ranges(3, 10);
        assert_eq!(r, vec![(0, 1), (1, 2), (2, 3)]);
    }

    #[test]
    fn batch_ranges_empty() {
        assert!(batch_ranges(0, 5).is_empty());
        assert!(batch_ranges(10, 0).is_empty());
    }
}
