use std::collections::HashMap;

use log::debug;

use crate::cache::Cache;
use crate::cost::Cost;
use crate::dp::{Engine, PartialCover, Subproblem};
use crate::error::{Error, Result};
use crate::indices::IntervalIndex;
use crate::interval::Interval;
use crate::reach::ReachTable;

/// Finds a minimum set of `intervals` whose union contains at least `k`
/// integers of `range`, using a fresh memoization table.
///
/// Returns `Ok(None)` if no subset of the intervals covers `k` integers of
/// the range. Otherwise the positions of the chosen intervals are listed in
/// the order the solver recovered them, which should not be relied upon.
///
/// # Errors
///
/// This function fails if `range` is empty, or if its length or the
/// successor of its last element do not fit in an `i64`.
///
/// # Example
///
/// ```
/// use partial_covers::{min_covering, Interval, IntervalIndex};
///
/// let intervals: Vec<Interval> =
///     vec![(1..=1).into(), (6..=6).into(), (2..=5).into(), (1..=3).into(), (4..=6).into()];
/// let mut cover = min_covering(Interval::new(1, 6), 6, &intervals)?.unwrap();
/// cover.sort();
/// assert_eq!(cover, [IntervalIndex::new(3), IntervalIndex::new(4)]);
///
/// // A single interval of length 4 cannot cover 5 integers.
/// assert_eq!(min_covering(Interval::new(1, 5), 5, &[Interval::new(1, 4)])?, None);
/// # Ok::<(), partial_covers::Error>(())
/// ```
pub fn min_covering(range: Interval, k: i64, intervals: &[Interval]) -> Result<Option<Vec<IntervalIndex>>> {
    let mut cache: HashMap<Subproblem, PartialCover> = HashMap::new();
    solve_min_covering(range, k, intervals, &mut cache)
}

/// Finds a minimum set of `intervals` whose union contains at least `k`
/// integers of `range`, memoizing the covers of all visited subproblems
/// in `cache`.
///
/// The cache is left populated after the call. It can be passed again to
/// this function with the same range and intervals and a different target,
/// in which case the covers of the subproblems already solved are reused.
/// Passing a cache that was populated for a different range or list of
/// intervals is a logic error whose outcome is unspecified.
///
/// See [`min_covering`] for the meaning of the result.
///
/// # Errors
///
/// In addition to the errors of [`min_covering`], this function reports
/// [`Error::MissingRecord`] and [`Error::BrokenChain`] if `cache` holds
/// covers for another problem.
pub fn solve_min_covering<C: Cache>(
    range: Interval,
    k: i64,
    intervals: &[Interval],
    cache: &mut C,
) -> Result<Option<Vec<IntervalIndex>>> {
    check_range(range)?;
    let reaches = ReachTable::new(range, intervals);
    debug!("indexed {} candidate intervals over {range}", intervals.len());
    let key = Subproblem::new(range.first(), range.last(), k);
    let cover = Engine::new(&reaches, &mut *cache).solve(key);
    debug!("{key} costs {}; {} subproblems cached", cover.cost(), cache.len());
    reconstruct(key, cache)
}

/// Recovers the intervals of an optimal solution to a subproblem whose cover
/// is in `cache`, by following the chain of partial covers.
///
/// Returns `Ok(None)` if the subproblem has no solution. This operation only
/// reads the cache, so repeating it gives the same intervals every time.
///
/// # Errors
///
/// This function fails with [`Error::MissingRecord`] if the chain reaches
/// a subproblem that is not in the cache, and with [`Error::BrokenChain`] if
/// a cover in the chain does not account for its cost.
pub fn reconstruct<C: Cache>(key: Subproblem, cache: &C) -> Result<Option<Vec<IntervalIndex>>> {
    let mut cover = *cache.get(&key).ok_or(Error::MissingRecord(key))?;
    let Cost::Finite(count) = cover.cost() else {
        return Ok(None);
    };
    let mut indices = Vec::with_capacity(count);
    let mut at = key;
    // Each link accounts for exactly one interval of the solution.
    for remaining in (0..count).rev() {
        indices.push(cover.interval().ok_or(Error::BrokenChain(at))?);
        at = cover.next();
        cover = *cache.get(&at).ok_or(Error::MissingRecord(at))?;
        if cover.cost() != Cost::Finite(remaining) {
            return Err(Error::BrokenChain(at));
        }
    }
    debug!("recovered {} intervals for {key}", indices.len());
    Ok(Some(indices))
}

/// Returns the number of integers of `range` that lie in at least one of
/// the selected intervals.
///
/// # Panics
///
/// This function panics if a selected position is out of bounds.
///
/// # Example
///
/// ```
/// use partial_covers::{coverage, Interval, IntervalIndex};
///
/// let intervals = [Interval::new(1, 4), Interval::new(3, 8), Interval::new(11, 12)];
/// let all = (0..3).map(IntervalIndex::new);
/// assert_eq!(coverage(Interval::new(2, 11), &intervals, all), 8);
/// ```
pub fn coverage<S>(range: Interval, intervals: &[Interval], selection: S) -> u64
where
    S: IntoIterator<Item = IntervalIndex>,
{
    let mut parts: Vec<Interval> = selection
        .into_iter()
        .map(|ix| range.intersection(&intervals[ix.get()]))
        .filter(|part| !part.is_empty())
        .collect();
    parts.sort_by_key(Interval::first);
    let mut covered: u64 = 0;
    // The least element that has not been counted yet.
    let mut uncounted = range.first();
    for part in parts {
        let first = part.first().max(uncounted);
        if first <= part.last() {
            covered = covered.saturating_add(part.last().abs_diff(first).saturating_add(1));
            match part.last().checked_add(1) {
                Some(next) => uncounted = next,
                None => break,
            }
        }
    }
    covered
}

/// Returns the number of integers of `range` that lie in at least one of
/// the given intervals.
///
/// A target $k$ can be achieved if and only if $k$ does not exceed this
/// quantity.
pub fn max_coverage(range: Interval, intervals: &[Interval]) -> u64 {
    coverage(range, intervals, (0..intervals.len()).map(IntervalIndex::new))
}

/// Ensures that the DP engine can work on `range` without overflow.
fn check_range(range: Interval) -> Result<()> {
    let (first, last) = (range.first(), range.last());
    if range.is_empty() {
        Err(Error::EmptyRange { first, last })
    } else if last == i64::MAX || range.checked_len().and_then(|len| usize::try_from(len).ok()).is_none() {
        Err(Error::RangeTooLong { first, last })
    } else {
        Ok(())
    }
}

/// Finds minimum partial covers of a fixed range by a growing list of
/// candidate intervals.
///
/// Unlike [`solve_min_covering`], a `CoverSolver` keeps its memoization table
/// between calls, and invalidates it whenever a new interval is added. Asking
/// for several coverage targets of the same problem is therefore safe, and
/// it reuses the covers of the subproblems that the targets have in common.
///
/// # Example
///
/// ```
/// use partial_covers::{Cost, CoverSolver, Interval};
///
/// let mut solver = CoverSolver::new(Interval::new(-6, -1))?;
/// solver.add_interval(-1..=-1);
/// solver.add_interval(-6..=-6);
/// solver.add_interval(-5..=-2);
/// solver.add_interval(-3..=-1);
/// solver.add_interval(-6..=-4);
///
/// assert_eq!(solver.min_count(4), Cost::Finite(1));
/// assert_eq!(solver.min_count(6), Cost::Finite(2));
/// assert_eq!(solver.min_count(7), Cost::Unreachable);
///
/// let cover = solver.solve(6)?.unwrap();
/// let mut chosen: Vec<_> = cover.iter().map(|&ix| solver.interval(ix)).collect();
/// chosen.sort_by_key(Interval::first);
/// assert_eq!(chosen, [Interval::new(-6, -4), Interval::new(-3, -1)]);
/// # Ok::<(), partial_covers::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct CoverSolver {
    /// The range to be covered.
    range: Interval,
    /// The candidate intervals, in the order they were added.
    intervals: Vec<Interval>,
    /// The furthest-reach index of `intervals`, or [`None`] if it must be
    /// rebuilt.
    reaches: Option<ReachTable>,
    /// The covers of the subproblems solved since the last interval was added.
    cache: HashMap<Subproblem, PartialCover>,
}

impl CoverSolver {
    /// Creates a solver for covering parts of `range`.
    ///
    /// To specify the candidate intervals, use [`Self::add_interval`].
    ///
    /// # Errors
    ///
    /// This function fails if `range` is empty, or if its length or the
    /// successor of its last element do not fit in an `i64`.
    pub fn new(range: Interval) -> Result<Self> {
        check_range(range)?;
        Ok(Self {
            range,
            intervals: Vec::new(),
            reaches: None,
            cache: HashMap::new(),
        })
    }

    /// Appends a candidate interval, and returns its position.
    ///
    /// The interval need not lie inside the range; an empty interval is
    /// accepted but never chosen.
    pub fn add_interval<T: Into<Interval>>(&mut self, interval: T) -> IntervalIndex {
        let ix = IntervalIndex::new(self.intervals.len());
        self.intervals.push(interval.into());
        self.reaches = None;
        self.cache.clear();
        ix
    }

    /// Returns the range to be covered.
    #[must_use]
    pub fn range(&self) -> Interval {
        self.range
    }

    /// Returns the candidate interval at the given position.
    ///
    /// # Panics
    ///
    /// This function panics if the index is out of bounds.
    #[must_use]
    pub fn interval(&self, ix: IntervalIndex) -> Interval {
        self.intervals[ix.get()]
    }

    /// Returns the candidate intervals, in the order they were added.
    #[must_use]
    pub fn intervals(&self) -> &[Interval] {
        &self.intervals
    }

    /// Returns the number of subproblems in the memoization table.
    #[must_use]
    pub fn cache_len(&self) -> usize {
        self.cache.len()
    }

    /// Returns the least number of candidates needed to cover `k` integers
    /// of the range.
    pub fn min_count(&mut self, k: i64) -> Cost {
        self.cover(k).cost()
    }

    /// Finds a minimum set of candidates that cover `k` integers of the range,
    /// or returns `Ok(None)` if there is none.
    ///
    /// # Errors
    ///
    /// The memoization table is private to the solver, so the chain of covers
    /// is always complete and this function does not fail in practice.
    pub fn solve(&mut self, k: i64) -> Result<Option<Vec<IntervalIndex>>> {
        self.cover(k);
        reconstruct(self.key(k), &self.cache)
    }

    /// Returns the top-level subproblem for the target `k`.
    fn key(&self, k: i64) -> Subproblem {
        Subproblem::new(self.range.first(), self.range.last(), k)
    }

    /// Solves the top-level subproblem for the target `k`, building the
    /// furthest-reach index first if necessary.
    fn cover(&mut self, k: i64) -> PartialCover {
        let key = self.key(k);
        let (range, intervals) = (self.range, &self.intervals);
        let reaches = self
            .reaches
            .get_or_insert_with(|| ReachTable::new(range, intervals));
        let cover = Engine::new(reaches, &mut self.cache).solve(key);
        debug!("{key} costs {}; {} subproblems cached", cover.cost(), self.cache.len());
        cover
    }
}
