use std::cmp::Reverse;
use std::collections::BinaryHeap;

use crate::indices::IntervalIndex;
use crate::interval::Interval;

/// The candidate interval that extends furthest to the right among those
/// containing a given integer.
#[derive(Debug, Eq, PartialEq, Copy, Clone)]
pub struct Reach {
    /// The position of the interval in the list of candidates.
    pub interval: IntervalIndex,
    /// The last element of the interval.
    pub last: i64,
}

/// The _furthest-reach index_ of a list of candidate intervals $C$ with respect
/// to a range $r$. For every integer $a\in r$, this table records the interval
/// $c\in C$ that contains $a$ and whose right endpoint is maximum, if any.
///
/// If several intervals containing $a$ share the maximum right endpoint, the
/// one that appears first in $C$ is chosen.
///
/// # Example
///
/// ```
/// use partial_covers::{Interval, IntervalIndex, Reach, ReachTable};
///
/// let intervals: [Interval; 5] = [(1..=1).into(), (6..=6).into(), (2..=5).into(), (1..=3).into(), (4..=6).into()];
/// let table = ReachTable::new(Interval::new(1, 6), &intervals);
/// assert_eq!(table.get(1), Some(Reach { interval: IntervalIndex::new(3), last: 3 }));
/// assert_eq!(table.get(2), Some(Reach { interval: IntervalIndex::new(2), last: 5 }));
/// assert_eq!(table.get(5), Some(Reach { interval: IntervalIndex::new(4), last: 6 }));
/// assert_eq!(table.get(7), None); // outside the range
/// ```
#[derive(Debug, Clone)]
pub struct ReachTable {
    /// The range $r$ whose elements index the table.
    range: Interval,
    /// The furthest reach of the element $r_{\text{first}}+k$ is at position $k$.
    reaches: Vec<Option<Reach>>,
}

impl ReachTable {
    /// Computes the furthest-reach index of `intervals` over `range`.
    ///
    /// Rather than scanning the $|C|$ intervals for each of the $|r|$ elements
    /// of the range, this function sweeps the range from left to right while
    /// maintaining a priority queue of the intervals that have started. The
    /// running time is therefore $O\bigl((|r|+|C|)\log|C|\bigr)$.
    ///
    /// # Panics
    ///
    /// This function panics if the number of elements in `range` exceeds the
    /// capacity of a [`Vec`].
    #[must_use]
    pub fn new(range: Interval, intervals: &[Interval]) -> Self {
        let len = range
            .checked_len()
            .and_then(|len| usize::try_from(len).ok())
            .unwrap_or_else(|| panic!("range {range} is too long to be indexed"));
        // Visit the intervals that meet the range in order of their first
        // elements. The sort is stable, so ties preserve the order of `C`.
        let mut pending: Vec<IntervalIndex> = (0..intervals.len())
            .map(IntervalIndex::new)
            .filter(|ix| !range.intersection(&intervals[ix.get()]).is_empty())
            .collect();
        pending.sort_by_key(|ix| intervals[ix.get()].first());
        let mut pending = pending.into_iter().peekable();

        // A max-heap of the intervals whose first element has been swept,
        // keyed by right endpoint and then by lowest position in `C`.
        let mut started = BinaryHeap::new();
        let mut reaches = Vec::with_capacity(len);
        for a in range.first()..=range.last() {
            while let Some(ix) = pending.next_if(|ix| intervals[ix.get()].first() <= a) {
                started.push((intervals[ix.get()].last(), Reverse(ix)));
            }
            // Discard the intervals that end before $a$. Those that remain
            // below the top of the heap are removed lazily.
            while started.peek().is_some_and(|&(last, _)| last < a) {
                started.pop();
            }
            reaches.push(
                started
                    .peek()
                    .map(|&(last, Reverse(interval))| Reach { interval, last }),
            );
        }
        Self { range, reaches }
    }

    /// Returns the furthest-reaching interval that contains `a`, or [`None`]
    /// if no candidate contains `a` or if `a` lies outside the range.
    #[must_use]
    pub fn get(&self, a: i64) -> Option<Reach> {
        let offset = usize::try_from(a.checked_sub(self.range.first())?).ok()?;
        self.reaches.get(offset).copied().flatten()
    }

    /// Returns the range that indexes the table.
    #[must_use]
    pub fn range(&self) -> Interval {
        self.range
    }
}
