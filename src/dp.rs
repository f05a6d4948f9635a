use std::fmt;

use log::trace;

use crate::cache::Cache;
use crate::cost::Cost;
use crate::indices::IntervalIndex;
use crate::interval::Interval;
use crate::reach::ReachTable;

/// The task of covering at least $k$ integers of a range $[a\mathinner{.\\,.}b]$,
/// which serves as the key of a [memoization table](`Cache`).
///
/// The range is empty when $a>b$; this happens once the [DP engine](`Engine`)
/// has moved past the last element of the original range.
#[derive(Debug, Eq, PartialEq, Hash, Copy, Clone)]
pub struct Subproblem {
    /// The first element $a$ of the range.
    first: i64,
    /// The last element $b$ of the range.
    last: i64,
    /// The number $k$ of elements to be covered.
    target: i64,
}

impl Subproblem {
    /// Creates the task of covering `target` elements of `first..=last`.
    #[must_use]
    pub const fn new(first: i64, last: i64, target: i64) -> Self {
        Self { first, last, target }
    }

    /// Returns the range whose elements are to be covered.
    #[must_use]
    pub const fn range(&self) -> Interval {
        Interval::new(self.first, self.last)
    }

    /// Returns the number of elements to be covered.
    #[must_use]
    pub const fn target(&self) -> i64 {
        self.target
    }

    /// Returns the number of elements in the range.
    fn len(&self) -> i64 {
        self.range()
            .checked_len()
            .unwrap_or_else(|| panic!("subproblem {self} exceeds the range of i64"))
    }

    /// Returns the subproblem that leaves the first element $a$ uncovered.
    fn without_first(&self) -> Self {
        let first = self.first.checked_add(1).unwrap_or_else(|| {
            panic!("subproblem {self} exceeds the range of i64");
        });
        Self::new(first, self.last, self.target)
    }

    /// Returns the subproblem that remains after covering $[a\mathinner{.\\,.}f]$,
    /// where $f$ is the last element of an interval that contains $a$.
    fn after(&self, reach: i64) -> Self {
        // An interval that sticks out of the range covers all of it; clamping
        // its end keeps `reach + 1` representable.
        let reach = reach.min(self.last);
        let covered = reach - self.first + 1;
        Self::new(reach + 1, self.last, self.target - covered)
    }
}

impl fmt::Display for Subproblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cover {} of {}..={}", self.target, self.first, self.last)
    }
}

/// The solution of a [subproblem](`Subproblem`) computed by the [DP engine](`Engine`).
///
/// A partial cover records the minimum number of intervals needed, and the
/// last choice that led to that minimum. Together with the [cache](`Cache`)
/// where they are stored, partial covers form an implicit linked list: the
/// [`next`](Self::next) subproblem points to the cover of the remaining task,
/// whose own `next` subproblem points further along, and so on until a cover
/// of cost zero is reached. The [solver](`crate::reconstruct`) traverses this
/// list to recover the intervals of an optimal solution.
#[derive(Debug, Eq, PartialEq, Copy, Clone)]
pub struct PartialCover {
    /// The least number of intervals that solve the subproblem.
    cost: Cost,
    /// The interval added by the DP engine when it decided to include
    /// the furthest-reaching interval containing the first element; or
    /// [`None`] if the cover is a base case.
    interval: Option<IntervalIndex>,
    /// The subproblem whose cover continues the chain.
    ///
    /// # Invariant
    ///
    /// If `cost` is a finite value $n>0$, then `interval` is not [`None`]
    /// and the cover of `next` has cost $n-1$. A cover of cost zero points
    /// to its own subproblem.
    next: Subproblem,
}

impl PartialCover {
    /// Creates a partial cover.
    #[must_use]
    pub const fn new(cost: Cost, interval: Option<IntervalIndex>, next: Subproblem) -> Self {
        Self {
            cost,
            interval,
            next,
        }
    }

    /// Returns the least number of intervals that solve the subproblem.
    #[must_use]
    pub const fn cost(&self) -> Cost {
        self.cost
    }

    /// Returns the interval chosen by the cover, if any.
    #[must_use]
    pub const fn interval(&self) -> Option<IntervalIndex> {
        self.interval
    }

    /// Returns the subproblem whose cover continues the chain.
    #[must_use]
    pub const fn next(&self) -> Subproblem {
        self.next
    }
}

/// The state of a subproblem whose cover depends on others that are still
/// being computed.
#[derive(Copy, Clone)]
enum Phase {
    /// Waiting for the cover of the subproblem without its first element.
    Skip,
    /// Waiting for the cover of the subproblem that remains after adding
    /// `interval`, namely `next`. The cover obtained in the `Skip` phase is
    /// `skip`.
    Add {
        skip: PartialCover,
        interval: IntervalIndex,
        next: Subproblem,
    },
}

/// A subproblem on the explicit recursion stack of the [`Engine`].
#[derive(Copy, Clone)]
struct Frame {
    key: Subproblem,
    phase: Phase,
}

/// What to do with the frame at the top of the recursion stack.
enum Step {
    /// Obtain the cover of another subproblem.
    Descend(Subproblem),
    /// Store the cover of the frame's subproblem.
    Finish(PartialCover),
}

/// Computes the minimum number of intervals needed to cover a subproblem.
///
/// The cover of $(a\mathinner{.\\,.}b, k)$ is defined recursively as follows:
///
/// 1. If $k\le0$, nothing needs to be covered and the cost is $0$.
/// 2. If $k>b-a+1$, the task is impossible and the cost is $\infty$.
/// 3. Otherwise let $s$ be the cover of $(a+1\mathinner{.\\,.}b, k)$, which
///    leaves $a$ uncovered. If no interval contains $a$, the answer is $s$.
/// 4. Otherwise let $c$ be the interval that contains $a$ and reaches
///    furthest, up to $f$, and let $t$ be the cover of $(f+1\mathinner{.\\,.}b,
///    k-(f-a+1))$. If $t+1\le s$, the answer is a new partial cover of cost
///    $t+1$ that uses $c$ and continues with $t$'s subproblem; otherwise the
///    answer is $s$.
///
/// Each subproblem is solved once and memoized in the [cache](`Cache`),
/// including the base cases. Since the first element of the range only
/// grows along the recursion, at most $O(|r|)$ ranges are visited per
/// coverage target, and each step takes constant time apart from cache
/// accesses. The recursion is carried out with an explicit stack, so its
/// depth is not limited by the size of the call stack.
///
/// # Example
///
/// ```
/// use std::collections::HashMap;
/// use partial_covers::{Cost, Engine, Interval, PartialCover, ReachTable, Subproblem};
///
/// let range = Interval::new(1, 6);
/// let intervals = [Interval::new(1, 4), Interval::new(3, 6), Interval::new(2, 2)];
/// let reaches = ReachTable::new(range, &intervals);
/// let mut cache: HashMap<Subproblem, PartialCover> = HashMap::new();
/// let mut engine = Engine::new(&reaches, &mut cache);
/// assert_eq!(engine.solve(Subproblem::new(1, 6, 4)).cost(), Cost::Finite(1));
/// assert_eq!(engine.solve(Subproblem::new(1, 6, 6)).cost(), Cost::Finite(2));
/// assert_eq!(engine.solve(Subproblem::new(2, 6, 6)).cost(), Cost::Unreachable);
/// ```
pub struct Engine<'a, C> {
    /// The furthest-reach index of the candidate intervals.
    reaches: &'a ReachTable,
    /// The memoization table, which also receives every computed cover.
    cache: &'a mut C,
}

impl<'a, C: Cache> Engine<'a, C> {
    /// Creates an engine that solves subproblems over the range of `reaches`.
    pub fn new(reaches: &'a ReachTable, cache: &'a mut C) -> Self {
        Self { reaches, cache }
    }

    /// Returns the cover of a subproblem, computing it and the covers of
    /// its dependencies if they are not already in the cache.
    ///
    /// # Panics
    ///
    /// This function panics if the recursion steps past [`i64::MAX`], which
    /// can only happen when the range of `key` ends at that value.
    pub fn solve(&mut self, key: Subproblem) -> PartialCover {
        let mut frames = Vec::new();
        match self.visit(key) {
            Some(cover) => return cover,
            None => frames.push(Frame::new(key)),
        }
        // The cover of the subproblem popped last from the stack, if any.
        let mut resolved: Option<PartialCover> = None;
        while let Some(mut frame) = frames.pop() {
            let step = match (frame.phase, resolved.take()) {
                (Phase::Skip, None) => Step::Descend(frame.key.without_first()),
                (Phase::Skip, Some(skip)) => match self.reaches.get(frame.key.first) {
                    // The first element must be left uncovered, so this
                    // subproblem shares the cover of its successor.
                    None => Step::Finish(skip),
                    Some(reach) => {
                        let next = frame.key.after(reach.last);
                        frame.phase = Phase::Add {
                            skip,
                            interval: reach.interval,
                            next,
                        };
                        Step::Descend(next)
                    }
                },
                (
                    Phase::Add {
                        skip,
                        interval,
                        next,
                    },
                    Some(add),
                ) => {
                    let cost = add.cost + 1;
                    Step::Finish(if cost <= skip.cost {
                        PartialCover::new(cost, Some(interval), next)
                    } else {
                        skip
                    })
                }
                (Phase::Add { .. }, None) => {
                    unreachable!("subproblem {} resumed without a cover", frame.key)
                }
            };
            match step {
                Step::Descend(child) => {
                    frames.push(frame);
                    match self.visit(child) {
                        Some(cover) => resolved = Some(cover),
                        None => frames.push(Frame::new(child)),
                    }
                }
                Step::Finish(cover) => {
                    trace!("{}: cost {}", frame.key, cover.cost);
                    self.cache.store(frame.key, cover);
                    if frames.is_empty() {
                        return cover;
                    }
                    resolved = Some(cover);
                }
            }
        }
        unreachable!("the cover of {key} is returned when its frame finishes")
    }

    /// Returns the cover of a subproblem if it is cached or trivial, or
    /// [`None`] if it must be computed from the covers of other subproblems.
    fn visit(&mut self, key: Subproblem) -> Option<PartialCover> {
        if let Some(cover) = self.cache.lookup(&key) {
            return Some(cover);
        }
        let cover = if key.target <= 0 {
            PartialCover::new(Cost::ZERO, None, key)
        } else if key.target > key.len() {
            PartialCover::new(Cost::Unreachable, None, key)
        } else {
            return None;
        };
        self.cache.store(key, cover);
        Some(cover)
    }
}

impl Frame {
    fn new(key: Subproblem) -> Self {
        Self {
            key,
            phase: Phase::Skip,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::CountingCache;
    use std::collections::HashMap;

    type Memo = HashMap<Subproblem, PartialCover>;

    fn intervals(bounds: &[(i64, i64)]) -> Vec<Interval> {
        bounds.iter().map(|&(f, l)| Interval::new(f, l)).collect()
    }

    #[test]
    fn nonpositive_targets_cost_nothing() {
        let reaches = ReachTable::new(Interval::new(1, 3), &[]);
        let mut cache = CountingCache::new();
        let mut engine = Engine::new(&reaches, &mut cache);
        for target in [0, -1, i64::MIN] {
            let key = Subproblem::new(1, 3, target);
            assert_eq!(engine.solve(key), PartialCover::new(Cost::ZERO, None, key));
        }
        assert_eq!(cache.len(), 3);
    }

    #[test]
    fn targets_beyond_the_range_are_unreachable() {
        let reaches = ReachTable::new(Interval::new(1, 3), &intervals(&[(1, 3)]));
        let mut cache = Memo::new();
        let mut engine = Engine::new(&reaches, &mut cache);
        let key = Subproblem::new(1, 3, 4);
        assert_eq!(engine.solve(key), PartialCover::new(Cost::Unreachable, None, key));
        let empty = Subproblem::new(4, 3, 1);
        assert_eq!(engine.solve(empty).cost(), Cost::Unreachable);
    }

    #[test]
    fn covers_chain_through_the_cache() {
        let candidates = intervals(&[(1, 1), (6, 6), (2, 5), (1, 3), (4, 6)]);
        let reaches = ReachTable::new(Interval::new(1, 6), &candidates);
        let mut cache = Memo::new();
        let top = Subproblem::new(1, 6, 6);
        let cover = Engine::new(&reaches, &mut cache).solve(top);

        let rest = Subproblem::new(4, 6, 3);
        assert_eq!(cover, PartialCover::new(Cost::Finite(2), Some(IntervalIndex::new(3)), rest));
        let done = Subproblem::new(7, 6, 0);
        assert_eq!(
            cache.get(&rest),
            Some(&PartialCover::new(Cost::Finite(1), Some(IntervalIndex::new(4)), done))
        );
        assert_eq!(cache.get(&done), Some(&PartialCover::new(Cost::ZERO, None, done)));
        assert_eq!(cache.get(&top), Some(&cover));
    }

    #[test]
    fn uncovered_elements_share_the_cover_of_their_successor() {
        let reaches = ReachTable::new(Interval::new(1, 4), &intervals(&[(3, 4)]));
        let mut cache = Memo::new();
        let cover = Engine::new(&reaches, &mut cache).solve(Subproblem::new(1, 4, 2));
        let expected = PartialCover::new(
            Cost::Finite(1),
            Some(IntervalIndex::new(0)),
            Subproblem::new(5, 4, 0),
        );
        assert_eq!(cover, expected);
        // Elements 1 and 2 cannot be covered, so their subproblems are
        // aliases of the subproblem that starts at 3.
        assert_eq!(cache.get(&Subproblem::new(2, 4, 2)), Some(&expected));
        assert_eq!(cache.get(&Subproblem::new(3, 4, 2)), Some(&expected));
    }

    #[test]
    fn intervals_past_the_range_end_are_clamped() {
        let reaches = ReachTable::new(Interval::new(1, 5), &intervals(&[(0, i64::MAX)]));
        let mut cache = Memo::new();
        let cover = Engine::new(&reaches, &mut cache).solve(Subproblem::new(1, 5, 3));
        assert_eq!(cover.cost(), Cost::Finite(1));
        assert_eq!(cover.next(), Subproblem::new(6, 5, -2));
    }

    #[test]
    fn impossible_additions_still_record_the_interval() {
        // Neither branch succeeds at 1, and ties favor the interval.
        let reaches = ReachTable::new(Interval::new(1, 2), &intervals(&[(1, 1)]));
        let mut cache = Memo::new();
        let cover = Engine::new(&reaches, &mut cache).solve(Subproblem::new(1, 2, 2));
        assert_eq!(cover.cost(), Cost::Unreachable);
        assert_eq!(cover.interval(), Some(IntervalIndex::new(0)));
        assert_eq!(cover.next(), Subproblem::new(2, 2, 1));
    }

    #[test]
    fn every_visited_subproblem_is_written_once() {
        let candidates = intervals(&[(1, 1), (6, 6), (2, 5), (1, 3), (4, 6)]);
        let reaches = ReachTable::new(Interval::new(1, 6), &candidates);
        let mut cache = CountingCache::new();
        Engine::new(&reaches, &mut cache).solve(Subproblem::new(1, 6, 6));
        assert_eq!(cache.writes(), cache.len());
        assert!(cache.reads() <= cache.writes());
        // The top-level subproblem is finished last.
        let (last, _) = cache.iter().last().unwrap();
        assert_eq!(*last, Subproblem::new(1, 6, 6));
    }

    #[test]
    fn long_ranges_do_not_exhaust_the_call_stack() {
        let n = 200_000;
        let reaches = ReachTable::new(Interval::new(1, n), &intervals(&[(n, n)]));
        let mut cache = Memo::new();
        let cover = Engine::new(&reaches, &mut cache).solve(Subproblem::new(1, n, 1));
        assert_eq!(cover.cost(), Cost::Finite(1));
        assert_eq!(cover.interval(), Some(IntervalIndex::new(0)));
    }

    #[test]
    fn subproblem_accessors() {
        let key = Subproblem::new(-6, -1, 4);
        assert_eq!(key.range(), Interval::new(-6, -1));
        assert_eq!(key.target(), 4);
        assert_eq!(key.len(), 6);
        assert_eq!(key.without_first(), Subproblem::new(-5, -1, 4));
        assert_eq!(key.after(-4), Subproblem::new(-3, -1, 1));
        assert_eq!(key.to_string(), "cover 4 of -6..=-1");
    }
}
