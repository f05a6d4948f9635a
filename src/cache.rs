use std::collections::HashMap;
use std::hash::BuildHasher;

use indexmap::map::Entry;
use indexmap::IndexMap;

use crate::dp::{PartialCover, Subproblem};

/// A memoization table that maps the [subproblems] visited by the [DP engine]
/// to their [partial covers].
///
/// Besides memoizing the engine's results, a cache keeps the chain of partial
/// covers that the [solver] follows to recover the intervals of an optimal
/// solution. Entries are written once: storing a cover under a key that is
/// already present leaves the existing cover in place.
///
/// A cache should only be shared between solves of a single range and list of
/// candidate intervals, possibly with different coverage targets. Reusing it
/// for another problem yields meaningless results.
///
/// [subproblems]: `Subproblem`
/// [DP engine]: `crate::Engine`
/// [partial covers]: `PartialCover`
/// [solver]: `crate::solve_min_covering`
pub trait Cache {
    /// Returns the partial cover of a subproblem that has already been solved.
    ///
    /// This is the operation invoked by [`get_or_compute`] on each visit to a
    /// subproblem; instrumented caches count the successful calls as reads.
    ///
    /// [`get_or_compute`]: Self::get_or_compute
    fn lookup(&mut self, key: &Subproblem) -> Option<PartialCover>;

    /// Records the partial cover of a subproblem that was not in the cache.
    ///
    /// The cache is left untouched if `key` is already present.
    fn store(&mut self, key: Subproblem, cover: PartialCover);

    /// Returns the partial cover of a subproblem without counting the access.
    fn get(&self, key: &Subproblem) -> Option<&PartialCover>;

    /// Returns the number of subproblems in the cache.
    fn len(&self) -> usize;

    /// Returns whether the cache holds no subproblems.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the partial cover of `key` if it is present; otherwise computes
    /// it with `compute`, stores it and returns it.
    fn get_or_compute<F>(&mut self, key: Subproblem, compute: F) -> PartialCover
    where
        Self: Sized,
        F: FnOnce() -> PartialCover,
    {
        if let Some(cover) = self.lookup(&key) {
            cover
        } else {
            let cover = compute();
            self.store(key, cover);
            cover
        }
    }
}

impl<S: BuildHasher> Cache for HashMap<Subproblem, PartialCover, S> {
    fn lookup(&mut self, key: &Subproblem) -> Option<PartialCover> {
        HashMap::get(self, key).copied()
    }

    fn store(&mut self, key: Subproblem, cover: PartialCover) {
        self.entry(key).or_insert(cover);
    }

    fn get(&self, key: &Subproblem) -> Option<&PartialCover> {
        HashMap::get(self, key)
    }

    fn len(&self) -> usize {
        HashMap::len(self)
    }
}

/// A [`Cache`] that counts how many times it serves an existing entry and how
/// many entries it creates, for diagnostic purposes.
///
/// The entries are kept in insertion order, so [`iter`](Self::iter) yields the
/// subproblems in the order the DP engine finished them.
///
/// # Example
///
/// ```
/// use partial_covers::{solve_min_covering, Cache, CountingCache, Interval};
///
/// let intervals = [Interval::new(1, 3), Interval::new(4, 6), Interval::new(2, 5)];
/// let mut cache = CountingCache::new();
/// let cover = solve_min_covering(Interval::new(1, 6), 6, &intervals, &mut cache)?;
/// assert_eq!(cover.map(|c| c.len()), Some(2));
/// assert_eq!(cache.writes(), cache.len());
/// assert!(cache.reads() <= cache.writes());
/// # Ok::<(), partial_covers::Error>(())
/// ```
#[derive(Debug, Default, Clone)]
pub struct CountingCache {
    entries: IndexMap<Subproblem, PartialCover>,
    /// The number of successful calls to [`Cache::lookup`].
    reads: usize,
    /// The number of entries created by [`Cache::store`].
    writes: usize,
}

impl CountingCache {
    /// Creates an empty cache with zeroed counters.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of times an existing entry was read.
    #[must_use]
    pub fn reads(&self) -> usize {
        self.reads
    }

    /// Returns the number of entries that were written.
    #[must_use]
    pub fn writes(&self) -> usize {
        self.writes
    }

    /// Iterates over the cached subproblems and their partial covers, in
    /// insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&Subproblem, &PartialCover)> {
        self.entries.iter()
    }

    /// Returns whether `key` has been solved.
    #[must_use]
    pub fn contains(&self, key: &Subproblem) -> bool {
        self.entries.contains_key(key)
    }
}

impl Cache for CountingCache {
    fn lookup(&mut self, key: &Subproblem) -> Option<PartialCover> {
        let cover = self.entries.get(key).copied();
        if cover.is_some() {
            self.reads += 1;
        }
        cover
    }

    fn store(&mut self, key: Subproblem, cover: PartialCover) {
        if let Entry::Vacant(entry) = self.entries.entry(key) {
            entry.insert(cover);
            self.writes += 1;
        }
    }

    fn get(&self, key: &Subproblem) -> Option<&PartialCover> {
        self.entries.get(key)
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}

impl<'c> IntoIterator for &'c CountingCache {
    type Item = (&'c Subproblem, &'c PartialCover);
    type IntoIter = indexmap::map::Iter<'c, Subproblem, PartialCover>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cost::Cost;
    use crate::indices::IntervalIndex;

    fn base(key: Subproblem) -> PartialCover {
        PartialCover::new(Cost::ZERO, None, key)
    }

    #[test]
    fn get_or_compute_runs_once_per_key() {
        let mut cache = CountingCache::new();
        let key = Subproblem::new(1, 4, 2);
        let mut calls = 0;
        for _ in 0..3 {
            let cover = cache.get_or_compute(key, || {
                calls += 1;
                base(key)
            });
            assert_eq!(cover, base(key));
        }
        assert_eq!(calls, 1);
        assert_eq!(cache.writes(), 1);
        assert_eq!(cache.reads(), 2);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn entries_are_written_once() {
        let key = Subproblem::new(1, 4, 2);
        let first = base(key);
        let second = PartialCover::new(Cost::Finite(1), Some(IntervalIndex::new(0)), key);

        let mut counting = CountingCache::new();
        counting.store(key, first);
        counting.store(key, second);
        assert_eq!(counting.get(&key), Some(&first));
        assert_eq!(counting.writes(), 1);

        let mut plain: HashMap<Subproblem, PartialCover> = HashMap::new();
        plain.store(key, first);
        plain.store(key, second);
        assert_eq!(Cache::get(&plain, &key), Some(&first));
        assert_eq!(Cache::len(&plain), 1);
    }

    #[test]
    fn misses_and_peeks_are_not_counted() {
        let mut cache = CountingCache::new();
        let key = Subproblem::new(-3, 3, 0);
        assert_eq!(cache.lookup(&key), None);
        assert!(cache.is_empty());
        cache.store(key, base(key));
        assert!(cache.contains(&key));
        assert!(cache.get(&key).is_some());
        assert_eq!(cache.reads(), 0);
        assert_eq!(cache.writes(), 1);
    }

    #[test]
    fn iterates_in_insertion_order() {
        let mut cache = CountingCache::new();
        let keys = [Subproblem::new(5, 6, 1), Subproblem::new(1, 6, 3), Subproblem::new(2, 6, 0)];
        for key in keys {
            cache.store(key, base(key));
        }
        let visited: Vec<_> = cache.iter().map(|(key, _)| *key).collect();
        assert_eq!(visited, keys);
        assert_eq!((&cache).into_iter().count(), 3);
    }
}
