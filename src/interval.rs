use std::fmt;
use std::ops::RangeInclusive;

/// A contiguous set of integers $\\{f,f+1,\dots,l\\}$ with unit step, given by
/// its inclusive bounds $f$ and $l$.
///
/// An interval whose first element exceeds its last element is _empty_: it
/// contains no integers, and a solver treats it as a candidate that covers
/// nothing.
#[derive(Debug, Eq, PartialEq, Hash, Copy, Clone)]
pub struct Interval {
    first: i64,
    last: i64,
}

impl Interval {
    /// Creates the interval $[f\mathinner{.\\,.}l]$ with `first` $=f$ and `last` $=l$.
    #[must_use]
    pub const fn new(first: i64, last: i64) -> Self {
        Self { first, last }
    }

    /// Creates the interval that consists of a single integer.
    #[must_use]
    pub const fn point(n: i64) -> Self {
        Self::new(n, n)
    }

    /// Returns the smallest integer in the interval.
    #[must_use]
    pub const fn first(&self) -> i64 {
        self.first
    }

    /// Returns the largest integer in the interval.
    #[must_use]
    pub const fn last(&self) -> i64 {
        self.last
    }

    /// Returns whether the interval contains no integers.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.first > self.last
    }

    /// Returns whether `n` lies in the interval.
    #[must_use]
    pub const fn contains(&self, n: i64) -> bool {
        self.first <= n && n <= self.last
    }

    /// Returns the number of integers in the interval, or [`None`] if this
    /// quantity does not fit in an `i64`.
    ///
    /// Empty intervals have length zero.
    #[must_use]
    pub fn checked_len(&self) -> Option<i64> {
        if self.is_empty() {
            Some(0)
        } else {
            self.last.checked_sub(self.first)?.checked_add(1)
        }
    }

    /// Returns the integers common to `self` and `other`, which may be empty.
    #[must_use]
    pub fn intersection(&self, other: &Self) -> Self {
        Self::new(self.first.max(other.first), self.last.min(other.last))
    }
}

impl From<RangeInclusive<i64>> for Interval {
    fn from(range: RangeInclusive<i64>) -> Self {
        let (first, last) = range.into_inner();
        Self::new(first, last)
    }
}

impl From<Interval> for RangeInclusive<i64> {
    fn from(interval: Interval) -> Self {
        interval.first..=interval.last
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..={}", self.first, self.last)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_range() {
        let interval = Interval::from(-3..=7);
        assert_eq!(interval.first(), -3);
        assert_eq!(interval.last(), 7);
        assert_eq!(RangeInclusive::from(interval), -3..=7);
        assert_eq!(interval.to_string(), "-3..=7");
    }

    #[test]
    fn lengths() {
        assert_eq!(Interval::new(1, 5).checked_len(), Some(5));
        assert_eq!(Interval::point(-4).checked_len(), Some(1));
        assert_eq!(Interval::new(3, 2).checked_len(), Some(0));
        assert_eq!(Interval::new(0, i64::MAX).checked_len(), None);
        assert_eq!(Interval::new(i64::MIN, 0).checked_len(), None);
    }

    #[test]
    fn empty_intervals_contain_nothing() {
        let empty = Interval::new(4, 1);
        assert!(empty.is_empty());
        assert!((-10..10).all(|n| !empty.contains(n)));
    }

    #[test]
    fn intersection() {
        let range = Interval::new(1, 6);
        assert_eq!(range.intersection(&Interval::new(-2, 3)), Interval::new(1, 3));
        assert_eq!(range.intersection(&Interval::new(2, 4)), Interval::new(2, 4));
        assert!(range.intersection(&Interval::new(7, 9)).is_empty());
    }
}
