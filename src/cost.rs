use std::fmt;
use std::ops::Add;

/// The least number of intervals needed to cover a [subproblem], or the
/// special value $\infty$ when no subset of the candidates suffices.
///
/// Costs are totally ordered with $\infty$ above every finite value, and
/// $\infty$ absorbs addition: $n+\infty=\infty+n=\infty$ for all $n$.
/// A finite sum that would overflow a `usize` also yields $\infty$.
///
/// ```
/// use partial_covers::Cost;
///
/// assert!(Cost::Finite(2) < Cost::Finite(3));
/// assert!(Cost::Finite(usize::MAX) < Cost::Unreachable);
/// assert_eq!(Cost::Finite(2) + 1, Cost::Finite(3));
/// assert_eq!(Cost::Unreachable + 1, Cost::Unreachable);
/// ```
///
/// [subproblem]: `crate::Subproblem`
// The derived orderings rely on `Finite` being declared before `Unreachable`.
#[derive(Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Copy, Clone)]
pub enum Cost {
    /// The subproblem can be solved with this many intervals.
    Finite(usize),
    /// The subproblem has no solution.
    Unreachable,
}

impl Cost {
    /// The cost of a subproblem that needs no intervals at all.
    pub const ZERO: Self = Self::Finite(0);

    /// Returns whether the cost is $\infty$.
    #[must_use]
    pub const fn is_unreachable(self) -> bool {
        matches!(self, Self::Unreachable)
    }

    /// Returns the number of intervals, or [`None`] if the cost is $\infty$.
    #[must_use]
    pub const fn finite(self) -> Option<usize> {
        match self {
            Self::Finite(n) => Some(n),
            Self::Unreachable => None,
        }
    }
}

impl Add for Cost {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        match (self, rhs) {
            (Self::Finite(a), Self::Finite(b)) => a.checked_add(b).map_or(Self::Unreachable, Self::Finite),
            _ => Self::Unreachable,
        }
    }
}

impl Add<usize> for Cost {
    type Output = Self;

    fn add(self, rhs: usize) -> Self {
        self + Self::Finite(rhs)
    }
}

impl From<usize> for Cost {
    fn from(n: usize) -> Self {
        Self::Finite(n)
    }
}

impl fmt::Display for Cost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Finite(n) => write!(f, "{n}"),
            Self::Unreachable => f.write_str("∞"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unreachable_is_above_every_finite_cost() {
        for n in [0, 1, 17, usize::MAX] {
            assert!(Cost::Finite(n) < Cost::Unreachable);
            assert!(Cost::Unreachable > Cost::Finite(n));
        }
        assert_eq!(Cost::Unreachable.cmp(&Cost::Unreachable), std::cmp::Ordering::Equal);
        assert!(Cost::Unreachable <= Cost::Unreachable);
    }

    #[test]
    fn unreachable_absorbs_addition() {
        assert_eq!(Cost::Unreachable + Cost::Finite(4), Cost::Unreachable);
        assert_eq!(Cost::Finite(4) + Cost::Unreachable, Cost::Unreachable);
        assert_eq!(Cost::Unreachable + Cost::Unreachable, Cost::Unreachable);
        assert_eq!(Cost::Unreachable + 1, Cost::Unreachable);
    }

    #[test]
    fn finite_addition_saturates_into_unreachable() {
        assert_eq!(Cost::Finite(3) + Cost::Finite(4), Cost::Finite(7));
        assert_eq!(Cost::Finite(usize::MAX) + 1, Cost::Unreachable);
    }

    #[test]
    fn accessors() {
        assert_eq!(Cost::ZERO.finite(), Some(0));
        assert_eq!(Cost::Unreachable.finite(), None);
        assert!(Cost::Unreachable.is_unreachable());
        assert!(!Cost::from(5).is_unreachable());
        assert_eq!(Cost::Finite(5).to_string(), "5");
        assert_eq!(Cost::Unreachable.to_string(), "∞");
    }
}
