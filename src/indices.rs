/// The position of an interval in the list of candidates given to a solver.
///
/// Positions are zero-based and follow the order in which the intervals were
/// supplied; see [`CoverSolver::add_interval`] for an example.
///
/// [`CoverSolver::add_interval`]: `crate::CoverSolver::add_interval`
#[derive(Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Copy, Clone)]
#[repr(transparent)]
pub struct IntervalIndex(usize);

impl IntervalIndex {
    /// Creates a new index.
    #[must_use]
    pub const fn new(ix: usize) -> Self {
        Self(ix)
    }

    /// Returns the index value as a primitive type.
    #[must_use]
    pub const fn get(self) -> usize {
        self.0
    }
}

impl From<IntervalIndex> for usize {
    fn from(ix: IntervalIndex) -> Self {
        ix.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_get() {
        assert_eq!(IntervalIndex::new(0).get(), 0);
        assert_eq!(IntervalIndex::new(123).get(), 123);
        assert_eq!(usize::from(IntervalIndex::new(456789)), 456789);
    }

    #[test]
    fn indices_are_ordered_by_position() {
        assert!(IntervalIndex::new(2) < IntervalIndex::new(3));
        let mut ixs = [5, 1, 3].map(IntervalIndex::new);
        ixs.sort();
        assert_eq!(ixs, [1, 3, 5].map(IntervalIndex::new));
    }
}
