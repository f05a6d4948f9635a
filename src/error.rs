use thiserror::Error;

use crate::dp::Subproblem;

/// The reasons why a solver can refuse to handle a problem.
///
/// Note that an infeasible coverage target is _not_ an error; the solvers
/// report it by returning `Ok(None)`.
#[derive(Debug, Error, Eq, PartialEq, Clone)]
pub enum Error {
    /// The range to be covered contains no integers.
    #[error("range {first}..={last} to be covered is empty")]
    EmptyRange {
        /// The first element of the offending range.
        first: i64,
        /// The last element of the offending range.
        last: i64,
    },
    /// The number of integers in the range, or the successor of its last
    /// element, does not fit in an `i64`.
    #[error("range {first}..={last} is too long to be covered")]
    RangeTooLong {
        /// The first element of the offending range.
        first: i64,
        /// The last element of the offending range.
        last: i64,
    },
    /// The chain of partial covers left in a cache refers to a subproblem
    /// that the cache does not hold. This happens only if the cache was
    /// shared with a solver for a different problem.
    #[error("no partial cover is cached for subproblem {0}")]
    MissingRecord(Subproblem),
    /// A partial cover in the chain left in a cache does not account for
    /// its cost, either because it names no interval or because the cover
    /// that follows it has the wrong cost.
    #[error("partial cover of subproblem {0} breaks the chain of covers")]
    BrokenChain(Subproblem),
}

/// A specialized [`Result`](std::result::Result) type for covering operations.
pub type Result<T> = std::result::Result<T, Error>;
