// The following doc comment is kept in sync with the README.md file. Please
// run the `cargo sync-readme` command after modifying the comment contents.
//! This crate provides a dynamic programming algorithm for the _partial range
//! covering_ problem.
//!
//! Suppose we're given a range $r=[a\mathinner{.\\,.}b]$ of integers, a target
//! $k$, and a sequence $C=(c_0,c_1,\dots,c_{m-1})$ of candidate intervals with
//! integer bounds. The task is to find a subcollection $C^\star\subseteq C$ of
//! minimum size whose union contains at least $k$ distinct elements of $r$,
//! or to determine that no such subcollection exists. (When $k=|r|$ this is
//! the classical problem of covering an interval by the fewest intervals
//! from a given family, which the greedy "furthest reach" rule solves in
//! linear time; the partial version needs to decide which elements of $r$
//! to leave uncovered.)
//!
//! The solver considers the elements of $r$ from left to right. Given the
//! _subproblem_ of covering $k$ elements of $[a\mathinner{.\\,.}b]$, it either
//! leaves $a$ uncovered and moves on to $[a+1\mathinner{.\\,.}b]$, or it adds
//! the interval $c_j\ni a$ whose right endpoint $f$ is maximum, which covers
//! $f-a+1$ elements and leaves the subproblem of covering the rest in
//! $[f+1\mathinner{.\\,.}b]$. The cheaper of the two options is the answer.
//! Each subproblem is solved once and memoized, so the whole computation takes
//! $O\bigl((|r|+m)\log m\bigr)$ steps to build the table of furthest reaches
//! plus time proportional to the number of distinct subproblems visited.
//!
//! The following structures are the most important pieces of this crate:
//! - [`ReachTable`] precomputes the furthest-reaching candidate of every
//!   element of $r$.
//! - [`Engine`] evaluates the recurrence, storing one [`PartialCover`] per
//!   [`Subproblem`] in a [`Cache`].
//! - [`solve_min_covering`] and [`min_covering`] drive the engine and recover
//!   the optimal intervals by following the chain of partial covers left
//!   in the cache; [`CoverSolver`] does the same for a problem whose cache
//!   is reused across several targets.
//! - [`CountingCache`] is an instrumented cache that counts its reads and
//!   writes.
//!
//! Infeasible targets are not errors: they produce `Ok(None)`. The [`Error`]
//! type is reserved for input that the solver cannot represent, such as an
//! empty range.
//!
//! Also, the `demos` directory contains a small program, `shift_coverage.rs`,
//! that staffs a clinic with the fewest shifts for several targets.
//!
//! # Example
//!
//! ```
//! use partial_covers::{min_covering, Interval};
//!
//! // Cover at least 8 of the integers 1..=12.
//! let shifts = [
//!     Interval::new(1, 3),
//!     Interval::new(2, 5),
//!     Interval::new(4, 6),
//!     Interval::new(8, 11),
//!     Interval::new(10, 12),
//! ];
//! let cover = min_covering(Interval::new(1, 12), 8, &shifts)?.unwrap();
//! assert_eq!(cover.len(), 2);
//! # Ok::<(), partial_covers::Error>(())
//! ```

mod cache;
mod cost;
mod dp;
mod error;
mod indices;
mod interval;
mod reach;
mod solver;

pub use cache::{Cache, CountingCache};
pub use cost::Cost;
pub use dp::{Engine, PartialCover, Subproblem};
pub use error::{Error, Result};
pub use indices::IntervalIndex;
pub use interval::Interval;
pub use reach::{Reach, ReachTable};
pub use solver::{coverage, max_coverage, min_covering, reconstruct, solve_min_covering, CoverSolver};
