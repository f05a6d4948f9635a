//! A small clinic must keep a nurse on duty during at least a given number of
//! the 24 hours of a day, and it can only hire from a list of fixed shifts.
//! Each shift is an interval of hours; the program below finds the fewest
//! shifts that staff the clinic for $k$ hours, for several values of $k$.
//!
//! Since every shift list and every target share the same range of hours,
//! a single [`CoverSolver`] answers all the queries, reusing the partial
//! covers computed for the previous targets.

use partial_covers::{Cost, CoverSolver, Interval};

const SHIFTS: [(&str, i64, i64); 8] = [
    ("early", 0, 5),
    ("dawn", 4, 9),
    ("morning", 6, 13),
    ("split", 9, 11),
    ("afternoon", 12, 17),
    ("late", 14, 19),
    ("evening", 18, 23),
    ("owl", 22, 23),
];

fn main() -> partial_covers::Result<()> {
    let mut solver = CoverSolver::new(Interval::new(0, 23))?;
    for &(_, start, end) in &SHIFTS {
        solver.add_interval(start..=end);
    }
    for hours in [6, 12, 18, 24, 25] {
        match solver.solve(hours)? {
            Some(mut cover) => {
                cover.sort();
                let names: Vec<_> = cover.iter().map(|ix| SHIFTS[ix.get()].0).collect();
                println!("{hours:>2} hours: {} shifts {names:?}", names.len());
            }
            None => {
                debug_assert_eq!(solver.min_count(hours), Cost::Unreachable);
                println!("{hours:>2} hours: impossible");
            }
        }
    }
    println!("{} subproblems were memoized", solver.cache_len());
    Ok(())
}
