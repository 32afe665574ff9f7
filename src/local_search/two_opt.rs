//! 2-opt neighborhood with best-improvement selection.
//!
//! # Algorithm
//!
//! For each pair of edge positions `(i, j)` with `0 <= i < n-2` and
//! `i+2 <= j < n`, compute the change in tour length from replacing edges
//! `(a, b)` and `(c, d)` with `(a, c)` and `(b, d)`:
//!
//! ```text
//! a = t[i], b = t[i+1], c = t[j], d = t[(j+1) % n]
//! delta = d(a, c) + d(b, d) - d(a, b) - d(c, d)
//! ```
//!
//! The pair `(0, n-1)` is skipped: both edges meet at `t[0]`, and reversing
//! `t[1..=n-1]` yields the same cycle.
//!
//! After a full scan the most negative delta is applied by reversing the
//! segment `t[i+1..=j]`. Ties keep the first pair in scan order
//! (`i` ascending, then `j` ascending).
//!
//! An exchange counts as improving only when `delta < -IMPROVEMENT_EPSILON`.
//! On collinear or lattice points a no-op exchange can come out at
//! `-2.2e-16` from rounding alone; accepting it would cycle between
//! equal-cost orders forever.
//!
//! # Complexity
//!
//! O(n²) per call.
//!
//! # Reference
//!
//! Croes, G.A. (1958). "A method for solving traveling salesman problems",
//! *Operations Research* 6(6), 791-812.

use crate::distance::DistanceMatrix;

/// Minimum shortening for an exchange to count as an improvement.
pub const IMPROVEMENT_EPSILON: f64 = 1e-10;

/// A 2-opt exchange identified by its two edge positions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TwoOptMove {
    /// Position of the first removed edge `(t[i], t[i+1])`.
    pub i: usize,
    /// Position of the second removed edge `(t[j], t[(j+1) % n])`.
    pub j: usize,
    /// Change in tour length (negative = improvement).
    pub delta: f64,
}

/// Computes the tour length change of the 2-opt exchange at positions `i`, `j`.
#[inline]
pub fn two_opt_delta(tour: &[usize], distances: &DistanceMatrix, i: usize, j: usize) -> f64 {
    let n = tour.len();
    let (a, b) = (tour[i], tour[i + 1]);
    let (c, d) = (tour[j], tour[(j + 1) % n]);
    distances.get(a, c) + distances.get(b, d) - distances.get(a, b) - distances.get(c, d)
}

/// Applies the 2-opt exchange at positions `i`, `j` by reversing `tour[i+1..=j]`.
#[inline]
pub fn apply_two_opt(tour: &mut [usize], i: usize, j: usize) {
    tour[i + 1..=j].reverse();
}

/// Scans the full 2-opt neighborhood and applies the best improving exchange.
///
/// Returns the applied move, or `None` if no exchange shortens the tour by
/// more than [`IMPROVEMENT_EPSILON`] (the order is 2-opt locally optimal).
/// Tours with fewer than four cities have no valid exchange.
///
/// # Examples
///
/// ```
/// use u_tsp::distance::DistanceMatrix;
/// use u_tsp::local_search::two_opt_best_improvement;
///
/// // 0→1 and 2→3 are the square's diagonals
/// let dm = DistanceMatrix::build(&[(0.0, 0.0), (1.0, 1.0), (0.0, 1.0), (1.0, 0.0)]).unwrap();
/// let mut tour = vec![0, 1, 2, 3];
/// let mv = two_opt_best_improvement(&mut tour, &dm).unwrap();
/// assert_eq!((mv.i, mv.j), (0, 2));
/// assert_eq!(tour, vec![0, 2, 1, 3]);
/// assert!(two_opt_best_improvement(&mut tour, &dm).is_none());
/// ```
pub fn two_opt_best_improvement(
    tour: &mut [usize],
    distances: &DistanceMatrix,
) -> Option<TwoOptMove> {
    let best = best_two_opt_move(tour, distances)?;
    apply_two_opt(tour, best.i, best.j);
    Some(best)
}

/// Finds the best improving exchange without applying it.
pub fn best_two_opt_move(tour: &[usize], distances: &DistanceMatrix) -> Option<TwoOptMove> {
    let n = tour.len();
    if n < 4 {
        return None;
    }

    let mut best: Option<TwoOptMove> = None;
    let mut best_delta = -IMPROVEMENT_EPSILON;

    for i in 0..n - 2 {
        for j in i + 2..n {
            if i == 0 && j == n - 1 {
                continue;
            }
            let delta = two_opt_delta(tour, distances, i, j);
            if delta < best_delta {
                best_delta = delta;
                best = Some(TwoOptMove { i, j, delta });
            }
        }
    }

    best
}
