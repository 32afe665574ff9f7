//! Local search driver: apply best 2-opt moves until none improves.

use log::trace;

use crate::distance::DistanceMatrix;

use super::two_opt::two_opt_best_improvement;

/// Outcome of a local search run.
#[derive(Debug, Clone)]
pub struct LocalSearchResult {
    /// The 2-opt locally optimal order.
    pub order: Vec<usize>,
    /// Number of exchanges applied before convergence.
    pub moves: usize,
    /// Sum of applied deltas (non-positive).
    pub improvement: f64,
}

/// Runs 2-opt local search from `order` until no improving exchange exists.
///
/// Always terminates: each applied exchange shortens the tour by more than
/// [`IMPROVEMENT_EPSILON`](super::IMPROVEMENT_EPSILON) and there are finitely
/// many orders. No iteration cap is applied; wrap the
/// call if a hard budget is needed.
///
/// # Examples
///
/// ```
/// use u_tsp::distance::DistanceMatrix;
/// use u_tsp::evaluation::tour_cost;
/// use u_tsp::local_search::local_search;
///
/// let dm = DistanceMatrix::build(&[(0.0, 0.0), (2.0, 2.0), (0.0, 2.0), (2.0, 0.0)]).unwrap();
/// let order = local_search(vec![0, 1, 2, 3], &dm);
/// assert!((tour_cost(&order, &dm).unwrap() - 8.0).abs() < 1e-10);
/// ```
pub fn local_search(order: Vec<usize>, distances: &DistanceMatrix) -> Vec<usize> {
    local_search_with_stats(order, distances).order
}

/// Same as [`local_search`], also reporting how many moves were applied.
pub fn local_search_with_stats(
    mut order: Vec<usize>,
    distances: &DistanceMatrix,
) -> LocalSearchResult {
    let mut moves = 0;
    let mut improvement = 0.0;

    while let Some(mv) = two_opt_best_improvement(&mut order, distances) {
        moves += 1;
        improvement += mv.delta;
        trace!("2-opt move {moves}: i={} j={} delta={:.6}", mv.i, mv.j, mv.delta);
    }

    LocalSearchResult {
        order,
        moves,
        improvement,
    }
}
