//! Local search for single tours.
//!
//! - [`two_opt`](two_opt_best_improvement) — best-improvement 2-opt neighborhood
//! - [`local_search`] — repeat 2-opt until the tour is locally optimal

mod search;
mod two_opt;

pub use search::{local_search, local_search_with_stats, LocalSearchResult};
pub use two_opt::{
    apply_two_opt, best_two_opt_move, two_opt_best_improvement, two_opt_delta, TwoOptMove,
    IMPROVEMENT_EPSILON,
};
