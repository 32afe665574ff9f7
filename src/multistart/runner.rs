//! Multi-start execution loop.

use log::{debug, info};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::distance::DistanceMatrix;
use crate::error::Result;
use crate::evaluation::{cyclic_cost, validate_order};
use crate::local_search::local_search;

use super::config::MultiStartConfig;

/// Result of a multi-start run.
#[derive(Debug, Clone)]
pub struct MultiStartResult {
    /// Best locally optimal order found.
    pub best_order: Vec<usize>,

    /// Cost of `best_order`.
    pub best_cost: f64,

    /// Index of the restart that produced `best_order`.
    pub best_restart: usize,

    /// Cost of every restart's local optimum, in restart order.
    pub restart_costs: Vec<f64>,
}

/// Draws a uniformly random visit order over `n` cities.
///
/// # Examples
///
/// ```
/// use rand::SeedableRng;
/// use u_tsp::multistart::random_order;
///
/// let mut rng = rand::rngs::StdRng::seed_from_u64(1);
/// let mut order = random_order(5, &mut rng);
/// order.sort_unstable();
/// assert_eq!(order, vec![0, 1, 2, 3, 4]);
/// ```
pub fn random_order<R: Rng>(n: usize, rng: &mut R) -> Vec<usize> {
    let mut order: Vec<usize> = (0..n).collect();
    order.shuffle(rng);
    order
}

/// Executes random-restart 2-opt local search.
pub struct MultiStartRunner;

impl MultiStartRunner {
    /// Runs multi-start with random orders drawn from a seeded RNG.
    ///
    /// # Examples
    ///
    /// ```
    /// use u_tsp::distance::DistanceMatrix;
    /// use u_tsp::multistart::{MultiStartConfig, MultiStartRunner};
    ///
    /// let dm = DistanceMatrix::build(&[(0.0, 0.0), (0.0, 1.0), (1.0, 1.0), (1.0, 0.0), (0.5, 2.0)]).unwrap();
    /// let config = MultiStartConfig::default().with_restarts(10).with_seed(42);
    /// let result = MultiStartRunner::run_random(&dm, &config).unwrap();
    /// assert_eq!(result.restart_costs.len(), 10);
    /// assert!(result.restart_costs.iter().all(|&c| result.best_cost <= c));
    /// ```
    pub fn run_random(distances: &DistanceMatrix, config: &MultiStartConfig) -> Result<MultiStartResult> {
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::seed_from_u64(rand::random()),
        };
        let n = distances.size();
        Self::run(distances, config, || random_order(n, &mut rng))
    }

    /// Runs multi-start with orders supplied by `generator`.
    ///
    /// Each restart takes a fresh order from the generator, runs 2-opt
    /// local search to convergence and keeps the cheapest result. Ties keep
    /// the earliest restart.
    ///
    /// # Errors
    ///
    /// - [`TspError::InvalidInput`](crate::TspError::InvalidInput) if `config.restarts < 1`
    /// - [`TspError::InvalidOrder`](crate::TspError::InvalidOrder) if the generator yields a
    ///   non-permutation; the run is aborted, not retried
    pub fn run<G>(
        distances: &DistanceMatrix,
        config: &MultiStartConfig,
        mut generator: G,
    ) -> Result<MultiStartResult>
    where
        G: FnMut() -> Vec<usize>,
    {
        config.validate()?;
        let n = distances.size();

        #[cfg(feature = "parallel")]
        {
            if config.parallel {
                let mut starts = Vec::with_capacity(config.restarts);
                for _ in 0..config.restarts {
                    let order = generator();
                    validate_order(&order, n)?;
                    starts.push(order);
                }
                return Ok(run_parallel(distances, starts));
            }
        }

        #[cfg(not(feature = "parallel"))]
        {
            if config.parallel {
                debug!("parallel restarts requested but the `parallel` feature is disabled; running sequentially");
            }
        }

        let mut best: Option<(Vec<usize>, f64, usize)> = None;
        let mut restart_costs = Vec::with_capacity(config.restarts);

        for restart in 0..config.restarts {
            let order = generator();
            validate_order(&order, n)?;
            let improved = local_search(order, distances);
            let cost = cyclic_cost(&improved, distances);
            debug!("restart {restart}: local optimum cost {cost:.6}");
            restart_costs.push(cost);

            if best.as_ref().is_none_or(|(_, best_cost, _)| cost < *best_cost) {
                if best.is_some() {
                    debug!("restart {restart}: new best {cost:.6}");
                }
                best = Some((improved, cost, restart));
            }
        }

        Ok(finish(best, restart_costs))
    }
}

#[cfg(feature = "parallel")]
fn run_parallel(distances: &DistanceMatrix, starts: Vec<Vec<usize>>) -> MultiStartResult {
    use rayon::prelude::*;

    let optima: Vec<(Vec<usize>, f64)> = starts
        .into_par_iter()
        .map(|order| {
            let improved = local_search(order, distances);
            let cost = cyclic_cost(&improved, distances);
            (improved, cost)
        })
        .collect();

    let mut best: Option<(Vec<usize>, f64, usize)> = None;
    let mut restart_costs = Vec::with_capacity(optima.len());
    for (restart, (order, cost)) in optima.into_iter().enumerate() {
        debug!("restart {restart}: local optimum cost {cost:.6}");
        restart_costs.push(cost);
        if best.as_ref().is_none_or(|(_, best_cost, _)| cost < *best_cost) {
            best = Some((order, cost, restart));
        }
    }
    finish(best, restart_costs)
}

fn finish(best: Option<(Vec<usize>, f64, usize)>, restart_costs: Vec<f64>) -> MultiStartResult {
    // `restarts >= 1` is validated up front, so at least one restart ran.
    let (best_order, best_cost, best_restart) = best.unwrap_or_default();
    info!(
        "multi-start finished: {} restarts, best cost {best_cost:.6} (restart {best_restart})",
        restart_costs.len()
    );
    MultiStartResult {
        best_order,
        best_cost,
        best_restart,
        restart_costs,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TspError;
    use crate::evaluation::tour_cost;
    use crate::local_search::best_two_opt_move;

    fn ring(n: usize) -> DistanceMatrix {
        let coords: Vec<(f64, f64)> = (0..n)
            .map(|k| {
                let a = 2.0 * std::f64::consts::PI * k as f64 / n as f64;
                (10.0 * a.cos(), 10.0 * a.sin())
            })
            .collect();
        DistanceMatrix::build(&coords).expect("valid")
    }

    #[test]
    fn test_single_restart_matches_local_search() {
        let dm = ring(8);
        let identity: Vec<usize> = (0..8).collect();
        let config = MultiStartConfig::default().with_restarts(1);
        let result = MultiStartRunner::run(&dm, &config, || identity.clone()).expect("valid");

        let direct = local_search(identity.clone(), &dm);
        assert_eq!(result.best_order, direct);
        assert_eq!(result.best_cost, cyclic_cost(&direct, &dm));
        assert_eq!(result.best_restart, 0);
    }

    #[test]
    fn test_best_is_minimum_of_restarts() {
        let dm = ring(12);
        let config = MultiStartConfig::default().with_restarts(20).with_seed(10);
        let result = MultiStartRunner::run_random(&dm, &config).expect("valid");
        assert_eq!(result.restart_costs.len(), 20);
        for &c in &result.restart_costs {
            assert!(result.best_cost <= c);
        }
        assert_eq!(result.restart_costs[result.best_restart], result.best_cost);
        assert!(best_two_opt_move(&result.best_order, &dm).is_none());
        let cost = tour_cost(&result.best_order, &dm).expect("valid");
        assert!((cost - result.best_cost).abs() < 1e-10);
    }

    #[test]
    fn test_ties_keep_first_restart() {
        // 2x3 unit grid; its perimeter is the only tour made of unit edges.
        let dm = DistanceMatrix::build(&[
            (0.0, 0.0),
            (1.0, 0.0),
            (2.0, 0.0),
            (2.0, 1.0),
            (1.0, 1.0),
            (0.0, 1.0),
        ])
        .expect("valid");
        // Every restart starts from a rotation of the perimeter, so all costs tie exactly.
        let config = MultiStartConfig::default().with_restarts(4);
        let mut calls = 0;
        let result = MultiStartRunner::run(&dm, &config, || {
            calls += 1;
            let mut order: Vec<usize> = (0..6).collect();
            order.rotate_left(calls);
            order
        })
        .expect("valid");
        assert_eq!(result.best_restart, 0);
        assert_eq!(result.best_order, vec![1, 2, 3, 4, 5, 0]);
    }

    #[test]
    fn test_same_seed_is_reproducible() {
        let dm = ring(10);
        let config = MultiStartConfig::default().with_restarts(5).with_seed(3);
        let a = MultiStartRunner::run_random(&dm, &config).expect("valid");
        let b = MultiStartRunner::run_random(&dm, &config).expect("valid");
        assert_eq!(a.best_order, b.best_order);
        assert_eq!(a.restart_costs, b.restart_costs);
    }

    #[test]
    fn test_zero_restarts_rejected() {
        let dm = ring(5);
        let config = MultiStartConfig::default().with_restarts(0);
        let err = MultiStartRunner::run(&dm, &config, || (0..5).collect()).unwrap_err();
        assert!(matches!(err, TspError::InvalidInput { .. }));
    }

    #[test]
    fn test_bad_generator_aborts() {
        let dm = ring(5);
        let config = MultiStartConfig::default().with_restarts(3);
        let err = MultiStartRunner::run(&dm, &config, || vec![0, 1, 2]).unwrap_err();
        assert!(matches!(err, TspError::InvalidOrder { .. }));
    }

    #[test]
    fn test_random_order_is_permutation() {
        let mut rng = StdRng::seed_from_u64(99);
        for n in [0, 1, 2, 17] {
            let mut order = random_order(n, &mut rng);
            order.sort_unstable();
            assert_eq!(order, (0..n).collect::<Vec<_>>());
        }
    }

    #[test]
    fn test_parallel_flag_keeps_sequential_result() {
        // Holds with or without the `parallel` feature.
        let dm = ring(9);
        let config = MultiStartConfig::default().with_restarts(6).with_seed(21);
        let seq = MultiStartRunner::run_random(&dm, &config).expect("valid");
        let flagged = MultiStartRunner::run_random(&dm, &config.clone().with_parallel(true))
            .expect("valid");
        assert_eq!(seq.best_order, flagged.best_order);
        assert_eq!(seq.restart_costs, flagged.restart_costs);
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn test_parallel_matches_sequential() {
        let dm = ring(15);
        let config = MultiStartConfig::default().with_restarts(12).with_seed(5);
        let seq = MultiStartRunner::run_random(&dm, &config).expect("valid");
        let par = MultiStartRunner::run_random(&dm, &config.clone().with_parallel(true))
            .expect("valid");
        assert_eq!(seq.best_order, par.best_order);
        assert_eq!(seq.best_restart, par.best_restart);
        assert_eq!(seq.restart_costs, par.restart_costs);
    }
}
