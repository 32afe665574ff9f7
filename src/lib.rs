//! # u-tsp
//!
//! Euclidean traveling salesman optimization: a fast 2-opt multi-start
//! heuristic and an exact solver based on subtour-elimination cutting planes.
//!
//! ## Modules
//!
//! - [`models`] — City and tour types (visit orders, edge sets)
//! - [`distance`] — Dense Euclidean distance matrix
//! - [`evaluation`] — Tour cost and visit-order validation
//! - [`local_search`] — Best-improvement 2-opt and the local search driver
//! - [`multistart`] — Random-restart optimizer over local search
//! - [`exact`] — Cutting-plane exact solver over a pluggable MIP engine
//! - [`instance`] — Seeded random instance generation
//!
//! ## Example
//!
//! ```
//! use u_tsp::distance::DistanceMatrix;
//! use u_tsp::exact::{MinilpSolver, SubtourEliminationSolver};
//! use u_tsp::multistart::{MultiStartConfig, MultiStartRunner};
//!
//! let coords = [(0.0, 0.0), (4.0, 0.0), (4.0, 3.0), (0.0, 3.0), (2.0, 5.0)];
//! let dm = DistanceMatrix::build(&coords).unwrap();
//!
//! let heuristic = MultiStartRunner::run_random(&dm, &MultiStartConfig::default().with_seed(1)).unwrap();
//! let exact = SubtourEliminationSolver::default()
//!     .solve_matrix(&dm, &mut MinilpSolver::new())
//!     .unwrap();
//! assert!(exact.cost <= heuristic.best_cost + 1e-6);
//! ```

pub mod distance;
pub mod error;
pub mod evaluation;
pub mod exact;
pub mod instance;
pub mod local_search;
pub mod models;
pub mod multistart;

pub use error::{Result, TspError};
