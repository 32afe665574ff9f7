//! Exact TSP solving by subtour-elimination cutting planes.
//!
//! - [`SubtourEliminationSolver`] — the cutting-plane loop
//! - [`MipSolver`] — the MIP engine interface the loop drives
//! - [`MinilpSolver`] — bundled `MipSolver` on the `minilp` crate

mod minilp_backend;
mod mip;
mod subtour;

pub use minilp_backend::{MinilpConfig, MinilpSolver};
pub use mip::{ConstraintOp, MipSolver, VarId, VarKind};
pub use subtour::{ExactConfig, ExactTour, SubtourEliminationSolver};
