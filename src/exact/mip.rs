//! Mixed-integer programming collaborator interface.

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Handle to a decision variable inside a [`MipSolver`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VarId(pub usize);

/// Domain of a decision variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VarKind {
    /// Any real value within the bounds.
    Continuous,
    /// 0 or 1.
    Binary,
}

/// Comparison of a linear constraint's left-hand side to its bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConstraintOp {
    /// `lhs == rhs`
    Eq,
    /// `lhs <= rhs`
    Le,
    /// `lhs >= rhs`
    Ge,
}

/// The minimal surface the cutting-plane solver needs from a MIP engine.
///
/// Implementations own the model state (variables, constraints, objective).
/// The objective is always minimized. Any engine exposing these operations
/// can back [`SubtourEliminationSolver`](super::SubtourEliminationSolver);
/// [`MinilpSolver`](super::MinilpSolver) is the bundled implementation.
pub trait MipSolver {
    /// Adds a variable with bounds `[lower, upper]`.
    fn add_var(&mut self, lower: f64, upper: f64, kind: VarKind) -> VarId;

    /// Adds the constraint `sum(coeff * var) op rhs`.
    fn add_constraint(&mut self, terms: &[(VarId, f64)], op: ConstraintOp, rhs: f64);

    /// Sets the linear objective `sum(coeff * var)` to minimize.
    fn set_objective(&mut self, terms: &[(VarId, f64)]);

    /// Solves the current model.
    ///
    /// Must return [`TspError::InfeasibleModel`](crate::TspError::InfeasibleModel)
    /// when the model has no feasible solution.
    fn optimize(&mut self) -> Result<()>;

    /// Value of `var` in the last solution.
    fn value(&self, var: VarId) -> f64;

    /// Whether the last solution has every variable at an integer value.
    fn is_integral(&self) -> bool;

    /// Restricts `var` to {0, 1} for subsequent solves.
    fn set_binary(&mut self, var: VarId);

    /// Objective value of the last solution.
    fn objective_value(&self) -> f64;
}
