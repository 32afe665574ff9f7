//! [`MipSolver`] implementation on top of the `minilp` LP solver.
//!
//! Linear relaxations are solved by minilp's simplex. Binary variables are
//! handled by depth-first branch-and-bound: branch on the most fractional
//! binary, fix it to the nearer integer first, prune nodes whose relaxation
//! is no better than the incumbent.

use log::debug;
use minilp::{ComparisonOp, LinearExpr, OptimizationDirection, Problem, Variable};
use serde::{Deserialize, Serialize};

use crate::error::{Result, TspError};

use super::mip::{ConstraintOp, MipSolver, VarId, VarKind};

/// Configuration for [`MinilpSolver`].
///
/// # Examples
///
/// ```
/// use u_tsp::exact::MinilpConfig;
///
/// let config = MinilpConfig::default().with_max_nodes(50_000);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MinilpConfig {
    /// Branch-and-bound node budget per `optimize` call.
    pub max_nodes: usize,

    /// Distance from the nearest integer under which a value counts as integral.
    pub integrality_tolerance: f64,
}

impl Default for MinilpConfig {
    fn default() -> Self {
        Self {
            max_nodes: 100_000,
            integrality_tolerance: 1e-6,
        }
    }
}

impl MinilpConfig {
    pub fn with_max_nodes(mut self, n: usize) -> Self {
        self.max_nodes = n;
        self
    }

    pub fn with_integrality_tolerance(mut self, tol: f64) -> Self {
        self.integrality_tolerance = tol;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.max_nodes == 0 {
            return Err(TspError::invalid_input(
                "minilp solver",
                "max_nodes must be at least 1",
            ));
        }
        if !(self.integrality_tolerance > 0.0 && self.integrality_tolerance < 0.5) {
            return Err(TspError::invalid_input(
                "minilp solver",
                format!(
                    "integrality_tolerance must be in (0, 0.5), got {}",
                    self.integrality_tolerance
                ),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
struct VarDef {
    lower: f64,
    upper: f64,
    kind: VarKind,
    objective: f64,
}

#[derive(Debug, Clone)]
struct ConstraintDef {
    terms: Vec<(VarId, f64)>,
    op: ConstraintOp,
    rhs: f64,
}

/// MIP collaborator backed by minilp.
///
/// The model is kept as plain data and rebuilt into a `minilp::Problem` on
/// every [`optimize`](MipSolver::optimize) call.
///
/// # Examples
///
/// ```
/// use u_tsp::exact::{ConstraintOp, MinilpSolver, MipSolver, VarKind};
///
/// // min x + y  s.t.  x + y >= 1.5, x, y binary
/// let mut mip = MinilpSolver::new();
/// let x = mip.add_var(0.0, 1.0, VarKind::Binary);
/// let y = mip.add_var(0.0, 1.0, VarKind::Binary);
/// mip.add_constraint(&[(x, 1.0), (y, 1.0)], ConstraintOp::Ge, 1.5);
/// mip.set_objective(&[(x, 1.0), (y, 1.0)]);
/// mip.optimize().unwrap();
/// assert!((mip.objective_value() - 2.0).abs() < 1e-9);
/// assert!(mip.is_integral());
/// ```
#[derive(Debug, Clone)]
pub struct MinilpSolver {
    config: MinilpConfig,
    vars: Vec<VarDef>,
    constraints: Vec<ConstraintDef>,
    values: Vec<f64>,
    objective: f64,
    last_nodes: usize,
}

impl MinilpSolver {
    /// Creates an empty model with default configuration.
    pub fn new() -> Self {
        Self::with_config(MinilpConfig::default())
    }

    /// Creates an empty model with the given configuration.
    pub fn with_config(config: MinilpConfig) -> Self {
        Self {
            config,
            vars: Vec::new(),
            constraints: Vec::new(),
            values: Vec::new(),
            objective: 0.0,
            last_nodes: 0,
        }
    }

    /// Number of variables in the model.
    pub fn num_vars(&self) -> usize {
        self.vars.len()
    }

    /// Number of constraints in the model.
    pub fn num_constraints(&self) -> usize {
        self.constraints.len()
    }

    /// Branch-and-bound nodes explored by the last `optimize` call
    /// (1 when the model has no binary variables).
    pub fn last_node_count(&self) -> usize {
        self.last_nodes
    }

    fn build_problem(&self) -> (Problem, Vec<Variable>) {
        let mut problem = Problem::new(OptimizationDirection::Minimize);
        let lp_vars: Vec<Variable> = self
            .vars
            .iter()
            .map(|v| problem.add_var(v.objective, (v.lower, v.upper)))
            .collect();

        for c in &self.constraints {
            let mut expr = LinearExpr::empty();
            for &(var, coeff) in &c.terms {
                expr.add(lp_vars[var.0], coeff);
            }
            let op = match c.op {
                ConstraintOp::Eq => ComparisonOp::Eq,
                ConstraintOp::Le => ComparisonOp::Le,
                ConstraintOp::Ge => ComparisonOp::Ge,
            };
            problem.add_constraint(expr, op, c.rhs);
        }
        (problem, lp_vars)
    }

    fn fractionality(&self, value: f64) -> f64 {
        (value - value.round()).abs()
    }

    /// Depth-first branch-and-bound over the binary variables.
    fn branch_and_bound(
        &self,
        root: minilp::Solution,
        lp_vars: &[Variable],
    ) -> Result<(minilp::Solution, usize)> {
        let tol = self.config.integrality_tolerance;
        let binaries: Vec<usize> = self
            .vars
            .iter()
            .enumerate()
            .filter(|(_, v)| v.kind == VarKind::Binary)
            .map(|(k, _)| k)
            .collect();

        let mut incumbent: Option<minilp::Solution> = None;
        let mut stack = vec![root];
        let mut nodes = 0usize;

        while let Some(node) = stack.pop() {
            nodes += 1;
            if nodes > self.config.max_nodes {
                return Err(TspError::solver(format!(
                    "branch-and-bound exceeded {} nodes",
                    self.config.max_nodes
                )));
            }

            if let Some(best) = &incumbent {
                if node.objective() >= best.objective() - 1e-9 {
                    continue;
                }
            }

            let branch = binaries
                .iter()
                .map(|&k| (k, node[lp_vars[k]]))
                .filter(|&(_, v)| self.fractionality(v) > tol)
                .max_by(|a, b| self.fractionality(a.1).total_cmp(&self.fractionality(b.1)));

            let Some((k, value)) = branch else {
                incumbent = Some(node);
                continue;
            };

            let nearer = if value >= 0.5 { 1.0 } else { 0.0 };
            // Pushed last so it is explored first.
            for fixed in [1.0 - nearer, nearer] {
                match node.clone().fix_var(lp_vars[k], fixed) {
                    Ok(child) => stack.push(child),
                    Err(minilp::Error::Infeasible) => {}
                    Err(other) => return Err(TspError::solver(format!("{other:?}"))),
                }
            }
        }

        incumbent
            .map(|best| (best, nodes))
            .ok_or(TspError::InfeasibleModel)
    }
}

impl Default for MinilpSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl MipSolver for MinilpSolver {
    fn add_var(&mut self, lower: f64, upper: f64, kind: VarKind) -> VarId {
        let (lower, upper) = match kind {
            VarKind::Binary => (lower.max(0.0), upper.min(1.0)),
            VarKind::Continuous => (lower, upper),
        };
        self.vars.push(VarDef {
            lower,
            upper,
            kind,
            objective: 0.0,
        });
        VarId(self.vars.len() - 1)
    }

    fn add_constraint(&mut self, terms: &[(VarId, f64)], op: ConstraintOp, rhs: f64) {
        self.constraints.push(ConstraintDef {
            terms: terms.to_vec(),
            op,
            rhs,
        });
    }

    fn set_objective(&mut self, terms: &[(VarId, f64)]) {
        for v in &mut self.vars {
            v.objective = 0.0;
        }
        for &(var, coeff) in terms {
            self.vars[var.0].objective += coeff;
        }
    }

    fn optimize(&mut self) -> Result<()> {
        self.config.validate()?;
        let (problem, lp_vars) = self.build_problem();
        let relaxed = problem.solve().map_err(|e| match e {
            minilp::Error::Infeasible => TspError::InfeasibleModel,
            other => TspError::solver(format!("{other:?}")),
        })?;

        let has_binaries = self.vars.iter().any(|v| v.kind == VarKind::Binary);
        let (solution, nodes) = if has_binaries {
            self.branch_and_bound(relaxed, &lp_vars)?
        } else {
            (relaxed, 1)
        };

        debug!(
            "minilp: {} vars, {} constraints, objective {:.6}, {nodes} nodes",
            self.vars.len(),
            self.constraints.len(),
            solution.objective()
        );
        self.values = lp_vars.iter().map(|&v| solution[v]).collect();
        self.objective = solution.objective();
        self.last_nodes = nodes;
        Ok(())
    }

    fn value(&self, var: VarId) -> f64 {
        self.values.get(var.0).copied().unwrap_or(0.0)
    }

    fn is_integral(&self) -> bool {
        let tol = self.config.integrality_tolerance;
        self.values.iter().all(|&v| self.fractionality(v) <= tol)
    }

    fn set_binary(&mut self, var: VarId) {
        let def = &mut self.vars[var.0];
        def.kind = VarKind::Binary;
        def.lower = def.lower.max(0.0);
        def.upper = def.upper.min(1.0);
    }

    fn objective_value(&self) -> f64 {
        self.objective
    }
}
