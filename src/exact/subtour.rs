//! Exact TSP by iterative subtour elimination.
//!
//! # Algorithm
//!
//! Start from the degree-constrained relaxation over one variable per
//! unordered city pair:
//!
//! ```text
//! minimize    sum c(i,j) x(i,j)
//! subject to  sum_j x(i,j) = 2        for every city i
//!             0 <= x(i,j) <= 1
//! ```
//!
//! Then repeat: solve, collect the edges with `x > tolerance`, split the
//! cities into connected components over those edges. Each component `S` of
//! a disconnected solution gets the cut `sum_{i<j in S} x(i,j) <= |S| - 1`.
//! Once the support is connected, a fractional solution switches every edge
//! variable to binary and is re-solved by the collaborator's
//! branch-and-bound. The loop ends at the first integral, connected
//! solution.
//!
//! Binary variables are introduced only after the relaxation is free of
//! disconnected subtours, so most cuts are found by cheap LP solves.
//!
//! # Reference
//!
//! Dantzig, G., Fulkerson, R., Johnson, S. (1954). "Solution of a
//! large-scale traveling-salesman problem", *Operations Research* 2(4),
//! 393-410.

use std::collections::HashSet;

use log::{debug, info};
use petgraph::graph::{NodeIndex, UnGraph};
use serde::{Deserialize, Serialize};

use crate::distance::DistanceMatrix;
use crate::error::{Result, TspError};
use crate::models::{edges_to_order, Edge};

use super::mip::{ConstraintOp, MipSolver, VarId, VarKind};

const COMPONENT: &str = "subtour elimination";

/// Configuration for [`SubtourEliminationSolver`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExactConfig {
    /// Edge variables above this value count as selected.
    pub tolerance: f64,

    /// Maximum number of solve rounds. `None` = no limit.
    pub max_rounds: Option<usize>,
}

impl Default for ExactConfig {
    fn default() -> Self {
        Self {
            tolerance: 1e-6,
            max_rounds: None,
        }
    }
}

impl ExactConfig {
    pub fn with_tolerance(mut self, tol: f64) -> Self {
        self.tolerance = tol;
        self
    }

    pub fn with_max_rounds(mut self, rounds: usize) -> Self {
        self.max_rounds = Some(rounds);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if !(self.tolerance > 0.0 && self.tolerance < 0.5) {
            return Err(TspError::invalid_input(
                COMPONENT,
                format!("tolerance must be in (0, 0.5), got {}", self.tolerance),
            ));
        }
        if self.max_rounds == Some(0) {
            return Err(TspError::invalid_input(
                COMPONENT,
                "max_rounds must be at least 1",
            ));
        }
        Ok(())
    }
}

/// An optimal tour found by the exact solver.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExactTour {
    /// Objective value of the final solve (tour length).
    pub cost: f64,

    /// Selected edges, sorted.
    pub edges: Vec<Edge>,

    /// Cities the tour spans, as passed in.
    pub cities: Vec<usize>,

    /// Number of solve rounds.
    pub rounds: usize,

    /// Number of subtour cuts added.
    pub cuts_added: usize,

    /// Whether edge variables were switched to binary.
    pub used_branch_and_bound: bool,
}

impl ExactTour {
    /// The tour as a visit order, starting from the smallest city id.
    pub fn order(&self) -> Result<Vec<usize>> {
        edges_to_order(&self.cities, &self.edges)
    }
}

/// Cutting-plane TSP solver driving an external [`MipSolver`].
///
/// # Examples
///
/// ```
/// use u_tsp::distance::DistanceMatrix;
/// use u_tsp::exact::{MinilpSolver, SubtourEliminationSolver};
/// use u_tsp::models::Edge;
///
/// let dm = DistanceMatrix::build(&[(0.0, 0.0), (0.0, 1.0), (1.0, 1.0), (1.0, 0.0)]).unwrap();
/// let tour = SubtourEliminationSolver::default()
///     .solve_matrix(&dm, &mut MinilpSolver::new())
///     .unwrap();
/// assert!((tour.cost - 4.0).abs() < 1e-6);
/// assert_eq!(
///     tour.edges,
///     vec![Edge::new(0, 1), Edge::new(0, 3), Edge::new(1, 2), Edge::new(2, 3)]
/// );
/// ```
#[derive(Debug, Clone, Default)]
pub struct SubtourEliminationSolver {
    config: ExactConfig,
}

impl SubtourEliminationSolver {
    /// Creates a solver with the given configuration.
    pub fn new(config: ExactConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration.
    pub fn config(&self) -> &ExactConfig {
        &self.config
    }

    /// Solves the instance described by a distance matrix (cities `0..n`).
    pub fn solve_matrix<M>(&self, distances: &DistanceMatrix, mip: &mut M) -> Result<ExactTour>
    where
        M: MipSolver + ?Sized,
    {
        let cities: Vec<usize> = (0..distances.size()).collect();
        self.solve(&cities, |i, j| distances.get(i, j), mip)
    }

    /// Finds an optimal tour over `cities` with symmetric costs `edge_cost`.
    ///
    /// `mip` must be an empty model; the solver adds all variables and
    /// constraints itself.
    ///
    /// # Errors
    ///
    /// - [`TspError::InvalidInput`] for fewer than 3 cities, duplicate ids,
    ///   or a negative/non-finite edge cost
    /// - [`TspError::InfeasibleModel`] when the collaborator reports infeasibility
    /// - [`TspError::RoundLimit`] when `max_rounds` is exceeded
    pub fn solve<F, M>(&self, cities: &[usize], edge_cost: F, mip: &mut M) -> Result<ExactTour>
    where
        F: Fn(usize, usize) -> f64,
        M: MipSolver + ?Sized,
    {
        self.config.validate()?;
        let n = cities.len();
        if n < 3 {
            return Err(TspError::invalid_input(
                COMPONENT,
                format!("need at least 3 cities for a cycle, got {n}"),
            ));
        }
        if cities.iter().collect::<HashSet<_>>().len() != n {
            return Err(TspError::invalid_input(COMPONENT, "duplicate city ids"));
        }

        // Edge variables over positions p < q in `cities`.
        let mut pairs: Vec<(usize, usize)> = Vec::with_capacity(n * (n - 1) / 2);
        let mut costs: Vec<f64> = Vec::with_capacity(n * (n - 1) / 2);
        for p in 0..n {
            for q in (p + 1)..n {
                let cost = edge_cost(cities[p], cities[q]);
                if !cost.is_finite() || cost < 0.0 {
                    return Err(TspError::invalid_input(
                        COMPONENT,
                        format!(
                            "edge ({}, {}) has cost {cost}, expected finite and non-negative",
                            cities[p], cities[q]
                        ),
                    ));
                }
                pairs.push((p, q));
                costs.push(cost);
            }
        }

        let vars: Vec<VarId> = pairs
            .iter()
            .map(|_| mip.add_var(0.0, 1.0, VarKind::Continuous))
            .collect();
        let objective: Vec<(VarId, f64)> = vars.iter().copied().zip(costs).collect();
        mip.set_objective(&objective);

        for p in 0..n {
            let incident: Vec<(VarId, f64)> = pairs
                .iter()
                .zip(&vars)
                .filter(|((a, b), _)| *a == p || *b == p)
                .map(|(_, &var)| (var, 1.0))
                .collect();
            mip.add_constraint(&incident, ConstraintOp::Eq, 2.0);
        }

        let mut rounds = 0;
        let mut cuts_added = 0;
        let mut binary = false;

        let selected = loop {
            if self.config.max_rounds.is_some_and(|max| rounds >= max) {
                return Err(TspError::RoundLimit { rounds });
            }
            mip.optimize()?;
            rounds += 1;

            let selected: Vec<(usize, usize)> = pairs
                .iter()
                .zip(&vars)
                .filter(|(_, &var)| mip.value(var) > self.config.tolerance)
                .map(|(&pair, _)| pair)
                .collect();

            let components = connected_components(n, &selected);
            if components.len() > 1 {
                let mut membership = vec![usize::MAX; n];
                for (label, comp) in components.iter().enumerate() {
                    for &p in comp {
                        membership[p] = label;
                    }
                }
                for (label, comp) in components.iter().enumerate() {
                    if comp.len() < 2 {
                        continue;
                    }
                    let inside: Vec<(VarId, f64)> = pairs
                        .iter()
                        .zip(&vars)
                        .filter(|((a, b), _)| membership[*a] == label && membership[*b] == label)
                        .map(|(_, &var)| (var, 1.0))
                        .collect();
                    mip.add_constraint(&inside, ConstraintOp::Le, (comp.len() - 1) as f64);
                    cuts_added += 1;
                }
                debug!(
                    "round {rounds}: objective {:.6}, {} components, {cuts_added} cuts so far",
                    mip.objective_value(),
                    components.len()
                );
                continue;
            }

            if mip.is_integral() {
                break selected;
            }
            if binary {
                return Err(TspError::solver(
                    "binary model returned a fractional solution",
                ));
            }

            info!(
                "round {rounds}: connected fractional solution (objective {:.6}), switching {} edge variables to binary",
                mip.objective_value(),
                vars.len()
            );
            for &var in &vars {
                mip.set_binary(var);
            }
            binary = true;
        };

        let mut edges: Vec<Edge> = selected
            .iter()
            .map(|&(p, q)| Edge::new(cities[p], cities[q]))
            .collect();
        edges.sort_unstable();

        let cost = mip.objective_value();
        info!("optimal tour: cost {cost:.6}, {rounds} rounds, {cuts_added} cuts");
        Ok(ExactTour {
            cost,
            edges,
            cities: cities.to_vec(),
            rounds,
            cuts_added,
            used_branch_and_bound: binary,
        })
    }
}

/// Splits positions `0..n` into connected components over `edges`.
///
/// Components are returned sorted, ordered by their smallest member.
fn connected_components(n: usize, edges: &[(usize, usize)]) -> Vec<Vec<usize>> {
    let mut graph: UnGraph<(), ()> = UnGraph::with_capacity(n, edges.len());
    let nodes: Vec<NodeIndex> = (0..n).map(|_| graph.add_node(())).collect();
    for &(a, b) in edges {
        graph.add_edge(nodes[a], nodes[b], ());
    }

    let mut visited = vec![false; n];
    let mut components = Vec::new();
    for start in graph.node_indices() {
        if visited[start.index()] {
            continue;
        }
        visited[start.index()] = true;
        let mut stack = vec![start];
        let mut component = Vec::new();
        while let Some(u) = stack.pop() {
            component.push(u.index());
            for v in graph.neighbors(u) {
                if !visited[v.index()] {
                    visited[v.index()] = true;
                    stack.push(v);
                }
            }
        }
        component.sort_unstable();
        components.push(component);
    }
    components
}
