//! Tour representations: visit orders and edge sets.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TspError};

/// An undirected edge between two cities, stored with `a < b`.
///
/// # Examples
///
/// ```
/// use u_tsp::models::Edge;
///
/// assert_eq!(Edge::new(3, 1), Edge::new(1, 3));
/// assert_eq!(Edge::new(3, 1).a(), 1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Edge {
    a: usize,
    b: usize,
}

impl Edge {
    /// Creates a normalized edge.
    pub fn new(i: usize, j: usize) -> Self {
        if i <= j {
            Self { a: i, b: j }
        } else {
            Self { a: j, b: i }
        }
    }

    /// Smaller endpoint.
    pub fn a(&self) -> usize {
        self.a
    }

    /// Larger endpoint.
    pub fn b(&self) -> usize {
        self.b
    }
}

/// Converts a visit order into the edges of its closed cycle.
///
/// The wrap-around edge `(last, first)` is included. Orders with fewer
/// than two cities have no edges.
pub fn order_to_edges(order: &[usize]) -> Vec<Edge> {
    let n = order.len();
    if n < 2 {
        return Vec::new();
    }
    if n == 2 {
        return vec![Edge::new(order[0], order[1])];
    }
    (0..n)
        .map(|k| Edge::new(order[k], order[(k + 1) % n]))
        .collect()
}

/// Walks a single-cycle edge set into a visit order.
///
/// The walk starts at the smallest city id and proceeds to its smaller
/// neighbor first, so the result is deterministic for a given edge set.
///
/// Fails if an edge touches a city outside `cities`, if any city does not
/// have degree exactly 2, or if the edges form more than one cycle.
///
/// # Examples
///
/// ```
/// use u_tsp::models::{edges_to_order, Edge};
///
/// let edges = vec![Edge::new(0, 2), Edge::new(2, 1), Edge::new(1, 3), Edge::new(3, 0)];
/// let order = edges_to_order(&[0, 1, 2, 3], &edges).unwrap();
/// assert_eq!(order, vec![0, 2, 1, 3]);
/// ```
pub fn edges_to_order(cities: &[usize], edges: &[Edge]) -> Result<Vec<usize>> {
    const COMPONENT: &str = "edge set";

    let mut adjacency: HashMap<usize, Vec<usize>> =
        cities.iter().map(|&c| (c, Vec::with_capacity(2))).collect();
    if adjacency.len() != cities.len() {
        return Err(TspError::invalid_input(COMPONENT, "duplicate city ids"));
    }

    for edge in edges {
        for (from, to) in [(edge.a, edge.b), (edge.b, edge.a)] {
            adjacency
                .get_mut(&from)
                .ok_or_else(|| {
                    TspError::invalid_input(COMPONENT, format!("edge touches unknown city {from}"))
                })?
                .push(to);
        }
    }

    if let Some((city, nbrs)) = adjacency.iter().find(|(_, nbrs)| nbrs.len() != 2) {
        return Err(TspError::invalid_input(
            COMPONENT,
            format!("city {city} has degree {}, expected 2", nbrs.len()),
        ));
    }

    let Some(&start) = cities.iter().min() else {
        return Ok(Vec::new());
    };

    let mut order = Vec::with_capacity(cities.len());
    let mut prev = start;
    let mut current = adjacency[&start].iter().copied().min().unwrap_or(start);
    order.push(start);
    while current != start {
        if order.len() >= cities.len() {
            break;
        }
        order.push(current);
        let nbrs = &adjacency[&current];
        let next = if nbrs[0] == prev { nbrs[1] } else { nbrs[0] };
        prev = current;
        current = next;
    }

    if order.len() != cities.len() {
        return Err(TspError::invalid_input(
            COMPONENT,
            format!(
                "edges form more than one cycle: walk from city {start} covers {} of {} cities",
                order.len(),
                cities.len()
            ),
        ));
    }
    Ok(order)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edge_normalized() {
        let e = Edge::new(5, 2);
        assert_eq!((e.a(), e.b()), (2, 5));
        assert_eq!(e, Edge::new(2, 5));
    }

    #[test]
    fn test_order_to_edges_closes_cycle() {
        let edges = order_to_edges(&[0, 2, 1, 3]);
        assert_eq!(
            edges,
            vec![Edge::new(0, 2), Edge::new(2, 1), Edge::new(1, 3), Edge::new(3, 0)]
        );
    }

    #[test]
    fn test_order_to_edges_small() {
        assert!(order_to_edges(&[]).is_empty());
        assert!(order_to_edges(&[4]).is_empty());
        assert_eq!(order_to_edges(&[4, 1]), vec![Edge::new(1, 4)]);
    }

    #[test]
    fn test_edges_to_order_roundtrip() {
        let order = vec![0, 4, 2, 1, 3];
        let edges = order_to_edges(&order);
        let walked = edges_to_order(&[0, 1, 2, 3, 4], &edges).expect("single cycle");
        // Starts at 0 and follows the smaller neighbor (3 < 4), i.e. the reverse direction.
        assert_eq!(walked, vec![0, 3, 1, 2, 4]);
    }

    #[test]
    fn test_edges_to_order_rejects_two_cycles() {
        let edges = vec![
            Edge::new(0, 1),
            Edge::new(1, 2),
            Edge::new(2, 0),
            Edge::new(3, 4),
            Edge::new(4, 5),
            Edge::new(5, 3),
        ];
        let err = edges_to_order(&[0, 1, 2, 3, 4, 5], &edges).unwrap_err();
        assert!(err.to_string().contains("more than one cycle"));
    }

    #[test]
    fn test_edges_to_order_rejects_bad_degree() {
        let edges = vec![Edge::new(0, 1), Edge::new(1, 2)];
        let err = edges_to_order(&[0, 1, 2], &edges).unwrap_err();
        assert!(err.to_string().contains("degree"));
    }

    #[test]
    fn test_edges_to_order_rejects_unknown_city() {
        let edges = vec![Edge::new(0, 1), Edge::new(1, 9), Edge::new(9, 0)];
        assert!(edges_to_order(&[0, 1, 2], &edges).is_err());
    }
}
