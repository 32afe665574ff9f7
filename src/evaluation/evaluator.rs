//! Tour cost evaluation and visit-order validation.

use crate::distance::DistanceMatrix;
use crate::error::{Result, TspError};

/// Checks that `order` is a permutation of `0..n`.
///
/// Reports the first violated property: wrong length, an out-of-range
/// index, or a duplicate.
pub fn validate_order(order: &[usize], n: usize) -> Result<()> {
    if order.len() != n {
        return Err(TspError::invalid_order(format!(
            "expected {n} cities, got {}",
            order.len()
        )));
    }
    let mut seen = vec![false; n];
    for (pos, &city) in order.iter().enumerate() {
        if city >= n {
            return Err(TspError::invalid_order(format!(
                "city {city} at position {pos} is out of range 0..{n}"
            )));
        }
        if seen[city] {
            return Err(TspError::invalid_order(format!(
                "city {city} appears more than once (again at position {pos})"
            )));
        }
        seen[city] = true;
    }
    Ok(())
}

/// Computes the length of the closed tour described by `order`.
///
/// Sums `d(order[k], order[(k + 1) % n])` over all positions, so the last
/// city connects back to the first.
///
/// # Errors
///
/// Returns [`TspError::InvalidOrder`] if `order` is not a permutation of
/// the matrix's index range.
///
/// # Examples
///
/// ```
/// use u_tsp::distance::DistanceMatrix;
/// use u_tsp::evaluation::tour_cost;
///
/// let dm = DistanceMatrix::build(&[(0.0, 0.0), (0.0, 1.0), (1.0, 1.0), (1.0, 0.0)]).unwrap();
/// assert!((tour_cost(&[0, 1, 2, 3], &dm).unwrap() - 4.0).abs() < 1e-10);
/// assert!(tour_cost(&[0, 1, 1, 3], &dm).is_err());
/// ```
pub fn tour_cost(order: &[usize], distances: &DistanceMatrix) -> Result<f64> {
    validate_order(order, distances.size())?;
    Ok(cyclic_cost(order, distances))
}

/// Unchecked cyclic tour length, for orders already known to be valid.
pub(crate) fn cyclic_cost(order: &[usize], distances: &DistanceMatrix) -> f64 {
    let n = order.len();
    if n < 2 {
        return 0.0;
    }
    let mut total = 0.0;
    for k in 0..n - 1 {
        total += distances.get(order[k], order[k + 1]);
    }
    total + distances.get(order[n - 1], order[0])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> DistanceMatrix {
        DistanceMatrix::build(&[(0.0, 0.0), (0.0, 1.0), (1.0, 1.0), (1.0, 0.0)]).expect("valid")
    }

    #[test]
    fn test_perimeter() {
        let cost = tour_cost(&[0, 1, 2, 3], &square()).expect("valid order");
        assert!((cost - 4.0).abs() < 1e-10);
    }

    #[test]
    fn test_crossing_tour() {
        // 0→2 and 1→3 are the diagonals
        let cost = tour_cost(&[0, 2, 1, 3], &square()).expect("valid order");
        assert!((cost - (2.0 + 2.0 * 2f64.sqrt())).abs() < 1e-10);
    }

    #[test]
    fn test_rotation_and_reversal_invariant() {
        let dm = square();
        let base = tour_cost(&[0, 2, 3, 1], &dm).expect("valid");
        let rotated = tour_cost(&[3, 1, 0, 2], &dm).expect("valid");
        let reversed = tour_cost(&[1, 3, 2, 0], &dm).expect("valid");
        assert!((base - rotated).abs() < 1e-10);
        assert!((base - reversed).abs() < 1e-10);
    }

    #[test]
    fn test_two_cities() {
        let dm = DistanceMatrix::build(&[(0.0, 0.0), (3.0, 4.0)]).expect("valid");
        assert!((tour_cost(&[1, 0], &dm).expect("valid") - 10.0).abs() < 1e-10);
    }

    #[test]
    fn test_wrong_length() {
        let err = tour_cost(&[0, 1, 2], &square()).unwrap_err();
        assert_eq!(
            err,
            TspError::invalid_order("expected 4 cities, got 3")
        );
    }

    #[test]
    fn test_out_of_range() {
        let err = tour_cost(&[0, 1, 2, 4], &square()).unwrap_err();
        assert!(err.to_string().contains("out of range"));
    }

    #[test]
    fn test_duplicate() {
        let err = tour_cost(&[0, 1, 1, 3], &square()).unwrap_err();
        assert!(err.to_string().contains("more than once"));
    }
}
