//! City type.

use serde::{Deserialize, Serialize};

/// A city in a TSP instance.
///
/// Cities are identified by their index in the instance (0..N-1) and carry
/// a 2D coordinate. Immutable once the instance is fixed.
///
/// # Examples
///
/// ```
/// use u_tsp::models::City;
///
/// let a = City::new(0, 0.0, 0.0);
/// let b = City::new(1, 3.0, 4.0);
/// assert_eq!(b.id(), 1);
/// assert!((a.distance_to(&b) - 5.0).abs() < 1e-10);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct City {
    id: usize,
    x: f64,
    y: f64,
}

impl City {
    /// Creates a new city.
    pub fn new(id: usize, x: f64, y: f64) -> Self {
        Self { id, x, y }
    }

    /// Builds cities from raw coordinates, numbering them in input order.
    pub fn from_coordinates(coords: &[(f64, f64)]) -> Vec<City> {
        coords
            .iter()
            .enumerate()
            .map(|(id, &(x, y))| City::new(id, x, y))
            .collect()
    }

    /// City index.
    pub fn id(&self) -> usize {
        self.id
    }

    /// X-coordinate.
    pub fn x(&self) -> f64 {
        self.x
    }

    /// Y-coordinate.
    pub fn y(&self) -> f64 {
        self.y
    }

    /// Returns `true` if both coordinates are finite.
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Euclidean distance to another city.
    pub fn distance_to(&self, other: &City) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_city_new() {
        let c = City::new(2, 10.0, 20.0);
        assert_eq!(c.id(), 2);
        assert_eq!(c.x(), 10.0);
        assert_eq!(c.y(), 20.0);
    }

    #[test]
    fn test_from_coordinates_numbers_in_order() {
        let cities = City::from_coordinates(&[(1.0, 1.0), (2.0, 2.0), (3.0, 3.0)]);
        let ids: Vec<usize> = cities.iter().map(|c| c.id()).collect();
        assert_eq!(ids, vec![0, 1, 2]);
        assert_eq!((cities[2].x(), cities[2].y()), (3.0, 3.0));
    }

    #[test]
    fn test_city_is_finite() {
        assert!(City::new(0, 1.0, 2.0).is_finite());
        assert!(!City::new(0, f64::NAN, 2.0).is_finite());
        assert!(!City::new(0, 1.0, f64::INFINITY).is_finite());
    }

    #[test]
    fn test_city_distance_symmetric() {
        let a = City::new(0, 1.0, 2.0);
        let b = City::new(1, 4.0, 6.0);
        assert!((a.distance_to(&b) - 5.0).abs() < 1e-10);
        assert!((a.distance_to(&b) - b.distance_to(&a)).abs() < 1e-10);
    }
}
