//! Random instance generation.
//!
//! Draws uniformly distributed cities on a square map from a caller-supplied
//! RNG, so instances are reproducible from a seed.

use rand::Rng;

use crate::error::{Result, TspError};
use crate::models::City;

/// Draws `n` coordinates uniformly from `[0, map_size)²`.
///
/// # Examples
///
/// ```
/// use rand::SeedableRng;
/// use u_tsp::instance::random_coordinates;
///
/// let mut rng = rand::rngs::StdRng::seed_from_u64(10);
/// let coords = random_coordinates(20, 100.0, &mut rng).unwrap();
/// assert_eq!(coords.len(), 20);
/// assert!(coords.iter().all(|&(x, y)| (0.0..100.0).contains(&x) && (0.0..100.0).contains(&y)));
/// ```
pub fn random_coordinates<R: Rng>(
    n: usize,
    map_size: f64,
    rng: &mut R,
) -> Result<Vec<(f64, f64)>> {
    if !map_size.is_finite() || map_size <= 0.0 {
        return Err(TspError::invalid_input(
            "instance generator",
            format!("map size must be positive and finite, got {map_size}"),
        ));
    }
    Ok((0..n)
        .map(|_| {
            (
                rng.random::<f64>() * map_size,
                rng.random::<f64>() * map_size,
            )
        })
        .collect())
}

/// Draws `n` cities uniformly from `[0, map_size)²`, numbered 0..n-1.
pub fn random_cities<R: Rng>(n: usize, map_size: f64, rng: &mut R) -> Result<Vec<City>> {
    Ok(City::from_coordinates(&random_coordinates(n, map_size, rng)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_seeded_instances_are_reproducible() {
        let a = random_coordinates(15, 100.0, &mut StdRng::seed_from_u64(1)).expect("valid");
        let b = random_coordinates(15, 100.0, &mut StdRng::seed_from_u64(1)).expect("valid");
        assert_eq!(a, b);
    }

    #[test]
    fn test_random_cities_ids() {
        let cities = random_cities(5, 1.0, &mut StdRng::seed_from_u64(2)).expect("valid");
        for (k, c) in cities.iter().enumerate() {
            assert_eq!(c.id(), k);
            assert!(c.x() >= 0.0 && c.x() < 1.0);
            assert!(c.y() >= 0.0 && c.y() < 1.0);
        }
    }

    #[test]
    fn test_bad_map_size() {
        let mut rng = StdRng::seed_from_u64(3);
        assert!(random_coordinates(3, 0.0, &mut rng).is_err());
        assert!(random_coordinates(3, -1.0, &mut rng).is_err());
        assert!(random_coordinates(3, f64::NAN, &mut rng).is_err());
    }
}
