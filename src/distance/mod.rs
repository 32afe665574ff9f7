//! Pairwise distances between cities.
//!
//! Provides a dense Euclidean distance matrix built once per instance.

mod matrix;

pub use matrix::DistanceMatrix;
