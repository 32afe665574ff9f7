//! Domain model types for TSP instances and tours.
//!
//! - [`City`] — an indexed 2D point
//! - [`Edge`] — an undirected city pair, as used in edge-set tours
//! - [`order_to_edges`] / [`edges_to_order`] — conversions between the two tour forms

mod city;
mod tour;

pub use city::City;
pub use tour::{edges_to_order, order_to_edges, Edge};
