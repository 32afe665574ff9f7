//! Multi-start 2-opt optimization.
//!
//! Runs local search from many random orders and keeps the best local
//! optimum. Restarts are independent; with the `parallel` feature they run
//! on rayon while keeping the sequential "first found wins" tie-break.

mod config;
mod runner;

pub use config::MultiStartConfig;
pub use runner::{random_order, MultiStartResult, MultiStartRunner};
