//! Multi-start configuration.

use serde::{Deserialize, Serialize};

use crate::error::{Result, TspError};

/// Configuration for the multi-start 2-opt optimizer.
///
/// # Examples
///
/// ```
/// use u_tsp::multistart::MultiStartConfig;
///
/// let config = MultiStartConfig::default()
///     .with_restarts(50)
///     .with_seed(10);
/// assert!(config.validate().is_ok());
/// assert!(MultiStartConfig::default().with_restarts(0).validate().is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MultiStartConfig {
    /// Number of random restarts. Must be at least 1.
    pub restarts: usize,

    /// Random seed for the restart orders. `None` draws a fresh seed.
    pub seed: Option<u64>,

    /// Run restarts on the rayon thread pool.
    ///
    /// Only honored when the crate is built with the `parallel` feature;
    /// otherwise the run logs a debug message and stays sequential. The
    /// result is identical to a sequential run with the same seed.
    pub parallel: bool,
}

impl Default for MultiStartConfig {
    fn default() -> Self {
        Self {
            restarts: 100,
            seed: None,
            parallel: false,
        }
    }
}

impl MultiStartConfig {
    pub fn with_restarts(mut self, n: usize) -> Self {
        self.restarts = n;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.restarts < 1 {
            return Err(TspError::invalid_input(
                "multi-start optimizer",
                "restart count must be at least 1",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = MultiStartConfig::default();
        assert_eq!(config.restarts, 100);
        assert!(config.seed.is_none());
        assert!(!config.parallel);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let config = MultiStartConfig::default()
            .with_restarts(3)
            .with_seed(7)
            .with_parallel(true);
        assert_eq!(config.restarts, 3);
        assert_eq!(config.seed, Some(7));
        assert!(config.parallel);
    }

    #[test]
    fn test_zero_restarts_rejected() {
        let err = MultiStartConfig::default()
            .with_restarts(0)
            .validate()
            .unwrap_err();
        assert!(matches!(
            err,
            TspError::InvalidInput {
                component: "multi-start optimizer",
                ..
            }
        ));
    }
}
