//! Error type shared by every solver component.

use thiserror::Error as ThisError;

/// Errors raised at component boundaries.
///
/// Each variant names the component and the invariant that was violated so
/// callers can report something more useful than a bad number.
#[derive(Debug, Clone, PartialEq, ThisError)]
pub enum TspError {
    /// Malformed input handed to a component (coordinates, config, city set).
    #[error("{component}: invalid input: {reason}")]
    InvalidInput {
        /// Component that rejected the input.
        component: &'static str,
        /// Violated invariant.
        reason: String,
    },

    /// A visit order that is not a permutation of the matrix's index range.
    #[error("tour evaluator: invalid visit order: {reason}")]
    InvalidOrder {
        /// Which permutation property failed.
        reason: String,
    },

    /// The MIP collaborator found no feasible solution.
    #[error("subtour elimination: model is infeasible")]
    InfeasibleModel,

    /// The cutting-plane loop hit its configured round limit.
    #[error("subtour elimination: no single tour after {rounds} rounds")]
    RoundLimit {
        /// Rounds completed before giving up.
        rounds: usize,
    },

    /// Any other failure reported by the MIP collaborator.
    #[error("mip solver: {0}")]
    Solver(String),
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, TspError>;

impl TspError {
    pub fn invalid_input(component: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            component,
            reason: reason.into(),
        }
    }

    pub fn invalid_order(reason: impl Into<String>) -> Self {
        Self::InvalidOrder {
            reason: reason.into(),
        }
    }

    pub fn solver(message: impl Into<String>) -> Self {
        Self::Solver(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_input_message_names_component() {
        let err = TspError::invalid_input("distance matrix", "need at least 2 coordinates, got 1");
        assert_eq!(
            err.to_string(),
            "distance matrix: invalid input: need at least 2 coordinates, got 1"
        );
    }

    #[test]
    fn test_invalid_order_message() {
        let err = TspError::invalid_order("city 3 appears twice");
        assert!(err.to_string().contains("city 3 appears twice"));
    }

    #[test]
    fn test_round_limit_message() {
        let err = TspError::RoundLimit { rounds: 7 };
        assert!(err.to_string().contains("7 rounds"));
    }
}
