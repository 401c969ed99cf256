//! Error types for the Somersaulting Spider Optimizer.
//!
//! Library errors are a single `thiserror` enum with helper methods that
//! group the variants into bounds, configuration and evaluation failures.

use thiserror::Error;

use crate::objective::ObjectiveError;

/// Errors that can occur while setting up or running the optimizer.
#[derive(Debug, Error)]
pub enum SSOError {
    /// A per-dimension bound sequence does not have `dim` elements.
    #[error("{which} bounds have {got} elements, expected {expected}")]
    BoundsDimensionMismatch {
        /// Which side of the box is wrong ("lower" or "upper")
        which: &'static str,
        /// Problem dimension
        expected: usize,
        /// Length that was supplied
        got: usize,
    },

    /// A lower bound exceeds its upper bound, or a bound is not finite.
    #[error("invalid bounds at index {index}: lower ({lower}) > upper ({upper})")]
    InvalidBounds {
        /// Index of the invalid bound pair
        index: usize,
        /// The lower bound value
        lower: f64,
        /// The upper bound value
        upper: f64,
    },

    /// The problem has no dimensions.
    #[error("problem dimension must be greater than zero")]
    ZeroDimension,

    /// The population has no spiders.
    #[error("population size must be greater than zero")]
    EmptyPopulation,

    /// The iteration budget is zero.
    #[error("maxiter must be greater than zero")]
    NoIterations,

    /// Progress reporting interval is zero.
    #[error("progress interval must be greater than zero")]
    InvalidProgressInterval,

    /// The objective returned NaN or an infinity while strict checking is on.
    #[error("objective returned non-finite value {value} at iteration {iteration}, agent {agent}")]
    NonFiniteFitness {
        /// Iteration at which the value was produced
        iteration: usize,
        /// Index of the spider being evaluated
        agent: usize,
        /// The offending value
        value: f64,
    },

    /// The objective itself failed.
    #[error("objective failed at iteration {iteration}, agent {agent}: {source}")]
    Objective {
        /// Iteration at which the objective failed
        iteration: usize,
        /// Index of the spider being evaluated
        agent: usize,
        /// Failure reported by the objective
        #[source]
        source: ObjectiveError,
    },
}

/// A specialized `Result` type for SSO operations.
pub type Result<T> = std::result::Result<T, SSOError>;

impl SSOError {
    /// Returns `true` if this is a bounds-related error.
    ///
    /// This includes `BoundsDimensionMismatch`, `InvalidBounds` and `ZeroDimension`.
    pub fn is_bounds_error(&self) -> bool {
        matches!(
            self,
            SSOError::BoundsDimensionMismatch { .. }
                | SSOError::InvalidBounds { .. }
                | SSOError::ZeroDimension
        )
    }

    /// Returns `true` if this is a configuration-related error.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            SSOError::EmptyPopulation | SSOError::NoIterations | SSOError::InvalidProgressInterval
        )
    }

    /// Returns `true` if the run was aborted by an objective evaluation.
    pub fn is_evaluation_error(&self) -> bool {
        matches!(
            self,
            SSOError::NonFiniteFitness { .. } | SSOError::Objective { .. }
        )
    }
}
