//! Error types for multipole re-expansion operators.
//!
//! Shape violations are precondition failures reported to the caller.
//! Out-of-range degree/order pairs are not errors: the coefficient is zero.

use thiserror::Error;

/// Errors that can occur when applying or configuring multipole operators.
#[derive(Debug, Error)]
pub enum MultipoleError {
    /// Row count does not correspond to any maximum degree.
    #[error("input has {rows} rows, which is not (N+1)² for any maximum degree N")]
    NotPerfectSquare {
        /// Number of rows of the offending input
        rows: usize,
    },

    /// Input size disagrees with the degree an operator was baked for.
    #[error("operator baked for degree {max_degree} expects {expected} rows, got {got}")]
    DegreeMismatch {
        /// Degree fixed at bake time
        max_degree: usize,
        /// Rows implied by that degree, (N+1)²
        expected: usize,
        /// Rows actually supplied
        got: usize,
    },

    /// A physical or geometric parameter is not a finite number.
    #[error("invalid parameter {name}: {value} (must be finite)")]
    InvalidParameter {
        /// Name of the parameter
        name: &'static str,
        /// The rejected value
        value: f64,
    },

    /// Configuration text could not be parsed.
    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),
}

/// A specialized `Result` type for multipole operations.
pub type Result<T> = std::result::Result<T, MultipoleError>;

impl MultipoleError {
    /// Returns `true` if this is an input shape error.
    ///
    /// This includes `NotPerfectSquare` and `DegreeMismatch`.
    pub fn is_shape_error(&self) -> bool {
        matches!(
            self,
            MultipoleError::NotPerfectSquare { .. } | MultipoleError::DegreeMismatch { .. }
        )
    }

    /// Returns `true` if this is a configuration error.
    ///
    /// This includes `InvalidParameter` and `Config`.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            MultipoleError::InvalidParameter { .. } | MultipoleError::Config(_)
        )
    }
}
