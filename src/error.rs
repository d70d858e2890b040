//! Error types for the waypoint and voyage pipeline

use thiserror::Error;

/// Result type for waypoint operations
pub type Result<T> = std::result::Result<T, WaypointError>;

/// Errors that can occur while binning, projecting or computing voyages
#[derive(Debug, Clone, PartialEq, Error)]
pub enum WaypointError {
    /// An input value is strictly greater than 1
    #[error(
        "Some of the data is greater than 1 - only values between 0 and 1 are accepted \
         (feature {feature}: {value})"
    )]
    AboveOne { feature: String, value: f64 },

    /// An input value is strictly less than 0
    #[error(
        "Some of the data is less than 0 - only values between 0 and 1 are accepted \
         (feature {feature}: {value})"
    )]
    BelowZero { feature: String, value: f64 },

    /// Bin edges must describe at least one bin
    #[error("\"bins\" cannot be empty - at least two edges are required")]
    EmptyBinEdges,

    /// Bin edges must be strictly ascending
    #[error("bin edges must be strictly ascending (edge {index}: {value})")]
    UnsortedBinEdges { index: usize, value: f64 },

    /// Labels or matrices whose dimensions disagree
    #[error("shape mismatch for {what}: expected {expected}, got {actual}")]
    ShapeMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    /// A transition names a group that has no waypoints
    #[error("group {0:?} is not present in the grouped waypoints")]
    MissingGroup(String),

    /// Configuration value out of range
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The factorization was used before `fit`
    #[error("factorization model has not been fitted")]
    NotFitted,

    /// Factorization input with a negative entry
    #[error("non-negative factorization requires non-negative input ({0})")]
    NegativeInput(&'static str),

    /// Input columns don't match the fitted components
    #[error("factorization expects {expected} columns, got {actual}")]
    ComponentMismatch { expected: usize, actual: usize },
}
