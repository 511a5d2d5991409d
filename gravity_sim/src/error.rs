//! Error types for the gravity engine

use thiserror::Error;

/// Result type for engine operations
pub type SimResult<T> = Result<T, SimError>;

/// Errors raised while building or mutating a simulation.
///
/// Stepping never fails; these only come out of constructors and setters.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimError {
    #[error("invalid {what}: {value}")]
    InvalidConstruction { what: &'static str, value: f64 },

    #[error("a universe needs at least one body")]
    EmptyUniverse,
}

impl SimError {
    pub(crate) fn invalid(what: &'static str, value: f64) -> Self {
        SimError::InvalidConstruction { what, value }
    }
}
