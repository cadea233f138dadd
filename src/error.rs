//! Error types for the simulation core
//!
//! The system is closed and numerical, so the taxonomy is narrow:
//! - domain errors (a force queried at the attractor itself)
//! - configuration errors caught at construction time

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimError {
    /// A force was requested at zero distance from the attractor
    #[error("force is undefined at zero distance from the central body")]
    ZeroDistance,

    #[error("mass must be positive and finite, got {0}")]
    NonPositiveMass(f64),

    #[error("a particle field needs at least one particle")]
    EmptyField,

    #[error("invalid parameter `{name}`: {value}")]
    InvalidParameter { name: &'static str, value: f64 },

    #[error("non-finite `{0}` in input")]
    NonFinite(&'static str),

    /// The field's attractor is not where the body's force law pulls toward
    #[error("field center does not match the central body position")]
    CenterMismatch,
}

pub type SimResult<T> = Result<T, SimError>;

/// Reject values that are not strictly positive and finite
pub(crate) fn require_positive(name: &'static str, value: f64) -> SimResult<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(SimError::InvalidParameter { name, value })
    }
}
