//! Construction-time errors.
//!
//! Everything that can go wrong while building curves, geometry or scenes
//! surfaces here, before any render starts.

use thiserror::Error;

/// A malformed curve, primitive, scene or render setting.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("keyframe curve needs at least one key")]
    EmptyCurve,

    #[error("{what} must be positive, got {value}")]
    NonPositive { what: &'static str, value: f32 },

    #[error("{what} must be finite")]
    NonFinite { what: &'static str },

    #[error("no {kind} pose registered for target {target}")]
    MissingPose { kind: &'static str, target: u8 },

    #[error("motion path needs at least one strike event")]
    EmptyEvents,

    #[error("material {id} referenced but only {count} materials exist")]
    UnknownMaterial { id: usize, count: usize },

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

impl ConfigError {
    /// Reject values that are not strictly positive and finite.
    pub fn check_positive(what: &'static str, value: f32) -> ConfigResult<f32> {
        if !value.is_finite() {
            return Err(ConfigError::NonFinite { what });
        }
        if value <= 0.0 {
            return Err(ConfigError::NonPositive { what, value });
        }
        Ok(value)
    }
}
