//! Error types for construction and configuration
//!
//! The tick loop itself never returns errors: geometry edge cases are guarded
//! in place. Errors only surface when building bodies or loading settings.

use thiserror::Error;

/// Errors raised while constructing simulation objects or loading settings
#[derive(Debug, Error)]
pub enum SimError {
    /// Impulse math divides by mass, so it must be strictly positive
    #[error("invalid mass {mass}: must be finite and > 0")]
    InvalidMass { mass: f32 },

    #[error("invalid radius {radius}: must be finite and > 0")]
    InvalidRadius { radius: f32 },

    /// A tuning value is outside its usable range
    #[error("invalid setting `{name}` = {value}: expected {expected}")]
    InvalidSetting {
        name: &'static str,
        value: f32,
        expected: &'static str,
    },

    #[error("failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("failed to read settings file: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, SimError>;
