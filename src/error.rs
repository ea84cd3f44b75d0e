use thiserror::Error;

/// Rejected run configuration
///
/// Raised before a world is created; the engine itself has no error surface.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("creature mass must be greater than 0 (got {0})")]
    NonPositiveMass(f32),

    #[error("tick multiplier must be greater than 0 (got {0})")]
    NonPositiveTpsMultiplier(f32),

    #[error("obstacle average size must be greater than or equal to 0 (got {0})")]
    NegativeObstacleSize(f32),

    #[error("min speed multiplier ({min}) must be less than or equal to max speed multiplier ({max})")]
    InvertedSpeedMultipliers { min: f32, max: f32 },

    #[error("tick length must be a finite number greater than or equal to 0 (got {0})")]
    InvalidTimestep(f32),

    #[error("{0} must be a finite number")]
    NotFinite(&'static str),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ConfigError>;
