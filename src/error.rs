use chrono::NaiveDate;
use thiserror::Error;

/// Errors surfaced by the engines and their configuration layer.
///
/// Indicator math never produces one of these: short history and zero
/// periods come back as `None`-padded series instead.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Insufficient data: need at least {required} bars, got {actual}")]
    InsufficientData { required: usize, actual: usize },

    #[error("No price bars supplied")]
    EmptySeries,

    #[error("Invalid bar at index {index}: {reason}")]
    InvalidBar { index: usize, reason: String },

    #[error("Bar dates must be strictly ascending: {current} at index {index} follows {previous}")]
    UnorderedDates {
        index: usize,
        previous: NaiveDate,
        current: NaiveDate,
    },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
}

pub type Result<T> = std::result::Result<T, EngineError>;
