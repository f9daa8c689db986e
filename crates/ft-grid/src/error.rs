//! Grid-subsystem error type.

use thiserror::Error;

/// Errors produced while building or loading a `Scenario`.
#[derive(Debug, Error)]
pub enum GridError {
    #[error("scenario {0:?} has no cells")]
    Empty(String),

    #[error("two cells share grid coordinate ({x}, {y})")]
    DuplicateCell { x: i32, y: i32 },

    #[error("cell ({x}, {y}) has invalid charging capacity {kw} kW")]
    InvalidCharging { x: i32, y: i32, kw: f64 },

    #[error("unknown city preset {0:?}")]
    UnknownPreset(String),

    #[error("grid parse error: {0}")]
    Parse(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type GridResult<T> = Result<T, GridError>;
