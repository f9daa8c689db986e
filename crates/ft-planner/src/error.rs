use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum PlannerError {
    #[error("planner configuration error: {0}")]
    Config(String),

    /// A raw telemetry record carried a value no corridor can have.
    #[error("telemetry for route {route:?}: {reason}")]
    Telemetry { route: String, reason: String },
}

pub type PlannerResult<T> = Result<T, PlannerError>;
