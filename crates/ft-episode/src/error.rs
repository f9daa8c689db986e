use ft_core::CoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EpisodeError {
    #[error("episode configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Params(#[from] CoreError),
}

pub type EpisodeResult<T> = Result<T, EpisodeError>;

/// Why an [`EpisodeEvaluator`][crate::EpisodeEvaluator] produced no metrics.
#[derive(Debug, Error)]
pub enum EvaluationError {
    /// No remote service is configured or reachable.
    #[error("evaluation service unavailable: {0}")]
    Unavailable(String),

    /// The service answered with an error status.
    #[error("evaluation service responded with {status}: {message}")]
    Rejected { status: u16, message: String },

    /// The service answered with something that is not episode metrics.
    #[error("malformed evaluation response: {0}")]
    Malformed(String),

    #[error(transparent)]
    Invalid(#[from] EpisodeError),
}
