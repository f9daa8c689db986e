//! Validation error shared by the `ft-*` crates.
//!
//! Crates with their own error enums wrap `CoreError` via `#[from]`.

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum CoreError {
    /// A bounded scalar (e.g. a policy parameter) fell outside its range.
    /// NaN always lands here.
    #[error("{name} = {value} is outside [{min}, {max}]")]
    OutOfRange {
        name:  &'static str,
        value: f64,
        min:   f64,
        max:   f64,
    },
}

pub type CoreResult<T> = Result<T, CoreError>;
