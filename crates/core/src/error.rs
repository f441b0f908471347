//! Error types for the landing-fx core.

use thiserror::Error;

/// Errors produced by effect construction and surface back ends.
///
/// The simulation arithmetic itself never fails; these cover invalid
/// construction input and host drawing failures.
#[derive(Debug, Error)]
pub enum EffectError {
    /// Width or height was zero, or `width * height` overflowed.
    #[error("invalid dimensions: width and height must be non-zero")]
    InvalidDimensions,

    /// A color string could not be parsed.
    #[error("invalid color: {0}")]
    InvalidColor(String),

    /// A parameter value was present but outside its accepted range.
    #[error("invalid params: {0}")]
    InvalidParams(String),

    /// A drawing surface rejected an operation (e.g. a canvas call threw).
    #[error("surface error: {0}")]
    Surface(String),

    /// A file could not be written.
    #[error("i/o error: {0}")]
    Io(String),
}
