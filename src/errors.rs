use thiserror::Error;

/// Errors raised by turtle motion and pen operations.
///
/// A failed operation never leaves the turtle half-updated: position,
/// heading and pen state are exactly what they were before the call.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TurtleError {
    /// An argument (or the position/heading it would produce) was NaN or infinite.
    #[error("non-finite {what}: {value}")]
    NonFinite { what: &'static str, value: f64 },

    /// A CSS colour string could not be parsed.
    #[error("invalid pen colour '{0}'")]
    Color(String),
}

impl TurtleError {
    /// Pass `value` through, or fail with [`TurtleError::NonFinite`].
    pub(crate) fn check(what: &'static str, value: f64) -> Result<f64, TurtleError> {
        if value.is_finite() {
            Ok(value)
        } else {
            Err(TurtleError::NonFinite { what, value })
        }
    }
}

/// Errors while loading configuration or persisted drawing history.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("RON parse error: {0}")]
    Parse(#[from] ron::error::SpannedError),

    #[error("RON serialisation error: {0}")]
    Serialise(#[from] ron::Error),
}
