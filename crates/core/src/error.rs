/// Result alias that carries the custom [`MotionTraceError`] type.
pub type Result<T> = std::result::Result<T, MotionTraceError>;

/// Common error type for the core crate.
#[derive(Debug, thiserror::Error)]
pub enum MotionTraceError {
    /// Free-form error used for conditions that do not warrant their own
    /// variant.
    #[error("{0}")]
    Message(String),
    /// A configuration value or a parsed log field fell outside its
    /// accepted domain.
    #[error("invalid input: {0}")]
    InvalidInput(&'static str),
    /// Wrapper around standard IO errors; raised by the persistence
    /// gateway when a flush fails.
    #[error("{0}")]
    Io(#[from] std::io::Error),
    /// Wrapper around JSON (de)serialisation errors from configuration
    /// loading.
    #[error("{0}")]
    Json(#[from] serde_json::Error),
}

impl MotionTraceError {
    /// Creates a new error that simply wraps the provided message.
    pub fn msg<T: Into<String>>(msg: T) -> Self {
        Self::Message(msg.into())
    }
}

impl From<&str> for MotionTraceError {
    fn from(value: &str) -> Self {
        Self::msg(value)
    }
}

impl From<String> for MotionTraceError {
    fn from(value: String) -> Self {
        Self::Message(value)
    }
}
