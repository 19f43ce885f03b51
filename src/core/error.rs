//! Error types for the logger system

pub type Result<T> = std::result::Result<T, LoggerError>;

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// IO error with context
    #[error("IO error while {operation}: {message}")]
    IoOperation {
        operation: String,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Generic IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Level outside of `0..=127`
    #[error("Invalid log level: {value} (expected 0..={max})", max = crate::core::Level::MAX_BITS)]
    InvalidLevel { value: i64 },

    /// A level, mask, colour key or style name that is not known
    #[error("Unknown {kind}: '{name}'")]
    UnknownName { kind: String, name: String },

    /// Value graph refers back to itself
    #[error("Converting circular structure to JSON at '{path}'")]
    CircularStructure { path: String },

    /// Invalid configuration with details
    #[error("Invalid configuration for {component}: {message}")]
    InvalidConfiguration { component: String, message: String },

    /// Input line that decodes but cannot become a log entry
    #[error("Malformed log record: {message}")]
    MalformedRecord { message: String },

    /// Writer error (generic)
    #[error("Writer error: {0}")]
    WriterError(String),
}

impl LoggerError {
    /// Create an IO operation error with context
    pub fn io_operation(
        operation: impl Into<String>,
        message: impl Into<String>,
        source: std::io::Error,
    ) -> Self {
        LoggerError::IoOperation {
            operation: operation.into(),
            message: message.into(),
            source,
        }
    }

    pub fn invalid_level(value: i64) -> Self {
        LoggerError::InvalidLevel { value }
    }

    pub fn unknown_name(kind: impl Into<String>, name: impl Into<String>) -> Self {
        LoggerError::UnknownName {
            kind: kind.into(),
            name: name.into(),
        }
    }

    pub fn circular(path: impl Into<String>) -> Self {
        LoggerError::CircularStructure { path: path.into() }
    }

    /// Create an invalid configuration error
    pub fn config(component: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::InvalidConfiguration {
            component: component.into(),
            message: message.into(),
        }
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        LoggerError::MalformedRecord {
            message: message.into(),
        }
    }

    /// Create a writer error (generic)
    pub fn writer<S: Into<String>>(msg: S) -> Self {
        LoggerError::WriterError(msg.into())
    }

    /// True when the error comes from writing into a closed pipe
    /// (e.g. output piped into `less` that was quit early).
    pub fn is_broken_pipe(&self) -> bool {
        match self {
            LoggerError::IoOperation { source, .. } | LoggerError::IoError(source) => {
                source.kind() == std::io::ErrorKind::BrokenPipe
            }
            LoggerError::JsonError(e) => e.io_error_kind() == Some(std::io::ErrorKind::BrokenPipe),
            _ => false,
        }
    }
}
