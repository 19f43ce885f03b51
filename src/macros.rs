//! Logging macros for ergonomic log message formatting.
//!
//! These macros provide a convenient interface for logging with automatic
//! string formatting, similar to `println!` and `format!`. Each expands to
//! an emit call and evaluates to its `Result<()>`.
//!
//! # Examples
//!
//! ```
//! use ansi_logger::prelude::*;
//! use ansi_logger::info;
//!
//! let logger = Logger::new();
//!
//! // Basic logging
//! info!(logger, "Server started")?;
//!
//! // With format arguments
//! let port = 8080;
//! info!(logger, "Server listening on port {}", port)?;
//! # Ok::<(), LoggerError>(())
//! ```

/// Log a formatted message at an explicit mask.
///
/// # Examples
///
/// ```
/// # use ansi_logger::prelude::*;
/// # let logger = Logger::new();
/// use ansi_logger::log;
/// log!(logger, Mask::Log, "Simple message")?;
/// log!(logger, Mask::Error, "Error code: {}", 500)?;
/// # Ok::<(), LoggerError>(())
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $mask:expr, $($arg:tt)+) => {{
        let logger = &$logger;
        let mask = $mask;
        if logger.is_enabled(mask) {
            logger.emit(mask, format!($($arg)+))
        } else {
            logger.metrics().record_filtered();
            $crate::Result::Ok(())
        }
    }};
}

/// Log an error-level message.
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Mask::Error, $($arg)+)
    };
}

/// Log a warning-level message.
///
/// # Examples
///
/// ```
/// # use ansi_logger::prelude::*;
/// # let logger = Logger::new();
/// use ansi_logger::warn;
/// warn!(logger, "Retry attempt {} of {}", 3, 5)?;
/// # Ok::<(), LoggerError>(())
/// ```
#[macro_export]
macro_rules! warn {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Mask::Warn, $($arg)+)
    };
}

#[macro_export]
macro_rules! success {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Mask::Success, $($arg)+)
    };
}

#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Mask::Info, $($arg)+)
    };
}

#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Mask::Debug, $($arg)+)
    };
}

#[macro_export]
macro_rules! verbose {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Mask::Verbose, $($arg)+)
    };
}
