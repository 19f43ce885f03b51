//! # ansi_logger
//!
//! Severity-masked log formatting: a small logger façade that filters by a
//! bitmask level, renders entries through a pluggable transformer and
//! writes them to a normal or an error sink.
//!
//! ## Features
//!
//! - **Masks and levels**: seven single-bit severities; any union of them is
//!   a valid filter (`Mask::Error | Mask::Debug`)
//! - **Transformers**: colourized text with a depth-limited pretty-printer,
//!   JSON lines, or the raw entry
//! - **Sinks**: stdout/stderr/files, in-memory capture, closures
//! - **Line driver**: the `ansi-logger` binary re-renders JSON log streams
//!
//! ## Example
//!
//! ```
//! use ansi_logger::prelude::*;
//!
//! let normal = MemorySink::new();
//! let logger = Logger::builder()
//!     .group("db")
//!     .level(Level::DEBUG)
//!     .time_format(TimestampFormat::Custom("12:00".into()))
//!     .transformer(TextTransformer::new().with_colors(false).assume_terminal(false))
//!     .normal_sink(normal.clone())
//!     .build();
//!
//! logger.debug(Value::map([("host", "localhost")]))?;
//! logger.verbose("filtered out")?;
//!
//! assert_eq!(
//!     normal.lines(),
//!     ["[12:00] [db] [DEBUG]   {\n[12:00] [db] [DEBUG]     host: 'localhost'\n[12:00] [db] [DEBUG]   }\n"]
//! );
//! # Ok::<(), LoggerError>(())
//! ```

pub mod core;
pub mod driver;
pub mod env;
pub mod macros;
pub mod sinks;
pub mod transformers;

pub mod prelude {
    pub use crate::core::{
        matches, resolve_name, Level, LogEntry, Logger, LoggerBuilder, LoggerError,
        LoggerMetrics, LoggerOptions, Mask, Output, Result, SharedValue, Sink, TimestampFormat,
        Transformer, Value,
    };
    pub use crate::env::{create_json_logger, create_logger_from_environment, create_text_logger};
    pub use crate::sinks::{FnSink, MemorySink, NullSink, StreamSink};
    pub use crate::transformers::{IdentityTransformer, JsonTransformer, TextTransformer};
}

pub use crate::core::{
    matches, resolve_name, Level, LogEntry, Logger, LoggerBuilder, LoggerConfig, LoggerError,
    LoggerMetrics, LoggerOptions, Mask, Output, Result, SharedValue, Sink, TimestampFormat,
    Transformer, Value, CUSTOM_LABEL,
};
pub use env::{create_json_logger, create_logger_from_environment, create_text_logger};
