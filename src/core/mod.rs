//! Core logger types and traits

pub mod error;
pub mod log_entry;
pub mod logger;
pub mod mask;
pub mod metrics;
pub mod sink;
pub mod timestamp;
pub mod transformer;
pub mod value;

pub use error::{LoggerError, Result};
pub use log_entry::LogEntry;
pub use logger::{Logger, LoggerBuilder, LoggerConfig, LoggerOptions};
pub use mask::{matches, resolve_name, Level, Mask, CUSTOM_LABEL};
pub use metrics::LoggerMetrics;
pub use sink::Sink;
pub use timestamp::{TimestampFormat, LOCAL_PATTERN};
pub use transformer::{Output, Transformer};
pub use value::{SharedValue, Value};
