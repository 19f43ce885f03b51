//! Convenience constructors wired to stdout/stderr
//!
//! `LOGLEVEL` (a level name or an integer in `0..=127`) and `LOGFORMAT`
//! (`TEXT` or `JSON`) override whatever the caller passed in [`EnvOptions`].

use crate::core::{Level, Logger, LoggerError, Result};
use crate::sinks::StreamSink;
use crate::transformers::{ColorKey, JsonTransformer, Paint, TextTransformer};
use std::fmt;
use std::str::FromStr;

pub const LOGLEVEL_VAR: &str = "LOGLEVEL";
pub const LOGFORMAT_VAR: &str = "LOGFORMAT";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogFormat::Text => f.write_str("TEXT"),
            LogFormat::Json => f.write_str("JSON"),
        }
    }
}

impl FromStr for LogFormat {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_uppercase().as_str() {
            "TEXT" => Ok(LogFormat::Text),
            "JSON" => Ok(LogFormat::Json),
            _ => Err(LoggerError::unknown_name("log format", s)),
        }
    }
}

/// Caller defaults for [`create_logger_from_environment`].
#[derive(Debug, Clone, PartialEq)]
pub struct EnvOptions {
    pub group: Option<String>,
    pub level: Level,
    pub format: LogFormat,
    /// Group column colour; text format only.
    pub group_color: Option<Paint>,
}

impl Default for EnvOptions {
    fn default() -> Self {
        Self {
            group: None,
            level: Level::INFO,
            format: LogFormat::Text,
            group_color: None,
        }
    }
}

/// Text logger at INFO writing to stdout, errors to stderr.
pub fn create_text_logger(group: Option<&str>) -> Logger {
    build(group.map(str::to_string), Level::INFO, LogFormat::Text, None)
}

/// JSON-lines logger at INFO writing to stdout, errors to stderr.
pub fn create_json_logger(group: Option<&str>) -> Logger {
    build(group.map(str::to_string), Level::INFO, LogFormat::Json, None)
}

/// Logger configured from `options`, overridden by `LOGLEVEL` / `LOGFORMAT`.
///
/// Fails when either variable is set to something unparseable.
pub fn create_logger_from_environment(options: EnvOptions) -> Result<Logger> {
    create_logger_with_lookup(options, |name| std::env::var(name).ok())
}

/// Same as [`create_logger_from_environment`] with a custom variable lookup.
///
/// # Example
///
/// ```
/// use ansi_logger::env::{create_logger_with_lookup, EnvOptions};
/// use ansi_logger::Level;
///
/// let logger = create_logger_with_lookup(EnvOptions::default(), |name| {
///     (name == "LOGLEVEL").then(|| "DEBUG".to_string())
/// })?;
/// assert_eq!(logger.level(), Level::DEBUG);
/// # Ok::<(), ansi_logger::LoggerError>(())
/// ```
pub fn create_logger_with_lookup<F>(options: EnvOptions, lookup: F) -> Result<Logger>
where
    F: Fn(&str) -> Option<String>,
{
    let level = match lookup(LOGLEVEL_VAR) {
        Some(raw) if !raw.trim().is_empty() => raw.parse::<Level>()?,
        _ => options.level,
    };
    let format = match lookup(LOGFORMAT_VAR) {
        Some(raw) if !raw.trim().is_empty() => raw.parse::<LogFormat>()?,
        _ => options.format,
    };
    Ok(build(options.group, level, format, options.group_color))
}

fn build(group: Option<String>, level: Level, format: LogFormat, group_color: Option<Paint>) -> Logger {
    let mut builder = Logger::builder()
        .level(level)
        .normal_sink(StreamSink::stdout())
        .error_sink(StreamSink::stderr());

    if let Some(group) = group {
        builder = builder.group(group);
    }

    match format {
        LogFormat::Text => {
            let mut transformer = TextTransformer::new();
            if let Some(paint) = group_color {
                transformer.set_color(ColorKey::Group, paint);
            }
            builder.transformer(transformer).build()
        }
        LogFormat::Json => builder.transformer(JsonTransformer::new()).build(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_simple_constructors() {
        let text = create_text_logger(Some("app"));
        assert_eq!(text.transformer_name(), "text");
        assert_eq!(text.group().as_deref(), Some("app"));
        assert_eq!(text.level(), Level::INFO);

        let json = create_json_logger(None);
        assert_eq!(json.transformer_name(), "json");
        assert_eq!(json.group(), None);
    }

    #[test]
    fn test_options_used_when_env_empty() {
        for level in [Level::SILENT, Level::ERROR, Level::VERBOSE, Level::ERROR | Level::INFO] {
            let options = EnvOptions {
                level,
                ..EnvOptions::default()
            };
            let logger = create_logger_with_lookup(options, lookup(&[])).unwrap();
            assert_eq!(logger.level(), level);
        }
    }

    #[test]
    fn test_env_level_overrides_options() {
        let options = EnvOptions {
            level: Level::SILENT,
            ..EnvOptions::default()
        };
        let logger = create_logger_with_lookup(options, lookup(&[("LOGLEVEL", "ERROR")])).unwrap();
        assert_eq!(logger.level(), Level::ERROR);

        let logger =
            create_logger_with_lookup(EnvOptions::default(), lookup(&[("LOGLEVEL", "127")])).unwrap();
        assert_eq!(logger.level(), Level::VERBOSE);

        let logger =
            create_logger_with_lookup(EnvOptions::default(), lookup(&[("LOGLEVEL", "silent")])).unwrap();
        assert_eq!(logger.level(), Level::SILENT);
    }

    #[test]
    fn test_env_format_overrides_options() {
        let options = EnvOptions {
            format: LogFormat::Json,
            ..EnvOptions::default()
        };
        let logger = create_logger_with_lookup(options, lookup(&[("LOGFORMAT", "TEXT")])).unwrap();
        assert_eq!(logger.transformer_name(), "text");

        let logger =
            create_logger_with_lookup(EnvOptions::default(), lookup(&[("LOGFORMAT", "json")])).unwrap();
        assert_eq!(logger.transformer_name(), "json");
    }

    #[test]
    fn test_invalid_env_values() {
        let err = create_logger_with_lookup(EnvOptions::default(), lookup(&[("LOGLEVEL", "200")]))
            .err();
        assert!(matches!(err, Some(LoggerError::InvalidLevel { value: 200 })));

        let err = create_logger_with_lookup(EnvOptions::default(), lookup(&[("LOGFORMAT", "XML")]))
            .err();
        assert!(matches!(err, Some(LoggerError::UnknownName { .. })));
    }

    #[test]
    fn test_group_passed_along() {
        let options = EnvOptions {
            group: Some("scheduler".into()),
            group_color: Some(Paint::plain()),
            ..EnvOptions::default()
        };
        let logger = create_logger_with_lookup(options, lookup(&[])).unwrap();
        assert_eq!(logger.group().as_deref(), Some("scheduler"));
    }
}
