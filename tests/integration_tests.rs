//! Integration tests for the logger façade
//!
//! These tests verify:
//! - Level filtering and normal/error routing
//! - Reconfiguration with invalid levels
//! - JSON output shape and cycle handling
//! - Custom mask unions as levels
//! - Sink failures reaching the caller
//! - File output through stream sinks

use ansi_logger::prelude::*;
use ansi_logger::{info, warn};
use std::fs;
use std::sync::Arc;
use tempfile::TempDir;

struct Captured {
    logger: Logger,
    normal: MemorySink,
    error: MemorySink,
}

fn text_logger(level: Level) -> Captured {
    let normal = MemorySink::new();
    let error = MemorySink::new();
    let logger = Logger::builder()
        .level(level)
        .time_format(TimestampFormat::Custom("T".into()))
        .transformer(TextTransformer::new().with_colors(false).assume_terminal(false))
        .normal_sink(normal.clone())
        .error_sink(error.clone())
        .build();
    Captured {
        logger,
        normal,
        error,
    }
}

fn emit_every_severity(logger: &Logger) {
    logger.error("error").expect("error");
    logger.warn("warn").expect("warn");
    logger.success("success").expect("success");
    logger.log("log").expect("log");
    logger.info("info").expect("info");
    logger.debug("debug").expect("debug");
    logger.verbose("verbose").expect("verbose");
}

#[test]
fn test_info_level_filters_debug_and_verbose() {
    let c = text_logger(Level::INFO);
    emit_every_severity(&c.logger);

    assert_eq!(c.error.lines(), ["[T] [ERROR]   error\n"]);
    assert_eq!(
        c.normal.lines(),
        [
            "[T] [WARN]    warn\n",
            "[T] [SUCCESS] success\n",
            "[T] [LOG]     log\n",
            "[T] [INFO]    info\n"
        ]
    );
}

#[test]
fn test_warn_level() {
    let c = text_logger(Level::WARN);
    emit_every_severity(&c.logger);

    assert_eq!(c.error.len(), 1);
    assert_eq!(c.normal.lines(), ["[T] [WARN]    warn\n"]);
    assert_eq!(c.logger.metrics().filtered_count(), 5);
}

#[test]
fn test_every_canonical_level() {
    let expected = [
        (Level::SILENT, 0),
        (Level::ERROR, 1),
        (Level::WARN, 2),
        (Level::SUCCESS, 3),
        (Level::LOG, 4),
        (Level::INFO, 5),
        (Level::DEBUG, 6),
        (Level::VERBOSE, 7),
    ];
    for (level, count) in expected {
        let c = text_logger(level);
        emit_every_severity(&c.logger);
        assert_eq!(c.normal.len() + c.error.len(), count, "level {}", level);
    }
}

#[test]
fn test_custom_mask_union() {
    let c = text_logger(Mask::Error | Mask::Debug);
    emit_every_severity(&c.logger);

    assert_eq!(c.error.lines(), ["[T] [ERROR]   error\n"]);
    assert_eq!(c.normal.lines(), ["[T] [DEBUG]   debug\n"]);
}

#[test]
fn test_invalid_levels_keep_previous_level() {
    let c = text_logger(Level::INFO);
    c.logger.set_level(200);
    c.logger.set_level(-1);
    assert_eq!(c.logger.level(), Level::INFO);

    assert_eq!(
        c.normal.lines(),
        [
            "[T] [WARN]    Invalid log level is trying to be set: 200, aborting...\n",
            "[T] [WARN]    Invalid log level is trying to be set: -1, aborting...\n"
        ]
    );

    c.logger.debug("still filtered").expect("debug");
    assert_eq!(c.normal.len(), 2);
}

#[test]
fn test_multiline_message() {
    let c = text_logger(Level::INFO);
    c.logger.set_options(LoggerOptions::new().group("svc"));
    c.logger.info("first\nsecond").expect("info");

    assert_eq!(
        c.normal.lines(),
        ["[T] [svc] [INFO]    first\n[T] [svc] [INFO]    second\n"]
    );
}

#[test]
fn test_json_output_has_exactly_five_fields() {
    let normal = MemorySink::new();
    let logger = Logger::builder()
        .transformer(JsonTransformer::new())
        .normal_sink(normal.clone())
        .build();

    logger.info("plain").expect("info");
    logger
        .info(Value::map([("user", Value::from("ada")), ("id", Value::Int(7))]))
        .expect("info");

    let lines = normal.lines();
    assert_eq!(lines.len(), 2);
    for line in &lines {
        assert!(line.ends_with('\n'));
        let json: serde_json::Value = serde_json::from_str(line).expect("valid JSON");
        let object = json.as_object().expect("object");
        let mut keys: Vec<&str> = object.keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(keys, ["group", "levelNumeric", "levelText", "message", "timestamp"]);
        assert!(object["group"].is_null());
        assert_eq!(object["levelNumeric"], 16);
    }

    let second: serde_json::Value = serde_json::from_str(&lines[1]).expect("valid JSON");
    let message: serde_json::Value =
        serde_json::from_str(second["message"].as_str().expect("string message")).expect("JSON text");
    assert_eq!(message, serde_json::json!({"user": "ada", "id": 7}));
}

#[test]
fn test_json_cycle_is_reported() {
    let normal = MemorySink::new();
    let logger = Logger::builder()
        .transformer(JsonTransformer::new())
        .normal_sink(normal.clone())
        .build();

    let node = SharedValue::new(Value::Null);
    node.set(Value::map([("parent", Value::Shared(node.clone()))]));

    let err = logger.info(Value::Shared(node.clone())).unwrap_err();
    assert!(matches!(err, LoggerError::CircularStructure { .. }));
    assert!(normal.is_empty());
    assert_eq!(logger.metrics().failed_count(), 1);

    node.set(Value::Null);
}

#[test]
fn test_text_cycle_is_rendered() {
    let c = text_logger(Level::INFO);
    let node = SharedValue::new(Value::Null);
    node.set(Value::map([("parent", Value::Shared(node.clone()))]));

    c.logger.info(Value::Shared(node.clone())).expect("text path is total");
    assert!(c.normal.lines()[0].contains("parent: [Circular]"));

    node.set(Value::Null);
}

#[test]
fn test_identity_hands_over_entries() {
    let normal = MemorySink::new();
    let error = MemorySink::new();
    let logger = Logger::builder()
        .group("jobs")
        .transformer(IdentityTransformer)
        .normal_sink(normal.clone())
        .error_sink(error.clone())
        .build();

    logger.success(Value::map([("id", 1)])).expect("success");
    logger.error("failed").expect("error");

    let outputs = normal.outputs();
    let entry = outputs[0].as_entry().expect("entry");
    assert_eq!(entry.group.as_deref(), Some("jobs"));
    assert_eq!(entry.level_numeric, Mask::Success.bits());
    assert_eq!(entry.message, Value::map([("id", 1)]));
    assert!(error.outputs()[0].as_entry().expect("entry").is_error());
}

#[test]
fn test_sink_failure_propagates() {
    let logger = Logger::builder()
        .error_sink(FnSink::new(|_: &Output| {
            Err(LoggerError::writer("pipe closed"))
        }))
        .build();

    assert!(logger.info("fine").is_ok());
    let err = logger.error("lost").unwrap_err();
    assert_eq!(err.to_string(), "Writer error: pipe closed");
}

#[test]
fn test_macros_format_arguments() {
    let c = text_logger(Level::INFO);
    info!(c.logger, "listening on {}", 8080).expect("info");
    warn!(c.logger, "retry {} of {}", 2, 3).expect("warn");

    assert_eq!(
        c.normal.lines(),
        ["[T] [INFO]    listening on 8080\n", "[T] [WARN]    retry 2 of 3\n"]
    );
}

#[test]
fn test_file_sink_output() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("app.log");

    let logger = Logger::builder()
        .time_format(TimestampFormat::Custom("T".into()))
        .transformer(JsonTransformer::new())
        .normal_sink(StreamSink::file(&log_file).expect("Failed to open log file"))
        .build();

    for i in 0..3 {
        logger.info(format!("Message {}", i)).expect("info");
    }
    logger.flush().expect("Failed to flush");

    let content = fs::read_to_string(&log_file).expect("Failed to read log file");
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[2].contains("\"message\":\"Message 2\""));
}

#[test]
fn test_concurrent_emits_keep_lines_whole() {
    let c = text_logger(Level::INFO);
    let logger = Arc::new(c.logger);

    let handles: Vec<_> = (0..8)
        .map(|t| {
            let logger = Arc::clone(&logger);
            std::thread::spawn(move || {
                for i in 0..25 {
                    logger.info(format!("t{} m{}", t, i)).expect("info");
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().expect("thread panicked");
    }

    let lines = c.normal.lines();
    assert_eq!(lines.len(), 200);
    assert!(lines.iter().all(|l| l.starts_with("[T] [INFO]    t") && l.ends_with('\n')));
    assert_eq!(logger.metrics().emitted_count(), 200);
}
