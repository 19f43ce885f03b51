//! Line driver tests: JSON log streams re-rendered through a logger

use ansi_logger::driver::{self, Driver, FieldMapper};
use ansi_logger::prelude::*;
use std::fs::{self, File};
use std::io::{BufReader, Cursor};
use tempfile::TempDir;

const STREAM: &str = r#"{"group":"api","levelNumeric":16,"levelText":"INFO","message":"started","timestamp":"T1"}
{"group":null,"levelNumeric":1,"levelText":"ERROR","message":"boom","timestamp":"T2"}

{"levelText":"debug","message":{"query":"select 1"},"timestamp":"T3"}
{"levelText":"trace","message":"unknown level is skipped","timestamp":"T4"}
{"levelNumeric":64,"message":"verbose","timestamp":"T5"}
"#;

fn logger(level: Level, normal: &MemorySink, error: &MemorySink) -> Logger {
    Logger::builder()
        .level(level)
        .transformer(TextTransformer::new().with_colors(false).assume_terminal(false))
        .normal_sink(normal.clone())
        .error_sink(error.clone())
        .build()
}

#[test]
fn test_stream_is_filtered_and_routed() {
    let normal = MemorySink::new();
    let error = MemorySink::new();
    let logger = logger(Level::DEBUG, &normal, &error);

    let records = driver::run(Cursor::new(STREAM), &logger).expect("run");
    assert_eq!(records, 4);

    assert_eq!(error.lines(), ["[T2] [ERROR]   boom\n"]);
    assert_eq!(
        normal.lines(),
        [
            "[T1] [api] [INFO]    started\n",
            "[T3] [DEBUG]   {\n[T3] [DEBUG]     query: 'select 1'\n[T3] [DEBUG]   }\n"
        ]
    );
    assert_eq!(logger.metrics().filtered_count(), 1);
}

#[test]
fn test_mask_list_filter() {
    let normal = MemorySink::new();
    let error = MemorySink::new();
    let level = Level::parse_mask_list("ERROR,VERBOSE").expect("masks");
    let logger = logger(level, &normal, &error);

    driver::run(Cursor::new(STREAM), &logger).expect("run");
    assert_eq!(error.len(), 1);
    assert_eq!(normal.lines(), ["[T5] [VERBOSE] verbose\n"]);
}

#[test]
fn test_mapper_renames_fields() {
    let normal = MemorySink::new();
    let error = MemorySink::new();
    let logger = logger(Level::VERBOSE, &normal, &error);

    let input = r#"{"level":"WARN","msg":"disk 91%","time":"T","component":"storage"}"#;
    let mapper = FieldMapper::parse("levelText=level,message=msg,timestamp=time,group=component")
        .expect("mapper");

    let records = Driver::new(&logger)
        .with_mapper(mapper)
        .run(Cursor::new(input))
        .expect("run");

    assert_eq!(records, 1);
    assert_eq!(normal.lines(), ["[T] [storage] [WARN]    disk 91%\n"]);
}

#[test]
fn test_invalid_line_stops_the_run() {
    let normal = MemorySink::new();
    let error = MemorySink::new();
    let logger = logger(Level::VERBOSE, &normal, &error);

    let input = "{\"levelNumeric\":16,\"message\":\"ok\",\"timestamp\":\"T\"}\nnot json\n{\"levelNumeric\":16,\"message\":\"never\",\"timestamp\":\"T\"}\n";
    let err = driver::run(Cursor::new(input), &logger).unwrap_err();

    assert!(matches!(err, LoggerError::JsonError(_)));
    assert_eq!(normal.lines(), ["[T] [INFO]    ok\n"]);
}

#[test]
fn test_json_stream_roundtrip() {
    let normal = MemorySink::new();
    let logger = Logger::builder()
        .level(Level::VERBOSE)
        .transformer(JsonTransformer::new())
        .normal_sink(normal.clone())
        .error_sink(normal.clone())
        .build();

    driver::run(Cursor::new(STREAM), &logger).expect("run");
    let lines = normal.lines();
    assert_eq!(lines.len(), 4);

    let first: serde_json::Value = serde_json::from_str(&lines[0]).expect("JSON");
    assert_eq!(
        first,
        serde_json::json!({
            "group": "api",
            "levelNumeric": 16,
            "levelText": "INFO",
            "message": "started",
            "timestamp": "T1"
        })
    );
}

#[test]
fn test_file_input_to_file_output() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let input_path = temp_dir.path().join("input.log");
    let output_path = temp_dir.path().join("output.log");
    fs::write(&input_path, STREAM).expect("Failed to write input");

    {
        let logger = Logger::builder()
            .level(Level::INFO)
            .transformer(TextTransformer::new().with_colors(false).assume_terminal(false))
            .normal_sink(StreamSink::file(&output_path).expect("open output"))
            .build();

        let input = BufReader::new(File::open(&input_path).expect("open input"));
        let records = driver::run(input, &logger).expect("run");
        assert_eq!(records, 4);
    }

    let content = fs::read_to_string(&output_path).expect("Failed to read output");
    assert_eq!(content, "[T1] [api] [INFO]    started\n");
}
