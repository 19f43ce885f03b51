//! Basic logger usage example
//!
//! Demonstrates the text and JSON transformers, level masks and
//! reconfiguration.
//!
//! Run with: cargo run --example basic_usage

use ansi_logger::prelude::*;
use ansi_logger::info;

fn main() -> Result<()> {
    println!("=== ansi_logger - Basic Usage Example ===\n");

    let logger = Logger::builder()
        .group("demo")
        .level(Level::VERBOSE)
        .normal_sink(StreamSink::stdout())
        .error_sink(StreamSink::stderr())
        .build();

    println!("1. Logging at every severity:");
    logger.error("This is an error message")?;
    logger.warn("This is a warning message")?;
    logger.success("This is a success message")?;
    logger.log("This is a log message")?;
    logger.info("This is an info message")?;
    logger.debug("This is a debug message")?;
    logger.verbose("This is a verbose message")?;

    println!("\n2. Structured values and errors:");
    logger.debug(Value::map([
        ("host", Value::from("localhost")),
        ("ports", Value::array([8080, 8443])),
        ("tls", Value::Bool(true)),
    ]))?;
    logger.error(Value::error(
        "connection refused",
        Some("at connect (db.rs:42)\nat main (main.rs:7)".into()),
    ))?;
    logger.format_function_call("connect", [Value::from("db"), Value::Int(5432)])?;
    info!(logger, "Processed {} items in {}ms", 120, 35)?;

    println!("\n3. Only ERROR and DEBUG:");
    logger.set_level(i64::from((Mask::Error | Mask::Debug).bits()));
    logger.info("Info message (hidden)")?;
    logger.debug("Debug message (visible)")?;

    println!("\n4. Invalid level is rejected:");
    logger.set_level(VERBOSE_PLUS_ONE);
    println!("   level is still {}", logger.level());

    println!("\n5. JSON output:");
    let json = create_json_logger(Some("demo"));
    json.info(Value::map([("event", "started")]))?;

    println!("\n=== Example completed successfully! ===");

    Ok(())
}

const VERBOSE_PLUS_ONE: i64 = 128;
