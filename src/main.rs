//! ansi-logger - pretty-print newline-delimited JSON logs.
//!
//! ```text
//! # Only output log entries from INFO and DEBUG
//! tail -n200 -f big.log | ansi-logger -m INFO,DEBUG
//!
//! # Only output ERROR and WARN, read from a file
//! ansi-logger -l WARN -f ./big.log | less
//! ```

#![forbid(unsafe_code)]

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;

use ansi_logger::driver::{Driver, FieldMapper, Watchdog};
use ansi_logger::sinks::StreamSink;
use ansi_logger::transformers::{ColorKey, Paint, TextTransformer};
use ansi_logger::{Level, Logger, LoggerError, Result};

/// Format JSON log lines as colorized text.
#[derive(Parser, Debug)]
#[command(name = "ansi-logger")]
#[command(version, about, long_about = None)]
struct Cli {
    /// The log file to parse and format, `-` for stdin.
    #[arg(long, short = 'f', default_value = "-")]
    file: PathBuf,

    /// The level to output (SILENT ERROR WARN SUCCESS LOG INFO DEBUG VERBOSE or 0-127).
    #[arg(long, short = 'l', default_value = "VERBOSE")]
    loglevel: Level,

    /// Comma separated list of masks to output; overrides --loglevel.
    #[arg(long, short = 'm', value_parser = Level::parse_mask_list)]
    logmasks: Option<Level>,

    /// Direct error entries to stderr.
    #[arg(long, short = 's')]
    split_pipes: bool,

    /// Seconds to wait for the first line, 0 to disable.
    #[arg(long, short = 't', default_value_t = 1)]
    timeout: u64,

    /// Comma separated `new=old` field renames, e.g. `levelText=level,group=key`.
    #[arg(long)]
    mapper: Option<FieldMapper>,

    /// Disable colours.
    #[arg(long)]
    no_colors: bool,

    /// Override a colour, e.g. `--color INFO=green` or `--color "ERROR=white on red"`.
    #[arg(long = "color", value_name = "KEY=STYLE", value_parser = parse_color)]
    colors: Vec<(ColorKey, Paint)>,
}

fn parse_color(raw: &str) -> Result<(ColorKey, Paint)> {
    let (key, style) = raw
        .split_once('=')
        .ok_or_else(|| LoggerError::config("--color", format!("expected KEY=STYLE, got '{}'", raw)))?;
    Ok((key.parse()?, style.parse()?))
}

fn build_logger(cli: &Cli) -> Logger {
    let mut transformer = TextTransformer::new()
        .with_colors(!cli.no_colors)
        .force_colors(!cli.no_colors);
    for (key, paint) in &cli.colors {
        transformer.set_color(*key, *paint);
    }

    let builder = Logger::builder()
        .level(cli.logmasks.unwrap_or(cli.loglevel))
        .transformer(transformer)
        .normal_sink(StreamSink::stdout());

    if cli.split_pipes {
        builder.error_sink(StreamSink::stderr()).build()
    } else {
        builder.error_sink(StreamSink::stdout()).build()
    }
}

fn open_input(path: &PathBuf) -> Result<Box<dyn BufRead>> {
    if path.as_os_str() == "-" {
        return Ok(Box::new(io::stdin().lock()));
    }
    let file = File::open(path)
        .map_err(|e| LoggerError::io_operation("opening input", path.display().to_string(), e))?;
    Ok(Box::new(BufReader::new(file)))
}

fn run(cli: Cli) -> Result<usize> {
    let logger = build_logger(&cli);
    let input = open_input(&cli.file)?;

    let mut driver = Driver::new(&logger);
    if let Some(mapper) = cli.mapper.clone() {
        driver = driver.with_mapper(mapper);
    }
    if cli.timeout > 0 {
        driver = driver.with_watchdog(Watchdog::spawn(Duration::from_secs(cli.timeout), || {
            eprintln!("No data received from stdin");
            std::process::exit(1);
        }));
    }

    driver.run(input)
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(_) => ExitCode::SUCCESS,
        // the reader went away (e.g. `| less` quit early)
        Err(e) if e.is_broken_pipe() => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("ansi-logger: {}", e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["ansi-logger"]).unwrap();
        assert_eq!(cli.file, PathBuf::from("-"));
        assert_eq!(cli.loglevel, Level::VERBOSE);
        assert_eq!(cli.logmasks, None);
        assert_eq!(cli.timeout, 1);
        assert!(!cli.split_pipes);
    }

    #[test]
    fn test_masks_override_level() {
        let cli = Cli::try_parse_from(["ansi-logger", "-l", "ERROR", "-m", "INFO,DEBUG"]).unwrap();
        let logger = build_logger(&cli);
        assert_eq!(logger.level(), Level::from_masks([ansi_logger::Mask::Info, ansi_logger::Mask::Debug]));
    }

    #[test]
    fn test_color_overrides() {
        let cli = Cli::try_parse_from(["ansi-logger", "--color", "INFO=green", "--color", "TIME=plain"]).unwrap();
        assert_eq!(cli.colors.len(), 2);
        assert_eq!(cli.colors[0].0, ColorKey::Info);
        assert!(cli.colors[1].1.is_plain());

        assert!(Cli::try_parse_from(["ansi-logger", "--color", "NOPE=green"]).is_err());
        assert!(Cli::try_parse_from(["ansi-logger", "--color", "INFO"]).is_err());
    }

    #[test]
    fn test_invalid_level_rejected() {
        assert!(Cli::try_parse_from(["ansi-logger", "-l", "LOUD"]).is_err());
        assert!(Cli::try_parse_from(["ansi-logger", "-l", "200"]).is_err());
    }
}
