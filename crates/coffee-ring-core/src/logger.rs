//! Run logging for the analysis CLI.
//!
//! Each record becomes one stderr line such as
//! `[  0.012s  INFO coffee_ring] sampling circle (80, 60) r 36`.
//! The line layout lives in [`LineFormat`] so it can be written to any sink.

use std::fmt;
use std::io::{self, Write};
use std::str::FromStr;
use std::sync::OnceLock;
use std::time::{Duration, Instant};

use log::{Level, LevelFilter, Log, Metadata, Record};

#[cfg(feature = "tracing")]
use tracing_subscriber::fmt::format::FmtSpan;
#[cfg(feature = "tracing")]
use tracing_subscriber::util::SubscriberInitExt;
#[cfg(feature = "tracing")]
use tracing_subscriber::{fmt as tracing_fmt, EnvFilter};

/// Layout of one log line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LineFormat {
    /// Prefix the seconds since the logger was installed.
    pub elapsed: bool,
    /// Keep the whole module path instead of its crate segment.
    pub full_target: bool,
}

impl Default for LineFormat {
    fn default() -> Self {
        Self {
            elapsed: true,
            full_target: false,
        }
    }
}

impl LineFormat {
    fn target<'a>(&self, target: &'a str) -> &'a str {
        if self.full_target {
            target
        } else {
            target.split("::").next().unwrap_or(target)
        }
    }

    /// Write one line for a record at `level` from `target`.
    pub fn write_line<W: Write>(
        &self,
        out: &mut W,
        since_start: Duration,
        level: Level,
        target: &str,
        message: &fmt::Arguments<'_>,
    ) -> io::Result<()> {
        let target = self.target(target);
        if self.elapsed {
            writeln!(
                out,
                "[{:7.3}s {:>5} {target}] {message}",
                since_start.as_secs_f64(),
                level
            )
        } else {
            writeln!(out, "[{level:>5} {target}] {message}")
        }
    }
}

struct RunLogger {
    filter: LevelFilter,
    format: LineFormat,
    started: Instant,
}

impl Log for RunLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.filter
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let mut err = io::stderr().lock();
        // A closed stderr has nowhere to report to.
        let _ = self.format.write_line(
            &mut err,
            self.started.elapsed(),
            record.level(),
            record.target(),
            record.args(),
        );
    }

    fn flush(&self) {
        let _ = io::stderr().flush();
    }
}

static LOGGER: OnceLock<RunLogger> = OnceLock::new();

/// Install the stderr logger with `filter` and the default line layout.
pub fn init_with_level(filter: LevelFilter) -> Result<(), log::SetLoggerError> {
    init_with_format(filter, LineFormat::default())
}

/// Install the stderr logger with an explicit line layout.
///
/// Only the first successful call takes effect; later calls return `Ok`.
pub fn init_with_format(
    filter: LevelFilter,
    format: LineFormat,
) -> Result<(), log::SetLoggerError> {
    if LOGGER.get().is_some() {
        return Ok(());
    }
    let logger = LOGGER.get_or_init(|| RunLogger {
        filter,
        format,
        started: Instant::now(),
    });
    log::set_logger(logger)?;
    log::set_max_level(filter);
    Ok(())
}

/// Parse a level name (`off`, `error`, ..., `trace`), falling back to `info`.
pub fn level_from_str(s: &str) -> LevelFilter {
    LevelFilter::from_str(s.trim()).unwrap_or(LevelFilter::Info)
}

/// Install a `tracing` subscriber filtered by `RUST_LOG` (default `info`),
/// printing span timings on close. `json` switches to flattened JSON events.
#[cfg(feature = "tracing")]
pub fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_fmt()
        .with_env_filter(filter)
        .with_span_events(FmtSpan::CLOSE);
    let installed = if json {
        builder.json().flatten_event(true).finish().try_init()
    } else {
        builder
            .with_timer(tracing_fmt::time::Uptime::default())
            .finish()
            .try_init()
    };
    if installed.is_err() {
        log::debug!("tracing subscriber already installed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(format: LineFormat, target: &str) -> String {
        let mut out = Vec::new();
        format
            .write_line(
                &mut out,
                Duration::from_millis(1500),
                Level::Warn,
                target,
                &format_args!("ring {} empty", 7),
            )
            .unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn default_line_has_elapsed_and_crate_target() {
        assert_eq!(
            line(LineFormat::default(), "coffee_ring_profile::sampler"),
            "[  1.500s  WARN coffee_ring_profile] ring 7 empty\n"
        );
    }

    #[test]
    fn line_without_elapsed_keeps_full_target() {
        let format = LineFormat {
            elapsed: false,
            full_target: true,
        };
        assert_eq!(
            line(format, "coffee_ring_profile::sampler"),
            "[ WARN coffee_ring_profile::sampler] ring 7 empty\n"
        );
    }

    #[test]
    fn unknown_level_falls_back_to_info() {
        assert_eq!(level_from_str("debug"), LevelFilter::Debug);
        assert_eq!(level_from_str(" WARN "), LevelFilter::Warn);
        assert_eq!(level_from_str("loud"), LevelFilter::Info);
    }
}
