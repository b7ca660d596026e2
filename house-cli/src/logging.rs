//! Console and file logging for the `igethouse` binary.
//!
//! [`init_default_logging`] installs one global subscriber with two outputs:
//! stderr, so command output on stdout stays clean, and an optional log file
//! that can be attached after startup. The filter and the console gate can
//! both be swapped at runtime.

use std::fmt;
use std::fs::File;
use std::io::{self, IsTerminal, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, OnceLock, PoisonError};

use chrono::Local;
use thiserror::Error;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::filter::ParseError;
use tracing_subscriber::fmt::format::{FormatEvent, FormatFields, Writer};
use tracing_subscriber::fmt::{FmtContext, MakeWriter};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, reload};

use crate::config::LoggingConfig;

const DEFAULT_FILTER: &str = "info";

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("logging is not initialised")]
    NotInitialized,

    #[error("invalid log filter '{directive}'")]
    InvalidFilter {
        directive: String,
        #[source]
        source: ParseError,
    },

    #[error("cannot swap log filter")]
    Reload(#[from] reload::Error),

    #[error("cannot open log file '{}'", path.display())]
    LogFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

// ── line format ──────────────────────────────────────────────────────────

/// `2026-03-01 09:30:00.125  INFO house_core::wizard: message key=value`
struct HouseLine;

fn level_style(level: &Level) -> &'static str {
    match *level {
        Level::ERROR => "1;31",
        Level::WARN => "1;33",
        Level::INFO => "1;32",
        Level::DEBUG => "1;34",
        Level::TRACE => "1;35",
    }
}

/// Writes `text`, wrapped in the SGR `style` when `ansi` is set.
fn paint(
    writer: &mut Writer<'_>,
    ansi: bool,
    style: &str,
    text: impl fmt::Display,
) -> fmt::Result {
    if ansi {
        write!(writer, "\x1b[{style}m{text}\x1b[0m")
    } else {
        write!(writer, "{text}")
    }
}

impl<S, N> FormatEvent<S, N> for HouseLine
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let meta = event.metadata();
        let ansi = writer.has_ansi_escapes();

        paint(&mut writer, ansi, "2", Local::now().format("%Y-%m-%d %H:%M:%S%.3f"))?;
        write!(writer, " ")?;
        paint(
            &mut writer,
            ansi,
            level_style(meta.level()),
            format_args!("{:>5}", meta.level()),
        )?;
        write!(writer, " ")?;
        paint(&mut writer, ansi, "36", meta.target())?;
        write!(writer, ": ")?;

        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

// ── log file ─────────────────────────────────────────────────────────────

/// Log file attached after the subscriber is installed. Lines written while
/// nothing is attached are dropped.
#[derive(Clone, Default)]
struct LogFileSink(Arc<Mutex<Option<File>>>);

impl LogFileSink {
    fn lock(&self) -> MutexGuard<'_, Option<File>> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn attach(
        &self,
        file: File,
    ) {
        *self.lock() = Some(file);
    }
}

struct SinkGuard<'a>(MutexGuard<'a, Option<File>>);

impl Write for SinkGuard<'_> {
    fn write(
        &mut self,
        buf: &[u8],
    ) -> io::Result<usize> {
        match self.0.as_mut() {
            Some(file) => file.write(buf),
            None => Ok(buf.len()),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self.0.as_mut() {
            Some(file) => file.flush(),
            None => Ok(()),
        }
    }
}

impl<'a> MakeWriter<'a> for LogFileSink {
    type Writer = SinkGuard<'a>;

    fn make_writer(&'a self) -> Self::Writer {
        SinkGuard(self.lock())
    }
}

// ── runtime controls ─────────────────────────────────────────────────────

type Swap = Box<dyn Fn(EnvFilter) -> Result<(), reload::Error> + Send + Sync>;

struct Controls {
    swap_filter: Swap,
    swap_console_gate: Swap,
    log_file: LogFileSink,
}

static CONTROLS: OnceLock<Controls> = OnceLock::new();

fn controls() -> Result<&'static Controls, LoggingError> {
    CONTROLS.get().ok_or(LoggingError::NotInitialized)
}

/// Replaces the active filter. Takes a bare level (`warn`) or any
/// `EnvFilter` directive (`house_core=debug,sqlx=warn`).
pub fn set_log_level(directive: &str) -> Result<(), LoggingError> {
    let filter = EnvFilter::try_new(directive).map_err(|source| LoggingError::InvalidFilter {
        directive: directive.to_string(),
        source,
    })?;
    (controls()?.swap_filter)(filter)?;
    Ok(())
}

/// Shows or hides console lines. The log file is unaffected.
pub fn set_console_enabled(enabled: bool) -> Result<(), LoggingError> {
    let gate = EnvFilter::new(if enabled { "trace" } else { "off" });
    (controls()?.swap_console_gate)(gate)?;
    Ok(())
}

/// Appends log lines to `path`, replacing any file already attached.
pub fn enable_file_logging(path: &Path) -> Result<(), LoggingError> {
    let controls = controls()?;
    let file = File::options()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|source| LoggingError::LogFile {
            path: path.to_path_buf(),
            source,
        })?;
    controls.log_file.attach(file);
    Ok(())
}

/// Applies a `[logging]` section on top of the installed subscriber.
pub fn apply(config: &LoggingConfig) -> Result<(), LoggingError> {
    if let Some(level) = &config.level {
        set_log_level(level)?;
    }
    if config.quiet {
        set_console_enabled(false)?;
    }
    if let Some(path) = &config.file {
        enable_file_logging(path)?;
    }
    Ok(())
}

/// Installs the global subscriber. Only the first call has any effect.
///
/// The starting filter is `RUST_LOG` when set, otherwise `info`.
pub fn init_default_logging() {
    let log_file = LogFileSink::default();
    let (filter, filter_handle) = reload::Layer::new(
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER)),
    );
    let (console_gate, console_handle) = reload::Layer::new(EnvFilter::new("trace"));

    let console = tracing_subscriber::fmt::layer()
        .event_format(HouseLine)
        .with_ansi(io::stderr().is_terminal())
        .with_writer(io::stderr)
        .with_filter(console_gate);
    let file = tracing_subscriber::fmt::layer()
        .event_format(HouseLine)
        .with_ansi(false)
        .with_writer(log_file.clone());

    let installed = tracing_subscriber::registry()
        .with(filter)
        .with(console)
        .with(file)
        .try_init();

    if installed.is_ok() {
        let _ = CONTROLS.set(Controls {
            swap_filter: Box::new(move |f: EnvFilter| filter_handle.reload(f)),
            swap_console_gate: Box::new(move |f: EnvFilter| console_handle.reload(f)),
            log_file,
        });
    }
}
