//! Tracing subscriber bootstrap: console sink plus an optional rolling file.

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry, fmt};

use crate::config::{LogFileConfig, LogFormat, LogRotation, LoggingConfig};

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Keeps the file writer alive; dropping it flushes buffered lines.
#[must_use = "dropping the guard stops file logging"]
pub struct LoggingGuard {
    _file: Option<WorkerGuard>,
}

/// `RUST_LOG` wins over the configured directive.
fn console_filter(level: &str) -> Result<EnvFilter> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => EnvFilter::try_new(level)
            .with_context(|| format!("invalid logging.level '{level}'")),
    }
}

fn rotation(r: LogRotation) -> Rotation {
    match r {
        LogRotation::Minutely => Rotation::MINUTELY,
        LogRotation::Hourly => Rotation::HOURLY,
        LogRotation::Daily => Rotation::DAILY,
        LogRotation::Never => Rotation::NEVER,
    }
}

fn file_layer(cfg: &LogFileConfig, console_level: &str) -> Result<(BoxedLayer, WorkerGuard)> {
    std::fs::create_dir_all(&cfg.dir)
        .with_context(|| format!("cannot create log directory {}", cfg.dir.display()))?;
    let appender = RollingFileAppender::new(rotation(cfg.rotation), &cfg.dir, &cfg.prefix);
    let (writer, guard) = tracing_appender::non_blocking(appender);
    let level = cfg.level.as_deref().unwrap_or(console_level);
    let filter = EnvFilter::try_new(level)
        .with_context(|| format!("invalid logging.file.level '{level}'"))?;
    let layer = fmt::layer()
        .json()
        .with_ansi(false)
        .with_writer(writer)
        .with_filter(filter)
        .boxed();
    Ok((layer, guard))
}

/// Install the global subscriber.
///
/// # Errors
/// Fails on an invalid filter directive, an unwritable log directory, or when
/// a global subscriber is already set.
pub fn init(cfg: &LoggingConfig) -> Result<LoggingGuard> {
    let console_filter = console_filter(&cfg.level)?;
    let mut layers: Vec<BoxedLayer> = Vec::with_capacity(2);

    let console = match cfg.format {
        LogFormat::Text => fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_filter(console_filter)
            .boxed(),
        LogFormat::Json => fmt::layer()
            .json()
            .with_current_span(true)
            .with_writer(std::io::stderr)
            .with_filter(console_filter)
            .boxed(),
    };
    layers.push(console);

    let file_guard = match &cfg.file {
        Some(file_cfg) => {
            let (layer, guard) = file_layer(file_cfg, &cfg.level)?;
            layers.push(layer);
            Some(guard)
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(layers)
        .try_init()
        .context("a global tracing subscriber is already installed")?;

    Ok(LoggingGuard { _file: file_guard })
}
