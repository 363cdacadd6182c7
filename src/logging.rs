//! Logging setup: a quiet stderr layer, plus a JSON rolling log file when
//! `LOG_FILE_PATH` is set.

use std::ffi::OsStr;
use std::io;
use std::path::Path;

use anyhow::Result;
use tracing::warn;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{
    EnvFilter, Layer,
    filter::Directive,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

pub const LOG_FILE_ENV: &str = "LOG_FILE_PATH";

/// Builds a daily-rotating appender for `log_file_path`, creating its
/// directory if needed.
///
/// # Errors
///
/// Fails if the directory cannot be created or the file cannot be opened.
pub fn open_log_file(log_file_path: &Path) -> Result<RollingFileAppender> {
    let log_dir = log_file_path
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    let file_name = log_file_path
        .file_name()
        .and_then(OsStr::to_str)
        .unwrap_or("bikeshare_explorer.log");

    let appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(file_name)
        .build(log_dir)?;
    Ok(appender)
}

/// Installs the global subscriber.
///
/// Nothing is written to disk unless `LOG_FILE_PATH` is set. If the log file
/// cannot be opened the failure is logged to stderr and the session goes on.
/// The returned guard must live until exit so buffered file logs get flushed.
pub fn init() -> Result<Option<WorkerGuard>> {
    let mut file_error = None;
    let file_writer = match std::env::var(LOG_FILE_ENV) {
        Ok(path) => match open_log_file(Path::new(&path)) {
            Ok(appender) => Some(tracing_appender::non_blocking(appender)),
            Err(e) => {
                file_error = Some((path, e));
                None
            }
        },
        Err(_) => None,
    };

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("warn".parse()?));

    let json_directive: Directive = "debug".parse()?;
    let (json_layer, guard) = match file_writer {
        Some((writer, guard)) => {
            let layer = fmt::layer()
                .json()
                .with_current_span(true)
                .with_span_list(true)
                .with_writer(writer)
                .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive(json_directive));
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    if let Some((path, e)) = file_error {
        warn!(path = %path, error = %e, "Could not open log file, logging to stderr only");
    }

    Ok(guard)
}
