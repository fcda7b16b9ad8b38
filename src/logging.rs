//! Logging setup: colored stderr, plus an optional JSON rolling log file.

use anyhow::{Context, Result};
use std::path::Path;
use tracing::warn;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

/// Opens a daily rolling appender for `log_file_path`, creating its directory.
///
/// # Errors
///
/// Returns an error if the directory cannot be created or the file cannot be opened.
pub fn file_appender(log_file_path: &Path) -> Result<RollingFileAppender> {
    let log_dir = match log_file_path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    let log_file_name = log_file_path
        .file_name()
        .map_or("septa_routes.log".into(), |name| name.to_string_lossy());

    RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(log_file_name)
        .build(log_dir)
        .with_context(|| format!("cannot open log file '{}'", log_file_path.display()))
}

/// Installs the global subscriber.
///
/// The JSON file layer is only added when `log_file_path` is given and can be
/// opened; otherwise logging continues on stderr alone. The returned guard
/// must be held for the life of the program to flush the file layer.
pub fn init(log_file_path: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse()?));

    let mut file_error = None;
    let (json_layer, guard) = match log_file_path.map(file_appender) {
        Some(Ok(appender)) => {
            let (non_blocking_file, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer()
                .json()
                .with_current_span(true)
                .with_span_list(true)
                .with_writer(non_blocking_file)
                .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));
            (Some(layer), Some(guard))
        }
        Some(Err(e)) => {
            file_error = Some(e);
            (None, None)
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    if let Some(e) = file_error {
        warn!(error = %format!("{e:#}"), "File logging disabled");
    }

    Ok(guard)
}
