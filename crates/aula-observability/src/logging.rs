use std::fs;
use std::path::Path;

use tracing::{info, warn};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::basic_logging::init_basic_console_logging;

/// Runtime switch: `OBSERVABILITY_ENABLED=false` keeps logging on the console only.
pub fn is_observability_enabled() -> bool {
    std::env::var("OBSERVABILITY_ENABLED")
        .map(|v| !matches!(v.trim().to_ascii_lowercase().as_str(), "false" | "0" | "no"))
        .unwrap_or(true)
}

/// Console plus rolling file logs under `log_dir`:
///
/// - `aula.log`: errors only, plain text
/// - `aula.json`: info and above, one JSON object per line
pub fn init_tracing(log_dir: &Path) {
    if !is_observability_enabled() {
        init_basic_console_logging();
        return;
    }

    if let Err(e) = fs::create_dir_all(log_dir) {
        eprintln!(
            "⚠️  Failed to create log directory {}: {}. Logging to console only.",
            log_dir.display(),
            e
        );
        init_basic_console_logging();
        return;
    }

    let console_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("aula=warn,aula_cache=warn,aula_auth=warn"));

    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .compact()
        .with_filter(console_filter);

    let file_appender = RollingFileAppender::new(Rotation::DAILY, log_dir, "aula.log");

    let file_layer = fmt::layer()
        .with_writer(file_appender)
        .with_target(false)
        .with_file(true)
        .with_line_number(true)
        .with_ansi(false)
        .with_filter(EnvFilter::new("error"));

    let json_appender = RollingFileAppender::new(Rotation::DAILY, log_dir, "aula.json");

    let json_layer = fmt::layer()
        .json()
        .with_writer(json_appender)
        .with_current_span(true)
        .with_span_list(true)
        .with_filter(EnvFilter::new("info"));

    match tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .with(json_layer)
        .try_init()
    {
        Ok(()) => info!(log_dir = %log_dir.display(), "Tracing initialized with file logging"),
        Err(e) => warn!(error = %e, "Tracing subscriber already set"),
    }
}
