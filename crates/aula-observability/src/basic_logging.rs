use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize basic console logging.
///
/// Used by the CLI by default and as the fallback when file logging is
/// disabled.
///
/// # Configuration
///
/// - **Log Level**: Controlled by `LOG_LEVEL` environment variable (default: "warn")
/// - **Filtering**: `RUST_LOG` overrides everything when set
/// - **Output**: stderr, so command output on stdout stays clean
pub fn init_basic_console_logging() {
    let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| "warn".to_string());

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "aula={log_level},aula_cache={log_level},aula_auth={log_level},reqwest=warn,hyper=warn"
        ))
    });

    let console_layer = fmt::layer()
        .compact()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_file(false)
        .with_line_number(false)
        .with_filter(env_filter);

    // try_init: tests and embedding apps may already have a subscriber
    let _ = tracing_subscriber::registry().with(console_layer).try_init();
}
