use tracing::level_filters::LevelFilter;

/// Installs the global tracing subscriber writing to stderr.
///
/// `RUST_LOG` is honoured; `default_directive` is layered on top. An
/// unparsable directive falls back to warnings only.
pub fn init_tracing(default_directive: &str) {
    use tracing_subscriber::{fmt, EnvFilter};

    let directive = default_directive
        .parse()
        .unwrap_or_else(|_| LevelFilter::WARN.into());
    let filter = EnvFilter::from_default_env().add_directive(directive);

    let _ = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
