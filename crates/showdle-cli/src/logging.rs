use showdle_core::Config;
use tracing_subscriber::EnvFilter;

/// Log to stderr, filtered by `RUST_LOG` or else `log.level` from the config.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = Config::load_or_default().log.level;
        EnvFilter::try_new(&level).unwrap_or_else(|_| EnvFilter::new("info"))
    });

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
