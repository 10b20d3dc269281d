//! Logging initialisation via tracing-subscriber.

use tracing_subscriber::EnvFilter;

/// Install the global subscriber, writing to stderr.
///
/// With `debug` the level is forced to `debug`; otherwise `RUST_LOG` is
/// honoured and falls back to `warn`.
pub fn init(debug: bool) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let filter = if debug {
        EnvFilter::try_new("debug")?
    } else {
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("warn"))?
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(debug)
        .try_init()
}
