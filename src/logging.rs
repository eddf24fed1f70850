//! Logging setup.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the global tracing subscriber.
///
/// `RUST_LOG` wins when set. Otherwise the CLI level applies, with the
/// HTTP stack's internals held at `warn` so request noise never drowns
/// out pipeline events.
pub fn setup_logging(level: &str, json: bool) {
    let default_directives = format!("{level},hyper=warn,h2=warn,reqwest=warn,tower=warn");
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directives));

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry
            .with(fmt::layer().json().flatten_event(true))
            .init();
    } else {
        registry
            .with(fmt::layer().compact().with_target(false))
            .init();
    }
}
