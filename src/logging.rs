use tracing_subscriber::EnvFilter;

use crate::config::LoggingSettings;

/// Install the global fmt subscriber (`pretty`, `json`, anything else compact)
///
/// `RUST_LOG` takes precedence over the configured level. Returns `false`
/// when a subscriber was already installed (tests, embedding applications).
pub fn init_tracing(settings: &LoggingSettings) -> bool {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(settings.level.as_str()));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    let installed = match settings.format.as_str() {
        "pretty" => subscriber.pretty().try_init(),
        "json" => subscriber.json().try_init(),
        _ => subscriber.compact().try_init(),
    };

    installed.is_ok()
}
