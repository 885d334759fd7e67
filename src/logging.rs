use tracing_subscriber::EnvFilter;

use crate::config::LoggingSettings;

/// Initialize the global tracing subscriber
///
/// `RUST_LOG` wins over the configured level when set. Format `pretty` gives
/// multi-line human output; anything else is the compact single-line form.
pub fn init_tracing(settings: &LoggingSettings) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_level(true);

    // A subscriber may already be installed (tests); keep the existing one
    let _ = if settings.format == "pretty" {
        subscriber.pretty().try_init()
    } else {
        subscriber.compact().try_init()
    };
}
