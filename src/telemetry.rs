//! Tracing setup

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::LogConfig;

/// Install the global fmt subscriber
///
/// `RUST_LOG` wins over the configured directive. Returns `false` when a
/// subscriber was already installed, which is the normal case in tests.
pub fn init_tracing(config: &LogConfig) -> bool {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.directive));

    let layer = fmt::layer()
        .with_ansi(config.ansi)
        .with_target(config.with_target)
        .with_level(true);

    tracing_subscriber::registry()
        .with(filter)
        .with(layer)
        .try_init()
        .is_ok()
}
