//! Log setup for the binaries.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Builds the filter for `default_level`; a set RUST_LOG replaces it.
pub fn env_filter(default_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level))
}

/// Installs a console subscriber. Safe to call more than once; only the
/// first call has any effect.
pub fn init_logging(default_level: &str) {
    let console_layer = fmt::layer()
        .with_target(true)
        .with_level(true)
        .with_timer(fmt::time::uptime());

    let result = tracing_subscriber::registry()
        .with(env_filter(default_level))
        .with(console_layer)
        .try_init();

    if result.is_err() {
        tracing::debug!("Logging was already initialized");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_from_level() {
        let filter_str = env_filter("debug,rust_eclipse::model=trace").to_string();
        match std::env::var("RUST_LOG").map(EnvFilter::try_new) {
            Ok(Ok(from_env)) => assert_eq!(filter_str, from_env.to_string()),
            _ => {
                assert!(filter_str.contains("rust_eclipse::model=trace"));
                assert!(filter_str.contains("debug"));
            }
        }
    }

    #[test]
    fn test_init_twice() {
        init_logging("warn");
        init_logging("info");
    }
}
