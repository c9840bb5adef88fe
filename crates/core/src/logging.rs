//! Tracing subscriber setup

use tracing_subscriber::EnvFilter;

use crate::config::CoreConfig;

/// Filter directives for a config
///
/// `debug = true` wins over `log_filter`.
pub fn filter_directives(config: &CoreConfig) -> &str {
    if config.debug {
        "debug"
    } else {
        &config.log_filter
    }
}

/// Install the global fmt subscriber
///
/// `RUST_LOG` takes precedence over the config. Calling this again after a
/// subscriber is installed does nothing.
pub fn init(config: &CoreConfig) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(filter_directives(config)))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_overrides_filter() {
        let config = CoreConfig {
            debug: true,
            log_filter: "warn".to_string(),
            ..CoreConfig::default()
        };
        assert_eq!(filter_directives(&config), "debug");
    }

    #[test]
    fn test_configured_filter() {
        let config = CoreConfig {
            log_filter: "warn,sprust_core::registry=trace".to_string(),
            ..CoreConfig::default()
        };
        assert_eq!(filter_directives(&config), "warn,sprust_core::registry=trace");
    }

    #[test]
    fn test_init_is_idempotent() {
        let config = CoreConfig::default();
        init(&config);
        init(&config);
    }
}
