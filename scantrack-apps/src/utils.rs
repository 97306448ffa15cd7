use std::path::PathBuf;

use tracing::warn;
use tracing_subscriber::EnvFilter;

const SCANTRACK_LOCATOR_CONFIG_ENV_NAME: &str = "SCANTRACK_LOCATOR_CONFIG_PATH";

/// Get locator config from input or env SCANTRACK_LOCATOR_CONFIG_PATH
pub fn get_locator_config(config: Option<PathBuf>) -> Option<PathBuf> {
    if config.is_some() {
        config
    } else {
        std::env::var(SCANTRACK_LOCATOR_CONFIG_ENV_NAME)
            .map(|s| {
                warn!("### ENV VAR {} is used ###", s);
                PathBuf::from(s)
            })
            .ok()
    }
}

/// Installs the global subscriber. `RUST_LOG` overrides the default `info` level.
/// Logs go to stderr so that stdout stays usable for output records.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
