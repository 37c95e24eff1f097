//! Environment-variable configuration.

use std::{env, fmt::Display, path::PathBuf, str::FromStr};

use tracing::{info, warn};

/// Server configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Socket address to bind
    pub bind: String,

    /// Root directory of the document store
    pub data_dir: PathBuf,
}

impl Config {
    /// Load configuration from the environment, falling back to defaults.
    pub fn load() -> Self {
        Self {
            bind: try_load("GRADPLAN_BIND", "127.0.0.1:8080"),
            data_dir: try_load("GRADPLAN_DATA_DIR", ".gradplan"),
        }
    }
}

fn try_load<T: FromStr>(key: &str, default: &str) -> T
where
    T::Err: Display,
{
    env::var(key)
        .unwrap_or_else(|_| {
            info!("{key} not set, using default: {default}");
            default.to_string()
        })
        .parse()
        .map_err(|e| {
            warn!("Invalid {key} value: {e}");
        })
        .expect("Environment misconfigured!")
}
