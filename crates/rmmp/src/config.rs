//! Layered configuration: built-in defaults, then `config.toml` under the
//! state root, then `RMMP_*` environment variables.

use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::TimeDelta;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use rmmp_fetch::{DEFAULT_CACHE_TTL_HOURS, DEFAULT_DIRECTORY_URL, FallbackOptions};
use serde::{Deserialize, Serialize};

/// Environment variable prefix for configuration keys.
pub const ENV_PREFIX: &str = "RMMP_";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Mirror directory service.
    pub directory_url: String,
    /// Overrides the mirror cache location.
    pub cache_file: Option<PathBuf>,
    /// Overrides where module archives are saved.
    pub downloads_dir: Option<PathBuf>,
    pub cache_ttl_hours: i64,
    pub manifest_timeout_secs: u64,
    pub payload_timeout_secs: u64,
    pub max_mirror_attempts: usize,
}

impl Default for Config {
    fn default() -> Self {
        let fallback = FallbackOptions::default();
        Self {
            directory_url: DEFAULT_DIRECTORY_URL.to_string(),
            cache_file: None,
            downloads_dir: None,
            cache_ttl_hours: DEFAULT_CACHE_TTL_HOURS,
            manifest_timeout_secs: fallback.manifest_timeout.as_secs(),
            payload_timeout_secs: fallback.payload_timeout.as_secs(),
            max_mirror_attempts: fallback.max_mirror_attempts,
        }
    }
}

impl Config {
    pub fn figment(config_file: &Path) -> Figment {
        Figment::from(Serialized::defaults(Config::default()))
            .merge(Toml::file(config_file))
            .merge(Env::prefixed(ENV_PREFIX).ignore(&["root", "log"]))
    }

    /// A missing file is not an error; a malformed one is, and so is a value
    /// that cannot be represented (an out-of-range `cache_ttl_hours`).
    pub fn load(config_file: &Path) -> Result<Self, figment::Error> {
        let config: Config = Self::figment(config_file).extract()?;
        if TimeDelta::try_hours(config.cache_ttl_hours).is_none() {
            return Err(figment::Error::from(format!(
                "cache_ttl_hours = {} is out of range",
                config.cache_ttl_hours
            )));
        }
        Ok(config)
    }

    pub fn fallback_options(&self) -> FallbackOptions {
        FallbackOptions::default()
            .manifest_timeout(Duration::from_secs(self.manifest_timeout_secs))
            .payload_timeout(Duration::from_secs(self.payload_timeout_secs))
            .max_mirror_attempts(self.max_mirror_attempts)
    }

    /// Saturates instead of panicking for values `load` would have rejected.
    pub fn cache_ttl(&self) -> TimeDelta {
        TimeDelta::try_hours(self.cache_ttl_hours).unwrap_or(TimeDelta::MAX)
    }
}
