//! Configuration for the settings synchronization module

use serde::Deserialize;
use std::time::Duration;

/// Settings synchronization configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// How long a cached snapshot stays valid
    #[serde(default = "default_cache_ttl", with = "humantime_serde")]
    pub cache_ttl: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cache_ttl: default_cache_ttl(),
        }
    }
}

fn default_cache_ttl() -> Duration {
    Duration::from_secs(10 * 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ttl_accepts_humantime_strings() {
        let config: Config = serde_json::from_value(serde_json::json!({ "cache_ttl": "90s" }))
            .expect("deserialize failed");
        assert_eq!(config.cache_ttl, Duration::from_secs(90));
    }

    #[test]
    fn ttl_defaults_to_ten_minutes() {
        assert_eq!(Config::default().cache_ttl, Duration::from_secs(600));
    }
}
