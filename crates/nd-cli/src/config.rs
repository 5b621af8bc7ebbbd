//! Configuration loading and management.

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Result;
use chrono_tz::Tz;
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};

/// Application configuration.
#[derive(Clone, Serialize, Deserialize)]
pub struct Config {
    /// Path to a CSV export of the food log. When set, it takes priority
    /// over the Airtable API.
    pub csv_path: Option<PathBuf>,

    /// Airtable personal access token.
    pub airtable_api_key: Option<String>,

    /// Airtable base holding the food log.
    pub airtable_base_id: Option<String>,

    /// Table name within the base.
    pub airtable_table: String,

    /// IANA timezone the log's wall-clock dates are written in.
    pub timezone: String,

    /// Where the remote snapshot cache lives.
    pub cache_path: PathBuf,

    /// How long a snapshot stays fresh, in seconds.
    pub cache_ttl_secs: u64,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("csv_path", &self.csv_path)
            .field(
                "airtable_api_key",
                &self.airtable_api_key.as_ref().map(|_| "[REDACTED]"),
            )
            .field("airtable_base_id", &self.airtable_base_id)
            .field("airtable_table", &self.airtable_table)
            .field("timezone", &self.timezone)
            .field("cache_path", &self.cache_path)
            .field("cache_ttl_secs", &self.cache_ttl_secs)
            .finish()
    }
}

impl Default for Config {
    fn default() -> Self {
        let cache_dir = dirs_cache_path().unwrap_or_else(|| PathBuf::from("."));
        Self {
            csv_path: None,
            airtable_api_key: None,
            airtable_base_id: None,
            airtable_table: "Table 1".to_string(),
            timezone: "Asia/Singapore".to_string(),
            cache_path: cache_dir.join("snapshot.json"),
            cache_ttl_secs: 600,
        }
    }
}

impl Config {
    /// Loads configuration from default locations.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load() -> Result<Self, figment::Error> {
        Self::load_from(None)
    }

    /// Loads configuration, optionally from a specific file.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, figment::Error> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Load from default config location
        if let Some(config_dir) = dirs_config_path() {
            figment = figment.merge(Toml::file(config_dir.join("config.toml")));
        }

        // Load from specified config file
        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        // Load from environment variables (ND_*)
        figment = figment.merge(Env::prefixed("ND_"));

        figment.extract()
    }

    /// The reference timezone for day bucketing and the today card.
    pub fn reference_zone(&self) -> Result<Tz> {
        self.timezone.parse::<Tz>().map_err(|_| {
            anyhow::anyhow!("invalid timezone {:?} in configuration", self.timezone)
        })
    }

    /// Snapshot freshness TTL.
    #[must_use]
    pub const fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }
}

/// Returns the platform-specific config directory for nd.
fn dirs_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("nd"))
}

/// Returns the platform-specific cache directory for nd.
///
/// On Linux: `~/.cache/nd`
fn dirs_cache_path() -> Option<PathBuf> {
    dirs::cache_dir().map(|p| p.join("nd"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dirs_cache_path_returns_some() {
        assert!(dirs_cache_path().is_some());
    }

    #[test]
    fn test_dirs_cache_path_ends_with_nd() {
        let path = dirs_cache_path().unwrap();
        assert_eq!(path.file_name().unwrap(), "nd");
    }

    #[test]
    fn test_default_config_values() {
        let config = Config::default();
        assert_eq!(config.csv_path, None);
        assert_eq!(config.airtable_table, "Table 1");
        assert_eq!(config.timezone, "Asia/Singapore");
        assert_eq!(config.cache_ttl_secs, 600);
        assert_eq!(config.cache_path.file_name().unwrap(), "snapshot.json");
    }

    #[test]
    fn test_default_timezone_parses() {
        let config = Config::default();
        assert_eq!(
            config.reference_zone().unwrap(),
            chrono_tz::Asia::Singapore
        );
    }

    #[test]
    fn test_invalid_timezone_is_rejected() {
        let config = Config {
            timezone: "Mars/Olympus_Mons".to_string(),
            ..Config::default()
        };
        assert!(config.reference_zone().is_err());
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let config = Config {
            airtable_api_key: Some("patSecret123".to_string()),
            ..Config::default()
        };
        let debug = format!("{config:?}");
        assert!(!debug.contains("patSecret123"));
        assert!(debug.contains("[REDACTED]"));
    }
}
