//! # Application configuration in `relivery.toml`
//!
//! Bundled with the web binary and parsed at startup. Every section and key is
//! optional; a missing or empty file gives the production defaults.
//!
//! ```toml
//! [simulation]
//! lookup_delay_ms = 1000          # scan lookup
//! item_delay_ms = 500             # return page item fetch
//! return_submit_delay_ms = 1500
//! suggestion_delay_ms = 1200
//! listing_submit_delay_ms = 1000
//!
//! [auth]
//! recent_login_secs = 300         # window for password change
//!
//! [features]
//! listing_enabled = false
//! ```

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Top-level configuration stored in `relivery.toml`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ReliveryConfig {
    #[serde(default)]
    pub simulation: SimulationConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub features: FeatureConfig,
}

/// Artificial latencies of the mocked backend calls.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    #[serde(default = "default_lookup_delay")]
    pub lookup_delay_ms: u64,
    #[serde(default = "default_item_delay")]
    pub item_delay_ms: u64,
    #[serde(default = "default_return_submit_delay")]
    pub return_submit_delay_ms: u64,
    #[serde(default = "default_suggestion_delay")]
    pub suggestion_delay_ms: u64,
    #[serde(default = "default_listing_submit_delay")]
    pub listing_submit_delay_ms: u64,
}

fn default_lookup_delay() -> u64 {
    1000
}

fn default_item_delay() -> u64 {
    500
}

fn default_return_submit_delay() -> u64 {
    1500
}

fn default_suggestion_delay() -> u64 {
    1200
}

fn default_listing_submit_delay() -> u64 {
    1000
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            lookup_delay_ms: default_lookup_delay(),
            item_delay_ms: default_item_delay(),
            return_submit_delay_ms: default_return_submit_delay(),
            suggestion_delay_ms: default_suggestion_delay(),
            listing_submit_delay_ms: default_listing_submit_delay(),
        }
    }
}

impl SimulationConfig {
    pub fn lookup_delay(&self) -> Duration {
        Duration::from_millis(self.lookup_delay_ms)
    }

    pub fn item_delay(&self) -> Duration {
        Duration::from_millis(self.item_delay_ms)
    }

    pub fn return_submit_delay(&self) -> Duration {
        Duration::from_millis(self.return_submit_delay_ms)
    }

    pub fn suggestion_delay(&self) -> Duration {
        Duration::from_millis(self.suggestion_delay_ms)
    }

    pub fn listing_submit_delay(&self) -> Duration {
        Duration::from_millis(self.listing_submit_delay_ms)
    }
}

/// Identity settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AuthConfig {
    /// How long after signing in sensitive operations stay allowed.
    #[serde(default = "default_recent_login")]
    pub recent_login_secs: u64,
}

fn default_recent_login() -> u64 {
    300
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            recent_login_secs: default_recent_login(),
        }
    }
}

impl AuthConfig {
    pub fn recent_login(&self) -> Duration {
        Duration::from_secs(self.recent_login_secs)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FeatureConfig {
    /// Shows the listing form at `/list-item` instead of the disabled notice.
    #[serde(default)]
    pub listing_enabled: bool,
}

impl ReliveryConfig {
    /// Same configuration with every simulated delay set to zero.
    pub fn instant(mut self) -> Self {
        self.simulation = SimulationConfig {
            lookup_delay_ms: 0,
            item_delay_ms: 0,
            return_submit_delay_ms: 0,
            suggestion_delay_ms: 0,
            listing_submit_delay_ms: 0,
        };
        self
    }

    /// Builder method to toggle the listing form.
    pub fn with_listing_enabled(mut self, enabled: bool) -> Self {
        self.features.listing_enabled = enabled;
        self
    }

    /// The well-known filename for the config file.
    pub fn filename() -> &'static str {
        "relivery.toml"
    }

    /// Parse from TOML string.
    pub fn from_toml(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }

    /// Serialize to TOML string.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_is_default() {
        let config = ReliveryConfig::from_toml("").unwrap();
        assert_eq!(config, ReliveryConfig::default());
        assert_eq!(config.simulation.lookup_delay(), Duration::from_secs(1));
        assert_eq!(config.auth.recent_login_secs, 300);
        assert!(!config.features.listing_enabled);
    }

    #[test]
    fn test_shipped_web_config_matches_defaults() {
        let shipped = include_str!("../../web/relivery.toml");
        let config = ReliveryConfig::from_toml(shipped).unwrap();
        assert_eq!(config, ReliveryConfig::default());
    }

    #[test]
    fn test_partial_section_keeps_other_defaults() {
        let config = ReliveryConfig::from_toml(
            "[simulation]\nlookup_delay_ms = 10\n\n[features]\nlisting_enabled = true\n",
        )
        .unwrap();
        assert_eq!(config.simulation.lookup_delay_ms, 10);
        assert_eq!(config.simulation.return_submit_delay_ms, 1500);
        assert!(config.features.listing_enabled);
    }

    #[test]
    fn test_toml_roundtrip() {
        let config = ReliveryConfig::default().instant().with_listing_enabled(true);
        let text = config.to_toml().unwrap();
        assert_eq!(ReliveryConfig::from_toml(&text).unwrap(), config);
    }
}
