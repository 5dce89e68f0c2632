// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Configuration for the controller and the RFCOMM transport.
//!
//! Both types deserialize from JSON with every field optional, so a config
//! file only needs to name what differs from the defaults.
//!
//! # Examples
//!
//! ```
//! use wearable_kit::config::WearableConfig;
//!
//! let config = WearableConfig::from_json(r#"{ "name": "wV3_0E0039AF" }"#).unwrap();
//! assert_eq!(config.name, "wV3_0E0039AF");
//! assert!(config.sensor_events);
//!
//! let config = WearableConfig::new("wearable").with_pattern("^wearable");
//! assert_eq!(config.pattern.as_deref(), Some("^wearable"));
//! ```

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::discovery::NamePattern;
use crate::error::ConfigError;

/// Device name used when none is configured.
pub const DEFAULT_DEVICE_NAME: &str = "wV3";

/// RFCOMM channel used by the kit's serial profile.
pub const DEFAULT_CHANNEL: u8 = 1;

/// Default length of the discovery window in seconds.
pub const DEFAULT_DISCOVERY_SECS: u64 = 10;

/// Controller configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WearableConfig {
    /// Exact name of the kit to connect to.
    pub name: String,
    /// Regular expression filtering discovered names.
    ///
    /// When unset, any name containing [`name`](Self::name) (ignoring case)
    /// is accepted.
    pub pattern: Option<String>,
    /// Whether to derive `data:<sensor>` events from raw data.
    pub sensor_events: bool,
}

impl WearableConfig {
    /// Creates a configuration targeting `name`.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Parses a configuration from JSON.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Json` if the document is malformed.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Sets the discovery name pattern.
    #[must_use]
    pub fn with_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = Some(pattern.into());
        self
    }

    /// Enables or disables derived sensor events.
    #[must_use]
    pub fn with_sensor_events(mut self, enabled: bool) -> Self {
        self.sensor_events = enabled;
        self
    }

    /// Builds the discovery filter described by this configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidPattern` if the pattern does not compile.
    pub fn name_pattern(&self) -> Result<NamePattern, ConfigError> {
        match &self.pattern {
            Some(pattern) => NamePattern::new(pattern),
            None => Ok(NamePattern::for_name(&self.name)),
        }
    }
}

impl Default for WearableConfig {
    fn default() -> Self {
        Self {
            name: DEFAULT_DEVICE_NAME.to_string(),
            pattern: None,
            sensor_events: true,
        }
    }
}

/// RFCOMM transport configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RfcommConfig {
    /// Bluetooth adapter name, e.g. `hci0`. The default adapter when unset.
    pub adapter: Option<String>,
    /// RFCOMM channel of the kit.
    pub channel: u8,
    /// How long discovery listens before reporting `Finished`.
    pub discovery_timeout_secs: u64,
}

impl RfcommConfig {
    /// Parses a configuration from JSON and validates it.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the document is malformed or a value is invalid.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Uses a specific adapter.
    #[must_use]
    pub fn with_adapter(mut self, adapter: impl Into<String>) -> Self {
        self.adapter = Some(adapter.into());
        self
    }

    /// Sets the RFCOMM channel.
    #[must_use]
    pub fn with_channel(mut self, channel: u8) -> Self {
        self.channel = channel;
        self
    }

    /// Sets the discovery window.
    #[must_use]
    pub fn with_discovery_timeout(mut self, timeout: Duration) -> Self {
        self.discovery_timeout_secs = timeout.as_secs();
        self
    }

    /// Returns the discovery window.
    #[must_use]
    pub fn discovery_timeout(&self) -> Duration {
        Duration::from_secs(self.discovery_timeout_secs)
    }

    /// Checks value ranges.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` for a channel outside 1-30 or an
    /// empty discovery window.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=30).contains(&self.channel) {
            return Err(ConfigError::InvalidValue {
                field: "channel".to_string(),
                message: format!("{} is not between 1 and 30", self.channel),
            });
        }
        if self.discovery_timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "discovery_timeout_secs".to_string(),
                message: "must be greater than zero".to_string(),
            });
        }
        Ok(())
    }
}

impl Default for RfcommConfig {
    fn default() -> Self {
        Self {
            adapter: None,
            channel: DEFAULT_CHANNEL,
            discovery_timeout_secs: DEFAULT_DISCOVERY_SECS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wearable_defaults() {
        let config = WearableConfig::default();
        assert_eq!(config.name, "wV3");
        assert_eq!(config.pattern, None);
        assert!(config.sensor_events);
    }

    #[test]
    fn wearable_from_empty_json() {
        let config = WearableConfig::from_json("{}").unwrap();
        assert_eq!(config, WearableConfig::default());
    }

    #[test]
    fn wearable_from_json_overrides() {
        let config =
            WearableConfig::from_json(r#"{"name":"wearable","sensor_events":false}"#).unwrap();
        assert_eq!(config.name, "wearable");
        assert!(!config.sensor_events);
    }

    #[test]
    fn wearable_malformed_json() {
        assert!(matches!(
            WearableConfig::from_json("{name"),
            Err(ConfigError::Json(_))
        ));
    }

    #[test]
    fn default_pattern_follows_name() {
        let pattern = WearableConfig::new("wV3").name_pattern().unwrap();
        assert!(pattern.matches("WV3_0E0039AF"));
    }

    #[test]
    fn explicit_pattern_is_used() {
        let pattern = WearableConfig::new("wV3_0E0039AF")
            .with_pattern("^wv3")
            .name_pattern()
            .unwrap();
        assert!(pattern.matches("wV3_1234"));
        assert!(!pattern.matches("old wV3"));
    }

    #[test]
    fn rfcomm_defaults() {
        let config = RfcommConfig::default();
        assert_eq!(config.channel, 1);
        assert_eq!(config.discovery_timeout(), Duration::from_secs(10));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rfcomm_rejects_bad_channel() {
        let err = RfcommConfig::from_json(r#"{"channel":0}"#).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref field, .. } if field == "channel"));
    }

    #[test]
    fn rfcomm_rejects_zero_timeout() {
        let config = RfcommConfig::default().with_discovery_timeout(Duration::from_millis(10));
        assert!(config.validate().is_err());
    }

    #[test]
    fn rfcomm_builder() {
        let config = RfcommConfig::default()
            .with_adapter("hci1")
            .with_channel(3)
            .with_discovery_timeout(Duration::from_secs(4));
        assert_eq!(config.adapter.as_deref(), Some("hci1"));
        assert_eq!(config.channel, 3);
        assert_eq!(config.discovery_timeout_secs, 4);
    }
}
