// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Wearable controller builder.

use crate::config::WearableConfig;
use crate::error::Error;
use crate::transport::{Notifications, Transport};
use crate::wearable::Wearable;

/// Builder for [`Wearable`] controllers.
///
/// Created with [`Wearable::builder`]. Settings start from
/// [`WearableConfig::default`], targeting a kit named `wV3`.
///
/// # Examples
///
/// ```no_run
/// # #[cfg(feature = "rfcomm")]
/// # async fn example() -> wearable_kit::Result<()> {
/// use wearable_kit::Wearable;
/// use wearable_kit::config::{RfcommConfig, WearableConfig};
/// use wearable_kit::transport::{RfcommTransport, notification_channel};
///
/// let (notifier, notifications) = notification_channel();
/// let transport = RfcommTransport::new(RfcommConfig::default(), notifier).await?;
///
/// let config = WearableConfig::from_json(r#"{"name": "wV3", "pattern": "^wv3"}"#)?;
/// let kit = Wearable::builder(transport, notifications)
///     .with_config(config)
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct WearableBuilder<T> {
    transport: T,
    notifications: Notifications,
    config: WearableConfig,
}

impl<T: Transport> WearableBuilder<T> {
    pub(crate) fn new(transport: T, notifications: Notifications) -> Self {
        Self {
            transport,
            notifications,
            config: WearableConfig::default(),
        }
    }

    /// Replaces every setting with `config`.
    #[must_use]
    pub fn with_config(mut self, config: WearableConfig) -> Self {
        self.config = config;
        self
    }

    /// Sets the exact name of the kit to connect to.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.config.name = name.into();
        self
    }

    /// Sets a regular expression filtering discovered names.
    #[must_use]
    pub fn with_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.config = self.config.with_pattern(pattern);
        self
    }

    /// Enables or disables derived `data:<sensor>` events.
    #[must_use]
    pub fn with_sensor_events(mut self, enabled: bool) -> Self {
        self.config = self.config.with_sensor_events(enabled);
        self
    }

    /// Returns the configuration built so far.
    #[must_use]
    pub fn config(&self) -> &WearableConfig {
        &self.config
    }

    /// Builds the controller.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` if the name pattern is not a valid regular
    /// expression.
    pub fn build(self) -> Result<Wearable<T>, Error> {
        let pattern = self.config.name_pattern()?;
        tracing::debug!(
            device = %self.config.name,
            pattern = %pattern.as_str(),
            "Building wearable controller"
        );
        Ok(Wearable::from_parts(
            self.transport,
            self.notifications,
            self.config.name,
            pattern,
            self.config.sensor_events,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TransportError;
    use crate::state::ConnectionPhase;
    use crate::transport::notification_channel;

    struct IdleTransport;

    impl Transport for IdleTransport {
        async fn start_discovery(&self) -> Result<(), TransportError> {
            Ok(())
        }

        async fn find_channel(&self, _address: &str) -> Result<u8, TransportError> {
            Ok(1)
        }

        async fn connect(&self, _address: &str, _channel: u8) -> Result<(), TransportError> {
            Ok(())
        }

        async fn close(&self) {}

        async fn write(&self, _bytes: &[u8]) -> Result<(), TransportError> {
            Err(TransportError::NotOpen)
        }

        fn is_open(&self) -> bool {
            false
        }
    }

    #[test]
    fn defaults_target_wv3() {
        let (_notifier, notifications) = notification_channel();
        let kit = Wearable::builder(IdleTransport, notifications)
            .build()
            .unwrap();

        assert_eq!(kit.target_name(), "wV3");
        assert_eq!(kit.phase(), ConnectionPhase::Idle);
        assert!(kit.known_devices().is_empty());
        assert!(!kit.is_connected());
    }

    #[test]
    fn with_name_overrides_config() {
        let (_notifier, notifications) = notification_channel();
        let kit = Wearable::builder(IdleTransport, notifications)
            .with_config(WearableConfig::new("first"))
            .with_name("second")
            .build()
            .unwrap();

        assert_eq!(kit.target_name(), "second");
    }

    #[test]
    fn invalid_pattern_is_rejected() {
        let (_notifier, notifications) = notification_channel();
        let result = Wearable::builder(IdleTransport, notifications)
            .with_pattern("wV3(")
            .build();

        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn builder_exposes_config() {
        let (_notifier, notifications) = notification_channel();
        let builder = Wearable::builder(IdleTransport, notifications).with_sensor_events(false);

        assert!(!builder.config().sensor_events);
        assert_eq!(builder.config().name, "wV3");
    }
}
