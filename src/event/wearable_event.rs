// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Wearable event types.

use crate::discovery::DiscoveredDevice;
use crate::telemetry::SensorReading;

/// Events emitted by the [`Wearable`](crate::Wearable) controller.
///
/// [`name`](Self::name) gives the string form used by listeners that key on
/// event names (`connected`, `data:temperature`, ...).
///
/// # Examples
///
/// ```
/// use wearable_kit::event::WearableEvent;
///
/// let event = WearableEvent::error("connection refused");
/// assert_eq!(event.name(), "error");
/// assert_eq!(event.message(), Some("connection refused"));
///
/// assert_eq!(WearableEvent::data("23.5").name(), "data");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum WearableEvent {
    /// Discovery finished and at least one device matched.
    Found {
        /// The matching devices.
        devices: Vec<DiscoveredDevice>,
    },

    /// The kit is connected and ready for commands.
    Connected,

    /// The kit was disconnected.
    Disconnected,

    /// Something failed.
    Error {
        /// Human-readable description.
        message: String,
    },

    /// Text received from the kit, verbatim.
    Data {
        /// The decoded text.
        text: String,
    },

    /// Text received from the kit, attributed to the last sensor query.
    SensorData(SensorReading),
}

impl WearableEvent {
    /// Creates an error event.
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self::Error {
            message: message.into(),
        }
    }

    /// Creates a data event.
    #[must_use]
    pub fn data(text: impl Into<String>) -> Self {
        Self::Data { text: text.into() }
    }

    /// Returns the event name, e.g. `"connected"` or `"data:luminosity"`.
    #[must_use]
    pub fn name(&self) -> String {
        match self {
            Self::Found { .. } => "found".to_string(),
            Self::Connected => "connected".to_string(),
            Self::Disconnected => "disconnected".to_string(),
            Self::Error { .. } => "error".to_string(),
            Self::Data { .. } => "data".to_string(),
            Self::SensorData(reading) => reading.event_name(),
        }
    }

    /// Returns the error message of an error event.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Error { message } => Some(message),
            _ => None,
        }
    }

    /// Returns `true` for `connected` and `disconnected`.
    #[must_use]
    pub fn is_connection(&self) -> bool {
        matches!(self, Self::Connected | Self::Disconnected)
    }

    /// Returns `true` for `data` and `data:<sensor>`.
    #[must_use]
    pub fn is_data(&self) -> bool {
        matches!(self, Self::Data { .. } | Self::SensorData(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Sensor;

    #[test]
    fn names() {
        assert_eq!(WearableEvent::Found { devices: vec![] }.name(), "found");
        assert_eq!(WearableEvent::Connected.name(), "connected");
        assert_eq!(WearableEvent::Disconnected.name(), "disconnected");
        assert_eq!(WearableEvent::error("x").name(), "error");
        assert_eq!(WearableEvent::data("x").name(), "data");

        let reading = SensorReading::parse(Sensor::Temperature, "20");
        assert_eq!(WearableEvent::SensorData(reading).name(), "data:temperature");
    }

    #[test]
    fn message_only_on_errors() {
        assert_eq!(WearableEvent::error("boom").message(), Some("boom"));
        assert_eq!(WearableEvent::Connected.message(), None);
    }

    #[test]
    fn classification() {
        assert!(WearableEvent::Connected.is_connection());
        assert!(WearableEvent::Disconnected.is_connection());
        assert!(!WearableEvent::data("1").is_connection());

        assert!(WearableEvent::data("1").is_data());
        assert!(!WearableEvent::error("e").is_data());
    }
}
