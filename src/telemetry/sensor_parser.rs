// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Parser turning raw kit replies into sensor readings.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::Sensor;

/// A reply attributed to a sensor query.
///
/// The attribution is the most recent query sent before the reply arrived,
/// so it is only reliable when queries are not interleaved.
///
/// # Examples
///
/// ```
/// use wearable_kit::telemetry::SensorReading;
/// use wearable_kit::types::Sensor;
///
/// let reading = SensorReading::parse(Sensor::Temperature, "T:23.5\r\n");
/// assert_eq!(reading.value, Some(23.5));
/// assert_eq!(reading.raw, "T:23.5\r\n");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorReading {
    /// The sensor the reply is attributed to.
    pub sensor: Sensor,
    /// The decoded reply, verbatim.
    pub raw: String,
    /// First number found in the reply, if any.
    pub value: Option<f64>,
    /// When the reply was received.
    pub received_at: DateTime<Utc>,
}

impl SensorReading {
    /// Builds a reading from a decoded reply, stamped with the current time.
    #[must_use]
    pub fn parse(sensor: Sensor, raw: &str) -> Self {
        Self {
            sensor,
            raw: raw.to_string(),
            value: parse_value(raw),
            received_at: Utc::now(),
        }
    }

    /// Returns the `data:<sensor>` event name for this reading.
    #[must_use]
    pub fn event_name(&self) -> String {
        format!("data:{}", self.sensor.name())
    }
}

/// Extracts the first decimal number from a reply.
///
/// # Examples
///
/// ```
/// use wearable_kit::telemetry::parse_value;
///
/// assert_eq!(parse_value("512"), Some(512.0));
/// assert_eq!(parse_value("X=-3.25;"), Some(-3.25));
/// assert_eq!(parse_value("OK"), None);
/// ```
#[must_use]
pub fn parse_value(raw: &str) -> Option<f64> {
    raw.split(|c: char| !(c.is_ascii_digit() || matches!(c, '.' | '-' | '+')))
        .filter(|token| token.chars().any(|c| c.is_ascii_digit()))
        .find_map(|token| token.parse::<f64>().ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Axis;

    #[test]
    fn parse_plain_number() {
        assert_eq!(parse_value("23"), Some(23.0));
        assert_eq!(parse_value(" 23.75\n"), Some(23.75));
    }

    #[test]
    fn parse_labelled_number() {
        assert_eq!(parse_value("TEMP:21.5C"), Some(21.5));
        assert_eq!(parse_value("lum=800"), Some(800.0));
    }

    #[test]
    fn parse_negative_number() {
        assert_eq!(parse_value("-12"), Some(-12.0));
    }

    #[test]
    fn parse_takes_first_number() {
        assert_eq!(parse_value("10,20,30"), Some(10.0));
    }

    #[test]
    fn parse_without_number() {
        assert_eq!(parse_value(""), None);
        assert_eq!(parse_value("---"), None);
        assert_eq!(parse_value("ready"), None);
    }

    #[test]
    fn reading_event_name() {
        let reading = SensorReading::parse(Sensor::Accelerometer(Axis::X), "5");
        assert_eq!(reading.event_name(), "data:accelerometer");
        assert_eq!(reading.value, Some(5.0));
    }

    #[test]
    fn reading_keeps_raw_text() {
        let reading = SensorReading::parse(Sensor::Luminosity, "dark");
        assert_eq!(reading.raw, "dark");
        assert_eq!(reading.value, None);
    }
}
