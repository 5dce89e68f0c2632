// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Latest known sensor values.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::SensorReading;
use crate::types::{Axis, Sensor};

/// Latest value per accelerometer axis.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AccelerometerSample {
    /// X axis.
    pub x: Option<f64>,
    /// Y axis.
    pub y: Option<f64>,
    /// Z axis.
    pub z: Option<f64>,
}

impl AccelerometerSample {
    /// Returns the value of one axis.
    #[must_use]
    pub const fn axis(&self, axis: Axis) -> Option<f64> {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
            Axis::Z => self.z,
        }
    }

    fn set(&mut self, axis: Axis, value: f64) {
        match axis {
            Axis::X => self.x = Some(value),
            Axis::Y => self.y = Some(value),
            Axis::Z => self.z = Some(value),
        }
    }

    /// Returns `true` once all three axes have a value.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.x.is_some() && self.y.is_some() && self.z.is_some()
    }
}

/// Latest values received from the kit's sensors.
///
/// # Examples
///
/// ```
/// use wearable_kit::telemetry::{SensorReading, SensorSnapshot};
/// use wearable_kit::types::Sensor;
///
/// let mut snapshot = SensorSnapshot::default();
/// snapshot.apply(&SensorReading::parse(Sensor::Temperature, "24"));
///
/// assert_eq!(snapshot.temperature, Some(24.0));
/// assert_eq!(snapshot.luminosity, None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SensorSnapshot {
    /// Last temperature.
    pub temperature: Option<f64>,
    /// Last luminosity.
    pub luminosity: Option<f64>,
    /// Last accelerometer values.
    pub accelerometer: AccelerometerSample,
    /// Time of the last applied reading.
    pub updated_at: Option<DateTime<Utc>>,
}

impl SensorSnapshot {
    /// Records a reading.
    ///
    /// Returns `true` if the reading carried a value and the snapshot changed.
    pub fn apply(&mut self, reading: &SensorReading) -> bool {
        let Some(value) = reading.value else {
            return false;
        };

        match reading.sensor {
            Sensor::Temperature => self.temperature = Some(value),
            Sensor::Luminosity => self.luminosity = Some(value),
            Sensor::Accelerometer(axis) => self.accelerometer.set(axis, value),
        }
        self.updated_at = Some(reading.received_at);
        true
    }

    /// Returns the latest value of a sensor.
    #[must_use]
    pub const fn value(&self, sensor: Sensor) -> Option<f64> {
        match sensor {
            Sensor::Temperature => self.temperature,
            Sensor::Luminosity => self.luminosity,
            Sensor::Accelerometer(axis) => self.accelerometer.axis(axis),
        }
    }
}
