// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Sensors the kit can be queried for.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Accelerometer axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    /// X axis.
    X,
    /// Y axis.
    Y,
    /// Z axis.
    Z,
}

impl Axis {
    /// All axes in query order.
    pub const ALL: [Self; 3] = [Self::X, Self::Y, Self::Z];

    /// Index of the axis in the accelerometer command.
    #[must_use]
    pub const fn index(&self) -> u16 {
        match self {
            Self::X => 0,
            Self::Y => 1,
            Self::Z => 2,
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::X => "x",
            Self::Y => "y",
            Self::Z => "z",
        })
    }
}

/// A sensor on the kit.
///
/// # Examples
///
/// ```
/// use wearable_kit::types::{Axis, Sensor};
///
/// assert_eq!(Sensor::Temperature.name(), "temperature");
/// assert_eq!(Sensor::Accelerometer(Axis::Y).name(), "accelerometer");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sensor {
    /// Temperature sensor.
    Temperature,
    /// Ambient light sensor.
    Luminosity,
    /// One axis of the accelerometer.
    Accelerometer(Axis),
}

impl Sensor {
    /// Event-facing sensor name, as used in `data:<name>` events.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Temperature => "temperature",
            Self::Luminosity => "luminosity",
            Self::Accelerometer(_) => "accelerometer",
        }
    }
}

impl fmt::Display for Sensor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Accelerometer(axis) => write!(f, "accelerometer.{axis}"),
            other => f.write_str(other.name()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn axis_indices() {
        let indices: Vec<u16> = Axis::ALL.iter().map(Axis::index).collect();
        assert_eq!(indices, vec![0, 1, 2]);
    }

    #[test]
    fn sensor_display_includes_axis() {
        assert_eq!(Sensor::Accelerometer(Axis::Z).to_string(), "accelerometer.z");
        assert_eq!(Sensor::Luminosity.to_string(), "luminosity");
    }
}
