// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Sensor query commands.
//!
//! The kit answers queries asynchronously over the same serial channel;
//! nothing in the reply identifies which query it belongs to.

use crate::command::Command;
use crate::types::{Axis, Sensor};

/// Command to read a sensor.
///
/// # Examples
///
/// ```
/// use wearable_kit::command::{Command, SensorCommand};
/// use wearable_kit::types::Axis;
///
/// assert_eq!(SensorCommand::Temperature.to_wire(), "#TE0000");
/// assert_eq!(SensorCommand::Luminosity.to_wire(), "#LI0000");
/// assert_eq!(SensorCommand::accelerometer(Axis::Z).to_wire(), "#AC0002");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SensorCommand {
    /// Read the temperature.
    Temperature,
    /// Read the ambient light level.
    Luminosity,
    /// Read one accelerometer axis.
    Accelerometer(Axis),
}

impl SensorCommand {
    /// Creates an accelerometer query for one axis.
    #[must_use]
    pub const fn accelerometer(axis: Axis) -> Self {
        Self::Accelerometer(axis)
    }

    /// Returns the sensor this command queries.
    #[must_use]
    pub const fn sensor(&self) -> Sensor {
        match self {
            Self::Temperature => Sensor::Temperature,
            Self::Luminosity => Sensor::Luminosity,
            Self::Accelerometer(axis) => Sensor::Accelerometer(*axis),
        }
    }
}

impl From<Sensor> for SensorCommand {
    fn from(sensor: Sensor) -> Self {
        match sensor {
            Sensor::Temperature => Self::Temperature,
            Sensor::Luminosity => Self::Luminosity,
            Sensor::Accelerometer(axis) => Self::Accelerometer(axis),
        }
    }
}

impl Command for SensorCommand {
    fn code(&self) -> &'static str {
        match self {
            Self::Temperature => "TE",
            Self::Luminosity => "LI",
            Self::Accelerometer(_) => "AC",
        }
    }

    fn value(&self) -> u16 {
        match self {
            Self::Temperature | Self::Luminosity => 0,
            Self::Accelerometer(axis) => axis.index(),
        }
    }
}
