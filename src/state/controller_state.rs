// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Mutable state owned by the controller.

use crate::discovery::DiscoveredDevice;
use crate::telemetry::{SensorReading, SensorSnapshot};
use crate::types::Sensor;

use super::ConnectionPhase;

/// Everything the controller remembers between transport events.
///
/// # Examples
///
/// ```
/// use wearable_kit::discovery::DiscoveredDevice;
/// use wearable_kit::state::{ConnectionPhase, ControllerState};
///
/// let mut state = ControllerState::new("wV3");
/// state.transition(ConnectionPhase::Discovering);
/// state.remember(DiscoveredDevice::new("30:14:08:26:24:39", "wV3"));
///
/// assert_eq!(state.target_device().map(|d| d.address.as_str()), Some("30:14:08:26:24:39"));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ControllerState {
    target_name: String,
    known_devices: Vec<DiscoveredDevice>,
    phase: ConnectionPhase,
    last_query: Option<Sensor>,
    readings: SensorSnapshot,
}

impl ControllerState {
    /// Creates an idle state targeting `target_name`.
    #[must_use]
    pub fn new(target_name: impl Into<String>) -> Self {
        Self {
            target_name: target_name.into(),
            ..Self::default()
        }
    }

    /// Returns the exact name of the device to connect to.
    #[must_use]
    pub fn target_name(&self) -> &str {
        &self.target_name
    }

    /// Returns the devices accepted during the current discovery.
    #[must_use]
    pub fn known_devices(&self) -> &[DiscoveredDevice] {
        &self.known_devices
    }

    /// Returns the current phase.
    #[must_use]
    pub const fn phase(&self) -> ConnectionPhase {
        self.phase
    }

    /// Returns the sensor most recently queried.
    #[must_use]
    pub const fn last_query(&self) -> Option<Sensor> {
        self.last_query
    }

    /// Returns the latest sensor values.
    #[must_use]
    pub const fn readings(&self) -> &SensorSnapshot {
        &self.readings
    }

    /// Moves to `next` if the transition is legal.
    ///
    /// Returns `false` and leaves the phase untouched otherwise.
    pub fn transition(&mut self, next: ConnectionPhase) -> bool {
        if !self.phase.can_transition_to(next) {
            tracing::warn!(from = %self.phase, to = %next, "Ignoring illegal phase transition");
            return false;
        }
        if self.phase != next {
            tracing::debug!(from = %self.phase, to = %next, "Connection phase changed");
        }
        self.phase = next;
        true
    }

    /// Remembers a discovered device.
    ///
    /// Returns `false` if a device with the same address is already known.
    pub fn remember(&mut self, device: DiscoveredDevice) -> bool {
        if self
            .known_devices
            .iter()
            .any(|known| known.address == device.address)
        {
            return false;
        }
        self.known_devices.push(device);
        true
    }

    /// Forgets every discovered device.
    pub fn clear_devices(&mut self) {
        self.known_devices.clear();
    }

    /// Returns the known device whose name equals the target name.
    #[must_use]
    pub fn target_device(&self) -> Option<&DiscoveredDevice> {
        self.known_devices
            .iter()
            .find(|device| device.name == self.target_name)
    }

    /// Records the sensor just queried.
    pub fn record_query(&mut self, sensor: Sensor) {
        self.last_query = Some(sensor);
    }

    /// Stores a reading in the snapshot.
    pub fn apply_reading(&mut self, reading: &SensorReading) -> bool {
        self.readings.apply(reading)
    }
}
