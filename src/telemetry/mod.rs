// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Sensor telemetry derived from raw kit replies.
//!
//! The kit answers sensor queries with plain text and nothing in a reply
//! says which query it answers. The controller therefore attributes each
//! reply to the most recent query it sent and, when enabled, emits an extra
//! `data:<sensor>` event carrying a [`SensorReading`]. Interleaved queries
//! will be misattributed; there are no sequence numbers to do better.
//!
//! The generic `data` event is always emitted first and carries the reply
//! verbatim.

mod sensor_parser;
mod snapshot;

pub use sensor_parser::{SensorReading, parse_value};
pub use snapshot::{AccelerometerSample, SensorSnapshot};
