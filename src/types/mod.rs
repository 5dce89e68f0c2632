// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Value types for wearable kit control.
//!
//! # Types
//!
//! - [`Intensity`] - LED channel intensity (0-255), always clamped
//! - [`LedColor`] - Red, green or blue LED channel
//! - [`Track`] - Melody stored on the kit
//! - [`Sensor`] / [`Axis`] - Queryable sensors

mod intensity;
mod led;
mod sensor;
mod track;

pub use intensity::{Intensity, MAX_INTENSITY, MIN_INTENSITY, clamp, clamp_str};
pub use led::{LedColor, UnknownColor};
pub use sensor::{Axis, Sensor};
pub use track::{Track, UnknownTrack};
