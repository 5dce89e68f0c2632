// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Wearable kit command definitions.
//!
//! This module provides typed representations of the ASCII commands
//! understood by the kit's firmware.
//!
//! # Available Commands
//!
//! | Command Type | Purpose | Example |
//! |-------------|---------|---------|
//! | [`LedCommand`] | Drive one RGB LED channel | `#LR0255`, `#LG0000` |
//! | [`SensorCommand`] | Query a sensor | `#TE0000`, `#AC0001` |
//! | [`MusicCommand`] | Play a stored melody | `#PM0001` |
//!
//! # Command Structure
//!
//! Every command is `#`, a two-letter code, and a four digit zero-padded
//! value, terminated by a newline on the wire:
//!
//! ```text
//! # L R 0 2 5 5 \n
//!   code value
//! ```
//!
//! # Examples
//!
//! ```
//! use wearable_kit::command::{Command, LedCommand, SensorCommand};
//! use wearable_kit::types::{Axis, Intensity, LedColor};
//!
//! let cmd = LedCommand::custom(LedColor::Blue, Intensity::clamped(-5.0));
//! assert_eq!(cmd.to_wire(), "#LB0000");
//!
//! let query = SensorCommand::accelerometer(Axis::Y);
//! assert_eq!(query.to_line(), "#AC0001\n");
//! ```

mod led;
mod music;
mod sensor;

pub use led::LedCommand;
pub use music::MusicCommand;
pub use sensor::SensorCommand;

/// A command that can be sent to the kit.
pub trait Command {
    /// Returns the two-letter command code, e.g. `"LR"`.
    fn code(&self) -> &'static str;

    /// Returns the numeric argument of the command.
    fn value(&self) -> u16;

    /// Returns the command string without terminator, e.g. `#LR0255`.
    fn to_wire(&self) -> String {
        format!("#{}{:04}", self.code(), self.value())
    }

    /// Returns the newline-terminated command as written to the transport.
    fn to_line(&self) -> String {
        format!("{}\n", self.to_wire())
    }
}
