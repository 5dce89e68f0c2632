// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! LED control commands.

use crate::command::Command;
use crate::types::{Intensity, LedColor};

/// Command to set one LED channel.
///
/// # Examples
///
/// ```
/// use wearable_kit::command::{Command, LedCommand};
/// use wearable_kit::types::{Intensity, LedColor};
///
/// assert_eq!(LedCommand::high(LedColor::Red).to_wire(), "#LR0255");
/// assert_eq!(LedCommand::low(LedColor::Green).to_wire(), "#LG0000");
/// assert_eq!(
///     LedCommand::custom(LedColor::Blue, Intensity::new(42)).to_wire(),
///     "#LB0042"
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LedCommand {
    color: LedColor,
    intensity: Intensity,
}

impl LedCommand {
    /// Turns a channel fully on.
    #[must_use]
    pub const fn high(color: LedColor) -> Self {
        Self::custom(color, Intensity::MAX)
    }

    /// Turns a channel off.
    #[must_use]
    pub const fn low(color: LedColor) -> Self {
        Self::custom(color, Intensity::OFF)
    }

    /// Sets a channel to an explicit intensity.
    #[must_use]
    pub const fn custom(color: LedColor, intensity: Intensity) -> Self {
        Self { color, intensity }
    }

    /// The three LOW commands, red first.
    #[must_use]
    pub fn all_off() -> [Self; 3] {
        LedColor::ALL.map(Self::low)
    }

    /// Returns the targeted channel.
    #[must_use]
    pub const fn color(&self) -> LedColor {
        self.color
    }

    /// Returns the requested intensity.
    #[must_use]
    pub const fn intensity(&self) -> Intensity {
        self.intensity
    }
}

impl Command for LedCommand {
    fn code(&self) -> &'static str {
        self.color.code()
    }

    fn value(&self) -> u16 {
        u16::from(self.intensity.value())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn high_and_low_per_channel() {
        assert_eq!(LedCommand::high(LedColor::Red).to_wire(), "#LR0255");
        assert_eq!(LedCommand::low(LedColor::Red).to_wire(), "#LR0000");
        assert_eq!(LedCommand::high(LedColor::Green).to_wire(), "#LG0255");
        assert_eq!(LedCommand::low(LedColor::Green).to_wire(), "#LG0000");
        assert_eq!(LedCommand::high(LedColor::Blue).to_wire(), "#LB0255");
        assert_eq!(LedCommand::low(LedColor::Blue).to_wire(), "#LB0000");
    }

    #[test]
    fn custom_uses_clamped_value() {
        let over = LedCommand::custom(LedColor::Red, Intensity::clamped(300.0));
        assert_eq!(over.to_wire(), "#LR0255");

        let under = LedCommand::custom(LedColor::Blue, Intensity::clamped(-5.0));
        assert_eq!(under.to_wire(), "#LB0000");
    }

    #[test]
    fn all_off_order() {
        let wires: Vec<String> = LedCommand::all_off().iter().map(Command::to_wire).collect();
        assert_eq!(wires, vec!["#LR0000", "#LG0000", "#LB0000"]);
    }
}
