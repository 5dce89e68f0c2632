// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! RGB LED channels.

use std::fmt;
use std::str::FromStr;

/// One channel of the kit's RGB LED.
///
/// Only one channel is lit at a time.
///
/// # Examples
///
/// ```
/// use wearable_kit::types::LedColor;
///
/// assert_eq!("red".parse::<LedColor>(), Ok(LedColor::Red));
/// assert_eq!(LedColor::from_name_or_default("purple"), LedColor::Green);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LedColor {
    /// Red channel.
    Red,
    /// Green channel (the default).
    #[default]
    Green,
    /// Blue channel.
    Blue,
}

impl LedColor {
    /// All channels, in the order they are switched off.
    pub const ALL: [Self; 3] = [Self::Red, Self::Green, Self::Blue];

    /// Resolves a color name case-insensitively, falling back to green.
    #[must_use]
    pub fn from_name_or_default(name: &str) -> Self {
        name.parse().unwrap_or_default()
    }

    /// Two-letter command code of this channel.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Red => "LR",
            Self::Green => "LG",
            Self::Blue => "LB",
        }
    }

    /// Upper-case name of the channel.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Red => "RED",
            Self::Green => "GREEN",
            Self::Blue => "BLUE",
        }
    }
}

impl FromStr for LedColor {
    type Err = UnknownColor;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "RED" => Ok(Self::Red),
            "GREEN" => Ok(Self::Green),
            "BLUE" => Ok(Self::Blue),
            _ => Err(UnknownColor(s.to_string())),
        }
    }
}

impl fmt::Display for LedColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A color name that is not one of RED, GREEN or BLUE.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown LED color: {0}")]
pub struct UnknownColor(pub String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!("RED".parse::<LedColor>(), Ok(LedColor::Red));
        assert_eq!("Green".parse::<LedColor>(), Ok(LedColor::Green));
        assert_eq!("bLuE".parse::<LedColor>(), Ok(LedColor::Blue));
    }

    #[test]
    fn unknown_color_falls_back_to_green() {
        assert_eq!(LedColor::from_name_or_default("GEEN"), LedColor::Green);
        assert_eq!(LedColor::from_name_or_default(""), LedColor::Green);
    }

    #[test]
    fn unknown_color_error_message() {
        let err = "orange".parse::<LedColor>().unwrap_err();
        assert_eq!(err.to_string(), "unknown LED color: orange");
    }

    #[test]
    fn codes() {
        assert_eq!(LedColor::Red.code(), "LR");
        assert_eq!(LedColor::Green.code(), "LG");
        assert_eq!(LedColor::Blue.code(), "LB");
    }
}
