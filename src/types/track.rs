// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Music tracks stored on the kit.

use std::fmt;
use std::str::FromStr;

/// A melody the kit's buzzer can play.
///
/// # Examples
///
/// ```
/// use wearable_kit::types::Track;
///
/// assert_eq!("christmas".parse::<Track>(), Ok(Track::Christmas));
/// assert_eq!(Track::from_name_or_default("unknown-track"), Track::Mario);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Track {
    /// The Mario theme (the default).
    #[default]
    Mario,
    /// A Christmas tune.
    Christmas,
}

impl Track {
    /// Resolves a track name case-insensitively, falling back to [`Track::Mario`].
    #[must_use]
    pub fn from_name_or_default(name: &str) -> Self {
        name.parse().unwrap_or_default()
    }

    /// Slot number of the track on the device.
    #[must_use]
    pub const fn slot(&self) -> u16 {
        match self {
            Self::Mario => 1,
            Self::Christmas => 2,
        }
    }

    /// Upper-case name of the track.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Mario => "MARIO",
            Self::Christmas => "CHRISTMAS",
        }
    }
}

impl FromStr for Track {
    type Err = UnknownTrack;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "MARIO" => Ok(Self::Mario),
            "CHRISTMAS" => Ok(Self::Christmas),
            _ => Err(UnknownTrack(s.to_string())),
        }
    }
}

impl fmt::Display for Track {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A track name the kit does not know.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown track: {0}")]
pub struct UnknownTrack(pub String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!("MARIO".parse::<Track>(), Ok(Track::Mario));
        assert_eq!("Christmas".parse::<Track>(), Ok(Track::Christmas));
    }

    #[test]
    fn unknown_falls_back_to_mario() {
        assert_eq!(Track::from_name_or_default("jingle"), Track::Mario);
    }

    #[test]
    fn slots_are_distinct() {
        assert_ne!(Track::Mario.slot(), Track::Christmas.slot());
    }
}
