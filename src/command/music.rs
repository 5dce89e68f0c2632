// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Music playback command.

use crate::command::Command;
use crate::types::Track;

/// Command to play one of the melodies stored on the kit.
///
/// # Examples
///
/// ```
/// use wearable_kit::command::{Command, MusicCommand};
/// use wearable_kit::types::Track;
///
/// assert_eq!(MusicCommand::new(Track::Mario).to_wire(), "#PM0001");
/// assert_eq!(MusicCommand::from_name("christmas").to_wire(), "#PM0002");
/// assert_eq!(MusicCommand::from_name("unknown-track").to_wire(), "#PM0001");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct MusicCommand(Track);

impl MusicCommand {
    /// Creates a command for a track.
    #[must_use]
    pub const fn new(track: Track) -> Self {
        Self(track)
    }

    /// Creates a command from a track name, using the default track when
    /// the name is unknown.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        Self(Track::from_name_or_default(name))
    }

    /// Returns the track.
    #[must_use]
    pub const fn track(&self) -> Track {
        self.0
    }
}

impl Command for MusicCommand {
    fn code(&self) -> &'static str {
        "PM"
    }

    fn value(&self) -> u16 {
        self.0.slot()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_mario() {
        assert_eq!(MusicCommand::default().track(), Track::Mario);
    }

    #[test]
    fn from_name_is_case_insensitive() {
        assert_eq!(MusicCommand::from_name("CHRISTMAS").track(), Track::Christmas);
        assert_eq!(MusicCommand::from_name("Mario").track(), Track::Mario);
    }
}
