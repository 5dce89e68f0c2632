// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Connection lifecycle phases.

use std::fmt;

/// Where the controller is in the discover → connect → disconnect cycle.
///
/// ```text
/// Idle ──find──▶ Discovering ──match──▶ Connecting ──ack──▶ Connected
///   ▲                 │                      │                  │
///   └──no match───────┘                      └──failure──▶ Disconnected ◀──close/error
/// ```
///
/// # Examples
///
/// ```
/// use wearable_kit::state::ConnectionPhase;
///
/// let phase = ConnectionPhase::Idle;
/// assert!(phase.can_transition_to(ConnectionPhase::Discovering));
/// assert!(!phase.can_transition_to(ConnectionPhase::Connected));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ConnectionPhase {
    /// Nothing has happened yet, or discovery ended without a match.
    #[default]
    Idle,
    /// Discovery is running.
    Discovering,
    /// A matching device was found and a connection is being opened.
    Connecting,
    /// The transport acknowledged the connection.
    Connected,
    /// The connection was closed or failed.
    Disconnected,
}

impl ConnectionPhase {
    /// Returns `true` if moving from `self` to `next` is a legal transition.
    ///
    /// Any phase may move to `Disconnected` or start discovering again.
    #[must_use]
    pub const fn can_transition_to(self, next: Self) -> bool {
        use ConnectionPhase::{Connected, Connecting, Disconnected, Discovering, Idle};

        matches!(
            (self, next),
            (_, Disconnected | Discovering)
                | (Discovering | Idle, Idle)
                | (Discovering | Disconnected | Idle, Connecting)
                | (Connecting | Connected, Connected)
                | (Connecting, Connecting)
        )
    }

    /// Returns `true` only in the `Connected` phase.
    #[must_use]
    pub const fn is_connected(self) -> bool {
        matches!(self, Self::Connected)
    }

    /// Returns `true` when no discovery or connection attempt is in flight.
    #[must_use]
    pub const fn is_settled(self) -> bool {
        !matches!(self, Self::Discovering | Self::Connecting)
    }

    /// Lower-case name of the phase.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Discovering => "discovering",
            Self::Connecting => "connecting",
            Self::Connected => "connected",
            Self::Disconnected => "disconnected",
        }
    }
}

impl fmt::Display for ConnectionPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
