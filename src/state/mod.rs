// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Controller state types.
//!
//! [`ConnectionPhase`] is the small state machine driving the controller and
//! [`ControllerState`] is everything the controller keeps between transport
//! events: target name, discovered devices, phase and latest readings.
//!
//! # Examples
//!
//! ```
//! use wearable_kit::state::{ConnectionPhase, ControllerState};
//!
//! let mut state = ControllerState::new("wV3");
//! assert!(state.transition(ConnectionPhase::Discovering));
//! assert!(state.transition(ConnectionPhase::Connecting));
//! assert!(state.transition(ConnectionPhase::Connected));
//! assert!(state.phase().is_connected());
//! ```

mod connection_phase;
mod controller_state;

pub use connection_phase::ConnectionPhase;
pub use controller_state::ControllerState;
