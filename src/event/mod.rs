// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Event system for wearable lifecycle and data.
//!
//! Every event the controller emits is published on an [`EventBus`] backed
//! by tokio's broadcast channel, and dispatched to the callbacks registered
//! through [`Subscribable`](crate::subscription::Subscribable).
//!
//! # Examples
//!
//! ```
//! use wearable_kit::event::{EventBus, WearableEvent};
//!
//! let bus = EventBus::new();
//! let mut rx = bus.subscribe();
//!
//! bus.publish(WearableEvent::error("could not find the device \"wV3\""));
//! let event = rx.try_recv().unwrap();
//! assert_eq!(event.name(), "error");
//! ```

mod event_bus;
mod wearable_event;

pub use event_bus::EventBus;
pub use wearable_event::WearableEvent;
