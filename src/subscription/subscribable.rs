// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Subscribable trait for types that emit wearable events.

use crate::discovery::DiscoveredDevice;
use crate::event::WearableEvent;
use crate::subscription::SubscriptionId;
use crate::telemetry::SensorReading;

/// Trait for types that support event subscriptions.
///
/// One registration method per event kind, plus [`on_event`](Self::on_event)
/// for listeners keying on [`WearableEvent::name`].
///
/// # Examples
///
/// ```no_run
/// use wearable_kit::subscription::Subscribable;
/// use wearable_kit::transport::Transport;
/// use wearable_kit::Wearable;
///
/// fn log_everything<T: Transport>(kit: &Wearable<T>) {
///     kit.on_connected(|| println!("Wearable is connected!"));
///     kit.on_error(|message| eprintln!("{message}"));
///     kit.on_sensor_data(|reading| {
///         println!("{} is {:?}", reading.sensor, reading.value);
///     });
/// }
/// ```
pub trait Subscribable {
    /// Subscribes to the end of a discovery that matched devices.
    fn on_found<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&[DiscoveredDevice]) + Send + Sync + 'static;

    /// Subscribes to connection events.
    fn on_connected<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn() + Send + Sync + 'static;

    /// Subscribes to disconnection events.
    fn on_disconnected<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn() + Send + Sync + 'static;

    /// Subscribes to error messages.
    fn on_error<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&str) + Send + Sync + 'static;

    /// Subscribes to raw decoded data.
    fn on_data<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&str) + Send + Sync + 'static;

    /// Subscribes to `data:<sensor>` readings.
    fn on_sensor_data<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&SensorReading) + Send + Sync + 'static;

    /// Subscribes to every event.
    fn on_event<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&WearableEvent) + Send + Sync + 'static;

    /// Unsubscribes a callback by its subscription ID.
    ///
    /// Returns `true` if the subscription was found and removed.
    fn unsubscribe(&self, id: SubscriptionId) -> bool;
}
