// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Callback management for wearable event subscriptions.
//!
//! - [`SubscriptionId`] - Unique identifier for unsubscribing
//! - [`CallbackRegistry`] - Registry storing callbacks per event kind and dispatching events

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::RwLock;

use crate::discovery::DiscoveredDevice;
use crate::event::WearableEvent;
use crate::telemetry::SensorReading;

/// Unique identifier for a subscription.
///
/// Returned when registering a callback; pass it to `unsubscribe` to
/// remove the callback again. IDs are unique within a registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

impl SubscriptionId {
    #[must_use]
    pub(crate) fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw ID value.
    #[must_use]
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Sub({})", self.0)
    }
}

type FoundCallback = Arc<dyn Fn(&[DiscoveredDevice]) + Send + Sync>;
type SignalCallback = Arc<dyn Fn() + Send + Sync>;
type TextCallback = Arc<dyn Fn(&str) + Send + Sync>;
type SensorCallback = Arc<dyn Fn(&SensorReading) + Send + Sync>;
type EventCallback = Arc<dyn Fn(&WearableEvent) + Send + Sync>;

type Slot<C> = RwLock<HashMap<SubscriptionId, C>>;

/// Registry of wearable event callbacks.
///
/// Thread-safe through `parking_lot::RwLock`; callbacks are stored in `Arc`
/// so dispatch can run them without holding a lock.
pub struct CallbackRegistry {
    next_id: AtomicU64,
    found: Slot<FoundCallback>,
    connected: Slot<SignalCallback>,
    disconnected: Slot<SignalCallback>,
    error: Slot<TextCallback>,
    data: Slot<TextCallback>,
    sensor_data: Slot<SensorCallback>,
    /// Receives every event.
    any: Slot<EventCallback>,
}

impl CallbackRegistry {
    /// Creates a new empty callback registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            next_id: AtomicU64::new(1),
            found: RwLock::new(HashMap::new()),
            connected: RwLock::new(HashMap::new()),
            disconnected: RwLock::new(HashMap::new()),
            error: RwLock::new(HashMap::new()),
            data: RwLock::new(HashMap::new()),
            sensor_data: RwLock::new(HashMap::new()),
            any: RwLock::new(HashMap::new()),
        }
    }

    fn next_id(&self) -> SubscriptionId {
        SubscriptionId::new(self.next_id.fetch_add(1, Ordering::Relaxed))
    }

    fn insert<C>(&self, slot: &Slot<C>, callback: C) -> SubscriptionId {
        let id = self.next_id();
        slot.write().insert(id, callback);
        id
    }

    // =========================================================================
    // Registration methods
    // =========================================================================

    /// Registers a callback for the end of a successful discovery.
    pub fn on_found<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&[DiscoveredDevice]) + Send + Sync + 'static,
    {
        self.insert(&self.found, Arc::new(callback) as FoundCallback)
    }

    /// Registers a callback for established connections.
    pub fn on_connected<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.insert(&self.connected, Arc::new(callback) as SignalCallback)
    }

    /// Registers a callback for disconnections.
    pub fn on_disconnected<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.insert(&self.disconnected, Arc::new(callback) as SignalCallback)
    }

    /// Registers a callback receiving error messages.
    pub fn on_error<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&str) + Send + Sync + 'static,
    {
        self.insert(&self.error, Arc::new(callback) as TextCallback)
    }

    /// Registers a callback receiving raw decoded data.
    pub fn on_data<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&str) + Send + Sync + 'static,
    {
        self.insert(&self.data, Arc::new(callback) as TextCallback)
    }

    /// Registers a callback receiving sensor-attributed readings.
    pub fn on_sensor_data<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&SensorReading) + Send + Sync + 'static,
    {
        self.insert(&self.sensor_data, Arc::new(callback) as SensorCallback)
    }

    /// Registers a callback receiving every event.
    pub fn on_event<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&WearableEvent) + Send + Sync + 'static,
    {
        self.insert(&self.any, Arc::new(callback) as EventCallback)
    }

    // =========================================================================
    // Unsubscription
    // =========================================================================

    /// Unregisters a callback by its subscription ID.
    ///
    /// Returns `true` if a callback was found and removed.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.found.write().remove(&id).is_some()
            || self.connected.write().remove(&id).is_some()
            || self.disconnected.write().remove(&id).is_some()
            || self.error.write().remove(&id).is_some()
            || self.data.write().remove(&id).is_some()
            || self.sensor_data.write().remove(&id).is_some()
            || self.any.write().remove(&id).is_some()
    }

    /// Clears all callbacks.
    pub fn clear(&self) {
        self.found.write().clear();
        self.connected.write().clear();
        self.disconnected.write().clear();
        self.error.write().clear();
        self.data.write().clear();
        self.sensor_data.write().clear();
        self.any.write().clear();
    }

    // =========================================================================
    // Dispatch
    // =========================================================================

    /// Calls every callback interested in `event`.
    ///
    /// Catch-all callbacks run first, then the kind-specific ones. Callbacks
    /// run synchronously; the registry locks are released before any callback
    /// is invoked, so callbacks may subscribe or unsubscribe.
    pub fn dispatch(&self, event: &WearableEvent) {
        for callback in snapshot(&self.any) {
            callback(event);
        }

        match event {
            WearableEvent::Found { devices } => {
                for callback in snapshot(&self.found) {
                    callback(devices.as_slice());
                }
            }
            WearableEvent::Connected => {
                for callback in snapshot(&self.connected) {
                    callback();
                }
            }
            WearableEvent::Disconnected => {
                for callback in snapshot(&self.disconnected) {
                    callback();
                }
            }
            WearableEvent::Error { message } => {
                for callback in snapshot(&self.error) {
                    callback(message.as_str());
                }
            }
            WearableEvent::Data { text } => {
                for callback in snapshot(&self.data) {
                    callback(text.as_str());
                }
            }
            WearableEvent::SensorData(reading) => {
                for callback in snapshot(&self.sensor_data) {
                    callback(reading);
                }
            }
        }
    }

    // =========================================================================
    // Statistics
    // =========================================================================

    /// Returns the total number of registered callbacks.
    #[must_use]
    pub fn callback_count(&self) -> usize {
        self.found.read().len()
            + self.connected.read().len()
            + self.disconnected.read().len()
            + self.error.read().len()
            + self.data.read().len()
            + self.sensor_data.read().len()
            + self.any.read().len()
    }

    /// Returns `true` if there are no registered callbacks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.callback_count() == 0
    }
}

fn snapshot<C: Clone>(slot: &Slot<C>) -> Vec<C> {
    slot.read().values().cloned().collect()
}

impl Default for CallbackRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for CallbackRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CallbackRegistry")
            .field("callback_count", &self.callback_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Sensor;
    use std::sync::atomic::AtomicU32;

    #[test]
    fn subscription_id_display() {
        let id = SubscriptionId::new(42);
        assert_eq!(id.to_string(), "Sub(42)");
    }

    #[test]
    fn registry_new_is_empty() {
        let registry = CallbackRegistry::new();
        assert!(registry.is_empty());
        assert_eq!(registry.callback_count(), 0);
    }

    #[test]
    fn registry_connected_callback() {
        let registry = CallbackRegistry::new();
        let counter = Arc::new(AtomicU32::new(0));
        let counter_clone = counter.clone();

        let id = registry.on_connected(move || {
            counter_clone.fetch_add(1, Ordering::SeqCst);
        });

        registry.dispatch(&WearableEvent::Connected);
        assert_eq!(counter.load(Ordering::SeqCst), 1);

        assert!(registry.unsubscribe(id));
        registry.dispatch(&WearableEvent::Connected);
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn registry_error_callback_receives_message() {
        let registry = CallbackRegistry::new();
        let received = Arc::new(RwLock::new(None::<String>));
        let received_clone = received.clone();

        registry.on_error(move |message| {
            *received_clone.write() = Some(message.to_string());
        });

        registry.dispatch(&WearableEvent::error("write failed: broken pipe"));
        assert_eq!(
            received.read().as_deref(),
            Some("write failed: broken pipe")
        );
    }

    #[test]
    fn registry_kind_callbacks_ignore_other_events() {
        let registry = CallbackRegistry::new();
        let counter = Arc::new(AtomicU32::new(0));
        let counter_clone = counter.clone();

        registry.on_disconnected(move || {
            counter_clone.fetch_add(1, Ordering::SeqCst);
        });

        registry.dispatch(&WearableEvent::Connected);
        registry.dispatch(&WearableEvent::data("x"));
        assert_eq!(counter.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn registry_catch_all_sees_everything() {
        let registry = CallbackRegistry::new();
        let names = Arc::new(RwLock::new(Vec::new()));
        let names_clone = names.clone();

        registry.on_event(move |event| names_clone.write().push(event.name()));

        registry.dispatch(&WearableEvent::Connected);
        registry.dispatch(&WearableEvent::data("1"));
        registry.dispatch(&WearableEvent::SensorData(SensorReading::parse(
            Sensor::Luminosity,
            "1",
        )));

        assert_eq!(
            *names.read(),
            vec!["connected", "data", "data:luminosity"]
        );
    }

    #[test]
    fn registry_found_and_sensor_callbacks() {
        let registry = CallbackRegistry::new();
        let found = Arc::new(AtomicU32::new(0));
        let sensor = Arc::new(AtomicU32::new(0));
        let found_clone = found.clone();
        let sensor_clone = sensor.clone();

        registry.on_found(move |devices| {
            found_clone.fetch_add(u32::try_from(devices.len()).unwrap(), Ordering::SeqCst);
        });
        registry.on_sensor_data(move |_| {
            sensor_clone.fetch_add(1, Ordering::SeqCst);
        });

        registry.dispatch(&WearableEvent::Found {
            devices: vec![DiscoveredDevice::new("AA:BB:CC:DD:EE:FF", "wV3")],
        });
        registry.dispatch(&WearableEvent::SensorData(SensorReading::parse(
            Sensor::Temperature,
            "21",
        )));

        assert_eq!(found.load(Ordering::SeqCst), 1);
        assert_eq!(sensor.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn callback_may_unsubscribe_itself() {
        let registry = Arc::new(CallbackRegistry::new());
        let id_cell = Arc::new(RwLock::new(None::<SubscriptionId>));
        let registry_clone = registry.clone();
        let id_clone = id_cell.clone();

        let id = registry.on_data(move |_| {
            if let Some(id) = *id_clone.read() {
                registry_clone.unsubscribe(id);
            }
        });
        *id_cell.write() = Some(id);

        registry.dispatch(&WearableEvent::data("once"));
        assert!(registry.is_empty());
    }

    #[test]
    fn registry_unsubscribe_nonexistent() {
        let registry = CallbackRegistry::new();
        assert!(!registry.unsubscribe(SubscriptionId::new(999)));
    }

    #[test]
    fn registry_clear() {
        let registry = CallbackRegistry::new();

        registry.on_connected(|| {});
        registry.on_data(|_| {});
        registry.on_error(|_| {});
        assert_eq!(registry.callback_count(), 3);

        registry.clear();
        assert!(registry.is_empty());
    }

    #[test]
    fn registry_unique_ids() {
        let registry = CallbackRegistry::new();

        let id1 = registry.on_connected(|| {});
        let id2 = registry.on_data(|_| {});
        let id3 = registry.on_event(|_| {});

        assert_ne!(id1, id2);
        assert_ne!(id2, id3);
        assert_ne!(id1, id3);
    }

    #[test]
    fn registry_debug() {
        let registry = CallbackRegistry::new();
        registry.on_connected(|| {});

        let debug = format!("{registry:?}");
        assert!(debug.contains("CallbackRegistry"));
        assert!(debug.contains("callback_count"));
    }
}
