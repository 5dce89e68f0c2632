// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Event bus for broadcasting wearable events and the connection phase.

use std::sync::Arc;

use tokio::sync::{broadcast, watch};

use super::WearableEvent;
use crate::state::ConnectionPhase;

/// Default channel capacity for the event bus.
const DEFAULT_CHANNEL_CAPACITY: usize = 256;

/// Event bus for broadcasting wearable events to multiple subscribers.
///
/// Each subscriber gets its own copy of every event published after it
/// subscribed. Next to the event stream the bus keeps the latest
/// [`ConnectionPhase`], which late subscribers can read or await through
/// [`watch_phase`](Self::watch_phase).
///
/// # Capacity
///
/// The bus has a fixed capacity (default 256). A subscriber that falls
/// further behind loses the oldest events and receives
/// `RecvError::Lagged` instead.
///
/// # Examples
///
/// ```
/// use wearable_kit::event::{EventBus, WearableEvent};
///
/// let bus = EventBus::new();
/// let mut rx = bus.subscribe();
///
/// bus.publish(WearableEvent::Connected);
/// assert_eq!(rx.try_recv().ok(), Some(WearableEvent::Connected));
/// ```
#[derive(Debug, Clone)]
pub struct EventBus {
    sender: broadcast::Sender<WearableEvent>,
    phase: Arc<watch::Sender<ConnectionPhase>>,
}

impl EventBus {
    /// Creates a new event bus with default capacity.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CHANNEL_CAPACITY)
    }

    /// Creates a new event bus buffering up to `capacity` events.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        let (phase, _) = watch::channel(ConnectionPhase::Idle);
        Self {
            sender,
            phase: Arc::new(phase),
        }
    }

    /// Subscribes to events published from now on.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<WearableEvent> {
        self.sender.subscribe()
    }

    /// Returns the number of active subscribers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }

    /// Publishes an event to all subscribers.
    ///
    /// Without subscribers the event is discarded.
    pub fn publish(&self, event: WearableEvent) {
        // no subscribers is not an error
        let _ = self.sender.send(event);
    }

    /// Records the current connection phase.
    ///
    /// Watchers are only woken when the phase actually changes.
    pub fn publish_phase(&self, phase: ConnectionPhase) {
        self.phase.send_if_modified(|current| {
            if *current == phase {
                return false;
            }
            *current = phase;
            true
        });
    }

    /// Returns the last recorded connection phase.
    #[must_use]
    pub fn phase(&self) -> ConnectionPhase {
        *self.phase.borrow()
    }

    /// Watches the connection phase.
    ///
    /// Unlike [`subscribe`](Self::subscribe), the receiver starts with the
    /// current phase, so waiting for a connection works even if it was
    /// established before the call.
    #[must_use]
    pub fn watch_phase(&self) -> watch::Receiver<ConnectionPhase> {
        self.phase.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_bus_has_no_subscribers() {
        let bus = EventBus::new();
        assert_eq!(bus.subscriber_count(), 0);
    }

    #[test]
    fn subscribe_and_drop_update_count() {
        let bus = EventBus::new();

        let rx1 = bus.subscribe();
        let _rx2 = bus.subscribe();
        assert_eq!(bus.subscriber_count(), 2);

        drop(rx1);
        assert_eq!(bus.subscriber_count(), 1);
    }

    #[tokio::test]
    async fn publish_delivers_to_every_subscriber() {
        let bus = EventBus::new();
        let mut rx1 = bus.subscribe();
        let mut rx2 = bus.subscribe();

        bus.publish(WearableEvent::data("42"));

        assert_eq!(rx1.recv().await.unwrap(), WearableEvent::data("42"));
        assert_eq!(rx2.recv().await.unwrap(), WearableEvent::data("42"));
    }

    #[test]
    fn publish_without_subscribers_is_silent() {
        let bus = EventBus::new();
        bus.publish(WearableEvent::Disconnected);
    }

    #[test]
    fn late_subscriber_misses_earlier_events() {
        let bus = EventBus::new();
        bus.publish(WearableEvent::Connected);

        let mut rx = bus.subscribe();
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn clone_shares_same_channel() {
        let bus1 = EventBus::new();
        let bus2 = bus1.clone();

        let _rx = bus1.subscribe();
        assert_eq!(bus2.subscriber_count(), 1);
    }

    #[test]
    fn phase_starts_idle() {
        let bus = EventBus::new();
        assert_eq!(bus.phase(), ConnectionPhase::Idle);
        assert_eq!(*bus.watch_phase().borrow(), ConnectionPhase::Idle);
    }

    #[test]
    fn unchanged_phase_does_not_wake_watchers() {
        let bus = EventBus::new();
        let mut rx = bus.watch_phase();

        bus.publish_phase(ConnectionPhase::Idle);
        assert!(!rx.has_changed().unwrap());

        bus.publish_phase(ConnectionPhase::Discovering);
        assert!(rx.has_changed().unwrap());
        assert_eq!(*rx.borrow_and_update(), ConnectionPhase::Discovering);
    }

    #[tokio::test]
    async fn late_watcher_sees_current_phase() {
        let bus = EventBus::new();
        bus.publish_phase(ConnectionPhase::Connected);

        let mut rx = bus.clone().watch_phase();
        let phase = rx.wait_for(|phase| phase.is_connected()).await.unwrap();
        assert_eq!(*phase, ConnectionPhase::Connected);
    }

    #[test]
    fn lagging_subscriber_is_told() {
        let bus = EventBus::with_capacity(2);
        let mut rx = bus.subscribe();
        for i in 0..4 {
            bus.publish(WearableEvent::data(i.to_string()));
        }
        assert!(matches!(
            rx.try_recv(),
            Err(broadcast::error::TryRecvError::Lagged(_))
        ));
    }
}
