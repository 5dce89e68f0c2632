// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! In-memory transport recording every write.

#![allow(dead_code)]

use parking_lot::Mutex;
use tokio::sync::broadcast;
use wearable_kit::transport::{Notifier, Transport, TransportEvent, notification_channel};
use wearable_kit::{TransportError, Wearable, WearableConfig, WearableEvent};

pub const KIT_ADDRESS: &str = "30:14:08:26:24:39";

#[derive(Debug, Default)]
struct MockState {
    written: Vec<String>,
    open: bool,
    discoveries: usize,
    closes: usize,
    connected_to: Option<(String, u8)>,
    discovery_error: Option<String>,
    channel_error: Option<String>,
    connect_error: Option<String>,
    write_error: Option<String>,
}

/// Transport double driven by the test.
#[derive(Debug)]
pub struct MockTransport {
    notifier: Notifier,
    state: Mutex<MockState>,
}

impl MockTransport {
    pub fn new(notifier: Notifier) -> Self {
        Self {
            notifier,
            state: Mutex::new(MockState::default()),
        }
    }

    /// Every line written so far, newline included.
    pub fn written(&self) -> Vec<String> {
        self.state.lock().written.clone()
    }

    pub fn clear_written(&self) {
        self.state.lock().written.clear();
    }

    pub fn discoveries(&self) -> usize {
        self.state.lock().discoveries
    }

    pub fn closes(&self) -> usize {
        self.state.lock().closes
    }

    pub fn connected_to(&self) -> Option<(String, u8)> {
        self.state.lock().connected_to.clone()
    }

    pub fn set_open(&self, open: bool) {
        self.state.lock().open = open;
    }

    pub fn fail_discovery(&self, message: &str) {
        self.state.lock().discovery_error = Some(message.to_string());
    }

    pub fn fail_channel(&self) {
        self.state.lock().channel_error = Some(KIT_ADDRESS.to_string());
    }

    pub fn fail_connect(&self, message: &str) {
        self.state.lock().connect_error = Some(message.to_string());
    }

    pub fn fail_write(&self, message: &str) {
        self.state.lock().write_error = Some(message.to_string());
    }

    /// Reports a device as seen by discovery.
    pub fn found(&self, address: &str, name: &str) {
        self.notifier.notify(TransportEvent::Found {
            address: address.to_string(),
            name: name.to_string(),
        });
    }

    pub fn notify(&self, event: TransportEvent) {
        self.notifier.notify(event);
    }

    pub fn receive(&self, text: &str) {
        self.notifier
            .notify(TransportEvent::Data(text.as_bytes().to_vec()));
    }
}

impl Transport for MockTransport {
    async fn start_discovery(&self) -> Result<(), TransportError> {
        let mut state = self.state.lock();
        if let Some(message) = state.discovery_error.clone() {
            return Err(TransportError::DiscoveryFailed(message));
        }
        state.discoveries += 1;
        Ok(())
    }

    async fn find_channel(&self, _address: &str) -> Result<u8, TransportError> {
        match self.state.lock().channel_error.clone() {
            Some(address) => Err(TransportError::ChannelUnavailable(address)),
            None => Ok(1),
        }
    }

    async fn connect(&self, address: &str, channel: u8) -> Result<(), TransportError> {
        let mut state = self.state.lock();
        if let Some(message) = state.connect_error.clone() {
            return Err(TransportError::ConnectionFailed(message));
        }
        state.open = true;
        state.connected_to = Some((address.to_string(), channel));
        Ok(())
    }

    async fn close(&self) {
        let mut state = self.state.lock();
        state.open = false;
        state.closes += 1;
    }

    async fn write(&self, bytes: &[u8]) -> Result<(), TransportError> {
        let mut state = self.state.lock();
        if !state.open {
            return Err(TransportError::NotOpen);
        }
        if let Some(message) = state.write_error.clone() {
            return Err(TransportError::WriteFailed(message));
        }
        state
            .written
            .push(String::from_utf8_lossy(bytes).into_owned());
        Ok(())
    }

    fn is_open(&self) -> bool {
        self.state.lock().open
    }
}

/// Builds a controller over a fresh mock transport.
pub fn kit_with(config: WearableConfig) -> Wearable<MockTransport> {
    let (notifier, notifications) = notification_channel();
    Wearable::builder(MockTransport::new(notifier), notifications)
        .with_config(config)
        .build()
        .unwrap()
}

pub fn kit() -> Wearable<MockTransport> {
    kit_with(WearableConfig::default())
}

/// Builds a controller and walks it through discovery to a connection.
pub async fn connected_kit() -> Wearable<MockTransport> {
    let kit = kit();
    kit.find_device().await.unwrap();
    kit.transport().found(KIT_ADDRESS, "wV3");
    kit.process_pending().await;
    assert!(kit.is_connected());
    kit.transport().clear_written();
    kit
}

/// Returns every event queued on the receiver.
pub fn drain(events: &mut broadcast::Receiver<WearableEvent>) -> Vec<WearableEvent> {
    let mut received = Vec::new();
    while let Ok(event) = events.try_recv() {
        received.push(event);
    }
    received
}

/// Names of every event queued on the receiver.
pub fn drain_names(events: &mut broadcast::Receiver<WearableEvent>) -> Vec<String> {
    drain(events).iter().map(WearableEvent::name).collect()
}
