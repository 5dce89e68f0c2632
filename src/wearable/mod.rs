// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! High-level controller for a wearable kit.
//!
//! [`Wearable`] drives discovery, connection and commands over any
//! [`Transport`], and turns transport notifications into
//! [`WearableEvent`]s.

mod builder;

pub use builder::WearableBuilder;

use parking_lot::RwLock;
use tokio::sync::Mutex;

use crate::command::{Command, LedCommand, MusicCommand, SensorCommand};
use crate::discovery::{DiscoveredDevice, NamePattern};
use crate::error::Error;
use crate::event::{EventBus, WearableEvent};
use crate::state::{ConnectionPhase, ControllerState};
use crate::subscription::{CallbackRegistry, Subscribable, SubscriptionId};
use crate::telemetry::{SensorReading, SensorSnapshot};
use crate::transport::{Notifications, Transport, TransportEvent};
use crate::types::{Axis, Intensity, LedColor, Sensor, Track};

/// A wearable kit reachable over a serial transport.
///
/// The controller owns its transport. Transport notifications are consumed
/// by [`run`](Self::run) (or [`process_pending`](Self::process_pending)),
/// which must be polled for discovery to lead to a connection and for
/// incoming data to be delivered.
///
/// # Examples
///
/// ```no_run
/// # #[cfg(feature = "rfcomm")]
/// # async fn example() -> wearable_kit::Result<()> {
/// use wearable_kit::config::RfcommConfig;
/// use wearable_kit::transport::{RfcommTransport, notification_channel};
/// use wearable_kit::{Wearable, WearableEvent};
///
/// let (notifier, notifications) = notification_channel();
/// let transport = RfcommTransport::new(RfcommConfig::default(), notifier).await?;
/// let kit = Wearable::builder(transport, notifications).with_name("wV3").build()?;
///
/// let mut events = kit.subscribe();
/// kit.find_device().await?;
///
/// tokio::select! {
///     () = kit.run() => {}
///     _ = async {
///         while let Ok(event) = events.recv().await {
///             if event == WearableEvent::Connected {
///                 kit.led_on(Some("red"), None).await?;
///                 break;
///             }
///         }
///         Ok::<_, wearable_kit::Error>(())
///     } => {}
/// }
/// # Ok(())
/// # }
/// ```
pub struct Wearable<T: Transport> {
    transport: T,
    notifications: Mutex<Notifications>,
    state: RwLock<ControllerState>,
    pattern: NamePattern,
    sensor_events: bool,
    callbacks: CallbackRegistry,
    events: EventBus,
}

impl<T: Transport> Wearable<T> {
    /// Starts building a controller around `transport`.
    ///
    /// `notifications` is the receiving half of the channel whose
    /// [`Notifier`](crate::transport::Notifier) was handed to the transport.
    #[must_use]
    pub fn builder(transport: T, notifications: Notifications) -> WearableBuilder<T> {
        WearableBuilder::new(transport, notifications)
    }

    pub(crate) fn from_parts(
        transport: T,
        notifications: Notifications,
        target_name: String,
        pattern: NamePattern,
        sensor_events: bool,
    ) -> Self {
        Self {
            transport,
            notifications: Mutex::new(notifications),
            state: RwLock::new(ControllerState::new(target_name)),
            pattern,
            sensor_events,
            callbacks: CallbackRegistry::new(),
            events: EventBus::new(),
        }
    }

    // =========================================================================
    // Discovery and connection
    // =========================================================================

    /// Starts looking for the kit.
    ///
    /// An open connection is closed first. The first discovered device whose
    /// name equals the target name is connected to automatically while
    /// notifications are being processed.
    ///
    /// # Errors
    ///
    /// Returns error if discovery cannot be started.
    pub async fn find_device(&self) -> Result<(), Error> {
        if self.phase().is_connected() {
            self.disconnect().await;
        }

        {
            let mut state = self.state.write();
            state.clear_devices();
            state.transition(ConnectionPhase::Discovering);
        }
        self.events.publish_phase(self.phase());
        tracing::info!(device = %self.target_name(), "Starting discovery");

        if let Err(e) = self.transport.start_discovery().await {
            let error = Error::from(e);
            tracing::warn!(error = %error, "Discovery could not start");
            self.emit(WearableEvent::error(error.to_string()));
            self.set_phase(ConnectionPhase::Idle);
            return Err(error);
        }
        Ok(())
    }

    /// Connects to the discovered device named like the target.
    ///
    /// Does nothing when no such device has been discovered or when already
    /// connected.
    ///
    /// # Errors
    ///
    /// Returns error if the serial channel cannot be resolved or the
    /// connection fails.
    pub async fn connect(&self) -> Result<(), Error> {
        let device = {
            let mut state = self.state.write();
            let Some(device) = state.target_device().cloned() else {
                tracing::debug!(device = %state.target_name(), "No discovered device to connect to");
                return Ok(());
            };
            if state.phase().is_connected() {
                if self.transport.is_open() {
                    return Ok(());
                }
                state.transition(ConnectionPhase::Disconnected);
            }
            state.transition(ConnectionPhase::Connecting);
            device
        };
        self.events.publish_phase(self.phase());

        tracing::info!(device = %device.name, address = %device.address, "Connecting");

        let channel = match self.transport.find_channel(&device.address).await {
            Ok(channel) => channel,
            Err(source) => {
                let error = Error::ChannelNotFound {
                    name: device.name.clone(),
                    source,
                };
                return Err(self.connection_failed(error));
            }
        };
        tracing::debug!(address = %device.address, channel, "Resolved serial channel");

        if let Err(e) = self.transport.connect(&device.address, channel).await {
            return Err(self.connection_failed(Error::from(e)));
        }

        self.set_phase(ConnectionPhase::Connected);
        tracing::info!(device = %device.name, "Connected");
        self.emit(WearableEvent::Connected);
        Ok(())
    }

    fn connection_failed(&self, error: Error) -> Error {
        tracing::warn!(error = %error, "Connection failed");
        self.emit(WearableEvent::error(error.to_string()));
        self.set_phase(ConnectionPhase::Disconnected);
        error
    }

    /// Disconnects from the kit.
    ///
    /// Always emits [`WearableEvent::Disconnected`], even when nothing was
    /// connected.
    pub async fn disconnect(&self) {
        tracing::info!(device = %self.target_name(), "Disconnecting");
        self.emit(WearableEvent::Disconnected);
        self.set_phase(ConnectionPhase::Disconnected);
        self.transport.close().await;
    }

    /// Returns `true` while the transport connection is open.
    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.transport.is_open()
    }

    // =========================================================================
    // Commands
    // =========================================================================

    /// Sends a command.
    ///
    /// # Errors
    ///
    /// Returns error if the write fails.
    pub async fn send_command<C: Command>(&self, command: &C) -> Result<(), Error> {
        self.send_raw(&command.to_wire()).await
    }

    /// Sends a raw command string, terminated by a newline.
    ///
    /// # Errors
    ///
    /// Returns error if the write fails.
    pub async fn send_raw(&self, command: &str) -> Result<(), Error> {
        tracing::debug!(command, "Sending command");
        let line = format!("{command}\n");
        if let Err(e) = self.transport.write(line.as_bytes()).await {
            let error = Error::from(e);
            tracing::warn!(command, error = %error, "Command failed");
            self.emit(WearableEvent::error(error.to_string()));
            return Err(error);
        }
        Ok(())
    }

    /// Lights the LED.
    ///
    /// Unknown or missing colors fall back to green. Without an intensity the
    /// channel is driven at full brightness; otherwise the intensity is
    /// clamped to `0..=255`.
    ///
    /// # Errors
    ///
    /// Returns error if a write fails.
    pub async fn led_on(&self, color: Option<&str>, intensity: Option<f64>) -> Result<(), Error> {
        let color = color.map(LedColor::from_name_or_default).unwrap_or_default();
        self.led_on_color(color, intensity.map(Intensity::clamped))
            .await
    }

    /// Lights one LED channel after turning all of them off.
    ///
    /// # Errors
    ///
    /// Returns error if a write fails.
    pub async fn led_on_color(
        &self,
        color: LedColor,
        intensity: Option<Intensity>,
    ) -> Result<(), Error> {
        self.led_off().await?;
        let command = match intensity {
            Some(intensity) => LedCommand::custom(color, intensity),
            None => LedCommand::high(color),
        };
        self.send_command(&command).await
    }

    /// Turns every LED channel off.
    ///
    /// # Errors
    ///
    /// Returns error if a write fails.
    pub async fn led_off(&self) -> Result<(), Error> {
        for command in LedCommand::all_off() {
            self.send_command(&command).await?;
        }
        Ok(())
    }

    /// Plays a track by name, falling back to Mario.
    ///
    /// # Errors
    ///
    /// Returns error if the write fails.
    pub async fn play_music(&self, track: Option<&str>) -> Result<(), Error> {
        let track = track.map(Track::from_name_or_default).unwrap_or_default();
        self.play_track(track).await
    }

    /// Plays a track.
    ///
    /// # Errors
    ///
    /// Returns error if the write fails.
    pub async fn play_track(&self, track: Track) -> Result<(), Error> {
        self.send_command(&MusicCommand::new(track)).await
    }

    /// Queries the temperature. The reply arrives as a data event.
    ///
    /// # Errors
    ///
    /// Returns error if the write fails.
    pub async fn get_temperature(&self) -> Result<(), Error> {
        self.query(SensorCommand::Temperature).await
    }

    /// Queries the luminosity. The reply arrives as a data event.
    ///
    /// # Errors
    ///
    /// Returns error if the write fails.
    pub async fn get_luminosity(&self) -> Result<(), Error> {
        self.query(SensorCommand::Luminosity).await
    }

    /// Queries the X, Y and Z accelerometer axes, in that order.
    ///
    /// # Errors
    ///
    /// Returns error if a write fails.
    pub async fn read_accelerometer(&self) -> Result<(), Error> {
        for axis in Axis::ALL {
            self.read_accelerometer_axis(axis).await?;
        }
        Ok(())
    }

    /// Queries one accelerometer axis.
    ///
    /// # Errors
    ///
    /// Returns error if the write fails.
    pub async fn read_accelerometer_axis(&self, axis: Axis) -> Result<(), Error> {
        self.query(SensorCommand::accelerometer(axis)).await
    }

    async fn query(&self, command: SensorCommand) -> Result<(), Error> {
        // replies carry no tag, the latest query wins
        self.state.write().record_query(command.sensor());
        self.send_command(&command).await
    }

    // =========================================================================
    // Notifications
    // =========================================================================

    /// Handles bytes received from the kit.
    pub fn handle_data(&self, bytes: &[u8]) {
        let text = String::from_utf8_lossy(bytes).into_owned();
        tracing::trace!(text = %text.escape_debug(), "Received data");

        let reading = {
            let mut state = self.state.write();
            state.last_query().map(|sensor| {
                let reading = SensorReading::parse(sensor, &text);
                state.apply_reading(&reading);
                reading
            })
        };

        self.emit(WearableEvent::Data { text });
        if self.sensor_events
            && let Some(reading) = reading
        {
            self.emit(WearableEvent::SensorData(reading));
        }
    }

    /// Handles one transport notification.
    pub async fn handle_transport_event(&self, event: TransportEvent) {
        match event {
            TransportEvent::Found { address, name } => self.on_found(address, name).await,
            TransportEvent::Finished => self.on_discovery_finished(),
            TransportEvent::Data(bytes) => self.handle_data(&bytes),
            TransportEvent::Closed => {
                tracing::info!(device = %self.target_name(), "Connection closed by peer");
                self.disconnect().await;
            }
            TransportEvent::Failure(message) => self.on_failure(message).await,
        }
    }

    async fn on_found(&self, address: String, name: String) {
        if !self.pattern.matches(&name) {
            tracing::trace!(device = %name, address = %address, "Ignoring device");
            return;
        }

        let discovering = {
            let mut state = self.state.write();
            if !state.remember(DiscoveredDevice::new(&address, &name)) {
                return;
            }
            state.phase() == ConnectionPhase::Discovering
        };
        tracing::info!(device = %name, address = %address, "Found device");

        if discovering && let Err(e) = self.connect().await {
            tracing::debug!(error = %e, "Automatic connection failed");
        }
    }

    fn on_discovery_finished(&self) {
        let (devices, target) = {
            let mut state = self.state.write();
            if state.phase() == ConnectionPhase::Discovering {
                state.transition(ConnectionPhase::Idle);
            }
            (state.known_devices().to_vec(), state.target_name().to_string())
        };
        self.events.publish_phase(self.phase());

        if devices.is_empty() {
            let error = Error::DeviceNotFound { name: target };
            tracing::warn!(error = %error, "Discovery finished");
            self.emit(WearableEvent::error(error.to_string()));
        } else {
            tracing::debug!(count = devices.len(), "Discovery finished");
            self.emit(WearableEvent::Found { devices });
        }
    }

    async fn on_failure(&self, message: String) {
        tracing::warn!(error = %message, phase = %self.phase(), "Transport failure");
        // discovery keeps running until Finished, later matches still connect
        let was_linked = matches!(
            self.phase(),
            ConnectionPhase::Connecting | ConnectionPhase::Connected
        );
        if was_linked {
            self.set_phase(ConnectionPhase::Disconnected);
        }
        self.emit(WearableEvent::error(message));
        if was_linked {
            self.transport.close().await;
        }
    }

    /// Processes transport notifications until the transport goes away.
    ///
    /// Holds the notification receiver while running, so
    /// [`process_pending`](Self::process_pending) waits for it to return.
    pub async fn run(&self) {
        let mut notifications = self.notifications.lock().await;
        while let Some(event) = notifications.recv().await {
            self.handle_transport_event(event).await;
        }
        tracing::debug!("Transport notification channel closed");
    }

    /// Processes the notifications already queued, without waiting.
    ///
    /// Returns the number of notifications handled.
    pub async fn process_pending(&self) -> usize {
        let mut notifications = self.notifications.lock().await;
        let mut handled = 0;
        while let Ok(event) = notifications.try_recv() {
            self.handle_transport_event(event).await;
            handled += 1;
        }
        handled
    }

    fn set_phase(&self, next: ConnectionPhase) {
        let phase = {
            let mut state = self.state.write();
            state.transition(next);
            state.phase()
        };
        self.events.publish_phase(phase);
    }

    fn emit(&self, event: WearableEvent) {
        tracing::debug!(event = %event.name(), "Emitting event");
        self.callbacks.dispatch(&event);
        self.events.publish(event);
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Returns a copy of the controller state.
    #[must_use]
    pub fn state(&self) -> ControllerState {
        self.state.read().clone()
    }

    /// Returns the connection phase.
    #[must_use]
    pub fn phase(&self) -> ConnectionPhase {
        self.state.read().phase()
    }

    /// Returns the devices accepted during the last discovery.
    #[must_use]
    pub fn known_devices(&self) -> Vec<DiscoveredDevice> {
        self.state.read().known_devices().to_vec()
    }

    /// Returns the latest sensor values.
    #[must_use]
    pub fn readings(&self) -> SensorSnapshot {
        self.state.read().readings().clone()
    }

    /// Returns the latest value of one sensor.
    #[must_use]
    pub fn reading(&self, sensor: Sensor) -> Option<f64> {
        self.state.read().readings().value(sensor)
    }

    /// Returns the name of the device to connect to.
    #[must_use]
    pub fn target_name(&self) -> String {
        self.state.read().target_name().to_string()
    }

    /// Returns the underlying transport.
    #[must_use]
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Returns the callback registry.
    #[must_use]
    pub fn callbacks(&self) -> &CallbackRegistry {
        &self.callbacks
    }

    /// Watches the connection phase, starting from the current one.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use wearable_kit::transport::Transport;
    /// use wearable_kit::Wearable;
    ///
    /// async fn wait_until_settled<T: Transport>(kit: &Wearable<T>) -> bool {
    ///     let mut phase = kit.watch_phase();
    ///     match phase.wait_for(|phase| phase.is_settled()).await {
    ///         Ok(phase) => phase.is_connected(),
    ///         Err(_) => false,
    ///     }
    /// }
    /// ```
    #[must_use]
    pub fn watch_phase(&self) -> tokio::sync::watch::Receiver<ConnectionPhase> {
        self.events.watch_phase()
    }

    /// Subscribes to every event emitted from now on.
    #[must_use]
    pub fn subscribe(&self) -> tokio::sync::broadcast::Receiver<WearableEvent> {
        self.events.subscribe()
    }
}

impl<T: Transport> Subscribable for Wearable<T> {
    fn on_found<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&[DiscoveredDevice]) + Send + Sync + 'static,
    {
        self.callbacks.on_found(callback)
    }

    fn on_connected<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.callbacks.on_connected(callback)
    }

    fn on_disconnected<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.callbacks.on_disconnected(callback)
    }

    fn on_error<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&str) + Send + Sync + 'static,
    {
        self.callbacks.on_error(callback)
    }

    fn on_data<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&str) + Send + Sync + 'static,
    {
        self.callbacks.on_data(callback)
    }

    fn on_sensor_data<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&SensorReading) + Send + Sync + 'static,
    {
        self.callbacks.on_sensor_data(callback)
    }

    fn on_event<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&WearableEvent) + Send + Sync + 'static,
    {
        self.callbacks.on_event(callback)
    }

    fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.callbacks.unsubscribe(id)
    }
}

impl<T: Transport> std::fmt::Debug for Wearable<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.read();
        f.debug_struct("Wearable")
            .field("target_name", &state.target_name())
            .field("phase", &state.phase())
            .field("pattern", &self.pattern.as_str())
            .field("sensor_events", &self.sensor_events)
            .finish_non_exhaustive()
    }
}

