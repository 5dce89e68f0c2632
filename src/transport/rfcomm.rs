// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Bluetooth Classic serial transport backed by BlueZ.
//!
//! Discovery runs through the adapter's device discovery for a fixed window,
//! connections are RFCOMM streams.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use bluer::rfcomm::{SocketAddr, Stream};
use bluer::{Adapter, AdapterEvent, Address, Session, Uuid};
use futures::{StreamExt, pin_mut};
use tokio::io::{AsyncReadExt, AsyncWriteExt, ReadHalf, WriteHalf};
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

use crate::config::RfcommConfig;
use crate::error::{Error, TransportError};
use crate::transport::{Notifier, Transport, TransportEvent};

/// Serial Port Profile service class.
const SERIAL_PORT_UUID: Uuid = Uuid::from_u128(0x0000_1101_0000_1000_8000_0080_5f9b_34fb);

const READ_BUFFER_SIZE: usize = 1024;

/// RFCOMM transport using the system's BlueZ daemon.
///
/// # Examples
///
/// ```no_run
/// # async fn example() -> wearable_kit::Result<()> {
/// use wearable_kit::config::RfcommConfig;
/// use wearable_kit::transport::{RfcommTransport, notification_channel};
///
/// let (notifier, _notifications) = notification_channel();
/// let config = RfcommConfig::default().with_adapter("hci0");
/// let transport = RfcommTransport::new(config, notifier).await?;
/// # Ok(())
/// # }
/// ```
pub struct RfcommTransport {
    _session: Session,
    adapter: Adapter,
    config: RfcommConfig,
    notifier: Notifier,
    writer: Mutex<Option<WriteHalf<Stream>>>,
    open: Arc<AtomicBool>,
    reader: parking_lot::Mutex<Option<JoinHandle<()>>>,
    discovery: parking_lot::Mutex<Option<JoinHandle<()>>>,
}

impl RfcommTransport {
    /// Opens a BlueZ session and powers the configured adapter on.
    ///
    /// # Errors
    ///
    /// Returns error if the configuration is invalid, BlueZ is unreachable
    /// or the adapter does not exist.
    pub async fn new(config: RfcommConfig, notifier: Notifier) -> Result<Self, Error> {
        config.validate()?;

        let session = Session::new().await.map_err(TransportError::from)?;
        let adapter = match &config.adapter {
            Some(name) => session.adapter(name),
            None => session.default_adapter().await,
        }
        .map_err(TransportError::from)?;
        adapter
            .set_powered(true)
            .await
            .map_err(TransportError::from)?;

        tracing::info!(adapter = %adapter.name(), channel = config.channel, "Using Bluetooth adapter");

        Ok(Self {
            _session: session,
            adapter,
            config,
            notifier,
            writer: Mutex::new(None),
            open: Arc::new(AtomicBool::new(false)),
            reader: parking_lot::Mutex::new(None),
            discovery: parking_lot::Mutex::new(None),
        })
    }

    /// Returns the adapter in use.
    #[must_use]
    pub fn adapter(&self) -> &Adapter {
        &self.adapter
    }

    /// Returns the transport configuration.
    #[must_use]
    pub fn config(&self) -> &RfcommConfig {
        &self.config
    }

    fn stop_reader(&self) {
        if let Some(handle) = self.reader.lock().take() {
            handle.abort();
        }
    }
}

impl Transport for RfcommTransport {
    async fn start_discovery(&self) -> Result<(), TransportError> {
        if let Some(previous) = self.discovery.lock().take() {
            previous.abort();
        }

        let events = self
            .adapter
            .discover_devices()
            .await
            .map_err(|e| TransportError::DiscoveryFailed(e.to_string()))?;

        let adapter = self.adapter.clone();
        let notifier = self.notifier.clone();
        let window = self.config.discovery_timeout();
        tracing::debug!(window_secs = window.as_secs(), "Discovery started");

        let handle = tokio::spawn(async move {
            pin_mut!(events);
            let deadline = tokio::time::sleep(window);
            tokio::pin!(deadline);

            loop {
                tokio::select! {
                    () = &mut deadline => break,
                    event = events.next() => match event {
                        Some(AdapterEvent::DeviceAdded(address)) => {
                            report_device(&adapter, address, &notifier).await;
                        }
                        Some(_) => {}
                        None => break,
                    },
                }
            }

            tracing::debug!("Discovery window closed");
            notifier.notify(TransportEvent::Finished);
        });
        *self.discovery.lock() = Some(handle);
        Ok(())
    }

    async fn find_channel(&self, address: &str) -> Result<u8, TransportError> {
        let parsed = parse_address(address)?;
        let device = self.adapter.device(parsed)?;

        // an unknown service list means BlueZ has not resolved it yet
        if let Some(uuids) = device.uuids().await?
            && !uuids.contains(&SERIAL_PORT_UUID)
        {
            return Err(TransportError::ChannelUnavailable(address.to_string()));
        }
        Ok(self.config.channel)
    }

    async fn connect(&self, address: &str, channel: u8) -> Result<(), TransportError> {
        let parsed = parse_address(address)?;
        if self.is_open() {
            self.close().await;
        }
        if let Some(discovery) = self.discovery.lock().take() {
            // BlueZ connects faster once inquiry has stopped
            discovery.abort();
            self.notifier.notify(TransportEvent::Finished);
        }

        let stream = Stream::connect(SocketAddr::new(parsed, channel))
            .await
            .map_err(|e| TransportError::ConnectionFailed(format!("{address}: {e}")))?;
        let (reader, writer) = tokio::io::split(stream);

        *self.writer.lock().await = Some(writer);
        self.open.store(true, Ordering::Release);

        let handle = tokio::spawn(read_loop(
            reader,
            self.notifier.clone(),
            Arc::clone(&self.open),
        ));
        if let Some(previous) = self.reader.lock().replace(handle) {
            previous.abort();
        }

        tracing::info!(address = %address, channel, "RFCOMM stream open");
        Ok(())
    }

    async fn close(&self) {
        self.stop_reader();
        self.open.store(false, Ordering::Release);

        if let Some(mut writer) = self.writer.lock().await.take() {
            if let Err(e) = writer.shutdown().await {
                tracing::debug!(error = %e, "Error while shutting down RFCOMM stream");
            }
            tracing::info!("RFCOMM stream closed");
        }
    }

    async fn write(&self, bytes: &[u8]) -> Result<(), TransportError> {
        let mut guard = self.writer.lock().await;
        let writer = guard.as_mut().ok_or(TransportError::NotOpen)?;

        writer
            .write_all(bytes)
            .await
            .map_err(|e| TransportError::WriteFailed(e.to_string()))?;
        writer
            .flush()
            .await
            .map_err(|e| TransportError::WriteFailed(e.to_string()))
    }

    fn is_open(&self) -> bool {
        self.open.load(Ordering::Acquire)
    }
}

impl Drop for RfcommTransport {
    fn drop(&mut self) {
        self.stop_reader();
        if let Some(discovery) = self.discovery.lock().take() {
            discovery.abort();
        }
    }
}

impl std::fmt::Debug for RfcommTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RfcommTransport")
            .field("adapter", &self.adapter.name())
            .field("config", &self.config)
            .field("open", &self.is_open())
            .finish_non_exhaustive()
    }
}

/// Looks up the name of a newly seen device and reports it.
async fn report_device(adapter: &Adapter, address: Address, notifier: &Notifier) {
    let name = match adapter.device(address) {
        Ok(device) => device.name().await,
        Err(e) => Err(e),
    };
    match name {
        Ok(Some(name)) => {
            tracing::trace!(address = %address, device = %name, "Device seen");
            notifier.notify(TransportEvent::Found {
                address: address.to_string(),
                name,
            });
        }
        Ok(None) => tracing::trace!(address = %address, "Skipping unnamed device"),
        Err(e) => tracing::debug!(address = %address, error = %e, "Could not read device name"),
    }
}

/// Forwards incoming bytes until the stream ends.
async fn read_loop(mut reader: ReadHalf<Stream>, notifier: Notifier, open: Arc<AtomicBool>) {
    let mut buffer = [0u8; READ_BUFFER_SIZE];
    loop {
        match reader.read(&mut buffer).await {
            Ok(0) => {
                open.store(false, Ordering::Release);
                tracing::info!("RFCOMM stream closed by peer");
                notifier.notify(TransportEvent::Closed);
                break;
            }
            Ok(n) => notifier.notify(TransportEvent::Data(buffer[..n].to_vec())),
            Err(e) => {
                open.store(false, Ordering::Release);
                tracing::warn!(error = %e, "RFCOMM read failed");
                notifier.notify(TransportEvent::Failure(format!("read failed: {e}")));
                break;
            }
        }
    }
}

/// Parses `AA:BB:CC:DD:EE:FF` or `AA-BB-CC-DD-EE-FF`.
fn parse_address(address: &str) -> Result<Address, TransportError> {
    address
        .trim()
        .replace('-', ":")
        .parse()
        .map_err(|_| TransportError::InvalidAddress(address.to_string()))
}
