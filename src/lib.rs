// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Wearable Kit - A Rust library to control Bluetooth serial wearable kits.
//!
//! This library provides an async API to discover a wearable kit over
//! Bluetooth Classic, connect to its serial port and drive it with short
//! ASCII commands.
//!
//! # Supported Features
//!
//! - **LED control**: Red, green and blue channels, full or custom intensity
//! - **Music**: Built-in Mario and Christmas tracks
//! - **Sensors**: Temperature, luminosity and accelerometer queries
//! - **Events**: Broadcast channel and per-kind callbacks
//!
//! # Wire Format
//!
//! Every command is `#`, a two-letter code and a zero-padded four-digit
//! value, terminated by a newline: `#LR0255`, `#AC0002`, `#PM0001`.
//! Replies are plain text and are handed to listeners verbatim.
//!
//! # Quick Start
//!
//! The RFCOMM transport needs the `rfcomm` feature and a running BlueZ
//! daemon.
//!
//! ```no_run
//! # #[cfg(feature = "rfcomm")]
//! # async fn example() -> wearable_kit::Result<()> {
//! use wearable_kit::config::RfcommConfig;
//! use wearable_kit::subscription::Subscribable;
//! use wearable_kit::transport::{RfcommTransport, notification_channel};
//! use wearable_kit::Wearable;
//!
//! let (notifier, notifications) = notification_channel();
//! let transport = RfcommTransport::new(RfcommConfig::default(), notifier).await?;
//! let kit = Wearable::builder(transport, notifications)
//!     .with_name("wV3")
//!     .build()?;
//!
//! kit.on_sensor_data(|reading| {
//!     println!("{}: {:?}", reading.event_name(), reading.value);
//! });
//!
//! kit.find_device().await?;
//! kit.run().await;
//! # Ok(())
//! # }
//! ```
//!
//! # Custom Transports
//!
//! Any type implementing [`Transport`] can carry the commands. The
//! transport reports discovery results, incoming bytes and failures through
//! the [`Notifier`](transport::Notifier) returned by
//! [`notification_channel`](transport::notification_channel).
//!
//! # Reply Attribution
//!
//! The kit does not tag its replies. Data received after a sensor query is
//! attributed to the most recent query, see [`telemetry`].

pub mod command;
pub mod config;
pub mod discovery;
pub mod error;
pub mod event;
pub mod state;
pub mod subscription;
pub mod telemetry;
pub mod transport;
pub mod types;
mod wearable;

pub use command::{Command, LedCommand, MusicCommand, SensorCommand};
pub use config::{RfcommConfig, WearableConfig};
pub use discovery::{DiscoveredDevice, NamePattern};
pub use error::{ConfigError, Error, Result, TransportError};
pub use event::{EventBus, WearableEvent};
pub use state::{ConnectionPhase, ControllerState};
pub use subscription::{CallbackRegistry, Subscribable, SubscriptionId};
pub use telemetry::{SensorReading, SensorSnapshot};
pub use transport::{Transport, TransportEvent};
pub use types::{Axis, Intensity, LedColor, Sensor, Track};
pub use wearable::{Wearable, WearableBuilder};
