// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the wearable kit library.
//!
//! Every failure the controller observes is also surfaced as a single
//! [`WearableEvent::Error`](crate::event::WearableEvent::Error) whose message
//! is the `Display` output of the error returned here.

use thiserror::Error;

/// The main error type for this library.
#[derive(Debug, Error)]
pub enum Error {
    /// Error reported by the underlying transport.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// Invalid configuration.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Discovery finished without finding a matching device.
    #[error("could not find the device \"{name}\"")]
    DeviceNotFound {
        /// The configured target name.
        name: String,
    },

    /// The RFCOMM channel of a discovered device could not be resolved.
    #[error("could not find channel of \"{name}\": {source}")]
    ChannelNotFound {
        /// Name of the device whose channel was requested.
        name: String,
        /// The transport failure.
        #[source]
        source: TransportError,
    },
}

/// Errors reported by a [`Transport`](crate::transport::Transport).
#[derive(Debug, Error)]
pub enum TransportError {
    /// Device discovery could not be started or failed while running.
    #[error("discovery failed: {0}")]
    DiscoveryFailed(String),

    /// No serial channel is available for the address.
    #[error("no serial channel for {0}")]
    ChannelUnavailable(String),

    /// Opening the serial connection failed.
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// Writing to the serial connection failed.
    #[error("write failed: {0}")]
    WriteFailed(String),

    /// The connection is not open.
    #[error("connection is not open")]
    NotOpen,

    /// The device address could not be parsed.
    #[error("invalid address: {0}")]
    InvalidAddress(String),

    /// Error raised by the BlueZ stack.
    #[cfg(feature = "rfcomm")]
    #[error("bluetooth error: {0}")]
    Bluetooth(#[from] bluer::Error),
}

/// Errors related to loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// The discovery name pattern is not a valid regular expression.
    #[error("invalid name pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    /// A field holds an unusable value.
    #[error("invalid {field}: {message}")]
    InvalidValue {
        /// The offending field.
        field: String,
        /// Why the value was rejected.
        message: String,
    },
}

/// A specialized Result type for this library.
pub type Result<T> = std::result::Result<T, Error>;
