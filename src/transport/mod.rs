// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Serial transports for talking to wearable kits.
//!
//! A [`Transport`] is the Bluetooth serial binding underneath the
//! [`Wearable`](crate::Wearable) controller. Requests (discover, connect,
//! write, ...) are async methods; everything the transport observes on its
//! own is reported as a [`TransportEvent`] through a [`Notifier`].
//!
//! # Transports
//!
//! - `RfcommTransport` (feature `rfcomm`): Bluetooth Classic RFCOMM through BlueZ
//!
//! Any other binding, including test doubles, only needs to implement
//! [`Transport`] and push its notifications through the [`Notifier`] created
//! alongside the controller's [`Notifications`].
//!
//! # Examples
//!
//! ```
//! use wearable_kit::transport::{TransportEvent, notification_channel};
//!
//! let (notifier, mut notifications) = notification_channel();
//! notifier.notify(TransportEvent::Finished);
//!
//! assert_eq!(notifications.try_recv().ok(), Some(TransportEvent::Finished));
//! ```

#[cfg(feature = "rfcomm")]
mod rfcomm;

#[cfg(feature = "rfcomm")]
pub use rfcomm::RfcommTransport;

use tokio::sync::mpsc;

use crate::error::TransportError;

/// Something the transport observed and reports to the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportEvent {
    /// A device was seen during discovery.
    Found {
        /// Bluetooth address of the device.
        address: String,
        /// Advertised name of the device.
        name: String,
    },
    /// The discovery phase ended.
    Finished,
    /// Raw bytes arrived on the open connection.
    Data(Vec<u8>),
    /// The remote side closed the connection.
    Closed,
    /// The transport failed outside of a request.
    Failure(String),
}

/// Receiving end of transport notifications, owned by the controller.
pub type Notifications = mpsc::UnboundedReceiver<TransportEvent>;

/// Sending end of transport notifications, owned by the transport.
#[derive(Debug, Clone)]
pub struct Notifier {
    sender: mpsc::UnboundedSender<TransportEvent>,
}

impl Notifier {
    /// Reports an event to the controller.
    ///
    /// Events sent after the controller was dropped are discarded.
    pub fn notify(&self, event: TransportEvent) {
        if self.sender.send(event).is_err() {
            tracing::trace!("Dropping transport event, controller is gone");
        }
    }

    /// Returns `true` if the controller side has been dropped.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }
}

/// Creates a connected notifier/notifications pair.
#[must_use]
pub fn notification_channel() -> (Notifier, Notifications) {
    let (sender, receiver) = mpsc::unbounded_channel();
    (Notifier { sender }, receiver)
}

/// Trait for serial bindings that can reach a wearable kit.
///
/// Implementations must not report [`TransportEvent::Closed`] for a close
/// requested through [`Transport::close`]; that notification is reserved for
/// the remote side going away.
#[allow(async_fn_in_trait)]
pub trait Transport {
    /// Starts device discovery.
    ///
    /// Returns once discovery is running. Devices are reported as
    /// [`TransportEvent::Found`] and the end of discovery as
    /// [`TransportEvent::Finished`].
    ///
    /// # Errors
    ///
    /// Returns `TransportError` if discovery cannot be started.
    async fn start_discovery(&self) -> Result<(), TransportError>;

    /// Resolves the serial channel offered at `address`.
    ///
    /// # Errors
    ///
    /// Returns `TransportError` if no channel can be found.
    async fn find_channel(&self, address: &str) -> Result<u8, TransportError>;

    /// Opens a serial connection to `address` on `channel`.
    ///
    /// # Errors
    ///
    /// Returns `TransportError` if the connection cannot be established.
    async fn connect(&self, address: &str, channel: u8) -> Result<(), TransportError>;

    /// Closes the connection, if any. Safe to call when already closed.
    async fn close(&self);

    /// Writes raw bytes to the open connection.
    ///
    /// # Errors
    ///
    /// Returns `TransportError` if the connection is not open or the write fails.
    async fn write(&self, bytes: &[u8]) -> Result<(), TransportError>;

    /// Returns `true` while the connection is open.
    fn is_open(&self) -> bool;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notifications_preserve_order() {
        let (notifier, mut notifications) = notification_channel();
        notifier.notify(TransportEvent::Found {
            address: "AA:BB:CC:DD:EE:FF".to_string(),
            name: "wV3".to_string(),
        });
        notifier.notify(TransportEvent::Data(b"23.5".to_vec()));
        notifier.notify(TransportEvent::Finished);

        assert!(matches!(
            notifications.try_recv(),
            Ok(TransportEvent::Found { .. })
        ));
        assert_eq!(
            notifications.try_recv().ok(),
            Some(TransportEvent::Data(b"23.5".to_vec()))
        );
        assert_eq!(notifications.try_recv().ok(), Some(TransportEvent::Finished));
        assert!(notifications.try_recv().is_err());
    }

    #[test]
    fn notify_after_receiver_dropped_is_ignored() {
        let (notifier, notifications) = notification_channel();
        drop(notifications);

        assert!(notifier.is_closed());
        notifier.notify(TransportEvent::Closed);
    }
}
