// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Bluetooth device discovery for wearable kits.
//!
//! Discovery itself is performed by the [`Transport`](crate::transport::Transport),
//! which reports every device it sees. This module holds what the controller
//! keeps from those reports:
//!
//! - [`DiscoveredDevice`] - address and name of a device seen during discovery
//! - [`NamePattern`] - the case-insensitive filter deciding which devices are kits
//!
//! # Discovery Mechanism
//!
//! 1. The controller starts discovery on the transport.
//! 2. Each `Found` notification is checked against the [`NamePattern`].
//! 3. Matching devices are remembered; the one whose name equals the
//!    configured target name exactly is connected to.
//! 4. When the transport reports `Finished`, the controller emits `found`
//!    if anything matched, or an error otherwise.
//!
//! # Examples
//!
//! ```
//! use wearable_kit::discovery::{DiscoveredDevice, NamePattern};
//!
//! let pattern = NamePattern::for_name("wV3");
//! let device = DiscoveredDevice::new("30:14:08:26:24:39", "wV3_0E0039AF");
//!
//! assert!(pattern.matches(&device.name));
//! assert!(!pattern.matches("JBL Flip"));
//! ```

use std::fmt;

use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// A device reported by the transport during discovery.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DiscoveredDevice {
    /// Bluetooth address, e.g. `30:14:08:26:24:39`.
    pub address: String,
    /// Advertised device name.
    pub name: String,
}

impl DiscoveredDevice {
    /// Creates a device record.
    #[must_use]
    pub fn new(address: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for DiscoveredDevice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.address)
    }
}

/// Case-insensitive filter applied to discovered device names.
#[derive(Debug, Clone)]
pub struct NamePattern {
    matcher: Matcher,
}

#[derive(Debug, Clone)]
enum Matcher {
    /// Lower-cased literal that must appear in the name.
    Contains(String),
    Regex(Regex),
}

impl NamePattern {
    /// Builds a pattern from a regular expression.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidPattern` if the expression does not compile.
    pub fn new(pattern: &str) -> Result<Self, ConfigError> {
        let regex = RegexBuilder::new(pattern).case_insensitive(true).build()?;
        Ok(Self {
            matcher: Matcher::Regex(regex),
        })
    }

    /// Builds a pattern matching any name that contains `name` literally.
    #[must_use]
    pub fn for_name(name: &str) -> Self {
        Self {
            matcher: Matcher::Contains(name.to_lowercase()),
        }
    }

    /// Returns `true` if `name` is accepted.
    #[must_use]
    pub fn matches(&self, name: &str) -> bool {
        match &self.matcher {
            Matcher::Contains(needle) => name.to_lowercase().contains(needle.as_str()),
            Matcher::Regex(regex) => regex.is_match(name),
        }
    }

    /// Returns the source of the pattern.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match &self.matcher {
            Matcher::Contains(needle) => needle,
            Matcher::Regex(regex) => regex.as_str(),
        }
    }
}
