// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! LED intensity and the permissive clamp applied to it.
//!
//! Intensities are never rejected: values above the range (or that are not
//! numbers at all) become full brightness, negative values become off.

use std::fmt;

/// Lower bound of the LED intensity range.
pub const MIN_INTENSITY: f64 = 0.0;

/// Upper bound of the LED intensity range.
pub const MAX_INTENSITY: f64 = 255.0;

/// Bounds a value into `[0, 255]`.
///
/// NaN and anything greater than 255 yield 255, anything below 0 yields 0,
/// other values are returned unchanged.
///
/// # Examples
///
/// ```
/// use wearable_kit::types::clamp;
///
/// assert_eq!(clamp(300.0), 255.0);
/// assert_eq!(clamp(-5.0), 0.0);
/// assert_eq!(clamp(12.5), 12.5);
/// assert_eq!(clamp(f64::NAN), 255.0);
/// ```
#[must_use]
pub fn clamp(value: f64) -> f64 {
    if value.is_nan() || value > MAX_INTENSITY {
        MAX_INTENSITY
    } else if value < MIN_INTENSITY {
        MIN_INTENSITY
    } else {
        value
    }
}

/// Parses `input` as a floating point number and clamps it.
///
/// Text that does not parse as a number yields 255.
///
/// # Examples
///
/// ```
/// use wearable_kit::types::clamp_str;
///
/// assert_eq!(clamp_str("128"), 128.0);
/// assert_eq!(clamp_str(" 42.5 "), 42.5);
/// assert_eq!(clamp_str("bright"), 255.0);
/// ```
#[must_use]
pub fn clamp_str(input: &str) -> f64 {
    input.trim().parse::<f64>().map_or(MAX_INTENSITY, clamp)
}

/// Intensity of a single LED channel (0-255).
///
/// Built from a clamped value, so construction never fails.
///
/// # Examples
///
/// ```
/// use wearable_kit::types::Intensity;
///
/// assert_eq!(Intensity::clamped(300.0), Intensity::MAX);
/// assert_eq!(Intensity::clamped(-1.0), Intensity::OFF);
/// assert_eq!(Intensity::clamped(99.9).value(), 99);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Intensity(u8);

impl Intensity {
    /// LED off.
    pub const OFF: Self = Self(0);

    /// Full brightness.
    pub const MAX: Self = Self(255);

    /// Creates an intensity from an exact channel value.
    #[must_use]
    pub const fn new(value: u8) -> Self {
        Self(value)
    }

    /// Creates an intensity from an arbitrary number, clamping it first.
    ///
    /// Fractional values are truncated toward zero.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn clamped(value: f64) -> Self {
        // clamp() guarantees a value in [0, 255]
        Self(clamp(value) as u8)
    }

    /// Parses and clamps a textual intensity.
    #[must_use]
    pub fn parse_lenient(input: &str) -> Self {
        Self::clamped(clamp_str(input))
    }

    /// Returns the channel value.
    #[must_use]
    pub const fn value(&self) -> u8 {
        self.0
    }
}

impl Default for Intensity {
    fn default() -> Self {
        Self::MAX
    }
}

impl From<u8> for Intensity {
    fn from(value: u8) -> Self {
        Self(value)
    }
}

impl fmt::Display for Intensity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:03}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_above_range() {
        assert_eq!(clamp(255.01), 255.0);
        assert_eq!(clamp(1e9), 255.0);
        assert_eq!(clamp(f64::INFINITY), 255.0);
    }

    #[test]
    fn clamp_below_range() {
        assert_eq!(clamp(-0.5), 0.0);
        assert_eq!(clamp(f64::NEG_INFINITY), 0.0);
    }

    #[test]
    fn clamp_in_range_is_identity() {
        for v in [0.0, 1.0, 127.5, 254.999, 255.0] {
            assert_eq!(clamp(v), v);
        }
    }

    #[test]
    fn clamp_non_numeric_is_max() {
        assert_eq!(clamp(f64::NAN), 255.0);
        assert_eq!(clamp_str(""), 255.0);
        assert_eq!(clamp_str("abc"), 255.0);
    }

    #[test]
    fn clamp_str_parses_numbers() {
        assert_eq!(clamp_str("-5"), 0.0);
        assert_eq!(clamp_str("300"), 255.0);
        assert_eq!(clamp_str("7"), 7.0);
    }

    #[test]
    fn clamp_is_idempotent() {
        for v in [-1e6, -1.0, 0.0, 3.25, 200.0, 255.0, 256.0, f64::NAN, f64::INFINITY] {
            let once = clamp(v);
            assert_eq!(clamp(once), once);
        }
    }

    #[test]
    fn intensity_truncates_fractions() {
        assert_eq!(Intensity::clamped(12.9).value(), 12);
        assert_eq!(Intensity::clamped(0.4), Intensity::OFF);
    }

    #[test]
    fn intensity_parse_lenient() {
        assert_eq!(Intensity::parse_lenient("64"), Intensity::new(64));
        assert_eq!(Intensity::parse_lenient("max"), Intensity::MAX);
    }

    #[test]
    fn intensity_display_is_zero_padded() {
        assert_eq!(Intensity::new(7).to_string(), "007");
        assert_eq!(Intensity::MAX.to_string(), "255");
        assert_eq!(Intensity::OFF.to_string(), "000");
    }

    #[test]
    fn intensity_default_is_max() {
        assert_eq!(Intensity::default(), Intensity::MAX);
    }
}
