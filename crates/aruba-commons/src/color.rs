//! RGBA colors built from 8-bit integer channels.
//!
//! Channels are stored normalized to `[0.0, 1.0]`. Construction is checked:
//! an out-of-range channel or alpha is reported as a [`ColorError`] naming
//! the offending component, and is never clamped into range.

use std::fmt;

use crate::error::ColorError;

/// Largest value of an 8-bit color channel.
pub const CHANNEL_MAX: i32 = 255;

/// One of the three color channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    Red,
    Green,
    Blue,
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Channel::Red => "red",
            Channel::Green => "green",
            Channel::Blue => "blue",
        };
        f.write_str(name)
    }
}

/// An immutable color with normalized channels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    red: f64,
    green: f64,
    blue: f64,
    alpha: f64,
}

impl Color {
    /// Creates an opaque color from 0-255 channels.
    pub fn from_rgb(red: i32, green: i32, blue: i32) -> Result<Self, ColorError> {
        Self::from_rgba(red, green, blue, 1.0)
    }

    /// Creates a color from 0-255 channels and a 0.0-1.0 alpha.
    ///
    /// Components are checked in the order red, green, blue, alpha; the
    /// first violation is returned. A NaN alpha is out of range.
    pub fn from_rgba(red: i32, green: i32, blue: i32, alpha: f64) -> Result<Self, ColorError> {
        let red = normalize(Channel::Red, red)?;
        let green = normalize(Channel::Green, green)?;
        let blue = normalize(Channel::Blue, blue)?;

        if !(0.0..=1.0).contains(&alpha) {
            return Err(ColorError::AlphaOutOfRange { value: alpha });
        }

        Ok(Self {
            red,
            green,
            blue,
            alpha,
        })
    }

    /// Creates a color from a `0xRRGGBB` value.
    pub fn from_hex(hex: u32, alpha: f64) -> Result<Self, ColorError> {
        if hex > 0x00FF_FFFF {
            return Err(ColorError::HexOutOfRange { value: hex });
        }

        let red = ((hex >> 16) & 0xFF) as i32;
        let green = ((hex >> 8) & 0xFF) as i32;
        let blue = (hex & 0xFF) as i32;
        Self::from_rgba(red, green, blue, alpha)
    }

    pub fn red(&self) -> f64 {
        self.red
    }

    pub fn green(&self) -> f64 {
        self.green
    }

    pub fn blue(&self) -> f64 {
        self.blue
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Returns the channels as rounded 8-bit values, alpha included.
    pub fn to_rgba8(&self) -> [u8; 4] {
        let quantize = |v: f64| (v * CHANNEL_MAX as f64).round() as u8;
        [
            quantize(self.red),
            quantize(self.green),
            quantize(self.blue),
            quantize(self.alpha),
        ]
    }
}

fn normalize(channel: Channel, value: i32) -> Result<f64, ColorError> {
    if !(0..=CHANNEL_MAX).contains(&value) {
        return Err(ColorError::ChannelOutOfRange { channel, value });
    }
    Ok(value as f64 / CHANNEL_MAX as f64)
}
