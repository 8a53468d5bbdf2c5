//! RGBA color handling with hex parsing and serialization.

// Allow small types passed by reference for API consistency
#![allow(clippy::trivially_copy_pass_by_ref)]

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::error::{TunableError, TunableResult};

/// Color channel addressed by color controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorChannel {
    /// Red channel
    Red,
    /// Green channel
    Green,
    /// Blue channel
    Blue,
    /// Alpha channel
    Alpha,
}

impl ColorChannel {
    /// All channels in editing order.
    pub const ALL: [Self; 4] = [Self::Red, Self::Green, Self::Blue, Self::Alpha];

    /// Next channel (Red -> Green -> Blue -> Alpha -> Red).
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Red => Self::Green,
            Self::Green => Self::Blue,
            Self::Blue => Self::Alpha,
            Self::Alpha => Self::Red,
        }
    }

    /// Single-letter label for compact displays.
    #[must_use]
    pub const fn letter(self) -> char {
        match self {
            Self::Red => 'R',
            Self::Green => 'G',
            Self::Blue => 'B',
            Self::Alpha => 'A',
        }
    }
}

/// RGBA color value with hex string representation.
///
/// Serialized as `"#RRGGBB"` when fully opaque and `"#RRGGBBAA"` otherwise,
/// which is the form stored in the `colorValue` field of a spec file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RgbaColor {
    /// Red channel (0-255)
    pub r: u8,
    /// Green channel (0-255)
    pub g: u8,
    /// Blue channel (0-255)
    pub b: u8,
    /// Alpha channel (0-255, 255 = opaque)
    pub a: u8,
}

impl RgbaColor {
    /// Creates an opaque color from individual channel values.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Creates a color with an explicit alpha channel.
    #[must_use]
    pub const fn with_alpha(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Parses a color from a hex string.
    ///
    /// Supports "#RRGGBB", "RRGGBB", "#RRGGBBAA" and "RRGGBBAA", in either case.
    ///
    /// # Examples
    ///
    /// ```
    /// use tunespec::models::RgbaColor;
    ///
    /// let color = RgbaColor::from_hex("#FF0000").unwrap();
    /// assert_eq!(color, RgbaColor::new(255, 0, 0));
    ///
    /// let color = RgbaColor::from_hex("00FF0080").unwrap();
    /// assert_eq!(color, RgbaColor::with_alpha(0, 255, 0, 128));
    /// ```
    pub fn from_hex(hex: &str) -> TunableResult<Self> {
        let trimmed = hex.trim();
        let digits = trimmed.strip_prefix('#').unwrap_or(trimmed);

        let invalid = |reason| TunableError::InvalidColor {
            value: hex.to_string(),
            reason,
        };

        if digits.len() != 6 && digits.len() != 8 {
            return Err(invalid("expected 6 or 8 hex digits (RRGGBB or RRGGBBAA)"));
        }
        if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(invalid("invalid hex digit"));
        }

        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&digits[range], 16).map_err(|_| invalid("invalid hex digit"))
        };

        let r = channel(0..2)?;
        let g = channel(2..4)?;
        let b = channel(4..6)?;
        let a = if digits.len() == 8 { channel(6..8)? } else { 255 };

        Ok(Self { r, g, b, a })
    }

    /// Converts the color to an uppercase hex string.
    ///
    /// The alpha pair is only written when the color is not fully opaque.
    ///
    /// ```
    /// use tunespec::models::RgbaColor;
    ///
    /// assert_eq!(RgbaColor::new(0, 128, 255).to_hex(), "#0080FF");
    /// assert_eq!(RgbaColor::with_alpha(0, 128, 255, 16).to_hex(), "#0080FF10");
    /// ```
    #[must_use]
    pub fn to_hex(&self) -> String {
        if self.a == 255 {
            format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
        } else {
            format!("#{:02X}{:02X}{:02X}{:02X}", self.r, self.g, self.b, self.a)
        }
    }

    /// Reads one channel.
    #[must_use]
    pub const fn channel(&self, channel: ColorChannel) -> u8 {
        match channel {
            ColorChannel::Red => self.r,
            ColorChannel::Green => self.g,
            ColorChannel::Blue => self.b,
            ColorChannel::Alpha => self.a,
        }
    }

    /// Returns a copy with one channel shifted by `delta`, saturating at 0 and 255.
    #[must_use]
    pub fn adjusted(&self, channel: ColorChannel, delta: i32) -> Self {
        let shifted = (i32::from(self.channel(channel)) + delta).clamp(0, 255);
        let value = u8::try_from(shifted).unwrap_or(u8::MAX);
        let mut out = *self;
        match channel {
            ColorChannel::Red => out.r = value,
            ColorChannel::Green => out.g = value,
            ColorChannel::Blue => out.b = value,
            ColorChannel::Alpha => out.a = value,
        }
        out
    }

    /// Converts the color to a Ratatui Color for terminal rendering (alpha is ignored).
    #[cfg(feature = "ratatui")]
    #[must_use]
    pub const fn to_ratatui_color(&self) -> ratatui::style::Color {
        ratatui::style::Color::Rgb(self.r, self.g, self.b)
    }
}

impl fmt::Display for RgbaColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl Default for RgbaColor {
    /// Default color is opaque white (#FFFFFF).
    fn default() -> Self {
        Self::new(255, 255, 255)
    }
}

impl FromStr for RgbaColor {
    type Err = TunableError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl Serialize for RgbaColor {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for RgbaColor {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_hex_valid() {
        let color = RgbaColor::from_hex("#FF0000").unwrap();
        assert_eq!(color, RgbaColor::new(255, 0, 0));

        let color = RgbaColor::from_hex("00FF00").unwrap();
        assert_eq!(color, RgbaColor::new(0, 255, 0));

        let color = RgbaColor::from_hex("#0000ff").unwrap();
        assert_eq!(color, RgbaColor::new(0, 0, 255));

        let color = RgbaColor::from_hex("  #FFFFFF  ").unwrap();
        assert_eq!(color, RgbaColor::new(255, 255, 255));

        let color = RgbaColor::from_hex("#10203040").unwrap();
        assert_eq!(color, RgbaColor::with_alpha(0x10, 0x20, 0x30, 0x40));
    }

    #[test]
    fn test_from_hex_invalid() {
        assert!(RgbaColor::from_hex("#FFF").is_err());
        assert!(RgbaColor::from_hex("#FFFFFFF").is_err());
        assert!(RgbaColor::from_hex("GGGGGG").is_err());
        assert!(RgbaColor::from_hex("").is_err());
        assert!(RgbaColor::from_hex("#").is_err());
        assert!(RgbaColor::from_hex("#ÄÄÄÄ").is_err());
    }

    #[test]
    fn test_from_hex_rejects_signs() {
        assert!(RgbaColor::from_hex("#+1+2+3").is_err());
        assert!(RgbaColor::from_hex("+F+F+F").is_err());
        assert!(RgbaColor::from_hex("#-1FFFF").is_err());
        assert!(RgbaColor::from_hex("#FF FF F").is_err());
    }

    #[test]
    fn test_to_hex_omits_opaque_alpha() {
        assert_eq!(RgbaColor::new(255, 0, 0).to_hex(), "#FF0000");
        assert_eq!(RgbaColor::with_alpha(255, 0, 0, 255).to_hex(), "#FF0000");
        assert_eq!(RgbaColor::with_alpha(0, 0, 0, 0).to_hex(), "#00000000");
    }

    #[test]
    fn test_adjusted_saturates() {
        let color = RgbaColor::new(250, 5, 100);
        assert_eq!(color.adjusted(ColorChannel::Red, 10).r, 255);
        assert_eq!(color.adjusted(ColorChannel::Green, -10).g, 0);
        assert_eq!(color.adjusted(ColorChannel::Blue, 28).b, 128);
        assert_eq!(color.adjusted(ColorChannel::Alpha, -55).a, 200);
    }

    #[test]
    fn test_channel_cycle_returns_to_start() {
        let mut channel = ColorChannel::Red;
        for _ in 0..ColorChannel::ALL.len() {
            channel = channel.next();
        }
        assert_eq!(channel, ColorChannel::Red);
    }

    #[test]
    fn test_serde_uses_hex_strings() {
        let json = serde_json::to_string(&RgbaColor::new(1, 2, 3)).unwrap();
        assert_eq!(json, "\"#010203\"");

        let parsed: RgbaColor = serde_json::from_str("\"#01020380\"").unwrap();
        assert_eq!(parsed, RgbaColor::with_alpha(1, 2, 3, 128));

        assert!(serde_json::from_str::<RgbaColor>("\"nope\"").is_err());
    }
}
