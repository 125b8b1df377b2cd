//! Base particle color and per-draw alpha.
//!
//! Colors are configured as hex strings. Alpha is applied at draw time and
//! quantized to a byte, the same way a two-digit hex alpha suffix would be.

use crate::error::ColorParseError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// An opaque RGB color, serialized as `#rrggbb`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// A color with a straight (unmultiplied) alpha channel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    /// `#6366f1`, the default particle color.
    pub const INDIGO: Color = Color::rgb(0x63, 0x66, 0xf1);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn with_alpha(self, a: u8) -> Rgba {
        Rgba {
            r: self.r,
            g: self.g,
            b: self.b,
            a,
        }
    }

    /// Applies an opacity in `[0, 1]` as `floor(opacity * 255)`.
    pub fn with_opacity(self, opacity: f32) -> Rgba {
        self.with_alpha(alpha_byte(opacity * 255.0))
    }
}

/// Floors a value onto the `0..=255` alpha range.
pub(crate) fn alpha_byte(value: f32) -> u8 {
    value.floor().clamp(0.0, 255.0) as u8
}

impl FromStr for Color {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let Some(digits) = s.strip_prefix('#') else {
            return Err(ColorParseError::MissingHash(s.to_owned()));
        };
        if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ColorParseError::BadDigit(s.to_owned()));
        }

        let channel =
            |hex: &str| u8::from_str_radix(hex, 16).map_err(|_| ColorParseError::BadDigit(s.to_owned()));

        match digits.len() {
            6 => Ok(Color::rgb(
                channel(&digits[0..2])?,
                channel(&digits[2..4])?,
                channel(&digits[4..6])?,
            )),
            // `#abc` is shorthand for `#aabbcc`.
            3 => Ok(Color::rgb(
                channel(&digits[0..1])? * 0x11,
                channel(&digits[1..2])? * 0x11,
                channel(&digits[2..3])? * 0x11,
            )),
            _ => Err(ColorParseError::BadLength(s.to_owned())),
        }
    }
}

impl TryFrom<String> for Color {
    type Error = ColorParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Color> for String {
    fn from(c: Color) -> Self {
        c.to_string()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::INDIGO
    }
}
