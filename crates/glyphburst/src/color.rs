//! RGB colors for particles and theme lookups.
//!
//! Colors are exchanged as `#rrggbb` (or shorthand `#rgb`) hex strings, both
//! in configuration files and from theme sources.
//!
//! # Example
//!
//! ```rust
//! use glyphburst::{Rgb, Rgba};
//!
//! let accent = Rgb::from_hex("#38bdf8")?;
//! assert_eq!(accent, Rgb::new(0x38, 0xbd, 0xf8));
//!
//! let faded = Rgba::new(accent, 1.7);
//! assert_eq!(faded.alpha, 1.0);
//! # Ok::<(), glyphburst::ColorError>(())
//! ```

use std::fmt;
use std::str::FromStr;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Errors produced when parsing a color string.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ColorError {
    /// The string was empty or whitespace.
    #[error("color string is empty")]
    Empty,
    /// The string was not a 3- or 6-digit hex color.
    #[error("invalid hex color '{0}'")]
    InvalidHex(String),
}

/// An opaque 24-bit color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Rgb {
    /// Creates a color from its channels.
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parses `#rrggbb`, `#rgb`, or the same without the leading `#`.
    pub fn from_hex(s: &str) -> Result<Self, ColorError> {
        let raw = s.trim();
        if raw.is_empty() {
            return Err(ColorError::Empty);
        }
        let hex = raw.strip_prefix('#').unwrap_or(raw);
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ColorError::InvalidHex(raw.to_string()));
        }
        let channel = |digits: &str| {
            u8::from_str_radix(digits, 16).map_err(|_| ColorError::InvalidHex(raw.to_string()))
        };
        match hex.len() {
            6 => Ok(Self::new(
                channel(&hex[0..2])?,
                channel(&hex[2..4])?,
                channel(&hex[4..6])?,
            )),
            3 => Ok(Self::new(
                channel(&hex[0..1])? * 17,
                channel(&hex[1..2])? * 17,
                channel(&hex[2..3])? * 17,
            )),
            _ => Err(ColorError::InvalidHex(raw.to_string())),
        }
    }

    /// Formats as lowercase `#rrggbb`.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Rgb {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl Serialize for Rgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Rgb {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_str(RgbVisitor)
    }
}

struct RgbVisitor;

impl Visitor<'_> for RgbVisitor {
    type Value = Rgb;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "a hex color string such as \"#38bdf8\"")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        Rgb::from_hex(v).map_err(E::custom)
    }
}

/// A color with opacity in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rgba {
    /// Base color.
    pub rgb: Rgb,
    /// Opacity, clamped to `[0, 1]`.
    pub alpha: f64,
}

impl Rgba {
    /// Creates a color with the given opacity, clamped to `[0, 1]`.
    ///
    /// NaN is treated as fully transparent.
    pub fn new(rgb: Rgb, alpha: f64) -> Self {
        let alpha = if alpha.is_nan() {
            0.0
        } else {
            alpha.clamp(0.0, 1.0)
        };
        Self { rgb, alpha }
    }

    /// A fully opaque color.
    pub const fn opaque(rgb: Rgb) -> Self {
        Self { rgb, alpha: 1.0 }
    }

    /// Composites this color over `background`, returning the visible color.
    pub fn over(self, background: Rgb) -> Rgb {
        // Clamped to the channel range before the cast.
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let mix = |fg: u8, bg: u8| {
            let v = f64::from(fg) * self.alpha + f64::from(bg) * (1.0 - self.alpha);
            v.round().clamp(0.0, 255.0) as u8
        };
        Rgb::new(
            mix(self.rgb.r, background.r),
            mix(self.rgb.g, background.g),
            mix(self.rgb.b, background.b),
        )
    }
}
