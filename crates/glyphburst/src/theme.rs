//! Theme color lookup.
//!
//! The engine reads two named colors, `background` and `accent`, from a
//! caller-supplied [`ThemeSource`] once per frame. Missing names fall back to
//! built-in defaults, so a host can theme as little or as much as it likes.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::color::Rgb;

/// Name of the background color.
pub const BACKGROUND_KEY: &str = "background";

/// Name of the accent color.
pub const ACCENT_KEY: &str = "accent";

/// Background used when the theme has none.
pub const DEFAULT_BACKGROUND: Rgb = Rgb::new(0x0f, 0x17, 0x2a);

/// Accent used when the theme has none.
pub const DEFAULT_ACCENT: Rgb = Rgb::new(0x38, 0xbd, 0xf8);

/// Something that can answer "what color is `name`?".
pub trait ThemeSource {
    /// The color registered under `name`, if any.
    fn color(&self, name: &str) -> Option<Rgb>;
}

impl ThemeSource for HashMap<String, Rgb> {
    fn color(&self, name: &str) -> Option<Rgb> {
        self.get(name).copied()
    }
}

impl<T: ThemeSource + ?Sized> ThemeSource for &T {
    fn color(&self, name: &str) -> Option<Rgb> {
        (**self).color(name)
    }
}

/// A fixed theme with optional background and accent.
///
/// Deserializes from hex strings, so a config file can carry it directly:
///
/// ```toml
/// background = "#000000"
/// accent = "#f472b6"
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StaticTheme {
    /// Background override.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background: Option<Rgb>,
    /// Accent override.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accent: Option<Rgb>,
}

impl ThemeSource for StaticTheme {
    fn color(&self, name: &str) -> Option<Rgb> {
        match name {
            BACKGROUND_KEY => self.background,
            ACCENT_KEY => self.accent,
            _ => None,
        }
    }
}

/// Colors resolved for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemeColors {
    /// Surface fill color.
    pub background: Rgb,
    /// Stroke and glow color.
    pub accent: Rgb,
}

impl Default for ThemeColors {
    fn default() -> Self {
        Self {
            background: DEFAULT_BACKGROUND,
            accent: DEFAULT_ACCENT,
        }
    }
}

impl ThemeColors {
    /// Reads both colors from `source`, falling back to the defaults.
    ///
    /// ```rust
    /// use glyphburst::{Rgb, StaticTheme, ThemeColors};
    /// use glyphburst::theme::DEFAULT_ACCENT;
    ///
    /// let theme = StaticTheme { background: Some(Rgb::new(1, 2, 3)), accent: None };
    /// let colors = ThemeColors::resolve(&theme);
    /// assert_eq!(colors.background, Rgb::new(1, 2, 3));
    /// assert_eq!(colors.accent, DEFAULT_ACCENT);
    /// ```
    pub fn resolve<T: ThemeSource + ?Sized>(source: &T) -> Self {
        Self {
            background: source.color(BACKGROUND_KEY).unwrap_or(DEFAULT_BACKGROUND),
            accent: source.color(ACCENT_KEY).unwrap_or(DEFAULT_ACCENT),
        }
    }
}
