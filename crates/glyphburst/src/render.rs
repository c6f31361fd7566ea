//! Drawing surface abstraction and the default particle renderer.
//!
//! The engine draws through the [`Surface`] trait and never owns a real
//! screen. A surface must be able to fill and clear rectangles, move its
//! drawing origin, and draw filled/stroked text with an optional shadow.
//!
//! # Implementing a Surface
//!
//! ```rust
//! use glyphburst::{InputKind, Rect, Rgb, Size, Surface, TextStyle};
//!
//! struct Headless;
//!
//! impl Surface for Headless {
//!     fn size(&self) -> Option<Size> { Some(Size::new(320.0, 200.0)) }
//!     fn bounding_rect(&self) -> Rect { Rect::new(0.0, 0.0, 320.0, 200.0) }
//!     fn fill_rect(&mut self, _rect: Rect, _color: Rgb) {}
//!     fn clear_rect(&mut self, _rect: Rect) {}
//!     fn translate(&mut self, _x: f64, _y: f64) {}
//!     fn reset_transform(&mut self) {}
//!     fn draw_text(&mut self, _text: &str, _style: &TextStyle) {}
//! }
//! ```

use crate::color::{Rgb, Rgba};
use crate::geometry::{Rect, Size};
use crate::interaction::InputKind;
use crate::particle::Particle;
use crate::theme::ThemeColors;

/// A 2D drawing surface the engine renders onto.
pub trait Surface {
    /// Current size, or `None` while the surface is not mounted or has no
    /// drawing context yet.
    fn size(&self) -> Option<Size>;

    /// Position and size of the surface in device (window) coordinates.
    fn bounding_rect(&self) -> Rect;

    /// Fills `rect` with an opaque color.
    fn fill_rect(&mut self, rect: Rect, color: Rgb);

    /// Clears `rect` to transparent.
    fn clear_rect(&mut self, rect: Rect);

    /// Moves the drawing origin to `(x, y)` relative to the current origin.
    fn translate(&mut self, x: f64, y: f64);

    /// Restores the drawing origin to the surface's top-left corner.
    fn reset_transform(&mut self);

    /// Draws `text` centered on the current origin.
    fn draw_text(&mut self, text: &str, style: &TextStyle);

    /// Starts delivering the given input kinds to the host.
    ///
    /// Surfaces without input simply ignore this.
    fn listen(&mut self, _kinds: &[InputKind]) {}
}

/// Font used for particle glyphs.
#[derive(Debug, Clone, PartialEq)]
pub struct Font {
    /// Font size in pixels.
    pub size_px: f64,
    /// Family name; hosts may ignore it.
    pub family: &'static str,
    /// Bold weight.
    pub bold: bool,
}

impl Default for Font {
    fn default() -> Self {
        Self {
            size_px: 6.0,
            family: "sans-serif",
            bold: true,
        }
    }
}

/// Outline drawn around text.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    /// Outline color.
    pub color: Rgba,
    /// Line width in pixels.
    pub width: f64,
}

/// Glow drawn behind text.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shadow {
    /// Shadow color.
    pub color: Rgba,
    /// Blur radius in pixels.
    pub blur: f64,
}

/// Complete style for one `draw_text` call.
#[derive(Debug, Clone, PartialEq)]
pub struct TextStyle {
    /// Font.
    pub font: Font,
    /// Fill color.
    pub fill: Rgba,
    /// Optional outline.
    pub stroke: Option<Stroke>,
    /// Optional glow.
    pub shadow: Option<Shadow>,
}

/// Draws one particle. Called once per visible particle per frame.
pub trait Renderer {
    /// Draws `particle` onto `surface` using the frame's theme colors.
    fn draw(&mut self, surface: &mut dyn Surface, particle: &Particle, theme: &ThemeColors);
}

/// Default renderer: each particle is drawn as its own glyph.
///
/// The fill uses the particle color at the particle's opacity; the stroke and
/// shadow use the theme accent.
#[derive(Debug, Clone, PartialEq)]
pub struct GlyphRenderer {
    /// Font for every particle.
    pub font: Font,
    /// Outline width; zero disables the stroke.
    pub stroke_width: f64,
    /// Glow radius; zero disables the shadow.
    pub shadow_blur: f64,
}

impl Default for GlyphRenderer {
    fn default() -> Self {
        Self {
            font: Font::default(),
            stroke_width: 0.5,
            shadow_blur: 4.0,
        }
    }
}

impl GlyphRenderer {
    /// Style for `particle` under `theme`.
    pub fn style(&self, particle: &Particle, theme: &ThemeColors) -> TextStyle {
        let stroke = (self.stroke_width > 0.0).then(|| Stroke {
            color: Rgba::new(theme.accent, particle.opacity),
            width: self.stroke_width,
        });
        let shadow = (self.shadow_blur > 0.0).then(|| Shadow {
            color: Rgba::new(theme.accent, particle.opacity * 0.5),
            blur: self.shadow_blur,
        });
        TextStyle {
            font: self.font.clone(),
            fill: Rgba::new(particle.color, particle.opacity),
            stroke,
            shadow,
        }
    }
}

impl Renderer for GlyphRenderer {
    fn draw(&mut self, surface: &mut dyn Surface, particle: &Particle, theme: &ThemeColors) {
        let style = self.style(particle, theme);
        let mut buf = [0u8; 4];
        surface.translate(particle.pos.x, particle.pos.y);
        surface.draw_text(particle.glyph.encode_utf8(&mut buf), &style);
        surface.reset_transform();
    }
}

/// Whether a particle is opaque enough to be worth drawing.
#[inline]
pub fn visible(particle: &Particle, floor: f64) -> bool {
    particle.opacity > floor
}
