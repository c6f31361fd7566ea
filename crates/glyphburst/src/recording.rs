//! In-memory surface for testing and headless runs.
//!
//! [`RecordingSurface`] implements [`Surface`] by appending every call to a
//! list of [`DrawOp`]s, so tests can assert on exactly what a frame drew
//! without a real display.
//!
//! # Example
//!
//! ```rust
//! use glyphburst::{DrawOp, RecordingSurface, Rect, Rgb, Size, Surface};
//!
//! let mut surface = RecordingSurface::new(Size::new(64.0, 32.0));
//! surface.fill_rect(Rect::new(0.0, 0.0, 64.0, 32.0), Rgb::new(0, 0, 0));
//! assert_eq!(surface.ops().len(), 1);
//! assert!(matches!(surface.ops()[0], DrawOp::Fill { .. }));
//! ```

use crate::color::Rgb;
use crate::geometry::{Point, Rect, Size};
use crate::interaction::InputKind;
use crate::render::{Surface, TextStyle};

/// One recorded surface call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    /// `fill_rect`.
    Fill {
        /// Filled area.
        rect: Rect,
        /// Fill color.
        color: Rgb,
    },
    /// `clear_rect`.
    Clear {
        /// Cleared area.
        rect: Rect,
    },
    /// `translate`.
    Translate {
        /// Horizontal shift.
        x: f64,
        /// Vertical shift.
        y: f64,
    },
    /// `reset_transform`.
    ResetTransform,
    /// `draw_text`, with the origin it was drawn at.
    Text {
        /// Drawn text.
        text: String,
        /// Absolute origin at the time of the call.
        origin: Point,
        /// Style used.
        style: TextStyle,
    },
}

/// A [`Surface`] that records every call.
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    size: Option<Size>,
    bounds_origin: Point,
    origin: Point,
    ops: Vec<DrawOp>,
    listening: Vec<InputKind>,
}

impl RecordingSurface {
    /// A mounted surface of the given size at device origin (0, 0).
    pub fn new(size: Size) -> Self {
        Self {
            size: Some(size),
            ..Self::default()
        }
    }

    /// A surface that is not mounted yet: `size()` returns `None`.
    pub fn unmounted() -> Self {
        Self::default()
    }

    /// Places the surface at `(x, y)` in device coordinates.
    pub fn at(mut self, x: f64, y: f64) -> Self {
        self.bounds_origin = Point::new(x, y);
        self
    }

    /// Mounts or resizes the surface.
    pub fn set_size(&mut self, size: Option<Size>) {
        self.size = size;
    }

    /// Every call recorded so far.
    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    /// Returns and clears the recorded calls.
    pub fn take_ops(&mut self) -> Vec<DrawOp> {
        std::mem::take(&mut self.ops)
    }

    /// Number of recorded text draws.
    pub fn text_count(&self) -> usize {
        self.ops
            .iter()
            .filter(|op| matches!(op, DrawOp::Text { .. }))
            .count()
    }

    /// Input kinds the surface was asked to deliver.
    pub fn listening(&self) -> &[InputKind] {
        &self.listening
    }
}

impl Surface for RecordingSurface {
    fn size(&self) -> Option<Size> {
        self.size
    }

    fn bounding_rect(&self) -> Rect {
        let size = self.size.unwrap_or_default();
        Rect::new(self.bounds_origin.x, self.bounds_origin.y, size.width, size.height)
    }

    fn fill_rect(&mut self, rect: Rect, color: Rgb) {
        self.ops.push(DrawOp::Fill { rect, color });
    }

    fn clear_rect(&mut self, rect: Rect) {
        self.ops.push(DrawOp::Clear { rect });
    }

    fn translate(&mut self, x: f64, y: f64) {
        self.origin = self.origin.offset(x, y);
        self.ops.push(DrawOp::Translate { x, y });
    }

    fn reset_transform(&mut self) {
        self.origin = Point::origin();
        self.ops.push(DrawOp::ResetTransform);
    }

    fn draw_text(&mut self, text: &str, style: &TextStyle) {
        self.ops.push(DrawOp::Text {
            text: text.to_string(),
            origin: self.origin,
            style: style.clone(),
        });
    }

    fn listen(&mut self, kinds: &[InputKind]) {
        for kind in kinds {
            if !self.listening.contains(kind) {
                self.listening.push(*kind);
            }
        }
    }
}
