//! Anchor placement for the two displayed words.
//!
//! Each glyph gets one anchor: the rest position its particle cluster is
//! built around. The two words become two rows, each centered on its own,
//! with the pair centered vertically on the surface.
//!
//! Planning is a pure function of the surface size and the words, so the
//! same inputs always give the same anchors.

use serde::{Deserialize, Serialize};

use crate::geometry::{Point, Size};

/// Tunables for anchor placement.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutParams {
    /// Glyph spacing is `width / spacing_divisor` before clamping.
    pub spacing_divisor: f64,
    /// Lower bound for glyph spacing.
    pub min_spacing: f64,
    /// Upper bound for glyph spacing.
    pub max_spacing: f64,
    /// Surfaces shorter than this use the compact row gap.
    pub compact_height: f64,
    /// Vertical distance between row centers in compact mode.
    pub compact_row_gap: f64,
    /// Vertical distance between row centers otherwise.
    pub row_gap: f64,
}

impl Default for LayoutParams {
    fn default() -> Self {
        Self {
            spacing_divisor: 12.0,
            min_spacing: 35.0,
            max_spacing: 65.0,
            compact_height: 200.0,
            compact_row_gap: 50.0,
            row_gap: 80.0,
        }
    }
}

impl LayoutParams {
    /// Horizontal distance between neighbouring glyphs on a surface `width` wide.
    pub fn spacing(&self, width: f64) -> f64 {
        (width / self.spacing_divisor).clamp(self.min_spacing, self.max_spacing)
    }

    /// Vertical distance between the two row centers on a surface `height` tall.
    pub fn row_gap(&self, height: f64) -> f64 {
        if height < self.compact_height {
            self.compact_row_gap
        } else {
            self.row_gap
        }
    }
}

/// Rest position of one glyph's particle cluster.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Anchor {
    /// The glyph drawn by this cluster.
    pub glyph: char,
    /// Ordinal among all glyphs of both words.
    pub glyph_index: usize,
    /// Row the glyph sits on (0 or 1).
    pub row: usize,
    /// Anchor position.
    pub pos: Point,
}

/// Plans anchors for `words` on a surface of `size`.
///
/// The first word goes on the upper row and the second on the lower row;
/// any further words are ignored. Whitespace inside a word does not count as
/// a glyph. Anchors are returned in reading order, so an anchor's index in
/// the returned list equals its `glyph_index`.
///
/// # Example
///
/// ```rust
/// use glyphburst::{plan, LayoutParams, Size};
///
/// let anchors = plan(Size::new(600.0, 150.0), ["DATA", "ANALYTICS"], &LayoutParams::default());
/// assert_eq!(anchors.len(), 13);
///
/// // 600 / 12 = 50 px spacing, four glyphs centered on x = 300.
/// assert_eq!(anchors[0].pos.x, 225.0);
/// assert_eq!(anchors[3].pos.x, 375.0);
/// ```
pub fn plan<'a, I>(size: Size, words: I, params: &LayoutParams) -> Vec<Anchor>
where
    I: IntoIterator<Item = &'a str>,
{
    let spacing = params.spacing(size.width);
    let gap = params.row_gap(size.height);
    let center = size.center();
    let row_y = [center.y - gap / 2.0, center.y + gap / 2.0];

    let mut anchors = Vec::new();
    for (row, word) in words.into_iter().take(2).enumerate() {
        let glyphs: Vec<char> = word.chars().filter(|c| !c.is_whitespace()).collect();
        let row_start = center.x - (glyphs.len().saturating_sub(1) as f64) * spacing / 2.0;

        for (i, glyph) in glyphs.into_iter().enumerate() {
            anchors.push(Anchor {
                glyph,
                glyph_index: anchors.len(),
                row,
                pos: Point::new(row_start + i as f64 * spacing, row_y[row]),
            });
        }
    }
    anchors
}
