//! Building the particle set from glyph anchors.
//!
//! Construction is split in two: [`build_particles`] is pure apart from the
//! RNG it is handed, and [`attach_input`] is the separate, impure step that
//! asks a surface to start delivering pointer and touch events.

use std::f64::consts::TAU;

use rand::Rng;

use crate::color::Rgb;
use crate::config::MAX_PARTICLES;
use crate::interaction::InputKind;
use crate::layout::Anchor;
use crate::particle::Particle;
use crate::render::Surface;

/// Per-glyph colors, cycled by glyph index.
pub const PALETTE: [Rgb; 6] = [
    Rgb::new(0x38, 0xbd, 0xf8),
    Rgb::new(0x81, 0x8c, 0xf8),
    Rgb::new(0xf4, 0x72, 0xb6),
    Rgb::new(0x34, 0xd3, 0x99),
    Rgb::new(0xfb, 0xbf, 0x24),
    Rgb::new(0xa7, 0x8b, 0xfa),
];

/// Side length of the square offset grid every glyph cluster reuses.
pub const SHAPE_SIDE: usize = 5;

/// Number of points in the offset grid.
pub const SHAPE_LEN: usize = SHAPE_SIDE * SHAPE_SIDE;

/// Distance between neighbouring grid points, in pixels.
pub const SHAPE_PITCH: f64 = 3.0;

/// Tunables for particle construction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FactoryParams {
    /// Particles created per glyph.
    pub particles_per_glyph: usize,
    /// Opacity of a resting particle.
    pub default_opacity: f64,
}

impl Default for FactoryParams {
    fn default() -> Self {
        Self {
            particles_per_glyph: 50,
            default_opacity: 0.8,
        }
    }
}

/// Color for the glyph at `glyph_index`.
///
/// ```rust
/// use glyphburst::palette_color;
///
/// assert_eq!(palette_color(0), palette_color(6));
/// assert_ne!(palette_color(0), palette_color(1));
/// ```
#[inline]
pub fn palette_color(glyph_index: usize) -> Rgb {
    PALETTE[glyph_index % PALETTE.len()]
}

/// Offset from the glyph anchor for the `index`-th particle of a cluster.
///
/// The grid is centered on the anchor, row-major, and wraps after
/// [`SHAPE_LEN`] particles.
///
/// ```rust
/// use glyphburst::shape_offset;
///
/// assert_eq!(shape_offset(0), (-6.0, -6.0));
/// assert_eq!(shape_offset(12), (0.0, 0.0));
/// assert_eq!(shape_offset(25), shape_offset(0));
/// ```
#[inline]
pub fn shape_offset(index: usize) -> (f64, f64) {
    let i = index % SHAPE_LEN;
    let half = (SHAPE_SIDE / 2) as f64;
    let col = (i % SHAPE_SIDE) as f64 - half;
    let row = (i / SHAPE_SIDE) as f64 - half;
    (col * SHAPE_PITCH, row * SHAPE_PITCH)
}

/// Builds `anchors.len() × particles_per_glyph` resting particles.
///
/// Only the idle phase is drawn from `rng`; positions, colors and counts are
/// fully determined by the anchors.
pub fn build_particles<R: Rng + ?Sized>(
    anchors: &[Anchor],
    params: &FactoryParams,
    rng: &mut R,
) -> Vec<Particle> {
    let mut particles = Vec::with_capacity(
        anchors
            .len()
            .saturating_mul(params.particles_per_glyph)
            .min(MAX_PARTICLES),
    );
    for anchor in anchors {
        let color = palette_color(anchor.glyph_index);
        for i in 0..params.particles_per_glyph {
            let (dx, dy) = shape_offset(i);
            let phase = rng.random::<f64>() * TAU;
            particles.push(Particle::new(
                anchor.glyph,
                anchor.glyph_index,
                anchor.pos.offset(dx, dy),
                color,
                phase,
                params.default_opacity,
            ));
        }
    }
    particles
}

/// Asks `surface` to deliver pointer-move, touch-start and touch-move events.
pub fn attach_input<S: Surface + ?Sized>(surface: &mut S) {
    surface.listen(&InputKind::ALL);
}
