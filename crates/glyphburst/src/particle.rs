//! The particle record and its two-state lifecycle.

use std::time::Duration;

use crate::color::Rgb;
use crate::geometry::Point;

/// Lifecycle state of a particle.
///
/// The trigger time lives inside the `Exploding` variant, so an exploding
/// particle always knows when it was triggered and a resting one never does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParticleState {
    /// Floating around its rest position with zero velocity.
    #[default]
    Resting,
    /// Flying outward under gravity and drag, fading out.
    Exploding {
        /// Clock time at which the explosion was triggered.
        triggered_at: Duration,
    },
}

impl ParticleState {
    /// Returns true for [`ParticleState::Resting`].
    #[inline]
    pub const fn is_resting(&self) -> bool {
        matches!(self, Self::Resting)
    }

    /// Returns true for [`ParticleState::Exploding`].
    #[inline]
    pub const fn is_exploding(&self) -> bool {
        matches!(self, Self::Exploding { .. })
    }

    /// Trigger time, if exploding.
    #[inline]
    pub const fn triggered_at(&self) -> Option<Duration> {
        match self {
            Self::Resting => None,
            Self::Exploding { triggered_at } => Some(*triggered_at),
        }
    }
}

/// One particle of a glyph cluster.
///
/// The rest position is fixed at creation; everything else is mutated by the
/// physics step and the interaction detector.
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    /// The glyph this particle belongs to.
    pub glyph: char,
    /// Ordinal of the glyph among all glyphs.
    pub glyph_index: usize,
    rest: Point,
    /// Current position.
    pub pos: Point,
    /// Horizontal velocity in pixels per reference frame.
    pub vx: f64,
    /// Vertical velocity in pixels per reference frame.
    pub vy: f64,
    /// Current opacity in `[0, default_opacity]`.
    pub opacity: f64,
    /// Random phase offset for idle oscillation, in radians.
    pub phase: f64,
    /// Lifecycle state.
    pub state: ParticleState,
    /// Fill color, fixed per glyph.
    pub color: Rgb,
}

impl Particle {
    /// Creates a resting particle at `rest`.
    pub fn new(
        glyph: char,
        glyph_index: usize,
        rest: Point,
        color: Rgb,
        phase: f64,
        opacity: f64,
    ) -> Self {
        Self {
            glyph,
            glyph_index,
            rest,
            pos: rest,
            vx: 0.0,
            vy: 0.0,
            opacity,
            phase,
            state: ParticleState::Resting,
            color,
        }
    }

    /// The rest position this particle returns to.
    #[inline]
    pub const fn rest(&self) -> Point {
        self.rest
    }

    /// Starts an explosion at `now` with the given velocity.
    ///
    /// Has no effect on a particle that is already exploding.
    pub fn explode(&mut self, now: Duration, vx: f64, vy: f64) -> bool {
        if self.state.is_exploding() {
            return false;
        }
        self.state = ParticleState::Exploding { triggered_at: now };
        self.vx = vx;
        self.vy = vy;
        true
    }

    /// Snaps back to the rest position and clears all explosion state.
    pub fn reset(&mut self, opacity: f64) {
        self.state = ParticleState::Resting;
        self.pos = self.rest;
        self.vx = 0.0;
        self.vy = 0.0;
        self.opacity = opacity;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Particle {
        Particle::new('A', 2, Point::new(10.0, 20.0), Rgb::new(1, 2, 3), 0.5, 0.8)
    }

    #[test]
    fn new_particle_rests_at_anchor() {
        let p = sample();
        assert_eq!(p.pos, p.rest());
        assert!(p.state.is_resting());
        assert_eq!(p.state.triggered_at(), None);
        assert_eq!((p.vx, p.vy), (0.0, 0.0));
    }

    #[test]
    fn explode_records_trigger_time() {
        let mut p = sample();
        assert!(p.explode(Duration::from_millis(500), 3.0, -2.0));
        assert_eq!(p.state.triggered_at(), Some(Duration::from_millis(500)));
        assert_eq!((p.vx, p.vy), (3.0, -2.0));
    }

    #[test]
    fn explode_twice_keeps_first_trigger() {
        let mut p = sample();
        p.explode(Duration::from_millis(500), 3.0, -2.0);
        assert!(!p.explode(Duration::from_millis(900), -7.0, 7.0));
        assert_eq!(p.state.triggered_at(), Some(Duration::from_millis(500)));
        assert_eq!((p.vx, p.vy), (3.0, -2.0));
    }

    #[test]
    fn reset_restores_rest_state() {
        let mut p = sample();
        p.explode(Duration::ZERO, 3.0, -2.0);
        p.pos = Point::new(99.0, -4.0);
        p.opacity = 0.1;
        p.reset(0.8);
        assert_eq!(p.pos, Point::new(10.0, 20.0));
        assert!(p.state.is_resting());
        assert_eq!((p.vx, p.vy), (0.0, 0.0));
        assert!((p.opacity - 0.8).abs() < f64::EPSILON);
    }
}
