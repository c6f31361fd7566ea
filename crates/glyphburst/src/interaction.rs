//! Pointer and touch hit-testing.
//!
//! An interaction point triggers every resting particle whose *current*
//! position lies strictly inside the trigger radius. Particles that are
//! already exploding are left alone, so a stream of pointer-move events over
//! the same spot does not keep re-rolling their velocities.

use std::fmt;
use std::time::Duration;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::geometry::{Point, Rect};
use crate::particle::Particle;

/// Tunables for the interaction detector.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InteractionParams {
    /// Particles closer than this to the interaction point explode.
    pub trigger_radius: f64,
    /// Explosion velocity components are drawn from `[-max_speed, max_speed]`.
    pub max_speed: f64,
}

impl Default for InteractionParams {
    fn default() -> Self {
        Self {
            trigger_radius: 24.0,
            max_speed: 7.5,
        }
    }
}

/// Kinds of input a surface can be asked to deliver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputKind {
    /// Pointer moved.
    PointerMove,
    /// A touch began.
    TouchStart,
    /// A touch moved.
    TouchMove,
}

impl InputKind {
    /// Every kind the engine listens for.
    pub const ALL: [InputKind; 3] = [Self::PointerMove, Self::TouchStart, Self::TouchMove];
}

impl fmt::Display for InputKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PointerMove => write!(f, "pointermove"),
            Self::TouchStart => write!(f, "touchstart"),
            Self::TouchMove => write!(f, "touchmove"),
        }
    }
}

/// A raw input event in device (window) coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Pointer moved to `client`.
    PointerMove {
        /// Pointer position in device coordinates.
        client: Point,
    },
    /// One or more touches began.
    TouchStart(Vec<Point>),
    /// One or more touches moved.
    TouchMove(Vec<Point>),
}

impl InputEvent {
    /// The kind of this event.
    pub const fn kind(&self) -> InputKind {
        match self {
            Self::PointerMove { .. } => InputKind::PointerMove,
            Self::TouchStart(_) => InputKind::TouchStart,
            Self::TouchMove(_) => InputKind::TouchMove,
        }
    }

    /// The interaction point in coordinates local to `bounds`.
    ///
    /// Touch events use their first touch. An empty touch list has no
    /// coordinate and yields `None`.
    ///
    /// ```rust
    /// use glyphburst::{InputEvent, Point, Rect};
    ///
    /// let bounds = Rect::new(10.0, 10.0, 100.0, 100.0);
    /// let touch = InputEvent::TouchMove(vec![Point::new(15.0, 20.0), Point::new(90.0, 90.0)]);
    /// assert_eq!(touch.surface_point(&bounds), Some(Point::new(5.0, 10.0)));
    /// assert_eq!(InputEvent::TouchStart(vec![]).surface_point(&bounds), None);
    /// ```
    pub fn surface_point(&self, bounds: &Rect) -> Option<Point> {
        let client = match self {
            Self::PointerMove { client } => Some(*client),
            Self::TouchStart(touches) | Self::TouchMove(touches) => touches.first().copied(),
        }?;
        Some(bounds.to_local(client))
    }
}

/// Triggers every resting particle within the trigger radius of `point`.
///
/// Returns how many particles started exploding. Each triggered particle
/// gets `triggered_at = now` and an independently sampled velocity.
pub fn trigger<R: Rng + ?Sized>(
    particles: &mut [Particle],
    point: Point,
    now: Duration,
    params: &InteractionParams,
    rng: &mut R,
) -> usize {
    if !(point.x.is_finite() && point.y.is_finite()) {
        return 0;
    }
    let speed = params.max_speed.abs();
    let mut triggered = 0;
    for particle in particles.iter_mut().filter(|p| p.state.is_resting()) {
        if particle.pos.distance(point) < params.trigger_radius {
            let vx = rng.random_range(-speed..=speed);
            let vy = rng.random_range(-speed..=speed);
            particle.explode(now, vx, vy);
            triggered += 1;
        }
    }
    triggered
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgb;
    use crate::particle::ParticleState;
    use rand::SeedableRng;
    use rand_pcg::Pcg64;

    fn particle_at(x: f64, y: f64) -> Particle {
        Particle::new('A', 0, Point::new(x, y), Rgb::default(), 0.0, 0.8)
    }

    #[test]
    fn triggers_only_inside_radius() {
        let mut particles = vec![particle_at(0.0, 0.0), particle_at(23.9, 0.0), particle_at(24.0, 0.0)];
        let mut rng = Pcg64::seed_from_u64(1);
        let n = trigger(
            &mut particles,
            Point::origin(),
            Duration::from_secs(1),
            &InteractionParams::default(),
            &mut rng,
        );
        assert_eq!(n, 2);
        assert!(particles[0].state.is_exploding());
        assert!(particles[1].state.is_exploding());
        assert!(particles[2].state.is_resting());
    }

    #[test]
    fn velocity_within_symmetric_range() {
        let mut particles: Vec<_> = (0..200).map(|_| particle_at(0.0, 0.0)).collect();
        let mut rng = Pcg64::seed_from_u64(2);
        trigger(
            &mut particles,
            Point::origin(),
            Duration::ZERO,
            &InteractionParams::default(),
            &mut rng,
        );
        for p in &particles {
            assert!((-7.5..=7.5).contains(&p.vx));
            assert!((-7.5..=7.5).contains(&p.vy));
        }
        assert!(particles.iter().any(|p| p.vx < 0.0));
        assert!(particles.iter().any(|p| p.vx > 0.0));
    }

    #[test]
    fn exploding_particles_are_untouched() {
        let mut particles = vec![particle_at(0.0, 0.0)];
        particles[0].explode(Duration::from_millis(100), 1.0, 2.0);
        let mut rng = Pcg64::seed_from_u64(3);
        let n = trigger(
            &mut particles,
            Point::origin(),
            Duration::from_millis(400),
            &InteractionParams::default(),
            &mut rng,
        );
        assert_eq!(n, 0);
        assert_eq!(
            particles[0].state,
            ParticleState::Exploding {
                triggered_at: Duration::from_millis(100)
            }
        );
        assert_eq!((particles[0].vx, particles[0].vy), (1.0, 2.0));
    }

    #[test]
    fn uses_current_position_not_rest() {
        let mut particles = vec![particle_at(0.0, 0.0)];
        particles[0].pos = Point::new(200.0, 0.0);
        let mut rng = Pcg64::seed_from_u64(4);
        let params = InteractionParams::default();
        assert_eq!(trigger(&mut particles, Point::origin(), Duration::ZERO, &params, &mut rng), 0);
        assert_eq!(
            trigger(&mut particles, Point::new(200.0, 5.0), Duration::ZERO, &params, &mut rng),
            1
        );
    }

    #[test]
    fn non_finite_point_is_ignored() {
        let mut particles = vec![particle_at(0.0, 0.0)];
        let mut rng = Pcg64::seed_from_u64(5);
        let n = trigger(
            &mut particles,
            Point::new(f64::NAN, 0.0),
            Duration::ZERO,
            &InteractionParams::default(),
            &mut rng,
        );
        assert_eq!(n, 0);
    }

    #[test]
    fn pointer_event_translates_to_surface() {
        let bounds = Rect::new(100.0, 50.0, 600.0, 150.0);
        let ev = InputEvent::PointerMove {
            client: Point::new(325.0, 100.0),
        };
        assert_eq!(ev.kind(), InputKind::PointerMove);
        assert_eq!(ev.surface_point(&bounds), Some(Point::new(225.0, 50.0)));
    }

    #[test]
    fn input_kind_display() {
        assert_eq!(InputKind::TouchStart.to_string(), "touchstart");
    }
}
