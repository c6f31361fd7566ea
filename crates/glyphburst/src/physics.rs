//! Per-frame particle integration.
//!
//! A resting particle floats on a small Lissajous-like path around its rest
//! position. An exploding particle is integrated like a projectile under
//! gravity with horizontal drag while its opacity fades linearly, and snaps
//! back to rest once the explosion duration has elapsed.
//!
//! Velocities are expressed in pixels per *reference frame* (1/60 s). Each
//! step takes the number of reference frames that passed since the previous
//! step, so motion stays time-correct when the host's frame rate varies. A
//! particle never moves further than the time it has actually spent
//! exploding: one triggered just before a frame only travels that sliver.
//!
//! # Example
//!
//! ```rust
//! use glyphburst::{Particle, PhysicsParams, Point, Rgb};
//! use glyphburst::physics::step;
//! use std::time::Duration;
//!
//! let params = PhysicsParams::default();
//! let mut p = Particle::new('A', 0, Point::new(100.0, 50.0), Rgb::default(), 0.0, 0.8);
//! p.explode(Duration::ZERO, 2.0, -3.0);
//!
//! step(&mut p, Duration::from_millis(17), 1.0, &params);
//! assert_eq!(p.pos, Point::new(102.0, 47.0));
//!
//! // Past the explosion duration the particle is back home.
//! step(&mut p, Duration::from_millis(2000), 1.0, &params);
//! assert_eq!(p.pos, Point::new(100.0, 50.0));
//! assert!(p.state.is_resting());
//! ```

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::particle::{Particle, ParticleState};

/// Length of one reference frame: velocities are per this much time.
pub const REFERENCE_FRAME: Duration = Duration::from_nanos(16_666_667);

/// Tunables for the physics step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsParams {
    /// Downward acceleration in pixels per reference frame squared.
    pub gravity: f64,
    /// Horizontal velocity multiplier per reference frame, in `(0, 1]`.
    pub drag: f64,
    /// How long an explosion lasts before the particle resets.
    #[serde(with = "millis")]
    pub explode_duration: Duration,
    /// Opacity of a resting particle.
    pub default_opacity: f64,
    /// Idle horizontal amplitude in pixels.
    pub idle_amplitude_x: f64,
    /// Idle vertical amplitude in pixels.
    pub idle_amplitude_y: f64,
    /// Idle horizontal angular frequency in radians per second.
    pub idle_frequency_x: f64,
    /// Idle vertical angular frequency in radians per second.
    pub idle_frequency_y: f64,
    /// Upper bound on reference frames integrated in one step.
    pub max_frame_scale: f64,
}

impl Default for PhysicsParams {
    fn default() -> Self {
        Self {
            gravity: 0.15,
            drag: 0.98,
            explode_duration: Duration::from_millis(2000),
            default_opacity: 0.8,
            idle_amplitude_x: 2.0,
            idle_amplitude_y: 1.5,
            idle_frequency_x: 2.0,
            idle_frequency_y: 1.6,
            max_frame_scale: 4.0,
        }
    }
}

impl PhysicsParams {
    /// Converts a wall-clock interval into reference frames, clamped to
    /// `[0, max_frame_scale]`.
    ///
    /// ```rust
    /// use glyphburst::PhysicsParams;
    /// use std::time::Duration;
    ///
    /// let params = PhysicsParams::default();
    /// assert!((params.frames_in(Duration::from_millis(33)) - 1.98).abs() < 0.01);
    /// assert_eq!(params.frames_in(Duration::from_secs(5)), 4.0);
    /// ```
    pub fn frames_in(&self, elapsed: Duration) -> f64 {
        (elapsed.as_secs_f64() / REFERENCE_FRAME.as_secs_f64()).clamp(0.0, self.max_frame_scale)
    }
}

/// Advances one particle to clock time `now`.
///
/// `frames` is the number of reference frames since the previous step (1.0
/// at a steady 60 Hz); it only scales explosion motion, and is capped at the
/// time elapsed since the trigger. Idle motion and opacity are functions of
/// `now` alone.
pub fn step(particle: &mut Particle, now: Duration, frames: f64, params: &PhysicsParams) {
    match particle.state {
        ParticleState::Resting => idle(particle, now, params),
        ParticleState::Exploding { triggered_at } => {
            let elapsed = now.saturating_sub(triggered_at);
            if elapsed < params.explode_duration {
                let frames = frames.min(params.frames_in(elapsed));
                integrate(particle, elapsed, frames, params);
            } else {
                particle.reset(params.default_opacity);
            }
        }
    }
}

fn idle(particle: &mut Particle, now: Duration, params: &PhysicsParams) {
    let t = now.as_secs_f64();
    let rest = particle.rest();
    particle.pos.x =
        rest.x + params.idle_amplitude_x * (t * params.idle_frequency_x + particle.phase).sin();
    particle.pos.y =
        rest.y + params.idle_amplitude_y * (t * params.idle_frequency_y + particle.phase).cos();
    particle.vx = 0.0;
    particle.vy = 0.0;
}

fn integrate(particle: &mut Particle, elapsed: Duration, frames: f64, params: &PhysicsParams) {
    particle.pos.x += particle.vx * frames;
    particle.pos.y += particle.vy * frames;
    particle.vy += params.gravity * frames;
    particle.vx *= params.drag.powf(frames);

    let progress = elapsed.as_secs_f64() / params.explode_duration.as_secs_f64();
    particle.opacity = (params.default_opacity * (1.0 - progress)).clamp(0.0, params.default_opacity);
}

mod millis {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    // Durations appear in config files as whole milliseconds.
    pub fn serialize<S: Serializer>(d: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}
