#![allow(clippy::float_cmp)]
#![allow(clippy::suboptimal_flops)]

//! Edge cases for the physics step and the interaction detector: long runs,
//! clamped frame scales, degenerate parameters and boundary distances.

use std::time::Duration;

use glyphburst::physics::{REFERENCE_FRAME, step};
use glyphburst::{
    InteractionParams, Particle, PhysicsParams, Point, Rgb, trigger,
};
use rand::SeedableRng;
use rand_pcg::Pcg64;

const TOLERANCE: f64 = 1e-9;

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < TOLERANCE
}

fn particle_at(x: f64, y: f64) -> Particle {
    Particle::new('Q', 0, Point::new(x, y), Rgb::default(), 0.0, 0.8)
}

// =============================================================================
// Idle motion
// =============================================================================

#[test]
fn idle_motion_is_stable_over_an_hour() {
    let params = PhysicsParams::default();
    let mut p = particle_at(10.0, 10.0);
    let mut now = Duration::ZERO;
    while now < Duration::from_secs(3600) {
        now += Duration::from_millis(997);
        step(&mut p, now, 1.0, &params);
        assert!((p.pos.x - 10.0).abs() <= 2.0 + TOLERANCE);
        assert!((p.pos.y - 10.0).abs() <= 1.5 + TOLERANCE);
    }
}

#[test]
fn idle_motion_ignores_frame_scale() {
    let params = PhysicsParams::default();
    let mut a = particle_at(0.0, 0.0);
    let mut b = particle_at(0.0, 0.0);
    let now = Duration::from_millis(4321);
    step(&mut a, now, 0.0, &params);
    step(&mut b, now, 4.0, &params);
    assert_eq!(a.pos, b.pos);
}

#[test]
fn zero_amplitude_idle_stays_on_rest() {
    let params = PhysicsParams {
        idle_amplitude_x: 0.0,
        idle_amplitude_y: 0.0,
        ..PhysicsParams::default()
    };
    let mut p = particle_at(3.0, 4.0);
    step(&mut p, Duration::from_secs(7), 1.0, &params);
    assert_eq!(p.pos, Point::new(3.0, 4.0));
}

// =============================================================================
// Explosions
// =============================================================================

#[test]
fn steady_sixty_hz_matches_per_tick_update() {
    // At exactly one reference frame per step the integrator reduces to the
    // plain per-tick update.
    let params = PhysicsParams::default();
    let mut p = particle_at(0.0, 0.0);
    p.explode(Duration::ZERO, 3.0, -6.0);

    let (mut x, mut y, mut vx, mut vy) = (0.0, 0.0, 3.0, -6.0);
    for tick in 1..=60u32 {
        step(&mut p, REFERENCE_FRAME * tick, 1.0, &params);
        x += vx;
        y += vy;
        vy += 0.15;
        vx *= 0.98;
        assert!(approx_eq(p.pos.x, x), "tick {tick}: {} vs {x}", p.pos.x);
        assert!(approx_eq(p.pos.y, y), "tick {tick}: {} vs {y}", p.pos.y);
    }
}

#[test]
fn zero_frame_step_only_fades() {
    let params = PhysicsParams::default();
    let mut p = particle_at(0.0, 0.0);
    p.explode(Duration::ZERO, 5.0, 5.0);
    step(&mut p, Duration::from_millis(1000), 0.0, &params);
    assert_eq!(p.pos, Point::new(0.0, 0.0));
    assert_eq!((p.vx, p.vy), (5.0, 5.0));
    assert!(approx_eq(p.opacity, 0.4));
}

#[test]
fn gravity_pulls_particles_down_over_time() {
    let params = PhysicsParams::default();
    let mut p = particle_at(0.0, 0.0);
    p.explode(Duration::ZERO, 0.0, -7.5);
    let mut lowest = f64::MAX;
    for tick in 1..100u32 {
        step(&mut p, REFERENCE_FRAME * tick, 1.0, &params);
        lowest = lowest.min(p.pos.y);
    }
    assert!(lowest < 0.0);
    assert!(p.pos.y > lowest, "particle should be falling again");
}

#[test]
fn no_drag_keeps_horizontal_speed() {
    let params = PhysicsParams {
        drag: 1.0,
        ..PhysicsParams::default()
    };
    let mut p = particle_at(0.0, 0.0);
    p.explode(Duration::ZERO, 2.5, 0.0);
    for tick in 1..50u32 {
        step(&mut p, REFERENCE_FRAME * tick, 1.0, &params);
    }
    assert_eq!(p.vx, 2.5);
}

#[test]
fn custom_duration_controls_reset() {
    let params = PhysicsParams {
        explode_duration: Duration::from_millis(300),
        ..PhysicsParams::default()
    };
    let mut p = particle_at(0.0, 0.0);
    p.explode(Duration::from_millis(100), 1.0, 1.0);
    step(&mut p, Duration::from_millis(399), 1.0, &params);
    assert!(p.state.is_exploding());
    step(&mut p, Duration::from_millis(400), 1.0, &params);
    assert!(p.state.is_resting());
}

#[test]
fn explode_while_exploding_keeps_first_trigger() {
    let mut p = particle_at(0.0, 0.0);
    assert!(p.explode(Duration::from_millis(10), 1.0, 2.0));
    assert!(!p.explode(Duration::from_millis(20), -4.0, -4.0));
    assert_eq!(p.state.triggered_at(), Some(Duration::from_millis(10)));
    assert_eq!((p.vx, p.vy), (1.0, 2.0));
}

// =============================================================================
// Interaction boundaries
// =============================================================================

#[test]
fn radius_boundary_is_exclusive() {
    let params = InteractionParams::default();
    let mut rng = Pcg64::seed_from_u64(1);
    let mut particles = vec![particle_at(24.0, 0.0), particle_at(23.999, 0.0)];
    let n = trigger(&mut particles, Point::new(0.0, 0.0), Duration::ZERO, &params, &mut rng);
    assert_eq!(n, 1);
    assert!(particles[0].state.is_resting());
    assert!(particles[1].state.is_exploding());
}

#[test]
fn non_finite_points_trigger_nothing() {
    let params = InteractionParams::default();
    let mut rng = Pcg64::seed_from_u64(2);
    let mut particles = vec![particle_at(0.0, 0.0)];
    for point in [
        Point::new(f64::NAN, 0.0),
        Point::new(0.0, f64::INFINITY),
        Point::new(f64::NEG_INFINITY, f64::NAN),
    ] {
        assert_eq!(trigger(&mut particles, point, Duration::ZERO, &params, &mut rng), 0);
    }
    assert!(particles[0].state.is_resting());
}

#[test]
fn zero_speed_explosion_still_fades_and_resets() {
    let params = InteractionParams {
        max_speed: 0.0,
        ..InteractionParams::default()
    };
    let physics = PhysicsParams::default();
    let mut rng = Pcg64::seed_from_u64(3);
    let mut particles = vec![particle_at(0.0, 0.0)];
    assert_eq!(trigger(&mut particles, Point::new(1.0, 1.0), Duration::ZERO, &params, &mut rng), 1);

    let p = &mut particles[0];
    assert_eq!((p.vx, p.vy), (0.0, 0.0));
    step(p, Duration::from_millis(1500), 1.0, &physics);
    assert!(approx_eq(p.opacity, 0.2));
    step(p, Duration::from_millis(2500), 1.0, &physics);
    assert!(p.state.is_resting());
}
