//! Benchmarks for the per-frame hot path.

use std::time::Duration;

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use glyphburst::physics::step;
use glyphburst::{
    Engine, EngineConfig, LayoutParams, ManualClock, Particle, PhysicsParams, Point,
    RecordingSurface, Rgb, Size, plan,
};

fn benchmark_layout(c: &mut Criterion) {
    let params = LayoutParams::default();
    c.bench_function("plan DATA/ANALYTICS", |b| {
        b.iter(|| black_box(plan(Size::new(600.0, 150.0), ["DATA", "ANALYTICS"], &params)));
    });
}

fn benchmark_physics_step(c: &mut Criterion) {
    let params = PhysicsParams::default();

    c.bench_function("step resting", |b| {
        let mut p = Particle::new('A', 0, Point::new(10.0, 10.0), Rgb::default(), 0.3, 0.8);
        b.iter(|| step(black_box(&mut p), Duration::from_millis(500), 1.0, &params));
    });

    c.bench_function("step exploding", |b| {
        let mut p = Particle::new('A', 0, Point::new(10.0, 10.0), Rgb::default(), 0.3, 0.8);
        p.explode(Duration::ZERO, 3.0, -2.0);
        b.iter(|| step(black_box(&mut p), Duration::from_millis(500), 1.0, &params));
    });
}

fn benchmark_frame(c: &mut Criterion) {
    let clock = ManualClock::new();
    let mut engine = Engine::with_clock(EngineConfig::default().with_seed(7), clock.clone())
        .expect("default config is valid");
    let mut surface = RecordingSurface::new(Size::new(600.0, 150.0));
    let mut request = engine.start(&mut surface).expect("surface is mounted");

    c.bench_function("run_frame 650 particles", |b| {
        b.iter(|| {
            clock.advance(Duration::from_millis(16));
            surface.take_ops();
            request = engine
                .run_frame(request.token, &mut surface)
                .expect("engine is running");
        });
    });

    let anchors: Vec<Point> = engine.anchors().iter().map(|a| a.pos).collect();
    c.bench_function("pointer sweep over all glyphs", |b| {
        b.iter(|| {
            for p in &anchors {
                black_box(engine.on_pointer_interaction(p.x, p.y));
            }
        });
    });
}

criterion_group!(
    benches,
    benchmark_layout,
    benchmark_physics_step,
    benchmark_frame
);
criterion_main!(benches);
