//! The engine: particle lifecycle plus a cancellable frame scheduler.
//!
//! The engine owns the particle set and the handle of the next scheduled
//! frame. It does not sleep or spawn anything itself: every scheduling step
//! hands the host a [`FrameRequest`] saying *when* the next frame is due,
//! and the host calls [`Engine::run_frame`] with that request's token once
//! the time has come. [`Engine::stop`] drops the pending handle, so a token
//! issued before `stop` can never run a frame afterwards.
//!
//! ```text
//!            start(surface)                 run_frame(token)
//!  Stopped ─────────────────▶ Running ──┐  (physics + render,
//!     ▲                          │  ▲   │   schedule next)
//!     │          stop()          │  └───┘
//!     └──────────────────────────┘
//! ```
//!
//! All mutation goes through `&mut self`, so a frame and an input event can
//! never interleave: each runs to completion before the other starts.

use std::fmt;
use std::time::Duration;

use rand::SeedableRng;
use rand_pcg::Pcg64;
use tracing::{debug, trace};

use crate::clock::{Clock, SystemClock};
use crate::config::EngineConfig;
use crate::error::Result;
use crate::factory::{attach_input, build_particles};
use crate::geometry::{Point, Rect};
use crate::interaction::{trigger, InputEvent};
use crate::layout::{plan, Anchor};
use crate::particle::Particle;
use crate::physics;
use crate::render::{visible, GlyphRenderer, Renderer, Surface};
use crate::theme::{StaticTheme, ThemeColors, ThemeSource};

/// Scheduler state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EngineState {
    /// No frame is pending and nothing mutates.
    #[default]
    Stopped,
    /// A frame is pending.
    Running,
}

impl fmt::Display for EngineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stopped => write!(f, "stopped"),
            Self::Running => write!(f, "running"),
        }
    }
}

/// Identifies one scheduled frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameToken(u64);

impl FrameToken {
    /// Raw token value, unique per engine.
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// A request from the engine to run a frame at `due`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameRequest {
    /// Token to pass back to [`Engine::run_frame`].
    pub token: FrameToken,
    /// Clock time at which the frame should run.
    pub due: Duration,
}

impl FrameRequest {
    /// How long the host should wait, measured from clock time `now`.
    pub fn wait_from(&self, now: Duration) -> Duration {
        self.due.saturating_sub(now)
    }
}

/// Counters from the most recent frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Frames run since the last `start`.
    pub frame: u64,
    /// Particles stepped by the integrator.
    pub stepped: usize,
    /// Particles handed to the renderer.
    pub drawn: usize,
    /// Particles exploding after the step.
    pub exploding: usize,
}

/// The particle text engine.
///
/// Generic over its [`Clock`] so tests can substitute a [`ManualClock`](crate::ManualClock).
/// Dropping the engine stops it.
pub struct Engine<C: Clock = SystemClock> {
    config: EngineConfig,
    clock: C,
    seed: u64,
    rng: Pcg64,
    theme: Box<dyn ThemeSource>,
    renderer: Box<dyn Renderer>,
    anchors: Vec<Anchor>,
    particles: Vec<Particle>,
    state: EngineState,
    pending: Option<FrameRequest>,
    next_token: u64,
    bounds: Rect,
    last_frame_at: Option<Duration>,
    stats: FrameStats,
}

impl Engine<SystemClock> {
    /// Creates a stopped engine driven by the system clock.
    pub fn new(config: EngineConfig) -> Result<Self> {
        Self::with_clock(config, SystemClock::new())
    }
}

impl<C: Clock> Engine<C> {
    /// Creates a stopped engine driven by `clock`.
    pub fn with_clock(config: EngineConfig, clock: C) -> Result<Self> {
        config.validate()?;
        let seed = config.seed.unwrap_or_else(rand::random);
        Ok(Self {
            config,
            clock,
            seed,
            rng: Pcg64::seed_from_u64(seed),
            theme: Box::new(StaticTheme::default()),
            renderer: Box::new(GlyphRenderer::default()),
            anchors: Vec::new(),
            particles: Vec::new(),
            state: EngineState::Stopped,
            pending: None,
            next_token: 0,
            bounds: Rect::default(),
            last_frame_at: None,
            stats: FrameStats::default(),
        })
    }

    /// Replaces the theme source consulted every frame.
    pub fn with_theme<T: ThemeSource + 'static>(mut self, theme: T) -> Self {
        self.theme = Box::new(theme);
        self
    }

    /// Replaces the particle renderer.
    pub fn with_renderer<R: Renderer + 'static>(mut self, renderer: R) -> Self {
        self.renderer = Box::new(renderer);
        self
    }

    /// Builds the particle set for `surface` and schedules the first frame.
    ///
    /// A surface without a size is treated as not mounted yet: nothing is
    /// built, nothing is scheduled, and `None` is returned. Calling `start`
    /// while running discards the current particles and rebuilds them.
    pub fn start(&mut self, surface: &mut dyn Surface) -> Option<FrameRequest> {
        let Some(size) = surface.size().filter(|s| !s.is_empty()) else {
            debug!("surface not mounted, start ignored");
            return None;
        };
        if self.is_running() {
            self.stop();
        }

        let words = self.config.words.iter().map(String::as_str);
        self.anchors = plan(size, words, &self.config.layout);
        self.particles = build_particles(&self.anchors, &self.config.factory_params(), &mut self.rng);
        attach_input(surface);

        self.bounds = surface.bounding_rect();
        self.state = EngineState::Running;
        self.last_frame_at = None;
        self.stats = FrameStats::default();
        debug!(
            width = size.width,
            height = size.height,
            glyphs = self.anchors.len(),
            particles = self.particles.len(),
            seed = self.seed,
            "engine started"
        );

        Some(self.schedule(self.clock.now()))
    }

    /// Runs the frame identified by `token` and schedules the next one.
    ///
    /// Returns `None`, without touching anything, when the engine is stopped
    /// or `token` is not the pending frame.
    pub fn run_frame(&mut self, token: FrameToken, surface: &mut dyn Surface) -> Option<FrameRequest> {
        match self.pending {
            Some(pending) if pending.token == token && self.is_running() => {}
            _ => {
                trace!(token = token.get(), "ignoring stale frame");
                return None;
            }
        }
        self.pending = None;

        let now = self.clock.now();
        let frames = self
            .last_frame_at
            .map_or(1.0, |prev| self.config.physics.frames_in(now.saturating_sub(prev)));
        self.last_frame_at = Some(now);

        let theme = ThemeColors::resolve(self.theme.as_ref());
        let full = Rect::from_size(surface.size().unwrap_or_else(|| self.bounds.size()));
        surface.clear_rect(full);
        surface.fill_rect(full, theme.background);

        let mut drawn = 0;
        let mut exploding = 0;
        for particle in &mut self.particles {
            physics::step(particle, now, frames, &self.config.physics);
            if particle.state.is_exploding() {
                exploding += 1;
            }
            if visible(particle, self.config.visibility_floor) {
                self.renderer.draw(surface, particle, &theme);
                drawn += 1;
            }
        }

        self.stats = FrameStats {
            frame: self.stats.frame + 1,
            stepped: self.particles.len(),
            drawn,
            exploding,
        };
        trace!(
            frame = self.stats.frame,
            drawn,
            exploding,
            frames,
            "frame complete"
        );

        Some(self.schedule(now))
    }

    /// Cancels the pending frame and discards the particle set.
    ///
    /// Nothing mutates after this returns: a token issued earlier is
    /// ignored by [`run_frame`](Self::run_frame) and input is dropped until
    /// the next `start`.
    pub fn stop(&mut self) {
        if self.state == EngineState::Running {
            debug!(frames = self.stats.frame, "engine stopped");
        }
        self.pending = None;
        self.state = EngineState::Stopped;
        self.particles.clear();
        self.anchors.clear();
    }

    /// Triggers particles near a surface-local point.
    ///
    /// Returns the number of particles that started exploding. Ignored while
    /// stopped.
    pub fn on_pointer_interaction(&mut self, x: f64, y: f64) -> usize {
        if !self.is_running() {
            return 0;
        }
        let now = self.clock.now();
        let triggered = trigger(
            &mut self.particles,
            Point::new(x, y),
            now,
            &self.config.interaction,
            &mut self.rng,
        );
        if triggered > 0 {
            debug!(x, y, triggered, "particles exploded");
        }
        triggered
    }

    /// Handles a raw input event in device coordinates.
    ///
    /// The event is translated with the bounding rect captured at `start`.
    /// Events without a coordinate (an empty touch list) are ignored.
    pub fn handle_input(&mut self, event: &InputEvent) -> usize {
        if !self.is_running() {
            return 0;
        }
        match event.surface_point(&self.bounds) {
            Some(p) => self.on_pointer_interaction(p.x, p.y),
            None => {
                trace!(kind = %event.kind(), "input without coordinates ignored");
                0
            }
        }
    }

    fn schedule(&mut self, now: Duration) -> FrameRequest {
        let request = FrameRequest {
            token: FrameToken(self.next_token),
            due: now + self.config.frame_interval(),
        };
        self.next_token += 1;
        self.pending = Some(request);
        request
    }

    /// Current scheduler state.
    pub const fn state(&self) -> EngineState {
        self.state
    }

    /// True while a frame is scheduled.
    pub fn is_running(&self) -> bool {
        self.state == EngineState::Running
    }

    /// The pending frame, if any.
    pub const fn pending_frame(&self) -> Option<FrameRequest> {
        self.pending
    }

    /// All particles, in glyph order. Empty while stopped.
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Glyph anchors of the running particle set.
    pub fn anchors(&self) -> &[Anchor] {
        &self.anchors
    }

    /// Configuration in use.
    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Seed the RNG was created with.
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    /// Counters from the most recent frame.
    pub const fn stats(&self) -> FrameStats {
        self.stats
    }

    /// The engine's clock.
    pub const fn clock(&self) -> &C {
        &self.clock
    }
}

impl<C: Clock> fmt::Debug for Engine<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Engine")
            .field("state", &self.state)
            .field("seed", &self.seed)
            .field("particles", &self.particles.len())
            .field("pending", &self.pending)
            .field("stats", &self.stats)
            .finish_non_exhaustive()
    }
}

impl<C: Clock> Drop for Engine<C> {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::geometry::Size;
    use crate::recording::{DrawOp, RecordingSurface};

    fn engine() -> (Engine<ManualClock>, ManualClock) {
        let clock = ManualClock::new();
        let engine = Engine::with_clock(EngineConfig::default().with_seed(11), clock.clone())
            .expect("default config is valid");
        (engine, clock)
    }

    #[test]
    fn starts_stopped() {
        let (engine, _) = engine();
        assert_eq!(engine.state(), EngineState::Stopped);
        assert!(engine.pending_frame().is_none());
        assert!(engine.particles().is_empty());
    }

    #[test]
    fn start_on_unmounted_surface_is_noop() {
        let (mut engine, _) = engine();
        let mut surface = RecordingSurface::unmounted();
        assert!(engine.start(&mut surface).is_none());
        assert!(!engine.is_running());
        assert!(engine.particles().is_empty());
        assert!(surface.listening().is_empty());
    }

    #[test]
    fn start_builds_and_schedules() {
        let (mut engine, clock) = engine();
        clock.set(Duration::from_millis(100));
        let mut surface = RecordingSurface::new(Size::new(600.0, 150.0));
        let req = engine.start(&mut surface).expect("mounted surface starts");
        assert!(engine.is_running());
        assert_eq!(engine.particles().len(), 650);
        assert_eq!(req.due, Duration::from_millis(100) + Duration::from_secs(1) / 60);
        assert_eq!(engine.pending_frame(), Some(req));
        assert_eq!(surface.listening().len(), 3);
    }

    #[test]
    fn frame_fills_background_then_draws() {
        let (mut engine, clock) = engine();
        let mut surface = RecordingSurface::new(Size::new(600.0, 150.0));
        let req = engine.start(&mut surface).unwrap();
        clock.advance(Duration::from_millis(16));
        let next = engine.run_frame(req.token, &mut surface).unwrap();
        assert_ne!(next.token, req.token);

        let ops = surface.ops();
        assert!(matches!(ops[0], DrawOp::Clear { .. }));
        assert!(matches!(ops[1], DrawOp::Fill { color, .. } if color == ThemeColors::default().background));
        assert_eq!(surface.text_count(), 650);
        assert_eq!(engine.stats().drawn, 650);
        assert_eq!(engine.stats().frame, 1);
    }

    #[test]
    fn stale_token_is_ignored() {
        let (mut engine, _) = engine();
        let mut surface = RecordingSurface::new(Size::new(600.0, 150.0));
        let first = engine.start(&mut surface).unwrap();
        engine.run_frame(first.token, &mut surface).unwrap();
        surface.take_ops();
        assert!(engine.run_frame(first.token, &mut surface).is_none());
        assert!(surface.ops().is_empty());
    }

    #[test]
    fn restart_rebuilds_and_invalidates_old_token() {
        let (mut engine, _) = engine();
        let mut surface = RecordingSurface::new(Size::new(600.0, 150.0));
        let first = engine.start(&mut surface).unwrap();
        surface.set_size(Some(Size::new(1200.0, 400.0)));
        let second = engine.start(&mut surface).unwrap();
        assert_ne!(first.token, second.token);
        assert!(engine.run_frame(first.token, &mut surface).is_none());
        assert_eq!(engine.particles().len(), 650);
        assert!((engine.anchors()[1].pos.x - engine.anchors()[0].pos.x - 65.0).abs() < 1e-9);
    }

    #[test]
    fn input_ignored_while_stopped() {
        let (mut engine, _) = engine();
        assert_eq!(engine.on_pointer_interaction(0.0, 0.0), 0);
        let ev = InputEvent::PointerMove {
            client: Point::new(0.0, 0.0),
        };
        assert_eq!(engine.handle_input(&ev), 0);
    }

    #[test]
    fn empty_touch_list_changes_nothing() {
        let (mut engine, _) = engine();
        let mut surface = RecordingSurface::new(Size::new(600.0, 150.0));
        engine.start(&mut surface).unwrap();
        let before = engine.particles().to_vec();
        assert_eq!(engine.handle_input(&InputEvent::TouchStart(Vec::new())), 0);
        assert_eq!(engine.particles(), &before[..]);
    }

    #[test]
    fn engine_state_display() {
        assert_eq!(EngineState::Running.to_string(), "running");
        assert_eq!(EngineState::Stopped.to_string(), "stopped");
    }
}
