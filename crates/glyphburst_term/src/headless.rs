//! Headless self-check.
//!
//! Drives the engine against a [`RecordingSurface`] with a [`ManualClock`],
//! so it needs no TTY and runs in simulated time. After the first frame it
//! touches the first glyph, then keeps stepping and checks that:
//!
//! - the particle count matches the glyph count,
//! - the touch triggered particles,
//! - every frame filled the background and drew something,
//! - exploded particles have reassembled once the explosion duration passed.

use std::fmt;

use glyphburst::{Clock, Engine, ManualClock, RecordingSurface};
use tracing::{debug, info};

use crate::config::Config;
use crate::error::{Error, Result};

/// Results of a self-check run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelfCheckReport {
    /// RNG seed used.
    pub seed: u64,
    /// Frames simulated.
    pub frames: u64,
    /// Glyphs laid out.
    pub glyphs: usize,
    /// Particles built.
    pub particles: usize,
    /// Particles triggered by the touch.
    pub triggered: usize,
    /// Most particles exploding in any one frame.
    pub peak_exploding: usize,
    /// Particles still exploding after the last frame.
    pub final_exploding: usize,
    /// Particles drawn in the last frame.
    pub drawn_last: usize,
}

impl fmt::Display for SelfCheckReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "seed: {}", self.seed)?;
        writeln!(f, "frames: {}", self.frames)?;
        writeln!(f, "glyphs: {}", self.glyphs)?;
        writeln!(f, "particles: {}", self.particles)?;
        writeln!(f, "triggered: {}", self.triggered)?;
        writeln!(f, "peak exploding: {}", self.peak_exploding)?;
        writeln!(f, "final exploding: {}", self.final_exploding)?;
        write!(f, "drawn last frame: {}", self.drawn_last)
    }
}

/// Runs the self-check described by `config`.
///
/// # Errors
///
/// Returns [`Error::Config`] if the engine rejects its config and
/// [`Error::SelfCheck`] if any check fails.
pub fn run(config: &Config) -> Result<SelfCheckReport> {
    let clock = ManualClock::new();
    let mut engine =
        Engine::with_clock(config.engine.clone(), clock.clone())?.with_theme(config.theme);
    let mut surface = RecordingSurface::new(config.self_check.size());

    let Some(mut request) = engine.start(&mut surface) else {
        return Err(Error::SelfCheck("engine did not start on the in-memory surface".into()));
    };
    let expected = config
        .engine
        .glyph_count()
        .saturating_mul(config.engine.particles_per_glyph);
    if engine.particles().len() != expected {
        return Err(Error::SelfCheck(format!(
            "built {} particles, expected {expected}",
            engine.particles().len()
        )));
    }

    let interval = config.engine.frame_interval();
    let mut report = SelfCheckReport {
        seed: engine.seed(),
        frames: 0,
        glyphs: engine.anchors().len(),
        particles: engine.particles().len(),
        triggered: 0,
        peak_exploding: 0,
        final_exploding: 0,
        drawn_last: 0,
    };
    let mut triggered_at = None;

    for frame in 1..=config.self_check.frames {
        clock.advance(request.wait_from(clock.now()));
        request = engine
            .run_frame(request.token, &mut surface)
            .ok_or_else(|| Error::SelfCheck(format!("frame {frame} was not run")))?;

        let ops = surface.take_ops();
        if ops.len() < 2 {
            return Err(Error::SelfCheck(format!("frame {frame} drew nothing")));
        }

        let stats = engine.stats();
        report.frames = frame;
        report.peak_exploding = report.peak_exploding.max(stats.exploding);
        report.final_exploding = stats.exploding;
        report.drawn_last = stats.drawn;

        if frame == 1 {
            let anchor = engine.anchors()[0].pos;
            report.triggered = engine.on_pointer_interaction(anchor.x, anchor.y);
            triggered_at = Some(clock.now());
            debug!(triggered = report.triggered, "touched first glyph");
        }
    }
    drop(engine);

    if report.triggered == 0 {
        return Err(Error::SelfCheck(
            "touching the first glyph triggered no particles".into(),
        ));
    }
    let settled = triggered_at.is_some_and(|at| {
        clock.now().saturating_sub(at) >= config.engine.physics.explode_duration + interval
    });
    if settled && report.final_exploding != 0 {
        return Err(Error::SelfCheck(format!(
            "{} particles still exploding after the explosion duration",
            report.final_exploding
        )));
    }

    info!(frames = report.frames, triggered = report.triggered, "self-check passed");
    Ok(report)
}
