//! Engine configuration.
//!
//! # Builder Pattern
//!
//! ```rust
//! use glyphburst::EngineConfig;
//!
//! let config = EngineConfig::new()
//!     .with_words("HELLO", "WORLD")
//!     .with_seed(42)
//!     .with_fps(30)
//!     .with_particles_per_glyph(20);
//! assert!(config.validate().is_ok());
//! ```
//!
//! # From a file
//!
//! Every field has a default, so a config file only needs the values it
//! changes:
//!
//! ```toml
//! words = ["HELLO", "WORLD"]
//! particles_per_glyph = 30
//!
//! [physics]
//! explode_duration = 1500
//! ```

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::factory::FactoryParams;
use crate::interaction::InteractionParams;
use crate::layout::LayoutParams;
use crate::physics::PhysicsParams;

/// Upper bound on the particle set (glyphs × particles per glyph).
pub const MAX_PARTICLES: usize = 1_000_000;

/// Everything needed to build an [`Engine`](crate::Engine).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// The two words, upper row first.
    pub words: [String; 2],
    /// RNG seed for idle phases and explosion velocities. `None` picks one at
    /// random.
    pub seed: Option<u64>,
    /// Target frame rate for scheduling.
    pub fps: u32,
    /// Particles per glyph.
    pub particles_per_glyph: usize,
    /// Particles at or below this opacity are not drawn.
    pub visibility_floor: f64,
    /// Anchor placement.
    pub layout: LayoutParams,
    /// Physics step.
    pub physics: PhysicsParams,
    /// Hit-testing.
    pub interaction: InteractionParams,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            words: ["DATA".to_string(), "ANALYTICS".to_string()],
            seed: None,
            fps: 60,
            particles_per_glyph: 50,
            visibility_floor: 0.01,
            layout: LayoutParams::default(),
            physics: PhysicsParams::default(),
            interaction: InteractionParams::default(),
        }
    }
}

impl EngineConfig {
    /// Default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the two words.
    pub fn with_words(mut self, top: impl Into<String>, bottom: impl Into<String>) -> Self {
        self.words = [top.into(), bottom.into()];
        self
    }

    /// Fixes the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets the target frame rate.
    pub fn with_fps(mut self, fps: u32) -> Self {
        self.fps = fps;
        self
    }

    /// Sets the particle count per glyph.
    pub fn with_particles_per_glyph(mut self, n: usize) -> Self {
        self.particles_per_glyph = n;
        self
    }

    /// Sets the trigger radius.
    pub fn with_trigger_radius(mut self, radius: f64) -> Self {
        self.interaction.trigger_radius = radius;
        self
    }

    /// Sets the explosion duration.
    pub fn with_explode_duration(mut self, duration: Duration) -> Self {
        self.physics.explode_duration = duration;
        self
    }

    /// Time between scheduled frames.
    pub fn frame_interval(&self) -> Duration {
        Duration::from_secs(1) / self.fps.max(1)
    }

    /// Number of glyphs the words produce.
    pub fn glyph_count(&self) -> usize {
        self.words
            .iter()
            .map(|w| w.chars().filter(|c| !c.is_whitespace()).count())
            .sum()
    }

    /// Parameters handed to the particle factory.
    pub fn factory_params(&self) -> FactoryParams {
        FactoryParams {
            particles_per_glyph: self.particles_per_glyph,
            default_opacity: self.physics.default_opacity,
        }
    }

    /// Checks every value against its legal range.
    pub fn validate(&self) -> Result<()> {
        if self.glyph_count() == 0 {
            return Err(Error::invalid("words", "at least one glyph is required"));
        }
        if self.particles_per_glyph == 0 {
            return Err(Error::invalid("particles_per_glyph", "must be at least 1"));
        }
        let total = self.glyph_count().checked_mul(self.particles_per_glyph);
        if total.is_none_or(|n| n > MAX_PARTICLES) {
            return Err(Error::invalid(
                "particles_per_glyph",
                format!("glyphs × particles_per_glyph must not exceed {MAX_PARTICLES}"),
            ));
        }
        if self.fps == 0 {
            return Err(Error::invalid("fps", "must be at least 1"));
        }
        if !(self.visibility_floor.is_finite() && self.visibility_floor >= 0.0) {
            return Err(Error::invalid("visibility_floor", "must be finite and >= 0"));
        }

        let layout = &self.layout;
        if !(layout.spacing_divisor.is_finite() && layout.spacing_divisor > 0.0) {
            return Err(Error::invalid("layout.spacing_divisor", "must be > 0"));
        }
        if !(layout.min_spacing.is_finite() && layout.min_spacing <= layout.max_spacing) {
            return Err(Error::invalid(
                "layout.min_spacing",
                format!("must not exceed max_spacing ({})", layout.max_spacing),
            ));
        }

        let physics = &self.physics;
        if physics.explode_duration.is_zero() {
            return Err(Error::invalid("physics.explode_duration", "must be > 0"));
        }
        if !(physics.drag > 0.0 && physics.drag <= 1.0) {
            return Err(Error::invalid("physics.drag", "must be in (0, 1]"));
        }
        if !(physics.default_opacity > 0.0 && physics.default_opacity <= 1.0) {
            return Err(Error::invalid("physics.default_opacity", "must be in (0, 1]"));
        }
        if !physics.gravity.is_finite() {
            return Err(Error::invalid("physics.gravity", "must be finite"));
        }
        if !(physics.max_frame_scale.is_finite() && physics.max_frame_scale > 0.0) {
            return Err(Error::invalid("physics.max_frame_scale", "must be > 0"));
        }

        let interaction = &self.interaction;
        if !(interaction.trigger_radius.is_finite() && interaction.trigger_radius > 0.0) {
            return Err(Error::invalid("interaction.trigger_radius", "must be > 0"));
        }
        if !interaction.max_speed.is_finite() {
            return Err(Error::invalid("interaction.max_speed", "must be finite"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field_of(config: &EngineConfig) -> Option<&'static str> {
        match config.validate() {
            Err(Error::InvalidConfig { field, .. }) => Some(field),
            _ => None,
        }
    }

    #[test]
    fn default_is_valid() {
        let config = EngineConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.glyph_count(), 13);
        assert_eq!(config.frame_interval(), Duration::from_secs(1) / 60);
    }

    #[test]
    fn rejects_empty_words() {
        let config = EngineConfig::default().with_words(" ", "");
        assert_eq!(field_of(&config), Some("words"));
    }

    #[test]
    fn rejects_bad_ranges() {
        let mut config = EngineConfig::default();
        config.physics.drag = 1.5;
        assert_eq!(field_of(&config), Some("physics.drag"));

        let config = EngineConfig::default().with_explode_duration(Duration::ZERO);
        assert_eq!(field_of(&config), Some("physics.explode_duration"));

        let config = EngineConfig::default().with_trigger_radius(-1.0);
        assert_eq!(field_of(&config), Some("interaction.trigger_radius"));

        let config = EngineConfig::default().with_fps(0);
        assert_eq!(field_of(&config), Some("fps"));

        let mut config = EngineConfig::default();
        config.layout.min_spacing = 100.0;
        assert_eq!(field_of(&config), Some("layout.min_spacing"));
    }

    #[test]
    fn rejects_oversized_particle_sets() {
        let config = EngineConfig::default().with_particles_per_glyph(usize::MAX);
        assert_eq!(field_of(&config), Some("particles_per_glyph"));

        // 13 glyphs: one particle over the cap.
        let per_glyph = MAX_PARTICLES / 13 + 1;
        let config = EngineConfig::default().with_particles_per_glyph(per_glyph);
        assert_eq!(field_of(&config), Some("particles_per_glyph"));

        let config = EngineConfig::default().with_particles_per_glyph(MAX_PARTICLES / 13);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn factory_params_share_default_opacity() {
        let mut config = EngineConfig::default();
        config.physics.default_opacity = 0.5;
        let params = config.factory_params();
        assert_eq!(params.particles_per_glyph, 50);
        assert!((params.default_opacity - 0.5).abs() < f64::EPSILON);
    }
}
