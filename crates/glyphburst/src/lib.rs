#![forbid(unsafe_code)]
// Allow these clippy lints for physics/math code readability
#![allow(clippy::must_use_candidate)]
#![allow(clippy::suboptimal_flops)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::module_name_repetitions)]

//! # Glyphburst
//!
//! Interactive particle text for 2D drawing surfaces.
//!
//! Two words are laid out as clusters of colored particles. While resting,
//! every particle floats gently around its anchor. When a pointer or touch
//! comes close, nearby particles explode outward under gravity and drag,
//! fade out, and snap back into place after a fixed duration.
//!
//! Glyphburst provides:
//! - **Layout**: deterministic anchor placement for two centered rows
//! - **Particles**: a fixed particle set built from anchors and a reusable shape
//! - **Interaction**: radius hit-testing that triggers explosions
//! - **Physics**: idle oscillation, explosion integration, timed reset
//! - **Engine**: a cancellable frame scheduler that drives it all
//!
//! The engine never touches a real screen. Hosts implement [`Surface`] for
//! whatever they draw on and feed frames and input back into the [`Engine`].
//!
//! ## Example
//!
//! ```rust
//! use glyphburst::{Engine, EngineConfig, ManualClock, RecordingSurface, Size};
//! use std::time::Duration;
//!
//! let clock = ManualClock::new();
//! let mut engine = Engine::with_clock(EngineConfig::default().with_seed(7), clock.clone())?;
//! let mut surface = RecordingSurface::new(Size::new(600.0, 150.0));
//!
//! let mut request = engine.start(&mut surface);
//! assert_eq!(engine.particles().len(), 13 * 50);
//!
//! // Drive a few frames the way a host loop would.
//! for _ in 0..3 {
//!     let Some(req) = request else { break };
//!     clock.advance(Duration::from_millis(16));
//!     request = engine.run_frame(req.token, &mut surface);
//! }
//!
//! engine.stop();
//! assert!(!engine.is_running());
//! # Ok::<(), glyphburst::Error>(())
//! ```

pub mod clock;
pub mod color;
pub mod config;
pub mod engine;
pub mod error;
pub mod factory;
pub mod geometry;
pub mod interaction;
pub mod layout;
pub mod particle;
pub mod physics;
pub mod recording;
pub mod render;
pub mod theme;

pub use clock::{Clock, ManualClock, SystemClock};
pub use color::{ColorError, Rgb, Rgba};
pub use config::{EngineConfig, MAX_PARTICLES};
pub use engine::{Engine, EngineState, FrameRequest, FrameStats, FrameToken};
pub use error::{Error, Result};
pub use factory::{attach_input, build_particles, palette_color, shape_offset, FactoryParams};
pub use geometry::{Point, Rect, Size};
pub use interaction::{trigger, InputEvent, InputKind, InteractionParams};
pub use layout::{plan, Anchor, LayoutParams};
pub use particle::{Particle, ParticleState};
pub use physics::PhysicsParams;
pub use recording::{DrawOp, RecordingSurface};
pub use render::{Font, GlyphRenderer, Renderer, Shadow, Stroke, Surface, TextStyle};
pub use theme::{StaticTheme, ThemeColors, ThemeSource};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::clock::{Clock, ManualClock, SystemClock};
    pub use crate::config::EngineConfig;
    pub use crate::engine::{Engine, FrameRequest, FrameToken};
    pub use crate::geometry::{Point, Rect, Size};
    pub use crate::interaction::InputEvent;
    pub use crate::render::{Renderer, Surface};
    pub use crate::theme::ThemeSource;
}
