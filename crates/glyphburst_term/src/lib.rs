#![forbid(unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! # glyphburst_term
//!
//! Terminal host for the [`glyphburst`] particle text engine.
//!
//! The host owns everything the engine leaves out: a crossterm-backed
//! [`Surface`](glyphburst::Surface) that maps pixels onto character cells,
//! mouse-to-input conversion, a frame loop that waits on terminal events
//! between scheduled frames, CLI and config-file handling, logging setup,
//! and a headless self-check for CI.
//!
//! ## Headless use
//!
//! ```rust
//! use glyphburst_term::{Config, headless};
//!
//! let mut config = Config::default();
//! config.engine.seed = Some(1);
//! config.self_check.frames = 5;
//!
//! let report = headless::run(&config).unwrap();
//! assert_eq!(report.particles, 650);
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod headless;
pub mod input;
pub mod logging;
pub mod program;
pub mod surface;

pub use cli::Cli;
pub use config::{Config, SelfCheckConfig, TerminalConfig};
pub use error::{Error, Result};
pub use headless::SelfCheckReport;
pub use logging::LogTarget;
pub use program::{Program, RunSummary};
pub use surface::{Cell, CellSize, TerminalSurface};
