//! Command-line interface for the `glyphburst` binary.
//!
//! # Examples
//!
//! ```bash
//! # Default words, random seed
//! glyphburst
//!
//! # Custom words and a fixed seed
//! glyphburst --words HELLO WORLD --seed 42
//!
//! # Load settings from a file, override the accent color
//! glyphburst --config glyphburst.toml --accent "#f472b6"
//!
//! # Headless self-check (for CI)
//! glyphburst --self-check --frames 180
//! ```

use std::path::PathBuf;

use clap::{ArgAction, Parser};
use glyphburst::Rgb;

/// Interactive particle text in the terminal.
///
/// Two words are drawn as clusters of particles that float in place and
/// burst apart when the mouse passes over them, reassembling after a moment.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "glyphburst",
    author,
    version,
    about = "Interactive particle text in the terminal",
    long_about = "Two words drawn as particle clusters that float in place, burst apart \
                  under the mouse pointer, and reassemble. Press q, Esc or Ctrl+C to quit."
)]
pub struct Cli {
    /// The two words to display, upper row first
    #[arg(long, num_args = 2, value_names = ["TOP", "BOTTOM"])]
    pub words: Option<Vec<String>>,

    /// Seed for idle phases and explosion velocities
    ///
    /// The same seed and the same input reproduce the same animation
    #[arg(long, short = 's', env = "GLYPHBURST_SEED")]
    pub seed: Option<u64>,

    /// Target frame rate
    #[arg(long, env = "GLYPHBURST_FPS")]
    pub fps: Option<u32>,

    /// Path to a TOML config file
    ///
    /// Flags given on the command line override values from the file
    #[arg(long, short = 'c', env = "GLYPHBURST_CONFIG")]
    pub config: Option<PathBuf>,

    /// Background color as hex, e.g. "#0f172a"
    #[arg(long, env = "GLYPHBURST_BACKGROUND")]
    pub background: Option<Rgb>,

    /// Accent (stroke and glow) color as hex, e.g. "#38bdf8"
    #[arg(long, env = "GLYPHBURST_ACCENT")]
    pub accent: Option<Rgb>,

    /// Disable alternate screen mode
    #[arg(long, env = "GLYPHBURST_NO_ALT_SCREEN")]
    pub no_alt_screen: bool,

    /// Run a headless self-check and exit
    ///
    /// Drives the engine against an in-memory surface with a simulated
    /// clock; needs no TTY
    #[arg(long)]
    pub self_check: bool,

    /// Stop after this many frames
    #[arg(long)]
    pub frames: Option<u64>,

    /// Write logs to this file
    ///
    /// The terminal is owned by the animation, so interactive runs only log
    /// when a file is given
    #[arg(long, env = "GLYPHBURST_LOG_FILE")]
    pub log_file: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(long, short = 'v', action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Parse command line arguments.
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Create CLI from iterator (useful for testing).
    ///
    /// # Errors
    ///
    /// Returns an error if argument parsing fails.
    pub fn try_parse_from<I, T>(iter: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        <Self as Parser>::try_parse_from(iter)
    }
}
