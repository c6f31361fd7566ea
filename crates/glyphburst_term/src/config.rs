//! Runtime configuration for the terminal host.
//!
//! [`Config`] is resolved from an optional TOML file and the command line.
//! Flags given on the command line always win over the file.
//!
//! ```toml
//! log_file = "glyphburst.log"
//!
//! [engine]
//! words = ["HELLO", "WORLD"]
//! seed = 42
//!
//! [engine.physics]
//! explode_duration = 1500
//!
//! [theme]
//! accent = "#f472b6"
//!
//! [terminal]
//! alt_screen = false
//! cell = { width = 8.0, height = 16.0 }
//!
//! [self_check]
//! frames = 240
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use glyphburst::{EngineConfig, Size, StaticTheme};
use serde::{Deserialize, Serialize};

use crate::cli::Cli;
use crate::error::{Error, Result};
use crate::logging::LogTarget;
use crate::surface::CellSize;

/// Terminal host settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerminalConfig {
    /// Run in the alternate screen buffer.
    pub alt_screen: bool,
    /// Pixel size of one character cell.
    pub cell: CellSize,
    /// Quit after this many frames.
    pub max_frames: Option<u64>,
}

impl Default for TerminalConfig {
    fn default() -> Self {
        Self {
            alt_screen: true,
            cell: CellSize::default(),
            max_frames: None,
        }
    }
}

/// Headless self-check settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelfCheckConfig {
    /// Frames to simulate.
    pub frames: u64,
    /// Width of the in-memory surface in pixels.
    pub width: f64,
    /// Height of the in-memory surface in pixels.
    pub height: f64,
}

impl Default for SelfCheckConfig {
    fn default() -> Self {
        Self {
            frames: 180,
            width: 600.0,
            height: 150.0,
        }
    }
}

impl SelfCheckConfig {
    /// Size of the in-memory surface.
    pub const fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

/// Runtime configuration for the host.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Engine settings.
    pub engine: EngineConfig,
    /// Theme colors.
    pub theme: StaticTheme,
    /// Terminal settings.
    pub terminal: TerminalConfig,
    /// Self-check settings.
    pub self_check: SelfCheckConfig,
    /// Log file path.
    pub log_file: Option<PathBuf>,

    /// Run the headless self-check instead of the terminal.
    #[serde(skip)]
    pub headless: bool,
    /// Log verbosity level (0=warn, 1=info, 2=debug, 3+=trace).
    #[serde(skip)]
    pub verbosity: u8,
}

impl Config {
    /// Create a new config with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolves the config from CLI arguments and the file they name.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be read or parsed, or if
    /// the resolved values are out of range.
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let mut config = match &cli.config {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_cli(cli);
        config.validate()?;
        Ok(config)
    }

    /// Loads a config file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigRead`] or [`Error::ConfigParse`].
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|source| Error::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&text).map_err(|source| Error::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Overrides file values with everything given on the command line.
    pub fn apply_cli(&mut self, cli: &Cli) {
        if let Some([top, bottom]) = cli.words.as_deref() {
            self.engine.words = [top.clone(), bottom.clone()];
        }
        if let Some(seed) = cli.seed {
            self.engine.seed = Some(seed);
        }
        if let Some(fps) = cli.fps {
            self.engine.fps = fps;
        }
        if cli.background.is_some() {
            self.theme.background = cli.background;
        }
        if cli.accent.is_some() {
            self.theme.accent = cli.accent;
        }
        if cli.no_alt_screen {
            self.terminal.alt_screen = false;
        }
        if let Some(frames) = cli.frames {
            self.terminal.max_frames = Some(frames);
            self.self_check.frames = frames;
        }
        if cli.log_file.is_some() {
            self.log_file.clone_from(&cli.log_file);
        }
        self.headless = cli.self_check;
        self.verbosity = cli.verbose;
    }

    /// Checks engine and host values.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] for engine values and
    /// [`Error::InvalidSetting`] for host values.
    pub fn validate(&self) -> Result<()> {
        self.engine.validate()?;

        let cell = self.terminal.cell;
        if !(cell.width.is_finite() && cell.width > 0.0 && cell.height.is_finite() && cell.height > 0.0) {
            return Err(Error::InvalidSetting {
                field: "terminal.cell",
                reason: "width and height must be > 0".to_string(),
            });
        }
        if self.self_check.frames == 0 {
            return Err(Error::InvalidSetting {
                field: "self_check.frames",
                reason: "must be at least 1".to_string(),
            });
        }
        if self.self_check.size().is_empty() {
            return Err(Error::InvalidSetting {
                field: "self_check.width",
                reason: "surface must have a positive width and height".to_string(),
            });
        }
        Ok(())
    }

    /// Where logs should go.
    ///
    /// An explicit log file always wins. Otherwise the self-check logs to
    /// stderr and an interactive run does not log, since it owns the screen.
    pub fn log_target(&self) -> LogTarget {
        match (&self.log_file, self.headless) {
            (Some(path), _) => LogTarget::File(path.clone()),
            (None, true) => LogTarget::Stderr,
            (None, false) => LogTarget::Off,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::time::Duration;

    use glyphburst::Rgb;
    use tempfile::NamedTempFile;

    fn cli(args: &[&str]) -> Cli {
        let mut argv = vec!["glyphburst"];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).unwrap()
    }

    fn write_config(text: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(text.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_cli(&cli(&[])).unwrap();
        assert_eq!(config.engine, EngineConfig::default());
        assert!(config.terminal.alt_screen);
        assert_eq!(config.self_check.frames, 180);
        assert_eq!(config.log_target(), LogTarget::Off);
    }

    #[test]
    fn test_file_values_load() {
        let file = write_config(
            r##"
log_file = "/tmp/gb.log"

[engine]
words = ["HELLO", "WORLD"]
particles_per_glyph = 20

[engine.physics]
explode_duration = 1500

[theme]
accent = "#f472b6"

[terminal]
alt_screen = false
"##,
        );
        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.engine.words, ["HELLO".to_string(), "WORLD".to_string()]);
        assert_eq!(config.engine.particles_per_glyph, 20);
        assert_eq!(config.engine.physics.explode_duration, Duration::from_millis(1500));
        assert_eq!(config.theme.accent, Some(Rgb::new(0xf4, 0x72, 0xb6)));
        assert!(!config.terminal.alt_screen);
        assert_eq!(config.log_file, Some(PathBuf::from("/tmp/gb.log")));
    }

    #[test]
    fn test_cli_wins_over_file() {
        let file = write_config(
            r#"
[engine]
words = ["FROM", "FILE"]
seed = 1
fps = 30
"#,
        );
        let path = file.path().to_str().unwrap();
        let config = Config::from_cli(&cli(&[
            "--config", path, "--words", "FROM", "CLI", "--seed", "2", "--background", "#000000",
        ]))
        .unwrap();
        assert_eq!(config.engine.words, ["FROM".to_string(), "CLI".to_string()]);
        assert_eq!(config.engine.seed, Some(2));
        assert_eq!(config.engine.fps, 30);
        assert_eq!(config.theme.background, Some(Rgb::new(0, 0, 0)));
    }

    #[test]
    fn test_frames_apply_to_both_modes() {
        let config = Config::from_cli(&cli(&["--frames", "42", "--self-check"])).unwrap();
        assert_eq!(config.terminal.max_frames, Some(42));
        assert_eq!(config.self_check.frames, 42);
        assert!(config.headless);
        assert_eq!(config.log_target(), LogTarget::Stderr);
    }

    #[test]
    fn test_missing_file_is_read_error() {
        let err = Config::from_cli(&cli(&["--config", "/definitely/not/here.toml"])).unwrap_err();
        assert!(matches!(err, Error::ConfigRead { .. }));
    }

    #[test]
    fn test_bad_toml_is_parse_error() {
        let file = write_config("[engine]\nfps = \"fast\"\n");
        let err = Config::from_file(file.path()).unwrap_err();
        assert!(matches!(err, Error::ConfigParse { .. }));
    }

    #[test]
    fn test_invalid_values_rejected() {
        let err = Config::from_cli(&cli(&["--fps", "0"])).unwrap_err();
        assert!(matches!(err, Error::Config(_)));

        let err = Config::from_cli(&cli(&["--self-check", "--frames", "0"])).unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidSetting {
                field: "self_check.frames",
                ..
            }
        ));

        let mut config = Config::default();
        config.terminal.cell.width = 0.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_log_file_wins() {
        let config = Config::from_cli(&cli(&["--self-check", "--log-file", "out.log"])).unwrap();
        assert_eq!(config.log_target(), LogTarget::File(PathBuf::from("out.log")));
    }
}
