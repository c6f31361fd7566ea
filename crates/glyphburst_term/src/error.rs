//! Error types for the terminal host.

use std::io;
use std::path::PathBuf;

/// Errors that can occur while configuring or running the terminal host.
///
/// | Error Variant | Recovery Strategy |
/// |--------------|-------------------|
/// | [`Io`](Error::Io) | Check terminal availability |
/// | [`RawModeFailure`](Error::RawModeFailure) | Check terminal compatibility |
/// | [`AltScreenFailure`](Error::AltScreenFailure) | Run with `--no-alt-screen` |
/// | [`EventPoll`](Error::EventPoll) | Terminal may be disconnected |
/// | [`Render`](Error::Render) | Output stream closed |
/// | [`Config`](Error::Config), [`InvalidSetting`](Error::InvalidSetting) | Fix the flag or config value named in the message |
/// | [`ConfigRead`](Error::ConfigRead), [`ConfigParse`](Error::ConfigParse) | Fix the config file |
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// I/O error during terminal operations.
    #[error("terminal io error: {0}")]
    Io(#[from] io::Error),

    /// Failed to enable or disable raw mode.
    ///
    /// Raw mode is required to receive mouse and key events unbuffered.
    /// This usually means stdout is not a TTY.
    #[error("failed to {action} raw mode: {source}")]
    RawModeFailure {
        /// Whether we were trying to enable or disable raw mode.
        action: &'static str,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// Failed to enter or leave the alternate screen.
    #[error("failed to {action} alternate screen: {source}")]
    AltScreenFailure {
        /// Whether we were trying to enter or leave the alternate screen.
        action: &'static str,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// Failed to poll or read terminal events.
    #[error("failed to poll terminal events: {0}")]
    EventPoll(io::Error),

    /// Failed to write a frame to the terminal.
    #[error("failed to render frame: {0}")]
    Render(io::Error),

    /// The engine rejected its configuration.
    #[error("invalid configuration: {0}")]
    Config(#[from] glyphburst::Error),

    /// A host setting is out of range.
    #[error("invalid setting {field}: {reason}")]
    InvalidSetting {
        /// Dotted path of the offending setting.
        field: &'static str,
        /// What is wrong with it.
        reason: String,
    },

    /// The config file could not be read.
    #[error("failed to read config file {}: {source}", path.display())]
    ConfigRead {
        /// Path given on the command line.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The config file is not valid TOML or has unknown values.
    #[error("failed to parse config file {}: {source}", path.display())]
    ConfigParse {
        /// Path given on the command line.
        path: PathBuf,
        /// The TOML error, with line and column.
        #[source]
        source: toml::de::Error,
    },

    /// The log file could not be opened or a subscriber was already set.
    #[error("failed to initialize logging: {0}")]
    Logging(String),

    /// The headless self-check found a problem.
    #[error("self-check failed: {0}")]
    SelfCheck(String),
}

/// A specialized [`Result`] type for host operations.
pub type Result<T> = std::result::Result<T, Error>;
