//! Tracing subscriber setup.
//!
//! Verbosity comes from the `-v` count; `RUST_LOG`, when set, overrides it.

use std::fs::File;
use std::path::PathBuf;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

use crate::error::{Error, Result};

/// Where log output goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    /// A log file, truncated on start.
    File(PathBuf),
    /// Standard error.
    Stderr,
    /// No subscriber is installed.
    Off,
}

/// Maps a `-v` count to a level filter.
pub const fn level_for(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

fn filter_for(verbosity: u8) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = level_for(verbosity);
        EnvFilter::new(format!("glyphburst={level},glyphburst_term={level}"))
    })
}

/// Installs the global subscriber.
///
/// # Errors
///
/// Returns [`Error::Logging`] if the log file cannot be created or a
/// subscriber is already installed.
pub fn init(verbosity: u8, target: &LogTarget) -> Result<()> {
    let builder = tracing_subscriber::fmt().with_env_filter(filter_for(verbosity));
    let installed = match target {
        LogTarget::Off => return Ok(()),
        LogTarget::Stderr => builder.with_writer(std::io::stderr).try_init(),
        LogTarget::File(path) => {
            let file = File::create(path)
                .map_err(|e| Error::Logging(format!("{}: {e}", path.display())))?;
            builder
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
        }
    };
    installed.map_err(|e| Error::Logging(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_levels() {
        assert_eq!(level_for(0), LevelFilter::WARN);
        assert_eq!(level_for(1), LevelFilter::INFO);
        assert_eq!(level_for(2), LevelFilter::DEBUG);
        assert_eq!(level_for(9), LevelFilter::TRACE);
    }

    #[test]
    fn off_installs_nothing() {
        assert!(init(3, &LogTarget::Off).is_ok());
    }

    #[test]
    fn unwritable_log_file_is_an_error() {
        let err = init(0, &LogTarget::File(PathBuf::from("/no/such/dir/gb.log"))).unwrap_err();
        assert!(matches!(err, Error::Logging(_)));
    }
}
