//! Error types for engine construction and configuration.
//!
//! The running engine itself never fails: a surface that is not mounted yet
//! makes [`start`](crate::Engine::start) a no-op, and input without a usable
//! coordinate is ignored. Errors only surface while building an engine from
//! a configuration.

/// Errors that can occur when configuring an [`Engine`](crate::Engine).
///
/// # Example
///
/// ```rust
/// use glyphburst::{Engine, EngineConfig, Error};
///
/// let config = EngineConfig::default().with_particles_per_glyph(0);
/// match Engine::new(config) {
///     Err(Error::InvalidConfig { field, .. }) => assert_eq!(field, "particles_per_glyph"),
///     other => panic!("unexpected: {other:?}"),
/// }
/// ```
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// A configuration value is outside its legal range.
    #[error("invalid config value for `{field}`: {reason}")]
    InvalidConfig {
        /// Name of the offending field.
        field: &'static str,
        /// Human-readable constraint that was violated.
        reason: String,
    },
}

impl Error {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            field,
            reason: reason.into(),
        }
    }
}

/// A specialized [`Result`] type for glyphburst operations.
pub type Result<T> = std::result::Result<T, Error>;
