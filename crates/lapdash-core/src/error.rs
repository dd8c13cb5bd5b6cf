//! Top-level overlay errors

use thiserror::Error;

use crate::config::ConfigError;

/// Errors that can stop the overlay
///
/// Missing channels and degenerate derived values never show up here; the
/// reader and the metrics pipeline recover from those on their own.
#[derive(Error, Debug)]
pub enum OverlayError {
    /// The telemetry source could not be started. Fatal at startup.
    #[error("Telemetry source unavailable: {0}")]
    SourceUnavailable(String),

    /// Configuration could not be loaded or is out of range
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The render sink rejected a frame
    #[error("Render error: {0}")]
    Render(String),

    /// I/O failure outside of the source and config layers
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
