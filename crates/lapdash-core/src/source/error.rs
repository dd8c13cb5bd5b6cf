//! Source errors

use thiserror::Error;

/// Errors that can occur while starting or loading a telemetry source
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("Telemetry source not running: {0}")]
    NotRunning(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error at line {line}: {message}")]
    Parse { line: usize, message: String },
}
