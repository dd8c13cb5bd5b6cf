//! Overlay configuration
//!
//! Persisted as pretty-printed JSON. Every field has a default so partial
//! files load; values are range-checked by [`OverlayConfig::validate`].

use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

use crate::metrics::{MetricsConfig, SpeedZonePolicy};

/// Lowest accepted tick rate in Hz
pub const MIN_TICK_RATE_HZ: f64 = 1.0;

/// Highest accepted tick rate in Hz
pub const MAX_TICK_RATE_HZ: f64 = 200.0;

/// Errors that can occur while loading or validating configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Invalid value for '{field}': {message}")]
    Invalid { field: String, message: String },
}

/// Saved screen position of an overlay window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowOffset {
    pub x: i32,
    pub y: i32,
}

/// Window placement and chrome, handed through to the render sink untouched
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayLayout {
    /// Lap delta window position
    pub delta_window: WindowOffset,
    /// Dash (RPM/fuel/pedals) window position
    pub dash_window: WindowOffset,
    /// Draw without window decorations
    pub borderless: bool,
    /// Keep the overlay above the simulator
    pub always_on_top: bool,
    /// Window alpha, 0–255
    pub opacity: u8,
}

impl Default for OverlayLayout {
    fn default() -> Self {
        Self {
            delta_window: WindowOffset { x: 50, y: 30 },
            dash_window: WindowOffset { x: 740, y: 830 },
            borderless: true,
            always_on_top: true,
            opacity: 200,
        }
    }
}

/// Complete overlay configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayConfig {
    /// Frame loop rate in Hz
    pub tick_rate_hz: f64,
    /// Metrics pipeline tunables
    pub metrics: MetricsConfig,
    /// Window layout
    pub layout: OverlayLayout,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            tick_rate_hz: 20.0,
            metrics: MetricsConfig::default(),
            layout: OverlayLayout::default(),
        }
    }
}

impl OverlayConfig {
    /// Default config file location (`<config dir>/lapdash/config.json`)
    pub fn default_path() -> io::Result<PathBuf> {
        let base = dirs::config_dir()
            .or_else(dirs::home_dir)
            .ok_or_else(|| {
                io::Error::new(io::ErrorKind::NotFound, "Could not find config directory")
            })?;
        Ok(base.join("lapdash").join("config.json"))
    }

    /// Load and validate a config file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: OverlayConfig =
            serde_json::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        debug!("Loaded config from {}", path.as_ref().display());
        Ok(config)
    }

    /// Load a config file, falling back to defaults when it does not exist
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        if path.as_ref().exists() {
            Self::load(path)
        } else {
            debug!(
                "No config at {}, using defaults",
                path.as_ref().display()
            );
            Ok(Self::default())
        }
    }

    /// Write the config as pretty JSON, creating parent directories
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content =
            serde_json::to_string_pretty(self).map_err(|e| ConfigError::Parse(e.to_string()))?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Check that every value is in range
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(MIN_TICK_RATE_HZ..=MAX_TICK_RATE_HZ).contains(&self.tick_rate_hz) {
            return Err(invalid(
                "tick_rate_hz",
                format!(
                    "{} is outside {}–{} Hz",
                    self.tick_rate_hz, MIN_TICK_RATE_HZ, MAX_TICK_RATE_HZ
                ),
            ));
        }

        let metrics = &self.metrics;
        if !(metrics.max_rpm.is_finite() && metrics.max_rpm > 0.0) {
            return Err(invalid("metrics.max_rpm", "must be greater than 0"));
        }
        if metrics.fuel_window_laps == 0 {
            return Err(invalid("metrics.fuel_window_laps", "must be at least 1"));
        }

        match metrics.speed_zones {
            SpeedZonePolicy::Fixed {
                low_below_mph,
                high_above_mph,
            } => {
                if low_below_mph > high_above_mph {
                    return Err(invalid(
                        "metrics.speed_zones",
                        "low_below_mph must not exceed high_above_mph",
                    ));
                }
            }
            SpeedZonePolicy::Relative {
                low_fraction,
                mid_fraction,
            } => {
                if !(0.0..=1.0).contains(&low_fraction)
                    || !(0.0..=1.0).contains(&mid_fraction)
                    || low_fraction > mid_fraction
                {
                    return Err(invalid(
                        "metrics.speed_zones",
                        "fractions must satisfy 0 <= low_fraction <= mid_fraction <= 1",
                    ));
                }
            }
        }

        Ok(())
    }

    /// Time between ticks
    pub fn tick_interval(&self) -> Duration {
        let rate = self.tick_rate_hz.clamp(MIN_TICK_RATE_HZ, MAX_TICK_RATE_HZ);
        Duration::from_secs_f64(1.0 / rate)
    }
}

fn invalid(field: &str, message: impl Into<String>) -> ConfigError {
    ConfigError::Invalid {
        field: field.to_string(),
        message: message.into(),
    }
}
