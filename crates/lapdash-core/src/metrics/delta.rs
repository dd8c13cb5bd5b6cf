//! Lap delta bars

use serde::{Deserialize, Serialize};

/// Which side of the reference lap the car is on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeltaDirection {
    /// Negative delta: faster than the reference
    Ahead,
    /// Positive delta: slower than the reference
    Behind,
    /// Exactly on the reference
    Even,
}

/// Log-scaled bar for a lap delta
///
/// `fraction` is the share of the half-bar to fill: `log10(|delta| + 1)`,
/// capped at 1, so a 9 s delta already fills it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DeltaBar {
    /// Fill, 0–1
    pub fraction: f64,
    /// Side to draw on
    pub direction: DeltaDirection,
}

impl DeltaBar {
    /// Build the bar for a delta in seconds
    pub fn from_delta(delta: f64) -> Self {
        let direction = if delta < 0.0 {
            DeltaDirection::Ahead
        } else if delta > 0.0 {
            DeltaDirection::Behind
        } else {
            DeltaDirection::Even
        };
        Self {
            fraction: (delta.abs() + 1.0).log10().min(1.0),
            direction,
        }
    }
}
