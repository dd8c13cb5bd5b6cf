//! Typed telemetry samples
//!
//! A [`RawSample`] is one frozen snapshot with every channel resolved to a
//! concrete value. Channels the source did not supply carry their default:
//! `0.0` for numeric channels, `0` for the lap counter, and
//! [`Gear::Unavailable`] for the gear.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Selected gear as shown on the dash
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Gear {
    /// Gear reported by the car; -1 is reverse and 0 is neutral
    Engaged(i32),
    /// The gear channel was missing
    #[default]
    Unavailable,
}

impl fmt::Display for Gear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Gear::Engaged(gear) => write!(f, "{}", gear),
            Gear::Unavailable => f.write_str("N/A"),
        }
    }
}

/// One polled snapshot with defaults already substituted
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RawSample {
    /// Seconds since session start
    pub session_time: f64,
    /// Ground speed in m/s
    pub speed: f64,
    /// Engine speed in revolutions/minute
    pub rpm: f64,
    /// Selected gear
    pub gear: Gear,
    /// Throttle pedal, 0–1
    pub throttle: f64,
    /// Brake pedal, 0–1
    pub brake: f64,
    /// Running time of the current lap in seconds
    pub lap_current_time: f64,
    /// Time of the last completed lap in seconds
    pub lap_last_time: f64,
    /// Delta to best lap in seconds
    pub lap_delta_to_best: f64,
    /// Delta to the session's last lap in seconds
    pub lap_delta_to_session_last: f64,
    /// Fuel level as a percentage (0–100), scaled from the 0–1
    /// [`Channel::FuelLevelPct`](crate::source::Channel::FuelLevelPct) fraction
    pub fuel_level_pct: f64,
    /// Current lap number
    pub lap_number: u32,
    /// Shift-light RPM, 0 when unknown
    pub shift_rpm: f64,
    /// Track temperature in °C
    pub track_temp: f64,
    /// Precipitation, 0–1
    pub precipitation: f64,
    /// Track wetness level
    pub track_wetness: f64,
}
