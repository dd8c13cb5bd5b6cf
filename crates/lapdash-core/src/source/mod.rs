//! Telemetry Source Boundary
//!
//! The simulator exposes its live data as named channels in a shared buffer.
//! A source is polled by first freezing the latest buffer and then reading
//! individual channels from that frozen snapshot, so every read within one
//! tick sees the same sample.

mod error;
mod replay;

pub use error::SourceError;
pub use replay::ReplaySource;

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// A named telemetry channel consumed by the overlay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Channel {
    /// Seconds since session start
    SessionTime,
    /// Ground speed in m/s
    Speed,
    /// Engine speed in revolutions/minute
    Rpm,
    /// Selected gear (-1 reverse, 0 neutral)
    Gear,
    /// Throttle pedal, 0–1
    Throttle,
    /// Brake pedal, 0–1
    Brake,
    /// Running time of the current lap in seconds
    LapCurrentLapTime,
    /// Time of the last completed lap in seconds
    LapLastLapTime,
    /// Delta to best lap in seconds
    LapDeltaToBestLap,
    /// Delta to the last lap of this session in seconds
    LapDeltaToSessionLastLap,
    /// Fuel level as a 0–1 fraction of tank capacity
    ///
    /// Despite the name this is never a percentage at the source boundary;
    /// sources holding a percentage divide by 100 before exposing it.
    FuelLevelPct,
    /// Current lap number
    Lap,
    /// Shift-light RPM for the player car
    PlayerCarSlShiftRpm,
    /// Track surface temperature in °C
    TrackTemp,
    /// Precipitation, 0–1
    Precipitation,
    /// Track wetness level
    TrackWetness,
}

impl Channel {
    /// Every channel the overlay reads, in read order
    pub const ALL: [Channel; 16] = [
        Channel::SessionTime,
        Channel::Speed,
        Channel::Rpm,
        Channel::Gear,
        Channel::Throttle,
        Channel::Brake,
        Channel::LapCurrentLapTime,
        Channel::LapLastLapTime,
        Channel::LapDeltaToBestLap,
        Channel::LapDeltaToSessionLastLap,
        Channel::FuelLevelPct,
        Channel::Lap,
        Channel::PlayerCarSlShiftRpm,
        Channel::TrackTemp,
        Channel::Precipitation,
        Channel::TrackWetness,
    ];

    /// Name of the channel as published by the simulator
    pub fn name(self) -> &'static str {
        match self {
            Channel::SessionTime => "SessionTime",
            Channel::Speed => "Speed",
            Channel::Rpm => "RPM",
            Channel::Gear => "Gear",
            Channel::Throttle => "Throttle",
            Channel::Brake => "Brake",
            Channel::LapCurrentLapTime => "LapCurrentLapTime",
            Channel::LapLastLapTime => "LapLastLapTime",
            Channel::LapDeltaToBestLap => "LapDeltaToBestLap",
            Channel::LapDeltaToSessionLastLap => "LapDeltaToSessionLastLap",
            Channel::FuelLevelPct => "FuelLevelPct",
            Channel::Lap => "Lap",
            Channel::PlayerCarSlShiftRpm => "PlayerCarSLShiftRPM",
            Channel::TrackTemp => "TrackTemp",
            Channel::Precipitation => "Precipitation",
            Channel::TrackWetness => "TrackWetness",
        }
    }

    /// Look up a channel by its simulator name
    pub fn from_name(name: &str) -> Option<Channel> {
        Channel::ALL.into_iter().find(|ch| ch.name() == name)
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A raw channel value as delivered by the source
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ChannelValue {
    /// Boolean flag channel
    Bool(bool),
    /// Integer channel (gear, lap, enums)
    Int(i64),
    /// Floating point channel
    Float(f64),
}

impl ChannelValue {
    /// Numeric view of the value. Non-finite floats are treated as absent.
    pub fn as_f64(self) -> Option<f64> {
        match self {
            ChannelValue::Float(v) if v.is_finite() => Some(v),
            ChannelValue::Float(_) => None,
            ChannelValue::Int(v) => Some(v as f64),
            ChannelValue::Bool(v) => Some(if v { 1.0 } else { 0.0 }),
        }
    }

    /// Integer view of the value. Floats are truncated toward zero.
    pub fn as_i64(self) -> Option<i64> {
        match self {
            ChannelValue::Int(v) => Some(v),
            ChannelValue::Float(v) if v.is_finite() => Some(v.trunc() as i64),
            ChannelValue::Float(_) => None,
            ChannelValue::Bool(v) => Some(i64::from(v)),
        }
    }
}

impl From<f64> for ChannelValue {
    fn from(v: f64) -> Self {
        ChannelValue::Float(v)
    }
}

impl From<i64> for ChannelValue {
    fn from(v: i64) -> Self {
        ChannelValue::Int(v)
    }
}

impl From<bool> for ChannelValue {
    fn from(v: bool) -> Self {
        ChannelValue::Bool(v)
    }
}

/// One frozen snapshot: channel → value. Absent keys are missing channels.
pub type Frame = HashMap<Channel, ChannelValue>;

/// A polled telemetry source
///
/// Implementations are read-only views onto the simulator. `read` only ever
/// looks at the snapshot taken by the most recent `freeze_latest`.
pub trait TelemetrySource {
    /// Connect to the underlying data feed.
    ///
    /// Failure here is fatal for the overlay; the core never retries.
    fn startup(&mut self) -> Result<(), SourceError>;

    /// Snapshot the most recent buffered sample
    fn freeze_latest(&mut self);

    /// Read a channel from the frozen snapshot. `None` means missing.
    fn read(&self, channel: Channel) -> Option<ChannelValue>;

    /// Whether the source has no further samples to offer.
    ///
    /// Live feeds never finish; replays do.
    fn is_finished(&self) -> bool {
        false
    }
}

impl<T: TelemetrySource + ?Sized> TelemetrySource for Box<T> {
    fn startup(&mut self) -> Result<(), SourceError> {
        (**self).startup()
    }

    fn freeze_latest(&mut self) {
        (**self).freeze_latest()
    }

    fn read(&self, channel: Channel) -> Option<ChannelValue> {
        (**self).read(channel)
    }

    fn is_finished(&self) -> bool {
        (**self).is_finished()
    }
}
