//! Sample reader
//!
//! Pulls one frozen snapshot per tick and resolves every channel to a typed
//! value. This is the only place where "missing" exists: anything the source
//! does not supply (absent, null, non-finite, out of domain) is replaced by
//! the documented default and the pipeline downstream never sees the gap.

use tracing::trace;

use crate::sample::{Gear, RawSample};
use crate::source::{Channel, TelemetrySource};
use crate::unit_conversion::fraction_to_percent;

/// Stateless reader that turns a source snapshot into a [`RawSample`]
#[derive(Debug, Clone, Copy, Default)]
pub struct SampleReader;

impl SampleReader {
    /// Freeze the latest buffer and read every overlay channel from it
    pub fn read<S: TelemetrySource + ?Sized>(source: &mut S) -> RawSample {
        source.freeze_latest();

        RawSample {
            session_time: float(source, Channel::SessionTime),
            speed: float(source, Channel::Speed),
            rpm: float(source, Channel::Rpm),
            gear: gear(source),
            throttle: float(source, Channel::Throttle),
            brake: float(source, Channel::Brake),
            lap_current_time: float(source, Channel::LapCurrentLapTime),
            lap_last_time: float(source, Channel::LapLastLapTime),
            lap_delta_to_best: float(source, Channel::LapDeltaToBestLap),
            lap_delta_to_session_last: float(source, Channel::LapDeltaToSessionLastLap),
            // Delivered as a 0–1 fraction, carried as a percentage from here on
            fuel_level_pct: fraction_to_percent(float(source, Channel::FuelLevelPct)),
            lap_number: lap_number(source),
            shift_rpm: float(source, Channel::PlayerCarSlShiftRpm),
            track_temp: float(source, Channel::TrackTemp),
            precipitation: float(source, Channel::Precipitation),
            track_wetness: float(source, Channel::TrackWetness),
        }
    }
}

fn float<S: TelemetrySource + ?Sized>(source: &S, channel: Channel) -> f64 {
    match source.read(channel).and_then(|v| v.as_f64()) {
        Some(v) => v,
        None => {
            trace!("Channel {} missing, using 0.0", channel);
            0.0
        }
    }
}

fn gear<S: TelemetrySource + ?Sized>(source: &S) -> Gear {
    match source
        .read(Channel::Gear)
        .and_then(|v| v.as_i64())
        .and_then(|v| i32::try_from(v).ok())
    {
        Some(g) => Gear::Engaged(g),
        None => {
            trace!("Channel {} missing, using N/A", Channel::Gear);
            Gear::Unavailable
        }
    }
}

fn lap_number<S: TelemetrySource + ?Sized>(source: &S) -> u32 {
    match source
        .read(Channel::Lap)
        .and_then(|v| v.as_i64())
        .and_then(|v| u32::try_from(v).ok())
    {
        Some(lap) => lap,
        None => {
            trace!("Channel {} missing or negative, using 0", Channel::Lap);
            0
        }
    }
}
