//! Derived Metrics
//!
//! Turns the stream of [`RawSample`]s into display quantities. The transform
//! is deterministic: the output of a tick depends only on the carried
//! [`PipelineState`], the sample, and the tick timestamp. Every branch has a
//! defined result, so nothing in here can fail.

mod delta;
mod flash;
mod fuel;
mod zones;

pub use delta::{DeltaBar, DeltaDirection};
pub use flash::ImprovementFlash;
pub use fuel::FuelTracker;
pub use zones::{shift_flash, RpmZone, SpeedZone, SpeedZonePolicy};

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::sample::{Gear, RawSample};
use crate::unit_conversion::{fraction_to_percent, mps_to_kmh, mps_to_mph};

/// Tunables for the metrics pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetricsConfig {
    /// RPM gauge full scale
    pub max_rpm: f64,
    /// Active speed zone policy
    pub speed_zones: SpeedZonePolicy,
    /// How long the lap-improvement flash stays on, in milliseconds
    pub flash_duration_ms: u64,
    /// Number of laps the fuel average is taken over
    pub fuel_window_laps: usize,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            max_rpm: 10_000.0,
            speed_zones: SpeedZonePolicy::default(),
            flash_duration_ms: 1200,
            fuel_window_laps: 5,
        }
    }
}

impl MetricsConfig {
    /// Flash window as a duration
    pub fn flash_duration(&self) -> Duration {
        Duration::from_millis(self.flash_duration_ms)
    }
}

/// State carried from one tick to the next
///
/// Created once when the loop starts and only ever touched by the metrics
/// pipeline; renderers get [`DisplayMetrics`] instead.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PipelineState {
    /// Lap-improvement edge detector
    pub flash: ImprovementFlash,
    /// Rolling fuel consumption
    pub fuel: FuelTracker,
    /// Highest speed seen this session, never decreases
    pub max_observed_speed_mph: f64,
}

/// Everything the overlay draws for one tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayMetrics {
    /// Seconds since session start
    pub session_time: f64,
    /// Speed in mph
    pub speed_mph: f64,
    /// Speed in km/h
    pub speed_kmh: f64,
    /// Speed band
    pub speed_zone: SpeedZone,
    /// Highest speed seen this session in mph
    pub max_observed_speed_mph: f64,
    /// Engine speed
    pub rpm: f64,
    /// `rpm / max_rpm`, clamped to 0–1
    pub rpm_fraction: f64,
    /// RPM band
    pub rpm_zone: RpmZone,
    /// Shift light
    pub shift_flash: bool,
    /// Selected gear
    pub gear: Gear,
    /// Throttle, 0–100
    pub throttle_pct: f64,
    /// Brake, 0–100
    pub brake_pct: f64,
    /// Current lap number
    pub lap_number: u32,
    /// Running time of the current lap
    pub lap_current_time: f64,
    /// Last completed lap time
    pub lap_last_time: f64,
    /// Delta to best lap
    pub lap_delta_to_best: f64,
    /// Delta to the session's last lap
    pub lap_delta_to_session_last: f64,
    /// Bar for the delta to best lap
    pub delta_to_best_bar: DeltaBar,
    /// Bar for the delta to the session's last lap
    pub delta_to_session_last_bar: DeltaBar,
    /// Last lap just got faster
    pub improvement_flash: bool,
    /// Fuel level, 0–100
    pub fuel_level_pct: f64,
    /// Mean fuel used per lap (percentage points)
    pub avg_fuel_per_lap: f64,
    /// Laps left at the average rate
    pub laps_remaining: f64,
    /// Track temperature in °C
    pub track_temp: f64,
    /// Precipitation, 0–100
    pub precipitation_pct: f64,
    /// Track wetness level
    pub track_wetness: f64,
}

/// Compute one tick without touching the input state
///
/// Returns the display values and the state to carry into the next tick.
pub fn step(
    config: &MetricsConfig,
    state: &PipelineState,
    sample: &RawSample,
    now: Duration,
) -> (DisplayMetrics, PipelineState) {
    let mut next = state.clone();

    let speed_mph = mps_to_mph(sample.speed);
    next.max_observed_speed_mph = next.max_observed_speed_mph.max(speed_mph);
    let speed_zone = config
        .speed_zones
        .classify(speed_mph, next.max_observed_speed_mph);

    let rpm_fraction = if config.max_rpm > 0.0 {
        (sample.rpm / config.max_rpm).clamp(0.0, 1.0)
    } else {
        0.0
    };

    let improvement_flash = next
        .flash
        .observe(sample.lap_last_time, now, config.flash_duration());

    next.fuel.observe(
        sample.lap_number,
        sample.fuel_level_pct,
        config.fuel_window_laps,
    );

    let metrics = DisplayMetrics {
        session_time: sample.session_time,
        speed_mph,
        speed_kmh: mps_to_kmh(sample.speed),
        speed_zone,
        max_observed_speed_mph: next.max_observed_speed_mph,
        rpm: sample.rpm,
        rpm_fraction,
        rpm_zone: RpmZone::classify(sample.rpm, config.max_rpm),
        shift_flash: shift_flash(sample.rpm, sample.shift_rpm),
        gear: sample.gear,
        throttle_pct: fraction_to_percent(sample.throttle),
        brake_pct: fraction_to_percent(sample.brake),
        lap_number: sample.lap_number,
        lap_current_time: sample.lap_current_time,
        lap_last_time: sample.lap_last_time,
        lap_delta_to_best: sample.lap_delta_to_best,
        lap_delta_to_session_last: sample.lap_delta_to_session_last,
        delta_to_best_bar: DeltaBar::from_delta(sample.lap_delta_to_best),
        delta_to_session_last_bar: DeltaBar::from_delta(sample.lap_delta_to_session_last),
        improvement_flash,
        fuel_level_pct: sample.fuel_level_pct,
        avg_fuel_per_lap: next.fuel.average(),
        laps_remaining: next.fuel.laps_remaining(sample.fuel_level_pct),
        track_temp: sample.track_temp,
        precipitation_pct: fraction_to_percent(sample.precipitation),
        track_wetness: sample.track_wetness,
    };

    (metrics, next)
}

/// Owner of the pipeline state for a running session
#[derive(Debug, Clone, Default)]
pub struct DerivedMetrics {
    config: MetricsConfig,
    state: PipelineState,
}

impl DerivedMetrics {
    /// Start a session with fresh state
    pub fn new(config: MetricsConfig) -> Self {
        Self {
            config,
            state: PipelineState::default(),
        }
    }

    /// Advance one tick
    pub fn update(&mut self, sample: &RawSample, now: Duration) -> DisplayMetrics {
        let (metrics, next) = step(&self.config, &self.state, sample, now);
        self.state = next;
        metrics
    }

    /// Current carried state
    pub fn state(&self) -> &PipelineState {
        &self.state
    }

    /// Active configuration
    pub fn config(&self) -> &MetricsConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_step_does_not_mutate_input_state() {
        let config = MetricsConfig::default();
        let state = PipelineState::default();
        let sample = RawSample {
            speed: 50.0,
            lap_number: 1,
            fuel_level_pct: 80.0,
            ..RawSample::default()
        };

        let (_, next) = step(&config, &state, &sample, Duration::ZERO);
        assert_eq!(state, PipelineState::default());
        assert!(next.max_observed_speed_mph > 0.0);
        assert_eq!(next.fuel.previous_lap(), 1);
    }

    #[test]
    fn test_pass_through_scaling() {
        let mut metrics = DerivedMetrics::new(MetricsConfig::default());
        let sample = RawSample {
            throttle: 0.75,
            brake: 0.1,
            precipitation: 0.2,
            track_temp: 31.5,
            track_wetness: 3.0,
            lap_delta_to_best: -0.25,
            gear: Gear::Engaged(3),
            ..RawSample::default()
        };
        let out = metrics.update(&sample, Duration::ZERO);
        assert!((out.throttle_pct - 75.0).abs() < 1e-9);
        assert!((out.brake_pct - 10.0).abs() < 1e-9);
        assert!((out.precipitation_pct - 20.0).abs() < 1e-9);
        assert_eq!(out.track_temp, 31.5);
        assert_eq!(out.track_wetness, 3.0);
        assert_eq!(out.lap_delta_to_best, -0.25);
        assert_eq!(out.delta_to_best_bar.direction, DeltaDirection::Ahead);
        assert_eq!(out.gear, Gear::Engaged(3));
    }

    #[test]
    fn test_rpm_fraction_is_clamped() {
        let mut metrics = DerivedMetrics::new(MetricsConfig::default());
        let out = metrics.update(
            &RawSample {
                rpm: 12_000.0,
                ..RawSample::default()
            },
            Duration::ZERO,
        );
        assert_eq!(out.rpm_fraction, 1.0);
        assert_eq!(out.rpm_zone, RpmZone::Redline);
    }
}
