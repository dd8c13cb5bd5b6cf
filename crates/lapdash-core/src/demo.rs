//! Demo Mode - Simulated telemetry source for testing
//!
//! Generates plausible player-car telemetry without the simulator running.
//! Simulates a car lapping a circuit: a speed trace with straights and
//! braking zones, gear/RPM following speed, per-lap fuel burn, and lap
//! times that vary (and sometimes improve) from lap to lap.

use rand::rngs::StdRng;
use rand::Rng;
use rand::SeedableRng;
use std::f64::consts::TAU;
use std::time::Instant;

use crate::source::{Channel, ChannelValue, Frame, SourceError, TelemetrySource};

/// Shift-light RPM of the simulated car
pub const DEMO_SHIFT_RPM: f64 = 7200.0;

/// Width of one gear's speed band in m/s
const GEAR_BAND_MPS: f64 = 14.0;
const TOP_GEAR: i64 = 6;
const BASE_RPM: f64 = 3500.0;
const RPM_SPAN: f64 = 4200.0;

/// Demo telemetry source that simulates a car lapping
pub struct DemoSource {
    /// Wall clock origin, set on startup
    started: Option<Instant>,
    /// Current lap number
    lap: u32,
    /// Simulation time the current lap started (s)
    lap_started_at: f64,
    /// Duration of the current lap (s)
    lap_length: f64,
    /// Last completed lap time (s), 0 before the first lap completes
    last_lap_time: f64,
    /// Best completed lap time (s)
    best_lap_time: Option<f64>,
    /// Fuel fraction at the start of the current lap
    lap_start_fuel: f64,
    /// Fuel fraction burned over the current lap
    lap_burn: f64,
    /// Frozen snapshot
    frozen: Frame,
    /// Random number generator
    rng: StdRng,
}

impl Default for DemoSource {
    fn default() -> Self {
        Self::new()
    }
}

impl DemoSource {
    /// Create a new demo source
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Create a demo source with a fixed seed for repeatable runs
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(mut rng: StdRng) -> Self {
        let lap_length = rng.gen_range(88.0..92.0);
        let lap_burn = rng.gen_range(0.025..0.035);

        Self {
            started: None,
            lap: 1,
            lap_started_at: 0.0,
            lap_length,
            last_lap_time: 0.0,
            best_lap_time: None,
            lap_start_fuel: 1.0,
            lap_burn,
            frozen: Frame::new(),
            rng,
        }
    }

    /// Freeze the snapshot at a given simulation time
    ///
    /// # Arguments
    /// * `sim_time` - Seconds since the simulation started; should not go backwards
    pub fn freeze_at(&mut self, sim_time: f64) {
        self.advance_laps(sim_time);

        let lap_time = (sim_time - self.lap_started_at).max(0.0);
        let phase = (lap_time / self.lap_length).clamp(0.0, 1.0);

        // Three long straights and a few short ones per lap
        let speed = (52.0 + 22.0 * (TAU * 3.0 * phase).sin() + 6.0 * (TAU * 7.0 * phase).sin())
            .max(0.0);
        let accel = 22.0 * TAU * 3.0 * (TAU * 3.0 * phase).cos()
            + 6.0 * TAU * 7.0 * (TAU * 7.0 * phase).cos();

        let throttle = if accel > 0.0 {
            0.6 + 0.4 * (accel / 400.0).min(1.0)
        } else {
            0.05
        };
        let brake = if accel < -150.0 {
            (-accel / 600.0).min(1.0)
        } else {
            0.0
        };

        let gear = (1 + (speed / GEAR_BAND_MPS) as i64).clamp(1, TOP_GEAR);
        let band_position =
            ((speed - (gear - 1) as f64 * GEAR_BAND_MPS) / GEAR_BAND_MPS).clamp(0.0, 1.0);
        let rpm = BASE_RPM + band_position * RPM_SPAN;

        let fuel = (self.lap_start_fuel - self.lap_burn * phase).max(0.0);

        let delta_to_best = self
            .best_lap_time
            .map(|best| lap_time - best * phase)
            .unwrap_or(0.0);
        let delta_to_last = if self.last_lap_time > 0.0 {
            lap_time - self.last_lap_time * phase
        } else {
            0.0
        };

        let mut frame = Frame::new();
        frame.insert(Channel::SessionTime, ChannelValue::Float(sim_time));
        frame.insert(Channel::Speed, ChannelValue::Float(speed));
        frame.insert(Channel::Rpm, ChannelValue::Float(rpm));
        frame.insert(Channel::Gear, ChannelValue::Int(gear));
        frame.insert(Channel::Throttle, ChannelValue::Float(throttle));
        frame.insert(Channel::Brake, ChannelValue::Float(brake));
        frame.insert(Channel::LapCurrentLapTime, ChannelValue::Float(lap_time));
        frame.insert(Channel::LapLastLapTime, ChannelValue::Float(self.last_lap_time));
        frame.insert(Channel::LapDeltaToBestLap, ChannelValue::Float(delta_to_best));
        frame.insert(Channel::LapDeltaToSessionLastLap, ChannelValue::Float(delta_to_last));
        frame.insert(Channel::FuelLevelPct, ChannelValue::Float(fuel));
        frame.insert(Channel::Lap, ChannelValue::Int(i64::from(self.lap)));
        frame.insert(Channel::PlayerCarSlShiftRpm, ChannelValue::Float(DEMO_SHIFT_RPM));
        frame.insert(
            Channel::TrackTemp,
            ChannelValue::Float(30.0 + 3.0 * (sim_time / 600.0).sin()),
        );
        frame.insert(Channel::Precipitation, ChannelValue::Float(0.0));
        frame.insert(Channel::TrackWetness, ChannelValue::Int(1));

        self.frozen = frame;
    }

    /// Close out every lap that ended before `sim_time`
    fn advance_laps(&mut self, sim_time: f64) {
        while sim_time - self.lap_started_at >= self.lap_length {
            self.last_lap_time = self.lap_length;
            self.best_lap_time = Some(match self.best_lap_time {
                Some(best) => best.min(self.lap_length),
                None => self.lap_length,
            });

            self.lap_started_at += self.lap_length;
            self.lap += 1;
            self.lap_start_fuel = (self.lap_start_fuel - self.lap_burn).max(0.0);

            self.lap_length = self.rng.gen_range(88.0..92.0);
            self.lap_burn = self.rng.gen_range(0.025..0.035);
        }
    }
}

impl TelemetrySource for DemoSource {
    fn startup(&mut self) -> Result<(), SourceError> {
        self.started = Some(Instant::now());
        Ok(())
    }

    fn freeze_latest(&mut self) {
        let sim_time = self
            .started
            .map(|start| start.elapsed().as_secs_f64())
            .unwrap_or_default();
        self.freeze_at(sim_time);
    }

    fn read(&self, channel: Channel) -> Option<ChannelValue> {
        self.frozen.get(&channel).copied()
    }
}
