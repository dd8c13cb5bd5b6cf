//! Fuel consumption tracking
//!
//! Keeps a FIFO of per-lap consumption (percentage points of tank) over the
//! most recent laps and projects how many laps the remaining fuel lasts.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use tracing::debug;

/// Rolling per-lap fuel consumption
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FuelTracker {
    /// Lap number seen on the previous tick
    previous_lap: u32,
    /// Fuel level (percent) when the current lap started
    lap_start_fuel_pct: f64,
    /// Consumption of recent laps, oldest first
    history: VecDeque<f64>,
}

impl FuelTracker {
    /// Feed one tick. On a lap change the fuel used since the previous lap
    /// change is recorded; refuels and resets (no positive consumption) are
    /// dropped.
    pub fn observe(&mut self, lap: u32, fuel_level_pct: f64, window: usize) {
        if lap == self.previous_lap {
            return;
        }

        let consumed = self.lap_start_fuel_pct - fuel_level_pct;
        if consumed > 0.0 {
            self.history.push_back(consumed);
            while self.history.len() > window.max(1) {
                self.history.pop_front();
            }
            debug!(
                "Lap {} -> {}: consumed {:.3}% (avg {:.3}%)",
                self.previous_lap,
                lap,
                consumed,
                self.average()
            );
        } else {
            debug!(
                "Lap {} -> {}: discarding non-positive consumption {:.3}%",
                self.previous_lap, lap, consumed
            );
        }

        self.previous_lap = lap;
        self.lap_start_fuel_pct = fuel_level_pct;
    }

    /// Mean consumption per lap, 0 with no history
    pub fn average(&self) -> f64 {
        if self.history.is_empty() {
            0.0
        } else {
            self.history.iter().sum::<f64>() / self.history.len() as f64
        }
    }

    /// Laps the given fuel level lasts at the average rate, 0 with no average
    pub fn laps_remaining(&self, fuel_level_pct: f64) -> f64 {
        let average = self.average();
        if average > 0.0 {
            fuel_level_pct / average
        } else {
            0.0
        }
    }

    /// Recorded per-lap consumption, oldest first
    pub fn history(&self) -> impl Iterator<Item = f64> + '_ {
        self.history.iter().copied()
    }

    /// Lap number seen on the previous tick
    pub fn previous_lap(&self) -> u32 {
        self.previous_lap
    }

    /// Fuel level (percent) when the current lap started
    pub fn lap_start_fuel_pct(&self) -> f64 {
        self.lap_start_fuel_pct
    }
}
