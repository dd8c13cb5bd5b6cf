//! Lap-improvement flash
//!
//! Edge detector on the last-lap time: when it drops below the value seen on
//! the previous tick, a flash window opens. The window is restarted by any
//! further drop and closes once `duration` has elapsed.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// Flash state carried between ticks
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImprovementFlash {
    /// Last-lap time seen on the previous tick
    previous_lap_last_time: Option<f64>,
    /// When the current flash window opened
    started_at: Option<Duration>,
}

impl ImprovementFlash {
    /// Feed one tick; returns whether the flash is showing at `now`
    pub fn observe(&mut self, lap_last_time: f64, now: Duration, duration: Duration) -> bool {
        if let Some(previous) = self.previous_lap_last_time {
            if lap_last_time < previous {
                debug!("Lap time improved: {:.3} -> {:.3}", previous, lap_last_time);
                self.started_at = Some(now);
            }
        }
        self.previous_lap_last_time = Some(lap_last_time);

        match self.started_at {
            Some(start) if now.saturating_sub(start) < duration => true,
            _ => {
                self.started_at = None;
                false
            }
        }
    }

    /// Last-lap time seen on the previous tick
    pub fn previous_lap_last_time(&self) -> Option<f64> {
        self.previous_lap_last_time
    }

    /// When the running flash window opened, if one is open
    pub fn started_at(&self) -> Option<Duration> {
        self.started_at
    }
}
