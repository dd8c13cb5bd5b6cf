//! Speed and RPM zone classification

use serde::{Deserialize, Serialize};

/// Speed band used to color the speed readout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpeedZone {
    /// Below the fixed low threshold
    Low,
    /// Between the fixed thresholds
    Mid,
    /// Above the fixed high threshold
    High,
    /// Below the low fraction of the session maximum
    RelativeLow,
    /// Below the mid fraction of the session maximum
    RelativeMid,
    /// At or near the session maximum
    RelativeHigh,
    /// Relative policy with no speed observed yet
    NoReference,
}

/// How speed zones are decided
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "policy", rename_all = "snake_case")]
pub enum SpeedZonePolicy {
    /// Absolute mph thresholds: `< low_below_mph` is low, `> high_above_mph`
    /// is high, anything in between (inclusive) is mid
    Fixed {
        /// Upper bound (exclusive) of the low band
        low_below_mph: f64,
        /// Lower bound (exclusive) of the high band
        high_above_mph: f64,
    },
    /// Fractions of the highest speed seen this session
    Relative {
        /// Upper bound (exclusive) of the low band
        low_fraction: f64,
        /// Upper bound (exclusive) of the mid band
        mid_fraction: f64,
    },
}

impl Default for SpeedZonePolicy {
    fn default() -> Self {
        SpeedZonePolicy::Fixed {
            low_below_mph: 90.0,
            high_above_mph: 120.0,
        }
    }
}

impl SpeedZonePolicy {
    /// The relative policy with its usual 40% / 90% split
    pub fn relative() -> Self {
        SpeedZonePolicy::Relative {
            low_fraction: 0.4,
            mid_fraction: 0.9,
        }
    }

    /// Classify `speed_mph`. `max_observed_mph` is only used by the relative policy.
    pub fn classify(&self, speed_mph: f64, max_observed_mph: f64) -> SpeedZone {
        match *self {
            SpeedZonePolicy::Fixed {
                low_below_mph,
                high_above_mph,
            } => {
                if speed_mph < low_below_mph {
                    SpeedZone::Low
                } else if speed_mph <= high_above_mph {
                    SpeedZone::Mid
                } else {
                    SpeedZone::High
                }
            }
            SpeedZonePolicy::Relative {
                low_fraction,
                mid_fraction,
            } => {
                if max_observed_mph <= 0.0 {
                    SpeedZone::NoReference
                } else if speed_mph < low_fraction * max_observed_mph {
                    SpeedZone::RelativeLow
                } else if speed_mph < mid_fraction * max_observed_mph {
                    SpeedZone::RelativeMid
                } else {
                    SpeedZone::RelativeHigh
                }
            }
        }
    }
}

/// RPM band relative to the gauge's full scale
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RpmZone {
    /// Below 33% of max RPM
    Low,
    /// Below 66% of max RPM
    Mid,
    /// Below 95% of max RPM
    High,
    /// 95% of max RPM and above
    Redline,
}

impl RpmZone {
    /// Classify `rpm` against `max_rpm`. Boundaries belong to the upper band.
    pub fn classify(rpm: f64, max_rpm: f64) -> RpmZone {
        if rpm < max_rpm * 0.33 {
            RpmZone::Low
        } else if rpm < max_rpm * 0.66 {
            RpmZone::Mid
        } else if rpm < max_rpm * 0.95 {
            RpmZone::High
        } else {
            RpmZone::Redline
        }
    }
}

/// Shift light: on at or above the shift point, never on when it is unknown
pub fn shift_flash(rpm: f64, shift_rpm: f64) -> bool {
    shift_rpm > 0.0 && rpm >= shift_rpm
}
