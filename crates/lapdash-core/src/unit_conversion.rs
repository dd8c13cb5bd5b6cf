//! Unit Conversion Functions
//!
//! Conversions applied to raw simulator channels before display:
//! - Speed: m/s → mph, m/s → km/h
//! - Fractions: 0–1 → percent

/// Meters per second to miles per hour
pub const MPS_TO_MPH: f64 = 2.23694;

/// Meters per second to kilometers per hour
pub const MPS_TO_KMH: f64 = 3.6;

/// Convert m/s to mph
pub fn mps_to_mph(mps: f64) -> f64 {
    mps * MPS_TO_MPH
}

/// Convert m/s to km/h
pub fn mps_to_kmh(mps: f64) -> f64 {
    mps * MPS_TO_KMH
}

/// Convert a 0–1 fraction to a percentage
pub fn fraction_to_percent(fraction: f64) -> f64 {
    fraction * 100.0
}
