//! Core data types for the presence verification engine

use crate::core::constants::{HIGH_ACCURACY_MAX_M, MEDIUM_ACCURACY_MAX_M};
use serde::{Deserialize, Serialize};

/// Geodetic coordinate in double-precision degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoCoordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoCoordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }
}

/// One satellite position fix with its reported error radius
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionFix {
    /// Position reported by the platform
    pub coordinate: GeoCoordinate,
    /// Reported error radius (meters)
    pub accuracy_m: f64,
    /// Capture time (milliseconds since epoch)
    pub captured_at_ms: u64,
}

impl PositionFix {
    pub fn tier(&self) -> AccuracyTier {
        AccuracyTier::from_accuracy(self.accuracy_m)
    }
}

/// Fixed accuracy confidence bands for a position fix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccuracyTier {
    /// Error radius at or below 10 m
    High,
    /// Error radius at or below 30 m
    Medium,
    /// Error radius above 30 m
    Low,
}

impl AccuracyTier {
    /// Classify a reported error radius into its confidence band
    pub fn from_accuracy(accuracy_m: f64) -> Self {
        if accuracy_m <= HIGH_ACCURACY_MAX_M {
            AccuracyTier::High
        } else if accuracy_m <= MEDIUM_ACCURACY_MAX_M {
            AccuracyTier::Medium
        } else {
            AccuracyTier::Low
        }
    }
}

/// One wireless signal observed during a scan. Ephemeral, never persisted by the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObservedSignal {
    /// Hardware address of the transmitting access point
    pub bssid: String,
    /// Broadcast network name
    pub ssid: String,
    /// Received signal strength (dBm, more negative = weaker)
    pub strength_dbm: i32,
}

impl ObservedSignal {
    pub fn new(bssid: impl Into<String>, ssid: impl Into<String>, strength_dbm: i32) -> Self {
        Self {
            bssid: bssid.into(),
            ssid: ssid.into(),
            strength_dbm,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accuracy_tier_boundaries() {
        assert_eq!(AccuracyTier::from_accuracy(0.0), AccuracyTier::High);
        assert_eq!(AccuracyTier::from_accuracy(10.0), AccuracyTier::High);
        assert_eq!(AccuracyTier::from_accuracy(10.1), AccuracyTier::Medium);
        assert_eq!(AccuracyTier::from_accuracy(30.0), AccuracyTier::Medium);
        assert_eq!(AccuracyTier::from_accuracy(30.1), AccuracyTier::Low);
        assert_eq!(AccuracyTier::from_accuracy(500.0), AccuracyTier::Low);
    }

    #[test]
    fn test_fix_tier() {
        let fix = PositionFix {
            coordinate: GeoCoordinate::new(13.0, 80.0),
            accuracy_m: 8.0,
            captured_at_ms: 0,
        };
        assert_eq!(fix.tier(), AccuracyTier::High);
    }
}
