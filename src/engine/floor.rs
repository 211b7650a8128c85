//! Floor discrimination from wireless signal strength
//!
//! Satellite fixes cannot tell floors of the same building apart, so the
//! engine leans on the assigned access point: a strong reading pins the
//! client to the access point's floor, a weak one suggests a different
//! floor, and the band in between is genuinely ambiguous because moderate
//! strength cannot distinguish "same floor, far corner" from "adjacent
//! floor, right below the antenna".

use crate::config::AccessPointConfig;
use crate::core::ObservedSignal;

/// Outcome of classifying one signal reading against the zone floor
#[derive(Debug, Clone, PartialEq)]
pub struct FloorClassification {
    /// Whether the reading supports presence on the zone floor
    pub verified: bool,
    /// Whether the reading was strong enough to be conclusive either way
    pub conclusive: bool,
    /// Human-readable classification outcome
    pub reason: String,
}

/// Match the configured access point in a scan result.
///
/// Primary match is the hardware address; the broadcast name is a fallback
/// for platforms that rewrite BSSIDs. Either way the reading must clear the
/// detection threshold to count as detected at all.
pub fn match_access_point(
    observed: &[ObservedSignal],
    config: &AccessPointConfig,
) -> Option<ObservedSignal> {
    let matched = observed
        .iter()
        .find(|signal| signal.bssid.eq_ignore_ascii_case(&config.bssid))
        .or_else(|| {
            observed
                .iter()
                .find(|signal| !config.ssid.is_empty() && signal.ssid.eq_ignore_ascii_case(&config.ssid))
        })?;

    if matched.strength_dbm < config.detection_threshold_dbm {
        return None;
    }

    Some(matched.clone())
}

/// Classify a detected signal reading as same-floor, different-floor, or
/// ambiguous, and decide whether it supports presence on `zone_floor`.
///
/// A strong reading is conclusive: it verifies iff the access point is
/// mounted on the zone floor, and a strong wrong-floor reading is definitive
/// evidence of misplacement. The ambiguous band is lenient and accepts when
/// the configured floors agree.
pub fn classify_floor(
    signal_dbm: i32,
    config: &AccessPointConfig,
    zone_floor: i32,
) -> FloorClassification {
    let floors_match = config.floor_number == zone_floor;

    if signal_dbm >= config.same_floor_min_dbm {
        if floors_match {
            FloorClassification {
                verified: true,
                conclusive: true,
                reason: format!(
                    "confirmed on floor {} (strong signal, {} dBm)",
                    zone_floor, signal_dbm
                ),
            }
        } else {
            FloorClassification {
                verified: false,
                conclusive: true,
                reason: format!(
                    "floor mismatch: access point is mounted on floor {}, zone is on floor {} (strong signal, {} dBm)",
                    config.floor_number, zone_floor, signal_dbm
                ),
            }
        }
    } else if signal_dbm <= config.different_floor_max_dbm {
        FloorClassification {
            verified: false,
            conclusive: false,
            reason: format!("different floor suspected (weak signal, {} dBm)", signal_dbm),
        }
    } else if floors_match {
        FloorClassification {
            verified: true,
            conclusive: false,
            reason: format!("accepted with ambiguous signal ({} dBm)", signal_dbm),
        }
    } else {
        FloorClassification {
            verified: false,
            conclusive: false,
            reason: format!(
                "ambiguous floor mismatch: access point floor {}, zone floor {} ({} dBm)",
                config.floor_number, zone_floor, signal_dbm
            ),
        }
    }
}
