//! Verification result types and the structured evidence trace

use crate::core::{AccuracyTier, ObservedSignal, PositionFix};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Terminal outcome classification for one verification run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReasonCode {
    /// Presence confirmed
    Confirmed,
    /// Positioning permission was denied and no wireless evidence rescued the run
    PermissionDenied,
    /// The positioning service is switched off and no wireless evidence rescued the run
    ServiceDisabled,
    /// Wireless scanning is impossible on this device and the wifi-only path needed it
    ScanUnsupported,
    /// The configured access point never appeared in any scan
    AccessPointNotDetected,
    /// The access point was detected on the wrong floor; hard veto
    FloorMismatch,
    /// A fix was obtained but fell outside the zone and no wireless override succeeded
    OutsideZone,
    /// The overall wall-clock budget elapsed before a decision was reached
    Timeout,
    /// Neither positioning nor wireless evidence could be evaluated
    Unavailable,
}

/// Which signal source(s) the verdict rests on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VerificationMethod {
    Gps,
    Wifi,
    Both,
    None,
}

/// One step of evidence recorded during a verification run.
///
/// The trace replaces ambient logging: every input the decision consumed is
/// attached to the result, so verdicts are auditable and reproducible
/// without capturing console output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TraceEvent {
    /// A wireless scan completed (or was skipped as unsupported)
    ScanCompleted { signal_count: usize, unsupported: bool },
    /// The configured access point was matched in a scan
    AccessPointMatched { bssid: String, strength_dbm: i32 },
    /// The configured access point was absent from a scan
    AccessPointMissing { bssid: String },
    /// The floor discriminator classified a signal reading
    FloorClassified { verified: bool, reason: String },
    /// A position fix was acquired
    FixAcquired { accuracy_m: f64, tier: AccuracyTier },
    /// Position acquisition produced nothing
    FixUnavailable { cause: String },
    /// The fix was tested against the zone rectangle
    ContainmentTested { inside: bool },
    /// The decision table produced the final verdict
    PolicyApplied { rule: String },
}

impl fmt::Display for TraceEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TraceEvent::ScanCompleted {
                signal_count,
                unsupported,
            } => {
                if *unsupported {
                    write!(f, "scan skipped: unsupported on this device")
                } else {
                    write!(f, "scan completed: {} signals observed", signal_count)
                }
            }
            TraceEvent::AccessPointMatched { bssid, strength_dbm } => {
                write!(f, "access point {} matched at {} dBm", bssid, strength_dbm)
            }
            TraceEvent::AccessPointMissing { bssid } => {
                write!(f, "access point {} not observed", bssid)
            }
            TraceEvent::FloorClassified { verified, reason } => {
                write!(
                    f,
                    "floor classification: {} ({})",
                    if *verified { "verified" } else { "rejected" },
                    reason
                )
            }
            TraceEvent::FixAcquired { accuracy_m, tier } => {
                write!(f, "fix acquired: accuracy {:.1} m ({:?} tier)", accuracy_m, tier)
            }
            TraceEvent::FixUnavailable { cause } => write!(f, "no fix obtained: {}", cause),
            TraceEvent::ContainmentTested { inside } => {
                write!(f, "containment: {}", if *inside { "inside" } else { "outside" })
            }
            TraceEvent::PolicyApplied { rule } => write!(f, "decision: {}", rule),
        }
    }
}

/// Ordered evidence collected during one verification run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EvidenceTrace {
    events: Vec<TraceEvent>,
}

impl EvidenceTrace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, event: TraceEvent) {
        self.events.push(event);
    }

    pub fn events(&self) -> &[TraceEvent] {
        &self.events
    }

    /// Render the trace as one human-readable line per event
    pub fn to_report(&self) -> String {
        self.events
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Final verdict of one verification run. Immutable once returned; the
/// caller owns it and is responsible for persistence and display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerificationResult {
    /// Whether presence inside the zone was verified
    pub verified: bool,
    /// Terminal outcome classification
    pub reason: ReasonCode,
    /// Signal source(s) the verdict rests on
    pub method: VerificationMethod,
    /// Position evidence, when a fix was obtained
    pub position: Option<PositionFix>,
    /// Wireless evidence, when the access point was matched
    pub signal_evidence: Option<ObservedSignal>,
    /// Human-readable floor discrimination outcome
    pub floor_reason: String,
    /// Ordered evidence the decision consumed
    pub trace: EvidenceTrace,
}
