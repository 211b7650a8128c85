//! Decision policy for the satellite path
//!
//! One pure function maps (accuracy tier, containment, floor-gate outcome)
//! to a verdict. Keeping the mapping in one place, instead of near-duplicate
//! conditional blocks per accuracy tier, makes every combination visible and
//! testable as a table row.

use crate::core::AccuracyTier;
use crate::engine::result::{ReasonCode, VerificationMethod};

/// Containment test outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Containment {
    Inside,
    Outside,
}

/// Outcome of the floor-discriminator gate run alongside the containment test
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateOutcome {
    /// The zone has no assigned access point
    NotConfigured,
    /// An access point is assigned but was not seen in the gate scan
    NotDetected,
    /// The access point was seen and the floor classification verified
    Confirmed,
    /// The access point was seen and the floor classification rejected
    Mismatch,
}

/// Verdict produced by one policy table row
#[derive(Debug, Clone, PartialEq)]
pub struct PolicyDecision {
    pub verified: bool,
    pub reason: ReasonCode,
    pub method: VerificationMethod,
    /// Which table row fired, for the evidence trace
    pub rule: &'static str,
}

/// Decide the satellite-path verdict.
///
/// Two rules dominate everything else: a confirmed floor mismatch vetoes any
/// containment success, and a confirmed same-floor reading overrides a
/// containment failure because satellite positioning is unreliable indoors.
pub fn decide(tier: AccuracyTier, containment: Containment, gate: GateOutcome) -> PolicyDecision {
    match (containment, gate) {
        (Containment::Inside, GateOutcome::Confirmed) => PolicyDecision {
            verified: true,
            reason: ReasonCode::Confirmed,
            method: VerificationMethod::Both,
            rule: "inside zone, floor confirmed",
        },
        (Containment::Inside, GateOutcome::Mismatch) => PolicyDecision {
            verified: false,
            reason: ReasonCode::FloorMismatch,
            method: VerificationMethod::Wifi,
            rule: "floor mismatch vetoes containment",
        },
        (Containment::Inside, GateOutcome::NotConfigured) => PolicyDecision {
            verified: true,
            reason: ReasonCode::Confirmed,
            method: VerificationMethod::Gps,
            rule: match tier {
                AccuracyTier::High => "inside zone on high-accuracy fix, no access point configured",
                AccuracyTier::Medium | AccuracyTier::Low => {
                    "inside zone on position alone (lower-confidence accept)"
                }
            },
        },
        // The gate vetoes only on a confirmed mismatch; an unseen access
        // point leaves the containment result standing
        (Containment::Inside, GateOutcome::NotDetected) => PolicyDecision {
            verified: true,
            reason: ReasonCode::Confirmed,
            method: VerificationMethod::Gps,
            rule: "inside zone, access point unseen, no veto",
        },
        (Containment::Outside, GateOutcome::Confirmed) => PolicyDecision {
            verified: true,
            reason: ReasonCode::Confirmed,
            method: VerificationMethod::Wifi,
            rule: "floor-confirmed wireless reading overrides containment failure",
        },
        (Containment::Outside, GateOutcome::Mismatch) => PolicyDecision {
            verified: false,
            reason: ReasonCode::FloorMismatch,
            method: VerificationMethod::Wifi,
            rule: "outside zone with floor mismatch",
        },
        (Containment::Outside, GateOutcome::NotDetected) => PolicyDecision {
            verified: false,
            reason: ReasonCode::AccessPointNotDetected,
            method: VerificationMethod::Gps,
            rule: "outside zone, configured access point unseen",
        },
        (Containment::Outside, GateOutcome::NotConfigured) => PolicyDecision {
            verified: false,
            reason: ReasonCode::OutsideZone,
            method: VerificationMethod::Gps,
            rule: "outside zone, no wireless evidence available",
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TIERS: [AccuracyTier; 3] = [AccuracyTier::High, AccuracyTier::Medium, AccuracyTier::Low];

    #[test]
    fn test_every_policy_row() {
        // (containment, gate, verified, reason) for all 24 combinations;
        // the accuracy tier never flips a verdict, only its annotation
        let rows = [
            (Containment::Inside, GateOutcome::Confirmed, true, ReasonCode::Confirmed),
            (Containment::Inside, GateOutcome::Mismatch, false, ReasonCode::FloorMismatch),
            (Containment::Inside, GateOutcome::NotConfigured, true, ReasonCode::Confirmed),
            (Containment::Inside, GateOutcome::NotDetected, true, ReasonCode::Confirmed),
            (Containment::Outside, GateOutcome::Confirmed, true, ReasonCode::Confirmed),
            (Containment::Outside, GateOutcome::Mismatch, false, ReasonCode::FloorMismatch),
            (
                Containment::Outside,
                GateOutcome::NotDetected,
                false,
                ReasonCode::AccessPointNotDetected,
            ),
            (Containment::Outside, GateOutcome::NotConfigured, false, ReasonCode::OutsideZone),
        ];

        for (containment, gate, verified, reason) in rows {
            for tier in TIERS {
                let decision = decide(tier, containment, gate);
                assert_eq!(
                    decision.verified, verified,
                    "verified mismatch for {:?}/{:?}/{:?}",
                    tier, containment, gate
                );
                assert_eq!(
                    decision.reason, reason,
                    "reason mismatch for {:?}/{:?}/{:?}",
                    tier, containment, gate
                );
            }
        }
    }

    #[test]
    fn test_mismatch_vetoes_containment_success() {
        for tier in TIERS {
            let decision = decide(tier, Containment::Inside, GateOutcome::Mismatch);
            assert!(!decision.verified);
            assert_eq!(decision.reason, ReasonCode::FloorMismatch);
        }
    }

    #[test]
    fn test_confirmed_wireless_overrides_containment_failure() {
        for tier in TIERS {
            let decision = decide(tier, Containment::Outside, GateOutcome::Confirmed);
            assert!(decision.verified);
            assert_eq!(decision.method, VerificationMethod::Wifi);
        }
    }

    #[test]
    fn test_method_attribution() {
        assert_eq!(
            decide(AccuracyTier::High, Containment::Inside, GateOutcome::Confirmed).method,
            VerificationMethod::Both
        );
        assert_eq!(
            decide(AccuracyTier::High, Containment::Inside, GateOutcome::NotConfigured).method,
            VerificationMethod::Gps
        );
    }

    #[test]
    fn test_lower_confidence_accept_annotated() {
        let decision = decide(AccuracyTier::Low, Containment::Inside, GateOutcome::NotConfigured);
        assert!(decision.rule.contains("lower-confidence"));

        let decision = decide(AccuracyTier::High, Containment::Inside, GateOutcome::NotConfigured);
        assert!(!decision.rule.contains("lower-confidence"));
    }
}
