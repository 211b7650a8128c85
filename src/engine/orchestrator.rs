//! Verification orchestration
//!
//! The orchestrator sequences the scanner, the sampler, the geometry and the
//! floor discriminator under a fixed priority policy: wireless first, then
//! satellite with a wireless floor gate, then a wireless-only last resort.
//! Every call terminates in exactly one `VerificationResult`; provider
//! failures become typed outcomes, never panics.

use crate::config::{AccessPointConfig, ConfigError, Zone};
use crate::core::constants::{DEFAULT_OPPORTUNISTIC_FIX_TIMEOUT_MS, DEFAULT_OVERALL_BUDGET_MS};
use crate::core::{ObservedSignal, PositionFix};
use crate::engine::floor::{self, FloorClassification};
use crate::engine::policy::{self, Containment, GateOutcome};
use crate::engine::result::{
    EvidenceTrace, ReasonCode, TraceEvent, VerificationMethod, VerificationResult,
};
use crate::platform::{PositionProvider, ProviderError, SignalScanner};
use crate::sampling::{PositionSampler, SamplerConfig};
use std::time::{Duration, Instant};

/// Engine-level timing parameters
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Wall-clock budget for one whole verification run (milliseconds)
    pub overall_budget_ms: u64,
    /// Position acquisition parameters
    pub sampler: SamplerConfig,
    /// Timeout for the opportunistic evidence fix on the wifi accept path (milliseconds)
    pub opportunistic_fix_timeout_ms: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            overall_budget_ms: DEFAULT_OVERALL_BUDGET_MS,
            sampler: SamplerConfig::default(),
            opportunistic_fix_timeout_ms: DEFAULT_OPPORTUNISTIC_FIX_TIMEOUT_MS,
        }
    }
}

impl EngineConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sampler.max_attempts == 0 {
            return Err(ConfigError::InvalidParameter {
                parameter: "sampler.max_attempts".to_string(),
                value: "0".to_string(),
                reason: "At least one fix attempt is required".to_string(),
            });
        }

        if self.sampler.attempt_timeout.is_zero() {
            return Err(ConfigError::InvalidParameter {
                parameter: "sampler.attempt_timeout".to_string(),
                value: "0".to_string(),
                reason: "Per-attempt timeout must be positive".to_string(),
            });
        }

        Ok(())
    }
}

/// Result of one scan request with its capability status
struct ScanObservation {
    signals: Vec<ObservedSignal>,
    unsupported: bool,
}

/// Top-level presence verification state machine.
///
/// Holds no mutable state between runs; all zone and threshold data is
/// passed in per call, so repeated runs over identical inputs are
/// deterministic.
pub struct VerificationOrchestrator {
    position: Box<dyn PositionProvider>,
    scanner: Box<dyn SignalScanner>,
    sampler: PositionSampler,
    config: EngineConfig,
}

impl VerificationOrchestrator {
    pub fn new(position: Box<dyn PositionProvider>, scanner: Box<dyn SignalScanner>) -> Self {
        Self {
            sampler: PositionSampler::new(SamplerConfig::default()),
            config: EngineConfig::default(),
            position,
            scanner,
        }
    }

    pub fn with_config(
        config: EngineConfig,
        position: Box<dyn PositionProvider>,
        scanner: Box<dyn SignalScanner>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            sampler: PositionSampler::new(config.sampler.clone()),
            config,
            position,
            scanner,
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Run one verification of `zone`, optionally gated by its assigned
    /// access point. Always returns exactly one result.
    pub fn verify(
        &mut self,
        zone: &Zone,
        access_point: Option<&AccessPointConfig>,
    ) -> VerificationResult {
        let deadline = Instant::now() + Duration::from_millis(self.config.overall_budget_ms);
        let mut trace = EvidenceTrace::new();

        // Wireless-first: a detected access point decides immediately,
        // whichever way the classification goes
        if let Some(ap) = access_point {
            let observation = self.scan_signals(&mut trace);
            if let Some(signal) = floor::match_access_point(&observation.signals, ap) {
                trace.record(TraceEvent::AccessPointMatched {
                    bssid: signal.bssid.clone(),
                    strength_dbm: signal.strength_dbm,
                });

                let classification = floor::classify_floor(signal.strength_dbm, ap, zone.floor_number);
                trace.record(TraceEvent::FloorClassified {
                    verified: classification.verified,
                    reason: classification.reason.clone(),
                });

                if classification.verified {
                    // Evidence only: one short fix request, failures ignored
                    let position = self.opportunistic_fix(&mut trace);
                    return self.accept(
                        VerificationMethod::Wifi,
                        position,
                        Some(signal),
                        classification,
                        trace,
                    );
                }

                // A confirmed wrong floor is a hard veto; no GPS fall-through
                return reject(
                    ReasonCode::FloorMismatch,
                    VerificationMethod::Wifi,
                    None,
                    Some(signal),
                    classification.reason,
                    trace,
                );
            }
            trace.record(TraceEvent::AccessPointMissing {
                bssid: ap.bssid.clone(),
            });
        }

        if Instant::now() >= deadline {
            return timeout(trace);
        }

        // Satellite path
        let acquisition = self.sampler.acquire(self.position.as_mut());

        let fix = match acquisition.best_fix {
            Some(fix) => fix,
            None => {
                let cause = acquisition
                    .terminal_failure
                    .as_ref()
                    .map(|e| e.to_string())
                    .unwrap_or_else(|| "fix attempts exhausted".to_string());
                trace.record(TraceEvent::FixUnavailable { cause });

                if Instant::now() >= deadline {
                    return timeout(trace);
                }

                return self.wifi_only_fallback(
                    zone,
                    access_point,
                    acquisition.terminal_failure,
                    trace,
                );
            }
        };

        trace.record(TraceEvent::FixAcquired {
            accuracy_m: fix.accuracy_m,
            tier: fix.tier(),
        });

        let inside = zone.contains(fix.coordinate);
        trace.record(TraceEvent::ContainmentTested { inside });

        if Instant::now() >= deadline {
            return timeout(trace);
        }

        // Floor gate: containment alone is not trusted across floors
        let mut gate_signal = None;
        let mut floor_reason = String::new();
        let gate = match access_point {
            None => GateOutcome::NotConfigured,
            Some(ap) => {
                let observation = self.scan_signals(&mut trace);
                match floor::match_access_point(&observation.signals, ap) {
                    Some(signal) => {
                        trace.record(TraceEvent::AccessPointMatched {
                            bssid: signal.bssid.clone(),
                            strength_dbm: signal.strength_dbm,
                        });
                        let classification =
                            floor::classify_floor(signal.strength_dbm, ap, zone.floor_number);
                        trace.record(TraceEvent::FloorClassified {
                            verified: classification.verified,
                            reason: classification.reason.clone(),
                        });
                        floor_reason = classification.reason;
                        gate_signal = Some(signal);
                        if classification.verified {
                            GateOutcome::Confirmed
                        } else {
                            GateOutcome::Mismatch
                        }
                    }
                    None => {
                        trace.record(TraceEvent::AccessPointMissing {
                            bssid: ap.bssid.clone(),
                        });
                        GateOutcome::NotDetected
                    }
                }
            }
        };

        let containment = if inside {
            Containment::Inside
        } else {
            Containment::Outside
        };
        let decision = policy::decide(fix.tier(), containment, gate);
        trace.record(TraceEvent::PolicyApplied {
            rule: decision.rule.to_string(),
        });

        if floor_reason.is_empty() {
            floor_reason = decision.rule.to_string();
        }
        if decision.reason == ReasonCode::AccessPointNotDetected {
            floor_reason = go_to_floor_hint(zone);
        }

        VerificationResult {
            verified: decision.verified,
            reason: decision.reason,
            method: decision.method,
            position: Some(fix),
            signal_evidence: gate_signal,
            floor_reason,
            trace,
        }
    }

    /// Wireless-only last resort when no fix could be obtained
    fn wifi_only_fallback(
        &mut self,
        zone: &Zone,
        access_point: Option<&AccessPointConfig>,
        fix_failure: Option<ProviderError>,
        mut trace: EvidenceTrace,
    ) -> VerificationResult {
        let ap = match access_point {
            Some(ap) => ap,
            None => {
                // Neither evidence source can be evaluated
                let reason = match fix_failure {
                    Some(ProviderError::PermissionDenied { .. }) => ReasonCode::PermissionDenied,
                    Some(ProviderError::ServiceDisabled { .. })
                    | Some(ProviderError::Unsupported { .. }) => ReasonCode::ServiceDisabled,
                    _ => ReasonCode::Unavailable,
                };
                return reject(
                    reason,
                    VerificationMethod::None,
                    None,
                    None,
                    "verification unavailable: no position fix and no access point configured"
                        .to_string(),
                    trace,
                );
            }
        };

        let observation = self.scan_signals(&mut trace);
        if let Some(signal) = floor::match_access_point(&observation.signals, ap) {
            trace.record(TraceEvent::AccessPointMatched {
                bssid: signal.bssid.clone(),
                strength_dbm: signal.strength_dbm,
            });
            let classification = floor::classify_floor(signal.strength_dbm, ap, zone.floor_number);
            trace.record(TraceEvent::FloorClassified {
                verified: classification.verified,
                reason: classification.reason.clone(),
            });

            if classification.verified {
                return self.accept(VerificationMethod::Wifi, None, Some(signal), classification, trace);
            }
            return reject(
                ReasonCode::FloorMismatch,
                VerificationMethod::Wifi,
                None,
                Some(signal),
                classification.reason,
                trace,
            );
        }
        trace.record(TraceEvent::AccessPointMissing {
            bssid: ap.bssid.clone(),
        });

        let reason = if observation.unsupported {
            ReasonCode::ScanUnsupported
        } else {
            ReasonCode::AccessPointNotDetected
        };
        reject(
            reason,
            VerificationMethod::None,
            None,
            None,
            go_to_floor_hint(zone),
            trace,
        )
    }

    /// Scan for signals, treating an unsupported or denied scanner as an
    /// empty observation list
    fn scan_signals(&mut self, trace: &mut EvidenceTrace) -> ScanObservation {
        if !self.scanner.is_available() {
            trace.record(TraceEvent::ScanCompleted {
                signal_count: 0,
                unsupported: true,
            });
            return ScanObservation {
                signals: Vec::new(),
                unsupported: true,
            };
        }

        match self.scanner.scan() {
            Ok(signals) => {
                trace.record(TraceEvent::ScanCompleted {
                    signal_count: signals.len(),
                    unsupported: false,
                });
                ScanObservation {
                    signals,
                    unsupported: false,
                }
            }
            Err(_) => {
                trace.record(TraceEvent::ScanCompleted {
                    signal_count: 0,
                    unsupported: true,
                });
                ScanObservation {
                    signals: Vec::new(),
                    unsupported: true,
                }
            }
        }
    }

    /// One short fix request for evidence enrichment; never blocks the
    /// accept and swallows every failure
    fn opportunistic_fix(&mut self, trace: &mut EvidenceTrace) -> Option<PositionFix> {
        if !self.position.is_available() {
            return None;
        }

        let timeout = Duration::from_millis(self.config.opportunistic_fix_timeout_ms);
        match self.position.request_fix(timeout) {
            Ok(fix) => {
                trace.record(TraceEvent::FixAcquired {
                    accuracy_m: fix.accuracy_m,
                    tier: fix.tier(),
                });
                Some(fix)
            }
            Err(_) => None,
        }
    }

    fn accept(
        &self,
        method: VerificationMethod,
        position: Option<PositionFix>,
        signal_evidence: Option<ObservedSignal>,
        classification: FloorClassification,
        trace: EvidenceTrace,
    ) -> VerificationResult {
        VerificationResult {
            verified: true,
            reason: ReasonCode::Confirmed,
            method,
            position,
            signal_evidence,
            floor_reason: classification.reason,
            trace,
        }
    }
}

fn reject(
    reason: ReasonCode,
    method: VerificationMethod,
    position: Option<PositionFix>,
    signal_evidence: Option<ObservedSignal>,
    floor_reason: String,
    trace: EvidenceTrace,
) -> VerificationResult {
    VerificationResult {
        verified: false,
        reason,
        method,
        position,
        signal_evidence,
        floor_reason,
        trace,
    }
}

fn timeout(trace: EvidenceTrace) -> VerificationResult {
    reject(
        ReasonCode::Timeout,
        VerificationMethod::None,
        None,
        None,
        "overall time budget exceeded before a decision was reached".to_string(),
        trace,
    )
}

fn go_to_floor_hint(zone: &Zone) -> String {
    format!(
        "access point not detected; go to floor {} of {}",
        zone.floor_number, zone.building_name
    )
}
