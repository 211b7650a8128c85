//! Presence verification engine
//!
//! Fuses wireless floor discrimination with satellite containment under a
//! fixed priority policy and emits one typed, auditable verdict per run.

pub mod floor;
pub mod orchestrator;
pub mod policy;
pub mod result;

pub use floor::{classify_floor, match_access_point, FloorClassification};
pub use orchestrator::{EngineConfig, VerificationOrchestrator};
pub use policy::{Containment, GateOutcome, PolicyDecision};
pub use result::{
    EvidenceTrace, ReasonCode, TraceEvent, VerificationMethod, VerificationResult,
};
