//! Presence Verification Engine
//!
//! Decides whether a mobile client is physically inside a designated
//! rectangular zone by reconciling satellite position fixes with wireless
//! signal observations, with floor discrimination so vertical proximity
//! across floors never passes for presence.

pub mod config;
pub mod core;
pub mod engine;
pub mod geometry;
pub mod platform;
pub mod sampling;

// Re-export commonly used types
pub use config::{AccessPointConfig, ConfigError, ValidationResult, Zone, ZoneRegistry};
pub use core::{AccuracyTier, GeoCoordinate, ObservedSignal, PositionFix, EARTH_RADIUS_M};
pub use engine::{
    EngineConfig, EvidenceTrace, FloorClassification, ReasonCode, TraceEvent, VerificationMethod,
    VerificationOrchestrator, VerificationResult,
};
pub use geometry::{compute_corners, distance_meters, is_inside, ZoneCorners};
pub use platform::{
    MockPositionProvider, MockSignalScanner, PositionProvider, ProviderError, ProviderResult,
    SignalScanner,
};
pub use sampling::{Acquisition, PositionSampler, SamplerConfig};
