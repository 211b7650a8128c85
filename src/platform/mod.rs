//! Platform capability boundary
//!
//! The engine performs exactly two kinds of I/O: requesting a satellite
//! position fix and triggering a wireless scan. Both go through injected
//! trait objects so tests substitute deterministic fakes for real hardware.

pub mod mock;

pub use mock::{MockPositionProvider, MockSignalScanner};

use crate::core::{ObservedSignal, PositionFix};
use std::fmt;
use std::time::Duration;

/// Errors surfaced by platform capability providers
#[derive(Debug, Clone, PartialEq)]
pub enum ProviderError {
    /// The user has denied the permission the capability needs
    PermissionDenied { capability: String },
    /// The underlying platform service is switched off
    ServiceDisabled { capability: String },
    /// The request did not complete within its timeout
    Timeout { timeout_ms: u64 },
    /// The device cannot perform this operation at all
    Unsupported { capability: String },
    /// Platform-specific failure
    Hardware { description: String },
}

impl fmt::Display for ProviderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderError::PermissionDenied { capability } => {
                write!(f, "Permission denied for {}", capability)
            }
            ProviderError::ServiceDisabled { capability } => {
                write!(f, "{} service is disabled", capability)
            }
            ProviderError::Timeout { timeout_ms } => {
                write!(f, "Request timed out after {}ms", timeout_ms)
            }
            ProviderError::Unsupported { capability } => {
                write!(f, "{} is not supported on this device", capability)
            }
            ProviderError::Hardware { description } => {
                write!(f, "Hardware error: {}", description)
            }
        }
    }
}

impl std::error::Error for ProviderError {}

/// Result type for platform capability operations
pub type ProviderResult<T> = Result<T, ProviderError>;

impl ProviderError {
    /// Whether this failure means the capability is unusable for the whole
    /// run, as opposed to one attempt that may succeed on retry
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            ProviderError::PermissionDenied { .. }
                | ProviderError::ServiceDisabled { .. }
                | ProviderError::Unsupported { .. }
        )
    }
}

/// Satellite positioning capability
pub trait PositionProvider {
    /// Capability probe: can this device obtain a position fix right now
    fn is_available(&self) -> bool;

    /// Request a single fix, waiting at most `timeout`
    fn request_fix(&mut self, timeout: Duration) -> ProviderResult<PositionFix>;
}

/// Wireless scanning capability
pub trait SignalScanner {
    /// Capability probe: can this device perform a wireless scan right now
    fn is_available(&self) -> bool;

    /// Trigger a scan and return the observed signals (possibly empty)
    fn scan(&mut self) -> ProviderResult<Vec<ObservedSignal>>;
}
