//! Mock capability providers for testing and development

use crate::core::{GeoCoordinate, ObservedSignal, PositionFix};
use crate::platform::{PositionProvider, ProviderError, ProviderResult, SignalScanner};
use std::collections::VecDeque;
use std::time::Duration;

/// Mock satellite position provider with a scripted response queue.
///
/// Queued responses are consumed one per request; once the queue is empty
/// every further request times out, which models a receiver that has gone
/// quiet. Error simulation mirrors real receivers that fail intermittently.
pub struct MockPositionProvider {
    responses: VecDeque<ProviderResult<PositionFix>>,
    available: bool,
    simulate_errors: bool,
    error_probability: f32,
    requests_served: u32,
}

impl MockPositionProvider {
    pub fn new() -> Self {
        Self {
            responses: VecDeque::new(),
            available: true,
            simulate_errors: false,
            error_probability: 0.0,
            requests_served: 0,
        }
    }

    /// Queue a successful fix response
    pub fn add_fix(&mut self, latitude: f64, longitude: f64, accuracy_m: f64) {
        self.responses.push_back(Ok(PositionFix {
            coordinate: GeoCoordinate::new(latitude, longitude),
            accuracy_m,
            captured_at_ms: 1_700_000_000_000 + self.responses.len() as u64 * 1_000,
        }));
    }

    /// Queue a failure response
    pub fn add_error(&mut self, error: ProviderError) {
        self.responses.push_back(Err(error));
    }

    /// Toggle the capability probe
    pub fn set_available(&mut self, available: bool) {
        self.available = available;
    }

    /// Enable error simulation with given probability (0.0 to 1.0)
    pub fn simulate_errors(&mut self, enable: bool, probability: f32) {
        self.simulate_errors = enable;
        self.error_probability = probability.clamp(0.0, 1.0);
    }

    pub fn requests_served(&self) -> u32 {
        self.requests_served
    }

    fn should_simulate_error(&self) -> bool {
        if !self.simulate_errors {
            return false;
        }

        use rand::Rng;
        let mut rng = rand::thread_rng();
        rng.gen::<f32>() < self.error_probability
    }
}

impl PositionProvider for MockPositionProvider {
    fn is_available(&self) -> bool {
        self.available
    }

    fn request_fix(&mut self, timeout: Duration) -> ProviderResult<PositionFix> {
        self.requests_served += 1;

        if !self.available {
            return Err(ProviderError::ServiceDisabled {
                capability: "positioning".to_string(),
            });
        }

        if self.should_simulate_error() {
            return Err(ProviderError::Hardware {
                description: "Simulated receiver failure".to_string(),
            });
        }

        match self.responses.pop_front() {
            Some(response) => response,
            None => Err(ProviderError::Timeout {
                timeout_ms: timeout.as_millis() as u64,
            }),
        }
    }
}

impl Default for MockPositionProvider {
    fn default() -> Self {
        Self::new()
    }
}

/// Mock wireless scanner.
///
/// Scripted scan responses are consumed first; when the script runs out the
/// scanner falls back to a steady environment list, so deterministic tests
/// can model either a changing radio environment or a static one.
pub struct MockSignalScanner {
    scripted_scans: VecDeque<Vec<ObservedSignal>>,
    environment: Vec<ObservedSignal>,
    available: bool,
    scans_performed: u32,
}

impl MockSignalScanner {
    pub fn new() -> Self {
        Self {
            scripted_scans: VecDeque::new(),
            environment: Vec::new(),
            available: true,
            scans_performed: 0,
        }
    }

    /// Set the steady-state radio environment returned when no scripted
    /// scans remain
    pub fn set_environment(&mut self, signals: Vec<ObservedSignal>) {
        self.environment = signals;
    }

    /// Queue one scripted scan response
    pub fn add_scan_response(&mut self, signals: Vec<ObservedSignal>) {
        self.scripted_scans.push_back(signals);
    }

    /// Toggle the capability probe
    pub fn set_available(&mut self, available: bool) {
        self.available = available;
    }

    pub fn scans_performed(&self) -> u32 {
        self.scans_performed
    }
}

impl SignalScanner for MockSignalScanner {
    fn is_available(&self) -> bool {
        self.available
    }

    fn scan(&mut self) -> ProviderResult<Vec<ObservedSignal>> {
        if !self.available {
            return Err(ProviderError::Unsupported {
                capability: "wireless scanning".to_string(),
            });
        }

        self.scans_performed += 1;

        match self.scripted_scans.pop_front() {
            Some(signals) => Ok(signals),
            None => Ok(self.environment.clone()),
        }
    }
}

impl Default for MockSignalScanner {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_serves_queued_fixes_in_order() {
        let mut provider = MockPositionProvider::new();
        provider.add_fix(13.0, 80.0, 25.0);
        provider.add_fix(13.0, 80.0, 8.0);

        let first = provider.request_fix(Duration::from_secs(1)).unwrap();
        assert_eq!(first.accuracy_m, 25.0);
        let second = provider.request_fix(Duration::from_secs(1)).unwrap();
        assert_eq!(second.accuracy_m, 8.0);
    }

    #[test]
    fn test_provider_times_out_when_exhausted() {
        let mut provider = MockPositionProvider::new();
        let result = provider.request_fix(Duration::from_millis(500));
        assert!(matches!(result, Err(ProviderError::Timeout { timeout_ms: 500 })));
    }

    #[test]
    fn test_unavailable_provider_reports_service_disabled() {
        let mut provider = MockPositionProvider::new();
        provider.add_fix(13.0, 80.0, 5.0);
        provider.set_available(false);

        assert!(!provider.is_available());
        let result = provider.request_fix(Duration::from_secs(1));
        assert!(matches!(result, Err(ProviderError::ServiceDisabled { .. })));
    }

    #[test]
    fn test_error_simulation() {
        let mut provider = MockPositionProvider::new();
        provider.add_fix(13.0, 80.0, 5.0);
        provider.simulate_errors(true, 1.0);

        let result = provider.request_fix(Duration::from_secs(1));
        assert!(result.is_err());
    }

    #[test]
    fn test_scanner_scripted_then_steady() {
        let mut scanner = MockSignalScanner::new();
        scanner.add_scan_response(vec![]);
        scanner.set_environment(vec![ObservedSignal::new("aa:bb", "lab", -60)]);

        assert!(scanner.scan().unwrap().is_empty());
        assert_eq!(scanner.scan().unwrap().len(), 1);
        assert_eq!(scanner.scan().unwrap().len(), 1);
        assert_eq!(scanner.scans_performed(), 3);
    }

    #[test]
    fn test_unavailable_scanner_reports_unsupported() {
        let mut scanner = MockSignalScanner::new();
        scanner.set_available(false);

        let result = scanner.scan();
        assert!(matches!(result, Err(ProviderError::Unsupported { .. })));
        assert!(result.unwrap_err().is_terminal());
    }
}
