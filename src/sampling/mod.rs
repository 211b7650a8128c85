//! Position fix acquisition
//!
//! Satellite fixes arrive one at a time with varying error radii. The
//! sampler requests fixes in a bounded loop and keeps the most accurate one
//! seen, exiting early once a fix reaches the high accuracy tier.

use crate::core::constants::{
    DEFAULT_FIX_ATTEMPT_TIMEOUT_MS, DEFAULT_FIX_TIME_BUDGET_MS, DEFAULT_MAX_FIX_ATTEMPTS,
};
use crate::core::{AccuracyTier, PositionFix};
use crate::platform::{PositionProvider, ProviderError};
use std::time::{Duration, Instant};

/// Acquisition loop parameters
#[derive(Debug, Clone)]
pub struct SamplerConfig {
    /// Maximum number of fix requests per acquisition
    pub max_attempts: u32,
    /// Total wall-clock budget for the acquisition
    pub time_budget: Duration,
    /// Timeout for each individual fix request
    pub attempt_timeout: Duration,
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_FIX_ATTEMPTS,
            time_budget: Duration::from_millis(DEFAULT_FIX_TIME_BUDGET_MS),
            attempt_timeout: Duration::from_millis(DEFAULT_FIX_ATTEMPT_TIMEOUT_MS),
        }
    }
}

/// Outcome of one acquisition run.
///
/// Per-attempt failures are swallowed; only a capability-level failure
/// (permission denied, service disabled) is reported, so the caller can
/// distinguish "no fix this time" from "positioning is unusable".
#[derive(Debug, Clone)]
pub struct Acquisition {
    /// Most accurate fix obtained, if any
    pub best_fix: Option<PositionFix>,
    /// Number of fix requests issued
    pub attempts_made: u32,
    /// Terminal capability failure that cut the loop short, if any
    pub terminal_failure: Option<ProviderError>,
}

/// Bounded best-of-N position sampler
#[derive(Debug, Clone, Default)]
pub struct PositionSampler {
    config: SamplerConfig,
}

impl PositionSampler {
    pub fn new(config: SamplerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SamplerConfig {
        &self.config
    }

    /// Acquire the best fix obtainable within the attempt and time budgets.
    ///
    /// Returns immediately once a high-tier fix is seen. Exhaustion without
    /// any fix yields `best_fix: None`, never an error.
    pub fn acquire(&self, provider: &mut dyn PositionProvider) -> Acquisition {
        let deadline = Instant::now() + self.config.time_budget;
        let mut best_fix: Option<PositionFix> = None;
        let mut attempts_made = 0;
        let mut terminal_failure = None;

        if !provider.is_available() {
            return Acquisition {
                best_fix: None,
                attempts_made: 0,
                terminal_failure: Some(ProviderError::ServiceDisabled {
                    capability: "positioning".to_string(),
                }),
            };
        }

        for _ in 0..self.config.max_attempts {
            if Instant::now() >= deadline {
                break;
            }
            attempts_made += 1;

            match provider.request_fix(self.config.attempt_timeout) {
                Ok(fix) => {
                    if fix.tier() == AccuracyTier::High {
                        return Acquisition {
                            best_fix: Some(fix),
                            attempts_made,
                            terminal_failure: None,
                        };
                    }

                    let improves = best_fix
                        .as_ref()
                        .map(|best| fix.accuracy_m < best.accuracy_m)
                        .unwrap_or(true);
                    if improves {
                        best_fix = Some(fix);
                    }
                }
                Err(error) => {
                    if error.is_terminal() {
                        terminal_failure = Some(error);
                        break;
                    }
                    // Transient failure, keep sampling
                }
            }
        }

        Acquisition {
            best_fix,
            attempts_made,
            terminal_failure,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::MockPositionProvider;

    fn sampler() -> PositionSampler {
        PositionSampler::new(SamplerConfig {
            max_attempts: 4,
            time_budget: Duration::from_secs(10),
            attempt_timeout: Duration::from_millis(100),
        })
    }

    #[test]
    fn test_early_exit_on_high_tier_fix() {
        let mut provider = MockPositionProvider::new();
        provider.add_fix(13.0, 80.0, 8.0);
        provider.add_fix(13.0, 80.0, 5.0);

        let acquisition = sampler().acquire(&mut provider);
        let fix = acquisition.best_fix.unwrap();
        assert_eq!(fix.accuracy_m, 8.0);
        assert_eq!(acquisition.attempts_made, 1);
        // The second, better fix was never requested
        assert_eq!(provider.requests_served(), 1);
    }

    #[test]
    fn test_best_so_far_retained_across_attempts() {
        let mut provider = MockPositionProvider::new();
        provider.add_fix(13.0, 80.0, 45.0);
        provider.add_fix(13.0, 80.0, 22.0);
        provider.add_fix(13.0, 80.0, 38.0);
        provider.add_fix(13.0, 80.0, 31.0);

        let acquisition = sampler().acquire(&mut provider);
        assert_eq!(acquisition.best_fix.unwrap().accuracy_m, 22.0);
        assert_eq!(acquisition.attempts_made, 4);
    }

    #[test]
    fn test_transient_failures_swallowed() {
        let mut provider = MockPositionProvider::new();
        provider.add_error(ProviderError::Timeout { timeout_ms: 100 });
        provider.add_error(ProviderError::Hardware {
            description: "glitch".to_string(),
        });
        provider.add_fix(13.0, 80.0, 20.0);

        let acquisition = sampler().acquire(&mut provider);
        assert!(acquisition.best_fix.is_some());
        assert!(acquisition.terminal_failure.is_none());
    }

    #[test]
    fn test_exhaustion_without_fix_returns_none() {
        let mut provider = MockPositionProvider::new();

        let acquisition = sampler().acquire(&mut provider);
        assert!(acquisition.best_fix.is_none());
        assert_eq!(acquisition.attempts_made, 4);
        assert!(acquisition.terminal_failure.is_none());
    }

    #[test]
    fn test_permission_denied_stops_the_loop() {
        let mut provider = MockPositionProvider::new();
        provider.add_error(ProviderError::PermissionDenied {
            capability: "positioning".to_string(),
        });
        provider.add_fix(13.0, 80.0, 5.0);

        let acquisition = sampler().acquire(&mut provider);
        assert!(acquisition.best_fix.is_none());
        assert_eq!(acquisition.attempts_made, 1);
        assert!(matches!(
            acquisition.terminal_failure,
            Some(ProviderError::PermissionDenied { .. })
        ));
    }

    #[test]
    fn test_unavailable_provider_short_circuits() {
        let mut provider = MockPositionProvider::new();
        provider.set_available(false);

        let acquisition = sampler().acquire(&mut provider);
        assert!(acquisition.best_fix.is_none());
        assert_eq!(acquisition.attempts_made, 0);
        assert!(matches!(
            acquisition.terminal_failure,
            Some(ProviderError::ServiceDisabled { .. })
        ));
    }
}
