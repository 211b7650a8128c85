//! Physical constants and engine parameters

/// Mean Earth radius used for local geometry approximations (meters)
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Upper bound of the high accuracy tier (meters)
pub const HIGH_ACCURACY_MAX_M: f64 = 10.0;

/// Upper bound of the medium accuracy tier (meters)
pub const MEDIUM_ACCURACY_MAX_M: f64 = 30.0;

/// Default wall-clock budget for one verification run (milliseconds)
pub const DEFAULT_OVERALL_BUDGET_MS: u64 = 45_000;

/// Default number of position fix attempts per acquisition
pub const DEFAULT_MAX_FIX_ATTEMPTS: u32 = 5;

/// Default total time budget for position acquisition (milliseconds)
pub const DEFAULT_FIX_TIME_BUDGET_MS: u64 = 20_000;

/// Default timeout for a single fix request (milliseconds)
pub const DEFAULT_FIX_ATTEMPT_TIMEOUT_MS: u64 = 4_000;

/// Default timeout for the opportunistic evidence fix on the wifi accept path (milliseconds)
pub const DEFAULT_OPPORTUNISTIC_FIX_TIMEOUT_MS: u64 = 1_500;
