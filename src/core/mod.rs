//! Core data types and constants

pub mod constants;
pub mod types;

pub use constants::EARTH_RADIUS_M;
pub use types::{AccuracyTier, GeoCoordinate, ObservedSignal, PositionFix};
