//! Zone and access-point configuration
//!
//! Configuration is resolved by the administrative layer and handed to the
//! engine as immutable values. The registry validates everything at
//! configuration time so the decision path never has to re-check invariants.

use crate::core::GeoCoordinate;
use crate::geometry::{self, ZoneCorners};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::Path;

/// A rectangular verification zone (one classroom)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Zone {
    /// Unique zone identifier
    pub id: String,
    /// Building the zone belongs to
    pub building_name: String,
    /// Floor the zone is on
    pub floor_number: i32,
    /// Geodetic center of the rectangle
    pub center: GeoCoordinate,
    /// Physical width, east-west (meters)
    pub width_m: f64,
    /// Physical length, north-south (meters)
    pub length_m: f64,
    /// BSSID of the access point assigned to this zone, if any
    pub assigned_access_point: Option<String>,
}

impl Zone {
    /// Corner coordinates derived from center and dimensions.
    ///
    /// Corners are always recomputed, never stored, so they cannot drift
    /// out of sync with the center or dimensions.
    pub fn corners(&self) -> ZoneCorners {
        geometry::compute_corners(self.center, self.width_m, self.length_m)
    }

    /// Containment test against the derived rectangle
    pub fn contains(&self, point: GeoCoordinate) -> bool {
        geometry::is_inside(point, &self.corners())
    }
}

/// A configured wireless access point used for floor discrimination
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccessPointConfig {
    /// Hardware address, the primary matching key
    pub bssid: String,
    /// Broadcast name, the fallback matching key
    pub ssid: String,
    /// Floor the access point is physically mounted on
    pub floor_number: i32,
    /// Minimum strength at which the access point counts as detected (dBm)
    pub detection_threshold_dbm: i32,
    /// Strength at or above which the reading is conclusive same-floor evidence (dBm)
    pub same_floor_min_dbm: i32,
    /// Strength at or below which a different floor is suspected (dBm)
    pub different_floor_max_dbm: i32,
}

/// Configuration errors
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Invalid parameter value
    InvalidParameter {
        parameter: String,
        value: String,
        reason: String,
    },
    /// Referenced entity does not exist
    MissingEntity { entity: String },
    /// Configuration file I/O error
    IoError { message: String },
    /// JSON serialization/deserialization error
    SerializationError { message: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidParameter {
                parameter,
                value,
                reason,
            } => write!(f, "Invalid parameter '{}' = '{}': {}", parameter, value, reason),
            ConfigError::MissingEntity { entity } => write!(f, "Missing entity: {}", entity),
            ConfigError::IoError { message } => write!(f, "I/O error: {}", message),
            ConfigError::SerializationError { message } => {
                write!(f, "Serialization error: {}", message)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Result of validating a zone or access-point configuration
#[derive(Debug)]
pub struct ValidationResult {
    /// Whether the configuration is usable
    pub is_valid: bool,
    /// Hard validation errors
    pub errors: Vec<ConfigError>,
    /// Non-fatal findings worth surfacing to an administrator
    pub warnings: Vec<String>,
}

/// Registry of zones and access points with JSON persistence
pub struct ZoneRegistry {
    zones: HashMap<String, Zone>,
    access_points: HashMap<String, AccessPointConfig>,
    config_file_path: Option<String>,
    is_modified: bool,
}

impl ZoneRegistry {
    pub fn new() -> Self {
        Self {
            zones: HashMap::new(),
            access_points: HashMap::new(),
            config_file_path: None,
            is_modified: false,
        }
    }

    /// Create a registry populated from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let mut registry = Self::new();
        registry.load_from_file(path)?;
        Ok(registry)
    }

    pub fn get_zone(&self, id: &str) -> Option<&Zone> {
        self.zones.get(id)
    }

    /// Access point lookup by BSSID (case-insensitive)
    pub fn get_access_point(&self, bssid: &str) -> Option<&AccessPointConfig> {
        self.access_points
            .values()
            .find(|ap| ap.bssid.eq_ignore_ascii_case(bssid))
    }

    /// Access point assigned to a zone, if the zone names one and it exists
    pub fn access_point_for_zone(&self, zone: &Zone) -> Option<&AccessPointConfig> {
        zone.assigned_access_point
            .as_deref()
            .and_then(|bssid| self.get_access_point(bssid))
    }

    pub fn zone_count(&self) -> usize {
        self.zones.len()
    }

    pub fn access_point_count(&self) -> usize {
        self.access_points.len()
    }

    pub fn is_modified(&self) -> bool {
        self.is_modified
    }

    /// Add or replace a zone after validation
    pub fn set_zone(&mut self, zone: Zone) -> Result<(), ConfigError> {
        let validation = self.validate_zone(&zone);
        if !validation.is_valid {
            return Err(validation.errors.into_iter().next().unwrap_or(
                ConfigError::InvalidParameter {
                    parameter: "zone".to_string(),
                    value: zone.id.clone(),
                    reason: "Zone validation failed".to_string(),
                },
            ));
        }

        self.zones.insert(zone.id.clone(), zone);
        self.is_modified = true;
        Ok(())
    }

    /// Add or replace an access point after validation
    pub fn set_access_point(&mut self, ap: AccessPointConfig) -> Result<(), ConfigError> {
        let validation = self.validate_access_point(&ap);
        if !validation.is_valid {
            return Err(validation.errors.into_iter().next().unwrap_or(
                ConfigError::InvalidParameter {
                    parameter: "access_point".to_string(),
                    value: ap.bssid.clone(),
                    reason: "Access point validation failed".to_string(),
                },
            ));
        }

        self.access_points.insert(ap.bssid.to_lowercase(), ap);
        self.is_modified = true;
        Ok(())
    }

    pub fn remove_zone(&mut self, id: &str) -> Option<Zone> {
        self.is_modified = true;
        self.zones.remove(id)
    }

    pub fn remove_access_point(&mut self, bssid: &str) -> Option<AccessPointConfig> {
        self.is_modified = true;
        self.access_points.remove(&bssid.to_lowercase())
    }

    /// Validate a zone definition
    pub fn validate_zone(&self, zone: &Zone) -> ValidationResult {
        let mut errors = Vec::new();
        let mut warnings = Vec::new();

        if zone.id.is_empty() {
            errors.push(ConfigError::InvalidParameter {
                parameter: "id".to_string(),
                value: String::new(),
                reason: "Zone ID cannot be empty".to_string(),
            });
        }

        if zone.center.latitude.abs() > 90.0 {
            errors.push(ConfigError::InvalidParameter {
                parameter: "center.latitude".to_string(),
                value: zone.center.latitude.to_string(),
                reason: "Latitude must be between -90 and 90 degrees".to_string(),
            });
        }

        if zone.center.longitude.abs() > 180.0 {
            errors.push(ConfigError::InvalidParameter {
                parameter: "center.longitude".to_string(),
                value: zone.center.longitude.to_string(),
                reason: "Longitude must be between -180 and 180 degrees".to_string(),
            });
        }

        if zone.width_m <= 0.0 {
            errors.push(ConfigError::InvalidParameter {
                parameter: "width_m".to_string(),
                value: zone.width_m.to_string(),
                reason: "Zone width must be positive".to_string(),
            });
        }

        if zone.length_m <= 0.0 {
            errors.push(ConfigError::InvalidParameter {
                parameter: "length_m".to_string(),
                value: zone.length_m.to_string(),
                reason: "Zone length must be positive".to_string(),
            });
        }

        if zone.width_m > 200.0 || zone.length_m > 200.0 {
            warnings.push(format!(
                "Zone '{}' is unusually large ({}m x {}m) for a classroom",
                zone.id, zone.width_m, zone.length_m
            ));
        }

        if let Some(bssid) = &zone.assigned_access_point {
            match self.get_access_point(bssid) {
                None => warnings.push(format!(
                    "Zone '{}' references access point '{}' which is not registered",
                    zone.id, bssid
                )),
                Some(ap) => {
                    // A mounted-floor / zone-floor disagreement is a latent
                    // inconsistency: the ambiguous-band leniency would accept
                    // against the wrong floor. Surfaced, not rejected.
                    if ap.floor_number != zone.floor_number {
                        warnings.push(format!(
                            "Zone '{}' is on floor {} but its access point '{}' is mounted on floor {}",
                            zone.id, zone.floor_number, ap.bssid, ap.floor_number
                        ));
                    }
                }
            }
        }

        ValidationResult {
            is_valid: errors.is_empty(),
            errors,
            warnings,
        }
    }

    /// Validate an access-point definition
    pub fn validate_access_point(&self, ap: &AccessPointConfig) -> ValidationResult {
        let mut errors = Vec::new();
        let mut warnings = Vec::new();

        if ap.bssid.is_empty() {
            errors.push(ConfigError::InvalidParameter {
                parameter: "bssid".to_string(),
                value: String::new(),
                reason: "BSSID cannot be empty".to_string(),
            });
        }

        for (name, value) in [
            ("detection_threshold_dbm", ap.detection_threshold_dbm),
            ("same_floor_min_dbm", ap.same_floor_min_dbm),
            ("different_floor_max_dbm", ap.different_floor_max_dbm),
        ] {
            if !(-100..=0).contains(&value) {
                errors.push(ConfigError::InvalidParameter {
                    parameter: name.to_string(),
                    value: value.to_string(),
                    reason: "Signal thresholds must be between -100 and 0 dBm".to_string(),
                });
            }
        }

        // Floor discrimination is undefined when the bands touch or overlap
        if ap.same_floor_min_dbm <= ap.different_floor_max_dbm {
            errors.push(ConfigError::InvalidParameter {
                parameter: "same_floor_min_dbm".to_string(),
                value: ap.same_floor_min_dbm.to_string(),
                reason: format!(
                    "same_floor_min_dbm must be greater than different_floor_max_dbm ({})",
                    ap.different_floor_max_dbm
                ),
            });
        }

        if ap.ssid.is_empty() {
            warnings.push(format!(
                "Access point '{}' has no SSID; name-based fallback matching is disabled",
                ap.bssid
            ));
        }

        ValidationResult {
            is_valid: errors.is_empty(),
            errors,
            warnings,
        }
    }

    /// Load zones and access points from a JSON file
    pub fn load_from_file<P: AsRef<Path>>(&mut self, path: P) -> Result<(), ConfigError> {
        let path_str = path.as_ref().to_string_lossy().to_string();

        let content = fs::read_to_string(&path).map_err(|e| ConfigError::IoError {
            message: format!("Failed to read config file '{}': {}", path_str, e),
        })?;

        let data: RegistryFileData =
            serde_json::from_str(&content).map_err(|e| ConfigError::SerializationError {
                message: format!("Failed to parse config file '{}': {}", path_str, e),
            })?;

        // Validate everything before applying anything
        for ap in &data.access_points {
            let validation = self.validate_access_point(ap);
            if !validation.is_valid {
                return Err(validation.errors.into_iter().next().unwrap());
            }
        }
        for zone in &data.zones {
            let validation = self.validate_zone(zone);
            if !validation.is_valid {
                return Err(validation.errors.into_iter().next().unwrap());
            }
        }

        self.access_points.clear();
        for ap in data.access_points {
            self.access_points.insert(ap.bssid.to_lowercase(), ap);
        }
        self.zones.clear();
        for zone in data.zones {
            self.zones.insert(zone.id.clone(), zone);
        }

        self.config_file_path = Some(path_str);
        self.is_modified = false;
        Ok(())
    }

    /// Save zones and access points to a JSON file
    pub fn save_to_file<P: AsRef<Path>>(&mut self, path: P) -> Result<(), ConfigError> {
        let path_str = path.as_ref().to_string_lossy().to_string();

        let data = RegistryFileData {
            zones: self.zones.values().cloned().collect(),
            access_points: self.access_points.values().cloned().collect(),
        };

        let content =
            serde_json::to_string_pretty(&data).map_err(|e| ConfigError::SerializationError {
                message: format!("Failed to serialize config: {}", e),
            })?;

        fs::write(&path, content).map_err(|e| ConfigError::IoError {
            message: format!("Failed to write config file '{}': {}", path_str, e),
        })?;

        self.config_file_path = Some(path_str);
        self.is_modified = false;
        Ok(())
    }
}

impl Default for ZoneRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Configuration file layout
#[derive(Debug, Serialize, Deserialize)]
struct RegistryFileData {
    zones: Vec<Zone>,
    access_points: Vec<AccessPointConfig>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn test_zone() -> Zone {
        Zone {
            id: "room-204".to_string(),
            building_name: "Science Block".to_string(),
            floor_number: 2,
            center: GeoCoordinate::new(13.067439, 80.237617),
            width_m: 10.0,
            length_m: 12.0,
            assigned_access_point: Some("aa:bb:cc:dd:ee:ff".to_string()),
        }
    }

    fn test_access_point() -> AccessPointConfig {
        AccessPointConfig {
            bssid: "aa:bb:cc:dd:ee:ff".to_string(),
            ssid: "SCI-204".to_string(),
            floor_number: 2,
            detection_threshold_dbm: -85,
            same_floor_min_dbm: -55,
            different_floor_max_dbm: -75,
        }
    }

    #[test]
    fn test_valid_configuration_accepted() {
        let mut registry = ZoneRegistry::new();
        registry.set_access_point(test_access_point()).unwrap();
        registry.set_zone(test_zone()).unwrap();

        assert_eq!(registry.zone_count(), 1);
        assert_eq!(registry.access_point_count(), 1);
        assert!(registry.is_modified());
    }

    #[test]
    fn test_threshold_ordering_invariant() {
        let registry = ZoneRegistry::new();
        let mut ap = test_access_point();
        ap.same_floor_min_dbm = -80;
        ap.different_floor_max_dbm = -75;

        let result = registry.validate_access_point(&ap);
        assert!(!result.is_valid);

        // Equal thresholds leave no ambiguous band to classify into
        ap.same_floor_min_dbm = -75;
        let result = registry.validate_access_point(&ap);
        assert!(!result.is_valid);
    }

    #[test]
    fn test_threshold_range_validation() {
        let registry = ZoneRegistry::new();
        let mut ap = test_access_point();
        ap.same_floor_min_dbm = 20;

        let result = registry.validate_access_point(&ap);
        assert!(!result.is_valid);
    }

    #[test]
    fn test_invalid_zone_rejected() {
        let mut registry = ZoneRegistry::new();
        let mut zone = test_zone();
        zone.center.latitude = 95.0;
        zone.width_m = -10.0;

        assert!(registry.set_zone(zone).is_err());
        assert_eq!(registry.zone_count(), 0);
    }

    #[test]
    fn test_floor_disagreement_warns() {
        let mut registry = ZoneRegistry::new();
        let mut ap = test_access_point();
        ap.floor_number = 3;
        registry.set_access_point(ap).unwrap();

        let result = registry.validate_zone(&test_zone());
        assert!(result.is_valid);
        assert!(result.warnings.iter().any(|w| w.contains("floor")));
    }

    #[test]
    fn test_access_point_lookup_case_insensitive() {
        let mut registry = ZoneRegistry::new();
        registry.set_access_point(test_access_point()).unwrap();

        assert!(registry.get_access_point("AA:BB:CC:DD:EE:FF").is_some());
        assert!(registry.access_point_for_zone(&test_zone()).is_some());
    }

    #[test]
    fn test_zone_corners_derived_from_center() {
        let zone = test_zone();
        let corners = zone.corners();
        assert!(zone.contains(zone.center));
        assert!(corners.north_east.latitude > zone.center.latitude);
    }

    #[test]
    fn test_registry_file_round_trip() {
        let mut registry = ZoneRegistry::new();
        registry.set_access_point(test_access_point()).unwrap();
        registry.set_zone(test_zone()).unwrap();

        let temp_path = PathBuf::from("test_registry.json");
        registry.save_to_file(&temp_path).unwrap();
        assert!(!registry.is_modified());

        let loaded = ZoneRegistry::from_file(&temp_path).unwrap();
        assert_eq!(loaded.zone_count(), 1);
        assert!(loaded.get_zone("room-204").is_some());
        assert!(loaded.get_access_point("aa:bb:cc:dd:ee:ff").is_some());

        let _ = fs::remove_file(temp_path);
    }
}
