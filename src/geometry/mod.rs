//! Zone geometry: corner derivation, containment, great-circle distance
//!
//! All geometry works on a local equirectangular approximation around the
//! zone center. Zone rectangles are tens of meters across, so the flat-Earth
//! error is far below fix accuracy. No safety margin is added to derived
//! corners: attendance boundaries must be exact, not padded.

use crate::core::constants::EARTH_RADIUS_M;
use crate::core::GeoCoordinate;
use std::f64::consts::PI;

/// Four derived corners of a rectangular zone
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoneCorners {
    pub north_east: GeoCoordinate,
    pub north_west: GeoCoordinate,
    pub south_east: GeoCoordinate,
    pub south_west: GeoCoordinate,
}

impl ZoneCorners {
    /// Corners as a closed ring in NW -> NE -> SE -> SW order
    pub fn ring(&self) -> [GeoCoordinate; 4] {
        [
            self.north_west,
            self.north_east,
            self.south_east,
            self.south_west,
        ]
    }
}

/// Derive the four corner coordinates of a rectangle centered on `center`.
///
/// The half-length maps to a latitude delta, the half-width to a longitude
/// delta scaled by the local parallel circumference.
pub fn compute_corners(center: GeoCoordinate, width_m: f64, length_m: f64) -> ZoneCorners {
    let lat_delta = (length_m / 2.0) / EARTH_RADIUS_M * (180.0 / PI);
    let lng_delta =
        (width_m / 2.0) / (EARTH_RADIUS_M * center.latitude.to_radians().cos()) * (180.0 / PI);

    ZoneCorners {
        north_east: GeoCoordinate::new(center.latitude + lat_delta, center.longitude + lng_delta),
        north_west: GeoCoordinate::new(center.latitude + lat_delta, center.longitude - lng_delta),
        south_east: GeoCoordinate::new(center.latitude - lat_delta, center.longitude + lng_delta),
        south_west: GeoCoordinate::new(center.latitude - lat_delta, center.longitude - lng_delta),
    }
}

/// Ray-casting containment test over the 4-vertex corner ring.
///
/// Even-odd crossing count with half-open edges: a point strictly inside the
/// rectangle is always inside, a point strictly outside never is. Points
/// exactly on an edge are not guaranteed either way.
pub fn is_inside(point: GeoCoordinate, corners: &ZoneCorners) -> bool {
    let ring = corners.ring();
    let mut inside = false;
    let mut j = ring.len() - 1;

    for i in 0..ring.len() {
        let (xi, yi) = (ring[i].longitude, ring[i].latitude);
        let (xj, yj) = (ring[j].longitude, ring[j].latitude);

        let crosses = ((yi > point.latitude) != (yj > point.latitude))
            && point.longitude < (xj - xi) * (point.latitude - yi) / (yj - yi) + xi;
        if crosses {
            inside = !inside;
        }
        j = i;
    }

    inside
}

/// Great-circle distance between two coordinates (haversine, meters)
pub fn distance_meters(a: GeoCoordinate, b: GeoCoordinate) -> f64 {
    let lat_a = a.latitude.to_radians();
    let lat_b = b.latitude.to_radians();
    let d_lat = (b.latitude - a.latitude).to_radians();
    let d_lng = (b.longitude - a.longitude).to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat_a.cos() * lat_b.cos() * (d_lng / 2.0).sin().powi(2);

    2.0 * EARTH_RADIUS_M * h.sqrt().asin()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classroom_center() -> GeoCoordinate {
        GeoCoordinate::new(13.067439, 80.237617)
    }

    #[test]
    fn test_center_is_inside_own_rectangle() {
        let center = classroom_center();
        let corners = compute_corners(center, 10.0, 12.0);
        assert!(is_inside(center, &corners));
    }

    #[test]
    fn test_corner_labels_match_directions() {
        let center = classroom_center();
        let corners = compute_corners(center, 10.0, 12.0);

        assert!(corners.north_east.latitude > center.latitude);
        assert!(corners.north_east.longitude > center.longitude);
        assert!(corners.north_west.latitude > center.latitude);
        assert!(corners.north_west.longitude < center.longitude);
        assert!(corners.south_east.latitude < center.latitude);
        assert!(corners.south_east.longitude > center.longitude);
        assert!(corners.south_west.latitude < center.latitude);
        assert!(corners.south_west.longitude < center.longitude);
    }

    #[test]
    fn test_rectangle_dimensions_approximate_request() {
        let center = classroom_center();
        let corners = compute_corners(center, 10.0, 12.0);

        let width = distance_meters(corners.north_west, corners.north_east);
        let length = distance_meters(corners.north_west, corners.south_west);

        assert!((width - 10.0).abs() < 0.1, "width was {}", width);
        assert!((length - 12.0).abs() < 0.1, "length was {}", length);
    }

    #[test]
    fn test_point_just_outside_rejected() {
        let center = classroom_center();
        let corners = compute_corners(center, 10.0, 12.0);

        // 12 m long rectangle: 7 m north of center clears the boundary
        let lat_offset = 7.0 / EARTH_RADIUS_M * (180.0 / std::f64::consts::PI);
        let outside = GeoCoordinate::new(center.latitude + lat_offset, center.longitude);
        assert!(!is_inside(outside, &corners));

        let far = GeoCoordinate::new(center.latitude + 1.0, center.longitude);
        assert!(!is_inside(far, &corners));
    }

    #[test]
    fn test_point_just_inside_accepted() {
        let center = classroom_center();
        let corners = compute_corners(center, 10.0, 12.0);

        // 5 m north of center stays within the 6 m half-length
        let lat_offset = 5.0 / EARTH_RADIUS_M * (180.0 / std::f64::consts::PI);
        let inside = GeoCoordinate::new(center.latitude + lat_offset, center.longitude);
        assert!(is_inside(inside, &corners));
    }

    #[test]
    fn test_distance_symmetry_and_identity() {
        let a = GeoCoordinate::new(13.067439, 80.237617);
        let b = GeoCoordinate::new(13.068000, 80.238200);

        assert_eq!(distance_meters(a, b), distance_meters(b, a));
        assert_eq!(distance_meters(a, a), 0.0);
        assert!(distance_meters(a, b) > 0.0);
    }

    #[test]
    fn test_known_distance() {
        // One degree of latitude is roughly 111.2 km on the mean sphere
        let a = GeoCoordinate::new(13.0, 80.0);
        let b = GeoCoordinate::new(14.0, 80.0);
        let d = distance_meters(a, b);
        assert!((d - 111_195.0).abs() < 100.0, "distance was {}", d);
    }
}
