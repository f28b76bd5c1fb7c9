use crate::models::BoundingBox;

/// Earth's radius in kilometers
const EARTH_RADIUS_KM: f64 = 6371.0;

/// Calculate the Haversine distance between two points in kilometers
///
/// # Arguments
/// * `lat1` - Latitude of first point in degrees
/// * `lon1` - Longitude of first point in degrees
/// * `lat2` - Latitude of second point in degrees
/// * `lon2` - Longitude of second point in degrees
///
/// # Returns
/// Distance in kilometers
#[inline]
pub fn haversine_distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let lat1_rad = lat1.to_radians();
    let lat2_rad = lat2.to_radians();
    let delta_lat = (lat2 - lat1).to_radians();
    let delta_lon = (lon2 - lon1).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

/// Haversine distance in unrounded meters; this is what the max-distance
/// filter compares against.
#[inline]
pub fn haversine_meters(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    haversine_distance(lat1, lon1, lat2, lon2) * 1000.0
}

/// Round a km distance to the nearest whole kilometer for display.
#[inline]
pub fn round_km(distance_km: f64) -> u32 {
    distance_km.round() as u32
}

/// Calculate a bounding box around a center point
///
/// This is much faster than Haversine for pre-filtering.
/// 1° latitude ≈ 111km, 1° longitude ≈ 111km * cos(latitude)
pub fn calculate_bounding_box(lat: f64, lon: f64, radius_km: f64) -> BoundingBox {
    // 1 degree latitude is approximately 111 km
    let lat_delta = radius_km / 111.0;

    // 1 degree longitude varies by latitude
    let lon_delta = radius_km / (111.0 * lat.to_radians().cos().abs());

    BoundingBox {
        min_lat: lat - lat_delta,
        max_lat: lat + lat_delta,
        min_lon: lon - lon_delta,
        max_lon: lon + lon_delta,
    }
}

/// Check if a point is within a bounding box
#[inline]
pub fn is_within_bounding_box(lat: f64, lon: f64, bbox: &BoundingBox) -> bool {
    lat >= bbox.min_lat && lat <= bbox.max_lat && lon >= bbox.min_lon && lon <= bbox.max_lon
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_haversine_same_point_is_zero() {
        let distance = haversine_distance(50.7374, 7.0982, 50.7374, 7.0982);
        assert!(distance < 0.001, "Expected 0, got {}", distance);
    }

    #[test]
    fn test_haversine_quarter_great_circle() {
        // Equator to a point 90 degrees of longitude away: one quarter of the
        // great circle, pi/2 * 6371 ≈ 10007.5 km
        let distance = haversine_distance(0.0, 0.0, 0.0, 90.0);
        assert!((distance - 10007.5).abs() < 1.0, "Expected ~10007.5km, got {}", distance);
    }

    #[test]
    fn test_haversine_symmetric() {
        let d1 = haversine_distance(51.5074, -0.1278, 48.8566, 2.3522);
        let d2 = haversine_distance(48.8566, 2.3522, 51.5074, -0.1278);
        assert!((d1 - d2).abs() < 1e-9);
        // London to Paris is approximately 344 km
        assert!((d1 - 344.0).abs() < 10.0, "Distance should be ~344km, got {}", d1);
    }

    #[test]
    fn test_haversine_meters_matches_km() {
        let km = haversine_distance(50.73, 7.09, 50.82, 7.09);
        let m = haversine_meters(50.73, 7.09, 50.82, 7.09);
        assert!((m - km * 1000.0).abs() < 1e-6);
    }

    #[test]
    fn test_round_km() {
        assert_eq!(round_km(0.4), 0);
        assert_eq!(round_km(0.5), 1);
        assert_eq!(round_km(10.49), 10);
        assert_eq!(round_km(10.51), 11);
    }

    #[test]
    fn test_bounding_box() {
        let bbox = calculate_bounding_box(50.7374, 7.0982, 10.0);

        assert!(bbox.min_lat < 50.7374);
        assert!(bbox.max_lat > 50.7374);
        assert!(bbox.min_lon < 7.0982);
        assert!(bbox.max_lon > 7.0982);

        // Check approximate size (20km / 111km per degree = ~0.18 degrees)
        let lat_span = bbox.max_lat - bbox.min_lat;
        assert!((lat_span - 0.18).abs() < 0.02, "Lat span should be ~0.18 degrees");
    }

    #[test]
    fn test_point_within_bbox() {
        let bbox = calculate_bounding_box(50.7374, 7.0982, 10.0);

        // Center point should be within
        assert!(is_within_bounding_box(50.7374, 7.0982, &bbox));

        // Close point should be within
        assert!(is_within_bounding_box(50.74, 7.1, &bbox));

        // Far point should not be within
        assert!(!is_within_bounding_box(60.0, 20.0, &bbox));
    }
}
