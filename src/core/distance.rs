use crate::models::{BoundingBox, Location};

/// Earth's radius in kilometers
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Slack added to bounding boxes so float rounding never drops a boundary point
const BBOX_EPSILON_DEG: f64 = 1e-9;

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

/// Distance between two locations in kilometers
#[inline]
pub fn distance_km(a: &Location, b: &Location) -> f64 {
    haversine_distance(a.latitude, a.longitude, b.latitude, b.longitude)
}

/// Calculate a bounding box around a center point
///
/// The box always contains every point whose great-circle distance from the
/// center is at most `radius_km`, so it is safe as a pre-filter before the
/// exact Haversine check. Near the poles, or when the box would cross the
/// antimeridian, the longitude span widens to the whole globe.
pub fn calculate_bounding_box(lat: f64, lon: f64, radius_km: f64) -> BoundingBox {
    let angular = radius_km / EARTH_RADIUS_KM;
    let lat_delta = angular.to_degrees() + BBOX_EPSILON_DEG;

    let min_lat = lat - lat_delta;
    let max_lat = lat + lat_delta;

    if angular >= std::f64::consts::FRAC_PI_2 || min_lat <= -90.0 || max_lat >= 90.0 {
        return BoundingBox::whole_longitude(min_lat.max(-90.0), max_lat.min(90.0));
    }

    // Widest longitude offset reachable within the radius at this latitude
    let ratio = angular.sin() / lat.to_radians().cos();
    if ratio >= 1.0 {
        return BoundingBox::whole_longitude(min_lat, max_lat);
    }
    let lon_delta = ratio.asin().to_degrees() + BBOX_EPSILON_DEG;

    let min_lon = lon - lon_delta;
    let max_lon = lon + lon_delta;
    if min_lon < -180.0 || max_lon > 180.0 {
        return BoundingBox::whole_longitude(min_lat, max_lat);
    }

    BoundingBox {
        min_lat,
        max_lat,
        min_lon,
        max_lon,
    }
}

/// Check if a point is within a bounding box (edges inclusive)
#[inline]
pub fn is_within_bounding_box(lat: f64, lon: f64, bbox: &BoundingBox) -> bool {
    lat >= bbox.min_lat && lat <= bbox.max_lat && lon >= bbox.min_lon && lon <= bbox.max_lon
}
