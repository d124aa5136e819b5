//! Geographic utilities: great-circle distance, cumulative distance, search deltas.
//!
//! All distances are in kilometers on a sphere of radius [`EARTH_RADIUS_KM`].

use crate::TrackPoint;

/// Mean Earth radius used by every distance computation.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle distance between two points in kilometers (haversine).
///
/// Uses the `atan2` form, which stays stable for both coincident and
/// antipodal points.
///
/// # Example
/// ```
/// use trackanalytics::TrackPoint;
/// use trackanalytics::geo_utils::haversine_distance;
///
/// let london = TrackPoint::new(51.5074, -0.1278);
/// let paris = TrackPoint::new(48.8566, 2.3522);
/// let km = haversine_distance(&london, &paris);
/// assert!(km > 340.0 && km < 346.0);
/// ```
#[inline]
pub fn haversine_distance(p1: &TrackPoint, p2: &TrackPoint) -> f64 {
    let lat1 = p1.latitude.to_radians();
    let lat2 = p2.latitude.to_radians();
    let dlat = (p2.latitude - p1.latitude).to_radians();
    let dlon = (p2.longitude - p1.longitude).to_radians();

    let a = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    // Rounding can push `a` a hair outside [0, 1] for antipodal points
    let a = a.clamp(0.0, 1.0);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

/// Sum of consecutive haversine distances, in kilometers.
///
/// Returns 0.0 for fewer than 2 points.
pub fn total_distance(points: &[TrackPoint]) -> f64 {
    if points.len() < 2 {
        return 0.0;
    }
    points
        .windows(2)
        .map(|pair| haversine_distance(&pair[0], &pair[1]))
        .sum()
}

/// Distance from the first point to each point, in kilometers.
///
/// The result has one entry per point, starts at 0.0 and never decreases.
/// Its last element equals [`total_distance`] for the same points.
pub fn cumulative_distances(points: &[TrackPoint]) -> Vec<f64> {
    if points.is_empty() {
        return Vec::new();
    }

    let mut distances = Vec::with_capacity(points.len());
    let mut running = 0.0;
    distances.push(running);
    for pair in points.windows(2) {
        running += haversine_distance(&pair[0], &pair[1]);
        distances.push(running);
    }
    distances
}

/// Planar midpoint of a segment: the arithmetic mean of latitudes and of
/// longitudes. Not a geodesic midpoint; the error is negligible at overlap
/// threshold scale.
#[inline]
pub fn segment_midpoint(p1: &TrackPoint, p2: &TrackPoint) -> TrackPoint {
    TrackPoint::new(
        (p1.latitude + p2.latitude) / 2.0,
        (p1.longitude + p2.longitude) / 2.0,
    )
}

/// Largest latitude difference, in degrees, between two points that are at
/// most `km` apart. Exact on the sphere: the great-circle distance is never
/// shorter than the meridional separation.
#[inline]
pub fn max_latitude_delta(km: f64) -> f64 {
    (km / EARTH_RADIUS_KM).to_degrees()
}

/// Largest longitude difference, in degrees, between a point at `latitude`
/// and any point at most `km` away. Returns `None` when no bound narrower
/// than the whole globe exists (near the poles, or for very large `km`).
pub fn max_longitude_delta(km: f64, latitude: f64) -> Option<f64> {
    let dlat = max_latitude_delta(km);
    let far_lat = latitude.abs() + dlat;
    if far_lat >= 90.0 {
        return None;
    }

    // hav(d) >= cos(lat1) * cos(lat2) * sin^2(dlon / 2), with |lat2| <= far_lat
    let cos_product = latitude.to_radians().cos() * far_lat.to_radians().cos();
    let hav_d = (km / EARTH_RADIUS_KM / 2.0).sin().powi(2);
    let ratio = hav_d / cos_product;
    if !ratio.is_finite() || ratio >= 1.0 {
        return None;
    }

    let dlon = 2.0 * ratio.sqrt().asin();
    // Small safety margin against rounding at the boundary
    Some(dlon.to_degrees() * 1.000_001 + 1e-12)
}
