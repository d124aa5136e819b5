//! R-tree over track points for threshold searches.

use rstar::{AABB, RTree, RTreeObject};

use crate::TrackPoint;
use crate::geo_utils::{haversine_distance, max_latitude_delta, max_longitude_delta};

use super::nearest_distance;

/// A track point with its index, for R-tree queries
#[derive(Debug, Clone, Copy)]
pub struct IndexedPoint {
    pub idx: usize,
    pub lat: f64,
    pub lng: f64,
}

impl RTreeObject for IndexedPoint {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_point([self.lat, self.lng])
    }
}

/// Build R-tree from track points
pub fn build_rtree(points: &[TrackPoint]) -> RTree<IndexedPoint> {
    let indexed: Vec<IndexedPoint> = points
        .iter()
        .enumerate()
        .map(|(i, p)| IndexedPoint {
            idx: i,
            lat: p.latitude,
            lng: p.longitude,
        })
        .collect();
    RTree::bulk_load(indexed)
}

/// Lat/lng box guaranteed to contain every point within `km` of `center`.
///
/// Returns `None` where no such box exists without wrapping: close to a pole,
/// or when the box would cross the antimeridian.
pub fn search_envelope(center: &TrackPoint, km: f64) -> Option<AABB<[f64; 2]>> {
    let dlat = max_latitude_delta(km) * 1.000_001 + 1e-12;
    let dlng = max_longitude_delta(km, center.latitude)?;

    let min_lng = center.longitude - dlng;
    let max_lng = center.longitude + dlng;
    if min_lng < -180.0 || max_lng > 180.0 {
        return None;
    }

    Some(AABB::from_corners(
        [center.latitude - dlat, min_lng],
        [center.latitude + dlat, max_lng],
    ))
}

/// Points of one track, indexed for "is anything within X km" queries.
///
/// Candidates come from the R-tree; the decision is always made on the exact
/// haversine distance, so answers match a full scan of the points.
#[derive(Debug)]
pub struct PointIndex<'a> {
    points: &'a [TrackPoint],
    tree: RTree<IndexedPoint>,
}

impl<'a> PointIndex<'a> {
    pub fn new(points: &'a [TrackPoint]) -> Self {
        Self {
            points,
            tree: build_rtree(points),
        }
    }

    /// True if some indexed point lies within `km` of `query`.
    pub fn any_within(&self, query: &TrackPoint, km: f64) -> bool {
        match search_envelope(query, km) {
            Some(envelope) => self
                .tree
                .locate_in_envelope(&envelope)
                .any(|candidate| haversine_distance(query, &self.points[candidate.idx]) <= km),
            None => nearest_distance(query, self.points) <= km,
        }
    }

    pub fn len(&self) -> usize {
        self.tree.size()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }
}
