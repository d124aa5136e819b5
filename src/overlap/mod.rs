//! Route overlap between two tracks.
//!
//! Each segment of a track is classified by its midpoint: if the midpoint lies
//! within the threshold of any point of the other track, the whole segment
//! length counts as overlap, otherwise as unique. Both directions are computed
//! independently, so A-against-B and B-against-A can differ when the tracks
//! are sampled at different densities.
//!
//! Candidate points come from an R-tree ([`rtree::PointIndex`]) and every
//! decision uses the exact haversine distance, so classification is identical
//! to the exhaustive scan in [`track_overlap_exhaustive`].

pub mod rtree;

pub use rtree::PointIndex;

use log::debug;

use crate::geo_utils::{haversine_distance, segment_midpoint};
use crate::{OverlapConfig, OverlapResult, Result, Track, TrackError, TrackOverlap, TrackPoint};

/// Compare the routes of two tracks.
///
/// Fails only for a threshold that is negative or not finite. Tracks with a
/// single point have no segments and report zero overlap.
///
/// # Example
/// ```
/// use trackanalytics::{OverlapConfig, Track, TrackPoint, analyze_overlap};
///
/// let line = |lat: f64| -> Vec<TrackPoint> {
///     (0..20).map(|i| TrackPoint::new(lat + i as f64 * 0.0002, 7.0)).collect()
/// };
/// let a = Track::new("a", line(46.0)).unwrap();
/// let b = Track::new("b", line(47.0)).unwrap();
///
/// let result = analyze_overlap(&a, &b, &OverlapConfig::default()).unwrap();
/// assert_eq!(result.track_a.overlap_percent, 0.0);
/// assert_eq!(result.shared_distance_km, 0.0);
/// ```
pub fn analyze_overlap(
    track_a: &Track,
    track_b: &Track,
    config: &OverlapConfig,
) -> Result<OverlapResult> {
    let threshold_meters = config.threshold_meters;
    if !threshold_meters.is_finite() || threshold_meters < 0.0 {
        return Err(TrackError::InvalidThreshold { threshold_meters });
    }
    let threshold_km = threshold_meters / 1000.0;

    let a_on_b = track_overlap(track_a.points(), track_b.points(), threshold_km);
    let b_on_a = track_overlap(track_b.points(), track_a.points(), threshold_km);
    let shared_distance_km = (a_on_b.overlap_km + b_on_a.overlap_km) / 2.0;

    debug!(
        "[Overlap] '{}' vs '{}' at {}m: {:.1}% / {:.1}%, shared {:.3} km",
        track_a.name(),
        track_b.name(),
        threshold_meters,
        a_on_b.overlap_percent,
        b_on_a.overlap_percent,
        shared_distance_km
    );

    Ok(OverlapResult {
        track_a: a_on_b,
        track_b: b_on_a,
        shared_distance_km,
    })
}

/// Overlap of `points` measured against `other`, using an R-tree over `other`.
pub fn track_overlap(
    points: &[TrackPoint],
    other: &[TrackPoint],
    threshold_km: f64,
) -> TrackOverlap {
    if points.len() < 2 || other.is_empty() {
        return track_overlap_exhaustive(points, other, threshold_km);
    }

    let index = PointIndex::new(other);
    let classified = classify_segments(points, |mid| index.any_within(mid, threshold_km));

    let result = summarize(classified.into_iter());
    debug!(
        "[Overlap] {} segments against {} points: {:.3} of {:.3} km shared",
        points.len() - 1,
        index.len(),
        result.overlap_km,
        result.overlap_km + result.unique_km
    );
    result
}

/// Overlap of `points` measured against `other` by scanning every point of
/// `other` for every segment. O(segments x points).
pub fn track_overlap_exhaustive(
    points: &[TrackPoint],
    other: &[TrackPoint],
    threshold_km: f64,
) -> TrackOverlap {
    summarize(points.windows(2).map(|w| {
        let length = haversine_distance(&w[0], &w[1]);
        let mid = segment_midpoint(&w[0], &w[1]);
        (length, nearest_distance(&mid, other) <= threshold_km)
    }))
}

/// Minimum haversine distance from `point` to any of `points`, km.
///
/// Returns infinity for an empty slice.
pub fn nearest_distance(point: &TrackPoint, points: &[TrackPoint]) -> f64 {
    points
        .iter()
        .map(|p| haversine_distance(point, p))
        .fold(f64::INFINITY, f64::min)
}

/// (segment length, overlaps) for every consecutive pair, in track order.
#[cfg(feature = "parallel")]
fn classify_segments<F>(points: &[TrackPoint], overlaps: F) -> Vec<(f64, bool)>
where
    F: Fn(&TrackPoint) -> bool + Sync,
{
    use rayon::prelude::*;

    points
        .par_windows(2)
        .map(|w| {
            let mid = segment_midpoint(&w[0], &w[1]);
            (haversine_distance(&w[0], &w[1]), overlaps(&mid))
        })
        .collect()
}

/// (segment length, overlaps) for every consecutive pair, in track order.
#[cfg(not(feature = "parallel"))]
fn classify_segments<F>(points: &[TrackPoint], overlaps: F) -> Vec<(f64, bool)>
where
    F: Fn(&TrackPoint) -> bool,
{
    points
        .windows(2)
        .map(|w| {
            let mid = segment_midpoint(&w[0], &w[1]);
            (haversine_distance(&w[0], &w[1]), overlaps(&mid))
        })
        .collect()
}

/// Fold classified segments into totals. Sums run in segment order so the
/// parallel and sequential paths produce bit-identical results.
fn summarize(segments: impl Iterator<Item = (f64, bool)>) -> TrackOverlap {
    let mut total_km = 0.0;
    let mut overlap_km = 0.0;
    for (length, overlaps) in segments {
        total_km += length;
        if overlaps {
            overlap_km += length;
        }
    }

    let overlap_percent = if total_km > 0.0 {
        overlap_km / total_km * 100.0
    } else {
        0.0
    };

    TrackOverlap {
        overlap_km,
        overlap_percent,
        unique_km: total_km - overlap_km,
    }
}
