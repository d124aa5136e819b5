//! Single-track metrics and side-by-side comparison of two tracks.

use log::debug;

use crate::elevation::elevation_metrics;
use crate::overlap::analyze_overlap;
use crate::speed::speed_metrics;
use crate::{AnalysisConfig, ComparisonResult, OverlapConfig, Result, Track, TrackMetrics};

/// Compute distance, elevation and speed metrics with default thresholds.
///
/// # Example
/// ```
/// use trackanalytics::{Track, TrackPoint, calculate_metrics};
///
/// let track = Track::new("single", vec![TrackPoint::new(46.0, 7.0)]).unwrap();
/// let metrics = calculate_metrics(&track);
/// assert_eq!(metrics.total_distance_km, 0.0);
/// assert!(metrics.elevation.is_none());
/// assert!(metrics.speed.is_none());
/// ```
pub fn calculate_metrics(track: &Track) -> TrackMetrics {
    calculate_metrics_with_config(track, &AnalysisConfig::default())
}

/// Compute distance, elevation and speed metrics.
pub fn calculate_metrics_with_config(track: &Track, config: &AnalysisConfig) -> TrackMetrics {
    let metrics = TrackMetrics {
        track_name: track.name().to_string(),
        total_distance_km: track.total_distance(),
        point_count: track.len(),
        elevation: elevation_metrics(track, config),
        speed: speed_metrics(track, config),
    };

    debug!(
        "[Metrics] '{}': {} points, {:.3} km, elevation={}, speed={}",
        metrics.track_name,
        metrics.point_count,
        metrics.total_distance_km,
        metrics.elevation.is_some(),
        metrics.speed.is_some()
    );

    metrics
}

/// Metrics for both tracks plus their route overlap.
pub fn compare_tracks(
    track_a: &Track,
    track_b: &Track,
    config: &OverlapConfig,
) -> Result<ComparisonResult> {
    let overlap = analyze_overlap(track_a, track_b, config)?;

    Ok(ComparisonResult {
        metrics_a: calculate_metrics(track_a),
        metrics_b: calculate_metrics(track_b),
        overlap,
    })
}
