//! Elevation gain/loss with a noise deadband, and elevation profiles.
//!
//! Raw GPS and barometric elevation jitters by a meter or two between samples.
//! Gain and loss are accumulated against a reference elevation that only moves
//! when a change reaches the noise threshold, so jitter adds nothing while a
//! genuine climb split by small dips is still counted in full.

use serde::{Deserialize, Serialize};

use crate::geo_utils::cumulative_distances;
use crate::{AnalysisConfig, ElevationMetrics, Track};

/// One sample of an elevation profile.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProfilePoint {
    /// Distance from the start of the track, km
    pub distance_km: f64,
    /// Elevation at that point, meters
    pub elevation_m: f64,
}

/// Compute elevation statistics for a track.
///
/// Points without elevation are skipped, not interpolated. Returns `None` when
/// no point carries elevation.
///
/// # Example
/// ```
/// use trackanalytics::{AnalysisConfig, Track, TrackPoint, elevation_metrics};
///
/// let points = [100.0, 105.0, 95.0]
///     .iter()
///     .enumerate()
///     .map(|(i, &ele)| TrackPoint::with_elevation(46.0 + i as f64 * 0.001, 7.0, ele))
///     .collect();
/// let track = Track::new("climb", points).unwrap();
///
/// let metrics = elevation_metrics(&track, &AnalysisConfig::default()).unwrap();
/// assert_eq!(metrics.total_ascent, 5.0);
/// assert_eq!(metrics.total_descent, 10.0);
/// ```
pub fn elevation_metrics(track: &Track, config: &AnalysisConfig) -> Option<ElevationMetrics> {
    if !track.has_elevation() {
        return None;
    }

    let elevations: Vec<f64> = track.points().iter().filter_map(|p| p.elevation).collect();
    let (&first, rest) = elevations.split_first()?;

    let mut total_ascent = 0.0;
    let mut total_descent = 0.0;
    let mut reference = first;
    let mut min_elevation = first;
    let mut max_elevation = first;

    for &elevation in rest {
        min_elevation = min_elevation.min(elevation);
        max_elevation = max_elevation.max(elevation);

        let diff = elevation - reference;
        if diff.abs() < config.elevation_noise_threshold_m {
            continue;
        }
        if diff > 0.0 {
            total_ascent += diff;
        } else {
            total_descent += diff.abs();
        }
        reference = elevation;
    }

    Some(ElevationMetrics {
        min_elevation,
        max_elevation,
        total_ascent,
        total_descent,
    })
}

/// Distance/elevation pairs for charting.
///
/// Every point carrying elevation contributes one sample at its cumulative
/// distance along the whole track. When there are more than `max_points`
/// samples, every `samples / max_points`-th sample is kept (the first one
/// always). `max_points == 0` disables thinning.
pub fn elevation_profile(track: &Track, max_points: usize) -> Vec<ProfilePoint> {
    let distances = cumulative_distances(track.points());

    let samples: Vec<ProfilePoint> = track
        .points()
        .iter()
        .zip(&distances)
        .filter_map(|(p, &distance_km)| {
            p.elevation.map(|elevation_m| ProfilePoint {
                distance_km,
                elevation_m,
            })
        })
        .collect();

    if max_points == 0 || samples.len() <= max_points {
        return samples;
    }

    let step = samples.len() / max_points;
    samples.into_iter().step_by(step).collect()
}
