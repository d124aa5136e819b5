//! Duration and speed statistics with glitch rejection.
//!
//! Rates are computed on whole elapsed seconds between timestamps. Segments
//! implying an implausible speed are treated as GPS or clock glitches and
//! dropped from max speed and moving totals, but the overall average still uses
//! the whole-track distance over the whole duration.

use chrono::{DateTime, Utc};
use log::debug;
use std::time::Duration;

use crate::geo_utils::{haversine_distance, total_distance};
use crate::{AnalysisConfig, SpeedMetrics, Track, TrackPoint};

const SECONDS_PER_HOUR: f64 = 3600.0;

/// Compute speed statistics for a track.
///
/// Returns `None` when fewer than two points carry a timestamp, or when the
/// earliest and latest timestamps are less than one whole second apart. A
/// non-zero span under one second is treated the same as a zero span: rates
/// are taken over whole seconds, so such a track has no usable duration.
///
/// # Example
/// ```
/// use chrono::{TimeZone, Utc};
/// use trackanalytics::{AnalysisConfig, Track, TrackPoint, speed_metrics};
///
/// let start = Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).unwrap();
/// let points = vec![
///     TrackPoint::new(46.0, 7.0).at(start),
///     TrackPoint::new(46.0, 7.0).at(start + chrono::Duration::minutes(10)),
/// ];
/// let track = Track::new("standing still", points).unwrap();
///
/// let speed = speed_metrics(&track, &AnalysisConfig::default()).unwrap();
/// assert_eq!(speed.duration.as_secs(), 600);
/// assert_eq!(speed.moving_time.as_secs(), 0);
/// ```
pub fn speed_metrics(track: &Track, config: &AnalysisConfig) -> Option<SpeedMetrics> {
    if !track.has_timestamps() || track.len() < 2 {
        return None;
    }

    let timed = time_sorted(track.points());
    if timed.len() < 2 {
        return None;
    }

    let (start, _) = timed[0];
    let (end, _) = timed[timed.len() - 1];
    let elapsed = end - start;
    let elapsed_secs = elapsed.num_seconds();
    if elapsed_secs <= 0 {
        return None;
    }
    let duration = elapsed.to_std().ok()?;

    let avg_speed_kmh = total_distance(track.points()) / elapsed_secs as f64 * SECONDS_PER_HOUR;

    let mut max_speed_kmh: f64 = 0.0;
    let mut moving_secs: u64 = 0;
    let mut moving_km = 0.0;
    let mut glitches = 0usize;

    for pair in timed.windows(2) {
        let (t1, p1) = pair[0];
        let (t2, p2) = pair[1];

        let segment_secs = (t2 - t1).num_seconds();
        if segment_secs <= 0 {
            continue;
        }

        let segment_km = haversine_distance(p1, p2);
        let segment_speed = segment_km / segment_secs as f64 * SECONDS_PER_HOUR;

        if segment_speed > config.max_realistic_speed_kmh {
            glitches += 1;
            continue;
        }

        max_speed_kmh = max_speed_kmh.max(segment_speed);

        if segment_speed >= config.min_moving_speed_kmh {
            moving_secs += segment_secs as u64;
            moving_km += segment_km;
        }
    }

    if glitches > 0 {
        debug!(
            "[Speed] '{}': discarded {} segments above {} km/h",
            track.name(),
            glitches,
            config.max_realistic_speed_kmh
        );
    }

    let avg_moving_speed_kmh = if moving_secs > 0 {
        moving_km / moving_secs as f64 * SECONDS_PER_HOUR
    } else {
        0.0
    };

    Some(SpeedMetrics {
        duration,
        avg_speed_kmh,
        max_speed_kmh,
        moving_time: Duration::from_secs(moving_secs),
        avg_moving_speed_kmh,
    })
}

/// Timestamped points, stably sorted by time.
fn time_sorted(points: &[TrackPoint]) -> Vec<(DateTime<Utc>, &TrackPoint)> {
    let mut timed: Vec<(DateTime<Utc>, &TrackPoint)> = points
        .iter()
        .filter_map(|p| p.time.map(|t| (t, p)))
        .collect();
    timed.sort_by_key(|(t, _)| *t);
    timed
}
