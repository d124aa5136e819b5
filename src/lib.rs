//! # Track Analytics
//!
//! Comparative trip metrics for a pair of recorded GPS tracks.
//!
//! This library provides:
//! - Great-circle distance and cumulative-distance sequences (haversine)
//! - Noise-filtered elevation gain/loss and elevation profiles
//! - Duration, average/moving/max speed with glitch rejection
//! - Route overlap between two tracks, classified per segment in both directions
//!
//! Every entry point is a pure function of its inputs: no I/O, no shared state.
//! Parsing track files and presenting the results are left to the caller.
//!
//! ## Features
//!
//! - **`parallel`** - Classify overlap segments in parallel with rayon (default)
//! - **`synthetic`** - Seeded synthetic track pairs for tests and benchmarks
//!
//! ## Quick Start
//!
//! ```rust
//! use trackanalytics::{OverlapConfig, Track, TrackPoint, analyze_overlap, calculate_metrics};
//!
//! let points = vec![
//!     TrackPoint::with_elevation(51.5074, -0.1278, 12.0),
//!     TrackPoint::with_elevation(51.5077, -0.1282, 15.0),
//!     TrackPoint::with_elevation(51.5080, -0.1286, 21.0),
//! ];
//! let morning = Track::new("morning", points.clone()).unwrap();
//! let evening = Track::new("evening", points).unwrap();
//!
//! let metrics = calculate_metrics(&morning);
//! assert!(metrics.total_distance_km > 0.0);
//!
//! let overlap = analyze_overlap(&morning, &evening, &OverlapConfig::default()).unwrap();
//! assert!(overlap.track_a.overlap_percent > 99.0);
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

// Unified error handling
pub mod error;
pub use error::{OptionExt, Result, TrackError};

// Geographic utilities (haversine, cumulative distance, search deltas)
pub mod geo_utils;
pub use geo_utils::cumulative_distances;

// Elevation gain/loss and profiles
pub mod elevation;
pub use elevation::{ProfilePoint, elevation_metrics, elevation_profile};

// Duration and speed statistics
pub mod speed;
pub use speed::speed_metrics;

// Route overlap between two tracks
pub mod overlap;
pub use overlap::analyze_overlap;

// Single-track metrics and two-track comparison
pub mod analyzer;
pub use analyzer::{calculate_metrics, calculate_metrics_with_config, compare_tracks};

// Synthetic track pairs with known shared distance
#[cfg(feature = "synthetic")]
pub mod synthetic;

// ============================================================================
// Core Types
// ============================================================================

/// One GPS sample.
///
/// # Example
/// ```
/// use trackanalytics::TrackPoint;
/// let point = TrackPoint::new(51.5074, -0.1278); // London
/// assert!(point.is_valid());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrackPoint {
    pub latitude: f64,
    pub longitude: f64,
    /// Elevation in meters, absent when the device did not record it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub elevation: Option<f64>,
    /// Capture time, absent when the file did not record it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<DateTime<Utc>>,
}

impl TrackPoint {
    /// Create a point with coordinates only.
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            elevation: None,
            time: None,
        }
    }

    /// Create a point with elevation.
    pub fn with_elevation(latitude: f64, longitude: f64, elevation: f64) -> Self {
        Self {
            latitude,
            longitude,
            elevation: Some(elevation),
            time: None,
        }
    }

    /// Attach a capture time to this point.
    pub fn at(self, time: DateTime<Utc>) -> Self {
        Self {
            time: Some(time),
            ..self
        }
    }

    /// Check if the point has valid coordinates.
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && self.latitude >= -90.0
            && self.latitude <= 90.0
            && self.longitude >= -180.0
            && self.longitude <= 180.0
    }
}

/// A named, non-empty sequence of points in recording order.
///
/// Points are not required to be time-sorted; timestamps may be missing or,
/// in malformed input, out of order. Construction goes through [`Track::new`],
/// which rejects empty tracks, invalid coordinates and non-finite elevations.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Track {
    name: String,
    points: Vec<TrackPoint>,
}

impl Track {
    /// Build a track, validating that it has at least one point, that every
    /// point carries well-formed coordinates and that recorded elevations are
    /// finite.
    ///
    /// # Example
    /// ```
    /// use trackanalytics::{Track, TrackError, TrackPoint};
    ///
    /// assert!(Track::new("ok", vec![TrackPoint::new(46.0, 7.0)]).is_ok());
    /// assert!(matches!(Track::new("empty", vec![]), Err(TrackError::EmptyTrack { .. })));
    /// ```
    pub fn new(name: impl Into<String>, points: Vec<TrackPoint>) -> Result<Self> {
        let name = name.into();
        points.first().ok_or_empty_track(&name)?;

        if let Some((index, p)) = points.iter().enumerate().find(|(_, p)| !p.is_valid()) {
            return Err(TrackError::InvalidCoordinate {
                track: name,
                index,
                latitude: p.latitude,
                longitude: p.longitude,
            });
        }

        let bad_elevation = points
            .iter()
            .enumerate()
            .find_map(|(i, p)| p.elevation.filter(|e| !e.is_finite()).map(|e| (i, e)));
        if let Some((index, elevation)) = bad_elevation {
            return Err(TrackError::InvalidElevation {
                track: name,
                index,
                elevation,
            });
        }

        Ok(Self { name, points })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn points(&self) -> &[TrackPoint] {
        &self.points
    }

    /// Number of points (always at least 1).
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always false; kept for API symmetry with slices.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// True if any point carries an elevation.
    pub fn has_elevation(&self) -> bool {
        self.points.iter().any(|p| p.elevation.is_some())
    }

    /// True if any point carries a timestamp.
    pub fn has_timestamps(&self) -> bool {
        self.points.iter().any(|p| p.time.is_some())
    }

    /// Total length in kilometers.
    pub fn total_distance(&self) -> f64 {
        geo_utils::total_distance(&self.points)
    }

    /// Distance from the first point to each point, in kilometers.
    pub fn cumulative_distances(&self) -> Vec<f64> {
        geo_utils::cumulative_distances(&self.points)
    }
}

// ============================================================================
// Configuration
// ============================================================================

/// Thresholds for single-track metrics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Minimum elevation change counted as genuine ascent/descent.
    /// Smaller changes are sensor jitter and do not move the reference.
    /// Default: 2.0 meters
    pub elevation_noise_threshold_m: f64,

    /// Segments at or above this speed count toward moving time.
    /// Default: 1.0 km/h
    pub min_moving_speed_kmh: f64,

    /// Segments faster than this are GPS/timestamp glitches and are discarded
    /// from max speed and moving totals.
    /// Default: 200.0 km/h
    pub max_realistic_speed_kmh: f64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            elevation_noise_threshold_m: 2.0,
            min_moving_speed_kmh: 1.0,
            max_realistic_speed_kmh: 200.0,
        }
    }
}

/// Configuration for route overlap analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverlapConfig {
    /// A segment overlaps when its midpoint lies within this distance of any
    /// point of the other track.
    /// Default: 50.0 meters
    pub threshold_meters: f64,
}

impl Default for OverlapConfig {
    fn default() -> Self {
        Self {
            threshold_meters: 50.0,
        }
    }
}

// ============================================================================
// Result Types
// ============================================================================

/// Elevation statistics for a track.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ElevationMetrics {
    /// Lowest recorded elevation in meters (unfiltered)
    pub min_elevation: f64,
    /// Highest recorded elevation in meters (unfiltered)
    pub max_elevation: f64,
    /// Total ascent in meters after the noise deadband
    pub total_ascent: f64,
    /// Total descent in meters after the noise deadband
    pub total_descent: f64,
}

impl ElevationMetrics {
    pub fn elevation_range(&self) -> f64 {
        self.max_elevation - self.min_elevation
    }
}

/// Speed statistics for a track.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpeedMetrics {
    /// Time between the earliest and latest timestamp
    pub duration: Duration,
    /// Whole-track distance over duration, km/h
    pub avg_speed_kmh: f64,
    /// Fastest plausible segment, km/h
    pub max_speed_kmh: f64,
    /// Time spent in segments at or above the moving threshold
    pub moving_time: Duration,
    /// Moving distance over moving time, km/h (0 if never moving)
    pub avg_moving_speed_kmh: f64,
}

/// Aggregate metrics for one track.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackMetrics {
    pub track_name: String,
    /// Total distance in kilometers
    pub total_distance_km: f64,
    pub point_count: usize,
    /// Absent when no point carries elevation
    pub elevation: Option<ElevationMetrics>,
    /// Absent when fewer than two points carry distinct timestamps
    pub speed: Option<SpeedMetrics>,
}

/// Overlap figures for one track measured against the other.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TrackOverlap {
    /// Length of this track's segments lying on the other track, km
    pub overlap_km: f64,
    /// `overlap_km` as a percentage of this track's own length
    pub overlap_percent: f64,
    /// Length of this track's segments away from the other track, km
    pub unique_km: f64,
}

/// Result of comparing the routes of two tracks.
///
/// The two directions are computed independently and need not agree, since
/// segment granularity differs between tracks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OverlapResult {
    /// Track A measured against track B
    pub track_a: TrackOverlap,
    /// Track B measured against track A
    pub track_b: TrackOverlap,
    /// Average of both directions' overlap lengths, km
    pub shared_distance_km: f64,
}

/// Full side-by-side comparison of two tracks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonResult {
    pub metrics_a: TrackMetrics,
    pub metrics_b: TrackMetrics,
    pub overlap: OverlapResult,
}
