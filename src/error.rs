//! Error types for track analysis.
//!
//! Sparse but valid data (no elevation, no timestamps, a single point) is not
//! an error: it yields absent or zero results. Only structurally invalid input
//! is rejected here.

use thiserror::Error;

/// Errors raised for input that cannot be analyzed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TrackError {
    /// A track must contain at least one point.
    #[error("track '{track}' has no points")]
    EmptyTrack { track: String },

    /// A point has non-finite or out-of-range coordinates.
    #[error("track '{track}' point {index} has invalid coordinates ({latitude}, {longitude})")]
    InvalidCoordinate {
        track: String,
        index: usize,
        latitude: f64,
        longitude: f64,
    },

    /// A point carries an elevation that is NaN or infinite.
    #[error("track '{track}' point {index} has invalid elevation {elevation}")]
    InvalidElevation {
        track: String,
        index: usize,
        elevation: f64,
    },

    /// Overlap threshold must be finite and non-negative.
    #[error("invalid overlap threshold: {threshold_meters} m")]
    InvalidThreshold { threshold_meters: f64 },
}

pub type Result<T> = std::result::Result<T, TrackError>;

/// Convert an `Option` into a [`TrackError`].
pub trait OptionExt<T> {
    fn ok_or_empty_track(self, track: &str) -> Result<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_empty_track(self, track: &str) -> Result<T> {
        self.ok_or_else(|| TrackError::EmptyTrack {
            track: track.to_string(),
        })
    }
}
