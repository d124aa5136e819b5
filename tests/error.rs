//! Tests for error module

use trackanalytics::error::{OptionExt, TrackError};

#[test]
fn test_error_display() {
    let err = TrackError::InvalidCoordinate {
        track: "morning-ride".to_string(),
        index: 3,
        latitude: 91.0,
        longitude: 7.0,
    };
    let message = err.to_string();
    assert!(message.contains("morning-ride"));
    assert!(message.contains("point 3"));
    assert!(message.contains("91"));
}

#[test]
fn test_empty_track_display() {
    let err = TrackError::EmptyTrack {
        track: "blank".to_string(),
    };
    assert_eq!(err.to_string(), "track 'blank' has no points");
}

#[test]
fn test_invalid_elevation_display() {
    let err = TrackError::InvalidElevation {
        track: "hill".to_string(),
        index: 4,
        elevation: f64::NAN,
    };
    assert_eq!(err.to_string(), "track 'hill' point 4 has invalid elevation NaN");
}

#[test]
fn test_option_ext() {
    let none: Option<i32> = None;
    let result = none.ok_or_empty_track("test");
    assert!(matches!(result, Err(TrackError::EmptyTrack { .. })));

    assert_eq!(Some(5).ok_or_empty_track("test"), Ok(5));
}
