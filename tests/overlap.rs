//! Tests for overlap module

use trackanalytics::geo_utils::segment_midpoint;
use trackanalytics::overlap::{
    PointIndex, nearest_distance, track_overlap, track_overlap_exhaustive,
};
use trackanalytics::{OverlapConfig, Track, TrackError, TrackPoint, analyze_overlap};

/// ~11 m between points, northward.
fn line(name: &str, start_lat: f64, lng: f64, points: usize) -> Track {
    let points = (0..points)
        .map(|i| TrackPoint::new(start_lat + i as f64 * 0.0001, lng))
        .collect();
    Track::new(name, points).unwrap()
}

fn overlap(a: &Track, b: &Track) -> trackanalytics::OverlapResult {
    analyze_overlap(a, b, &OverlapConfig::default()).unwrap()
}

#[test]
fn test_self_overlap_is_complete() {
    let track = line("loop", 51.5074, -0.1278, 200);
    let result = overlap(&track, &track);

    assert_eq!(result.track_a.overlap_percent, 100.0);
    assert_eq!(result.track_b.overlap_percent, 100.0);
    assert_eq!(result.track_a.unique_km, 0.0);
    assert_eq!(result.track_b.unique_km, 0.0);
    assert!((result.shared_distance_km - track.total_distance()).abs() < 1e-12);
}

#[test]
fn test_distant_tracks_do_not_overlap() {
    let london = line("london", 51.5074, -0.1278, 50);
    let nyc = line("nyc", 40.7128, -74.0060, 50);
    let result = overlap(&london, &nyc);

    assert_eq!(result.track_a.overlap_percent, 0.0);
    assert_eq!(result.track_b.overlap_percent, 0.0);
    assert_eq!(result.shared_distance_km, 0.0);
    assert!((result.track_a.unique_km - london.total_distance()).abs() < 1e-12);
}

#[test]
fn test_parallel_tracks_within_threshold() {
    // 0.0004 deg of longitude at 46N is about 31 m
    let a = line("a", 46.0, 7.0, 100);
    let b = line("b", 46.0, 7.0004, 100);
    let result = overlap(&a, &b);
    assert_eq!(result.track_a.overlap_percent, 100.0);
    assert_eq!(result.track_b.overlap_percent, 100.0);
}

#[test]
fn test_parallel_tracks_beyond_threshold() {
    // 0.001 deg of longitude at 46N is about 77 m
    let a = line("a", 46.0, 7.0, 100);
    let b = line("b", 46.0, 7.001, 100);
    let result = overlap(&a, &b);
    assert_eq!(result.track_a.overlap_km, 0.0);
    assert_eq!(result.track_b.overlap_km, 0.0);
}

#[test]
fn test_partial_overlap_split() {
    // B follows the first half of A, then keeps going
    let a = line("a", 46.0, 7.0, 101);
    let b = line("b", 46.005, 7.0, 101);
    let result = overlap(&a, &b);

    let a_total = a.total_distance();
    assert!((result.track_a.overlap_km + result.track_a.unique_km - a_total).abs() < 1e-12);
    assert!(result.track_a.overlap_percent > 45.0 && result.track_a.overlap_percent < 60.0);
    assert!(result.track_b.overlap_percent > 45.0 && result.track_b.overlap_percent < 60.0);
    assert_eq!(
        result.shared_distance_km,
        (result.track_a.overlap_km + result.track_b.overlap_km) / 2.0
    );
}

#[test]
fn test_directions_differ_with_sampling_density() {
    // A is densely sampled, B has long segments whose midpoints still land on A
    let a = line("dense", 46.0, 7.0, 201);
    let b_points = (0..5)
        .map(|i| TrackPoint::new(46.0 + i as f64 * 0.005, 7.0))
        .collect();
    let b = Track::new("sparse", b_points).unwrap();
    let result = overlap(&a, &b);

    // A's midpoints are up to ~280 m from B's sparse points
    assert!(result.track_a.overlap_percent < 50.0);
    assert_eq!(result.track_b.overlap_percent, 100.0);
}

#[test]
fn test_single_point_tracks() {
    let single = Track::new("one", vec![TrackPoint::new(46.0, 7.0)]).unwrap();
    let other = line("other", 46.0, 7.0, 20);

    let result = overlap(&single, &other);
    assert_eq!(result.track_a.overlap_km, 0.0);
    assert_eq!(result.track_a.overlap_percent, 0.0);
    assert_eq!(result.track_a.unique_km, 0.0);
    // Every midpoint of `other` near its start is within 50 m of the single point
    assert!(result.track_b.overlap_percent > 0.0);

    let both = overlap(&single, &single);
    assert_eq!(both.track_a.overlap_percent, 0.0);
    assert_eq!(both.track_b.overlap_percent, 0.0);
    assert_eq!(both.shared_distance_km, 0.0);
}

#[test]
fn test_invalid_threshold_rejected() {
    let a = line("a", 46.0, 7.0, 10);
    for threshold_meters in [-1.0, f64::NAN, f64::INFINITY] {
        let err = analyze_overlap(&a, &a, &OverlapConfig { threshold_meters }).unwrap_err();
        assert!(matches!(err, TrackError::InvalidThreshold { .. }));
    }
}

#[test]
fn test_threshold_is_inclusive() {
    let a = line("a", 46.0, 7.0, 2);
    let midpoint = segment_midpoint(&a.points()[0], &a.points()[1]);
    let probe = TrackPoint::new(46.00005, 7.0005);
    let exact_km = nearest_distance(&midpoint, &[probe]);

    let hit = track_overlap(a.points(), &[probe], exact_km);
    assert_eq!(hit.overlap_percent, 100.0);

    let miss = track_overlap(a.points(), &[probe], exact_km * 0.999);
    assert_eq!(miss.overlap_percent, 0.0);
}

#[test]
fn test_nearest_distance() {
    let target = TrackPoint::new(46.0, 7.0);
    let points = [
        TrackPoint::new(46.01, 7.0),
        TrackPoint::new(46.001, 7.0),
        TrackPoint::new(45.9, 7.0),
    ];
    let nearest = nearest_distance(&target, &points);
    assert!((nearest - 0.1112).abs() < 0.001);
    assert_eq!(nearest_distance(&target, &[]), f64::INFINITY);
}

#[test]
fn test_index_agrees_with_scan() {
    // Zig-zag track against a straight one at several thresholds
    let zigzag: Vec<TrackPoint> = (0..300)
        .map(|i| {
            let wiggle = if i % 2 == 0 { 0.0 } else { 0.0006 };
            let drift = (i as f64 * 0.05).sin() * 0.002;
            TrackPoint::new(60.0 + i as f64 * 0.00015, 10.0 + wiggle + drift)
        })
        .collect();
    let straight = line("straight", 60.0, 10.0, 450);

    for threshold_km in [0.0, 0.01, 0.025, 0.05, 0.1, 0.5] {
        assert_eq!(
            track_overlap(&zigzag, straight.points(), threshold_km),
            track_overlap_exhaustive(&zigzag, straight.points(), threshold_km)
        );
        assert_eq!(
            track_overlap(straight.points(), &zigzag, threshold_km),
            track_overlap_exhaustive(straight.points(), &zigzag, threshold_km)
        );
    }
}

#[test]
fn test_point_index_any_within() {
    let track = line("indexed", 46.0, 7.0, 10);
    let index = PointIndex::new(track.points());
    assert_eq!(index.len(), 10);
    assert!(!index.is_empty());

    assert!(index.any_within(&TrackPoint::new(46.0005, 7.0003), 0.05));
    assert!(!index.any_within(&TrackPoint::new(46.0005, 7.01), 0.05));
}

#[test]
fn test_idempotent() {
    let a = line("a", 46.0, 7.0, 100);
    let b = line("b", 46.003, 7.0002, 100);
    assert_eq!(overlap(&a, &b), overlap(&a, &b));
}
