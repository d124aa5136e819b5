//! Synthetic track pairs for testing and benchmarking.
//!
//! Generates two rides that share a known stretch of route and then part
//! ways, providing ground truth for overlap analysis. Points carry elevation
//! and timestamps so the full metrics pipeline can run on them.
//!
//! Feature-gated behind `synthetic`; not included in production builds.
//!
//! # Example
//!
//! ```rust
//! use chrono::{TimeZone, Utc};
//! use trackanalytics::TrackPoint;
//! use trackanalytics::synthetic::{RoutePattern, SyntheticPair};
//!
//! let pair = SyntheticPair {
//!     origin: TrackPoint::new(47.37, 8.55),
//!     start_time: Utc.with_ymd_and_hms(2024, 6, 1, 7, 0, 0).unwrap(),
//!     route_length_meters: 5_000.0,
//!     shared_fraction: 0.6,
//!     pattern: RoutePattern::Winding,
//!     spacing_a_meters: 10.0,
//!     spacing_b_meters: 25.0,
//!     speed_kmh: 24.0,
//!     gps_noise_sigma_meters: 3.0,
//!     seed: 42,
//! };
//!
//! let dataset = pair.generate().unwrap();
//! assert!(dataset.track_a.len() > dataset.track_b.len());
//! ```

use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::f64::consts::PI;

use crate::{Result, Track, TrackPoint};

// ============================================================================
// Types
// ============================================================================

/// Shape of the generated base route.
#[derive(Debug, Clone, Copy)]
pub enum RoutePattern {
    /// Straight line with minor perturbation.
    Straight,
    /// Winding road with realistic turns.
    Winding,
}

/// Scenario configuration for a pair of rides.
#[derive(Debug, Clone)]
pub struct SyntheticPair {
    /// Start of both rides.
    pub origin: TrackPoint,
    /// Timestamp of the first point of both rides.
    pub start_time: DateTime<Utc>,
    /// Length of each ride in meters.
    pub route_length_meters: f64,
    /// Fraction of the route both rides follow before B turns away (0.0-1.0).
    pub shared_fraction: f64,
    /// Shape of the base route.
    pub pattern: RoutePattern,
    /// Distance between recorded points of ride A, meters.
    pub spacing_a_meters: f64,
    /// Distance between recorded points of ride B, meters.
    pub spacing_b_meters: f64,
    /// Constant riding speed used for timestamps.
    pub speed_kmh: f64,
    /// GPS noise standard deviation in meters.
    pub gps_noise_sigma_meters: f64,
    /// RNG seed for deterministic reproduction.
    pub seed: u64,
}

/// A generated pair with ground truth.
#[derive(Debug, Clone)]
pub struct SyntheticDataset {
    pub track_a: Track,
    pub track_b: Track,
    /// Length of the stretch both rides follow, meters.
    pub expected_shared_meters: f64,
}

// ============================================================================
// Coordinate Helpers
// ============================================================================

/// Meters per degree of latitude (approximately constant).
const METERS_PER_DEG_LAT: f64 = 111_320.0;

/// Resolution of the underlying base route, meters.
const BASE_SPACING: f64 = 5.0;

fn meters_to_deg_lat(meters: f64) -> f64 {
    meters / METERS_PER_DEG_LAT
}

fn meters_to_deg_lng(meters: f64, latitude: f64) -> f64 {
    let meters_per_deg_lng = METERS_PER_DEG_LAT * latitude.to_radians().cos();
    if meters_per_deg_lng.abs() < 1e-10 {
        return 0.0;
    }
    meters / meters_per_deg_lng
}

fn step(from: &TrackPoint, heading: f64, meters: f64) -> TrackPoint {
    TrackPoint::new(
        from.latitude + meters_to_deg_lat(meters * heading.sin()),
        from.longitude + meters_to_deg_lng(meters * heading.cos(), from.latitude),
    )
}

// ============================================================================
// Route Generation
// ============================================================================

/// Base polyline at [`BASE_SPACING`] resolution, with the heading at each point.
fn generate_route(
    origin: &TrackPoint,
    length_meters: f64,
    pattern: RoutePattern,
    rng: &mut StdRng,
) -> Vec<(TrackPoint, f64)> {
    let num_points = (length_meters / BASE_SPACING).ceil() as usize;
    let mut route = Vec::with_capacity(num_points + 1);
    let mut heading: f64 = rng.gen_range(0.0..(2.0 * PI));
    let mut current = *origin;
    route.push((current, heading));

    for i in 0..num_points {
        heading += match pattern {
            RoutePattern::Straight => rng.gen_range(-0.01..0.01),
            RoutePattern::Winding => {
                // Gentle meander: heading sweeps back and forth by ~2 rad
                (i as f64 * 0.01).sin() * 0.01 + rng.gen_range(-0.02..0.02)
            }
        };
        current = step(&current, heading, BASE_SPACING);
        route.push((current, heading));
    }

    route
}

/// Turn off the end of `shared` and ride `remaining_meters` away from it.
fn generate_departure(
    shared: &[(TrackPoint, f64)],
    remaining_meters: f64,
    rng: &mut StdRng,
) -> Vec<(TrackPoint, f64)> {
    let Some(&(start, heading)) = shared.last() else {
        return Vec::new();
    };
    let side = if rng.r#gen::<bool>() { 1.0 } else { -1.0 };
    let mut heading = heading + side * PI / 2.0;
    let mut current = start;

    let num_points = (remaining_meters / BASE_SPACING).ceil() as usize;
    (0..num_points)
        .map(|_| {
            heading += rng.gen_range(-0.03..0.03);
            current = step(&current, heading, BASE_SPACING);
            (current, heading)
        })
        .collect()
}

/// Record a ride along `route`: one point every `spacing` meters, with noise,
/// elevation and timestamps.
fn record(
    route: &[(TrackPoint, f64)],
    spacing: f64,
    config: &SyntheticPair,
    rng: &mut StdRng,
) -> Vec<TrackPoint> {
    let every = ((spacing / BASE_SPACING).round() as usize).max(1);
    let meters_per_second = config.speed_kmh / 3.6;

    route
        .iter()
        .enumerate()
        .step_by(every)
        .map(|(i, (p, _))| {
            let along = i as f64 * BASE_SPACING;
            let noisy = add_gps_noise(p, config.gps_noise_sigma_meters, rng);
            let elevation = 400.0 + 60.0 * (along / 1500.0).sin() + rng.gen_range(-0.5..0.5);
            // Loggers stamp whole seconds
            let offset_secs = (along / meters_per_second).round() as i64;
            TrackPoint::with_elevation(noisy.latitude, noisy.longitude, elevation)
                .at(config.start_time + chrono::Duration::seconds(offset_secs))
        })
        .collect()
}

/// Add Gaussian GPS noise to a point (Box-Muller).
fn add_gps_noise(p: &TrackPoint, sigma_meters: f64, rng: &mut StdRng) -> TrackPoint {
    if sigma_meters <= 0.0 {
        return *p;
    }
    let u1: f64 = rng.gen_range(0.0001..1.0);
    let u2: f64 = rng.r#gen();
    let z0 = (-2.0 * u1.ln()).sqrt() * (2.0 * PI * u2).cos();
    let z1 = (-2.0 * u1.ln()).sqrt() * (2.0 * PI * u2).sin();

    TrackPoint::new(
        p.latitude + meters_to_deg_lat(z0 * sigma_meters),
        p.longitude + meters_to_deg_lng(z1 * sigma_meters, p.latitude),
    )
}

// ============================================================================
// Scenario Implementation
// ============================================================================

impl SyntheticPair {
    /// Generate both rides from this scenario.
    pub fn generate(&self) -> Result<SyntheticDataset> {
        let mut rng = StdRng::seed_from_u64(self.seed);

        let route = generate_route(
            &self.origin,
            self.route_length_meters,
            self.pattern,
            &mut rng,
        );

        let shared_fraction = self.shared_fraction.clamp(0.0, 1.0);
        let shared_len = ((route.len() - 1) as f64 * shared_fraction).round() as usize + 1;
        let shared = &route[..shared_len.min(route.len())];
        let remaining = self.route_length_meters - (shared.len() - 1) as f64 * BASE_SPACING;

        let mut route_b = shared.to_vec();
        route_b.extend(generate_departure(shared, remaining.max(0.0), &mut rng));

        let points_a = record(&route, self.spacing_a_meters, self, &mut rng);
        let points_b = record(&route_b, self.spacing_b_meters, self, &mut rng);

        Ok(SyntheticDataset {
            track_a: Track::new(format!("synth_a_{}", self.seed), points_a)?,
            track_b: Track::new(format!("synth_b_{}", self.seed), points_b)?,
            expected_shared_meters: (shared.len() - 1) as f64 * BASE_SPACING,
        })
    }
}
