//! Route matching: does one ride serve one passenger trip, and how well?
//!
//! # Decision procedure
//!
//! ```text
//! origin_dist = |pickup  ride.origin|
//! dest_dist   = |drop    ride.destination|
//!
//! exact  ⇐ origin_dist ≤ exact_km ∧ dest_dist ≤ exact_km
//!          score = 1000 − (origin_dist + dest_dist)
//! route  ⇐ seg_dist(pickup) ≤ deviation_km ∧ seg_dist(drop) ≤ deviation_km
//!          ∧ pickup projects before drop along ride.origin → ride.destination
//!          score = 500 − (seg_dist(pickup) + seg_dist(drop))
//! none   otherwise, or if the ride lacks coordinates
//! ```
//!
//! The score bands keep every exact match ahead of every route match for
//! thresholds up to 250 km.
//!
//! In [`MatchMode::Lenient`] the same endpoint distances are measured with a
//! wider threshold and a looser rule: a ride is kept if *either* endpoint is
//! within it (score `−(origin_dist + dest_dist)`), and a ride without
//! coordinates is kept unconditionally with the lowest score.

use tracing::trace;

use rm_core::geo::{distance_to_segment_km, is_before};
use rm_core::{MatchConfig, RideRoute};

use crate::{MatchResult, MatchType, PassengerTrip};

/// Score offset for exact matches.
pub const EXACT_SCORE_BASE: f64 = 1_000.0;

/// Score offset for route matches.
pub const ROUTE_SCORE_BASE: f64 = 500.0;

/// Which matching rule a [`RouteMatcher`] applies.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum MatchMode {
    /// Exact or route match required.
    Strict,
    /// Either endpoint near enough; coordinate-less rides pass.
    Lenient,
}

/// Geometry evaluator shared by the strict and lenient search paths.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RouteMatcher {
    pub mode:               MatchMode,
    /// Endpoint radius: exact-match threshold in strict mode, keep-radius in
    /// lenient mode.
    pub exact_distance_km:  f64,
    /// Maximum distance from the ride's line for a route match (strict only).
    pub route_deviation_km: f64,
}

impl RouteMatcher {
    pub fn new(mode: MatchMode, exact_distance_km: f64, route_deviation_km: f64) -> Self {
        Self { mode, exact_distance_km, route_deviation_km }
    }

    /// Strict-mode matcher: `max_distance_km` replaces the configured exact
    /// threshold when given; the route deviation is always the configured one.
    pub fn strict(config: &MatchConfig, max_distance_km: Option<f64>) -> Self {
        Self::new(
            MatchMode::Strict,
            max_distance_km.unwrap_or(config.exact_distance_km),
            config.route_deviation_km,
        )
    }

    /// Lenient-mode matcher: `max_distance_km` replaces the configured
    /// lenient radius when given.
    pub fn lenient(config: &MatchConfig, max_distance_km: Option<f64>) -> Self {
        Self::new(
            MatchMode::Lenient,
            max_distance_km.unwrap_or(config.lenient_distance_km),
            config.route_deviation_km,
        )
    }

    /// Great-circle distances pickup → ride origin and drop → ride
    /// destination.  `None` when the ride lacks coordinates.
    pub fn endpoint_distances(&self, ride: &RideRoute, trip: &PassengerTrip) -> Option<(f64, f64)> {
        let (origin, destination) = ride.segment()?;
        Some((
            trip.origin.distance_km(origin),
            trip.destination.distance_km(destination),
        ))
    }

    /// Classify and score `ride` against `trip` under this matcher's mode.
    pub fn evaluate<'a>(&self, ride: &'a RideRoute, trip: &PassengerTrip) -> MatchResult<'a> {
        match self.mode {
            MatchMode::Strict  => self.evaluate_strict(ride, trip),
            MatchMode::Lenient => self.evaluate_lenient(ride, trip),
        }
    }

    fn evaluate_lenient<'a>(&self, ride: &'a RideRoute, trip: &PassengerTrip) -> MatchResult<'a> {
        let Some((origin_dist, dest_dist)) = self.endpoint_distances(ride, trip) else {
            return MatchResult {
                ride,
                match_type: MatchType::Text,
                score: f64::NEG_INFINITY,
                origin_distance_km: 0.0,
                destination_distance_km: 0.0,
            };
        };

        if origin_dist <= self.exact_distance_km || dest_dist <= self.exact_distance_km {
            MatchResult {
                ride,
                match_type: MatchType::Text,
                score: -(origin_dist + dest_dist),
                origin_distance_km: origin_dist,
                destination_distance_km: dest_dist,
            }
        } else {
            trace!(ride = %ride.id, origin_dist, dest_dist, "outside lenient radius");
            no_match(ride, origin_dist, dest_dist)
        }
    }

    fn evaluate_strict<'a>(&self, ride: &'a RideRoute, trip: &PassengerTrip) -> MatchResult<'a> {
        let Some((start, end)) = ride.segment() else {
            trace!(ride = %ride.id, "no match: ride has no coordinates");
            return no_match(ride, 0.0, 0.0);
        };

        let origin_dist = trip.origin.distance_km(start);
        let dest_dist = trip.destination.distance_km(end);

        if origin_dist <= self.exact_distance_km && dest_dist <= self.exact_distance_km {
            trace!(ride = %ride.id, origin_dist, dest_dist, "exact match");
            return MatchResult {
                ride,
                match_type: MatchType::Exact,
                score: EXACT_SCORE_BASE - (origin_dist + dest_dist),
                origin_distance_km: origin_dist,
                destination_distance_km: dest_dist,
            };
        }

        let origin_off = distance_to_segment_km(trip.origin, start, end);
        let dest_off = distance_to_segment_km(trip.destination, start, end);

        if origin_off <= self.route_deviation_km
            && dest_off <= self.route_deviation_km
            && is_before(trip.origin, trip.destination, start, end)
        {
            trace!(ride = %ride.id, origin_off, dest_off, "route match");
            return MatchResult {
                ride,
                match_type: MatchType::Route,
                score: ROUTE_SCORE_BASE - (origin_off + dest_off),
                origin_distance_km: origin_off,
                destination_distance_km: dest_off,
            };
        }

        trace!(ride = %ride.id, origin_dist, dest_dist, origin_off, dest_off, "no match");
        no_match(ride, origin_dist, dest_dist)
    }
}

impl Default for RouteMatcher {
    fn default() -> Self {
        Self::strict(&MatchConfig::default(), None)
    }
}

fn no_match(ride: &RideRoute, origin_dist: f64, dest_dist: f64) -> MatchResult<'_> {
    MatchResult {
        ride,
        match_type: MatchType::NoMatch,
        score: 0.0,
        origin_distance_km: origin_dist,
        destination_distance_km: dest_dist,
    }
}
