//! Search entry point: filter, pick a strategy, match, rank.
//!
//! # Strategy selection
//!
//! ```text
//! eligible   = active rides with seats ≥ passengers
//! text_hits  = eligible whose addresses contain the text terms
//!
//! passenger coords valid ∧ text given ∧ text_hits ≠ ∅   → Lenient over text_hits
//! passenger coords valid ∧ (no text ∨ text_hits = ∅)    → Strict  over eligible
//! otherwise                                            → Unranked over text_hits
//! ```
//!
//! **Lenient** keeps rides without coordinates outright and rides whose
//! origin *or* destination lies within `max_distance_km ?? 50` of the
//! passenger's; closest total distance first, coordinate-less rides last.
//!
//! **Strict** ignores the text terms entirely and keeps only exact and route
//! matches from [`RouteMatcher`], best score first.
//!
//! **Unranked** applies no geometry.
//!
//! Every ordering breaks ties by `created_at` descending, then input order.

use tracing::debug;

use rm_core::{Coordinate, MatchConfig, RideRoute};

use crate::{CandidateFilter, MatchResult, PassengerTrip, RouteMatcher, SearchRequest};

// ── Strategy ──────────────────────────────────────────────────────────────────

/// Which of the three search paths a request takes.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum Strategy {
    Lenient,
    Strict,
    Unranked,
}

impl Strategy {
    pub fn select(has_trip: bool, has_text: bool, text_hits: usize) -> Self {
        match (has_trip, has_text && text_hits > 0) {
            (true, true)  => Strategy::Lenient,
            (true, false) => Strategy::Strict,
            (false, _)    => Strategy::Unranked,
        }
    }
}

// ── SearchOrchestrator ────────────────────────────────────────────────────────

/// Ride search over a caller-supplied candidate snapshot.
///
/// Holds only configuration; every call borrows its candidates and never
/// mutates them, so one orchestrator can serve concurrent searches.
#[derive(Clone, Debug, Default)]
pub struct SearchOrchestrator {
    config: MatchConfig,
}

impl SearchOrchestrator {
    pub fn new(config: MatchConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    /// Ranked matches with their annotations.
    pub fn search_ranked<'a>(
        &self,
        candidates: &'a [RideRoute],
        req:        &SearchRequest,
    ) -> Vec<MatchResult<'a>> {
        let filter = CandidateFilter::for_request(req);
        let eligible = filter.eligible(candidates);
        let text_hits = filter.text_matches(&eligible);
        let trip = req.passenger_trip();

        let strategy = Strategy::select(trip.is_some(), !filter.text().is_empty(), text_hits.len());
        debug!(
            ?strategy,
            candidates = candidates.len(),
            eligible = eligible.len(),
            text_hits = text_hits.len(),
            "ride search"
        );

        let mut results = match (strategy, trip) {
            (Strategy::Lenient, Some(trip)) => {
                let matcher = RouteMatcher::lenient(&self.config, req.max_distance_km);
                evaluate_all(&text_hits, &matcher, &trip)
            }
            (Strategy::Strict, Some(trip)) => {
                let matcher = RouteMatcher::strict(&self.config, req.max_distance_km);
                evaluate_all(&eligible, &matcher, &trip)
            }
            _ => text_hits.into_iter().map(MatchResult::unranked).collect(),
        };

        rank(&mut results);
        debug!(results = results.len(), "ride search complete");
        results
    }

    /// Ranked rides, cloned out of the candidate slice.
    pub fn search(&self, candidates: &[RideRoute], req: &SearchRequest) -> Vec<RideRoute> {
        self.search_ranked(candidates, req)
            .into_iter()
            .map(|m| m.ride.clone())
            .collect()
    }
}

// ── Free-function entry point ─────────────────────────────────────────────────

/// Search `candidates` with default thresholds.
///
/// Equivalent to building a [`SearchRequest`] and calling
/// [`SearchOrchestrator::search`] on a default orchestrator.
pub fn search(
    candidates:        &[RideRoute],
    origin:            Option<&str>,
    destination:       Option<&str>,
    passengers:        u32,
    origin_coord:      Option<Coordinate>,
    destination_coord: Option<Coordinate>,
    max_distance_km:   Option<f64>,
) -> Vec<RideRoute> {
    let req = SearchRequest {
        origin_text: origin.map(str::to_owned),
        destination_text: destination.map(str::to_owned),
        passengers,
        origin_coord,
        destination_coord,
        max_distance_km,
    };
    SearchOrchestrator::default().search(candidates, &req)
}

// ── Internals ─────────────────────────────────────────────────────────────────

/// Score descending, then newest first.  `sort_by` is stable, so remaining
/// ties keep input order.
fn rank(results: &mut [MatchResult<'_>]) {
    results.sort_by(|a, b| {
        b.score
            .total_cmp(&a.score)
            .then_with(|| b.ride.created_at.cmp(&a.ride.created_at))
    });
}

/// Run `matcher` over `rides`, keeping matches in input order.
#[cfg(not(feature = "parallel"))]
fn evaluate_all<'a>(
    rides:   &[&'a RideRoute],
    matcher: &RouteMatcher,
    trip:    &PassengerTrip,
) -> Vec<MatchResult<'a>> {
    rides
        .iter()
        .map(|&ride| matcher.evaluate(ride, trip))
        .filter(|m| m.match_type.is_match())
        .collect()
}

#[cfg(feature = "parallel")]
fn evaluate_all<'a>(
    rides:   &[&'a RideRoute],
    matcher: &RouteMatcher,
    trip:    &PassengerTrip,
) -> Vec<MatchResult<'a>> {
    use rayon::prelude::*;
    rides
        .par_iter()
        .map(|&ride| matcher.evaluate(ride, trip))
        .filter(|m| m.match_type.is_match())
        .collect()
}
