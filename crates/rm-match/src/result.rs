//! Per-search match annotations.

use std::fmt;

use rm_core::RideRoute;

/// How a ride came to be in the result list.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum MatchType {
    /// Pickup and drop each close to the ride's own endpoints.
    Exact,
    /// Pickup and drop both near the ride's line, in travel order.
    Route,
    /// Kept by the lenient text path.
    Text,
    /// No geometry applied (passenger gave no usable coordinates).
    Unranked,
    NoMatch,
}

impl MatchType {
    #[inline]
    pub fn is_match(self) -> bool {
        !matches!(self, MatchType::NoMatch)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            MatchType::Exact    => "exact",
            MatchType::Route    => "route",
            MatchType::Text     => "text",
            MatchType::Unranked => "unranked",
            MatchType::NoMatch  => "none",
        }
    }
}

impl fmt::Display for MatchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A candidate ride annotated for one search call.  Higher `score` ranks
/// first; equal scores fall back to newest `created_at`, then input order.
#[derive(Clone, Debug, PartialEq)]
pub struct MatchResult<'a> {
    pub ride:                    &'a RideRoute,
    pub match_type:              MatchType,
    pub score:                   f64,
    /// Pickup distance that produced `score`: to the ride origin for exact
    /// and text matches, to the ride's line for route matches.
    pub origin_distance_km:      f64,
    /// Drop distance, measured the same way.
    pub destination_distance_km: f64,
}

impl<'a> MatchResult<'a> {
    /// A result carrying no geometry.
    pub(crate) fn unranked(ride: &'a RideRoute) -> Self {
        Self {
            ride,
            match_type: MatchType::Unranked,
            score: 0.0,
            origin_distance_km: 0.0,
            destination_distance_km: 0.0,
        }
    }
}
