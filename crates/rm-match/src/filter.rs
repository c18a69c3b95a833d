//! Seat/status precondition and free-text address filtering.
//!
//! Text terms are matched as literal, case-insensitive substrings: each term
//! is trimmed and regex-escaped before compiling, so `Sector (11)` or `a.b*c`
//! search for exactly those characters.

use regex::{Regex, RegexBuilder};
use tracing::warn;

use rm_core::RideRoute;

use crate::SearchRequest;

// ── Term matching ─────────────────────────────────────────────────────────────

/// One compiled search term.
#[derive(Clone, Debug)]
enum Term {
    Pattern(Regex),
    /// Used only if the escaped pattern exceeds the regex size limit.
    Lowercase(String),
}

impl Term {
    /// `None` for a missing or blank term.
    fn new(text: Option<&str>) -> Option<Self> {
        let text = text?.trim();
        if text.is_empty() {
            return None;
        }
        match RegexBuilder::new(&regex::escape(text)).case_insensitive(true).build() {
            Ok(re) => Some(Term::Pattern(re)),
            Err(e) => {
                warn!(error = %e, len = text.len(), "search term not compilable; using plain substring match");
                Some(Term::Lowercase(text.to_lowercase()))
            }
        }
    }

    fn is_match(&self, haystack: &str) -> bool {
        match self {
            Term::Pattern(re)      => re.is_match(haystack),
            Term::Lowercase(needle) => haystack.to_lowercase().contains(needle.as_str()),
        }
    }
}

// ── TextFilter ────────────────────────────────────────────────────────────────

/// Origin/destination address filter.  A side with no term accepts anything.
#[derive(Clone, Debug, Default)]
pub struct TextFilter {
    origin:      Option<Term>,
    destination: Option<Term>,
}

impl TextFilter {
    pub fn new(origin: Option<&str>, destination: Option<&str>) -> Self {
        Self {
            origin:      Term::new(origin),
            destination: Term::new(destination),
        }
    }

    /// `true` if neither side carries a term.
    pub fn is_empty(&self) -> bool {
        self.origin.is_none() && self.destination.is_none()
    }

    pub fn matches(&self, ride: &RideRoute) -> bool {
        self.origin.as_ref().is_none_or(|t| t.is_match(&ride.origin.address))
            && self.destination.as_ref().is_none_or(|t| t.is_match(&ride.destination.address))
    }
}

// ── CandidateFilter ───────────────────────────────────────────────────────────

/// Narrows a candidate slice for one search.  Never reorders: survivors keep
/// their input order, which is the final tie-break of every ranking.
#[derive(Clone, Debug)]
pub struct CandidateFilter {
    passengers: u32,
    text:       TextFilter,
}

impl CandidateFilter {
    pub fn new(passengers: u32, text: TextFilter) -> Self {
        Self { passengers, text }
    }

    pub fn for_request(req: &SearchRequest) -> Self {
        Self::new(
            req.passengers,
            TextFilter::new(req.origin_text.as_deref(), req.destination_text.as_deref()),
        )
    }

    pub fn text(&self) -> &TextFilter {
        &self.text
    }

    /// Active rides with enough free seats.
    pub fn eligible<'a>(&self, candidates: &'a [RideRoute]) -> Vec<&'a RideRoute> {
        candidates.iter().filter(|r| r.can_carry(self.passengers)).collect()
    }

    /// The subset of `eligible` whose addresses satisfy the text terms.
    /// Returns `eligible` unchanged when there are no terms.
    pub fn text_matches<'a>(&self, eligible: &[&'a RideRoute]) -> Vec<&'a RideRoute> {
        eligible.iter().copied().filter(|r| self.text.matches(r)).collect()
    }
}
