//! `rm-match` — ride search and route matching.
//!
//! Pure computation over a borrowed candidate slice: no I/O, no shared
//! mutable state, no suspension points.  The ride store supplies the
//! candidates; geocoding has already happened upstream.
//!
//! # Pipeline
//!
//! ```text
//! SearchRequest ─► CandidateFilter ─► Strategy::select ─► RouteMatcher ─► rank
//!                  (seats, status,     (lenient / strict   (per ride)     (score ↓,
//!                   address text)       / unranked)                        created_at ↓)
//! ```
//!
//! # Crate layout
//!
//! | Module      | Contents                                                    |
//! |-------------|-------------------------------------------------------------|
//! | [`request`] | `SearchRequest` builder, `PassengerTrip`                    |
//! | [`filter`]  | `CandidateFilter`, `TextFilter`                             |
//! | [`matcher`] | `RouteMatcher`, `MatchMode`, score band constants           |
//! | [`result`]  | `MatchResult`, `MatchType`                                  |
//! | [`search`]  | `SearchOrchestrator`, `Strategy`, free fn `search`          |
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                 |
//! |------------|--------------------------------------------------------|
//! | `parallel` | Scores candidates on Rayon's thread pool.              |

pub mod filter;
pub mod matcher;
pub mod request;
pub mod result;
pub mod search;

#[cfg(test)]
mod tests;

pub use filter::{CandidateFilter, TextFilter};
pub use matcher::{EXACT_SCORE_BASE, MatchMode, ROUTE_SCORE_BASE, RouteMatcher};
pub use request::{PassengerTrip, SearchRequest};
pub use result::{MatchResult, MatchType};
pub use search::{SearchOrchestrator, Strategy, search};
