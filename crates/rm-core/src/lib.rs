//! `rm-core` — foundational types for the `ride_match` search engine.
//!
//! This crate is a dependency of every other `rm-*` crate.  It has no `rm-*`
//! dependencies and minimal external ones (`chrono` and `thiserror`, plus
//! optional `serde`).
//!
//! # What lives here
//!
//! | Module     | Contents                                                     |
//! |------------|--------------------------------------------------------------|
//! | [`ids`]    | `RideId`, `DriverId`                                         |
//! | [`geo`]    | `Coordinate`, haversine, point-to-segment, along-track       |
//! | [`ride`]   | `RideRoute`, `Location`, `RideStatus`                        |
//! | [`config`] | `MatchConfig` search thresholds                              |
//! | [`fare`]   | Duration and fare estimates                                  |
//! | [`error`]  | `CoreError`, `CoreResult`                                    |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod config;
pub mod error;
pub mod fare;
pub mod geo;
pub mod ids;
pub mod ride;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::MatchConfig;
pub use error::{CoreError, CoreResult};
pub use geo::Coordinate;
pub use ids::{DriverId, RideId};
pub use ride::{Location, RideRoute, RideStatus};
