//! Search thresholds.
//!
//! Typically left at [`MatchConfig::default`]; applications that tune the
//! thresholds load a `MatchConfig` from JSON (feature `serde`) and call
//! [`MatchConfig::validate`] before handing it to search.

use crate::{CoreError, CoreResult};

/// Distance thresholds, in kilometres, used by ride search.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MatchConfig {
    /// Strict mode: passenger pickup and drop must each lie within this of
    /// the ride's origin and destination for an exact match.  Default: 5.
    /// A caller-supplied max distance replaces it for one search.
    pub exact_distance_km: f64,

    /// Lenient (text) mode: a ride is kept if either endpoint lies within
    /// this of the passenger's.  Default: 50.  A caller-supplied max distance
    /// replaces it for one search.
    pub lenient_distance_km: f64,

    /// Strict mode: maximum perpendicular distance from the ride's straight
    /// line for a route match.  Default: 5.  Never overridden per search.
    pub route_deviation_km: f64,
}

impl MatchConfig {
    pub const DEFAULT_EXACT_DISTANCE_KM:   f64 = 5.0;
    pub const DEFAULT_LENIENT_DISTANCE_KM: f64 = 50.0;
    pub const DEFAULT_ROUTE_DEVIATION_KM:  f64 = 5.0;

    /// Reject thresholds that are negative, NaN or infinite.
    pub fn validate(&self) -> CoreResult<()> {
        for (name, value) in [
            ("exact_distance_km",   self.exact_distance_km),
            ("lenient_distance_km", self.lenient_distance_km),
            ("route_deviation_km",  self.route_deviation_km),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(CoreError::Config(format!(
                    "{name} must be a finite, non-negative number of kilometres (got {value})"
                )));
            }
        }
        Ok(())
    }
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            exact_distance_km:   Self::DEFAULT_EXACT_DISTANCE_KM,
            lenient_distance_km: Self::DEFAULT_LENIENT_DISTANCE_KM,
            route_deviation_km:  Self::DEFAULT_ROUTE_DEVIATION_KM,
        }
    }
}
