//! The searchable ride record and its status lifecycle.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};

use crate::{Coordinate, CoreError, DriverId, RideId};

// ── RideStatus ────────────────────────────────────────────────────────────────

/// Lifecycle state of a posted ride.  Only `Active` rides are searchable.
///
/// Transitions are owned by the booking workflow; search only reads this.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum RideStatus {
    #[default]
    Active,
    Completed,
    Cancelled,
}

impl RideStatus {
    #[inline]
    pub fn is_active(self) -> bool {
        matches!(self, RideStatus::Active)
    }

    /// Lower-case label used in CSV files and API payloads.
    pub fn as_str(self) -> &'static str {
        match self {
            RideStatus::Active    => "active",
            RideStatus::Completed => "completed",
            RideStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for RideStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RideStatus {
    type Err = CoreError;

    /// Case-insensitive; surrounding whitespace is ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "active"    => Ok(RideStatus::Active),
            "completed" => Ok(RideStatus::Completed),
            "cancelled" => Ok(RideStatus::Cancelled),
            other => Err(CoreError::Parse(format!(
                "invalid ride status {other:?}: expected \"active\", \"completed\", or \"cancelled\""
            ))),
        }
    }
}

// ── Location ──────────────────────────────────────────────────────────────────

/// A named place: the address string the driver typed plus its geocoded
/// coordinate (possibly [`Coordinate::UNSET`]).
#[derive(Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Location {
    pub address: String,
    pub coord:   Coordinate,
}

impl Location {
    pub fn new(address: impl Into<String>, coord: Coordinate) -> Self {
        Self { address: address.into(), coord }
    }

    /// A location known only by its address.
    pub fn address_only(address: impl Into<String>) -> Self {
        Self::new(address, Coordinate::UNSET)
    }
}

// ── RideRoute ─────────────────────────────────────────────────────────────────

/// One posted ride, as handed to search by the ride store.
///
/// The derived trip figures (`distance_km`, `estimated_duration_minutes`,
/// `total_fare`) are filled in at posting time when both endpoints carry
/// coordinates, and stay zero otherwise.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RideRoute {
    pub id:              RideId,
    pub driver_id:       DriverId,
    pub driver_name:     String,
    pub origin:          Location,
    pub destination:     Location,
    pub available_seats: u32,
    pub status:          RideStatus,
    /// Newest-first tie-break key in every search ordering.
    pub created_at:      DateTime<Utc>,

    // ── Trip details carried from the posting ─────────────────────────────
    /// Departure time exactly as the driver entered it.
    pub departure_time:             String,
    pub fare_per_km:                f64,
    pub distance_km:                f64,
    pub estimated_duration_minutes: u32,
    pub total_fare:                 f64,
}

impl RideRoute {
    /// An active ride created now, with no id and no trip figures.
    pub fn new(
        driver_id:       DriverId,
        driver_name:     impl Into<String>,
        origin:          Location,
        destination:     Location,
        available_seats: u32,
    ) -> Self {
        Self {
            id: RideId::INVALID,
            driver_id,
            driver_name: driver_name.into(),
            origin,
            destination,
            available_seats,
            status: RideStatus::Active,
            created_at: Utc::now(),
            departure_time: String::new(),
            fare_per_km: 0.0,
            distance_km: 0.0,
            estimated_duration_minutes: 0,
            total_fare: 0.0,
        }
    }

    /// `Some((origin, destination))` when both endpoints carry real
    /// coordinates; `None` if either is the sentinel.
    pub fn segment(&self) -> Option<(Coordinate, Coordinate)> {
        Some((self.origin.coord.valid()?, self.destination.coord.valid()?))
    }

    #[inline]
    pub fn has_coordinates(&self) -> bool {
        self.segment().is_some()
    }

    /// `true` if the ride is active with at least `passengers` free seats.
    #[inline]
    pub fn can_carry(&self, passengers: u32) -> bool {
        self.status.is_active() && self.available_seats >= passengers
    }
}
