//! Ride posting: the driver-facing input record, its validation, and the
//! trip figures derived from it.

use rm_core::fare::{estimated_minutes, fare_for_distance};
use rm_core::{DriverId, Location, RideRoute};

use crate::{StoreError, StoreResult};

/// What a driver submits to post a ride.
#[derive(Clone, Debug, PartialEq)]
pub struct PostRide {
    pub driver_id:       DriverId,
    pub driver_name:     String,
    pub origin:          Location,
    pub destination:     Location,
    /// Free text, e.g. `"2026-03-01 08:30"`; stored as given.
    pub departure_time:  String,
    pub available_seats: u32,
    pub fare_per_km:     f64,
}

impl PostRide {
    /// Reject blank required fields, zero seats, and negative or non-finite
    /// fares.
    pub fn validate(&self) -> StoreResult<()> {
        let required = [
            ("driver name", &self.driver_name),
            ("origin address", &self.origin.address),
            ("destination address", &self.destination.address),
            ("departure time", &self.departure_time),
        ];
        if let Some((field, _)) = required.into_iter().find(|(_, v)| v.trim().is_empty()) {
            return Err(StoreError::InvalidRide(format!("{field} is required")));
        }
        if self.available_seats == 0 {
            return Err(StoreError::InvalidRide("at least one seat must be offered".into()));
        }
        if !self.fare_per_km.is_finite() || self.fare_per_km < 0.0 {
            return Err(StoreError::InvalidRide(format!(
                "fare per km must be a non-negative number, got {}",
                self.fare_per_km
            )));
        }
        Ok(())
    }

    /// Validate and build the ride record (id unassigned, created now).
    pub fn into_ride(self) -> StoreResult<RideRoute> {
        self.validate()?;
        let mut ride = RideRoute::new(
            self.driver_id,
            self.driver_name.trim(),
            self.origin,
            self.destination,
            self.available_seats,
        );
        ride.departure_time = self.departure_time;
        apply_trip_figures(&mut ride, self.fare_per_km);
        Ok(ride)
    }
}

/// Set `fare_per_km` and derive distance (0.1 km resolution), duration and
/// total fare.  Rides without coordinates keep zero figures.
pub(crate) fn apply_trip_figures(ride: &mut RideRoute, fare_per_km: f64) {
    ride.fare_per_km = fare_per_km;
    let distance_km = ride
        .segment()
        .map_or(0.0, |(origin, destination)| (origin.distance_km(destination) * 10.0).round() / 10.0);
    ride.distance_km = distance_km;
    ride.estimated_duration_minutes = estimated_minutes(distance_km);
    ride.total_fare = fare_for_distance(distance_km, fare_per_km);
}
