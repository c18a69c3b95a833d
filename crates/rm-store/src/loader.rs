//! CSV ride loader.
//!
//! # CSV format
//!
//! One row per posted ride.
//!
//! ```csv
//! ride_id,driver_id,driver_name,origin_address,origin_lat,origin_lng,destination_address,destination_lat,destination_lng,available_seats,status,created_at,departure_time,fare_per_km
//! 1,10,Asha,Maninagar Ahmedabad,23.0,72.6,Gandhinagar Sector 11,23.22,72.65,3,active,2026-03-01T08:00:00Z,08:30,12
//! ,11,Ravi,Satellite Ahmedabad,,,Vadodara,,,2,active,2026-03-01T09:00:00Z,10:00,15
//! ```
//!
//! | Column                      | Notes                                                     |
//! |-----------------------------|-----------------------------------------------------------|
//! | `ride_id`                   | Optional; empty rows get an id when inserted into a store. `u64::MAX` is reserved |
//! | `*_lat`, `*_lng`            | Optional; empty cells load as the (0, 0) sentinel         |
//! | `status`                    | `active`, `completed`, or `cancelled` (case-insensitive)  |
//! | `created_at`                | RFC 3339 timestamp                                        |
//! | `fare_per_km`               | Optional; defaults to 0                                   |
//!
//! Malformed records surface as [`StoreError::Csv`] and unknown statuses as
//! [`StoreError::Core`]; other bad values are [`StoreError::Parse`] naming
//! the file line.
//!
//! Trip figures (`distance_km`, duration, total fare) are derived on load
//! from the coordinates and `fare_per_km`, the same way posting does.

use std::io::Read;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::info;

use rm_core::{Coordinate, DriverId, Location, RideId, RideRoute, RideStatus};

use crate::post::apply_trip_figures;
use crate::StoreError;

// ── CSV record ────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct RideRecord {
    ride_id:             Option<u64>,
    driver_id:           u64,
    driver_name:         String,
    origin_address:      String,
    origin_lat:          Option<f64>,
    origin_lng:          Option<f64>,
    destination_address: String,
    destination_lat:     Option<f64>,
    destination_lng:     Option<f64>,
    available_seats:     u32,
    status:              String,
    created_at:          String,
    departure_time:      String,
    fare_per_km:         Option<f64>,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load rides from a CSV file, in file order.
pub fn load_rides_csv(path: &Path) -> Result<Vec<RideRoute>, StoreError> {
    let file = std::fs::File::open(path)
        .map_err(StoreError::Io)?;
    let rides = load_rides_reader(file)?;
    info!(path = %path.display(), rides = rides.len(), "loaded ride CSV");
    Ok(rides)
}

/// Like [`load_rides_csv`] but accepts any `Read` source.
pub fn load_rides_reader<R: Read>(reader: R) -> Result<Vec<RideRoute>, StoreError> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut rides = Vec::new();

    for (row, result) in csv_reader.deserialize::<RideRecord>().enumerate() {
        let record = result?;
        // Row 1 is the header.
        rides.push(into_ride(record, row + 2)?);
    }

    Ok(rides)
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn into_ride(r: RideRecord, line: usize) -> Result<RideRoute, StoreError> {
    let row_error = |msg: String| StoreError::Parse(format!("row {line}: {msg}"));

    let status: RideStatus = r.status.parse()?;
    let created_at = parse_timestamp(&r.created_at).map_err(row_error)?;

    let fare_per_km = r.fare_per_km.unwrap_or(0.0);
    if !fare_per_km.is_finite() || fare_per_km < 0.0 {
        return Err(row_error(format!("fare_per_km must be a non-negative number, got {fare_per_km}")));
    }

    let id = r.ride_id.map_or(RideId::INVALID, RideId);
    if r.ride_id.is_some() && !id.is_valid() {
        return Err(row_error(format!("ride_id {} is reserved", id.0)));
    }

    let mut ride = RideRoute::new(
        DriverId(r.driver_id),
        r.driver_name,
        location(r.origin_address, r.origin_lat, r.origin_lng),
        location(r.destination_address, r.destination_lat, r.destination_lng),
        r.available_seats,
    );
    ride.id = id;
    ride.status = status;
    ride.created_at = created_at;
    ride.departure_time = r.departure_time;
    apply_trip_figures(&mut ride, fare_per_km);
    Ok(ride)
}

fn location(address: String, lat: Option<f64>, lng: Option<f64>) -> Location {
    Location::new(address, Coordinate::from_parts(lat, lng).unwrap_or(Coordinate::UNSET))
}

fn parse_timestamp(s: &str) -> Result<DateTime<Utc>, String> {
    DateTime::parse_from_rfc3339(s.trim())
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| format!("invalid created_at {s:?}: {e}"))
}
