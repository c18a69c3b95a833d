//! Trip estimates and fare arithmetic.
//!
//! All money values are whole currency units; rounding is half away from
//! zero (`f64::round`).

/// Average city speed assumed for duration estimates.
pub const AVERAGE_SPEED_KMH: f64 = 40.0;

/// Share of the total fare a passenger pays when booking.
pub const UPFRONT_SHARE: f64 = 0.2;

/// Platform commission taken from the driver's fare, percent.
pub const DEFAULT_COMMISSION_PERCENT: f64 = 15.0;

const MIN_RATE_PER_KM:       f64 = 12.0;
const SUGGESTED_RATE_PER_KM: f64 = 15.0;
const MAX_RATE_PER_KM:       f64 = 18.0;

/// Fare for `distance_km` at `rate_per_km`.
#[inline]
pub fn fare_for_distance(distance_km: f64, rate_per_km: f64) -> f64 {
    (distance_km * rate_per_km).round()
}

/// Driving time in whole minutes at [`AVERAGE_SPEED_KMH`].
pub fn estimated_minutes(distance_km: f64) -> u32 {
    let minutes = (distance_km / AVERAGE_SPEED_KMH * 60.0).round();
    if minutes.is_finite() && minutes > 0.0 { minutes as u32 } else { 0 }
}

/// Amount due at booking time.
#[inline]
pub fn upfront_payment(total_fare: f64) -> f64 {
    (total_fare * UPFRONT_SHARE).round()
}

/// Amount due after the upfront payment.
#[inline]
pub fn remaining_payment(total_fare: f64) -> f64 {
    total_fare - upfront_payment(total_fare)
}

/// Effective rate from a total fare, to one decimal place.  Zero distance
/// yields a zero rate.
pub fn rate_per_km(total_fare: f64, distance_km: f64) -> f64 {
    if distance_km == 0.0 {
        return 0.0;
    }
    (total_fare / distance_km * 10.0).round() / 10.0
}

// ── Ranges and earnings ───────────────────────────────────────────────────────

/// Fare bounds offered to a driver when posting a ride.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FareRange {
    pub min:       f64,
    pub suggested: f64,
    pub max:       f64,
}

pub fn suggested_fare_range(distance_km: f64) -> FareRange {
    FareRange {
        min:       fare_for_distance(distance_km, MIN_RATE_PER_KM),
        suggested: fare_for_distance(distance_km, SUGGESTED_RATE_PER_KM),
        max:       fare_for_distance(distance_km, MAX_RATE_PER_KM),
    }
}

/// Split of a total fare between platform and driver.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Earnings {
    pub total_fare: f64,
    pub commission: f64,
    pub earnings:   f64,
}

pub fn driver_earnings(total_fare: f64, commission_percent: f64) -> Earnings {
    let commission = (total_fare * commission_percent / 100.0).round();
    Earnings {
        total_fare,
        commission,
        earnings: total_fare - commission,
    }
}
