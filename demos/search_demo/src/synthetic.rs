//! Seeded background traffic: rides scattered around a fixed corridor so
//! the demo searches run over more than a handful of candidates.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use rm_core::{Coordinate, DriverId, Location};
use rm_store::PostRide;

/// Ahmedabad city centre and Gandhinagar: the corridor every synthetic ride
/// starts and ends near.
const CORRIDOR_START: Coordinate = Coordinate::new(23.02, 72.57);
const CORRIDOR_END:   Coordinate = Coordinate::new(23.22, 72.65);

/// Half-width of the box around each corridor end, degrees (~22 km).
const JITTER_DEG: f64 = 0.2;

pub fn rides(count: usize, seed: u64) -> Vec<PostRide> {
    let mut rng = SmallRng::seed_from_u64(seed);
    (0..count)
        .map(|i| {
            let origin = jitter(&mut rng, CORRIDOR_START);
            let destination = jitter(&mut rng, CORRIDOR_END);
            PostRide {
                driver_id:       DriverId(1_000 + i as u64),
                driver_name:     format!("Driver {i}"),
                origin:          Location::new(format!("Pickup point {i}"), origin),
                destination:     Location::new(format!("Drop point {i}"), destination),
                departure_time:  format!("2026-03-02 {:02}:00", rng.gen_range(5..22)),
                available_seats: rng.gen_range(1..=4),
                fare_per_km:     rng.gen_range(12..=18) as f64,
            }
        })
        .collect()
}

fn jitter(rng: &mut SmallRng, around: Coordinate) -> Coordinate {
    Coordinate::new(
        around.lat + rng.gen_range(-JITTER_DEG..JITTER_DEG),
        around.lng + rng.gen_range(-JITTER_DEG..JITTER_DEG),
    )
}
