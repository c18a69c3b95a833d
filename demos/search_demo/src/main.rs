//! search_demo — ride search over a small Ahmedabad/Gandhinagar ride board.
//!
//! Usage: `search_demo [RIDES_CSV] [MATCH_CONFIG_JSON]`
//!
//! Without arguments the embedded `data/rides.csv` and default thresholds
//! are used.  Set `RUST_LOG=debug` to see strategy selection, or
//! `RUST_LOG=rm_match=trace` for every per-ride decision.

mod synthetic;

use std::io::Cursor;
use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use rm_core::fare::{driver_earnings, remaining_payment, suggested_fare_range, upfront_payment, DEFAULT_COMMISSION_PERCENT};
use rm_core::{Coordinate, DriverId, Location, MatchConfig};
use rm_match::{SearchOrchestrator, SearchRequest};
use rm_store::{PostRide, RideStore, load_rides_csv, load_rides_reader};

// ── Constants ─────────────────────────────────────────────────────────────────

const RIDES_CSV:        &str  = include_str!("../data/rides.csv");
const SYNTHETIC_RIDES:  usize = 200;
const SEED:             u64   = 42;

const MANINAGAR:   Coordinate = Coordinate::new(23.00, 72.60);
const GANDHINAGAR: Coordinate = Coordinate::new(23.22, 72.65);
/// On the Maninagar → Gandhinagar line, about a third of the way along.
const MIDWAY:      Coordinate = Coordinate::new(23.07, 72.616);

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        ))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let mut args = std::env::args().skip(1);
    let rides_path = args.next();
    let config_path = args.next();

    // 1. Thresholds.
    let config = match &config_path {
        Some(path) => load_config(Path::new(path))?,
        None => MatchConfig::default(),
    };
    config.validate()?;
    info!(?config, "match thresholds");

    // 2. Ride board: CSV rows first, then seeded synthetic postings.
    let rides = match &rides_path {
        Some(path) => load_rides_csv(Path::new(path))?,
        None => load_rides_reader(Cursor::new(RIDES_CSV))?,
    };
    let mut store = RideStore::from_rides(rides);
    for posting in synthetic::rides(SYNTHETIC_RIDES, SEED) {
        store.post(posting)?;
    }
    println!("=== search_demo - {} rides on the board ===", store.len());
    println!();

    // 3. A driver posts a ride.
    let posted = store.post(PostRide {
        driver_id:       DriverId(99),
        driver_name:     "Nisha".into(),
        origin:          Location::new("Kalupur Ahmedabad", Coordinate::new(23.025, 72.60)),
        destination:     Location::new("Sector 11 Gandhinagar", GANDHINAGAR),
        departure_time:  "2026-03-02 07:15".into(),
        available_seats: 2,
        fare_per_km:     14.0,
    })?;
    if let Some(ride) = store.get(posted) {
        let range = suggested_fare_range(ride.distance_km);
        let earnings = driver_earnings(ride.total_fare, DEFAULT_COMMISSION_PERCENT);
        println!(
            "Posted {posted}: {:.1} km, ~{} min, fare {} (suggested {}-{}), \
             upfront {}, later {}, driver keeps {}",
            ride.distance_km,
            ride.estimated_duration_minutes,
            ride.total_fare,
            range.min,
            range.max,
            upfront_payment(ride.total_fare),
            remaining_payment(ride.total_fare),
            earnings.earnings,
        );
        println!();
    }

    // 4. Searches.
    let orchestrator = SearchOrchestrator::new(config.clone());
    let snapshot = store.snapshot();
    let scenarios = [
        (
            "exact: Maninagar -> Gandhinagar",
            SearchRequest::new(1).origin_coord(MANINAGAR).destination_coord(GANDHINAGAR),
        ),
        (
            "route: pickup midway along the corridor",
            SearchRequest::new(1).origin_coord(MIDWAY).destination_coord(GANDHINAGAR),
        ),
        (
            "lenient: text \"Ahmedabad\" plus coordinates",
            SearchRequest::new(1)
                .origin_text("Ahmedabad")
                .origin_coord(MANINAGAR)
                .destination_coord(GANDHINAGAR),
        ),
        (
            "unranked: destination text only",
            SearchRequest::new(2).destination_text("vadodara"),
        ),
        (
            "wrong direction: Gandhinagar -> Maninagar",
            SearchRequest::new(1).origin_coord(GANDHINAGAR).destination_coord(MANINAGAR),
        ),
    ];

    for (label, request) in &scenarios {
        let t0 = Instant::now();
        let results = orchestrator.search_ranked(&snapshot, request);
        println!("-- {label} ({} results, {:.2} ms)", results.len(), t0.elapsed().as_secs_f64() * 1e3);
        for m in results.iter().take(5) {
            println!(
                "   {:<12} {:<8} score {:>9.3}  {} -> {}",
                m.ride.id.to_string(),
                m.match_type.as_str(),
                m.score,
                m.ride.origin.address,
                m.ride.destination.address,
            );
        }
        println!();
    }

    // 5. Booking takes seats; a three-passenger search no longer sees the ride.
    let three = SearchRequest::new(3).origin_coord(MANINAGAR).destination_coord(GANDHINAGAR);
    let before = store.search(&three, &config).len();
    if let Some(first) = store.search(&three, &config).first().map(|r| r.id) {
        let left = store.reserve_seats(first, 1)?;
        info!(id = %first, left, "booked one seat");
    }
    let after = store.search(&three, &config).len();
    println!("3-passenger exact matches: {before} before booking, {after} after");

    Ok(())
}

fn load_config(path: &Path) -> Result<MatchConfig> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading match config {}", path.display()))?;
    let config = serde_json::from_str(&text)
        .with_context(|| format!("parsing match config {}", path.display()))?;
    Ok(config)
}
