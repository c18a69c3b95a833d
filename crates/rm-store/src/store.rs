//! In-memory ride store.
//!
//! Rides live in a `Vec` in insertion order with an `FxHashMap` index from
//! `RideId` to slot.  Insertion order is what search sees as "input order",
//! the last tie-break of every ranking.
//!
//! The store is a plain owned value; callers that share it across threads
//! wrap it in their own lock and search a [`RideStore::snapshot`].

use rustc_hash::FxHashMap;
use tracing::{debug, info, warn};

use rm_core::{DriverId, MatchConfig, RideId, RideRoute, RideStatus};
use rm_match::{SearchOrchestrator, SearchRequest};

use crate::{PostRide, StoreError, StoreResult};

#[derive(Clone, Debug, Default)]
pub struct RideStore {
    rides:   Vec<RideRoute>,
    index:   FxHashMap<RideId, usize>,
    next_id: u64,
}

impl RideStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from loaded rides, in order.  See [`RideStore::insert`]
    /// for id handling.
    pub fn from_rides(rides: impl IntoIterator<Item = RideRoute>) -> Self {
        let mut store = Self::new();
        for ride in rides {
            store.insert(ride);
        }
        info!(rides = store.len(), "ride store populated");
        store
    }

    /// Add a ride and return its id.
    ///
    /// A ride that already carries a valid, unused id keeps it; otherwise the
    /// next sequential id is assigned.  Once the sequence reaches
    /// [`RideId::INVALID`] the lowest unused id is taken instead.
    pub fn insert(&mut self, mut ride: RideRoute) -> RideId {
        if !ride.id.is_valid() || self.index.contains_key(&ride.id) {
            if ride.id.is_valid() {
                warn!(id = %ride.id, "duplicate ride id; assigning a new one");
            }
            ride.id = self.allocate_id();
        }
        self.next_id = self.next_id.max(ride.id.0.saturating_add(1));

        let id = ride.id;
        self.index.insert(id, self.rides.len());
        self.rides.push(ride);
        id
    }

    /// Validate a driver's posting, derive its trip figures, and store it.
    pub fn post(&mut self, request: PostRide) -> StoreResult<RideId> {
        let ride = request.into_ride().inspect_err(|e| {
            warn!(error = %e, "ride posting rejected");
        })?;
        let id = self.insert(ride);
        info!(%id, "ride posted");
        Ok(id)
    }

    pub fn get(&self, id: RideId) -> Option<&RideRoute> {
        self.index.get(&id).map(|&slot| &self.rides[slot])
    }

    pub fn set_status(&mut self, id: RideId, status: RideStatus) -> StoreResult<()> {
        let ride = self.get_mut(id)?;
        debug!(%id, from = %ride.status, to = %status, "ride status change");
        ride.status = status;
        Ok(())
    }

    /// Take `seats` from an active ride's free seats; returns the seats left.
    pub fn reserve_seats(&mut self, id: RideId, seats: u32) -> StoreResult<u32> {
        let ride = self.get_mut(id)?;
        if !ride.status.is_active() {
            return Err(StoreError::NotActive { id, status: ride.status });
        }
        if seats > ride.available_seats {
            return Err(StoreError::InsufficientSeats {
                id,
                requested: seats,
                available: ride.available_seats,
            });
        }
        ride.available_seats -= seats;
        debug!(%id, seats, left = ride.available_seats, "seats reserved");
        Ok(ride.available_seats)
    }

    /// Give `seats` back to a ride, e.g. after a booking is cancelled.
    pub fn release_seats(&mut self, id: RideId, seats: u32) -> StoreResult<u32> {
        let ride = self.get_mut(id)?;
        ride.available_seats = ride.available_seats.saturating_add(seats);
        Ok(ride.available_seats)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.rides.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rides.is_empty()
    }

    /// Rides in insertion order.
    pub fn rides(&self) -> &[RideRoute] {
        &self.rides
    }

    /// An owned copy of every ride, in insertion order.
    pub fn snapshot(&self) -> Vec<RideRoute> {
        self.rides.clone()
    }

    /// Rides posted by one driver, in insertion order.
    pub fn by_driver(&self, driver_id: DriverId) -> impl Iterator<Item = &RideRoute> {
        self.rides.iter().filter(move |r| r.driver_id == driver_id)
    }

    /// Run a ride search over the stored rides.
    pub fn search(&self, request: &SearchRequest, config: &MatchConfig) -> Vec<RideRoute> {
        SearchOrchestrator::new(config.clone()).search(&self.rides, request)
    }

    // ── Internals ─────────────────────────────────────────────────────────

    /// A valid id not yet in the index.  `next_id` is above every stored id
    /// unless it has saturated at `INVALID`.
    fn allocate_id(&self) -> RideId {
        let next = RideId(self.next_id);
        if next.is_valid() {
            return next;
        }
        // Fewer than u64::MAX rides are stored, so a gap exists below len + 1.
        (0..=self.rides.len() as u64)
            .map(RideId)
            .find(|id| !self.index.contains_key(id))
            .unwrap_or(RideId(0))
    }

    fn get_mut(&mut self, id: RideId) -> StoreResult<&mut RideRoute> {
        let slot = *self.index.get(&id).ok_or(StoreError::RideNotFound(id))?;
        Ok(&mut self.rides[slot])
    }
}
