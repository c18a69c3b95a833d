//! Passenger search input.

use rm_core::Coordinate;

/// One passenger search.  Ephemeral; built per call.
///
/// # Example
///
/// ```rust
/// use rm_core::Coordinate;
/// use rm_match::SearchRequest;
///
/// let req = SearchRequest::new(2)
///     .origin_text("Sector 11")
///     .origin_coord(Coordinate::new(23.2156, 72.6369))
///     .destination_coord(Coordinate::new(23.0, 72.5));
///
/// assert!(req.has_text());
/// assert!(req.passenger_trip().is_some());
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct SearchRequest {
    /// Substring the ride's origin address must contain.
    pub origin_text:       Option<String>,
    /// Substring the ride's destination address must contain.
    pub destination_text:  Option<String>,
    /// Minimum free seats.  Default: 1.
    pub passengers:        u32,
    pub origin_coord:      Option<Coordinate>,
    pub destination_coord: Option<Coordinate>,
    /// Replaces the active mode's distance threshold for this search only.
    /// Zero or negative values are passed through unchanged.
    pub max_distance_km:   Option<f64>,
}

impl SearchRequest {
    pub fn new(passengers: u32) -> Self {
        Self {
            origin_text:       None,
            destination_text:  None,
            passengers,
            origin_coord:      None,
            destination_coord: None,
            max_distance_km:   None,
        }
    }

    pub fn origin_text(mut self, text: impl Into<String>) -> Self {
        self.origin_text = Some(text.into());
        self
    }

    pub fn destination_text(mut self, text: impl Into<String>) -> Self {
        self.destination_text = Some(text.into());
        self
    }

    pub fn origin_coord(mut self, coord: Coordinate) -> Self {
        self.origin_coord = Some(coord);
        self
    }

    pub fn destination_coord(mut self, coord: Coordinate) -> Self {
        self.destination_coord = Some(coord);
        self
    }

    pub fn max_distance_km(mut self, km: f64) -> Self {
        self.max_distance_km = Some(km);
        self
    }

    /// `true` if either text term is non-blank.
    pub fn has_text(&self) -> bool {
        is_term(&self.origin_text) || is_term(&self.destination_text)
    }

    /// The passenger's pickup and drop, if both are present and neither is
    /// the sentinel.
    pub fn passenger_trip(&self) -> Option<PassengerTrip> {
        Some(PassengerTrip {
            origin:      self.origin_coord?.valid()?,
            destination: self.destination_coord?.valid()?,
        })
    }
}

impl Default for SearchRequest {
    fn default() -> Self {
        Self::new(1)
    }
}

fn is_term(text: &Option<String>) -> bool {
    text.as_deref().is_some_and(|t| !t.trim().is_empty())
}

/// A passenger's validated pickup and drop coordinates.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PassengerTrip {
    pub origin:      Coordinate,
    pub destination: Coordinate,
}
