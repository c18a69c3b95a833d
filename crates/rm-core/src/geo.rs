//! Geographic coordinate type and the geodesic toolkit used by ride matching.
//!
//! Distances are great-circle (haversine) kilometres.  Point-to-segment and
//! along-track distances treat the triangle formed by three haversine
//! distances as planar, which holds to well under 1 % for the city-scale
//! segments rides cover (tens of kilometres).
//!
//! # Sentinel coordinates
//!
//! Ride records store a missing coordinate as `(0, 0)`.  Anything within
//! [`SENTINEL_EPSILON_DEG`] of the origin on both axes is therefore "unset",
//! not a point in the Gulf of Guinea.  [`Coordinate::is_valid`] is the only
//! place that convention is encoded.

use std::f64::consts::FRAC_PI_2;
use std::fmt;

/// Mean Earth radius, kilometres.
pub const EARTH_RADIUS_KM: f64 = 6_371.0;

/// Coordinates with `|lat|` and `|lng|` both at or below this are unset.
pub const SENTINEL_EPSILON_DEG: f64 = 0.001;

/// Segments shorter than this are treated as a single point.
pub const MIN_SEGMENT_KM: f64 = 0.1;

// ── Coordinate ────────────────────────────────────────────────────────────────

/// A WGS-84 latitude/longitude pair in double-precision degrees.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinate {
    /// The stored representation of "no coordinate".
    pub const UNSET: Coordinate = Coordinate { lat: 0.0, lng: 0.0 };

    #[inline]
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Assemble a coordinate from two independently optional components, as
    /// they arrive from query strings.  Both halves must be present.
    pub fn from_parts(lat: Option<f64>, lng: Option<f64>) -> Option<Self> {
        Some(Self::new(lat?, lng?))
    }

    /// `false` for the near-(0,0) sentinel.
    #[inline]
    pub fn is_valid(self) -> bool {
        !(self.lat.abs() <= SENTINEL_EPSILON_DEG && self.lng.abs() <= SENTINEL_EPSILON_DEG)
    }

    /// `Some(self)` if the coordinate is set, `None` for the sentinel.
    #[inline]
    pub fn valid(self) -> Option<Self> {
        self.is_valid().then_some(self)
    }

    /// Haversine great-circle distance in kilometres.
    pub fn distance_km(self, other: Coordinate) -> f64 {
        let d_lat = (other.lat - self.lat).to_radians();
        let d_lng = (other.lng - self.lng).to_radians();

        let lat1 = self.lat.to_radians();
        let lat2 = other.lat.to_radians();

        let a = (d_lat * 0.5).sin().powi(2)
            + lat1.cos() * lat2.cos() * (d_lng * 0.5).sin().powi(2);

        // `a` can creep past 1.0 by an ulp for antipodal pairs.
        let a = a.clamp(0.0, 1.0);
        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
        EARTH_RADIUS_KM * c
    }

    /// Initial great-circle bearing from `self` towards `other`, in degrees
    /// clockwise from north, range `(-180, 180]`.
    pub fn bearing_deg(self, other: Coordinate) -> f64 {
        let d_lng = (other.lng - self.lng).to_radians();
        let lat1 = self.lat.to_radians();
        let lat2 = other.lat.to_radians();

        let y = d_lng.sin() * lat2.cos();
        let x = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * d_lng.cos();
        y.atan2(x).to_degrees()
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.6}, {:.6})", self.lat, self.lng)
    }
}

// ── Free-function toolkit ─────────────────────────────────────────────────────

/// Haversine distance between `a` and `b` in kilometres.
#[inline]
pub fn distance_km(a: Coordinate, b: Coordinate) -> f64 {
    a.distance_km(b)
}

/// Initial bearing from `a` to `b` in degrees.
#[inline]
pub fn bearing_deg(a: Coordinate, b: Coordinate) -> f64 {
    a.bearing_deg(b)
}

/// The three side lengths of the triangle point / segment start / segment end.
struct Triangle {
    /// point ↔ start
    d13: f64,
    /// point ↔ end
    d23: f64,
    /// start ↔ end
    d12: f64,
}

impl Triangle {
    fn new(point: Coordinate, start: Coordinate, end: Coordinate) -> Self {
        Self {
            d13: point.distance_km(start),
            d23: point.distance_km(end),
            d12: start.distance_km(end),
        }
    }

    #[inline]
    fn nearest_endpoint(&self) -> f64 {
        self.d13.min(self.d23)
    }
}

/// Cosine of the angle between sides `adjacent` and `base`, opposite side
/// `opposite`, by the law of cosines.  Clamped to `[-1, 1]`; `None` when a
/// side adjacent to the angle has zero length.
fn law_of_cosines(adjacent: f64, base: f64, opposite: f64) -> Option<f64> {
    let denom = 2.0 * adjacent * base;
    if denom <= 0.0 {
        return None;
    }
    let cos = (adjacent * adjacent + base * base - opposite * opposite) / denom;
    cos.is_finite().then(|| cos.clamp(-1.0, 1.0))
}

/// Perpendicular distance in kilometres from `point` to the segment
/// `start → end`.
///
/// When the foot of the perpendicular falls outside the segment (either base
/// angle ≥ 90°), the distance to the nearer endpoint is returned instead.
/// Segments shorter than [`MIN_SEGMENT_KM`] collapse to their endpoints.
/// Degenerate triangles fall back to the nearer endpoint; the result is never
/// NaN for finite inputs.
pub fn distance_to_segment_km(point: Coordinate, start: Coordinate, end: Coordinate) -> f64 {
    let t = Triangle::new(point, start, end);
    let nearest = t.nearest_endpoint();
    if t.d12 < MIN_SEGMENT_KM {
        return nearest;
    }

    let (Some(cos1), Some(cos2)) = (
        law_of_cosines(t.d13, t.d12, t.d23),
        law_of_cosines(t.d23, t.d12, t.d13),
    ) else {
        return nearest;
    };

    if cos1.acos() < FRAC_PI_2 && cos2.acos() < FRAC_PI_2 {
        // Heron's formula; rounding can push the radicand a hair below zero
        // for points lying on the segment.
        let s = (t.d12 + t.d13 + t.d23) / 2.0;
        let area = (s * (s - t.d12) * (s - t.d13) * (s - t.d23)).max(0.0).sqrt();
        let height = 2.0 * area / t.d12;
        if height.is_finite() {
            return height;
        }
    }

    nearest
}

/// Distance in kilometres from `start` to the projection of `point` onto the
/// segment `start → end`, clamped to `[0, |start end|]`.
pub fn along_track_km(point: Coordinate, start: Coordinate, end: Coordinate) -> f64 {
    let t = Triangle::new(point, start, end);
    if t.d12 < MIN_SEGMENT_KM {
        return t.d13;
    }
    match law_of_cosines(t.d13, t.d12, t.d23) {
        Some(cos) => (t.d13 * cos).clamp(0.0, t.d12),
        // `point` coincides with `start`.
        None => 0.0,
    }
}

/// `true` if `a` projects strictly earlier than `b` along `start → end`.
#[inline]
pub fn is_before(a: Coordinate, b: Coordinate, start: Coordinate, end: Coordinate) -> bool {
    along_track_km(a, start, end) < along_track_km(b, start, end)
}
