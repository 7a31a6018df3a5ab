//! Geographic point type.

use crate::distance::haversine_meters;

/// A position on the Earth's surface in decimal degrees.
///
/// Longitude is stored first (GeoJSON ordering). No range validation is
/// performed; callers are responsible for supplying sensible coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeoPoint {
    /// Longitude in decimal degrees (x axis).
    pub lon: f64,
    /// Latitude in decimal degrees (y axis).
    pub lat: f64,
}

impl GeoPoint {
    /// Create a point from (longitude, latitude), GeoJSON ordering.
    pub const fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }

    /// Create a point from (latitude, longitude), the spoken-order pair.
    pub const fn from_lat_lon(lat: f64, lon: f64) -> Self {
        Self { lon, lat }
    }

    /// Great-circle distance to another point, in meters.
    pub fn distance_m(&self, other: &Self) -> f64 {
        haversine_meters(self.lat, self.lon, other.lat, other.lon)
    }
}

impl std::fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.6}, {:.6})", self.lat, self.lon)
    }
}
