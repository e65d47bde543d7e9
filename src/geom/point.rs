use std::fmt;

use geo::{Coord, Point};
use serde::{Deserialize, Serialize};

use crate::error::GeometryError;

/// A WGS84 location in decimal degrees.
///
/// Stored as (lat, lng) because that is how callers hand coordinates over;
/// geometry code works in (x = lng, y = lat) and converts through
/// [`LatLng::coord`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    /// Build a point, rejecting non-finite or out-of-range coordinates.
    pub fn new(lat: f64, lng: f64) -> Result<Self, GeometryError> {
        if !lat.is_finite() || !lng.is_finite() || lat.abs() > 90.0 || lng.abs() > 180.0 {
            return Err(GeometryError::InvalidPoint { lat, lng });
        }
        Ok(Self { lat, lng })
    }

    /// Planar coordinate with x = longitude, y = latitude.
    #[inline] pub fn coord(&self) -> Coord<f64> { Coord { x: self.lng, y: self.lat } }

    /// Straight-line distance in degree space. Not a geodesic distance.
    #[inline]
    pub fn planar_distance(&self, other: &LatLng) -> f64 {
        (self.lng - other.lng).hypot(self.lat - other.lat)
    }
}

impl From<Point<f64>> for LatLng {
    fn from(p: Point<f64>) -> Self { Self { lat: p.y(), lng: p.x() } }
}

impl From<LatLng> for Point<f64> {
    fn from(p: LatLng) -> Self { Point::new(p.lng, p.lat) }
}

impl fmt::Display for LatLng {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.6}, {:.6})", self.lat, self.lng)
    }
}
