use geo::{Area, BoundingRect, Centroid, CoordsIter, Intersects, LineString, MultiPolygon, Polygon, Rect};

use crate::error::GeometryError;
use super::LatLng;

/// A validated polygon or multipolygon in (lng, lat) degree space.
///
/// Containment is boundary-inclusive: a point on any edge or vertex, hole
/// edges included, counts as contained. The centroid is area-weighted over
/// all parts and computed once at construction.
#[derive(Debug, Clone)]
pub struct Shape {
    polygons: MultiPolygon<f64>,
    centroid: LatLng,
    bounds: Rect<f64>,
}

impl Shape {
    /// Validate and wrap a multipolygon.
    pub fn new(polygons: MultiPolygon<f64>) -> Result<Self, GeometryError> {
        if polygons.0.is_empty() { return Err(GeometryError::Empty) }

        if polygons.coords_iter().any(|c| !c.x.is_finite() || !c.y.is_finite()) {
            return Err(GeometryError::NonFinite);
        }

        for (part, polygon) in polygons.0.iter().enumerate() {
            let rings = std::iter::once(polygon.exterior()).chain(polygon.interiors());
            for (ring, line) in rings.enumerate() {
                let count = vertex_count(line);
                if count < 3 { return Err(GeometryError::TooFewVertices { part, ring, count }) }
            }
            if polygon.unsigned_area() == 0.0 { return Err(GeometryError::ZeroArea { part }) }
        }

        // Both are Some for a non-empty set of positive-area polygons.
        let centroid = polygons.centroid().ok_or(GeometryError::ZeroArea { part: 0 })?;
        let bounds = polygons.bounding_rect().ok_or(GeometryError::Empty)?;

        Ok(Self { centroid: centroid.into(), bounds, polygons })
    }

    /// Validate and wrap a single polygon.
    pub fn from_polygon(polygon: Polygon<f64>) -> Result<Self, GeometryError> {
        Self::new(MultiPolygon(vec![polygon]))
    }

    /// True if the point lies inside any part or on its boundary,
    /// and not strictly inside one of that part's holes.
    #[inline]
    pub fn contains(&self, point: &LatLng) -> bool {
        let coord = point.coord();
        // Cheap reject before the ring walk.
        if !self.bounds.intersects(&coord) { return false }
        self.polygons.intersects(&coord)
    }

    /// Area-weighted centroid.
    #[inline] pub fn centroid(&self) -> LatLng { self.centroid }

    /// Axis-aligned bounding box in (lng, lat).
    #[inline] pub fn bounds(&self) -> Rect<f64> { self.bounds }

    #[inline] pub fn polygons(&self) -> &MultiPolygon<f64> { &self.polygons }
}

impl TryFrom<MultiPolygon<f64>> for Shape {
    type Error = GeometryError;

    fn try_from(polygons: MultiPolygon<f64>) -> Result<Self, Self::Error> { Self::new(polygons) }
}

impl TryFrom<Polygon<f64>> for Shape {
    type Error = GeometryError;

    fn try_from(polygon: Polygon<f64>) -> Result<Self, Self::Error> { Self::from_polygon(polygon) }
}

/// Number of vertices in a ring, not counting the repeated closing vertex.
fn vertex_count(ring: &LineString<f64>) -> usize {
    let n = ring.0.len();
    if n > 1 && ring.is_closed() { n - 1 } else { n }
}
