use geo::MultiPolygon;

use crate::geom::{LatLng, Shape};
use super::attrs::Properties;

/// Geometry and properties of one feature before validation.
#[derive(Debug, Clone)]
pub struct RawRecord {
    pub geometry: MultiPolygon<f64>,
    pub properties: Properties,
}

/// A validated shape paired with its normalized attributes.
#[derive(Debug, Clone)]
pub struct Record<A> {
    shape: Shape,
    attrs: A,
}

impl<A> Record<A> {
    pub fn new(shape: Shape, attrs: A) -> Self {
        Self { shape, attrs }
    }

    #[inline] pub fn shape(&self) -> &Shape { &self.shape }

    #[inline] pub fn attrs(&self) -> &A { &self.attrs }

    #[inline] pub fn contains(&self, point: &LatLng) -> bool { self.shape.contains(point) }
}
