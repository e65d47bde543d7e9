use rstar::{RTree, RTreeObject, AABB};

use super::{LatLng, Shape};

/// Prefilter entry: the (lng, lat) envelope of one record's shape, tagged
/// with the record's position in its layer.
///
/// The tag is what lets a prefiltered lookup honor first-match-wins. The
/// R-tree hands candidates back in tree order, so [`candidates_at`] sorts
/// them by layer position before any exact containment test runs.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct RecordBounds {
    position: usize,
    envelope: AABB<[f64; 2]>,
}

impl RecordBounds {
    pub(crate) fn new(position: usize, shape: &Shape) -> Self {
        let bounds = shape.bounds();
        Self { position, envelope: AABB::from_corners(bounds.min().into(), bounds.max().into()) }
    }

    /// Position of the record in its layer.
    #[inline] pub(crate) fn position(&self) -> usize { self.position }
}

impl RTreeObject for RecordBounds {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope { self.envelope }
}

/// Layer positions whose envelope touches `point`, in ascending order.
pub(crate) fn candidates_at(rtree: &RTree<RecordBounds>, point: &LatLng) -> Vec<usize> {
    let mut positions = rtree
        .locate_in_envelope_intersecting(&AABB::from_point([point.lng, point.lat]))
        .map(RecordBounds::position)
        .collect::<Vec<_>>();
    positions.sort_unstable();
    positions
}
