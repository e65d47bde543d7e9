use crate::geom::{candidates_at, LatLng};
use crate::layer::{Layer, Record};

/// First record in layer order whose shape contains `point`.
///
/// A miss is an ordinary outcome and yields `None`. When the layer carries a
/// prefilter, candidates are re-sorted into insertion order before testing
/// so overlap still resolves to the earliest record.
pub fn find_containing<'a, A>(point: &LatLng, layer: &'a Layer<A>) -> Option<&'a Record<A>> {
    let Some(rtree) = layer.rtree() else {
        return layer.iter().find(|record| record.contains(point));
    };

    candidates_at(rtree, point).into_iter()
        .filter_map(|idx| layer.get(idx))
        .find(|record| record.contains(point))
}
