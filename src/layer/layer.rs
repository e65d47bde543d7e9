use ahash::AHashSet;
use rstar::RTree;
use tracing::{debug, warn};

use crate::config::{BuildPolicy, ResolverConfig};
use crate::error::BuildError;
use crate::geom::{RecordBounds, Shape};
use super::attrs::{Attributes, LayerKind};
use super::record::{RawRecord, Record};

/// An ordered, immutable collection of records for one level.
///
/// Order is scan order: when several shapes contain a point, the one
/// inserted first wins.
#[derive(Debug)]
pub struct Layer<A> {
    records: Vec<Record<A>>,
    rtree: Option<RTree<RecordBounds>>,
    skipped: usize,
}

impl<A: Attributes> Layer<A> {
    /// Validate raw records and build a layer that preserves their order.
    ///
    /// With [`BuildPolicy::Abort`] the first bad record fails the build;
    /// with [`BuildPolicy::SkipInvalid`] it is logged and dropped.
    pub fn build(raw: impl IntoIterator<Item = RawRecord>, config: &ResolverConfig) -> Result<Self, BuildError> {
        let mut records = Vec::new();
        let mut skipped = 0;

        for (index, RawRecord { geometry, properties }) in raw.into_iter().enumerate() {
            let record = Shape::new(geometry)
                .map_err(|source| BuildError::Geometry { layer: A::KIND, index, source })
                .and_then(|shape| {
                    A::from_properties(&properties)
                        .map(|attrs| Record::new(shape, attrs))
                        .map_err(|source| BuildError::Data { layer: A::KIND, index, source })
                });

            match (record, config.build_policy) {
                (Ok(record), _) => records.push(record),
                (Err(err), BuildPolicy::SkipInvalid) => {
                    let cause = std::error::Error::source(&err).map(ToString::to_string).unwrap_or_default();
                    warn!(%cause, "{err}; skipping record");
                    skipped += 1;
                }
                (Err(err), BuildPolicy::Abort) => return Err(err),
            }
        }

        let mut layer = Self::from_records(records, config.prefilter);
        layer.skipped = skipped;
        layer.warn_duplicate_ids();
        debug!(layer = %A::KIND, records = layer.len(), skipped, "built layer");
        Ok(layer)
    }

    #[inline] pub fn kind(&self) -> LayerKind { A::KIND }

    /// Duplicate ids are legal, but usually mean a bad export.
    fn warn_duplicate_ids(&self) {
        let mut seen = AHashSet::with_capacity(self.records.len());
        for record in &self.records {
            let id = record.attrs().id();
            if !seen.insert(id) {
                warn!(layer = %A::KIND, id, "duplicate id in layer; earlier record wins on overlap");
            }
        }
    }
}

impl<A> Layer<A> {
    /// Wrap already-validated records, keeping their order.
    pub fn from_records(records: Vec<Record<A>>, prefilter: bool) -> Self {
        let rtree = prefilter.then(|| RTree::bulk_load(
            records.iter().enumerate()
                .map(|(i, record)| RecordBounds::new(i, record.shape()))
                .collect()
        ));
        Self { records, rtree, skipped: 0 }
    }

    #[inline] pub fn len(&self) -> usize { self.records.len() }

    #[inline] pub fn is_empty(&self) -> bool { self.records.is_empty() }

    /// Records in insertion order.
    #[inline] pub fn iter(&self) -> std::slice::Iter<'_, Record<A>> { self.records.iter() }

    #[inline] pub fn get(&self, index: usize) -> Option<&Record<A>> { self.records.get(index) }

    #[inline] pub fn records(&self) -> &[Record<A>] { &self.records }

    /// Number of records dropped under [`BuildPolicy::SkipInvalid`].
    #[inline] pub fn skipped(&self) -> usize { self.skipped }

    #[inline] pub(crate) fn rtree(&self) -> Option<&RTree<RecordBounds>> { self.rtree.as_ref() }
}

impl<'a, A> IntoIterator for &'a Layer<A> {
    type Item = &'a Record<A>;
    type IntoIter = std::slice::Iter<'a, Record<A>>;

    fn into_iter(self) -> Self::IntoIter { self.records.iter() }
}
