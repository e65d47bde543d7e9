use tracing::debug;

use crate::config::{valid_scale, ResolverConfig};
use crate::error::{BuildError, ResolveError};
use crate::geom::LatLng;
use crate::layer::{BranchAttrs, Layer, RawRecord, RegionAttrs, ZoneAttrs};
use super::containment::find_containing;
use super::nearest::find_nearest;
use super::result::{BranchMatch, Detection, RegionMatch, ResolutionResult, ZoneMatch};

/// Resolve one point against the three layers.
///
/// Region and branch are containment-only; a missing layer or a miss gives
/// [`Detection::NotDetected`]. The zone is taken by containment, otherwise
/// from the nearest zone centroid. If no region polygon matched but the
/// chosen zone carries a `region_name`, that name is reported with
/// [`RegionSource::ZoneAttribute`](super::RegionSource::ZoneAttribute).
/// A non-positive or non-finite `km_per_degree` fails the call.
pub fn resolve(
    point: &LatLng,
    regions: Option<&Layer<RegionAttrs>>,
    branches: Option<&Layer<BranchAttrs>>,
    zones: &Layer<ZoneAttrs>,
    config: &ResolverConfig,
) -> Result<ResolutionResult, ResolveError> {
    if !valid_scale(config.km_per_degree) {
        return Err(ResolveError::InvalidScale(config.km_per_degree));
    }

    let region = regions
        .and_then(|layer| find_containing(point, layer))
        .map(|record| RegionMatch::contained(record.attrs()));

    let branch = branches
        .and_then(|layer| find_containing(point, layer))
        .map(|record| BranchMatch::from(record.attrs()));

    let zone = match find_containing(point, zones) {
        Some(record) => ZoneMatch::inside(record.attrs()),
        None => {
            let nearest = find_nearest(point, zones, config.km_per_degree)?;
            ZoneMatch::nearest(nearest.record.attrs(), nearest.distance_km)
        }
    };

    let region = region.or_else(|| zone.region_name.as_deref().map(RegionMatch::from_zone));

    debug!(
        %point,
        zone = %zone.zone_id,
        method = %zone.method,
        region = region.is_some(),
        branch = branch.is_some(),
        "resolved point"
    );

    Ok(ResolutionResult {
        point: *point,
        region: Detection::from(region),
        branch: Detection::from(branch),
        zone,
    })
}

/// The region, branch and zone layers of one dataset.
#[derive(Debug)]
pub struct LayerSet {
    pub regions: Option<Layer<RegionAttrs>>,
    pub branches: Option<Layer<BranchAttrs>>,
    pub zones: Layer<ZoneAttrs>,
}

impl LayerSet {
    /// Build all supplied layers with the same config.
    pub fn build(
        regions: Option<Vec<RawRecord>>,
        branches: Option<Vec<RawRecord>>,
        zones: Vec<RawRecord>,
        config: &ResolverConfig,
    ) -> Result<Self, BuildError> {
        Ok(Self {
            regions: regions.map(|raw| Layer::build(raw, config)).transpose()?,
            branches: branches.map(|raw| Layer::build(raw, config)).transpose()?,
            zones: Layer::build(zones, config)?,
        })
    }
}

/// A built layer set plus config, shared read-only across callers.
#[derive(Debug)]
pub struct Resolver {
    layers: LayerSet,
    config: ResolverConfig,
}

impl Resolver {
    pub fn new(layers: LayerSet, config: ResolverConfig) -> Self {
        Self { layers, config }
    }

    #[inline] pub fn layers(&self) -> &LayerSet { &self.layers }

    #[inline] pub fn config(&self) -> &ResolverConfig { &self.config }

    pub fn resolve(&self, point: LatLng) -> Result<ResolutionResult, ResolveError> {
        resolve(
            &point,
            self.layers.regions.as_ref(),
            self.layers.branches.as_ref(),
            &self.layers.zones,
            &self.config,
        )
    }

    /// Resolve each point independently, in input order.
    pub fn resolve_all(&self, points: impl IntoIterator<Item = LatLng>)
        -> impl Iterator<Item = Result<ResolutionResult, ResolveError>> {
        points.into_iter().map(|point| self.resolve(point))
    }
}
