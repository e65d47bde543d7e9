#![doc = "zonemap: assign a point to a region, branch and technical zone"]
mod config;
mod error;
mod geom;
mod layer;
mod resolve;

pub mod io;

#[doc(inline)]
pub use config::{BuildPolicy, ResolverConfig, DEFAULT_KM_PER_DEGREE};

#[doc(inline)]
pub use error::{BuildError, ConfigError, DataError, EmptyLayerError, GeometryError, ResolveError};

#[doc(inline)]
pub use geom::{LatLng, Shape};

#[doc(inline)]
pub use layer::{Attributes, BranchAttrs, Layer, LayerKind, Properties, RawRecord, Record, RegionAttrs, ZoneAttrs};

#[doc(inline)]
pub use resolve::{
    find_containing, find_nearest, resolve, BranchMatch, Confidence, Detection, LayerSet, Method, Nearest,
    RegionMatch, RegionSource, ResolutionResult, Resolver, ZoneMatch,
};
