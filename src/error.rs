use thiserror::Error;

use crate::layer::LayerKind;

/// Malformed polygon or point input.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum GeometryError {
    /// The geometry has no polygon parts at all.
    #[error("geometry has no polygon parts")]
    Empty,

    /// A ring has fewer than three vertices (closing vertex excluded).
    #[error("ring {ring} of part {part} has {count} vertices (need at least 3)")]
    TooFewVertices { part: usize, ring: usize, count: usize },

    /// A coordinate is NaN or infinite.
    #[error("geometry contains a non-finite coordinate")]
    NonFinite,

    /// A polygon part encloses no area.
    #[error("polygon part {part} has zero area")]
    ZeroArea { part: usize },

    /// A query point is not a valid WGS84 coordinate.
    #[error("invalid point: lat={lat}, lng={lng}")]
    InvalidPoint { lat: f64, lng: f64 },
}

/// Missing or unusable attribute data, or an unreadable feature collection.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("{layer} record is missing required attribute `{attribute}`")]
    MissingAttribute { layer: LayerKind, attribute: &'static str },

    #[error("attribute `{attribute}` is invalid: {reason}")]
    InvalidAttribute { attribute: &'static str, reason: String },

    #[error("input is not a GeoJSON FeatureCollection")]
    NotAFeatureCollection,

    #[error("feature {index}: unsupported geometry type `{kind}`")]
    UnsupportedGeometry { index: usize, kind: String },

    #[error("feature {index}: malformed coordinates ({reason})")]
    MalformedCoordinates { index: usize, reason: String },

    #[error("failed to parse GeoJSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// A layer could not be built because one of its records was rejected.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("{layer} record {index}: invalid geometry")]
    Geometry {
        layer: LayerKind,
        index: usize,
        #[source]
        source: GeometryError,
    },

    #[error("{layer} record {index}: invalid attributes")]
    Data {
        layer: LayerKind,
        index: usize,
        #[source]
        source: DataError,
    },
}

impl BuildError {
    /// Position of the rejected record in the input sequence.
    pub fn index(&self) -> usize {
        match self {
            BuildError::Geometry { index, .. } | BuildError::Data { index, .. } => *index,
        }
    }
}

/// Nearest-zone fallback was asked to pick from a layer with no records.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("zone layer is empty; no zone can be assigned")]
pub struct EmptyLayerError;

/// Unusable resolver configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("km_per_degree must be a positive finite number, got {0}")]
    InvalidScale(f64),

    #[error("failed to parse config: {0}")]
    Json(#[from] serde_json::Error),
}

/// Failure of a single resolution call.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ResolveError {
    #[error(transparent)]
    EmptyLayer(#[from] EmptyLayerError),

    #[error("km_per_degree must be a positive finite number, got {0}")]
    InvalidScale(f64),
}
