mod attrs;
mod layer;
mod record;

pub use attrs::{Attributes, BranchAttrs, LayerKind, Properties, RegionAttrs, ZoneAttrs};
pub use layer::Layer;
pub use record::{RawRecord, Record};
