mod containment;
mod nearest;
mod resolver;
mod result;

pub use containment::find_containing;
pub use nearest::{find_nearest, Nearest};
pub use resolver::{resolve, LayerSet, Resolver};
pub use result::{BranchMatch, Confidence, Detection, Method, RegionMatch, RegionSource, ResolutionResult, ZoneMatch};
