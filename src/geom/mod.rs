mod bbox;
mod point;
mod shape;

pub(crate) use bbox::{candidates_at, RecordBounds};
pub use point::LatLng;
pub use shape::Shape;
