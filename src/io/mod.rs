//! Readers that turn externally stored geometry into raw layer records.
//!
//! The resolver core never touches files; callers parse their data here (or
//! build [`RawRecord`](crate::layer::RawRecord)s themselves) and hand the
//! records to [`Layer::build`](crate::layer::Layer::build).

pub mod geojson;
