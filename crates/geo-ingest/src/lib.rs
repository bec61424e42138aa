//! Acquisition and decoding of the district boundary geometry.
//!
//! A [`GeometrySource`] reads the raw document (HTTP GET or a local file) and a
//! [`GeometryConverter`] turns it into GeoJSON features that the map layer can
//! style and draw. Both are traits so the district map can swap either side.

mod convert;
mod source;
mod types;

pub use convert::{DEFAULT_TOPOLOGY_OBJECT, GeometryConverter, TopoJsonConverter};
pub use geojson::{Feature, FeatureCollection};
pub use source::{FileSource, GeometrySource, HttpSource, TopologySource};
pub use types::IngestError;
