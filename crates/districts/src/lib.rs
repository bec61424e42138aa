//! California congressional districts: the bundled delegation dataset and the
//! composition flow that joins it to boundary geometry for an interactive map.
//!
//! The flow is deliberately small:
//! - [`DistrictLookup`] is built once from the bundled records.
//! - [`MapView`] fetches and converts the boundary document through
//!   `geo-ingest`, joins each feature to its record, and draws the styled
//!   shapes into a [`MapSurface`].
//! - [`ShapeLayer`] is the in-process surface; it applies hover and click
//!   interactions and exports the layer as GeoJSON for the browser.

mod dataset;
mod interaction;
mod join;
mod lookup;
pub mod popup;
mod record;
pub mod style;
mod surface;
mod view;

pub use dataset::{
    BUNDLED_DISTRICTS_JSON, CALIFORNIA_SEATS, DatasetError, DatasetReport, bundled_records,
    parse_records, validate_records,
};
pub use interaction::{HoverEmphasis, InteractionHandlers, PointerEvent};
pub use join::{JoinError, StyledShape, join_features, style_feature};
pub use lookup::{DISTRICT_PROPERTY, DistrictLookup, district_number};
pub use record::{DistrictRecord, Party};
pub use style::ShapeStyle;
pub use surface::{MapSurface, ShapeLayer, SurfaceError};
pub use view::{Liveness, LoadOutcome, MapView};
