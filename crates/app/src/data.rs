use std::sync::Arc;

use anyhow::{Context, Result};
use districts::{DistrictLookup, DistrictRecord, bundled_records};
use geo_ingest::{TopoJsonConverter, TopologySource};
use tracing::info;

use crate::{config::SiteConfig, html::map_page::MapViewport};

/// Shared state backing HTTP handlers. Built once at startup, read-only after.
pub(crate) struct SiteState {
    pub(crate) lookup: Arc<DistrictLookup>,
    pub(crate) source: TopologySource,
    pub(crate) converter: TopoJsonConverter,
    pub(crate) viewport: MapViewport,
}

impl SiteState {
    pub(crate) fn from_config(config: &SiteConfig) -> Result<Self> {
        Ok(Self {
            lookup: bundled_lookup()?,
            source: config.geometry.source(),
            converter: config.geometry.converter(),
            viewport: config.viewport.clone(),
        })
    }
}

/// Parse the bundled dataset into the lookup shared by every map view.
pub(crate) fn bundled_lookup() -> Result<Arc<DistrictLookup>> {
    let records = bundled_records().context("bundled district dataset is malformed")?;
    Ok(shared_lookup(records))
}

pub(crate) fn shared_lookup(records: Vec<DistrictRecord>) -> Arc<DistrictLookup> {
    let lookup = DistrictLookup::from_records(records);
    info!("loaded {} district records", lookup.len());
    Arc::new(lookup)
}
