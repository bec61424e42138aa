//! `portfolio check`: dataset validation plus a dry run of the geometry join.

use std::{collections::BTreeSet, fmt};

use anyhow::{Context, Result};
use districts::{
    CALIFORNIA_SEATS, DatasetReport, LoadOutcome, MapView, ShapeLayer, bundled_records,
    validate_records,
};

use crate::{config::GeometryConfig, data::shared_lookup};

/// How the boundary features lined up with the dataset.
#[derive(Debug, Default)]
pub(crate) struct JoinReport {
    pub(crate) shapes: usize,
    /// Shapes whose district has no record (`None` when unresolvable).
    pub(crate) unmatched_shapes: Vec<Option<u32>>,
    /// Records with no shape in the boundary file.
    pub(crate) records_without_shape: Vec<u32>,
}

#[derive(Debug)]
pub(crate) struct CheckReport {
    pub(crate) dataset: DatasetReport,
    pub(crate) location: String,
    /// `None` when the geometry could not be loaded.
    pub(crate) join: Option<JoinReport>,
}

impl CheckReport {
    /// Geometry problems are reported but never fail the check.
    pub(crate) fn is_clean(&self) -> bool {
        self.dataset.is_clean()
    }
}

pub(crate) fn run_check(geometry: GeometryConfig) -> Result<CheckReport> {
    let records = bundled_records().context("bundled district dataset is malformed")?;
    let dataset = validate_records(&records);
    let lookup = shared_lookup(records.clone());

    let source = geometry.source();
    let converter = geometry.converter();
    let join = actix_web::rt::System::new().block_on(async move {
        let mut view = MapView::mount(lookup, ShapeLayer::new());
        match view.load(&source, &converter).await {
            LoadOutcome::Rendered { .. } => view.surface().map(|layer| join_report(layer, &records)),
            LoadOutcome::Failed | LoadOutcome::Discarded => None,
        }
    });

    Ok(CheckReport {
        dataset,
        location: geometry.location,
        join,
    })
}

fn join_report(layer: &ShapeLayer, records: &[districts::DistrictRecord]) -> JoinReport {
    let mut drawn = BTreeSet::new();
    let mut unmatched_shapes = Vec::new();
    for shape in (0..layer.len()).filter_map(|index| layer.shape(index)) {
        if let Some(district) = shape.district {
            drawn.insert(district);
        }
        if !shape.is_joined() {
            unmatched_shapes.push(shape.district);
        }
    }
    let mut records_without_shape: Vec<u32> = records
        .iter()
        .map(|record| record.district)
        .filter(|district| !drawn.contains(district))
        .collect();
    records_without_shape.sort_unstable();
    records_without_shape.dedup();

    JoinReport {
        shapes: layer.len(),
        unmatched_shapes,
        records_without_shape,
    }
}

impl fmt::Display for CheckReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let d = &self.dataset;
        writeln!(
            f,
            "dataset: {} records for {} districts",
            d.records, CALIFORNIA_SEATS
        )?;
        if !d.duplicates.is_empty() {
            writeln!(f, "  duplicate districts: {:?}", d.duplicates)?;
        }
        if !d.missing.is_empty() {
            writeln!(f, "  missing districts: {:?}", d.missing)?;
        }
        if !d.out_of_range.is_empty() {
            writeln!(f, "  out of range districts: {:?}", d.out_of_range)?;
        }
        for (district, code) in &d.unknown_party {
            writeln!(f, "  district {district}: unknown party code {code:?} (shown gray)")?;
        }

        match &self.join {
            None => writeln!(f, "geometry: unavailable from {}", self.location)?,
            Some(join) => {
                writeln!(f, "geometry: {} shapes from {}", join.shapes, self.location)?;
                for district in &join.unmatched_shapes {
                    match district {
                        Some(n) => writeln!(f, "  shape for district {n} has no record")?,
                        None => writeln!(f, "  shape without a district number")?,
                    }
                }
                if !join.records_without_shape.is_empty() {
                    writeln!(
                        f,
                        "  records without a shape: {:?}",
                        join.records_without_shape
                    )?;
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOPOLOGY: &str = r#"{
        "type": "Topology",
        "objects": {
            "districts": {
                "type": "GeometryCollection",
                "geometries": [
                    { "type": "Polygon", "arcs": [[0]], "properties": { "DISTRICT": "1" } },
                    { "type": "Polygon", "arcs": [[0]], "properties": { "DISTRICT": "53" } }
                ]
            }
        },
        "arcs": [[[0, 0], [1, 0], [1, 1], [0, 1], [0, 0]]]
    }"#;

    fn geometry(location: String) -> GeometryConfig {
        GeometryConfig {
            location,
            topology_object: "districts".into(),
        }
    }

    #[test]
    fn unavailable_geometry_still_passes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.json");
        let report = run_check(geometry(path.display().to_string())).unwrap();

        assert!(report.is_clean());
        assert!(report.join.is_none());
        let text = report.to_string();
        assert!(text.contains("dataset: 52 records for 52 districts"));
        assert!(text.contains("geometry: unavailable"));
    }

    #[test]
    fn join_mismatches_are_listed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("topo.json");
        std::fs::write(&path, TOPOLOGY).unwrap();

        let report = run_check(geometry(path.display().to_string())).unwrap();
        let join = report.join.as_ref().unwrap();
        assert_eq!(join.shapes, 2);
        assert_eq!(join.unmatched_shapes, vec![Some(53)]);
        assert_eq!(join.records_without_shape.len(), 51);
        assert!(!join.records_without_shape.contains(&1));
        assert!(report.to_string().contains("shape for district 53 has no record"));
    }
}
