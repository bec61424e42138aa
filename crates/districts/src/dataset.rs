//! The bundled delegation dataset, compiled into the binary.

use std::collections::BTreeMap;

use thiserror::Error;

use crate::{DistrictRecord, Party};

/// Raw JSON for the 52 California districts.
pub const BUNDLED_DISTRICTS_JSON: &str = include_str!("../data/ca-districts.json");

/// Number of seats California holds in the House.
pub const CALIFORNIA_SEATS: usize = 52;

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("district dataset is malformed")]
    Malformed(#[from] serde_json::Error),
}

/// Parse the bundled dataset.
pub fn bundled_records() -> Result<Vec<DistrictRecord>, DatasetError> {
    parse_records(BUNDLED_DISTRICTS_JSON)
}

/// Parse a JSON array of district records.
pub fn parse_records(json: &str) -> Result<Vec<DistrictRecord>, DatasetError> {
    Ok(serde_json::from_str(json)?)
}

/// Consistency findings for a set of records.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct DatasetReport {
    pub records: usize,
    /// District numbers appearing more than once.
    pub duplicates: Vec<u32>,
    /// Seats in `1..=CALIFORNIA_SEATS` with no record.
    pub missing: Vec<u32>,
    /// Records numbered outside `1..=CALIFORNIA_SEATS`.
    pub out_of_range: Vec<u32>,
    /// Records whose party code is neither `D` nor `R`.
    pub unknown_party: Vec<(u32, String)>,
}

impl DatasetReport {
    /// Unknown party codes render gray and do not make a dataset unclean.
    pub fn is_clean(&self) -> bool {
        self.duplicates.is_empty() && self.missing.is_empty() && self.out_of_range.is_empty()
    }
}

pub fn validate_records(records: &[DistrictRecord]) -> DatasetReport {
    let mut counts: BTreeMap<u32, usize> = BTreeMap::new();
    for record in records {
        *counts.entry(record.district).or_default() += 1;
    }
    let seats = 1..=CALIFORNIA_SEATS as u32;
    DatasetReport {
        records: records.len(),
        duplicates: counts
            .iter()
            .filter(|&(_, &count)| count > 1)
            .map(|(&district, _)| district)
            .collect(),
        missing: seats
            .clone()
            .filter(|district| !counts.contains_key(district))
            .collect(),
        out_of_range: counts
            .keys()
            .copied()
            .filter(|district| !seats.contains(district))
            .collect(),
        unknown_party: records
            .iter()
            .filter(|record| matches!(record.party(), Party::Other(_)))
            .map(|record| (record.district, record.party.clone()))
            .collect(),
    }
}
