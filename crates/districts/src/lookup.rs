use std::collections::HashMap;

use geojson::Feature;
use serde_json::Value;
use tracing::warn;

use crate::DistrictRecord;

/// Feature property carrying the district number in the boundary file.
pub const DISTRICT_PROPERTY: &str = "DISTRICT";

/// District number → record, built once before any geometry is styled.
#[derive(Clone, Debug, Default)]
pub struct DistrictLookup {
    records: HashMap<u32, DistrictRecord>,
}

impl DistrictLookup {
    /// Later records with the same number replace earlier ones.
    pub fn from_records(records: impl IntoIterator<Item = DistrictRecord>) -> Self {
        let mut map = HashMap::new();
        for record in records {
            let district = record.district;
            if map.insert(district, record).is_some() {
                warn!("duplicate record for district {district}; keeping the later entry");
            }
        }
        Self { records: map }
    }

    pub fn get(&self, district: u32) -> Option<&DistrictRecord> {
        self.records.get(&district)
    }

    /// Record joined to a boundary feature, if its district resolves.
    pub fn for_feature(&self, feature: &Feature) -> Option<&DistrictRecord> {
        district_number(feature).and_then(|district| self.get(district))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records ordered by district number.
    pub fn sorted(&self) -> Vec<&DistrictRecord> {
        let mut records: Vec<_> = self.records.values().collect();
        records.sort_by_key(|record| record.district);
        records
    }
}

/// Resolve the district number stored on a feature.
pub fn district_number(feature: &Feature) -> Option<u32> {
    feature.property(DISTRICT_PROPERTY).and_then(parse_district)
}

/// Integer-prefix parse: numbers truncate, strings yield their leading digits.
fn parse_district(value: &Value) -> Option<u32> {
    match value {
        Value::Number(number) => {
            if let Some(n) = number.as_u64() {
                return u32::try_from(n).ok();
            }
            let n = number.as_f64()?;
            if n.is_finite() && n >= 0.0 && n < u32::MAX as f64 {
                Some(n.trunc() as u32)
            } else {
                None
            }
        }
        Value::String(text) => {
            let text = text.trim_start();
            let text = text.strip_prefix('+').unwrap_or(text);
            let digits: String = text.chars().take_while(char::is_ascii_digit).collect();
            digits.parse().ok()
        }
        _ => None,
    }
}
