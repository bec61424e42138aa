//! Transient join between boundary features and district records.

use geojson::{Feature, FeatureCollection};
use thiserror::Error;

use crate::{
    DistrictLookup, Party, ShapeStyle, district_number, popup::popup_html, style::UNKNOWN_PARTY,
};

/// A boundary feature with its joined style and popup.
#[derive(Clone, Debug)]
pub struct StyledShape {
    pub feature: Feature,
    pub district: Option<u32>,
    /// Party code of the joined record, or `Unknown` when nothing joined.
    pub party: String,
    pub style: ShapeStyle,
    pub popup: Option<String>,
}

impl StyledShape {
    pub fn is_joined(&self) -> bool {
        self.popup.is_some()
    }

    pub fn party_label(&self) -> String {
        Party::from_code(&self.party).label().to_string()
    }
}

/// Resting style for a feature, gray when it does not join.
pub fn style_feature(lookup: &DistrictLookup, feature: &Feature) -> ShapeStyle {
    let party = lookup
        .for_feature(feature)
        .map_or(UNKNOWN_PARTY, |record| record.party.as_str());
    ShapeStyle::resting(party)
}

#[derive(Debug, Error)]
pub enum JoinError {
    #[error("failed to render popup for district {district}: {source}")]
    Popup {
        district: u32,
        #[source]
        source: askama::Error,
    },
}

/// Style every feature in `collection` against `lookup`.
pub fn join_features(
    lookup: &DistrictLookup,
    collection: FeatureCollection,
) -> Result<Vec<StyledShape>, JoinError> {
    collection
        .features
        .into_iter()
        .map(|feature| {
            let district = district_number(&feature);
            let record = district.and_then(|n| lookup.get(n));
            let party = record.map_or(UNKNOWN_PARTY, |r| r.party.as_str()).to_string();
            let popup = record
                .map(|record| {
                    popup_html(record).map_err(|source| JoinError::Popup {
                        district: record.district,
                        source,
                    })
                })
                .transpose()?;
            Ok(StyledShape {
                style: ShapeStyle::resting(&party),
                popup,
                district,
                party,
                feature,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::{
        DistrictRecord, bundled_records,
        style::{DEMOCRAT_BLUE, UNKNOWN_GRAY},
    };

    fn feature(district: serde_json::Value) -> Feature {
        let mut properties = serde_json::Map::new();
        properties.insert("DISTRICT".into(), district);
        Feature {
            bbox: None,
            geometry: None,
            id: None,
            properties: Some(properties),
            foreign_members: None,
        }
    }

    fn collection(features: Vec<Feature>) -> FeatureCollection {
        FeatureCollection {
            bbox: None,
            features,
            foreign_members: None,
        }
    }

    #[test]
    fn unmatched_feature_is_gray_without_popup() {
        let lookup = DistrictLookup::from_records(bundled_records().unwrap());
        let shapes = join_features(&lookup, collection(vec![feature(json!("77"))])).unwrap();

        assert_eq!(shapes.len(), 1);
        let shape = &shapes[0];
        assert_eq!(shape.district, Some(77));
        assert_eq!(shape.style.fill_color, UNKNOWN_GRAY);
        assert_eq!(shape.party_label(), UNKNOWN_PARTY);
        assert!(shape.popup.is_none());
        assert!(!shape.is_joined());
    }

    #[test]
    fn unknown_party_code_is_gray_and_literal() {
        let lookup = DistrictLookup::from_records([DistrictRecord {
            district: 3,
            name: "Pat Smith".into(),
            party: "I".into(),
            tenure: "2023–present".into(),
            district_wikipedia: "https://example.org/d3".into(),
            representative_wikipedia: "https://example.org/pat".into(),
        }]);
        let shapes = join_features(&lookup, collection(vec![feature(json!(3))])).unwrap();

        let shape = &shapes[0];
        assert_eq!(shape.style.fill_color, UNKNOWN_GRAY);
        assert_eq!(shape.party_label(), "I");
        assert!(shape.popup.as_deref().unwrap().contains(">I</span>"));
    }

    #[test]
    fn unresolvable_district_is_unknown() {
        let lookup = DistrictLookup::from_records(bundled_records().unwrap());
        let shapes = join_features(&lookup, collection(vec![feature(json!("n/a"))])).unwrap();
        assert_eq!(shapes[0].district, None);
        assert_eq!(shapes[0].style, ShapeStyle::resting(UNKNOWN_PARTY));
    }

    #[test]
    fn style_feature_matches_join() {
        let lookup = DistrictLookup::from_records(bundled_records().unwrap());
        let pelosi = feature(json!("11"));
        assert_eq!(style_feature(&lookup, &pelosi).fill_color, DEMOCRAT_BLUE);

        let shapes = join_features(&lookup, collection(vec![pelosi.clone()])).unwrap();
        assert_eq!(shapes[0].style, style_feature(&lookup, &pelosi));
        assert!(shapes[0].popup.as_deref().unwrap().contains("Nancy Pelosi"));
    }
}
