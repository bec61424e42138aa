use std::fmt;

use serde::{Deserialize, Serialize};

/// One seat in the House delegation, keyed by district number.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DistrictRecord {
    pub district: u32,
    pub name: String,
    /// Party code as written in the dataset, normally `D` or `R`.
    pub party: String,
    pub tenure: String,
    pub district_wikipedia: String,
    pub representative_wikipedia: String,
}

impl DistrictRecord {
    pub fn party(&self) -> Party {
        Party::from_code(&self.party)
    }
}

/// Interpretation of a party code.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Party {
    Democrat,
    Republican,
    /// Any other code, kept verbatim so it can be shown as-is.
    Other(String),
}

impl Party {
    pub fn from_code(code: &str) -> Self {
        match code {
            "D" => Party::Democrat,
            "R" => Party::Republican,
            other => Party::Other(other.to_string()),
        }
    }

    pub fn code(&self) -> &str {
        match self {
            Party::Democrat => "D",
            Party::Republican => "R",
            Party::Other(code) => code,
        }
    }

    /// Display label; unknown codes fall through literally.
    pub fn label(&self) -> &str {
        match self {
            Party::Democrat => "Democrat",
            Party::Republican => "Republican",
            Party::Other(code) => code,
        }
    }
}

impl fmt::Display for Party {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_codes_have_names() {
        assert_eq!(Party::from_code("D"), Party::Democrat);
        assert_eq!(Party::from_code("R"), Party::Republican);
        assert_eq!(Party::Democrat.label(), "Democrat");
        assert_eq!(Party::Republican.to_string(), "Republican");
    }

    #[test]
    fn unknown_code_passes_through() {
        let party = Party::from_code("I");
        assert_eq!(party, Party::Other("I".into()));
        assert_eq!(party.label(), "I");
        assert_eq!(party.code(), "I");
        // Codes are case sensitive.
        assert_eq!(Party::from_code("d").label(), "d");
    }

    #[test]
    fn record_uses_camel_case_fields() {
        let record: DistrictRecord = serde_json::from_str(
            r#"{
                "district": 12,
                "name": "Jane Doe",
                "party": "D",
                "tenure": "2019–present",
                "districtWikipedia": "https://example.org/d12",
                "representativeWikipedia": "https://example.org/jane"
            }"#,
        )
        .unwrap();
        assert_eq!(record.district, 12);
        assert_eq!(record.district_wikipedia, "https://example.org/d12");
        assert_eq!(record.representative_wikipedia, "https://example.org/jane");
        assert_eq!(record.party(), Party::Democrat);

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["districtWikipedia"], "https://example.org/d12");
    }
}
