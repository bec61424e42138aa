//! Fill colours and shape styles derived from party affiliation.

use serde::{Deserialize, Serialize};

pub const DEMOCRAT_BLUE: &str = "#3b82f6";
pub const REPUBLICAN_RED: &str = "#ef4444";
/// Fallback for codes outside the two known parties and for unjoined shapes.
pub const UNKNOWN_GRAY: &str = "#6b7280";
pub const BORDER_WHITE: &str = "#ffffff";

/// Party code used for shapes that have no joined record.
pub const UNKNOWN_PARTY: &str = "Unknown";

pub fn party_color(code: &str) -> &'static str {
    match code {
        "D" => DEMOCRAT_BLUE,
        "R" => REPUBLICAN_RED,
        _ => UNKNOWN_GRAY,
    }
}

/// Path style in the shape understood by Leaflet's `setStyle`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShapeStyle {
    pub fill_color: String,
    pub weight: f64,
    pub opacity: f64,
    pub color: String,
    pub fill_opacity: f64,
}

impl ShapeStyle {
    /// Style of a shape at rest.
    pub fn resting(party_code: &str) -> Self {
        Self {
            fill_color: party_color(party_code).to_string(),
            weight: 1.0,
            opacity: 1.0,
            color: BORDER_WHITE.to_string(),
            fill_opacity: 0.7,
        }
    }
}
