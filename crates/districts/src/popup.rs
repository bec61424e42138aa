//! Informational overlay shown when a district is clicked.

use askama::Template;

use crate::{DistrictRecord, Party, style::party_color};

/// English ordinal suffix for `n` (1st, 2nd, 3rd, 11th, 22nd, ...).
pub fn ordinal_suffix(n: u32) -> &'static str {
    let (j, k) = (n % 10, n % 100);
    match (j, k) {
        (1, k) if k != 11 => "st",
        (2, k) if k != 12 => "nd",
        (3, k) if k != 13 => "rd",
        _ => "th",
    }
}

/// Popup markup for one record. Record text is HTML-escaped on render.
#[derive(Debug, Template)]
#[template(path = "popup.html")]
pub struct PopupTemplate<'a> {
    pub district: u32,
    pub suffix: &'static str,
    pub district_href: &'a str,
    pub representative_href: &'a str,
    pub name: &'a str,
    pub color: &'static str,
    pub party: Party,
    pub tenure: &'a str,
}

impl<'a> PopupTemplate<'a> {
    pub fn for_record(record: &'a DistrictRecord) -> Self {
        Self {
            district: record.district,
            suffix: ordinal_suffix(record.district),
            district_href: &record.district_wikipedia,
            representative_href: &record.representative_wikipedia,
            name: &record.name,
            color: party_color(&record.party),
            party: record.party(),
            tenure: &record.tenure,
        }
    }
}

/// Render the popup for a joined record.
pub fn popup_html(record: &DistrictRecord) -> askama::Result<String> {
    PopupTemplate::for_record(record).render()
}
