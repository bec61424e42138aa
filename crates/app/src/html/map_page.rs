//! The California House map page.
//!
//! The page renders immediately; the district layer is fetched by the browser
//! from the layer endpoint and simply never appears if that request fails.

use askama::Template;
use districts::style::{DEMOCRAT_BLUE, REPUBLICAN_RED};

/// Where the browser fetches the joined district layer.
pub const LAYER_PATH: &str = "/api/districts.geojson";

/// Initial Leaflet viewport.
#[derive(Clone, Debug)]
pub struct MapViewport {
    pub latitude: f64,
    pub longitude: f64,
    pub zoom: u8,
    /// Zoom used on narrow screens (under 640px wide).
    pub mobile_zoom: u8,
    pub min_zoom: u8,
    pub max_zoom: u8,
    pub tile_url: String,
}

impl Default for MapViewport {
    fn default() -> Self {
        Self {
            latitude: 36.7783,
            longitude: -119.4179,
            zoom: 6,
            mobile_zoom: 8,
            min_zoom: 5,
            max_zoom: 12,
            tile_url: "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png".into(),
        }
    }
}

#[derive(Template)]
#[template(path = "map.html")]
pub struct MapPageTemplate<'a> {
    pub viewport: &'a MapViewport,
    pub democrat_color: &'static str,
    pub republican_color: &'static str,
    pub layer_path: &'static str,
}

impl<'a> MapPageTemplate<'a> {
    pub fn new(viewport: &'a MapViewport) -> Self {
        Self {
            viewport,
            democrat_color: DEMOCRAT_BLUE,
            republican_color: REPUBLICAN_RED,
            layer_path: LAYER_PATH,
        }
    }
}

pub fn render_map_page(viewport: &MapViewport) -> askama::Result<String> {
    MapPageTemplate::new(viewport).render()
}
