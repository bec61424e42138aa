//! Rendering surfaces the map view draws into.
//!
//! [`MapSurface`] is the seam between the composition flow and whatever
//! actually paints shapes. [`ShapeLayer`] is the in-process surface: it keeps
//! per-shape style state, applies pointer events, and exports the drawn layer
//! as GeoJSON for the browser's Leaflet glue.

use geojson::{Bbox, FeatureCollection, Value as GeoValue};
use serde_json::{Value, json};
use thiserror::Error;

use crate::{InteractionHandlers, PointerEvent, ShapeStyle, StyledShape};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SurfaceError {
    #[error("map surface has already been released")]
    Released,
}

/// A scoped drawing target for district shapes.
pub trait MapSurface {
    /// Draw `shapes` and bind `handlers` to each of them.
    fn render_shapes(
        &mut self,
        shapes: Vec<StyledShape>,
        handlers: &InteractionHandlers,
    ) -> Result<(), SurfaceError>;

    /// Drop every shape and handler. Calling this twice is harmless.
    fn release(&mut self);

    fn is_released(&self) -> bool;
}

#[derive(Clone, Debug)]
struct DrawnShape {
    shape: StyledShape,
    current: ShapeStyle,
}

#[derive(Debug, Default)]
pub struct ShapeLayer {
    shapes: Vec<DrawnShape>,
    /// Shape indices, bottom first.
    draw_order: Vec<usize>,
    handlers: Option<InteractionHandlers>,
    open_popup: Option<usize>,
    released: bool,
}

impl ShapeLayer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    pub fn shape(&self, index: usize) -> Option<&StyledShape> {
        self.shapes.get(index).map(|drawn| &drawn.shape)
    }

    /// Style currently applied to a shape.
    pub fn current_style(&self, index: usize) -> Option<&ShapeStyle> {
        self.shapes.get(index).map(|drawn| &drawn.current)
    }

    pub fn draw_order(&self) -> &[usize] {
        &self.draw_order
    }

    /// Index of the first shape drawn for `district`.
    pub fn index_of(&self, district: u32) -> Option<usize> {
        self.shapes
            .iter()
            .position(|drawn| drawn.shape.district == Some(district))
    }

    /// Content of the popup currently shown, if any.
    pub fn open_popup(&self) -> Option<&str> {
        self.open_popup
            .and_then(|index| self.shapes.get(index))
            .and_then(|drawn| drawn.shape.popup.as_deref())
    }

    /// Deliver a pointer event to one shape. Returns `false` when nothing
    /// handled it (unknown index, released layer, no popup bound).
    pub fn pointer(&mut self, index: usize, event: PointerEvent) -> bool {
        let Some(handlers) = self.handlers.as_ref() else {
            return false;
        };
        let Some(drawn) = self.shapes.get_mut(index) else {
            return false;
        };
        match event {
            PointerEvent::Enter => {
                drawn.current = handlers.hover.apply(&drawn.shape.style);
                if handlers.raise_on_hover {
                    self.draw_order.retain(|&i| i != index);
                    self.draw_order.push(index);
                }
                true
            }
            PointerEvent::Leave => {
                drawn.current = drawn.shape.style.clone();
                true
            }
            PointerEvent::Click => {
                if handlers.popup_on_click && drawn.shape.popup.is_some() {
                    self.open_popup = Some(index);
                    true
                } else {
                    false
                }
            }
        }
    }

    pub fn close_popup(&mut self) {
        self.open_popup = None;
    }

    /// `[west, south, east, north]` over every drawn shape.
    pub fn bounds(&self) -> Option<Bbox> {
        let mut bounds: Option<[f64; 4]> = None;
        for drawn in &self.shapes {
            if let Some(geometry) = drawn.shape.feature.geometry.as_ref() {
                extend_bounds(&geometry.value, &mut bounds);
            }
        }
        bounds.map(|b| b.to_vec())
    }

    /// GeoJSON for the browser: each feature carries its district, party,
    /// resting and highlight styles and popup markup as properties.
    pub fn to_feature_collection(&self) -> FeatureCollection {
        let hover = self.handlers.clone().unwrap_or_default().hover;
        let features = self
            .shapes
            .iter()
            .map(|drawn| {
                let shape = &drawn.shape;
                let mut feature = shape.feature.clone();
                let properties = feature.properties.get_or_insert_with(Default::default);
                properties.insert("district".into(), json!(shape.district));
                properties.insert("party".into(), json!(shape.party));
                properties.insert("partyLabel".into(), json!(shape.party_label()));
                properties.insert("style".into(), json!(shape.style));
                properties.insert("highlight".into(), json!(hover.apply(&shape.style)));
                properties.insert(
                    "popup".into(),
                    shape.popup.clone().map_or(Value::Null, Value::String),
                );
                feature
            })
            .collect();
        FeatureCollection {
            bbox: self.bounds(),
            features,
            foreign_members: None,
        }
    }
}

impl MapSurface for ShapeLayer {
    fn render_shapes(
        &mut self,
        shapes: Vec<StyledShape>,
        handlers: &InteractionHandlers,
    ) -> Result<(), SurfaceError> {
        if self.released {
            return Err(SurfaceError::Released);
        }
        self.handlers = Some(handlers.clone());
        for shape in shapes {
            self.draw_order.push(self.shapes.len());
            self.shapes.push(DrawnShape {
                current: shape.style.clone(),
                shape,
            });
        }
        Ok(())
    }

    fn release(&mut self) {
        self.shapes.clear();
        self.draw_order.clear();
        self.handlers = None;
        self.open_popup = None;
        self.released = true;
    }

    fn is_released(&self) -> bool {
        self.released
    }
}

fn extend_bounds(value: &GeoValue, bounds: &mut Option<[f64; 4]>) {
    match value {
        GeoValue::Point(p) => take_position(p, bounds),
        GeoValue::MultiPoint(ps) | GeoValue::LineString(ps) => {
            ps.iter().for_each(|p| take_position(p, bounds))
        }
        GeoValue::MultiLineString(lines) | GeoValue::Polygon(lines) => lines
            .iter()
            .flatten()
            .for_each(|p| take_position(p, bounds)),
        GeoValue::MultiPolygon(polygons) => polygons
            .iter()
            .flatten()
            .flatten()
            .for_each(|p| take_position(p, bounds)),
        GeoValue::GeometryCollection(geometries) => {
            for geometry in geometries {
                extend_bounds(&geometry.value, bounds);
            }
        }
    }
}

fn take_position(position: &[f64], bounds: &mut Option<[f64; 4]>) {
    if let &[x, y, ..] = position {
        let b = bounds.get_or_insert([x, y, x, y]);
        b[0] = b[0].min(x);
        b[1] = b[1].min(y);
        b[2] = b[2].max(x);
        b[3] = b[3].max(y);
    }
}
