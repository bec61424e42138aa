use serde::Serialize;

use crate::{ShapeStyle, style::BORDER_WHITE};

/// Pointer input delivered to a drawn shape.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerEvent {
    Enter,
    Leave,
    Click,
}

/// Emphasis applied while the pointer is over a shape.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HoverEmphasis {
    pub weight: f64,
    pub color: String,
    pub fill_opacity: f64,
}

impl Default for HoverEmphasis {
    fn default() -> Self {
        Self {
            weight: 3.0,
            color: BORDER_WHITE.to_string(),
            fill_opacity: 0.9,
        }
    }
}

impl HoverEmphasis {
    /// Highlighted variant of `resting`; fill colour and stroke opacity are kept.
    pub fn apply(&self, resting: &ShapeStyle) -> ShapeStyle {
        ShapeStyle {
            weight: self.weight,
            color: self.color.clone(),
            fill_opacity: self.fill_opacity,
            ..resting.clone()
        }
    }
}

/// Handlers a surface binds to every shape it draws.
#[derive(Clone, Debug, PartialEq)]
pub struct InteractionHandlers {
    pub hover: HoverEmphasis,
    /// Move the hovered shape to the top of the draw order.
    pub raise_on_hover: bool,
    pub popup_on_click: bool,
}

impl Default for InteractionHandlers {
    fn default() -> Self {
        Self {
            hover: HoverEmphasis::default(),
            raise_on_hover: true,
            popup_on_click: true,
        }
    }
}
