//! Text overlay element.

use super::ElementId;
use crate::color::Rgba;
use crate::panels::PanelArea;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Content given to freshly placed text before the user types anything.
pub const DEFAULT_TEXT_CONTENT: &str = "Your Text Here";

/// Where a text element lives.
///
/// UV-positioned text is baked into the composited garment texture;
/// model-space text is rendered as a camera-facing billboard by the
/// external renderer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextPosition {
    /// UV pair in `[0, 1]²` on a garment panel.
    Uv([f64; 2]),
    /// Model-space triple.
    Model([f64; 3]),
}

/// Style configuration carried by a text-add command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextConfig {
    pub font_size: f64,
    pub font_family: String,
    pub color: Rgba,
}

impl Default for TextConfig {
    fn default() -> Self {
        Self {
            font_size: TextElement::DEFAULT_FONT_SIZE,
            font_family: "Open Sans".to_string(),
            color: Rgba::black(),
        }
    }
}

/// A text overlay placed on the garment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextElement {
    pub(crate) id: ElementId,
    /// The text content.
    pub content: String,
    /// Font family name, resolved by the render-side font catalog.
    pub font_family: String,
    /// Font size in pixel-equivalents.
    pub font_size: f64,
    /// Fill color.
    pub color: Rgba,
    /// Placement, UV or model space.
    pub position: TextPosition,
    /// Rotation angle in radians (around center).
    pub rotation: f64,
    /// Size multiplier on top of `font_size`.
    pub scale: f64,
    /// Which garment panel the element belongs to.
    pub area: PanelArea,
    /// Whether this element is currently being edited. At most one text
    /// element has this set at any time; the controller enforces it.
    pub is_editing: bool,
}

impl TextElement {
    pub const DEFAULT_FONT_SIZE: f64 = 16.0;

    /// Create a new text element at the given placement.
    pub fn new(position: TextPosition, config: TextConfig) -> Self {
        Self {
            id: Uuid::new_v4(),
            content: DEFAULT_TEXT_CONTENT.to_string(),
            font_family: config.font_family,
            font_size: config.font_size,
            color: config.color,
            position,
            rotation: 0.0,
            scale: 1.0,
            area: PanelArea::Front,
            is_editing: false,
        }
    }

    /// Set the panel area.
    pub fn with_area(mut self, area: PanelArea) -> Self {
        self.area = area;
        self
    }

    /// Set the content.
    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    pub fn id(&self) -> ElementId {
        self.id
    }

    /// The UV coordinate if this element is baked into the surface texture.
    pub fn uv(&self) -> Option<[f64; 2]> {
        match self.position {
            TextPosition::Uv(uv) => Some(uv),
            TextPosition::Model(_) => None,
        }
    }
}
