//! Image overlay element (decal).

use super::ElementId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An image decal placed near the garment surface.
///
/// Decals are not baked into the composited texture; the external renderer
/// draws them as camera-facing billboards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageElement {
    pub(crate) id: ElementId,
    /// Opaque handle to the raster data, resolved by the asset store.
    pub source_url: String,
    /// Model-space position.
    pub position: [f64; 3],
    /// Size multiplier.
    pub scale: f64,
    /// Rotation angle in radians (around the view axis).
    pub rotation: f64,
    /// Opacity in `[0, 1]`.
    pub opacity: f64,
}

impl ImageElement {
    /// Create a new decal at the given model-space position.
    pub fn new(source_url: impl Into<String>, position: [f64; 3]) -> Self {
        Self {
            id: Uuid::new_v4(),
            source_url: source_url.into(),
            position,
            scale: 1.0,
            rotation: 0.0,
            opacity: 1.0,
        }
    }

    /// Set the size multiplier.
    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    /// Set the opacity, clamped into `[0, 1]`.
    pub fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity = opacity.clamp(0.0, 1.0);
        self
    }

    pub fn id(&self) -> ElementId {
        self.id
    }
}
