//! Overlay element definitions.

mod image;
mod text;

pub use image::ImageElement;
pub use text::{TextConfig, TextElement, TextPosition, DEFAULT_TEXT_CONTENT};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for placed elements.
pub type ElementId = Uuid;

/// The two kinds of placeable overlay elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    Text,
    Image,
}
