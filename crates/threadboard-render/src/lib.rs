//! Threadboard Render Library
//!
//! The asset and compositing side of the Threadboard garment designer:
//! decoded-image and font caches, and the texture compositor that bakes the
//! base color, base texture, and text overlays into the live garment texture
//! consumed by the external 3D renderer.

pub mod assets;
pub mod compositor;
pub mod fonts;

pub use assets::{AssetError, AssetStore};
pub use compositor::{TextureCompositor, MIN_TEXT_PX, SURFACE_SIZE};
pub use fonts::{FontCatalog, FontError};
