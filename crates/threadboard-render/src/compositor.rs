//! Texture compositor: bakes base color, base texture, and text overlays
//! into the live garment texture.

use crate::assets::AssetStore;
use crate::fonts::FontCatalog;
use ab_glyph::{Font, FontArc, GlyphId, PxScale, ScaleFont};
use image::{imageops, Rgba as RgbaPixel, RgbaImage};
use threadboard_core::color::Rgba;
use threadboard_core::elements::TextElement;
use threadboard_core::engine::DesignEngine;
use threadboard_core::mapper;
use threadboard_core::model::ModelConfig;

/// Side length of the square composited surface, in pixels.
pub const SURFACE_SIZE: u32 = 1024;

/// Smallest effective glyph size; anything below renders illegibly.
pub const MIN_TEXT_PX: f64 = 12.0;

/// Coverage below this is treated as empty when plotting glyphs.
const COVERAGE_CUTOFF: f32 = 0.05;

/// One-pixel offsets for the contrast outline pass.
const OUTLINE_OFFSETS: [(f32, f32); 8] = [
    (-1.0, -1.0),
    (0.0, -1.0),
    (1.0, -1.0),
    (-1.0, 0.0),
    (1.0, 0.0),
    (-1.0, 1.0),
    (0.0, 1.0),
    (1.0, 1.0),
];

/// Owns the off-screen raster surface the 3D renderer binds as the garment
/// texture.
///
/// Recomposition is synchronous and runs only when the engine's texture
/// revision moves; the surface is static between edits. The compositor's own
/// revision tells the renderer when to re-upload.
#[derive(Debug)]
pub struct TextureCompositor {
    surface: RgbaImage,
    revision: u64,
    last_engine_revision: Option<u64>,
}

impl Default for TextureCompositor {
    fn default() -> Self {
        Self::new()
    }
}

impl TextureCompositor {
    pub fn new() -> Self {
        Self {
            surface: RgbaImage::new(SURFACE_SIZE, SURFACE_SIZE),
            revision: 0,
            last_engine_revision: None,
        }
    }

    /// The composited surface.
    pub fn surface(&self) -> &RgbaImage {
        &self.surface
    }

    /// Bumped on every recomposition; the renderer re-uploads when it moves.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Recomposite only if the engine state changed since the last call.
    /// Returns whether a recomposition happened.
    pub fn composite_if_changed(
        &mut self,
        engine: &DesignEngine,
        assets: &mut AssetStore,
        fonts: &FontCatalog,
    ) -> bool {
        let engine_revision = engine.texture_revision();
        if self.last_engine_revision == Some(engine_revision) {
            return false;
        }
        self.composite(engine.model(), engine.store().texts(), assets, fonts);
        self.last_engine_revision = Some(engine_revision);
        true
    }

    /// Rebuild the surface: base color, base texture, then every
    /// UV-positioned text element in store (paint) order.
    pub fn composite<'a>(
        &mut self,
        model: &ModelConfig,
        texts: impl IntoIterator<Item = &'a TextElement>,
        assets: &mut AssetStore,
        fonts: &FontCatalog,
    ) {
        let base = model.base_color;
        for pixel in self.surface.pixels_mut() {
            *pixel = RgbaPixel([base.r, base.g, base.b, 255]);
        }

        if let Some(url) = &model.base_texture_url {
            match assets.resolve(url) {
                Some(texture) => {
                    let resized = imageops::resize(
                        texture,
                        SURFACE_SIZE,
                        SURFACE_SIZE,
                        imageops::FilterType::Triangle,
                    );
                    imageops::overlay(&mut self.surface, &resized, 0, 0);
                }
                None => {
                    log::warn!("base texture {url:?} unavailable, keeping solid base color");
                }
            }
        }

        for text in texts {
            if text.uv().is_none() {
                // Model-space text is billboarded by the external renderer.
                continue;
            }
            match fonts.get(&text.font_family) {
                Some(font) => draw_text(&mut self.surface, text, font),
                None => {
                    log::warn!(
                        "font family {:?} not registered, skipping text {}",
                        text.font_family,
                        text.id()
                    );
                }
            }
        }

        self.revision += 1;
    }
}

/// Rasterize one text element onto the surface, centered at its UV position.
fn draw_text(surface: &mut RgbaImage, text: &TextElement, font: &FontArc) {
    let Some(uv) = text.uv() else { return };
    if text.content.is_empty() {
        return;
    }

    let size = PxScale::from((text.font_size * text.scale).max(MIN_TEXT_PX) as f32);
    let scaled = font.as_scaled(size);

    // Single-line layout width, with kerning.
    let mut width = 0.0f32;
    let mut prev: Option<GlyphId> = None;
    for ch in text.content.chars() {
        let id = font.glyph_id(ch);
        if let Some(prev) = prev {
            width += scaled.kern(prev, id);
        }
        width += scaled.h_advance(id);
        prev = Some(id);
    }
    let height = scaled.height();

    let (cx, cy) = mapper::uv_to_surface_pixel(uv, surface.width(), surface.height());
    let (cx, cy) = (cx as f32, cy as f32);
    let origin_x = cx - width / 2.0;
    let baseline = cy - height / 2.0 + scaled.ascent();

    let fill = text.color;
    let outline = if fill.luminance() > 0.5 {
        Rgba::black()
    } else {
        Rgba::white()
    };
    let (sin, cos) = ((text.rotation as f32).sin(), (text.rotation as f32).cos());

    let mut pass = |offset_x: f32, offset_y: f32, color: Rgba| {
        let mut pen_x = origin_x;
        let mut prev: Option<GlyphId> = None;
        for ch in text.content.chars() {
            let id = font.glyph_id(ch);
            if let Some(prev) = prev {
                pen_x += scaled.kern(prev, id);
            }
            let glyph = id.with_scale_and_position(size, ab_glyph::point(pen_x, baseline));
            if let Some(outlined) = font.outline_glyph(glyph) {
                let bounds = outlined.px_bounds();
                outlined.draw(|px, py, coverage| {
                    if coverage < COVERAGE_CUTOFF {
                        return;
                    }
                    let gx = bounds.min.x + px as f32;
                    let gy = bounds.min.y + py as f32;
                    // Rotate glyph pixels around the element center.
                    let (lx, ly) = (gx - cx, gy - cy);
                    let x = cx + lx * cos - ly * sin + offset_x;
                    let y = cy + lx * sin + ly * cos + offset_y;
                    blend_pixel(surface, x, y, color, coverage);
                });
            }
            pen_x += scaled.h_advance(id);
            prev = Some(id);
        }
    };

    for (dx, dy) in OUTLINE_OFFSETS {
        pass(dx, dy, outline);
    }
    pass(0.0, 0.0, fill);
}

/// Alpha-blend a coverage sample into the (opaque) surface.
fn blend_pixel(surface: &mut RgbaImage, x: f32, y: f32, color: Rgba, coverage: f32) {
    if !x.is_finite() || !y.is_finite() {
        return;
    }
    let (px, py) = (x.round() as i64, y.round() as i64);
    if px < 0 || py < 0 || px >= surface.width() as i64 || py >= surface.height() as i64 {
        return;
    }
    let alpha = coverage.clamp(0.0, 1.0) * (color.a as f32 / 255.0);
    let pixel = surface.get_pixel_mut(px as u32, py as u32);
    for (channel, source) in [color.r, color.g, color.b].into_iter().enumerate() {
        let destination = pixel.0[channel] as f32;
        pixel.0[channel] = (source as f32 * alpha + destination * (1.0 - alpha)).round() as u8;
    }
    pixel.0[3] = 255;
}
