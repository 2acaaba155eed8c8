//! Coordinate conversions between screen, UV, and model space.
//!
//! Pure functions with no owned state. Every conversion clamps its result
//! into the declared range; a zero-size source rectangle yields `None` so
//! callers retain the previous position instead of propagating NaN.

use crate::panels::UvRect;
use kurbo::{Point, Rect};

/// Scale applied to normalized device coordinates when projecting onto the
/// garment, keeping placements inside the printable region.
pub const PLACEMENT_RANGE: f64 = 0.8;

/// Vertical bias that centers default placements on the chest area.
pub const CHEST_OFFSET_Y: f64 = 0.35;

/// Overlays sit this far in front of the garment surface so they never
/// z-fight with the base mesh.
pub const SURFACE_OFFSET_Z: f64 = 0.1;

/// Convert a client-space pointer position to normalized device coordinates
/// in `[-1, 1]²`, Y up.
///
/// Returns `None` if the bounding rectangle has no area.
pub fn screen_to_normalized(client: Point, rect: Rect) -> Option<Point> {
    if rect.width() <= 0.0 || rect.height() <= 0.0 {
        return None;
    }
    let x = (client.x - rect.x0) / rect.width() * 2.0 - 1.0;
    let y = -((client.y - rect.y0) / rect.height() * 2.0 - 1.0);
    Some(Point::new(x.clamp(-1.0, 1.0), y.clamp(-1.0, 1.0)))
}

/// Project normalized device coordinates onto model space.
pub fn normalized_to_model_space(normalized: Point) -> [f64; 3] {
    let x = (normalized.x * PLACEMENT_RANGE).clamp(-PLACEMENT_RANGE, PLACEMENT_RANGE);
    let y = (normalized.y * PLACEMENT_RANGE).clamp(-PLACEMENT_RANGE, PLACEMENT_RANGE) + CHEST_OFFSET_Y;
    [x, y, SURFACE_OFFSET_Z]
}

/// Convert a client-space pointer position to model space in one step.
pub fn screen_to_model_space(client: Point, rect: Rect) -> Option<[f64; 3]> {
    screen_to_normalized(client, rect).map(normalized_to_model_space)
}

/// Map a click inside a 2D preview panel into the UV sub-rectangle reserved
/// for that panel.
///
/// Returns `None` if the panel rectangle has no area.
pub fn screen_to_uv(client: Point, canvas_rect: Rect, area: UvRect) -> Option<[f64; 2]> {
    if canvas_rect.width() <= 0.0 || canvas_rect.height() <= 0.0 {
        return None;
    }
    let fx = ((client.x - canvas_rect.x0) / canvas_rect.width()).clamp(0.0, 1.0);
    let fy = ((client.y - canvas_rect.y0) / canvas_rect.height()).clamp(0.0, 1.0);
    let u = area.min[0] + fx * area.width();
    let v = area.min[1] + fy * area.height();
    Some(area.clamp([u, v]))
}

/// Map a UV coordinate to pixel coordinates on a raster surface.
pub fn uv_to_surface_pixel(uv: [f64; 2], width: u32, height: u32) -> (f64, f64) {
    (
        (uv[0].clamp(0.0, 1.0)) * width as f64,
        (uv[1].clamp(0.0, 1.0)) * height as f64,
    )
}

/// Map surface pixel coordinates back to UV. Inverse of [`uv_to_surface_pixel`].
pub fn surface_pixel_to_uv(px: f64, py: f64, width: u32, height: u32) -> [f64; 2] {
    if width == 0 || height == 0 {
        return [0.0, 0.0];
    }
    [
        (px / width as f64).clamp(0.0, 1.0),
        (py / height as f64).clamp(0.0, 1.0),
    ]
}
