//! Guided-placement preview for the 2D garment panels.
//!
//! Maps clicks inside a flat front/back panel view into panel UV space and
//! describes the guide overlay (placement area, grid, crosshair, corner
//! ticks) as pure geometry, so a host UI can draw it in any toolkit.

use crate::mapper;
use crate::panels::{PanelArea, UvBounds};
use kurbo::{Point, Rect, Size};
use serde::{Deserialize, Serialize};

/// Interior grid divisions per axis inside the placement area.
const GRID_DIVISIONS: usize = 4;
/// Crosshair arm length in pixels.
const CROSSHAIR_ARM: f64 = 20.0;
/// Crosshair circle radius in pixels.
const CROSSHAIR_RADIUS: f64 = 10.0;
/// Corner tick length in pixels.
const CORNER_TICK: f64 = 15.0;

/// Pixel-space description of the placement guide overlay.
#[derive(Debug, Clone, PartialEq)]
pub struct PreviewGeometry {
    /// The placement area rectangle.
    pub placement: Rect,
    /// X positions of the interior vertical grid lines.
    pub vertical_lines: Vec<f64>,
    /// Y positions of the interior horizontal grid lines.
    pub horizontal_lines: Vec<f64>,
    /// Center crosshair position.
    pub crosshair: Point,
    /// Crosshair arm length.
    pub crosshair_arm: f64,
    /// Crosshair circle radius.
    pub crosshair_radius: f64,
    /// Corner tick length.
    pub corner_tick: f64,
}

/// The 2D guided-placement preview state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlacementPreview {
    /// UV areas of the garment panels.
    pub bounds: UvBounds,
    /// Which panel the preview currently shows.
    pub active_area: PanelArea,
}

impl Default for PlacementPreview {
    fn default() -> Self {
        Self {
            bounds: UvBounds::garment_default(),
            active_area: PanelArea::Front,
        }
    }
}

impl PlacementPreview {
    pub fn new(bounds: UvBounds) -> Self {
        Self {
            bounds,
            active_area: PanelArea::Front,
        }
    }

    /// Switch the displayed panel.
    pub fn set_active_area(&mut self, area: PanelArea) {
        self.active_area = area;
    }

    /// Map a click inside the preview canvas to a UV placement on the
    /// active panel. Returns `None` for a degenerate canvas rectangle.
    pub fn click_to_uv(&self, client: Point, canvas_rect: Rect) -> Option<([f64; 2], PanelArea)> {
        let area = self.active_area;
        mapper::screen_to_uv(client, canvas_rect, self.bounds.area(area)).map(|uv| (uv, area))
    }

    /// Compute the guide overlay geometry for a preview canvas of the given
    /// size.
    pub fn geometry(&self, canvas: Size) -> PreviewGeometry {
        let area = self.bounds.area(self.active_area);
        let placement = Rect::new(
            canvas.width * area.min[0],
            canvas.height * area.min[1],
            canvas.width * area.max[0],
            canvas.height * area.max[1],
        );

        let vertical_spacing = placement.width() / GRID_DIVISIONS as f64;
        let horizontal_spacing = placement.height() / GRID_DIVISIONS as f64;
        let vertical_lines = (1..GRID_DIVISIONS)
            .map(|i| placement.x0 + vertical_spacing * i as f64)
            .collect();
        let horizontal_lines = (1..GRID_DIVISIONS)
            .map(|i| placement.y0 + horizontal_spacing * i as f64)
            .collect();

        PreviewGeometry {
            placement,
            vertical_lines,
            horizontal_lines,
            crosshair: placement.center(),
            crosshair_arm: CROSSHAIR_ARM,
            crosshair_radius: CROSSHAIR_RADIUS,
            corner_tick: CORNER_TICK,
        }
    }
}

/// Fit an image into a canvas, preserving aspect ratio and centering.
/// Returns the rectangle the image should be drawn into.
pub fn fit_within(image: Size, canvas: Size) -> Rect {
    if image.width <= 0.0 || image.height <= 0.0 {
        return Rect::ZERO;
    }
    let image_aspect = image.width / image.height;
    let canvas_aspect = canvas.width / canvas.height;

    let (render_width, render_height) = if image_aspect > canvas_aspect {
        (canvas.width, canvas.width / image_aspect)
    } else {
        (canvas.height * image_aspect, canvas.height)
    };
    let offset_x = (canvas.width - render_width) / 2.0;
    let offset_y = (canvas.height - render_height) / 2.0;
    Rect::new(
        offset_x,
        offset_y,
        offset_x + render_width,
        offset_y + render_height,
    )
}
