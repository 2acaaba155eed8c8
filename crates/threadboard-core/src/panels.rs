//! Garment panel areas in UV space.

use serde::{Deserialize, Serialize};

/// A garment panel (side of the garment a design lands on).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PanelArea {
    #[default]
    Front,
    Back,
}

impl PanelArea {
    /// Get display name for UI.
    pub fn display_name(&self) -> &'static str {
        match self {
            PanelArea::Front => "Front",
            PanelArea::Back => "Back",
        }
    }
}

/// An axis-aligned sub-rectangle of UV space, `min`/`max` in `[0, 1]²`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UvRect {
    pub min: [f64; 2],
    pub max: [f64; 2],
}

impl UvRect {
    pub fn new(min: [f64; 2], max: [f64; 2]) -> Self {
        Self { min, max }
    }

    /// The full `[0, 1]²` UV square.
    pub fn full() -> Self {
        Self::new([0.0, 0.0], [1.0, 1.0])
    }

    pub fn width(&self) -> f64 {
        self.max[0] - self.min[0]
    }

    pub fn height(&self) -> f64 {
        self.max[1] - self.min[1]
    }

    pub fn center(&self) -> [f64; 2] {
        [
            (self.min[0] + self.max[0]) / 2.0,
            (self.min[1] + self.max[1]) / 2.0,
        ]
    }

    /// Clamp a UV coordinate into this rectangle.
    pub fn clamp(&self, uv: [f64; 2]) -> [f64; 2] {
        [
            uv[0].clamp(self.min[0], self.max[0]),
            uv[1].clamp(self.min[1], self.max[1]),
        ]
    }

    fn expand_to(&mut self, u: f64, v: f64) {
        self.min[0] = self.min[0].min(u);
        self.min[1] = self.min[1].min(v);
        self.max[0] = self.max[0].max(u);
        self.max[1] = self.max[1].max(v);
    }
}

/// The UV sub-rectangles reserved for each garment panel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UvBounds {
    pub front: UvRect,
    pub back: UvRect,
}

impl Default for UvBounds {
    fn default() -> Self {
        Self::garment_default()
    }
}

impl UvBounds {
    /// The default placement areas, centered on each panel.
    pub fn garment_default() -> Self {
        Self {
            front: UvRect::new([0.25, 0.25], [0.75, 0.75]),
            back: UvRect::new([0.25, 0.25], [0.75, 0.75]),
        }
    }

    /// Get the bounds for one panel.
    pub fn area(&self, area: PanelArea) -> UvRect {
        match area {
            PanelArea::Front => self.front,
            PanelArea::Back => self.back,
        }
    }

    /// Derive per-panel UV bounds from mesh vertex data.
    ///
    /// Takes `(position, uv)` pairs and accumulates the UV extent of front
    /// and back vertices separately. Front faces the positive Z direction.
    /// Panels with no vertices fall back to the garment default.
    pub fn analyze(vertices: impl IntoIterator<Item = ([f32; 3], [f32; 2])>) -> Self {
        let mut front = UvRect::new([1.0, 1.0], [0.0, 0.0]);
        let mut back = UvRect::new([1.0, 1.0], [0.0, 0.0]);
        let mut front_count = 0usize;
        let mut back_count = 0usize;

        for (position, uv) in vertices {
            let (u, v) = (uv[0] as f64, uv[1] as f64);
            if position[2] >= 0.0 {
                front.expand_to(u, v);
                front_count += 1;
            } else {
                back.expand_to(u, v);
                back_count += 1;
            }
        }

        log::debug!(
            "analyzed UV bounds: {} front vertices, {} back vertices",
            front_count,
            back_count
        );

        let fallback = Self::garment_default();
        Self {
            front: if front_count > 0 { front } else { fallback.front },
            back: if back_count > 0 { back } else { fallback.back },
        }
    }
}
