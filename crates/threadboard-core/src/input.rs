//! Pointer/keyboard event types and double-click detection.

use kurbo::Point;
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Pointer event on the design canvas.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum PointerEvent {
    Down { position: Point },
    Move { position: Point },
    Up { position: Point },
    /// Pointer left the canvas entirely.
    Leave,
}

/// Keyboard keys the engine reacts to (document-level keydown surface).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Key {
    Escape,
    Enter,
    Delete,
    Backspace,
}

/// Double-click detection constants.
const DOUBLE_CLICK_TIME_MS: u128 = 300;
const DOUBLE_CLICK_DISTANCE: f64 = 5.0;

/// Classification of a pointer-down event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickKind {
    Single,
    Double,
}

/// Detects double-clicks from successive pointer-down events.
///
/// Owned by the interaction controller; [`ClickTimer::reset`] is called on
/// teardown and after a completed second click so no stale window can fire
/// against removed elements.
#[derive(Debug, Clone, Default)]
pub struct ClickTimer {
    last_click: Option<(Instant, Point)>,
}

impl ClickTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a pointer-down and classify it.
    pub fn register_click(&mut self, position: Point) -> ClickKind {
        self.register_click_at(position, Instant::now())
    }

    /// Register a pointer-down with an explicit timestamp.
    pub fn register_click_at(&mut self, position: Point, at: Instant) -> ClickKind {
        if let Some((last_time, last_pos)) = self.last_click {
            let elapsed = at.duration_since(last_time).as_millis();
            let distance =
                ((position.x - last_pos.x).powi(2) + (position.y - last_pos.y).powi(2)).sqrt();
            if elapsed < DOUBLE_CLICK_TIME_MS && distance < DOUBLE_CLICK_DISTANCE {
                // Consume the window so a triple click does not chain.
                self.last_click = None;
                return ClickKind::Double;
            }
        }
        self.last_click = Some((at, position));
        ClickKind::Single
    }

    /// Cancel any pending double-click window.
    pub fn reset(&mut self) {
        self.last_click = None;
    }
}
