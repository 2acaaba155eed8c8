//! Design engine: command application, interaction routing, frame state.

use crate::bus::{Command, CommandBus};
use crate::color::Rgba;
use crate::controller::{InteractionController, Selection};
use crate::elements::{ElementId, ElementKind, ImageElement, TextConfig, TextElement, TextPosition};
use crate::input::{ClickKind, Key, PointerEvent};
use crate::mapper;
use crate::model::ModelConfig;
use crate::panels::UvBounds;
use crate::store::ElementStore;
use kurbo::{Point, Rect};

/// A text element plus its per-frame UI flags.
#[derive(Debug, Clone, Copy)]
pub struct TextView<'a> {
    pub element: &'a TextElement,
    pub is_selected: bool,
}

/// An image element plus its per-frame UI flags.
#[derive(Debug, Clone, Copy)]
pub struct ImageView<'a> {
    pub element: &'a ImageElement,
    pub is_selected: bool,
}

/// Outbound state the 3D render surface consumes each frame.
#[derive(Debug, Clone)]
pub struct FrameState<'a> {
    pub model: &'a ModelConfig,
    /// Text elements in paint order.
    pub texts: Vec<TextView<'a>>,
    /// Image decals in paint order.
    pub images: Vec<ImageView<'a>>,
    /// Revision of the baked surface; the renderer re-uploads when it moves.
    pub texture_revision: u64,
}

/// The placement and compositing engine.
///
/// Owns the element store, model configuration, and interaction state.
/// External collaborators mutate it exclusively through [`Command`]s and the
/// pointer/keyboard surface; the render side reads [`FrameState`] and the
/// texture revision.
#[derive(Debug, Default)]
pub struct DesignEngine {
    store: ElementStore,
    model: ModelConfig,
    controller: InteractionController,
    panels: UvBounds,
    /// Screen-space bounding rect of the 3D canvas, used for drag mapping.
    canvas_rect: Rect,
    /// Style applied to placement-created text, refreshed by begin-text-add.
    current_text_style: TextConfig,
    /// Bumped on every change that affects the baked surface.
    texture_revision: u64,
    /// Last pointer-down target, to keep double-click windows per element.
    last_click_target: Option<(ElementKind, ElementId)>,
}

impl DesignEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an engine with analyzed panel bounds.
    pub fn with_panels(panels: UvBounds) -> Self {
        Self {
            panels,
            ..Self::default()
        }
    }

    /// Set the screen-space bounding rect of the 3D canvas.
    pub fn set_canvas_rect(&mut self, rect: Rect) {
        self.canvas_rect = rect;
    }

    pub fn store(&self) -> &ElementStore {
        &self.store
    }

    pub fn model(&self) -> &ModelConfig {
        &self.model
    }

    pub fn panels(&self) -> &UvBounds {
        &self.panels
    }

    pub fn selection(&self) -> Option<Selection> {
        self.controller.selection()
    }

    pub fn is_editing(&self) -> bool {
        self.controller.is_editing()
    }

    pub fn placement_active(&self) -> bool {
        self.controller.placement_active()
    }

    /// Revision of the baked surface. Monotonic; moves only on state changes
    /// that the texture compositor bakes.
    pub fn texture_revision(&self) -> u64 {
        self.texture_revision
    }

    fn mark_texture_dirty(&mut self) {
        self.texture_revision += 1;
    }

    /// Drop all interaction state, cancelling any pending double-click
    /// window. Called on host teardown.
    pub fn reset_interaction(&mut self) {
        self.commit_editing();
        self.controller.reset();
        self.last_click_target = None;
    }

    // ---- Command application ------------------------------------------

    /// Apply a single command. Effects are visible before this returns.
    pub fn apply(&mut self, command: &Command) {
        match command {
            Command::BeginTextAdd {
                font_size,
                font_family,
                color,
            } => {
                let color = Rgba::from_hex(color).unwrap_or_else(|| {
                    log::warn!("begin-text-add with malformed color {color:?}");
                    TextConfig::default().color
                });
                let config = TextConfig {
                    font_size: *font_size,
                    font_family: font_family.clone(),
                    color,
                };
                self.current_text_style = config.clone();
                let uv = self.panels.front.center();
                let id = self.store.add_text(TextElement::new(TextPosition::Uv(uv), config));
                self.commit_editing();
                self.controller.select(ElementKind::Text, id);
                self.mark_texture_dirty();
            }
            Command::BeginTextAddAt { position, area } => {
                let uv = self.panels.area(*area).clamp(*position);
                let text = TextElement::new(TextPosition::Uv(uv), self.current_text_style.clone())
                    .with_area(*area);
                let id = self.store.add_text(text);
                self.start_editing(id);
                self.mark_texture_dirty();
            }
            Command::UpdateSelectedTextStyle {
                font_size,
                font_family,
                color,
            } => {
                let Some(id) = self.selected_text_id() else {
                    return;
                };
                let color = color.as_deref().and_then(Rgba::from_hex);
                let changed = self.store.update_text(id, |text| {
                    if let Some(size) = font_size {
                        text.font_size = *size;
                    }
                    if let Some(family) = font_family {
                        text.font_family = family.clone();
                    }
                    if let Some(color) = color {
                        text.color = color;
                    }
                });
                if changed {
                    self.mark_texture_dirty();
                }
            }
            Command::TextTransform { scale, rotation } => {
                let Some(id) = self.selected_text_id() else {
                    return;
                };
                let changed = self.store.update_text(id, |text| {
                    if let Some(scale) = scale {
                        text.scale = *scale;
                    }
                    if let Some(rotation) = rotation {
                        text.rotation = *rotation;
                    }
                });
                if changed {
                    self.mark_texture_dirty();
                }
            }
            Command::ModelColorChange { color } => {
                if self.model.set_base_color_hex(color) {
                    self.mark_texture_dirty();
                }
            }
            Command::ModelTextureChange { texture_url } => {
                self.model.set_base_texture_url(texture_url);
                self.mark_texture_dirty();
            }
            Command::BeginImagePlacement { image_url } => {
                // Placement and editing are mutually exclusive click modes.
                self.commit_editing();
                self.controller.begin_placement(image_url.clone());
            }
            Command::PlaceImageAt { position } => {
                if let Some(url) = self.controller.take_placement() {
                    self.store.add_image(ImageElement::new(url, *position));
                }
            }
            Command::RemoveImageBySource { image_url } => {
                let removed = self.store.remove_images_by_source(image_url);
                if let Some(selection) = self.controller.selection() {
                    if selection.kind == ElementKind::Image && removed.contains(&selection.id) {
                        self.controller.deselect();
                    }
                }
            }
        }
    }

    fn selected_text_id(&self) -> Option<ElementId> {
        self.controller
            .selection()
            .filter(|s| s.kind == ElementKind::Text)
            .map(|s| s.id)
    }

    // ---- Pointer surface ----------------------------------------------

    /// Pointer-down that hit an element. The caller must not also deliver
    /// the event to [`Self::pointer_down_background`] (event propagation
    /// stops at the element).
    pub fn pointer_down_on_element(&mut self, kind: ElementKind, id: ElementId, position: Point) {
        // A click on a different element closes an open edit session.
        if self.controller.editing_id().is_some_and(|editing| editing != id) {
            self.commit_editing();
        }
        if self.controller.editing_id() == Some(id) {
            return;
        }

        if self.last_click_target != Some((kind, id)) {
            self.controller.click_timer.reset();
        }
        self.last_click_target = Some((kind, id));

        let click = self.controller.click_timer.register_click(position);
        match (kind, click) {
            (ElementKind::Text, ClickKind::Double) => {
                if self.store.text(id).is_some() {
                    self.start_editing(id);
                }
            }
            _ => {
                self.controller.begin_drag(kind, id);
            }
        }
    }

    /// Route a canvas-level pointer event.
    ///
    /// Down events reaching the canvas handler did not hit an element
    /// (element hits go through [`Self::pointer_down_on_element`], which
    /// stops propagation).
    pub fn handle_pointer_event(&mut self, event: PointerEvent) {
        match event {
            PointerEvent::Down { position } => self.pointer_down_background(position),
            PointerEvent::Move { position } => self.pointer_move(position),
            PointerEvent::Up { .. } => self.pointer_up(),
            PointerEvent::Leave => self.pointer_leave(),
        }
    }

    /// Pointer-down on the canvas background (no element hit). Routes to
    /// exactly one interpretation: active placement first, else
    /// selection-clear.
    pub fn pointer_down_background(&mut self, position: Point) {
        if self.controller.placement_active() {
            if let Some(model_position) = mapper::screen_to_model_space(position, self.canvas_rect) {
                if let Some(url) = self.controller.take_placement() {
                    self.store.add_image(ImageElement::new(url, model_position));
                }
            }
            return;
        }
        self.commit_editing();
        self.controller.deselect();
    }

    /// Pointer moved. Only the drag path mutates positions.
    pub fn pointer_move(&mut self, position: Point) {
        let Some(target) = self.controller.drag_target() else {
            return;
        };
        match target.kind {
            ElementKind::Image => {
                if let Some(model_position) =
                    mapper::screen_to_model_space(position, self.canvas_rect)
                {
                    self.store.update_image(target.id, |image| {
                        image.position = model_position;
                    });
                }
            }
            ElementKind::Text => {
                let Some(text) = self.store.text(target.id) else {
                    return;
                };
                let updated = match text.position {
                    TextPosition::Uv(_) => {
                        let area = self.panels.area(text.area);
                        mapper::screen_to_uv(position, self.canvas_rect, area)
                            .map(TextPosition::Uv)
                    }
                    TextPosition::Model(_) => {
                        mapper::screen_to_model_space(position, self.canvas_rect)
                            .map(TextPosition::Model)
                    }
                };
                if let Some(new_position) = updated {
                    self.store.update_text(target.id, |text| {
                        text.position = new_position;
                    });
                    self.mark_texture_dirty();
                }
            }
        }
    }

    /// Pointer released: the drag ends wherever the pointer is.
    pub fn pointer_up(&mut self) {
        self.controller.end_drag();
    }

    /// Pointer left the canvas: same as releasing.
    pub fn pointer_leave(&mut self) {
        self.controller.end_drag();
    }

    // ---- Keyboard surface ---------------------------------------------

    /// Document-level keydown.
    pub fn key_down(&mut self, key: Key) {
        match key {
            Key::Escape => {
                if self.controller.is_editing() {
                    self.commit_editing();
                } else if self.controller.placement_active() {
                    self.controller.cancel_placement();
                } else {
                    self.controller.deselect();
                }
            }
            Key::Enter => {
                if self.controller.is_editing() {
                    self.commit_editing();
                }
            }
            Key::Delete | Key::Backspace => {
                // While the edit input has focus these keys edit content.
                if self.controller.is_editing() {
                    return;
                }
                self.delete_selected();
            }
        }
    }

    /// Remove the selected element, if any. Clears selection.
    pub fn delete_selected(&mut self) {
        let Some(selection) = self.controller.selection() else {
            return;
        };
        match selection.kind {
            ElementKind::Text => {
                if self.store.remove_text(selection.id).is_some() {
                    self.mark_texture_dirty();
                }
            }
            ElementKind::Image => {
                self.store.remove_image(selection.id);
            }
        }
        self.controller.element_removed(selection.id);
    }

    // ---- Editing ------------------------------------------------------

    /// Enter content editing for a text element, committing any other open
    /// edit first. At most one element is ever editing.
    fn start_editing(&mut self, id: ElementId) {
        self.commit_editing();
        self.controller.enter_editing(id);
        self.store.update_text(id, |text| text.is_editing = true);
    }

    /// Replace the content of the element being edited.
    pub fn set_editing_content(&mut self, content: &str) {
        let Some(id) = self.controller.editing_id() else {
            return;
        };
        self.store.update_text(id, |text| {
            text.content = content.to_string();
        });
        self.mark_texture_dirty();
    }

    /// Commit the current content and leave editing (Enter, Escape, or
    /// blur of the edit input). No-op when not editing.
    pub fn commit_editing(&mut self) {
        let Some(id) = self.controller.editing_id() else {
            return;
        };
        self.store.update_text(id, |text| text.is_editing = false);
        self.controller.exit_editing();
    }

    // ---- Outbound frame state -----------------------------------------

    /// Snapshot the outbound state the render surface consumes each frame.
    pub fn frame(&self) -> FrameState<'_> {
        let selection = self.controller.selection();
        let is_selected = |kind: ElementKind, id: ElementId| {
            selection == Some(Selection { kind, id })
        };
        FrameState {
            model: &self.model,
            texts: self
                .store
                .texts()
                .map(|element| TextView {
                    element,
                    is_selected: is_selected(ElementKind::Text, element.id()),
                })
                .collect(),
            images: self
                .store
                .images()
                .map(|element| ImageView {
                    element,
                    is_selected: is_selected(ElementKind::Image, element.id()),
                })
                .collect(),
            texture_revision: self.texture_revision,
        }
    }
}

/// A design engine wired to its command bus.
///
/// `publish` delivers each command synchronously: the engine applies it and
/// all bus observers see it before control returns, so a command's effects
/// are visible to the next command on the same turn.
#[derive(Debug, Default)]
pub struct DesignSession {
    engine: DesignEngine,
    bus: CommandBus,
}

impl DesignSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_engine(engine: DesignEngine) -> Self {
        Self {
            engine,
            bus: CommandBus::new(),
        }
    }

    pub fn engine(&self) -> &DesignEngine {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut DesignEngine {
        &mut self.engine
    }

    /// The bus, for observer subscribe/unsubscribe.
    pub fn bus_mut(&mut self) -> &mut CommandBus {
        &mut self.bus
    }

    /// Publish a command and process everything pending before returning.
    pub fn publish(&mut self, command: Command) {
        self.bus.enqueue(command);
        while let Some(next) = self.bus.take_next() {
            self.engine.apply(&next);
            self.bus.notify(&next);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elements::DEFAULT_TEXT_CONTENT;
    use crate::panels::PanelArea;

    fn engine_with_canvas() -> DesignEngine {
        let mut engine = DesignEngine::new();
        engine.set_canvas_rect(Rect::new(0.0, 0.0, 800.0, 600.0));
        engine
    }

    fn add_text_at_center(engine: &mut DesignEngine) -> ElementId {
        engine.apply(&Command::BeginTextAddAt {
            position: [0.5, 0.5],
            area: PanelArea::Front,
        });
        engine.selection().map(|s| s.id).expect("text selected")
    }

    #[test]
    fn test_begin_text_add_at_scenario() {
        let mut engine = engine_with_canvas();
        let id = add_text_at_center(&mut engine);

        assert_eq!(engine.store().text_count(), 1);
        let text = engine.store().text(id).unwrap();
        assert_eq!(text.content, DEFAULT_TEXT_CONTENT);
        assert!(text.is_editing);
        assert_eq!(text.uv(), Some([0.5, 0.5]));
        assert_eq!(
            engine.selection(),
            Some(Selection {
                kind: ElementKind::Text,
                id
            })
        );
    }

    #[test]
    fn test_at_most_one_editing() {
        let mut engine = engine_with_canvas();
        let first = add_text_at_center(&mut engine);
        let second = add_text_at_center(&mut engine);

        let editing: Vec<_> = engine
            .store()
            .texts()
            .filter(|t| t.is_editing)
            .map(|t| t.id())
            .collect();
        assert_eq!(editing, vec![second]);
        assert!(!engine.store().text(first).unwrap().is_editing);
    }

    #[test]
    fn test_selection_exclusive_across_kinds() {
        let mut engine = engine_with_canvas();
        let text_id = add_text_at_center(&mut engine);
        engine.commit_editing();

        engine.apply(&Command::BeginImagePlacement {
            image_url: "logo.png".to_string(),
        });
        engine.apply(&Command::PlaceImageAt {
            position: [0.0, 0.3, 0.1],
        });
        let image_id = engine.store().images().next().unwrap().id();

        engine.pointer_down_on_element(ElementKind::Image, image_id, Point::new(10.0, 10.0));
        let selection = engine.selection().unwrap();
        assert_eq!(selection.kind, ElementKind::Image);
        assert_ne!(selection.id, text_id);
    }

    #[test]
    fn test_place_image_requires_placement_mode() {
        let mut engine = engine_with_canvas();
        engine.apply(&Command::PlaceImageAt {
            position: [0.0; 3],
        });
        assert_eq!(engine.store().image_count(), 0);

        engine.apply(&Command::BeginImagePlacement {
            image_url: "logo.png".to_string(),
        });
        engine.apply(&Command::PlaceImageAt {
            position: [0.1, 0.2, 0.1],
        });
        assert_eq!(engine.store().image_count(), 1);
        // Placement mode exited; a second place command is a no-op.
        engine.apply(&Command::PlaceImageAt {
            position: [0.3, 0.2, 0.1],
        });
        assert_eq!(engine.store().image_count(), 1);
        // The image row of the command table does not select.
        assert!(engine.selection().is_none());
    }

    #[test]
    fn test_background_click_places_pending_image() {
        let mut engine = engine_with_canvas();
        engine.apply(&Command::BeginImagePlacement {
            image_url: "logo.png".to_string(),
        });

        engine.pointer_down_background(Point::new(400.0, 300.0));
        assert_eq!(engine.store().image_count(), 1);
        assert!(!engine.placement_active());

        let expected = mapper::screen_to_model_space(
            Point::new(400.0, 300.0),
            Rect::new(0.0, 0.0, 800.0, 600.0),
        )
        .unwrap();
        let image = engine.store().images().next().unwrap();
        assert_eq!(image.position, expected);
    }

    #[test]
    fn test_background_click_deselects() {
        let mut engine = engine_with_canvas();
        let id = add_text_at_center(&mut engine);
        engine.commit_editing();
        assert!(engine.selection().is_some());

        engine.pointer_down_background(Point::new(5.0, 5.0));
        assert!(engine.selection().is_none());
        assert!(engine.store().text(id).is_some());
    }

    #[test]
    fn test_drag_image_updates_only_target() {
        let mut engine = engine_with_canvas();
        engine.apply(&Command::BeginImagePlacement {
            image_url: "a.png".to_string(),
        });
        engine.apply(&Command::PlaceImageAt {
            position: [0.0, 0.0, 0.1],
        });
        engine.apply(&Command::BeginImagePlacement {
            image_url: "b.png".to_string(),
        });
        engine.apply(&Command::PlaceImageAt {
            position: [0.5, 0.5, 0.1],
        });
        let ids: Vec<_> = engine.store().images().map(|i| i.id()).collect();
        let other_position = engine.store().image(ids[1]).unwrap().position;

        engine.pointer_down_on_element(ElementKind::Image, ids[0], Point::new(100.0, 100.0));
        engine.pointer_move(Point::new(600.0, 150.0));
        engine.pointer_up();

        let expected = mapper::screen_to_model_space(
            Point::new(600.0, 150.0),
            Rect::new(0.0, 0.0, 800.0, 600.0),
        )
        .unwrap();
        assert_eq!(engine.store().image(ids[0]).unwrap().position, expected);
        assert_eq!(engine.store().image(ids[1]).unwrap().position, other_position);
        assert!(!engine.is_editing());
    }

    #[test]
    fn test_drag_uv_text_stays_in_panel() {
        let mut engine = engine_with_canvas();
        let id = add_text_at_center(&mut engine);
        engine.commit_editing();

        engine.pointer_down_on_element(ElementKind::Text, id, Point::new(400.0, 300.0));
        // Way outside the canvas: UV clamps into the front panel bounds.
        engine.pointer_move(Point::new(-500.0, -500.0));
        engine.pointer_up();

        let uv = engine.store().text(id).unwrap().uv().unwrap();
        assert_eq!(uv, [0.25, 0.25]);
    }

    #[test]
    fn test_drag_with_degenerate_canvas_keeps_position() {
        let mut engine = engine_with_canvas();
        let id = add_text_at_center(&mut engine);
        engine.commit_editing();
        engine.set_canvas_rect(Rect::ZERO);

        engine.pointer_down_on_element(ElementKind::Text, id, Point::new(1.0, 1.0));
        engine.pointer_move(Point::new(50.0, 50.0));
        assert_eq!(engine.store().text(id).unwrap().uv(), Some([0.5, 0.5]));
    }

    #[test]
    fn test_pointer_events_route_by_kind() {
        let mut engine = engine_with_canvas();
        let id = add_text_at_center(&mut engine);
        engine.commit_editing();

        engine.pointer_down_on_element(ElementKind::Text, id, Point::new(400.0, 300.0));
        engine.handle_pointer_event(PointerEvent::Move {
            position: Point::new(500.0, 300.0),
        });
        engine.handle_pointer_event(PointerEvent::Up {
            position: Point::new(500.0, 300.0),
        });
        assert!(!engine.controller.is_dragging());

        // A canvas-level down event is a background click: deselect.
        engine.handle_pointer_event(PointerEvent::Down {
            position: Point::new(5.0, 5.0),
        });
        assert!(engine.selection().is_none());
    }

    #[test]
    fn test_pointer_leave_ends_drag() {
        let mut engine = engine_with_canvas();
        let id = add_text_at_center(&mut engine);
        engine.commit_editing();

        engine.pointer_down_on_element(ElementKind::Text, id, Point::new(400.0, 300.0));
        assert!(engine.controller.is_dragging());
        engine.pointer_leave();
        assert!(!engine.controller.is_dragging());
        assert_eq!(
            engine.selection(),
            Some(Selection {
                kind: ElementKind::Text,
                id
            })
        );
    }

    #[test]
    fn test_double_click_enters_editing() {
        let mut engine = engine_with_canvas();
        let id = add_text_at_center(&mut engine);
        engine.commit_editing();

        let position = Point::new(400.0, 300.0);
        engine.pointer_down_on_element(ElementKind::Text, id, position);
        engine.pointer_up();
        engine.pointer_down_on_element(ElementKind::Text, id, position);

        assert!(engine.is_editing());
        assert!(engine.store().text(id).unwrap().is_editing);
    }

    #[test]
    fn test_delete_key_removes_selected() {
        let mut engine = engine_with_canvas();
        let id = add_text_at_center(&mut engine);

        // While editing, Delete edits content, not the element.
        engine.key_down(Key::Delete);
        assert_eq!(engine.store().text_count(), 1);

        engine.commit_editing();
        engine.key_down(Key::Delete);
        assert_eq!(engine.store().text_count(), 0);
        assert!(engine.selection().is_none());
        assert!(engine.store().text(id).is_none());

        // Nothing selected: further deletes are no-ops.
        engine.key_down(Key::Backspace);
        assert_eq!(engine.store().text_count(), 0);
    }

    #[test]
    fn test_escape_precedence() {
        let mut engine = engine_with_canvas();
        let id = add_text_at_center(&mut engine);

        // Editing: commit, stay selected.
        engine.key_down(Key::Escape);
        assert!(!engine.is_editing());
        assert!(engine.selection().is_some());

        // Placement active: cancel placement, keep selection.
        engine.apply(&Command::BeginImagePlacement {
            image_url: "logo.png".to_string(),
        });
        engine.key_down(Key::Escape);
        assert!(!engine.placement_active());
        assert!(engine.selection().is_some());

        // Otherwise: deselect.
        engine.key_down(Key::Escape);
        assert!(engine.selection().is_none());
        assert!(engine.store().text(id).is_some());
    }

    #[test]
    fn test_enter_commits_editing() {
        let mut engine = engine_with_canvas();
        let id = add_text_at_center(&mut engine);
        engine.set_editing_content("Hello");
        engine.key_down(Key::Enter);

        let text = engine.store().text(id).unwrap();
        assert_eq!(text.content, "Hello");
        assert!(!text.is_editing);
        assert!(engine.selection().is_some());
    }

    #[test]
    fn test_update_selected_text_style() {
        let mut engine = engine_with_canvas();
        let id = add_text_at_center(&mut engine);
        engine.commit_editing();

        engine.apply(&Command::UpdateSelectedTextStyle {
            font_size: Some(24.0),
            font_family: None,
            color: Some("#ABC".to_string()),
        });
        let text = engine.store().text(id).unwrap();
        assert!((text.font_size - 24.0).abs() < f64::EPSILON);
        assert_eq!(text.color.to_hex(), "#aabbcc");

        // Malformed color leaves the stored color untouched.
        engine.apply(&Command::UpdateSelectedTextStyle {
            font_size: None,
            font_family: None,
            color: Some("not-a-color".to_string()),
        });
        assert_eq!(engine.store().text(id).unwrap().color.to_hex(), "#aabbcc");

        // With nothing selected the command is a no-op.
        engine.key_down(Key::Escape);
        engine.apply(&Command::UpdateSelectedTextStyle {
            font_size: Some(99.0),
            font_family: None,
            color: None,
        });
        assert!((engine.store().text(id).unwrap().font_size - 24.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_text_transform_merges() {
        let mut engine = engine_with_canvas();
        let id = add_text_at_center(&mut engine);
        engine.commit_editing();

        engine.apply(&Command::TextTransform {
            scale: Some(2.0),
            rotation: None,
        });
        engine.apply(&Command::TextTransform {
            scale: None,
            rotation: Some(0.5),
        });
        let text = engine.store().text(id).unwrap();
        assert!((text.scale - 2.0).abs() < f64::EPSILON);
        assert!((text.rotation - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_model_commands_bump_revision() {
        let mut engine = engine_with_canvas();
        let base = engine.texture_revision();

        engine.apply(&Command::ModelTextureChange {
            texture_url: String::new(),
        });
        engine.apply(&Command::ModelColorChange {
            color: "#112233".to_string(),
        });
        assert!(engine.texture_revision() > base);
        assert_eq!(engine.model().base_color.to_hex(), "#112233");
        assert!(engine.model().base_texture_url.is_none());

        // Rejected color does not move the revision.
        let current = engine.texture_revision();
        engine.apply(&Command::ModelColorChange {
            color: "bogus".to_string(),
        });
        assert_eq!(engine.texture_revision(), current);
    }

    #[test]
    fn test_image_changes_do_not_bump_revision() {
        let mut engine = engine_with_canvas();
        let base = engine.texture_revision();
        engine.apply(&Command::BeginImagePlacement {
            image_url: "logo.png".to_string(),
        });
        engine.apply(&Command::PlaceImageAt {
            position: [0.0; 3],
        });
        assert_eq!(engine.texture_revision(), base);
    }

    #[test]
    fn test_remove_image_by_source_clears_selection() {
        let mut engine = engine_with_canvas();
        for url in ["logo.png", "logo.png", "keep.png"] {
            engine.apply(&Command::BeginImagePlacement {
                image_url: url.to_string(),
            });
            engine.apply(&Command::PlaceImageAt {
                position: [0.0; 3],
            });
        }
        let target = engine.store().images().next().unwrap().id();
        engine.pointer_down_on_element(ElementKind::Image, target, Point::new(1.0, 1.0));

        engine.apply(&Command::RemoveImageBySource {
            image_url: "logo.png".to_string(),
        });
        assert_eq!(engine.store().image_count(), 1);
        assert!(engine.selection().is_none());
        assert_eq!(
            engine.store().images().next().unwrap().source_url,
            "keep.png"
        );
    }

    #[test]
    fn test_frame_state_marks_selection() {
        let mut engine = engine_with_canvas();
        let id = add_text_at_center(&mut engine);
        engine.commit_editing();

        let frame = engine.frame();
        assert_eq!(frame.texts.len(), 1);
        assert!(frame.texts[0].is_selected);
        assert_eq!(frame.texts[0].element.id(), id);
        assert!(frame.images.is_empty());
    }

    #[test]
    fn test_session_publish_is_synchronous() {
        let mut session = DesignSession::new();
        session.publish(Command::ModelColorChange {
            color: "#112233".to_string(),
        });
        // Effects are visible as soon as publish returns.
        assert_eq!(session.engine().model().base_color.to_hex(), "#112233");
    }

    #[test]
    fn test_session_observers_see_commands() {
        use std::cell::RefCell;
        use std::rc::Rc;

        let mut session = DesignSession::new();
        let seen = Rc::new(RefCell::new(0usize));
        let seen_clone = Rc::clone(&seen);
        session.bus_mut().subscribe(move |_| {
            *seen_clone.borrow_mut() += 1;
        });

        session.publish(Command::ModelColorChange {
            color: "#112233".to_string(),
        });
        assert_eq!(*seen.borrow(), 1);
    }
}
