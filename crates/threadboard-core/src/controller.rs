//! Selection, drag, and edit interaction state.

use crate::elements::{ElementId, ElementKind};
use crate::input::ClickTimer;

/// The currently selected element.
///
/// Selection is exclusive across kinds: holding a single `(kind, id)` pair
/// makes "text and image both selected" unrepresentable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    pub kind: ElementKind,
    pub id: ElementId,
}

/// Interaction state of the selected element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InteractionState {
    /// Nothing selected.
    #[default]
    Idle,
    /// An element is selected.
    Selected,
    /// The selected element follows the pointer.
    Dragging,
    /// The selected text element is being edited.
    Editing,
}

/// Tracks selection, drag, edit, and placement state.
///
/// Drag implies selection of the same element; editing implies the selected
/// element is a text element. Both are enforced here by construction: the
/// state only advances past `Idle` while `selection` is set, and
/// `enter_editing` installs a text selection itself.
#[derive(Debug, Clone, Default)]
pub struct InteractionController {
    selection: Option<Selection>,
    state: InteractionState,
    /// Pending image handle while placement mode is active.
    pending_image_url: Option<String>,
    /// Double-click detector for text editing entry.
    pub click_timer: ClickTimer,
}

impl InteractionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selection(&self) -> Option<Selection> {
        self.selection
    }

    pub fn state(&self) -> InteractionState {
        self.state
    }

    /// Select an element, clearing any other selection. A drag or edit in
    /// progress on a different element is abandoned.
    pub fn select(&mut self, kind: ElementKind, id: ElementId) {
        self.selection = Some(Selection { kind, id });
        self.state = InteractionState::Selected;
    }

    /// Clear selection and return to idle.
    pub fn deselect(&mut self) {
        self.selection = None;
        self.state = InteractionState::Idle;
    }

    pub fn is_selected(&self, kind: ElementKind, id: ElementId) -> bool {
        self.selection == Some(Selection { kind, id })
    }

    /// Select an element and start dragging it.
    pub fn begin_drag(&mut self, kind: ElementKind, id: ElementId) {
        self.select(kind, id);
        self.state = InteractionState::Dragging;
    }

    /// Stop dragging, keeping the element selected.
    pub fn end_drag(&mut self) {
        if self.state == InteractionState::Dragging {
            self.state = InteractionState::Selected;
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.state == InteractionState::Dragging
    }

    /// The element currently being dragged.
    pub fn drag_target(&self) -> Option<Selection> {
        if self.is_dragging() { self.selection } else { None }
    }

    /// Enter text editing for the given element, selecting it. Cancels any
    /// active placement: placement and editing are mutually exclusive entry
    /// points for canvas clicks.
    pub fn enter_editing(&mut self, id: ElementId) {
        self.cancel_placement();
        self.selection = Some(Selection {
            kind: ElementKind::Text,
            id,
        });
        self.state = InteractionState::Editing;
    }

    /// Leave editing, keeping the element selected.
    pub fn exit_editing(&mut self) {
        if self.state == InteractionState::Editing {
            self.state = InteractionState::Selected;
        }
    }

    pub fn is_editing(&self) -> bool {
        self.state == InteractionState::Editing
    }

    /// Id of the text element being edited, if any.
    pub fn editing_id(&self) -> Option<ElementId> {
        if self.is_editing() {
            self.selection.map(|s| s.id)
        } else {
            None
        }
    }

    /// Enter image placement mode. Replaces any pending image handle.
    pub fn begin_placement(&mut self, image_url: impl Into<String>) {
        self.pending_image_url = Some(image_url.into());
    }

    /// Consume the pending image handle, leaving placement mode.
    pub fn take_placement(&mut self) -> Option<String> {
        self.pending_image_url.take()
    }

    /// Abort placement mode.
    pub fn cancel_placement(&mut self) {
        self.pending_image_url = None;
    }

    pub fn placement_active(&self) -> bool {
        self.pending_image_url.is_some()
    }

    pub fn pending_image_url(&self) -> Option<&str> {
        self.pending_image_url.as_deref()
    }

    /// Drop all interaction state for a removed element.
    pub fn element_removed(&mut self, id: ElementId) {
        if self.selection.map(|s| s.id) == Some(id) {
            self.deselect();
        }
    }

    /// Reset everything, including the double-click window. Called on
    /// teardown so no stale timer fires against removed elements.
    pub fn reset(&mut self) {
        self.selection = None;
        self.state = InteractionState::Idle;
        self.pending_image_url = None;
        self.click_timer.reset();
    }
}
