//! Typed command bus connecting UI collaborators to the engine.
//!
//! Replaces ambient window-level event dispatch with an explicit,
//! subscribe/unsubscribe channel owned by the engine instance. Topics are
//! idempotent state-setters, not an ordered log: a command enqueued on a
//! topic before the previous one is processed replaces the pending intent.

use crate::panels::PanelArea;
use serde::{Deserialize, Serialize};

/// Commands external UI collaborators issue to the engine.
///
/// One variant per topic; the serialized form is `{"topic": ..., ...payload}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "topic", rename_all = "kebab-case", rename_all_fields = "camelCase")]
pub enum Command {
    /// Create a new text element at the default position and select it.
    BeginTextAdd {
        font_size: f64,
        font_family: String,
        color: String,
    },
    /// Create a text element at the given panel placement, select it, and
    /// open editing.
    BeginTextAddAt { position: [f64; 2], area: PanelArea },
    /// Merge style fields into the selected text element, if any.
    UpdateSelectedTextStyle {
        #[serde(skip_serializing_if = "Option::is_none")]
        font_size: Option<f64>,
        #[serde(skip_serializing_if = "Option::is_none")]
        font_family: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        color: Option<String>,
    },
    /// Merge transform fields into the selected text element.
    TextTransform {
        #[serde(skip_serializing_if = "Option::is_none")]
        scale: Option<f64>,
        #[serde(skip_serializing_if = "Option::is_none")]
        rotation: Option<f64>,
    },
    /// Set the garment base color.
    ModelColorChange { color: String },
    /// Set the garment base texture; an empty string clears it.
    ModelTextureChange { texture_url: String },
    /// Enter image placement mode with the given handle.
    BeginImagePlacement { image_url: String },
    /// Place the pending image, if placement mode is active.
    PlaceImageAt { position: [f64; 3] },
    /// Remove every image element referencing the handle.
    RemoveImageBySource { image_url: String },
}

/// Topic identifiers, used to key the pending-command slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Topic {
    BeginTextAdd,
    BeginTextAddAt,
    UpdateSelectedTextStyle,
    TextTransform,
    ModelColorChange,
    ModelTextureChange,
    BeginImagePlacement,
    PlaceImageAt,
    RemoveImageBySource,
}

impl Command {
    /// The topic this command belongs to.
    pub fn topic(&self) -> Topic {
        match self {
            Command::BeginTextAdd { .. } => Topic::BeginTextAdd,
            Command::BeginTextAddAt { .. } => Topic::BeginTextAddAt,
            Command::UpdateSelectedTextStyle { .. } => Topic::UpdateSelectedTextStyle,
            Command::TextTransform { .. } => Topic::TextTransform,
            Command::ModelColorChange { .. } => Topic::ModelColorChange,
            Command::ModelTextureChange { .. } => Topic::ModelTextureChange,
            Command::BeginImagePlacement { .. } => Topic::BeginImagePlacement,
            Command::PlaceImageAt { .. } => Topic::PlaceImageAt,
            Command::RemoveImageBySource { .. } => Topic::RemoveImageBySource,
        }
    }
}

/// Handle returned by [`CommandBus::subscribe`], used to unsubscribe.
pub type SubscriberId = u64;

type SubscriberFn = Box<dyn FnMut(&Command)>;

/// Topic-based command channel with latest-write-wins pending slots.
#[derive(Default)]
pub struct CommandBus {
    subscribers: Vec<(SubscriberId, SubscriberFn)>,
    /// At most one pending command per topic, in arrival order of the
    /// first write to each topic.
    pending: Vec<Command>,
    next_subscriber: SubscriberId,
}

impl std::fmt::Debug for CommandBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandBus")
            .field("subscribers", &self.subscribers.len())
            .field("pending", &self.pending)
            .finish()
    }
}

impl CommandBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a subscriber called for every processed command.
    pub fn subscribe(&mut self, f: impl FnMut(&Command) + 'static) -> SubscriberId {
        let id = self.next_subscriber;
        self.next_subscriber += 1;
        self.subscribers.push((id, Box::new(f)));
        id
    }

    /// Remove a subscriber. Returns whether it existed.
    pub fn unsubscribe(&mut self, id: SubscriberId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(other, _)| *other != id);
        self.subscribers.len() != before
    }

    /// Queue a command, replacing any pending command on the same topic.
    pub fn enqueue(&mut self, command: Command) {
        let topic = command.topic();
        if let Some(slot) = self.pending.iter_mut().find(|c| c.topic() == topic) {
            *slot = command;
        } else {
            self.pending.push(command);
        }
    }

    /// Take the next pending command, if any.
    pub fn take_next(&mut self) -> Option<Command> {
        if self.pending.is_empty() {
            None
        } else {
            Some(self.pending.remove(0))
        }
    }

    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Deliver a processed command to every current subscriber, synchronously.
    pub fn notify(&mut self, command: &Command) {
        for (_, subscriber) in &mut self.subscribers {
            subscriber(command);
        }
    }
}
