//! Threadboard Core Library
//!
//! Platform-agnostic data structures and interaction logic for the
//! Threadboard garment designer: overlay elements, the element store, the
//! selection/drag/edit controller, coordinate mapping, and the command bus
//! connecting external UI collaborators to the engine.

pub mod bus;
pub mod color;
pub mod controller;
pub mod elements;
pub mod engine;
pub mod input;
pub mod mapper;
pub mod model;
pub mod panels;
pub mod preview;
pub mod store;

pub use bus::{Command, CommandBus, SubscriberId, Topic};
pub use color::{normalize_hex, Rgba};
pub use controller::{InteractionController, InteractionState, Selection};
pub use elements::{ElementId, ElementKind, ImageElement, TextConfig, TextElement, TextPosition};
pub use engine::{DesignEngine, DesignSession, FrameState, ImageView, TextView};
pub use input::{ClickKind, ClickTimer, Key, PointerEvent};
pub use model::ModelConfig;
pub use panels::{PanelArea, UvBounds, UvRect};
pub use preview::{PlacementPreview, PreviewGeometry};
pub use store::ElementStore;
