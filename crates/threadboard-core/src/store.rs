//! Element store: ownership, CRUD, and ordering of placed elements.

use crate::elements::{ElementId, ImageElement, TextElement};
use std::collections::HashMap;

/// Owns all placed overlay elements.
///
/// Each collection keeps a map keyed by id plus an insertion-order list.
/// Insertion order is paint order and hit-test priority: the last-inserted
/// element draws on top. All mutations are synchronous and atomic from the
/// caller's point of view; unknown-id mutations are successful no-ops.
#[derive(Debug, Clone, Default)]
pub struct ElementStore {
    texts: HashMap<ElementId, TextElement>,
    text_order: Vec<ElementId>,
    images: HashMap<ElementId, ImageElement>,
    image_order: Vec<ElementId>,
}

impl ElementStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a text element. Returns its id.
    pub fn add_text(&mut self, text: TextElement) -> ElementId {
        let id = text.id();
        self.text_order.push(id);
        self.texts.insert(id, text);
        id
    }

    /// Add an image element. Returns its id.
    pub fn add_image(&mut self, image: ImageElement) -> ElementId {
        let id = image.id();
        self.image_order.push(id);
        self.images.insert(id, image);
        id
    }

    /// Get a text element by id.
    pub fn text(&self, id: ElementId) -> Option<&TextElement> {
        self.texts.get(&id)
    }

    /// Get an image element by id.
    pub fn image(&self, id: ElementId) -> Option<&ImageElement> {
        self.images.get(&id)
    }

    /// Mutate a text element in place. No-op on an unknown id; returns
    /// whether the element existed.
    pub fn update_text(&mut self, id: ElementId, f: impl FnOnce(&mut TextElement)) -> bool {
        match self.texts.get_mut(&id) {
            Some(text) => {
                f(text);
                true
            }
            None => false,
        }
    }

    /// Mutate an image element in place. No-op on an unknown id; returns
    /// whether the element existed.
    pub fn update_image(&mut self, id: ElementId, f: impl FnOnce(&mut ImageElement)) -> bool {
        match self.images.get_mut(&id) {
            Some(image) => {
                f(image);
                true
            }
            None => false,
        }
    }

    /// Remove a text element. No-op on an unknown id.
    pub fn remove_text(&mut self, id: ElementId) -> Option<TextElement> {
        self.text_order.retain(|&other| other != id);
        self.texts.remove(&id)
    }

    /// Remove an image element. No-op on an unknown id.
    pub fn remove_image(&mut self, id: ElementId) -> Option<ImageElement> {
        self.image_order.retain(|&other| other != id);
        self.images.remove(&id)
    }

    /// Remove every image element referencing the given source handle.
    /// Returns the removed ids.
    pub fn remove_images_by_source(&mut self, url: &str) -> Vec<ElementId> {
        let removed: Vec<ElementId> = self
            .image_order
            .iter()
            .copied()
            .filter(|id| {
                self.images
                    .get(id)
                    .is_some_and(|image| image.source_url == url)
            })
            .collect();
        for &id in &removed {
            self.images.remove(&id);
        }
        self.image_order.retain(|id| !removed.contains(id));
        removed
    }

    /// Text elements in insertion (paint) order.
    pub fn texts(&self) -> impl Iterator<Item = &TextElement> {
        self.text_order.iter().filter_map(|id| self.texts.get(id))
    }

    /// Image elements in insertion (paint) order.
    pub fn images(&self) -> impl Iterator<Item = &ImageElement> {
        self.image_order.iter().filter_map(|id| self.images.get(id))
    }

    pub fn text_count(&self) -> usize {
        self.texts.len()
    }

    pub fn image_count(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.texts.is_empty() && self.images.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elements::{TextConfig, TextPosition};

    fn sample_text() -> TextElement {
        TextElement::new(TextPosition::Uv([0.5, 0.5]), TextConfig::default())
    }

    #[test]
    fn test_add_and_get() {
        let mut store = ElementStore::new();
        let id = store.add_text(sample_text());
        assert!(store.text(id).is_some());
        assert_eq!(store.text_count(), 1);
    }

    #[test]
    fn test_insertion_order_is_paint_order() {
        let mut store = ElementStore::new();
        let a = store.add_text(sample_text());
        let b = store.add_text(sample_text());
        let c = store.add_text(sample_text());
        let order: Vec<_> = store.texts().map(|t| t.id()).collect();
        assert_eq!(order, vec![a, b, c]);
    }

    #[test]
    fn test_remove_unknown_is_noop() {
        let mut store = ElementStore::new();
        let a = store.add_text(sample_text());
        let b = store.add_text(sample_text());

        assert!(store.remove_text(ElementId::new_v4()).is_none());
        let order: Vec<_> = store.texts().map(|t| t.id()).collect();
        assert_eq!(order, vec![a, b]);

        // Removing twice is also a no-op the second time.
        assert!(store.remove_text(a).is_some());
        assert!(store.remove_text(a).is_none());
        let order: Vec<_> = store.texts().map(|t| t.id()).collect();
        assert_eq!(order, vec![b]);
    }

    #[test]
    fn test_update_unknown_is_noop() {
        let mut store = ElementStore::new();
        assert!(!store.update_text(ElementId::new_v4(), |t| t.content = "x".into()));
    }

    #[test]
    fn test_update_in_place() {
        let mut store = ElementStore::new();
        let id = store.add_text(sample_text());
        assert!(store.update_text(id, |t| t.content = "Hello".into()));
        assert_eq!(store.text(id).map(|t| t.content.as_str()), Some("Hello"));
    }

    #[test]
    fn test_remove_images_by_source() {
        let mut store = ElementStore::new();
        let a = store.add_image(ImageElement::new("logo.png", [0.0; 3]));
        let keep = store.add_image(ImageElement::new("other.png", [0.0; 3]));
        let b = store.add_image(ImageElement::new("logo.png", [0.1; 3]));

        let removed = store.remove_images_by_source("logo.png");
        assert_eq!(removed, vec![a, b]);
        let order: Vec<_> = store.images().map(|i| i.id()).collect();
        assert_eq!(order, vec![keep]);

        assert!(store.remove_images_by_source("logo.png").is_empty());
    }
}
