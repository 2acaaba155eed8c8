//! Garment model configuration.

use crate::color::Rgba;
use serde::{Deserialize, Serialize};

/// Base appearance of the garment model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Base fabric color.
    pub base_color: Rgba,
    /// Optional base texture handle, resolved by the asset store.
    pub base_texture_url: Option<String>,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            base_color: Rgba::white(),
            base_texture_url: None,
        }
    }
}

impl ModelConfig {
    /// Set the base color from a hex string.
    ///
    /// Malformed input is rejected and the previous color kept; returns
    /// whether the color changed.
    pub fn set_base_color_hex(&mut self, hex: &str) -> bool {
        match Rgba::from_hex(hex) {
            Some(color) => {
                self.base_color = color;
                true
            }
            None => {
                log::warn!("ignoring malformed base color {hex:?}");
                false
            }
        }
    }

    /// Set or clear the base texture handle. An empty string clears it.
    pub fn set_base_texture_url(&mut self, url: &str) {
        if url.is_empty() {
            self.base_texture_url = None;
        } else {
            self.base_texture_url = Some(url.to_string());
        }
    }
}
