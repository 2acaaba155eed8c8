//! Raster asset store.
//!
//! Resolves opaque URL handles to decoded RGBA images. Each handle is
//! decoded at most once; decode failures are remembered so a broken asset
//! degrades to "element omitted" instead of being retried every frame.

use base64::{engine::general_purpose::STANDARD, Engine};
use image::RgbaImage;
use std::collections::HashMap;
use thiserror::Error;

/// Asset loading/decoding errors.
#[derive(Debug, Error)]
pub enum AssetError {
    #[error("failed to decode image data: {0}")]
    Decode(#[from] image::ImageError),
    #[error("invalid base64 payload: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("unsupported data URL: {0}")]
    DataUrl(String),
}

#[derive(Debug)]
enum AssetSlot {
    Decoded(RgbaImage),
    Failed,
}

/// Decoded-image cache keyed by source handle.
#[derive(Debug, Default)]
pub struct AssetStore {
    slots: HashMap<String, AssetSlot>,
}

impl AssetStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register raw image bytes under a handle, decoding them immediately.
    ///
    /// On failure the handle is remembered as broken so later lookups are
    /// cheap no-ops.
    pub fn insert_bytes(&mut self, url: &str, bytes: &[u8]) -> Result<(), AssetError> {
        match image::load_from_memory(bytes) {
            Ok(decoded) => {
                self.slots
                    .insert(url.to_string(), AssetSlot::Decoded(decoded.to_rgba8()));
                Ok(())
            }
            Err(err) => {
                log::warn!("failed to decode asset {url:?}: {err}");
                self.slots.insert(url.to_string(), AssetSlot::Failed);
                Err(err.into())
            }
        }
    }

    /// Register a `data:image/...;base64,` handle by decoding its payload.
    pub fn insert_data_url(&mut self, url: &str) -> Result<(), AssetError> {
        let payload = parse_data_url(url)?;
        let bytes = STANDARD.decode(payload)?;
        self.insert_bytes(url, &bytes)
    }

    /// Look up a decoded image, decoding `data:` handles on first use.
    pub fn resolve(&mut self, url: &str) -> Option<&RgbaImage> {
        if !self.slots.contains_key(url) && url.starts_with("data:") {
            // Failure is memoized inside; the Err only matters to callers
            // registering assets explicitly.
            let _ = self.insert_data_url(url);
            if !self.slots.contains_key(url) {
                self.slots.insert(url.to_string(), AssetSlot::Failed);
            }
        }
        match self.slots.get(url) {
            Some(AssetSlot::Decoded(image)) => Some(image),
            _ => None,
        }
    }

    /// Whether a handle was registered but could not be decoded.
    pub fn is_failed(&self, url: &str) -> bool {
        matches!(self.slots.get(url), Some(AssetSlot::Failed))
    }

    /// Drop a handle (for example when its source is removed).
    pub fn remove(&mut self, url: &str) {
        self.slots.remove(url);
    }
}

fn parse_data_url(url: &str) -> Result<&str, AssetError> {
    let rest = url
        .strip_prefix("data:")
        .ok_or_else(|| AssetError::DataUrl(url.to_string()))?;
    let (meta, payload) = rest
        .split_once(',')
        .ok_or_else(|| AssetError::DataUrl(url.to_string()))?;
    if !meta.ends_with(";base64") {
        return Err(AssetError::DataUrl(url.to_string()));
    }
    Ok(payload)
}
