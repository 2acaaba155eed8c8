//! Font catalog for baked text.

use ab_glyph::FontArc;
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

/// Font loading errors.
#[derive(Debug, Error)]
pub enum FontError {
    #[error("invalid font data: {0}")]
    Invalid(#[from] ab_glyph::InvalidFont),
    #[error("failed to read font file: {0}")]
    Io(#[from] std::io::Error),
}

/// Fonts registered per family name.
///
/// The host application registers the families its font picker offers. A
/// text element referencing an unregistered family is skipped by the
/// compositor rather than failing the composite.
#[derive(Default)]
pub struct FontCatalog {
    fonts: HashMap<String, FontArc>,
}

impl std::fmt::Debug for FontCatalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontCatalog")
            .field("families", &self.fonts.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl FontCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register font bytes (TTF/OTF) under a family name.
    pub fn register_bytes(&mut self, family: &str, bytes: Vec<u8>) -> Result<(), FontError> {
        let font = FontArc::try_from_vec(bytes)?;
        self.fonts.insert(family.to_string(), font);
        Ok(())
    }

    /// Register a font file under a family name.
    pub fn load_file(&mut self, family: &str, path: impl AsRef<Path>) -> Result<(), FontError> {
        let bytes = std::fs::read(path)?;
        self.register_bytes(family, bytes)
    }

    /// Look up a family.
    pub fn get(&self, family: &str) -> Option<&FontArc> {
        self.fonts.get(family)
    }

    pub fn is_empty(&self) -> bool {
        self.fonts.is_empty()
    }
}
