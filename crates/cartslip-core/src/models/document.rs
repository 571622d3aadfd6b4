//! Positioned text as delivered by a text source.

use serde::{Deserialize, Serialize};

/// A single positioned run of characters.
///
/// Coordinates are in the source's native space (PDF user space for the
/// bundled PDF source: origin bottom-left, y grows upwards).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextFragment {
    /// Text content of the run, untrimmed.
    pub content: String,
    /// Horizontal origin of the first glyph.
    pub x: f64,
    /// Vertical origin (baseline) of the first glyph.
    pub y: f64,
}

impl TextFragment {
    pub fn new(content: impl Into<String>, x: f64, y: f64) -> Self {
        Self {
            content: content.into(),
            x,
            y,
        }
    }

    /// Whether the fragment carries no visible text.
    pub fn is_blank(&self) -> bool {
        self.content.trim().is_empty()
    }
}

/// All fragments of one page, in extraction order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TextPage {
    /// Page number (1-indexed).
    pub number: u32,
    /// Fragments in the order the source emitted them.
    #[serde(default)]
    pub fragments: Vec<TextFragment>,
}

impl TextPage {
    pub fn new(number: u32) -> Self {
        Self {
            number,
            fragments: Vec::new(),
        }
    }

    /// Append a fragment, keeping source order.
    pub fn push(&mut self, content: impl Into<String>, x: f64, y: f64) {
        self.fragments.push(TextFragment::new(content, x, y));
    }
}

/// A whole document's positioned text, pages in document order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TextDocument {
    pub pages: Vec<TextPage>,
}

impl TextDocument {
    pub fn new(pages: Vec<TextPage>) -> Self {
        Self { pages }
    }

    /// Total number of fragments across all pages.
    pub fn fragment_count(&self) -> usize {
        self.pages.iter().map(|p| p.fragments.len()).sum()
    }

    /// Load a fragment dump previously written as JSON.
    pub fn from_json(json: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize as a JSON fragment dump.
    pub fn to_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
