//! Extraction output: purchased items and the marketplace that issued them.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Result of running the extraction engine over one document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractionResult {
    /// Marketplace that issued the invoice.
    pub provider: Provider,

    /// Items in page order, then block order within a page.
    pub items: Vec<ExtractedItem>,
}

impl ExtractionResult {
    /// Check whether nothing was recovered.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// A single purchased item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedItem {
    /// Cleaned display name.
    pub name: String,

    /// Purchased quantity, from the quantity column.
    pub count: f64,

    /// Package size (e.g. 500 for a 500 g pack).
    pub unit_value: f64,

    /// Unit of the package size.
    pub unit: Unit,
}

/// Canonical unit vocabulary.
///
/// `Pc` is an explicit piece count found in the name ("6pcs"), while `Pcs`
/// is the fallback when no size token was found at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    G,
    Ml,
    Pc,
    Pack,
    Set,
    Bundle,
    Pcs,
}

impl Unit {
    pub fn as_str(&self) -> &'static str {
        match self {
            Unit::G => "g",
            Unit::Ml => "ml",
            Unit::Pc => "pc",
            Unit::Pack => "pack",
            Unit::Set => "set",
            Unit::Bundle => "bundle",
            Unit::Pcs => "pcs",
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Grocery-delivery marketplace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    Zepto,
    Blinkit,
    Swiggy,
    #[default]
    Unknown,
}

impl Provider {
    pub fn as_str(&self) -> &'static str {
        match self {
            Provider::Zepto => "zepto",
            Provider::Blinkit => "blinkit",
            Provider::Swiggy => "swiggy",
            Provider::Unknown => "unknown",
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Provider::Unknown)
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
