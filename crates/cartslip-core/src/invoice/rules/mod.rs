//! Rule-based extractors for grocery invoice text.

pub mod names;
pub mod patterns;
pub mod provider;
pub mod units;

pub use names::clean_name;
pub use provider::{detect_provider, page_text, ProviderDetector, PROVIDER_KEYWORDS};
pub use units::{parse_unit_and_value, PackageSize, UnitExtractor, UnitMatch, UnitTier};

/// Trait for field extractors.
pub trait FieldExtractor {
    /// The type of value this extractor produces.
    type Output;

    /// Extract the field from text.
    fn extract(&self, text: &str) -> Option<Self::Output>;
}

/// An extracted value together with the text it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractionMatch<T> {
    /// Extracted value.
    pub value: T,
    /// Byte range in the searched text.
    pub position: Option<(usize, usize)>,
    /// Source text that was matched.
    pub source: String,
}

impl<T> ExtractionMatch<T> {
    pub fn new(value: T, source: impl Into<String>) -> Self {
        Self {
            value,
            position: None,
            source: source.into(),
        }
    }

    pub fn with_position(mut self, start: usize, end: usize) -> Self {
        self.position = Some((start, end));
        self
    }
}
