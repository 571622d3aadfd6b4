//! Marketplace detection from page text.

use super::{ExtractionMatch, FieldExtractor};
use crate::models::document::TextPage;
use crate::models::invoice::Provider;

/// Marketplace keywords, in priority order.
pub const PROVIDER_KEYWORDS: &[(&str, Provider)] = &[
    ("zepto", Provider::Zepto),
    ("blinkit", Provider::Blinkit),
    ("grofers", Provider::Blinkit),
    ("swiggy", Provider::Swiggy),
    ("instamart", Provider::Swiggy),
];

/// Lowercased concatenation of every fragment on a page.
///
/// Fragments are joined without separators since the source may split
/// words at character granularity.
pub fn page_text(page: &TextPage) -> String {
    page.fragments
        .iter()
        .map(|f| f.content.to_lowercase())
        .collect()
}

/// Detect the marketplace named in a piece of text.
pub fn detect_provider(text: &str) -> Option<Provider> {
    ProviderDetector.extract(text).map(|m| m.value)
}

/// Provider keyword matcher.
pub struct ProviderDetector;

impl FieldExtractor for ProviderDetector {
    type Output = ExtractionMatch<Provider>;

    /// The highest-priority keyword present, wherever it occurs in the text.
    /// The position is its first occurrence in the lowercased text.
    fn extract(&self, text: &str) -> Option<Self::Output> {
        let lower = text.to_lowercase();

        PROVIDER_KEYWORDS.iter().find_map(|(keyword, provider)| {
            lower.find(keyword).map(|start| {
                ExtractionMatch::new(*provider, *keyword).with_position(start, start + keyword.len())
            })
        })
    }
}
