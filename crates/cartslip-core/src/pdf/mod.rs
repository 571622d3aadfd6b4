//! PDF decoding into positioned text.

mod collector;
mod extractor;

pub use collector::FragmentCollector;
pub use extractor::PdfExtractor;

use crate::error::PdfError;
use crate::models::document::TextDocument;

/// Result type for PDF operations.
pub type Result<T> = std::result::Result<T, PdfError>;

/// A document format that can be decoded into positioned text fragments.
pub trait TextSource {
    /// Load a document from bytes.
    fn load(&mut self, data: &[u8]) -> Result<()>;

    /// Number of pages in the loaded document, 0 if nothing is loaded.
    fn page_count(&self) -> u32;

    /// Decode every page into fragments, in the source's native order.
    fn extract_document(&self) -> Result<TextDocument>;
}
