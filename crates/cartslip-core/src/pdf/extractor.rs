//! PDF positioned-text extraction using pdf-extract.

use pdf_extract::Document;
use tracing::debug;

use super::{FragmentCollector, Result, TextSource};
use crate::error::PdfError;
use crate::models::config::PdfConfig;
use crate::models::document::{TextDocument, TextPage};

/// Positioned-text extractor backed by pdf-extract's content stream
/// interpreter.
pub struct PdfExtractor {
    document: Option<Document>,
    /// Try the empty user password on encrypted files.
    decrypt_with_empty_password: bool,
    /// Only the first `max_pages` pages are decoded; 0 means all.
    max_pages: usize,
}

impl PdfExtractor {
    /// Create a new PDF extractor.
    pub fn new() -> Self {
        Self {
            document: None,
            decrypt_with_empty_password: true,
            max_pages: 0,
        }
    }

    /// Create an extractor from the `[pdf]` configuration section.
    pub fn from_config(config: &PdfConfig) -> Self {
        Self::new()
            .with_empty_password_decrypt(config.decrypt_with_empty_password)
            .with_max_pages(config.max_pages)
    }

    /// Limit extraction to the first `max_pages` pages (0 = no limit).
    pub fn with_max_pages(mut self, max_pages: usize) -> Self {
        self.max_pages = max_pages;
        self
    }

    /// Set whether encrypted files are opened with the empty password.
    pub fn with_empty_password_decrypt(mut self, enabled: bool) -> Self {
        self.decrypt_with_empty_password = enabled;
        self
    }

    /// Load a PDF and decode it in one step.
    pub fn extract_from_bytes(mut self, data: &[u8]) -> Result<TextDocument> {
        self.load(data)?;
        self.extract_document()
    }

    /// Decode a single page of the loaded document, ignoring `max_pages`.
    pub fn extract_page(&self, page_num: u32) -> Result<TextPage> {
        let doc = self.loaded()?;
        if !doc.get_pages().contains_key(&page_num) {
            return Err(PdfError::InvalidPage(page_num));
        }

        let mut collector = FragmentCollector::new();
        pdf_extract::output_doc_page(doc, &mut collector, page_num)
            .map_err(|e| PdfError::TextExtraction(e.to_string()))?;

        Ok(collector
            .into_document()
            .pages
            .pop()
            .unwrap_or_else(|| TextPage::new(page_num)))
    }

    fn loaded(&self) -> Result<&Document> {
        self.document
            .as_ref()
            .ok_or(PdfError::Parse("No document loaded".to_string()))
    }

    fn page_numbers(&self, doc: &Document) -> Vec<u32> {
        let pages = doc.get_pages().into_keys();
        if self.max_pages == 0 {
            pages.collect()
        } else {
            pages.take(self.max_pages).collect()
        }
    }
}

impl Default for PdfExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl TextSource for PdfExtractor {
    fn load(&mut self, data: &[u8]) -> Result<()> {
        let mut doc = Document::load_mem(data).map_err(|e| PdfError::Parse(e.to_string()))?;

        if doc.is_encrypted() {
            if !self.decrypt_with_empty_password || doc.decrypt("").is_err() {
                return Err(PdfError::Encrypted);
            }
            debug!("Decrypted PDF with empty password");
        }

        let page_count = doc.get_pages().len();
        if page_count == 0 {
            return Err(PdfError::NoPages);
        }

        debug!("Loaded PDF with {} pages", page_count);
        self.document = Some(doc);
        Ok(())
    }

    fn page_count(&self) -> u32 {
        self.document
            .as_ref()
            .map(|doc| doc.get_pages().len() as u32)
            .unwrap_or(0)
    }

    fn extract_document(&self) -> Result<TextDocument> {
        let doc = self.loaded()?;

        let mut collector = FragmentCollector::new();
        for page_num in self.page_numbers(doc) {
            pdf_extract::output_doc_page(doc, &mut collector, page_num)
                .map_err(|e| PdfError::TextExtraction(e.to_string()))?;
        }

        let document = collector.into_document();
        debug!(
            "Extracted {} fragments from {} pages",
            document.fragment_count(),
            document.pages.len()
        );
        Ok(document)
    }
}
