//! Core library for grocery invoice item extraction.
//!
//! This crate provides:
//! - PDF decoding into positioned text fragments (pdf-extract)
//! - Row, column and item-block inference from fragment coordinates
//! - Package size parsing and display name cleanup for product names
//! - Marketplace detection (Zepto, Blinkit, Swiggy Instamart)

pub mod error;
pub mod invoice;
pub mod models;
#[cfg(feature = "native")]
pub mod pdf;

pub use error::{CartslipError, PdfError, Result};
pub use invoice::{extract_items, GroceryInvoiceParser, InvoiceParser};
pub use models::config::CartslipConfig;
pub use models::document::{TextDocument, TextFragment, TextPage};
pub use models::invoice::{ExtractedItem, ExtractionResult, Provider, Unit};
#[cfg(feature = "native")]
pub use pdf::{PdfExtractor, TextSource};

/// Decode a PDF and extract its items using the given configuration.
#[cfg(feature = "native")]
pub fn process_pdf(data: &[u8], config: &CartslipConfig) -> Result<ExtractionResult> {
    let document = PdfExtractor::from_config(&config.pdf).extract_from_bytes(data)?;
    Ok(GroceryInvoiceParser::new()
        .with_item_logging(config.output.log_items)
        .parse(&document))
}
