//! Page-by-page grocery invoice parser.

use tracing::{debug, info};

use super::blocks::segment_blocks;
use super::columns::locate_columns;
use super::fields::extract_item;
use super::rows::cluster_rows;
use super::rules::{page_text, FieldExtractor, ProviderDetector};
use crate::models::document::{TextDocument, TextPage};
use crate::models::invoice::{ExtractedItem, ExtractionResult};

/// Trait for invoice parsing.
pub trait InvoiceParser {
    /// Parse the purchased items out of a positioned-text document.
    fn parse(&self, document: &TextDocument) -> ExtractionResult;
}

/// Rule-based parser for marketplace grocery invoices.
///
/// Rows are inferred from y coordinates, the name and quantity columns from
/// header keywords, and item boundaries from leading line numbers.
pub struct GroceryInvoiceParser {
    /// Log every accepted item at info level.
    log_items: bool,
}

impl GroceryInvoiceParser {
    pub fn new() -> Self {
        Self { log_items: true }
    }

    /// Set per-item logging.
    pub fn with_item_logging(mut self, enabled: bool) -> Self {
        self.log_items = enabled;
        self
    }

    /// Extract the items of a single page.
    ///
    /// A page whose columns cannot both be located yields nothing.
    pub fn parse_page(&self, page: &TextPage) -> Vec<ExtractedItem> {
        let rows = cluster_rows(&page.fragments);
        let columns = locate_columns(&rows);

        if !columns.is_complete() {
            debug!(
                "page {}: columns not found (name_x={:.2}, qty_x={:.2}), skipping",
                page.number, columns.name_x, columns.qty_x
            );
            return Vec::new();
        }

        debug!(
            "page {}: {} rows, name_x={:.2}, qty_x={:.2}",
            page.number,
            rows.len(),
            columns.name_x,
            columns.qty_x
        );

        let blocks = segment_blocks(&rows);
        let items: Vec<ExtractedItem> = blocks
            .iter()
            .filter_map(|block| extract_item(block, &columns))
            .collect();

        if self.log_items {
            for item in &items {
                info!(
                    "page {}: {} x{} ({} {})",
                    page.number, item.name, item.count, item.unit_value, item.unit
                );
            }
        }

        debug!(
            "page {}: {} of {} blocks produced items",
            page.number,
            items.len(),
            blocks.len()
        );

        items
    }
}

impl Default for GroceryInvoiceParser {
    fn default() -> Self {
        Self::new()
    }
}

impl InvoiceParser for GroceryInvoiceParser {
    fn parse(&self, document: &TextDocument) -> ExtractionResult {
        let mut result = ExtractionResult::default();

        for page in &document.pages {
            if !result.provider.is_known() {
                if let Some(found) = ProviderDetector.extract(&page_text(page)) {
                    debug!(
                        "provider {} detected on page {} (keyword {:?})",
                        found.value, page.number, found.source
                    );
                    result.provider = found.value;
                }
            }

            result.items.extend(self.parse_page(page));
        }

        info!(
            "Extracted {} items from {} pages (provider: {})",
            result.items.len(),
            document.pages.len(),
            result.provider
        );

        result
    }
}
