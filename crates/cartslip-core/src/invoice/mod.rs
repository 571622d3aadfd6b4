//! Grocery invoice item extraction.
//!
//! The pipeline runs per page: fragments are clustered into rows, the name
//! and quantity columns are located from header keywords, rows are split
//! into item blocks, and each block is turned into at most one item.

pub mod blocks;
pub mod columns;
pub mod fields;
mod parser;
pub mod rows;
pub mod rules;

pub use blocks::{segment_blocks, ItemBlock};
pub use columns::{locate_columns, ColumnBoundary};
pub use fields::extract_item;
pub use parser::{GroceryInvoiceParser, InvoiceParser};
pub use rows::{cluster_rows, Row, ROW_TOLERANCE};

use crate::models::document::TextDocument;
use crate::models::invoice::ExtractionResult;

/// Extract items from a document with the default parser.
pub fn extract_items(document: &TextDocument) -> ExtractionResult {
    GroceryInvoiceParser::new().parse(document)
}
