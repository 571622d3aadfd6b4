//! Data models shared by the text sources, the engine and the front ends.

pub mod config;
pub mod document;
pub mod invoice;

pub use config::{CartslipConfig, OutputConfig, PdfConfig};
pub use document::{TextDocument, TextFragment, TextPage};
pub use invoice::{ExtractedItem, ExtractionResult, Provider, Unit};
