//! WASM bindings for grocery invoice item extraction.
//!
//! PDF decoding happens on the JavaScript side (e.g. pdf.js); these bindings
//! take the positioned text it produces and return the extracted items.

use serde::Serialize;
use wasm_bindgen::prelude::*;

use cartslip_core::invoice::rules::{self, FieldExtractor, PackageSize, UnitExtractor, UnitTier};
use cartslip_core::invoice::{GroceryInvoiceParser, InvoiceParser};
use cartslip_core::models::document::{TextDocument, TextPage};
use cartslip_core::models::invoice::{ExtractionResult, Provider, Unit};

/// Initialize panic hook for better error messages in console.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Version information.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

fn js_error(message: impl std::fmt::Display) -> JsValue {
    js_sys::Error::new(&message.to_string()).into()
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(js_error)
}

/// Extract items from a document object shaped like
/// `{pages: [{number, fragments: [{content, x, y}]}]}`.
#[wasm_bindgen]
pub fn extract_items(document: JsValue) -> Result<JsValue, JsValue> {
    let document: TextDocument = serde_wasm_bindgen::from_value(document).map_err(js_error)?;
    let result = GroceryInvoiceParser::new()
        .with_item_logging(false)
        .parse(&document);

    to_js(&result)
}

#[derive(Debug, Serialize, PartialEq)]
struct UnitReport {
    unit_value: f64,
    unit: Unit,
    tier: &'static str,
    matched: Option<String>,
    position: Option<(usize, usize)>,
}

fn unit_report(name: &str) -> UnitReport {
    match UnitExtractor::new().extract(name) {
        Some(found) => UnitReport {
            unit_value: found.size.value.value,
            unit: found.size.value.unit,
            tier: found.tier.as_str(),
            position: found.size.position,
            matched: Some(found.size.source),
        },
        None => {
            let size = PackageSize::default();
            UnitReport {
                unit_value: size.value,
                unit: size.unit,
                tier: UnitTier::Default.as_str(),
                matched: None,
                position: None,
            }
        }
    }
}

/// Parse the package size of a product name:
/// `{unit_value, unit, tier, matched, position}`. Positions index the
/// lowercased name.
#[wasm_bindgen]
pub fn parse_unit(name: &str) -> Result<JsValue, JsValue> {
    to_js(&unit_report(name))
}

/// Clean a raw product name for display.
#[wasm_bindgen]
pub fn clean_name(name: &str) -> String {
    rules::clean_name(name)
}

/// Detect the marketplace named in a piece of text ("unknown" if none).
#[wasm_bindgen]
pub fn detect_provider(text: &str) -> String {
    rules::detect_provider(text)
        .unwrap_or(Provider::Unknown)
        .to_string()
}

/// Incremental document builder for callers that walk pdf.js text items.
#[wasm_bindgen]
pub struct FragmentCollectorJs {
    pages: Vec<TextPage>,
    verbose: bool,
}

#[wasm_bindgen]
impl FragmentCollectorJs {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            pages: Vec::new(),
            verbose: false,
        }
    }

    /// Log extracted items to the browser console.
    #[wasm_bindgen]
    pub fn set_verbose(&mut self, verbose: bool) {
        self.verbose = verbose;
    }

    /// Add a text run. Pages may be added in any order; they are processed
    /// by page number.
    #[wasm_bindgen]
    pub fn add_fragment(&mut self, page: u32, content: &str, x: f64, y: f64) {
        let index = match self.pages.binary_search_by_key(&page, |p| p.number) {
            Ok(index) => index,
            Err(index) => {
                self.pages.insert(index, TextPage::new(page));
                index
            }
        };
        self.pages[index].push(content, x, y);
    }

    /// Number of fragments added so far.
    #[wasm_bindgen]
    pub fn fragment_count(&self) -> usize {
        self.pages.iter().map(|p| p.fragments.len()).sum()
    }

    /// Drop everything added so far.
    #[wasm_bindgen]
    pub fn clear(&mut self) {
        self.pages.clear();
    }

    /// Extract items from the collected fragments.
    #[wasm_bindgen]
    pub fn extract(&self) -> Result<JsValue, JsValue> {
        let result = self.result();

        if self.verbose {
            for item in &result.items {
                web_sys::console::log_1(&JsValue::from_str(&format!(
                    "{} x{} ({} {})",
                    item.name, item.count, item.unit_value, item.unit
                )));
            }
        }

        to_js(&result)
    }
}

impl FragmentCollectorJs {
    fn result(&self) -> ExtractionResult {
        let document = TextDocument::new(self.pages.clone());
        GroceryInvoiceParser::new()
            .with_item_logging(false)
            .parse(&document)
    }
}

impl Default for FragmentCollectorJs {
    fn default() -> Self {
        Self::new()
    }
}
