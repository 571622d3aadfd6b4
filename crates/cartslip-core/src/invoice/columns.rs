//! Column boundary detection from header keywords.
//!
//! Each boundary is resolved by an ordered list of strategies; the first
//! strategy yielding a non-zero x wins. Name and quantity searches run
//! independently over every row, so headers split across rows still
//! resolve.

use tracing::trace;

use super::rows::Row;

/// Minimum distance right of the name column for the quantity fallback.
const QTY_MIN_OFFSET: f64 = 50.0;

/// Letters of "description"/"item" used to spot the name header fragment.
const NAME_HEADER_LETTERS: &[char] = &['d', 'e', 's', 'c', 'i', 't'];

/// Letters of "qty" used by the quantity fallback.
const QTY_HEADER_LETTERS: &[char] = &['q', 't', 'y'];

/// Page-local x positions of the name and quantity columns.
///
/// Zero means "not located".
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ColumnBoundary {
    pub name_x: f64,
    pub qty_x: f64,
}

impl ColumnBoundary {
    /// Both columns were located.
    ///
    /// Only zero means "missing": a header at a negative x (content shifted
    /// left of the media box) still counts as located.
    pub fn is_complete(&self) -> bool {
        self.name_x != 0.0 && self.qty_x != 0.0
    }
}

/// A way of picking a column x out of a header row. Receives the name
/// column x found so far.
type ColumnStrategy = fn(&Row, f64) -> Option<f64>;

const NAME_STRATEGIES: &[ColumnStrategy] = &[first_name_letter_fragment, first_fragment];

const QTY_STRATEGIES: &[ColumnStrategy] = &[
    first_q_fragment,
    qty_letters_right_of_name,
    first_fragment,
];

fn first_name_letter_fragment(row: &Row, _name_x: f64) -> Option<f64> {
    row.fragments
        .iter()
        .find(|f| f.content.to_lowercase().contains(NAME_HEADER_LETTERS))
        .map(|f| f.x)
}

fn first_q_fragment(row: &Row, _name_x: f64) -> Option<f64> {
    row.fragments
        .iter()
        .find(|f| f.content.to_lowercase().starts_with('q'))
        .map(|f| f.x)
}

fn qty_letters_right_of_name(row: &Row, name_x: f64) -> Option<f64> {
    row.fragments
        .iter()
        .find(|f| f.x > name_x + QTY_MIN_OFFSET && f.content.to_lowercase().contains(QTY_HEADER_LETTERS))
        .map(|f| f.x)
}

fn first_fragment(row: &Row, _name_x: f64) -> Option<f64> {
    row.first().map(|f| f.x)
}

fn first_success(strategies: &[ColumnStrategy], row: &Row, name_x: f64) -> Option<f64> {
    strategies
        .iter()
        .find_map(|strategy| strategy(row, name_x).filter(|x| *x != 0.0))
}

fn is_name_header(text: &str) -> bool {
    text.contains("description") || text.contains("item")
}

fn is_qty_header(text: &str) -> bool {
    text.contains("qty") || text.contains("quantity")
}

/// Locate the name and quantity columns of a page.
///
/// The returned boundary may be incomplete; such a page yields no items.
pub fn locate_columns(rows: &[Row]) -> ColumnBoundary {
    let mut columns = ColumnBoundary::default();

    for row in rows {
        let text = row.normalized_text();

        if columns.name_x == 0.0 && is_name_header(&text) {
            if let Some(x) = first_success(NAME_STRATEGIES, row, columns.name_x) {
                trace!("name column at x={:.2} from row y={:.2}", x, row.y);
                columns.name_x = x;
            }
        }

        if columns.qty_x == 0.0 && is_qty_header(&text) {
            if let Some(x) = first_success(QTY_STRATEGIES, row, columns.name_x) {
                trace!("qty column at x={:.2} from row y={:.2}", x, row.y);
                columns.qty_x = x;
            }
        }
    }

    columns
}
