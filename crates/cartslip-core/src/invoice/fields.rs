//! Item field extraction from a single block.

use tracing::trace;

use super::blocks::ItemBlock;
use super::columns::ColumnBoundary;
use super::rules::{clean_name, parse_unit_and_value};
use crate::models::document::TextFragment;
use crate::models::invoice::ExtractedItem;

/// Name parts start this far left of the name column.
const NAME_LEFT_SLACK: f64 = 5.0;
/// Name parts end this far left of the quantity column.
const NAME_RIGHT_GAP: f64 = 10.0;
/// Quantity range around the quantity column x.
const QTY_LEFT_SLACK: f64 = 5.0;
const QTY_RIGHT_SLACK: f64 = 15.0;

/// Quantities must lie strictly between these.
const QTY_MIN: f64 = 0.0;
const QTY_MAX: f64 = 100.0;

/// Cleaned names must be strictly between these byte lengths.
const NAME_MIN_LEN: usize = 2;
const NAME_MAX_LEN: usize = 200;

const CURRENCY_SYMBOLS: &[char] = &['₹', '$', '€', '£', '¥'];

fn is_number(text: &str) -> bool {
    text.parse::<f64>().is_ok()
}

/// Price, tax and discount cells that can leak into the name range.
fn looks_like_money(content: &str) -> bool {
    content.contains('%')
        || content.contains('+')
        || content.contains("0.00")
        || content.contains(CURRENCY_SYMBOLS)
}

fn in_name_range(fragment: &TextFragment, columns: &ColumnBoundary) -> bool {
    fragment.x >= columns.name_x - NAME_LEFT_SLACK && fragment.x < columns.qty_x - NAME_RIGHT_GAP
}

fn in_qty_range(fragment: &TextFragment, columns: &ColumnBoundary) -> bool {
    fragment.x >= columns.qty_x - QTY_LEFT_SLACK && fragment.x < columns.qty_x + QTY_RIGHT_SLACK
}

fn is_name_part(fragment: &TextFragment) -> bool {
    let content = fragment.content.trim();
    !content.is_empty() && !looks_like_money(content) && !is_number(content)
}

/// Parse a quantity cell, allowing thousands separators.
fn parse_quantity(content: &str) -> Option<f64> {
    content
        .trim()
        .replace(',', "")
        .parse::<f64>()
        .ok()
        .filter(|q| *q > QTY_MIN && *q < QTY_MAX)
}

/// Build an item from a block, or `None` when the block has no usable name
/// or quantity.
///
/// The package size is read from the raw name before cleaning, since the
/// cleaner strips size tokens.
pub fn extract_item(block: &ItemBlock, columns: &ColumnBoundary) -> Option<ExtractedItem> {
    let mut name_parts: Vec<&str> = Vec::new();
    let mut quantity: Option<f64> = None;

    for fragment in block.iter().flat_map(|row| row.fragments.iter()) {
        if in_name_range(fragment, columns) && is_name_part(fragment) {
            name_parts.push(fragment.content.trim());
        }

        if in_qty_range(fragment, columns) {
            if let Some(q) = parse_quantity(&fragment.content) {
                quantity = Some(q);
            }
        }
    }

    let count = quantity?;
    if name_parts.is_empty() {
        return None;
    }

    let raw_name = name_parts.join(" ");
    let size = parse_unit_and_value(&raw_name);
    let name = clean_name(&raw_name);

    if name.len() <= NAME_MIN_LEN || name.len() >= NAME_MAX_LEN {
        trace!("dropping block: cleaned name {:?} from {:?} out of range", name, raw_name);
        return None;
    }

    Some(ExtractedItem {
        name,
        count,
        unit_value: size.value,
        unit: size.unit,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::invoice::rows::cluster_rows;
    use crate::models::invoice::Unit;
    use pretty_assertions::assert_eq;

    const COLUMNS: ColumnBoundary = ColumnBoundary {
        name_x: 30.0,
        qty_x: 200.0,
    };

    fn block(fragments: &[(&str, f64, f64)]) -> ItemBlock {
        let fragments: Vec<TextFragment> = fragments
            .iter()
            .map(|(c, x, y)| TextFragment::new(*c, *x, *y))
            .collect();
        cluster_rows(&fragments)
    }

    #[test]
    fn test_basic_item() {
        let block = block(&[
            ("1", 10.0, 500.0),
            ("Amul", 30.0, 500.0),
            ("Taaza", 60.0, 500.0),
            ("Milk", 90.0, 500.0),
            ("500g", 120.0, 500.0),
            ("1", 200.0, 500.0),
        ]);

        let item = extract_item(&block, &COLUMNS).unwrap();
        assert_eq!(
            item,
            ExtractedItem {
                name: "Amul Taaza Milk".to_string(),
                count: 1.0,
                unit_value: 500.0,
                unit: Unit::G,
            }
        );
    }

    #[test]
    fn test_name_spans_rows_and_size_read_before_cleaning() {
        let block = block(&[
            ("2", 10.0, 500.0),
            ("Fortune Sunflower", 30.0, 500.0),
            ("3", 205.0, 500.0),
            ("Oil (1l)", 30.0, 490.0),
        ]);

        let item = extract_item(&block, &COLUMNS).unwrap();
        assert_eq!(item.name, "Fortune Sunflower Oil");
        assert_eq!(item.count, 3.0);
        assert_eq!(item.unit_value, 1000.0);
        assert_eq!(item.unit, Unit::Ml);
    }

    #[test]
    fn test_range_boundaries() {
        // 25 is the inclusive left edge of the name range, 190 its exclusive
        // right edge; 195 and 215 bound the quantity range the same way.
        let block = block(&[
            ("Left", 25.0, 500.0),
            ("Edge", 190.0, 500.0),
            ("Bread", 100.0, 500.0),
            ("4", 195.0, 500.0),
            ("9", 215.0, 500.0),
        ]);

        let item = extract_item(&block, &COLUMNS).unwrap();
        assert_eq!(item.name, "Left Bread");
        assert_eq!(item.count, 4.0);
    }

    #[test]
    fn test_money_and_numbers_excluded_from_name() {
        let block = block(&[
            ("Eggs", 30.0, 500.0),
            ("₹45", 60.0, 500.0),
            ("5%", 80.0, 500.0),
            ("+GST", 100.0, 500.0),
            ("10.00", 120.0, 500.0),
            ("12", 140.0, 500.0),
            ("Brown", 160.0, 500.0),
            ("6", 200.0, 500.0),
        ]);

        let item = extract_item(&block, &COLUMNS).unwrap();
        assert_eq!(item.name, "Eggs Brown");
        assert_eq!(item.unit, Unit::Pcs);
        assert_eq!(item.unit_value, 1.0);
    }

    #[test]
    fn test_last_quantity_wins() {
        let block = block(&[
            ("Rice", 30.0, 500.0),
            ("2", 200.0, 500.0),
            ("1,5", 202.0, 490.0),
            ("250", 201.0, 480.0),
        ]);

        // "1,5" reads as 15; 250 is out of range and ignored.
        let item = extract_item(&block, &COLUMNS).unwrap();
        assert_eq!(item.count, 15.0);
    }

    #[test]
    fn test_missing_quantity() {
        let block = block(&[("Rice", 30.0, 500.0), ("0", 200.0, 500.0)]);
        assert_eq!(extract_item(&block, &COLUMNS), None);
    }

    #[test]
    fn test_missing_name() {
        let block = block(&[("42", 30.0, 500.0), ("1", 200.0, 500.0)]);
        assert_eq!(extract_item(&block, &COLUMNS), None);
    }

    #[test]
    fn test_cleaned_name_too_short() {
        // Cleans down to "Ok", two bytes, which is not strictly above the
        // minimum.
        let short = block(&[("Ok 500g", 30.0, 500.0), ("1", 200.0, 500.0)]);
        assert_eq!(extract_item(&short, &COLUMNS), None);

        let three = block(&[("Oat 500g", 30.0, 500.0), ("1", 200.0, 500.0)]);
        assert_eq!(extract_item(&three, &COLUMNS).unwrap().name, "Oat");
    }
}
