//! Segmentation of table rows into per-item blocks.

use tracing::trace;

use super::rows::Row;

/// Rows belonging to one invoice line item.
pub type ItemBlock = Vec<Row>;

/// Header rows name at least two columns of the item table.
fn is_header_row(text: &str) -> bool {
    (text.contains("description") && text.contains("qty"))
        || (text.contains("description") && text.contains("mrp"))
        || (text.contains("hsn") && text.contains("qty"))
}

/// Totals end the item table.
fn is_terminal_row(text: &str) -> bool {
    text.contains("total") || text.contains("subtotal")
}

/// A row opens a new item when it starts with a line number 1-99.
fn is_item_start(row: &Row) -> bool {
    row.first()
        .and_then(|f| f.content.trim().parse::<i64>().ok())
        .is_some_and(|n| (1..=99).contains(&n))
}

/// Split a page's rows into item blocks.
///
/// Everything up to and including the last header row seen is skipped.
/// After that, blocks are delimited by item-start rows; a totals row closes
/// the open block and ends the table.
pub fn segment_blocks(rows: &[Row]) -> Vec<ItemBlock> {
    let mut blocks = Vec::new();
    let mut current: ItemBlock = Vec::new();
    let mut past_headers = false;

    for row in rows {
        let text = row.normalized_text();

        if is_header_row(&text) {
            past_headers = true;
            continue;
        }

        if !past_headers {
            continue;
        }

        let terminal = is_terminal_row(&text);
        if terminal || (is_item_start(row) && !current.is_empty()) {
            if !current.is_empty() {
                trace!("closing block of {} rows at y={:.2}", current.len(), row.y);
                blocks.push(std::mem::take(&mut current));
            }
            if terminal {
                return blocks;
            }
        }

        if !row.fragments.is_empty() {
            current.push(row.clone());
        }
    }

    if !current.is_empty() {
        blocks.push(current);
    }

    blocks
}
