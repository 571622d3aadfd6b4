//! Row clustering of positioned fragments.

use crate::models::document::TextFragment;

/// Maximum vertical distance (exclusive) between a fragment and a row's
/// representative y for the fragment to join that row.
pub const ROW_TOLERANCE: f64 = 2.0;

/// Fragments judged to lie on the same text line.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    /// The y of the fragment that created the row. Never updated.
    pub y: f64,
    /// Member fragments in source order, content trimmed.
    pub fragments: Vec<TextFragment>,
}

impl Row {
    fn new(fragment: TextFragment) -> Self {
        Self {
            y: fragment.y,
            fragments: vec![fragment],
        }
    }

    /// Lowercased contents concatenated with all spaces removed, so that
    /// "D e s c r i p t i o n" and "Description" read the same.
    pub fn normalized_text(&self) -> String {
        self.fragments
            .iter()
            .flat_map(|f| f.content.chars())
            .filter(|c| *c != ' ')
            .flat_map(char::to_lowercase)
            .collect()
    }

    /// Contents joined with single spaces.
    pub fn joined_text(&self) -> String {
        self.fragments
            .iter()
            .map(|f| f.content.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn first(&self) -> Option<&TextFragment> {
        self.fragments.first()
    }

    fn accepts(&self, y: f64) -> bool {
        (self.y - y).abs() < ROW_TOLERANCE
    }
}

/// Group fragments into rows.
///
/// Each non-blank fragment joins the first existing row (in creation order)
/// whose representative y is within [`ROW_TOLERANCE`], otherwise it opens a
/// new row. Rows come back in creation order, not sorted by y.
pub fn cluster_rows(fragments: &[TextFragment]) -> Vec<Row> {
    let mut rows: Vec<Row> = Vec::new();

    for fragment in fragments {
        if fragment.is_blank() {
            continue;
        }

        let fragment = TextFragment::new(fragment.content.trim(), fragment.x, fragment.y);
        match rows.iter_mut().find(|row| row.accepts(fragment.y)) {
            Some(row) => row.fragments.push(fragment),
            None => rows.push(Row::new(fragment)),
        }
    }

    rows
}
