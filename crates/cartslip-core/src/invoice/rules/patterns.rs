//! Common regex patterns for grocery invoice item names.

use lazy_static::lazy_static;
use regex::Regex;

// Whitespace (`[ \t\n\f\r]`) and word boundaries (`(?-u:\b)`) are ASCII-only:
// a no-break space is not a separator and an accented letter does not glue
// onto a following digit run.

lazy_static! {
    // Package size, tried in this order against the lowercased name.
    pub static ref UNIT_PARENTHETICAL: Regex = Regex::new(
        r"\(([0-9]+(?:\.[0-9]+)?)[ \t\n\f\r]*(g|kg|ml|l|pc|pcs)\)"
    ).unwrap();

    pub static ref UNIT_INLINE: Regex = Regex::new(
        r"([0-9]+(?:\.[0-9]+)?)[ \t\n\f\r]*(g|kg|ml|l|pack|set|bundle)"
    ).unwrap();

    pub static ref UNIT_STANDALONE: Regex = Regex::new(
        r"(?-u:\b)([0-9]+(?:\.[0-9]+)?)[ \t\n\f\r]*(pc|pcs|kg|g|ml|l)(?-u:\b)"
    ).unwrap();

    // Name cleanup
    pub static ref TRAILING_UNIT: Regex = Regex::new(
        r"(?i)[ \t\n\f\r]+(pc|pcs|kg|g|ml|l)$"
    ).unwrap();

    pub static ref PARENTHETICAL_UNIT: Regex = Regex::new(
        r"(?i)\([^)]*?(kg|g|ml|l|pc|pcs)[^)]*?\)"
    ).unwrap();

    pub static ref SIZE_OR_CODE: Regex = Regex::new(
        r"(?i)([0-9]+\.?[0-9]*[ \t\n\f\r]*(g|kg|ml|l|pcs|pc|pack|set|bundle))|((?-u:\b)[0-9]{4,}(?-u:\b))"
    ).unwrap();

    pub static ref CASE_BOUNDARY: Regex = Regex::new(
        r"([a-z])([A-Z])"
    ).unwrap();

    pub static ref WHITESPACE_RUN: Regex = Regex::new(
        r"[ \t\n\f\r]+"
    ).unwrap();
}
