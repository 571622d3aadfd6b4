//! Display name cleanup for raw item names.

use super::patterns::{
    CASE_BOUNDARY, PARENTHETICAL_UNIT, SIZE_OR_CODE, TRAILING_UNIT, WHITESPACE_RUN,
};

/// Turn a raw joined name into a display name.
///
/// Size tokens and long digit runs (barcodes, SKU codes) are removed, dots
/// become spaces, fused camel-case words are split apart and whitespace is
/// collapsed. Run the unit parser on the raw name first: this throws the
/// size information away.
pub fn clean_name(raw: &str) -> String {
    let name = TRAILING_UNIT.replace_all(raw, "");
    let name = PARENTHETICAL_UNIT.replace_all(&name, "");
    let name = SIZE_OR_CODE.replace_all(&name, "");
    let name = name.replace('.', " ");
    let name = CASE_BOUNDARY.replace_all(&name, "$1 $2");
    let name = WHITESPACE_RUN.replace_all(&name, " ");

    name.trim().to_string()
}
