//! Search query construction.

use crate::types::table::{columns, InputRow};

/// Space-join the non-empty identifying and category fields of `row`,
/// in fixed column order.
pub fn build_query(row: &InputRow) -> String {
    columns::QUERY_ORDER
        .iter()
        .map(|col| row.get(col).trim())
        .filter(|value| !value.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
