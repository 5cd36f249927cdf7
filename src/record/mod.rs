//! The record model: meta-column layout shared by every table.
//!
//! spec.md §3 fixes four meta columns, in order, ahead of a table's user
//! columns: `INDIRECTION`, `RID`, `TIMESTAMP`, `SCHEMA`. Physical column
//! index `i` for `i < META_COLUMN_COUNT` is one of these; column index
//! `META_COLUMN_COUNT + j` is user column `j`.

use crate::common::config::META_COLUMN_COUNT;

/// Physical column index of the `INDIRECTION` meta column.
pub const COL_INDIRECTION: u16 = 0;
/// Physical column index of the `RID` meta column.
pub const COL_RID: u16 = 1;
/// Physical column index of the `TIMESTAMP` meta column.
pub const COL_TIMESTAMP: u16 = 2;
/// Physical column index of the `SCHEMA` meta column.
pub const COL_SCHEMA: u16 = 3;

/// Physical column index of user column `j` (0-based).
#[inline]
pub fn user_column(j: usize) -> u16 {
    (META_COLUMN_COUNT + j) as u16
}

/// Total physical column count for a table with `num_columns` user
/// columns.
#[inline]
pub fn physical_column_count(num_columns: usize) -> usize {
    META_COLUMN_COUNT + num_columns
}

/// Build a `SCHEMA` bitmask from a set of changed user-column indices.
pub fn schema_mask(changed: impl IntoIterator<Item = usize>) -> u64 {
    let mut mask = 0u64;
    for i in changed {
        mask |= 1 << i;
    }
    mask
}

/// Whether bit `i` of a `SCHEMA` bitmask is set.
#[inline]
pub fn bit_set(mask: u64, i: usize) -> bool {
    (mask >> i) & 1 == 1
}
