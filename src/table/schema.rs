//! Table schema: name, user-column count, and key column.

use serde::{Deserialize, Serialize};

/// A table's logical schema, as recorded in `metadata.json`
/// (spec.md §6).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TableSchema {
    pub name: String,
    pub num_columns: usize,
    pub key_index: usize,
}

impl TableSchema {
    pub fn new(name: impl Into<String>, num_columns: usize, key_index: usize) -> Self {
        Self {
            name: name.into(),
            num_columns,
            key_index,
        }
    }
}
