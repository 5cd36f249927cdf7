//! The query surface (spec.md §6): `select` / `select_version` / `sum` /
//! `sum_version`, plus a thin [`Query`] wrapper for callers that want a
//! single handle rather than calling `Table` methods directly.

use crate::common::Result;

use super::Table;

fn normalize_version(relative_version: i64) -> u64 {
    if relative_version >= 0 {
        0
    } else {
        (-relative_version) as u64
    }
}

impl Table {
    /// Point lookup by `key` on column `key_col` (the PK column or an
    /// indexed secondary column), returning the newest version of each
    /// matching, non-deleted row's `projected` columns.
    pub fn select(&self, key: i64, key_col: usize, projected: &[usize]) -> Result<Vec<Vec<i64>>> {
        self.select_version(key, key_col, projected, 0)
    }

    /// As [`Table::select`], at `relative_version` (0 newest, -1 one
    /// back, …; values beyond history clamp to the originally inserted
    /// row).
    pub fn select_version(
        &self,
        key: i64,
        key_col: usize,
        projected: &[usize],
        relative_version: i64,
    ) -> Result<Vec<Vec<i64>>> {
        let version_index = normalize_version(relative_version);
        let mut out = Vec::new();
        for rid in self.locate_by_column(key_col, key) {
            out.push(self.compose(rid, projected, version_index)?);
        }
        Ok(out)
    }

    /// Sum `aggregate_col` over the newest version of every live row
    /// whose key falls in `[start_key, end_key]`.
    pub fn sum(&self, start_key: i64, end_key: i64, aggregate_col: usize) -> Result<i64> {
        self.sum_version(start_key, end_key, aggregate_col, 0)
    }

    pub fn sum_version(
        &self,
        start_key: i64,
        end_key: i64,
        aggregate_col: usize,
        relative_version: i64,
    ) -> Result<i64> {
        let version_index = normalize_version(relative_version);
        let mut total = 0i64;
        for (_, rid) in self.pk_index.locate_range(start_key, end_key) {
            total += self.compose(rid, &[aggregate_col], version_index)?[0];
        }
        Ok(total)
    }

    fn locate_by_column(&self, col: usize, value: i64) -> Vec<crate::common::Rid> {
        if col == self.key_index {
            self.pk_index.locate(value).into_iter().collect()
        } else if let Some(idx) = self.secondary_indexes.get(&col) {
            idx.locate(value).into_iter().collect()
        } else {
            Vec::new()
        }
    }
}

/// A thin handle bundling a table reference for callers that prefer a
/// single object over free-standing `Table` methods. Every method here
/// just forwards to the identically named `Table` method.
pub struct Query<'a> {
    table: &'a mut Table,
}

impl<'a> Query<'a> {
    pub fn new(table: &'a mut Table) -> Self {
        Self { table }
    }

    pub fn insert(&mut self, values: &[i64]) -> Result<crate::common::Rid> {
        self.table.insert(values)
    }

    pub fn update(&mut self, key: i64, new_values: &[Option<i64>]) -> Result<()> {
        self.table.update(key, new_values)
    }

    pub fn delete(&mut self, key: i64) -> Result<()> {
        self.table.delete(key)
    }

    pub fn select(&self, key: i64, key_col: usize, projected: &[usize]) -> Result<Vec<Vec<i64>>> {
        self.table.select(key, key_col, projected)
    }

    pub fn select_version(
        &self,
        key: i64,
        key_col: usize,
        projected: &[usize],
        relative_version: i64,
    ) -> Result<Vec<Vec<i64>>> {
        self.table.select_version(key, key_col, projected, relative_version)
    }

    pub fn sum(&self, start_key: i64, end_key: i64, aggregate_col: usize) -> Result<i64> {
        self.table.sum(start_key, end_key, aggregate_col)
    }

    pub fn sum_version(
        &self,
        start_key: i64,
        end_key: i64,
        aggregate_col: usize,
        relative_version: i64,
    ) -> Result<i64> {
        self.table.sum_version(start_key, end_key, aggregate_col, relative_version)
    }
}
