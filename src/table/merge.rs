//! Merge (spec.md §4.7): compact each live base record's user columns to
//! its newest version in place, then reset `INDIRECTION`/`SCHEMA` so the
//! base is once again its own newest version.
//!
//! This collapses version history: per the open question in spec.md §9.3,
//! this implementation resolves it so that after a merge, `select_version`
//! at any depth for an affected key returns the merged (newest) value —
//! the tail pages are left on disk but no longer reachable from the
//! base's `INDIRECTION`, so the composer never walks them again.

use log::debug;

use crate::common::Result;
use crate::record::{COL_INDIRECTION, COL_SCHEMA};

use super::Table;

impl Table {
    /// Compact every live base record. Destructive to per-column version
    /// history; callers only reach this when `MERGE_ON_CLOSE` is set or
    /// they call it explicitly.
    pub fn merge(&mut self) -> Result<()> {
        let all_cols: Vec<usize> = (0..self.num_columns).collect();
        let base_rids: Vec<_> = self
            .page_directory
            .keys()
            .filter(|r| r.is_base())
            .copied()
            .collect();

        let mut merged = 0usize;
        for rid in base_rids {
            if self.deleted.contains(&rid) {
                continue;
            }
            let newest = self.compose(rid, &all_cols, 0)?;
            for (i, &v) in newest.iter().enumerate() {
                self.overwrite_physical(rid, crate::record::user_column(i), v)?;
            }
            self.overwrite_physical(rid, COL_INDIRECTION, rid.encode())?;
            self.overwrite_physical(rid, COL_SCHEMA, 0)?;
            merged += 1;
        }

        debug!("merge table={} compacted {merged} base records", self.name);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::BufferPoolManager;
    use crate::common::config::BUFFER_POOL_FRAMES;
    use crate::storage::DiskManager;
    use crate::table::TableSchema;
    use std::sync::Arc;
    use tempfile::tempdir;

    fn new_table(num_columns: usize, key_index: usize) -> (Table, tempfile::TempDir) {
        let dir = tempdir().unwrap();
        let dm = DiskManager::open(dir.path()).unwrap();
        let bpm = Arc::new(BufferPoolManager::new(BUFFER_POOL_FRAMES, dm));
        let schema = TableSchema::new("t", num_columns, key_index);
        (Table::new(&schema, bpm), dir)
    }

    #[test]
    fn test_merge_collapses_to_newest_value() {
        let (mut t, _dir) = new_table(2, 0);
        t.insert(&[1, 10]).unwrap();
        t.update(1, &[None, Some(20)]).unwrap();
        t.update(1, &[None, Some(30)]).unwrap();

        t.merge().unwrap();

        assert_eq!(t.select(1, 0, &[1]).unwrap(), vec![vec![30]]);
        assert_eq!(t.select_version(1, 0, &[1], -1).unwrap(), vec![vec![30]]);
        assert_eq!(t.select_version(1, 0, &[1], -5).unwrap(), vec![vec![30]]);
    }

    #[test]
    fn test_merge_skips_deleted() {
        let (mut t, _dir) = new_table(2, 0);
        t.insert(&[1, 10]).unwrap();
        t.delete(1).unwrap();
        t.merge().unwrap();
        assert!(t.select(1, 0, &[1]).unwrap().is_empty());
    }
}
