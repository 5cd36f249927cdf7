//! `insert` / `update` / `delete` (spec.md §4.4).

use log::debug;

use crate::common::{Error, PageKind, Result, Rid};
use crate::record::{schema_mask, COL_INDIRECTION, COL_RID, COL_SCHEMA, COL_TIMESTAMP};

use super::Table;

impl Table {
    /// Insert a new row. Fails `DuplicateKey` if the key column's value is
    /// already present.
    pub fn insert(&mut self, values: &[i64]) -> Result<Rid> {
        assert_eq!(values.len(), self.num_columns, "value count must match table width");

        let key = values[self.key_index];
        if self.pk_index.contains(key) {
            return Err(Error::DuplicateKey(key));
        }

        let base_rid = Rid::base(self.base_counter);
        let ts = self.next_timestamp();
        let mut meta = [0i64; 4];
        meta[COL_INDIRECTION as usize] = base_rid.encode();
        meta[COL_RID as usize] = base_rid.encode();
        meta[COL_TIMESTAMP as usize] = ts;
        meta[COL_SCHEMA as usize] = 0;

        let locations = self.append_record(PageKind::Base, self.base_counter, meta, values)?;
        self.page_directory.insert(base_rid, locations);
        self.base_counter += 1;

        self.pk_index.insert_unique(key, base_rid);
        for (&col, idx) in self.secondary_indexes.iter_mut() {
            idx.insert(values[col], base_rid);
        }

        debug!("insert table={} rid={base_rid} key={key}", self.name);
        Ok(base_rid)
    }

    /// Apply a cumulative update. `new_values[i] = None` means "keep the
    /// current value"; the key column must be `None`.
    pub fn update(&mut self, key: i64, new_values: &[Option<i64>]) -> Result<()> {
        assert_eq!(
            new_values.len(),
            self.num_columns,
            "value count must match table width"
        );
        if new_values[self.key_index].is_some() {
            return Err(Error::InvalidUpdate);
        }

        let base_rid = self.pk_index.locate(key).ok_or(Error::NotFound(key))?;

        let all_cols: Vec<usize> = (0..self.num_columns).collect();
        let current = self.compose(base_rid, &all_cols, 0)?;

        let mut changed = Vec::new();
        for i in 0..self.num_columns {
            if let Some(v) = new_values[i] {
                if v != current[i] {
                    changed.push(i);
                }
            }
        }
        if changed.is_empty() {
            return Ok(());
        }
        let changed_mask = schema_mask(changed.iter().copied());

        let tail_rid = Rid::tail(self.tail_counter);
        let prev_head = Rid::decode(self.read_physical(base_rid, COL_INDIRECTION)?);
        let ts = self.next_timestamp();

        let mut meta = [0i64; 4];
        meta[COL_INDIRECTION as usize] = prev_head.encode();
        meta[COL_RID as usize] = tail_rid.encode();
        meta[COL_TIMESTAMP as usize] = ts;
        meta[COL_SCHEMA as usize] = changed_mask as i64;

        let mut user_values = vec![0i64; self.num_columns];
        for &i in &changed {
            user_values[i] = new_values[i].unwrap();
        }

        let locations = self.append_record(PageKind::Tail, self.tail_counter, meta, &user_values)?;
        self.page_directory.insert(tail_rid, locations);
        self.tail_counter += 1;

        self.overwrite_physical(base_rid, COL_INDIRECTION, tail_rid.encode())?;

        for &i in &changed {
            if let Some(idx) = self.secondary_indexes.get_mut(&i) {
                idx.update_entry(current[i], new_values[i].unwrap(), base_rid);
            }
        }

        debug!(
            "update table={} rid={base_rid} tail={tail_rid} mask={changed_mask:#x}",
            self.name
        );
        Ok(())
    }

    /// Tombstone the record with the given key. Its tail chain is left
    /// intact on disk; only the index entries and the deleted set change.
    pub fn delete(&mut self, key: i64) -> Result<()> {
        let base_rid = self.pk_index.locate(key).ok_or(Error::NotFound(key))?;

        let all_cols: Vec<usize> = (0..self.num_columns).collect();
        let current = self.compose(base_rid, &all_cols, 0)?;

        self.deleted.insert(base_rid);
        self.pk_index.remove(key);
        for (&col, idx) in self.secondary_indexes.iter_mut() {
            idx.remove(current[col], base_rid);
        }

        debug!("delete table={} rid={base_rid} key={key}", self.name);
        Ok(())
    }
}
