//! Table recovery (spec.md §4.6): rebuild the page directory, RID
//! counters, and PK index by scanning on-disk pages directly — the
//! buffer pool's cache is empty at this point, so there is nothing to
//! gain from routing reads through it.

use std::collections::BTreeSet;
use std::sync::Arc;

use log::warn;

use crate::buffer::BufferPoolManager;
use crate::common::config::META_COLUMN_COUNT;
use crate::common::{Error, PageKind, Result, Rid};
use crate::record::{physical_column_count, user_column, COL_RID};
use crate::storage::{DiskManager, Page};

use super::{Table, TableSchema};

impl Table {
    /// Reconstruct a table's in-memory state from the pages already on
    /// disk under `disk`'s root. `buffer_pool` is the pool this table
    /// will use for all subsequent operations.
    pub(crate) fn recover(
        schema: &TableSchema,
        disk: &DiskManager,
        buffer_pool: Arc<BufferPoolManager>,
    ) -> Result<Table> {
        let mut table = Table::new(schema, buffer_pool);
        table.recover_region(disk, PageKind::Base)?;
        table.recover_region(disk, PageKind::Tail)?;
        table.rebuild_counters();
        table.rebuild_pk_index()?;
        Ok(table)
    }

    fn recover_region(&mut self, disk: &DiskManager, kind: PageKind) -> Result<()> {
        let ncols = physical_column_count(self.num_columns);

        let mut page_nums = BTreeSet::new();
        for c in 0..ncols {
            for n in disk.page_numbers(&self.name, c as u16, kind)? {
                page_nums.insert(n);
            }
        }

        for page_no in page_nums {
            let mut pages: Vec<Option<Page>> = Vec::with_capacity(ncols);
            for c in 0..ncols {
                let pid = self.page_id(c as u16, page_no, kind);
                match disk.read_page(&pid) {
                    Ok(p) => pages.push(Some(p)),
                    Err(Error::PageNotFound(_)) => pages.push(None),
                    Err(Error::CorruptPage(msg)) => {
                        warn!("corrupt page {pid}: {msg}, truncating to shorter slot count");
                        pages.push(None);
                    }
                    Err(e) => return Err(e),
                }
            }

            // Only the meta columns gate how many slots are recoverable: a
            // missing/corrupt user-column page must not drop records whose
            // RID/INDIRECTION/TIMESTAMP/SCHEMA are otherwise intact.
            let min_count = pages[..META_COLUMN_COUNT]
                .iter()
                .map(|p| p.as_ref().map(Page::slot_count).unwrap_or(0))
                .min()
                .unwrap_or(0);

            let rid_page = pages[COL_RID as usize].as_ref();
            for slot in 0..min_count {
                let rid_value = match rid_page {
                    Some(p) => p.read(slot)?,
                    None => break,
                };
                let rid = if kind == PageKind::Base {
                    Rid::base(rid_value as u64)
                } else {
                    Rid::tail(rid_value as u64)
                };

                let locations = (0..ncols)
                    .map(|c| (self.page_id(c as u16, page_no, kind), slot))
                    .collect();
                self.page_directory.insert(rid, locations);
            }
        }
        Ok(())
    }

    fn rebuild_counters(&mut self) {
        let mut max_base: Option<u64> = None;
        let mut max_tail: Option<u64> = None;
        for rid in self.page_directory.keys() {
            let slot = if rid.is_base() { &mut max_base } else { &mut max_tail };
            *slot = Some(slot.map_or(rid.value, |m| m.max(rid.value)));
        }
        self.base_counter = max_base.map_or(0, |m| m + 1);
        self.tail_counter = max_tail.map_or(0, |m| m + 1);
    }

    /// Rebuild the PK index from base records. Per spec.md §9.1, the
    /// deleted set is not persisted, so every base record found on disk
    /// is treated as live.
    fn rebuild_pk_index(&mut self) -> Result<()> {
        let base_rids: Vec<Rid> = self.page_directory.keys().filter(|r| r.is_base()).copied().collect();
        for rid in base_rids {
            let key = self.read_physical(rid, user_column(self.key_index))?;
            self.pk_index.insert_unique(key, rid);
        }
        Ok(())
    }
}
