//! Table: the base/tail record store for one logical table.
//!
//! A [`Table`] owns its page directory, RID counters, deleted set, and
//! indexes. It never holds its own `BufferPoolManager` — tables in the
//! same database share one pool (`Database` owns the `Arc`).

mod merge;
mod mutate;
mod query;
mod recovery;
mod schema;
mod version;

pub use query::Query;
pub use schema::TableSchema;

use std::collections::HashMap;
use std::collections::HashSet;
use std::sync::Arc;

use crate::buffer::BufferPoolManager;
use crate::common::config::META_COLUMN_COUNT;
use crate::common::{Error, PageId, PageKind, Result, Rid};
use crate::index::{HashIndex, PrimaryIndex};
use crate::record::{physical_column_count, user_column};

/// (page_id, slot) for one physical column, at a fixed slot index shared
/// by all of a RID's physical columns (I1).
type PageLocation = (PageId, usize);

pub struct Table {
    name: Arc<str>,
    num_columns: usize,
    key_index: usize,
    buffer_pool: Arc<BufferPoolManager>,
    page_directory: HashMap<Rid, Vec<PageLocation>>,
    base_counter: u64,
    tail_counter: u64,
    clock: u64,
    deleted: HashSet<Rid>,
    pk_index: PrimaryIndex,
    secondary_indexes: HashMap<usize, HashIndex>,
}

impl Table {
    pub(crate) fn new(schema: &TableSchema, buffer_pool: Arc<BufferPoolManager>) -> Self {
        Self {
            name: Arc::from(schema.name.as_str()),
            num_columns: schema.num_columns,
            key_index: schema.key_index,
            buffer_pool,
            page_directory: HashMap::new(),
            base_counter: 0,
            tail_counter: 0,
            clock: 0,
            deleted: HashSet::new(),
            pk_index: PrimaryIndex::new(),
            secondary_indexes: HashMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn num_columns(&self) -> usize {
        self.num_columns
    }

    pub fn key_index(&self) -> usize {
        self.key_index
    }

    pub fn schema(&self) -> TableSchema {
        TableSchema::new(self.name.to_string(), self.num_columns, self.key_index)
    }

    /// Build (or rebuild) a secondary index over `column` by scanning
    /// every live base record (spec.md §4.3 `create_index`).
    pub fn create_index(&mut self, column: usize) -> Result<()> {
        let mut idx = HashIndex::new();
        let base_rids: Vec<Rid> = self
            .page_directory
            .keys()
            .filter(|r| r.is_base())
            .copied()
            .collect();
        for rid in base_rids {
            if self.deleted.contains(&rid) {
                continue;
            }
            let v = self.read_physical(rid, user_column(column))?;
            idx.insert(v, rid);
        }
        self.secondary_indexes.insert(column, idx);
        Ok(())
    }

    pub fn drop_index(&mut self, column: usize) {
        self.secondary_indexes.remove(&column);
    }

    pub(crate) fn flush(&self) -> Result<()> {
        self.buffer_pool.flush_all_pages()
    }

    fn next_timestamp(&mut self) -> i64 {
        self.clock += 1;
        self.clock as i64
    }

    fn page_id(&self, column: u16, page_no: u32, kind: PageKind) -> PageId {
        PageId::new(self.name.clone(), column, page_no, kind)
    }

    fn physical_page_no(ordinal: u64) -> u32 {
        (ordinal / crate::common::config::PAGE_CAPACITY as u64) as u32
    }

    fn physical_slot(ordinal: u64) -> usize {
        (ordinal % crate::common::config::PAGE_CAPACITY as u64) as usize
    }

    /// Append one logical record (all physical columns, meta + user) at
    /// `ordinal`'s slot in every column's current page, allocating a
    /// fresh page per column when `ordinal` starts one.
    fn append_record(
        &self,
        kind: PageKind,
        ordinal: u64,
        meta: [i64; META_COLUMN_COUNT],
        user_values: &[i64],
    ) -> Result<Vec<PageLocation>> {
        let ncols = physical_column_count(self.num_columns);
        let page_no = Self::physical_page_no(ordinal);
        let slot_expected = Self::physical_slot(ordinal);

        let mut locations = Vec::with_capacity(ncols);
        for c in 0..ncols {
            let value = if c < META_COLUMN_COUNT {
                meta[c]
            } else {
                user_values[c - META_COLUMN_COUNT]
            };
            let pid = self.page_id(c as u16, page_no, kind);

            let slot = if slot_expected == 0 {
                let mut guard = self.buffer_pool.new_page(pid.clone())?;
                guard.write(value)?
            } else {
                let mut guard = self.buffer_pool.fetch_page_write(&pid)?;
                guard.write(value)?
            };
            debug_assert_eq!(slot, slot_expected);
            locations.push((pid, slot));
        }
        Ok(locations)
    }

    fn locations(&self, rid: Rid) -> Result<&[PageLocation]> {
        self.page_directory.get(&rid).map(Vec::as_slice).ok_or_else(|| {
            Error::CorruptPage(format!("no page-directory entry for rid {rid}"))
        })
    }

    fn read_physical(&self, rid: Rid, column: u16) -> Result<i64> {
        let (pid, slot) = &self.locations(rid)?[column as usize];
        let guard = self.buffer_pool.fetch_page_read(pid)?;
        guard.read(*slot)
    }

    fn overwrite_physical(&self, rid: Rid, column: u16, value: i64) -> Result<()> {
        let (pid, slot) = self.locations(rid)?[column as usize].clone();
        let mut guard = self.buffer_pool.fetch_page_write(&pid)?;
        guard.overwrite(slot, value)
    }
}
