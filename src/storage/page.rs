//! Page - the fundamental slotted container of one column, one page
//! number, one table.
//!
//! A [`Page`] holds up to `capacity` signed 64-bit slots. Slots are only
//! ever appended, except for the in-place overwrite `merge` performs on
//! base pages (spec.md §3, "Page").

use serde::{Deserialize, Serialize};

use crate::common::{Error, Result};

/// A page of integer slots.
///
/// # Clone
/// Unlike the teacher's fixed 4KB byte page, `Page` clones cheaply enough
/// (a `Vec<i64>` of at most `PAGE_CAPACITY` entries) that no `#[cfg(test)]`
/// restriction is needed; the buffer pool still treats a page as owned by
/// exactly one frame at a time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    capacity: usize,
    slot_count: usize,
    slots: Vec<i64>,
}

/// On-disk representation of a page: `{slot_count, checksum, slots}`,
/// matching spec.md §6's `{slot_count, slots[0..slot_count]}` layout with
/// an added checksum for corruption detection (see `Page::verify`).
#[derive(Debug, Serialize, Deserialize)]
struct PageFile {
    slot_count: usize,
    checksum: u32,
    slots: Vec<i64>,
}

impl Page {
    /// Create a new empty page with the given slot capacity.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            slot_count: 0,
            slots: Vec::with_capacity(capacity),
        }
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline]
    pub fn slot_count(&self) -> usize {
        self.slot_count
    }

    #[inline]
    pub fn has_capacity(&self) -> bool {
        self.slot_count < self.capacity
    }

    /// Append a value, returning its slot index.
    ///
    /// # Errors
    /// Returns `Error::CorruptPage` if the page is full; callers are
    /// expected to have checked `has_capacity()` first (a full page is
    /// a logic error, not an expected runtime condition, but we still
    /// surface a typed error instead of panicking).
    pub fn write(&mut self, value: i64) -> Result<usize> {
        if !self.has_capacity() {
            return Err(Error::CorruptPage(format!(
                "write to full page (capacity {})",
                self.capacity
            )));
        }
        let slot = self.slot_count;
        self.slots.push(value);
        self.slot_count += 1;
        Ok(slot)
    }

    /// Overwrite an existing slot. Used only by merge's base-page
    /// writeback (spec.md §4.7); all other writers must append.
    pub fn overwrite(&mut self, slot: usize, value: i64) -> Result<()> {
        if slot >= self.slot_count {
            return Err(Error::CorruptPage(format!(
                "overwrite of slot {slot} beyond slot_count {}",
                self.slot_count
            )));
        }
        self.slots[slot] = value;
        Ok(())
    }

    pub fn read(&self, slot: usize) -> Result<i64> {
        self.slots.get(slot).copied().ok_or_else(|| {
            Error::CorruptPage(format!("read of slot {slot} beyond slot_count {}", self.slot_count))
        })
    }

    fn checksum(slots: &[i64]) -> u32 {
        let mut hasher = crc32fast::Hasher::new();
        for v in slots {
            hasher.update(&v.to_le_bytes());
        }
        hasher.finalize()
    }

    /// Serialize to the on-disk JSON representation.
    pub fn serialize(&self) -> Result<Vec<u8>> {
        let file = PageFile {
            slot_count: self.slot_count,
            checksum: Self::checksum(&self.slots[..self.slot_count]),
            slots: self.slots[..self.slot_count].to_vec(),
        };
        Ok(serde_json::to_vec(&file)?)
    }

    /// Deserialize from bytes, verifying internal consistency.
    ///
    /// On a checksum mismatch or a `slot_count`/`slots.len()` disagreement,
    /// returns `Error::CorruptPage` rather than panicking — recovery
    /// (`table::recovery`) catches this per column and truncates to the
    /// shorter consistent slot count across a record's physical columns.
    pub fn deserialize(bytes: &[u8], capacity: usize) -> Result<Self> {
        let file: PageFile = serde_json::from_slice(bytes)?;

        if file.slots.len() < file.slot_count {
            return Err(Error::CorruptPage(format!(
                "slot_count {} exceeds {} stored slots",
                file.slot_count,
                file.slots.len()
            )));
        }

        let slots = &file.slots[..file.slot_count];
        if Self::checksum(slots) != file.checksum {
            return Err(Error::CorruptPage("checksum mismatch".to_string()));
        }

        Ok(Self {
            capacity,
            slot_count: file.slot_count,
            slots: slots.to_vec(),
        })
    }
}
