//! Database: catalog of tables, lifecycle, and the data directory.
//!
//! Reframes the notion of a process-wide `DATA_DIR` (spec.md §9,
//! "mutable global data directory") as a value that owns its root path
//! and passes it explicitly to the tables and buffer pool it creates.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use log::info;
use serde::{Deserialize, Serialize};

use crate::buffer::BufferPoolManager;
use crate::common::config::{BUFFER_POOL_FRAMES, MERGE_ON_CLOSE};
use crate::common::{Error, Result};
use crate::storage::DiskManager;
use crate::table::{Table, TableSchema};

#[derive(Debug, Serialize, Deserialize)]
struct Catalog {
    tables: Vec<TableSchema>,
}

/// An open database: a shared buffer pool plus the set of tables loaded
/// from (or created under) one data directory.
pub struct Database {
    root: PathBuf,
    buffer_pool: Arc<BufferPoolManager>,
    tables: HashMap<String, Table>,
}

impl Database {
    /// Open a data directory, recovering any tables listed in its
    /// `metadata.json` (spec.md §4.6). Creates the directory if it does
    /// not exist yet, in which case no tables are recovered.
    pub fn open<P: AsRef<Path>>(root: P) -> Result<Self> {
        let root = root.as_ref().to_path_buf();
        let disk = DiskManager::open(&root)?;
        let buffer_pool = Arc::new(BufferPoolManager::new(BUFFER_POOL_FRAMES, DiskManager::open(&root)?));

        let mut tables = HashMap::new();
        if disk.metadata_path().exists() {
            let bytes = std::fs::read(disk.metadata_path())?;
            let catalog: Catalog = serde_json::from_slice(&bytes)?;
            for schema in &catalog.tables {
                let table = Table::recover(schema, &disk, buffer_pool.clone())?;
                tables.insert(schema.name.clone(), table);
            }
            info!("opened database at {:?} with {} table(s)", root, tables.len());
        } else {
            info!("opened fresh database at {:?}", root);
        }

        Ok(Self {
            root,
            buffer_pool,
            tables,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Create a new, empty table. Fails `TableExists` if a table with
    /// this name is already present.
    pub fn create_table(&mut self, name: &str, num_columns: usize, key_index: usize) -> Result<()> {
        if self.tables.contains_key(name) {
            return Err(Error::TableExists(name.to_string()));
        }
        let schema = TableSchema::new(name, num_columns, key_index);
        let table = Table::new(&schema, self.buffer_pool.clone());
        self.tables.insert(name.to_string(), table);
        info!("created table {name} ({num_columns} columns, key_index={key_index})");
        Ok(())
    }

    pub fn get_table(&self, name: &str) -> Result<&Table> {
        self.tables.get(name).ok_or_else(|| Error::NoSuchTable(name.to_string()))
    }

    pub fn get_table_mut(&mut self, name: &str) -> Result<&mut Table> {
        self.tables
            .get_mut(name)
            .ok_or_else(|| Error::NoSuchTable(name.to_string()))
    }

    pub fn table_names(&self) -> Vec<&str> {
        self.tables.keys().map(String::as_str).collect()
    }

    /// Write `metadata.json`, optionally run `merge` on every table (if
    /// `MERGE_ON_CLOSE`), and flush every dirty page.
    pub fn close(mut self) -> Result<()> {
        if MERGE_ON_CLOSE {
            for table in self.tables.values_mut() {
                table.merge()?;
            }
        }

        let catalog = Catalog {
            tables: self.tables.values().map(Table::schema).collect(),
        };
        let bytes = serde_json::to_vec_pretty(&catalog)?;
        std::fs::write(DiskManager::open(&self.root)?.metadata_path(), bytes)?;

        self.buffer_pool.flush_all_pages()?;
        info!("closed database at {:?}", self.root);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_create_table_rejects_duplicate_name() {
        let dir = tempdir().unwrap();
        let mut db = Database::open(dir.path()).unwrap();
        db.create_table("grades", 3, 0).unwrap();
        let err = db.create_table("grades", 2, 0).unwrap_err();
        assert!(matches!(err, Error::TableExists(_)));
    }

    #[test]
    fn test_get_missing_table_fails() {
        let dir = tempdir().unwrap();
        let db = Database::open(dir.path()).unwrap();
        let err = db.get_table("nope").unwrap_err();
        assert!(matches!(err, Error::NoSuchTable(_)));
    }

    // Scenario S5 from spec.md §8.
    #[test]
    fn test_close_then_open_recovers_rows() {
        let dir = tempdir().unwrap();
        {
            let mut db = Database::open(dir.path()).unwrap();
            db.create_table("grades", 2, 0).unwrap();
            let t = db.get_table_mut("grades").unwrap();
            t.insert(&[1, 10]).unwrap();
            t.update(1, &[None, Some(99)]).unwrap();
            db.close().unwrap();
        }

        let db = Database::open(dir.path()).unwrap();
        let t = db.get_table("grades").unwrap();
        assert_eq!(t.select(1, 0, &[1]).unwrap(), vec![vec![99]]);
        assert_eq!(t.select_version(1, 0, &[1], -1).unwrap(), vec![vec![10]]);
    }
}
