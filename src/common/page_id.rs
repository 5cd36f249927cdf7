//! Page identifier type.

use std::fmt;
use std::sync::Arc;

/// Whether a page belongs to a table's base region or its tail region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageKind {
    Base,
    Tail,
}

impl PageKind {
    /// Directory name this kind is stored under (`base/` or `tail/`).
    pub fn dir_name(&self) -> &'static str {
        match self {
            PageKind::Base => "base",
            PageKind::Tail => "tail",
        }
    }
}

impl fmt::Display for PageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dir_name())
    }
}

/// Identifies a single physical page: one column of one table, one
/// page number, tagged base or tail.
///
/// `table` is an `Arc<str>` rather than `String` so that cloning a
/// `PageId` into the buffer pool's page table and the frame metadata
/// doesn't repeatedly allocate a copy of the table name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PageId {
    pub table: Arc<str>,
    pub column: u16,
    pub page_no: u32,
    pub kind: PageKind,
}

impl PageId {
    pub fn new(table: Arc<str>, column: u16, page_no: u32, kind: PageKind) -> Self {
        Self {
            table,
            column,
            page_no,
            kind,
        }
    }

    /// Relative path this page is stored at under the database root:
    /// `<table>/<base|tail>/col_<column>_page_<page_no>.page.json`.
    pub fn relative_path(&self) -> std::path::PathBuf {
        std::path::PathBuf::from(self.table.as_ref())
            .join(self.kind.dir_name())
            .join(format!("col_{}_page_{}.page.json", self.column, self.page_no))
    }
}

impl fmt::Display for PageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{}/col_{}_page_{}",
            self.table, self.kind, self.column, self.page_no
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relative_path() {
        let pid = PageId::new(Arc::from("grades"), 2, 7, PageKind::Tail);
        assert_eq!(
            pid.relative_path(),
            std::path::PathBuf::from("grades/tail/col_2_page_7.page.json")
        );
    }

    #[test]
    fn test_equality_and_hash() {
        let a = PageId::new(Arc::from("t"), 0, 0, PageKind::Base);
        let b = PageId::new(Arc::from("t"), 0, 0, PageKind::Base);
        assert_eq!(a, b);

        use std::collections::HashSet;
        let mut set = HashSet::new();
        set.insert(a);
        assert!(set.contains(&b));
    }

    #[test]
    fn test_display() {
        let pid = PageId::new(Arc::from("grades"), 1, 3, PageKind::Base);
        assert_eq!(format!("{}", pid), "grades/base/col_1_page_3");
    }
}
