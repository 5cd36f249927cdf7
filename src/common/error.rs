//! Error taxonomy for lstore.

use thiserror::Error;

/// Convenient Result type alias.
pub type Result<T> = std::result::Result<T, Error>;

/// All possible errors raised by lstore.
///
/// `NotFound`, `DuplicateKey`, and `InvalidUpdate` are ordinary failure
/// returns that leave engine state unchanged. `Io` and
/// `BufferPoolExhausted` abort the in-flight operation. `CorruptPage` is
/// only ever raised during recovery and is caught there rather than
/// propagated to `Database::open`'s caller (see `table::recovery`).
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error from disk operations.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Page or metadata JSON failed to parse or failed structural checks.
    #[error("corrupt page: {0}")]
    CorruptPage(String),

    /// (De)serialization of a page or the catalog failed.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Requested page does not exist on disk.
    #[error("page not found: {0}")]
    PageNotFound(String),

    /// Buffer pool has no free frame and cannot evict any page (all pinned).
    #[error("buffer pool exhausted: no unpinned frame available")]
    BufferPoolExhausted,

    /// Insert violates primary-key uniqueness.
    #[error("duplicate key: {0}")]
    DuplicateKey(i64),

    /// Select/update/delete resolved to an absent or tombstoned key.
    #[error("key not found: {0}")]
    NotFound(i64),

    /// Attempted to change the value of the key column via `update`.
    #[error("update may not modify the key column")]
    InvalidUpdate,

    /// Requested table does not exist in the database.
    #[error("no such table: {0}")]
    NoSuchTable(String),

    /// A table with this name already exists.
    #[error("table already exists: {0}")]
    TableExists(String),

    /// Indirection-chain walk exceeded the defense-in-depth bound without
    /// reaching the base record (spec.md §9, "cyclic-looking indirection").
    #[error("indirection chain for rid {0} did not terminate at its base")]
    IndirectionCycle(i64),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::NotFound(42);
        assert_eq!(format!("{}", err), "key not found: 42");

        let err = Error::BufferPoolExhausted;
        assert_eq!(
            format!("{}", err),
            "buffer pool exhausted: no unpinned frame available"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        matches!(err, Error::Io(_));
    }

    #[test]
    fn test_result_type_alias() {
        fn might_fail() -> Result<u32> {
            Ok(42)
        }
        assert_eq!(might_fail().unwrap(), 42);
    }
}
