//! Asset collection and record store.
//!
//! The cleanup core only sees the two narrow traits defined here. The SQLite
//! catalog in [`sqlite`] is the host adapter shipped with the CLI.

pub mod import;
pub mod schema;
pub mod sqlite;

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub use import::{import_directory, ImportOptions, ImportStats, DEFAULT_IMPORT_PATTERNS};
pub use sqlite::SqliteCatalog;

/// Rating the host assigns to an image the operator rejected.
pub const REJECTED_RATING: i32 = -1;

/// One entry of a collection snapshot. `None` marks an entry the host could
/// not materialise.
pub type Snapshot = Vec<Option<Asset>>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Asset {
    pub id: i64,
    pub directory: PathBuf,
    pub filename: String,
    pub rating: i32,
}

impl Asset {
    pub fn path(&self) -> PathBuf {
        self.directory.join(&self.filename)
    }

    pub fn is_rejected(&self) -> bool {
        self.rating == REJECTED_RATING
    }

    pub fn is_valid(&self) -> bool {
        !self.filename.is_empty() && !self.directory.as_os_str().is_empty()
    }
}

/// Read-only view of the host's current collection.
pub trait AssetSource {
    /// `Ok(None)` when no collection is active.
    fn snapshot(&self) -> Result<Option<Snapshot>>;
}

/// Removal of an asset's record from the host's datastore.
pub trait RecordStore {
    fn remove_asset(&mut self, asset: &Asset) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn asset(directory: &str, filename: &str, rating: i32) -> Asset {
        Asset {
            id: 1,
            directory: PathBuf::from(directory),
            filename: filename.to_string(),
            rating,
        }
    }

    #[test]
    fn test_path_joins_directory_and_filename() {
        assert_eq!(
            asset("/photos/2024", "IMG_0001.CR2", 0).path(),
            PathBuf::from("/photos/2024/IMG_0001.CR2")
        );
    }

    #[test]
    fn test_rejection_is_exact_sentinel() {
        assert!(asset("/p", "a.jpg", -1).is_rejected());
        assert!(!asset("/p", "a.jpg", 0).is_rejected());
        assert!(!asset("/p", "a.jpg", -2).is_rejected());
        assert!(!asset("/p", "a.jpg", 5).is_rejected());
    }

    #[test]
    fn test_validity() {
        assert!(asset("/p", "a.jpg", 0).is_valid());
        assert!(!asset("/p", "", 0).is_valid());
        assert!(!asset("", "a.jpg", 0).is_valid());
    }
}
