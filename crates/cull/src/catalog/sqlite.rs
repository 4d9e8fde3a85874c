use super::{schema, Asset, AssetSource, RecordStore, Snapshot, REJECTED_RATING};
use crate::error::{CullError, Result};
use rusqlite::{Connection, OptionalExtension};
use std::path::{Path, PathBuf};

/// Asset catalog stored in SQLite.
///
/// A catalog may be scoped to a folder, in which case its snapshot only
/// contains assets at or below that folder.
pub struct SqliteCatalog {
    conn: Connection,
    folder: Option<PathBuf>,
}

impl SqliteCatalog {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = Connection::open(path)?;
        Ok(Self { conn, folder: None })
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Ok(Self { conn, folder: None })
    }

    pub fn initialize(&mut self) -> Result<()> {
        schema::initialize_schema(&self.conn)
    }

    pub fn with_folder(mut self, folder: Option<PathBuf>) -> Self {
        self.folder = folder;
        self
    }

    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Registers a file. Returns `None` if it was already catalogued.
    pub fn add_asset(&mut self, directory: &Path, filename: &str, rating: i32) -> Result<Option<i64>> {
        let inserted = self.conn.execute(
            "INSERT OR IGNORE INTO assets (directory, filename, rating) VALUES (?1, ?2, ?3)",
            (directory.to_string_lossy().into_owned(), filename, rating),
        )?;

        if inserted == 0 {
            return Ok(None);
        }
        Ok(Some(self.conn.last_insert_rowid()))
    }

    pub fn find_by_path(&self, path: &Path) -> Result<Option<Asset>> {
        let (directory, filename) = split_path(path)?;

        let asset = self
            .conn
            .query_row(
                "SELECT id, directory, filename, rating FROM assets
                 WHERE directory = ?1 AND filename = ?2",
                (directory.to_string_lossy().into_owned(), &filename),
                |row| {
                    Ok(Asset {
                        id: row.get(0)?,
                        directory: PathBuf::from(row.get::<_, String>(1)?),
                        filename: row.get(2)?,
                        rating: row.get(3)?,
                    })
                },
            )
            .optional()?;

        Ok(asset)
    }

    pub fn set_rating(&mut self, path: &Path, rating: i32) -> Result<()> {
        let (directory, filename) = split_path(path)?;

        let updated = self.conn.execute(
            "UPDATE assets SET rating = ?1 WHERE directory = ?2 AND filename = ?3",
            (rating, directory.to_string_lossy().into_owned(), &filename),
        )?;

        if updated == 0 {
            return Err(CullError::AssetNotFound(path.to_path_buf()));
        }
        Ok(())
    }

    pub fn reject(&mut self, path: &Path) -> Result<()> {
        self.set_rating(path, REJECTED_RATING)
    }

    /// Valid assets in catalog order, optionally only the rejected ones.
    pub fn list_assets(&self, rejected_only: bool) -> Result<Vec<Asset>> {
        let assets = self
            .query_snapshot()?
            .into_iter()
            .flatten()
            .filter(|a| !rejected_only || a.is_rejected())
            .collect();
        Ok(assets)
    }

    fn query_snapshot(&self) -> Result<Snapshot> {
        let map_row = |row: &rusqlite::Row| -> rusqlite::Result<Option<Asset>> {
            let directory: Option<String> = row.get(1)?;
            let filename: Option<String> = row.get(2)?;
            Ok(match (directory, filename) {
                (Some(directory), Some(filename)) => Some(Asset {
                    id: row.get(0)?,
                    directory: PathBuf::from(directory),
                    filename,
                    rating: row.get(3)?,
                }),
                _ => None,
            })
        };

        let snapshot = match &self.folder {
            Some(folder) => {
                let folder = folder.to_string_lossy();
                let folder = folder.trim_end_matches('/');
                let mut stmt = self.conn.prepare(
                    "SELECT id, directory, filename, rating FROM assets
                     WHERE directory = ?1 OR substr(directory, 1, length(?1) + 1) = ?1 || '/'
                     ORDER BY id",
                )?;
                let rows = stmt
                    .query_map([folder], map_row)?
                    .collect::<std::result::Result<Vec<_>, _>>()?;
                rows
            }
            None => {
                let mut stmt = self.conn.prepare(
                    "SELECT id, directory, filename, rating FROM assets ORDER BY id",
                )?;
                let rows = stmt
                    .query_map([], map_row)?
                    .collect::<std::result::Result<Vec<_>, _>>()?;
                rows
            }
        };

        Ok(snapshot)
    }
}

impl AssetSource for SqliteCatalog {
    fn snapshot(&self) -> Result<Option<Snapshot>> {
        self.query_snapshot().map(Some)
    }
}

impl RecordStore for SqliteCatalog {
    fn remove_asset(&mut self, asset: &Asset) -> Result<()> {
        let removed = self
            .conn
            .execute("DELETE FROM assets WHERE id = ?1", [asset.id])?;

        if removed == 0 {
            return Err(CullError::AssetNotFound(asset.path()));
        }
        Ok(())
    }
}

fn split_path(path: &Path) -> Result<(PathBuf, String)> {
    let filename = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .ok_or_else(|| CullError::Config(format!("Not a file path: {}", path.display())))?;
    let directory = path.parent().map(Path::to_path_buf).unwrap_or_default();
    Ok((directory, filename))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_catalog() -> SqliteCatalog {
        let mut catalog = SqliteCatalog::open_in_memory().unwrap();
        catalog.initialize().unwrap();
        catalog
    }

    #[test]
    fn test_add_and_find_asset() {
        let mut catalog = create_test_catalog();
        let id = catalog
            .add_asset(Path::new("/photos/trip"), "IMG_0001.CR2", 0)
            .unwrap();
        assert!(id.is_some());

        let asset = catalog
            .find_by_path(Path::new("/photos/trip/IMG_0001.CR2"))
            .unwrap()
            .unwrap();
        assert_eq!(asset.filename, "IMG_0001.CR2");
        assert_eq!(asset.rating, 0);
    }

    #[test]
    fn test_duplicate_add_is_ignored() {
        let mut catalog = create_test_catalog();
        catalog.add_asset(Path::new("/p"), "a.jpg", 0).unwrap();
        let second = catalog.add_asset(Path::new("/p"), "a.jpg", 3).unwrap();

        assert!(second.is_none());
        assert_eq!(catalog.list_assets(false).unwrap().len(), 1);
    }

    #[test]
    fn test_reject_and_list() {
        let mut catalog = create_test_catalog();
        catalog.add_asset(Path::new("/p"), "a.jpg", 0).unwrap();
        catalog.add_asset(Path::new("/p"), "b.jpg", 0).unwrap();
        catalog.reject(Path::new("/p/b.jpg")).unwrap();

        let rejected = catalog.list_assets(true).unwrap();
        assert_eq!(rejected.len(), 1);
        assert_eq!(rejected[0].filename, "b.jpg");
    }

    #[test]
    fn test_set_rating_unknown_asset() {
        let mut catalog = create_test_catalog();
        let result = catalog.set_rating(Path::new("/p/missing.jpg"), 2);
        assert!(matches!(result, Err(CullError::AssetNotFound(_))));
    }

    #[test]
    fn test_null_rows_surface_as_invalid_entries() {
        let catalog = create_test_catalog();
        catalog
            .conn()
            .execute(
                "INSERT INTO assets (directory, filename, rating) VALUES (NULL, 'x.jpg', -1)",
                [],
            )
            .unwrap();

        let snapshot = catalog.snapshot().unwrap().unwrap();
        assert_eq!(snapshot, vec![None]);
    }

    #[test]
    fn test_folder_scope() {
        let mut catalog = create_test_catalog();
        catalog.add_asset(Path::new("/photos/2024"), "a.jpg", 0).unwrap();
        catalog.add_asset(Path::new("/photos/2024/day2"), "b.jpg", 0).unwrap();
        catalog.add_asset(Path::new("/photos/2024-old"), "c.jpg", 0).unwrap();

        let catalog = catalog.with_folder(Some(PathBuf::from("/photos/2024/")));
        let names: Vec<_> = catalog
            .list_assets(false)
            .unwrap()
            .into_iter()
            .map(|a| a.filename)
            .collect();

        assert_eq!(names, vec!["a.jpg", "b.jpg"]);
    }

    #[test]
    fn test_remove_asset() {
        let mut catalog = create_test_catalog();
        let id = catalog.add_asset(Path::new("/p"), "a.jpg", -1).unwrap().unwrap();
        let asset = catalog.find_by_path(Path::new("/p/a.jpg")).unwrap().unwrap();
        assert_eq!(asset.id, id);

        catalog.remove_asset(&asset).unwrap();
        assert!(catalog.find_by_path(Path::new("/p/a.jpg")).unwrap().is_none());

        let again = catalog.remove_asset(&asset);
        assert!(matches!(again, Err(CullError::AssetNotFound(_))));
    }
}
