#![allow(dead_code)]

use cull_lib::{
    Asset, AssetSource, AuditLog, Cleaner, CullError, RecordStore, Result, SidecarResolver,
    SqliteCatalog,
};
use cull_lib::catalog::Snapshot;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Length of the `[YYYY-MM-DD HH:MM:SS] ` prefix on every audit line.
pub const TIMESTAMP_PREFIX_LEN: usize = 22;

pub struct TestFixture {
    pub temp_dir: TempDir,
    pub photos: PathBuf,
    pub catalog: FlakyCatalog,
    pub cleaner: Cleaner,
}

impl TestFixture {
    pub fn new() -> Result<Self> {
        let temp_dir = tempfile::tempdir()?;
        let photos = temp_dir.path().join("photos");
        fs::create_dir_all(&photos)?;

        let mut catalog = SqliteCatalog::open(temp_dir.path().join("cull.db"))?;
        catalog.initialize()?;

        let cleaner = Cleaner::new(
            SidecarResolver::new([".xmp", ".dop", ".pp3"]),
            AuditLog::new(temp_dir.path().join("audit.log")),
        );

        Ok(Self {
            temp_dir,
            photos,
            catalog: FlakyCatalog::new(catalog),
            cleaner,
        })
    }

    /// Writes an image of `bytes` bytes and catalogues it with `rating`.
    pub fn add_image(&mut self, name: &str, bytes: usize, rating: i32) -> Result<Asset> {
        fs::write(self.photos.join(name), vec![0u8; bytes])?;
        self.catalog_only(name, rating)
    }

    /// Catalogues an image without creating its file.
    pub fn catalog_only(&mut self, name: &str, rating: i32) -> Result<Asset> {
        self.catalog.inner.add_asset(&self.photos, name, rating)?;
        self.catalog
            .inner
            .find_by_path(&self.photos.join(name))?
            .ok_or_else(|| CullError::AssetNotFound(self.photos.join(name)))
    }

    pub fn add_sidecar(&self, name: &str, bytes: usize) -> PathBuf {
        let path = self.photos.join(name);
        fs::write(&path, vec![0u8; bytes]).unwrap();
        path
    }

    pub fn photo(&self, name: &str) -> PathBuf {
        self.photos.join(name)
    }

    pub fn photo_files(&self) -> Vec<PathBuf> {
        list_files(&self.photos)
    }

    /// Audit log lines without their timestamp prefix.
    pub fn audit_messages(&self) -> Vec<String> {
        self.cleaner
            .audit_log()
            .read_lines()
            .unwrap()
            .into_iter()
            .map(|line| line[TIMESTAMP_PREFIX_LEN..].to_string())
            .collect()
    }
}

pub fn list_files(dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<_> = fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().path())
        .collect();
    files.sort();
    files
}

/// SQLite catalog whose record removal fails for chosen asset ids.
pub struct FlakyCatalog {
    pub inner: SqliteCatalog,
    pub fail_ids: HashSet<i64>,
    pub removal_calls: Vec<i64>,
}

impl FlakyCatalog {
    pub fn new(inner: SqliteCatalog) -> Self {
        Self {
            inner,
            fail_ids: HashSet::new(),
            removal_calls: Vec::new(),
        }
    }
}

impl AssetSource for FlakyCatalog {
    fn snapshot(&self) -> Result<Option<Snapshot>> {
        self.inner.snapshot()
    }
}

impl RecordStore for FlakyCatalog {
    fn remove_asset(&mut self, asset: &Asset) -> Result<()> {
        self.removal_calls.push(asset.id);
        if self.fail_ids.contains(&asset.id) {
            return Err(CullError::RecordRemoval {
                path: asset.path(),
                reason: "database is locked".to_string(),
            });
        }
        self.inner.remove_asset(asset)
    }
}
