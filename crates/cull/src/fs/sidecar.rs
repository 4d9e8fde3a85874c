use super::Filesystem;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Companion extensions checked for every primary, in report order.
pub const DEFAULT_SIDECAR_EXTENSIONS: &[&str] = &[".xmp", ".dop", ".pp3", ".on1", ".cos"];

/// Finds the sidecar files that currently exist next to a primary file.
///
/// A sidecar shares the primary's path with its last extension replaced, so
/// `IMG_0042.CR2` pairs with `IMG_0042.xmp`, and `pano.v2.tif` with
/// `pano.v2.xmp`. Results are never cached: sidecars can appear or vanish
/// between a dry run and a deletion.
#[derive(Debug, Clone)]
pub struct SidecarResolver {
    extensions: Vec<String>,
}

impl Default for SidecarResolver {
    fn default() -> Self {
        Self::new(DEFAULT_SIDECAR_EXTENSIONS.iter().map(|e| e.to_string()))
    }
}

impl SidecarResolver {
    /// Extensions may be given with or without the leading dot.
    pub fn new<I, S>(extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let extensions = extensions
            .into_iter()
            .map(Into::into)
            .filter(|e| !e.trim_start_matches('.').is_empty())
            .map(|e| {
                if e.starts_with('.') {
                    e
                } else {
                    format!(".{}", e)
                }
            })
            .collect();

        Self { extensions }
    }

    pub fn extensions(&self) -> &[String] {
        &self.extensions
    }

    /// True when `path` carries one of the recognised sidecar extensions.
    pub fn is_sidecar(&self, path: &Path) -> bool {
        path.extension()
            .map(|ext| {
                let ext = ext.to_string_lossy();
                self.extensions
                    .iter()
                    .any(|known| known[1..].eq_ignore_ascii_case(&ext))
            })
            .unwrap_or(false)
    }

    /// Every existing sidecar of `primary`, in configured extension order.
    pub fn sidecars<F: Filesystem + ?Sized>(&self, fs: &F, primary: &Path) -> Vec<PathBuf> {
        let base = base_path(primary);

        self.extensions
            .iter()
            .map(|ext| {
                let mut candidate = base.clone();
                candidate.push(ext);
                PathBuf::from(candidate)
            })
            .filter(|candidate| candidate.as_path() != primary && fs.exists(candidate))
            .collect()
    }
}

/// `primary` with its last extension stripped. Paths without an extension
/// are returned whole, and a leading dot never starts one, so `.hidden`
/// pairs with `.hidden.xmp`.
fn base_path(primary: &Path) -> OsString {
    match primary.extension() {
        Some(_) => primary.with_extension("").into_os_string(),
        None => primary.as_os_str().to_os_string(),
    }
}
