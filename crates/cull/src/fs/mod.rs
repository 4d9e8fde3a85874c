//! Filesystem access used by the dry run and the deletion engine.
//!
//! Every operation is independently failable. Absence of a file is never an
//! error here: `exists` answers false and `size` answers zero.

pub mod sidecar;
pub mod size;

use std::io;
use std::path::Path;

pub use sidecar::{SidecarResolver, DEFAULT_SIDECAR_EXTENSIONS};
pub use size::probe_size;

pub trait Filesystem {
    fn exists(&self, path: &Path) -> bool;

    /// Byte length of `path`, or 0 when it cannot be opened.
    fn size(&self, path: &Path) -> u64;

    fn remove_file(&self, path: &Path) -> io::Result<()>;
}

/// [`Filesystem`] backed by `std::fs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFs;

impl Filesystem for LocalFs {
    fn exists(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn size(&self, path: &Path) -> u64 {
        probe_size(path)
    }

    fn remove_file(&self, path: &Path) -> io::Result<()> {
        std::fs::remove_file(path)
    }
}

impl<F: Filesystem + ?Sized> Filesystem for &F {
    fn exists(&self, path: &Path) -> bool {
        (**self).exists(path)
    }

    fn size(&self, path: &Path) -> u64 {
        (**self).size(path)
    }

    fn remove_file(&self, path: &Path) -> io::Result<()> {
        (**self).remove_file(path)
    }
}
