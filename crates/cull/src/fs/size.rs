use std::fs::File;
use std::io::{Seek, SeekFrom};
use std::path::Path;

/// Returns the length of the file at `path` by seeking to its end.
///
/// Missing or unreadable files measure as zero; this never fails.
pub fn probe_size(path: &Path) -> u64 {
    let mut file = match File::open(path) {
        Ok(f) => f,
        Err(e) => {
            log::debug!("Cannot open {} for size probe: {}", path.display(), e);
            return 0;
        }
    };

    if !file.metadata().map(|m| m.is_file()).unwrap_or(false) {
        return 0;
    }

    file.seek(SeekFrom::End(0)).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_probe_existing_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("img.raw");
        fs::write(&path, vec![0u8; 4096]).unwrap();

        assert_eq!(probe_size(&path), 4096);
    }

    #[test]
    fn test_probe_empty_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("empty.jpg");
        fs::write(&path, b"").unwrap();

        assert_eq!(probe_size(&path), 0);
    }

    #[test]
    fn test_probe_missing_file_is_zero() {
        let temp_dir = TempDir::new().unwrap();
        assert_eq!(probe_size(&temp_dir.path().join("gone.raw")), 0);
    }

    #[test]
    fn test_probe_directory_is_zero() {
        let temp_dir = TempDir::new().unwrap();
        assert_eq!(probe_size(temp_dir.path()), 0);
    }
}
