use crate::catalog::Asset;

/// Filters a collection snapshot down to its rejected assets, keeping order.
///
/// Null and invalid entries are skipped. An empty or absent collection is
/// not an error; it yields no candidates and a warning.
pub fn select_rejected(collection: Option<&[Option<Asset>]>) -> Vec<Asset> {
    let entries = match collection {
        Some(entries) if !entries.is_empty() => entries,
        _ => {
            log::warn!("No images in current collection");
            return Vec::new();
        }
    };

    let mut skipped = 0usize;
    let candidates: Vec<Asset> = entries
        .iter()
        .filter_map(|entry| match entry {
            Some(asset) if asset.is_valid() => Some(asset),
            _ => {
                skipped += 1;
                None
            }
        })
        .filter(|asset| asset.is_rejected())
        .cloned()
        .collect();

    if skipped > 0 {
        log::debug!("Skipped {} invalid collection entries", skipped);
    }

    candidates
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn asset(id: i64, filename: &str, rating: i32) -> Asset {
        Asset {
            id,
            directory: PathBuf::from("/photos"),
            filename: filename.to_string(),
            rating,
        }
    }

    #[test]
    fn test_selects_rejected_in_order() {
        let snapshot = vec![
            Some(asset(1, "a.jpg", -1)),
            Some(asset(2, "b.jpg", 3)),
            Some(asset(3, "c.jpg", -1)),
            Some(asset(4, "d.jpg", 0)),
        ];

        let ids: Vec<_> = select_rejected(Some(&snapshot)).iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn test_skips_null_and_invalid_entries() {
        let snapshot = vec![
            None,
            Some(asset(2, "", -1)),
            Some(asset(3, "c.jpg", -1)),
        ];

        let ids: Vec<_> = select_rejected(Some(&snapshot)).iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![3]);
    }

    #[test]
    fn test_empty_and_absent_collections() {
        assert!(select_rejected(None).is_empty());
        assert!(select_rejected(Some(&[])).is_empty());
    }
}
