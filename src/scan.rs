//! Snapshot loading: image inventory and metadata store.
//!
//! Reads the two data sources the catalog is built from and combines them
//! into a [`Catalog`]. Both are read fresh on every call; nothing is cached.
//!
//! ## Directory Structure
//!
//! ```text
//! site/
//! ├── config.toml
//! └── public/                      # site.public_dir
//!     ├── catalog-config.json      # catalog.metadata_file
//!     └── cuadros/                 # catalog.images_dir
//!         ├── 001.jpg
//!         ├── 001-detalle.jpg      # listed, and usable as a related image
//!         ├── 002.PNG              # extension match is case-insensitive
//!         ├── .DS_Store            # hidden, skipped
//!         └── notas.txt            # not an image, skipped
//! ```
//!
//! ## Degradation
//!
//! A site with missing or broken data still renders:
//!
//! - Missing image directory → empty inventory
//! - Missing, unreadable, or malformed metadata file → empty metadata
//! - Malformed metadata entry → that entry is dropped
//!
//! Each case is logged with `tracing::warn!`. Only an image directory that
//! exists but cannot be listed is an error.

use crate::catalog::Catalog;
use crate::config::SiteConfig;
use crate::metadata::{self, MetadataMap};
use std::fs;
use std::io;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp"];

/// List image filenames in `dir`, ascending.
pub fn scan_inventory(dir: &Path) -> Result<Vec<String>, ScanError> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            warn!(dir = %dir.display(), "image directory not found, catalog is empty");
            return Ok(Vec::new());
        }
        Err(e) => return Err(e.into()),
    };

    let mut inventory: Vec<String> = entries
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| is_image(p))
        .filter_map(|p| p.file_name().map(|n| n.to_string_lossy().into_owned()))
        .filter(|name| !name.starts_with('.'))
        .collect();

    inventory.sort();
    debug!(dir = %dir.display(), count = inventory.len(), "scanned inventory");
    Ok(inventory)
}

fn is_image(path: &Path) -> bool {
    if !path.is_file() {
        return false;
    }
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();
    IMAGE_EXTENSIONS.contains(&ext.as_str())
}

/// Read the metadata store, degrading to an empty map on any failure.
pub fn load_metadata(path: &Path) -> MetadataMap {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "metadata file unavailable, using defaults");
            return MetadataMap::new();
        }
    };

    match metadata::parse_metadata(&content) {
        Ok(parsed) => {
            for (key, reason) in &parsed.skipped {
                warn!(path = %path.display(), entry = %key, %reason, "skipping malformed metadata entry");
            }
            parsed.records
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "metadata file malformed, using defaults");
            MetadataMap::new()
        }
    }
}

/// Build a fresh catalog snapshot for the site at `root`.
pub fn load_catalog(root: &Path, config: &SiteConfig) -> Result<Catalog, ScanError> {
    let inventory = scan_inventory(&config.images_dir(root))?;
    let metadata = load_metadata(&config.metadata_path(root));
    Ok(Catalog::new(
        inventory,
        metadata,
        config.catalog.placeholder_description.clone(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::*;
    use tempfile::TempDir;

    // =========================================================================
    // scan_inventory() tests
    // =========================================================================

    #[test]
    fn inventory_lists_images_sorted() {
        let tmp = TempDir::new().unwrap();
        for name in ["010.jpg", "002.webp", "001.png"] {
            fs::write(tmp.path().join(name), "fake image").unwrap();
        }
        assert_eq!(
            scan_inventory(tmp.path()).unwrap(),
            vec!["001.png", "002.webp", "010.jpg"]
        );
    }

    #[test]
    fn inventory_extension_match_is_case_insensitive() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("A.JPG"), "x").unwrap();
        fs::write(tmp.path().join("b.JpEg"), "x").unwrap();
        assert_eq!(scan_inventory(tmp.path()).unwrap(), vec!["A.JPG", "b.JpEg"]);
    }

    #[test]
    fn inventory_skips_non_images_hidden_files_and_dirs() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("001.jpg"), "x").unwrap();
        fs::write(tmp.path().join("notas.txt"), "x").unwrap();
        fs::write(tmp.path().join(".oculta.jpg"), "x").unwrap();
        fs::write(tmp.path().join("sin-extension"), "x").unwrap();
        fs::create_dir(tmp.path().join("carpeta.jpg")).unwrap();
        assert_eq!(scan_inventory(tmp.path()).unwrap(), vec!["001.jpg"]);
    }

    #[test]
    fn inventory_missing_directory_is_empty() {
        let tmp = TempDir::new().unwrap();
        let inventory = scan_inventory(&tmp.path().join("no-existe")).unwrap();
        assert!(inventory.is_empty());
    }

    #[test]
    fn inventory_path_that_is_a_file_is_error() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("cuadros");
        fs::write(&file, "x").unwrap();
        assert!(matches!(scan_inventory(&file), Err(ScanError::Io(_))));
    }

    // =========================================================================
    // load_metadata() tests
    // =========================================================================

    #[test]
    fn metadata_missing_file_is_empty() {
        let tmp = TempDir::new().unwrap();
        assert!(load_metadata(&tmp.path().join("catalog-config.json")).is_empty());
    }

    #[test]
    fn metadata_invalid_json_is_empty() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("catalog-config.json");
        fs::write(&path, "{ \"001.jpg\": ").unwrap();
        assert!(load_metadata(&path).is_empty());
    }

    #[test]
    fn metadata_non_object_root_is_empty() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("catalog-config.json");
        fs::write(&path, "[1, 2, 3]").unwrap();
        assert!(load_metadata(&path).is_empty());
    }

    #[test]
    fn metadata_keeps_valid_entries_next_to_malformed_ones() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("catalog-config.json");
        fs::write(
            &path,
            r#"{"001.jpg": {"tags": ["retro"]}, "002.jpg": {"images": "no-es-lista"}}"#,
        )
        .unwrap();
        let map = load_metadata(&path);
        assert_eq!(map.len(), 1);
        assert_eq!(map["001.jpg"].tags, vec!["retro"]);
    }

    // =========================================================================
    // load_catalog() tests
    // =========================================================================

    #[test]
    fn load_catalog_from_fixtures() {
        let tmp = setup_fixtures();
        let config = crate::config::load_config(tmp.path()).unwrap();
        let catalog = load_catalog(tmp.path(), &config).unwrap();

        assert_eq!(
            catalog.inventory(),
            ["001-detalle.jpg", "001.jpg", "002.png", "003.webp", "004.jpg"]
        );
        assert_eq!(catalog.lookup("001.jpg").title, "Cafetera Siam");
        assert_eq!(
            catalog.lookup("001.jpg").related_images,
            vec!["001-detalle.jpg"]
        );
        assert_eq!(catalog.all_tags(), vec!["autos", "bold", "cocina", "retro"]);
    }

    #[test]
    fn load_catalog_uses_configured_placeholder() {
        let tmp = setup_fixtures();
        let config = crate::config::load_config(tmp.path()).unwrap();
        let catalog = load_catalog(tmp.path(), &config).unwrap();
        assert_eq!(catalog.lookup("004.jpg").description, "Pieza única de prueba");
    }

    #[test]
    fn load_catalog_empty_site() {
        let tmp = TempDir::new().unwrap();
        let catalog = load_catalog(tmp.path(), &SiteConfig::default()).unwrap();
        assert!(catalog.is_empty());
        assert!(catalog.all_tags().is_empty());
    }
}
