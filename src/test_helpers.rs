//! Shared test utilities for the apas test suite.
//!
//! Builds catalogs from literal data so engine and rendering tests do not
//! touch the filesystem, and copies the fixture site for the ones that do.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let catalog = catalog_from(&["001.jpg", "002.jpg"], r#"{"001.jpg": {"tags": ["retro"]}}"#);
//! assert_eq!(catalog.filter(&tags(&["retro"]), ""), vec!["001.jpg"]);
//!
//! let tmp = setup_fixtures();
//! let config = load_config(tmp.path()).unwrap();
//! ```

use std::path::Path;
use tempfile::TempDir;

use crate::catalog::Catalog;
use crate::metadata::parse_metadata;

/// Placeholder description used by [`catalog_from`], same as the stock config.
pub const PLACEHOLDER: &str = "Obra original única";

// =========================================================================
// Fixture setup
// =========================================================================

/// Copy `fixtures/site/` to a temp directory and return it.
///
/// Tests get an isolated copy they can mutate without affecting other tests
/// or the source fixtures.
pub fn setup_fixtures() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/site");
    copy_dir_recursive(&fixtures, tmp.path()).unwrap();
    tmp
}

fn copy_dir_recursive(src: &Path, dst: &Path) -> std::io::Result<()> {
    for entry in std::fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            std::fs::create_dir_all(&dst_path)?;
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            std::fs::copy(&src_path, &dst_path)?;
        }
    }
    Ok(())
}

// =========================================================================
// Catalog builders
// =========================================================================

/// Catalog from an inventory and a metadata JSON document. Panics on
/// malformed JSON so broken test data fails loudly.
pub fn catalog_from(inventory: &[&str], metadata_json: &str) -> Catalog {
    let parsed = parse_metadata(metadata_json)
        .unwrap_or_else(|e| panic!("test metadata does not parse: {e}"));
    Catalog::new(
        inventory.iter().map(|s| s.to_string()).collect(),
        parsed.records,
        PLACEHOLDER,
    )
}

/// The three-image catalog used by the filter/search walkthrough.
///
/// ```text
/// 001.jpg  tags [retro]         "Chapa clásica"
/// 002.jpg  tags [retro, bold]   "Letras bold sobre fondo rojo"
/// 003.jpg  (no metadata)
/// ```
pub fn scenario_catalog() -> Catalog {
    catalog_from(
        &["001.jpg", "002.jpg", "003.jpg"],
        r#"{
            "001.jpg": {"tags": ["retro"], "description": "Chapa clásica"},
            "002.jpg": {"tags": ["retro", "bold"], "description": "Letras bold sobre fondo rojo"}
        }"#,
    )
}

/// Owned tag list from literals.
pub fn tags(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

// =========================================================================
// Query helpers
// =========================================================================

/// Split and percent-decode a query string the way the server's extractor
/// does. `+` is treated as a space.
pub fn parse_query(query: &str) -> Vec<(String, String)> {
    query
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            (decode(key), decode(value))
        })
        .collect()
}

fn decode(raw: &str) -> String {
    percent_encoding::percent_decode_str(&raw.replace('+', " "))
        .decode_utf8()
        .unwrap()
        .into_owned()
}
