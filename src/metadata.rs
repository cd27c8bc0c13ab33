//! Metadata store parsing and field resolution.
//!
//! The metadata store is a single JSON object keyed by image filename:
//!
//! ```json
//! {
//!   "001.jpg": {
//!     "title": "Cafetera",
//!     "tags": ["retro", "cocina"],
//!     "description": "Chapa litografiada",
//!     "images": ["001-detalle.jpg"]
//!   }
//! }
//! ```
//!
//! ## Resolution priority
//!
//! Every field of a record is optional and resolved independently when an
//! image is looked up. The first non-empty value wins:
//!
//! - **Title**: metadata `title` → filename with the extension stripped
//! - **Description**: metadata `description` → configured placeholder
//! - **Tags / related images**: metadata lists → empty
//!
//! ## Tolerance
//!
//! A record that does not deserialize (say `"tags": "retro"`) is skipped and
//! reported; the remaining records are kept. Only a root that is not a JSON
//! object rejects the whole document.

use serde::Deserialize;
use std::collections::BTreeMap;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MetadataError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("metadata root must be a JSON object keyed by filename")]
    NotAnObject,
}

/// One entry of the metadata store, as written by the site owner.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct MetadataRecord {
    pub title: Option<String>,
    pub tags: Vec<String>,
    pub description: Option<String>,
    /// Additional filenames shown after the primary image in the detail carousel.
    pub images: Vec<String>,
}

/// Metadata keyed by image filename.
pub type MetadataMap = BTreeMap<String, MetadataRecord>;

/// Result of parsing a metadata document.
#[derive(Debug, Default)]
pub struct ParsedMetadata {
    pub records: MetadataMap,
    /// `(key, reason)` for every entry that was dropped.
    pub skipped: Vec<(String, String)>,
}

/// Parse a metadata document, keeping every well-formed record.
pub fn parse_metadata(content: &str) -> Result<ParsedMetadata, MetadataError> {
    let root: serde_json::Value = serde_json::from_str(content)?;
    let serde_json::Value::Object(entries) = root else {
        return Err(MetadataError::NotAnObject);
    };

    let mut parsed = ParsedMetadata::default();
    for (key, value) in entries {
        match serde_json::from_value::<MetadataRecord>(value) {
            Ok(record) => {
                parsed.records.insert(key, record);
            }
            Err(e) => parsed.skipped.push((key, e.to_string())),
        }
    }
    Ok(parsed)
}

/// Resolve a metadata field from multiple sources.
///
/// Takes a list of optional values in priority order and returns the first
/// non-None, non-empty value.
///
/// ```text
/// title:       resolve(&[metadata_title, filename_title])
/// description: resolve(&[metadata_description, placeholder])
/// ```
pub fn resolve(sources: &[Option<&str>]) -> Option<String> {
    sources
        .iter()
        .filter_map(|opt| {
            opt.map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
        })
        .next()
}

/// Strip the final extension from a filename.
///
/// Only a trailing `.ext` with a non-empty extension is removed:
/// - `"001.jpg"` → `"001"`
/// - `"mate.v2.png"` → `"mate.v2"`
/// - `"sin-extension"` → `"sin-extension"`
/// - `"raro."` → `"raro."`
pub fn strip_extension(filename: &str) -> &str {
    match filename.rsplit_once('.') {
        Some((stem, ext)) if !ext.is_empty() && !ext.contains('/') => stem,
        _ => filename,
    }
}
