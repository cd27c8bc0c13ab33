//! Catalog snapshot: lookup, tag vocabulary, and filtering.
//!
//! A [`Catalog`] is built once per render from the image inventory and the
//! metadata store and never mutated afterwards. Everything here is a pure
//! derivation over that snapshot; the interactive part (which tags are
//! selected, what was searched, which item is open) lives in
//! [`crate::state::CatalogState`].
//!
//! ## Filtering
//!
//! ```text
//! inventory (filename order)
//!   └─ tag filter     image tags ⊇ selected tags        (skipped when none selected)
//!        └─ search    title or description contains q   (skipped when q is blank)
//!             └─ visible set, still in filename order
//! ```
//!
//! Tag matching is AND: every selected tag must be present on the image.
//! Search is a case-insensitive substring match on the query as typed;
//! surrounding whitespace only decides whether the query counts as blank.

use crate::metadata::{self, MetadataMap};
use std::collections::BTreeSet;

/// Fully resolved description of one inventory image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRecord {
    pub id: String,
    pub title: String,
    pub tags: Vec<String>,
    pub description: String,
    pub related_images: Vec<String>,
}

impl ImageRecord {
    /// Images shown in the detail carousel: the primary image, then related ones.
    pub fn carousel_sequence(&self) -> Vec<&str> {
        std::iter::once(self.id.as_str())
            .chain(self.related_images.iter().map(String::as_str))
            .collect()
    }

    pub fn carousel_len(&self) -> usize {
        1 + self.related_images.len()
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

/// Immutable inventory + metadata snapshot.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    inventory: Vec<String>,
    metadata: MetadataMap,
    placeholder_description: String,
}

impl Catalog {
    /// Build a snapshot. The inventory is sorted and deduplicated so the
    /// filename order holds regardless of how it was collected.
    pub fn new(
        mut inventory: Vec<String>,
        metadata: MetadataMap,
        placeholder_description: impl Into<String>,
    ) -> Self {
        inventory.sort();
        inventory.dedup();
        Self {
            inventory,
            metadata,
            placeholder_description: placeholder_description.into(),
        }
    }

    /// Inventory filenames in display order.
    pub fn inventory(&self) -> &[String] {
        &self.inventory
    }

    pub fn len(&self) -> usize {
        self.inventory.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inventory.is_empty()
    }

    /// Zero-based position of `id` in the inventory.
    pub fn position(&self, id: &str) -> Option<usize> {
        self.inventory.binary_search_by(|probe| probe.as_str().cmp(id)).ok()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.position(id).is_some()
    }

    /// Resolve the record for `id`. Never fails: unknown ids and missing
    /// fields fall back to defaults.
    pub fn lookup(&self, id: &str) -> ImageRecord {
        let entry = self.metadata.get(id);

        let title = metadata::resolve(&[
            entry.and_then(|e| e.title.as_deref()),
            Some(metadata::strip_extension(id)),
        ])
        .unwrap_or_else(|| id.to_string());

        let description = metadata::resolve(&[
            entry.and_then(|e| e.description.as_deref()),
            Some(self.placeholder_description.as_str()),
        ])
        .unwrap_or_default();

        let mut tags: Vec<String> = Vec::new();
        let mut related_images: Vec<String> = Vec::new();
        if let Some(entry) = entry {
            for tag in &entry.tags {
                if !tag.is_empty() && !tags.contains(tag) {
                    tags.push(tag.clone());
                }
            }
            related_images = entry.images.clone();
        }

        ImageRecord {
            id: id.to_string(),
            title,
            tags,
            description,
            related_images,
        }
    }

    /// Every tag used by an inventory image, deduplicated, ascending.
    ///
    /// Tags that only appear on metadata entries without a file are not part
    /// of the vocabulary. Empty tags are dropped.
    pub fn all_tags(&self) -> Vec<String> {
        self.inventory
            .iter()
            .filter_map(|id| self.metadata.get(id))
            .flat_map(|entry| entry.tags.iter().cloned())
            .filter(|tag| !tag.is_empty())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Inventory ids passing both filters, in inventory order.
    pub fn filter(&self, selected_tags: &[String], search_text: &str) -> Vec<&str> {
        let searching = !search_text.trim().is_empty();
        let query = search_text.to_lowercase();

        self.inventory
            .iter()
            .filter(|id| {
                if selected_tags.is_empty() && !searching {
                    return true;
                }
                let record = self.lookup(id);
                let tags_match = selected_tags.iter().all(|tag| record.has_tag(tag));
                let search_match = !searching
                    || record.title.to_lowercase().contains(&query)
                    || record.description.to_lowercase().contains(&query);
                tags_match && search_match
            })
            .map(String::as_str)
            .collect()
    }

    /// Metadata keys with no matching inventory file. They are never shown.
    pub fn orphaned_metadata(&self) -> Vec<&str> {
        self.metadata
            .keys()
            .filter(|key| !self.contains(key))
            .map(String::as_str)
            .collect()
    }

    /// Length of the carousel sequence for `id` (at least 1).
    pub fn carousel_len(&self, id: &str) -> usize {
        self.metadata
            .get(id)
            .map(|entry| 1 + entry.images.len())
            .unwrap_or(1)
    }

    /// Image a grid card shows: the first related image while hovered, when
    /// the item has one, otherwise the primary image.
    pub fn card_image<'a>(&'a self, id: &'a str, hovered: bool) -> &'a str {
        if hovered {
            if let Some(alt) = self.metadata.get(id).and_then(|e| e.images.first()) {
                return alt;
            }
        }
        id
    }

    /// Item number shown on cards and in the contact message (`#007`).
    pub fn display_number(&self, id: &str) -> Option<String> {
        self.position(id).map(format_display_number)
    }
}

/// Format a zero-based inventory position as a 1-based, 3-digit item number.
pub fn format_display_number(position: usize) -> String {
    format!("#{:0>3}", position + 1)
}

/// Number of entries in the tag palette (`.tag-color-0` … `.tag-color-9`).
pub const TAG_PALETTE_SIZE: usize = 10;

/// Palette slot for a tag. Cosmetic only; stable for a given tag string.
pub fn tag_color(tag: &str) -> usize {
    let sum: u32 = tag.chars().map(u32::from).fold(0, u32::wrapping_add);
    sum as usize % TAG_PALETTE_SIZE
}

/// Result counter shown above the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultCount {
    All(usize),
    Filtered { shown: usize, total: usize },
}

impl ResultCount {
    pub fn new(shown: usize, total: usize) -> Self {
        if shown == total {
            Self::All(total)
        } else {
            Self::Filtered { shown, total }
        }
    }

    /// Counter text, e.g. "Mostrando 3 de 12 apas".
    pub fn label(&self, item_label: &str) -> String {
        match self {
            Self::All(total) => format!("Mostrando todas las {item_label} ({total})"),
            Self::Filtered { shown, total } => {
                format!("Mostrando {shown} de {total} {item_label}")
            }
        }
    }
}
