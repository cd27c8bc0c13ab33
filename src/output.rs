//! CLI output formatting for the `check` and `build` commands.
//!
//! # Information-First Display
//!
//! Every catalog item is listed by its display number and resolved title,
//! which is what a visitor sees on the card. The source filename and the
//! fields that came from metadata follow as indented context lines, so the
//! output doubles as a content inventory.
//!
//! # Output Format
//!
//! ## Check
//!
//! ```text
//! Catalog (3 items)
//! #001 Cafetera Siam
//!     Source: cuadros/001.jpg
//!     Tags: retro, cocina
//!     Related: 001-detalle.jpg
//!     Description: Chapa litografiada de cafetera
//! #002 002
//!     Source: cuadros/002.png
//!     Description: (placeholder)
//!
//! Tags
//!     cocina (1)
//!     retro (1)
//!
//! Metadata
//!     catalog-config.json
//!     Unused: 999.jpg
//! ```
//!
//! ## Build
//!
//! ```text
//! Generated index.html → dist/index.html
//! Copied 9 assets
//! Built 3 items, 2 tags → dist
//! ```
//!
//! # Architecture
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure: no I/O, no side effects.

use crate::catalog::Catalog;
use crate::config::SiteConfig;
use crate::generate::BuildReport;

const DESCRIPTION_WIDTH: usize = 60;

// ============================================================================
// Shared display helpers
// ============================================================================

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Truncate text to `max` characters, appending `...` if truncated.
fn truncate_desc(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let head: String = text.chars().take(max).collect();
        format!("{head}...")
    }
}

fn plural(count: usize, one: &str, many: &str) -> String {
    if count == 1 {
        format!("{count} {one}")
    } else {
        format!("{count} {many}")
    }
}

// ============================================================================
// Check
// ============================================================================

pub fn format_check_output(catalog: &Catalog, config: &SiteConfig) -> Vec<String> {
    let mut lines = Vec::new();
    let images_dir = config.catalog.images_dir.trim_matches('/');

    lines.push(format!("Catalog ({})", plural(catalog.len(), "item", "items")));
    if catalog.is_empty() {
        lines.push(format!("{}(no images in {images_dir}/)", indent(1)));
    }

    for id in catalog.inventory() {
        let record = catalog.lookup(id);
        let number = catalog.display_number(id).unwrap_or_default();
        lines.push(format!("{number} {}", record.title));
        lines.push(format!("{}Source: {images_dir}/{id}", indent(1)));
        if !record.tags.is_empty() {
            lines.push(format!("{}Tags: {}", indent(1), record.tags.join(", ")));
        }
        if !record.related_images.is_empty() {
            lines.push(format!(
                "{}Related: {}",
                indent(1),
                record.related_images.join(", ")
            ));
            for missing in record.related_images.iter().filter(|r| !catalog.contains(r)) {
                lines.push(format!("{}Missing: {images_dir}/{missing}", indent(2)));
            }
        }
        let description = if record.description == config.catalog.placeholder_description {
            "(placeholder)".to_string()
        } else {
            truncate_desc(&record.description, DESCRIPTION_WIDTH)
        };
        lines.push(format!("{}Description: {description}", indent(1)));
    }

    let tags = catalog.all_tags();
    if !tags.is_empty() {
        lines.push(String::new());
        lines.push("Tags".to_string());
        for tag in &tags {
            let count = catalog
                .inventory()
                .iter()
                .filter(|id| catalog.lookup(id).has_tag(tag))
                .count();
            lines.push(format!("{}{tag} ({count})", indent(1)));
        }
    }

    lines.push(String::new());
    lines.push("Metadata".to_string());
    lines.push(format!("{}{}", indent(1), config.catalog.metadata_file));
    let orphaned = catalog.orphaned_metadata();
    if !orphaned.is_empty() {
        lines.push(format!("{}Unused: {}", indent(1), orphaned.join(", ")));
    }

    lines
}

pub fn print_check_output(catalog: &Catalog, config: &SiteConfig) {
    for line in format_check_output(catalog, config) {
        println!("{}", line);
    }
}

// ============================================================================
// Build
// ============================================================================

pub fn format_build_output(report: &BuildReport) -> Vec<String> {
    let out = report.output_dir.display();
    vec![
        format!("Generated index.html → {out}/index.html"),
        format!("Copied {}", plural(report.assets_copied, "asset", "assets")),
        format!(
            "Built {}, {} → {out}",
            plural(report.items, "item", "items"),
            plural(report.tags, "tag", "tags"),
        ),
    ]
}

pub fn print_build_output(report: &BuildReport) {
    for line in format_build_output(report) {
        println!("{}", line);
    }
}
