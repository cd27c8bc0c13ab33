//! Static snapshot export.
//!
//! Renders the landing page for the default catalog state and copies the
//! public directory next to it, producing a directory any file server can
//! host. Interactive links still point at `/?…` state URLs, so filtering and
//! the detail view need `apas serve`; the snapshot is the no-server fallback.
//!
//! ## Output Structure
//!
//! ```text
//! dist/
//! ├── index.html                 # Page for the default state
//! ├── catalog-config.json        # Copied from public/
//! ├── cuadros/
//! │   └── ...
//! ├── hero/
//! └── logo.png
//! ```

use crate::config::SiteConfig;
use crate::render;
use crate::scan::{self, ScanError};
use crate::state::CatalogState;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum BuildError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Scan error: {0}")]
    Scan(#[from] ScanError),
    #[error("Walk error: {0}")]
    Walk(#[from] walkdir::Error),
}

/// Summary of a finished build, printed by the CLI.
#[derive(Debug)]
pub struct BuildReport {
    pub output_dir: PathBuf,
    pub items: usize,
    pub tags: usize,
    pub assets_copied: usize,
}

/// Write `index.html` and the public assets for the site at `root` into `output_dir`.
pub fn build_site(
    root: &Path,
    config: &SiteConfig,
    output_dir: &Path,
) -> Result<BuildReport, BuildError> {
    let catalog = scan::load_catalog(root, config)?;

    fs::create_dir_all(output_dir)?;
    let assets_copied = copy_public_dir(&config.public_dir(root), output_dir)?;

    let page = render::render_page(config, &catalog, &CatalogState::default());
    fs::write(output_dir.join("index.html"), page.into_string())?;
    info!(output = %output_dir.display(), items = catalog.len(), "generated index.html");

    Ok(BuildReport {
        output_dir: output_dir.to_path_buf(),
        items: catalog.len(),
        tags: catalog.all_tags().len(),
        assets_copied,
    })
}

/// Mirror `src` into `dst`, skipping hidden entries. Returns the file count.
fn copy_public_dir(src: &Path, dst: &Path) -> Result<usize, BuildError> {
    if !src.is_dir() {
        return Ok(0);
    }

    let mut copied = 0;
    let walker = WalkDir::new(src)
        .min_depth(1)
        .into_iter()
        .filter_entry(|e| !e.file_name().to_string_lossy().starts_with('.'));
    for entry in walker {
        let entry = entry?;
        let Ok(relative) = entry.path().strip_prefix(src) else {
            continue;
        };
        let target = dst.join(relative);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)?;
        } else if entry.file_type().is_file() {
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(entry.path(), &target)?;
            copied += 1;
        }
    }
    Ok(copied)
}
