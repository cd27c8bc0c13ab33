//! Site configuration module.
//!
//! Handles loading, validating, and merging `config.toml`. Stock defaults are
//! serialized to a TOML table and the user's file is merged on top of it, so a
//! site only needs to spell out the values it changes.
//!
//! ## Config File Location
//!
//! ```text
//! site/
//! ├── config.toml                  # Optional, overrides stock defaults
//! └── public/
//!     ├── catalog-config.json      # Metadata store
//!     ├── cuadros/                 # Image inventory
//!     ├── hero/                    # Hero backgrounds
//!     └── logo.png
//! ```
//!
//! ## Configuration Options
//!
//! ```toml
//! [site]
//! title = "APAS"
//! description = "APAS - Chapas decorativas"
//! lang = "es"
//! public_dir = "public"
//!
//! [catalog]
//! images_dir = "cuadros"                  # Relative to public_dir
//! metadata_file = "catalog-config.json"   # Relative to public_dir
//! placeholder_description = "Obra original única"
//! item_label = "apas"
//!
//! [contact]
//! phone = "541122677318"
//! message_prefix = "Hola! Me interesa consultar sobre la APA"
//!
//! [hero]
//! images = ["hero/hero-1.jpg", "hero/hero-2.jpg"]
//! rotate_seconds = 7
//!
//! [colors]
//! yellow = "#fbb110"
//! red = "#ff1333"
//! brown = "#241917"
//! cream = "#faf0e4"
//!
//! [server]
//! bind = "127.0.0.1:3000"
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site configuration loaded from `config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Document-level settings (title, language, public directory).
    pub site: SiteSection,
    /// Where the inventory and metadata live, and catalog wording.
    pub catalog: CatalogConfig,
    /// Outbound contact link settings.
    pub contact: ContactConfig,
    /// Hero banner backgrounds and rotation period.
    pub hero: HeroConfig,
    /// Brand palette.
    pub colors: BrandColors,
    /// HTTP server settings.
    pub server: ServerConfig,
}

impl SiteConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.hero.rotate_seconds == 0 {
            return Err(ConfigError::Validation(
                "hero.rotate_seconds must be greater than zero".into(),
            ));
        }
        if self.contact.phone.is_empty() || !self.contact.phone.chars().all(|c| c.is_ascii_digit())
        {
            return Err(ConfigError::Validation(
                "contact.phone must be digits only (international format, no '+')".into(),
            ));
        }
        if self.catalog.images_dir.trim().is_empty() {
            return Err(ConfigError::Validation(
                "catalog.images_dir must not be empty".into(),
            ));
        }
        for (name, value) in self.colors.entries() {
            if value.trim().is_empty() {
                return Err(ConfigError::Validation(format!(
                    "colors.{name} must not be empty"
                )));
            }
        }
        Ok(())
    }

    /// Absolute-or-relative path to the public directory under `root`.
    pub fn public_dir(&self, root: &Path) -> PathBuf {
        root.join(&self.site.public_dir)
    }

    /// Directory holding the image inventory.
    pub fn images_dir(&self, root: &Path) -> PathBuf {
        self.public_dir(root).join(&self.catalog.images_dir)
    }

    /// Path of the JSON metadata store.
    pub fn metadata_path(&self, root: &Path) -> PathBuf {
        self.public_dir(root).join(&self.catalog.metadata_file)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteSection {
    /// `<title>` of the page.
    pub title: String,
    /// `<meta name="description">` content.
    pub description: String,
    /// `lang` attribute of the document.
    pub lang: String,
    /// Directory served as static files, relative to the site root.
    pub public_dir: String,
}

impl Default for SiteSection {
    fn default() -> Self {
        Self {
            title: "APAS".to_string(),
            description: "APAS - Chapas decorativas".to_string(),
            lang: "es".to_string(),
            public_dir: "public".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CatalogConfig {
    /// Inventory directory, relative to `site.public_dir`. Also the URL prefix.
    pub images_dir: String,
    /// Metadata JSON file, relative to `site.public_dir`.
    pub metadata_file: String,
    /// Description shown for images without one.
    pub placeholder_description: String,
    /// Plural noun used in the result counter ("Mostrando 3 de 12 apas").
    pub item_label: String,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            images_dir: "cuadros".to_string(),
            metadata_file: "catalog-config.json".to_string(),
            placeholder_description: "Obra original única".to_string(),
            item_label: "apas".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ContactConfig {
    /// WhatsApp number in international format without `+`.
    pub phone: String,
    /// Message text; the item's display number is appended after a space.
    pub message_prefix: String,
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            phone: "541122677318".to_string(),
            message_prefix: "Hola! Me interesa consultar sobre la APA".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HeroConfig {
    /// Background images, relative to `site.public_dir`, shown in order.
    pub images: Vec<String>,
    /// Seconds each background stays on screen.
    pub rotate_seconds: u32,
}

impl Default for HeroConfig {
    fn default() -> Self {
        Self {
            images: vec!["hero/hero-1.jpg".to_string(), "hero/hero-2.jpg".to_string()],
            rotate_seconds: 7,
        }
    }
}

/// Brand palette. Tag colors are derived from these four.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BrandColors {
    pub yellow: String,
    pub red: String,
    pub brown: String,
    pub cream: String,
}

impl BrandColors {
    fn entries(&self) -> [(&'static str, &str); 4] {
        [
            ("yellow", self.yellow.as_str()),
            ("red", self.red.as_str()),
            ("brown", self.brown.as_str()),
            ("cream", self.cream.as_str()),
        ]
    }
}

impl Default for BrandColors {
    fn default() -> Self {
        Self {
            yellow: "#fbb110".to_string(),
            red: "#ff1333".to_string(),
            brown: "#241917".to_string(),
            cream: "#faf0e4".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    /// Socket address for `apas serve` when `--bind` is not given.
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:3000".to_string(),
        }
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(SiteConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load `config.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if no `config.toml` exists in the directory.
pub fn load_raw_config(root: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = root.join("config.toml");
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Load config from `config.toml` in the site root.
///
/// Merges user values on top of stock defaults, rejects unknown keys,
/// and validates the result.
pub fn load_config(root: &Path) -> Result<SiteConfig, ConfigError> {
    let merged = match load_raw_config(root)? {
        Some(overlay) => merge_toml(stock_defaults_value(), overlay),
        None => stock_defaults_value(),
    };
    let config: SiteConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Returns a fully-commented stock `config.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# APAS site configuration
# =======================
# All settings are optional. Values shown below are the defaults.
# Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Document
# ---------------------------------------------------------------------------
[site]
title = "APAS"
description = "APAS - Chapas decorativas"
lang = "es"
# Directory served as static files (images, logo, hero backgrounds).
public_dir = "public"

# ---------------------------------------------------------------------------
# Catalog
# ---------------------------------------------------------------------------
[catalog]
# Image inventory, relative to public_dir. Only .jpg/.jpeg/.png/.webp files
# are listed, sorted by filename; the position in that order is the item
# number shown on cards (#001, #002, ...).
images_dir = "cuadros"

# Metadata store, relative to public_dir. A JSON object keyed by filename:
#   { "001.jpg": { "title": "...", "tags": ["retro"], "description": "...",
#                  "images": ["001-b.jpg"] } }
# A missing or malformed file is logged and treated as empty.
metadata_file = "catalog-config.json"

# Shown for images that have no description.
placeholder_description = "Obra original única"

# Plural noun used in the result counter.
item_label = "apas"

# ---------------------------------------------------------------------------
# Contact link (WhatsApp)
# ---------------------------------------------------------------------------
[contact]
# International format, digits only.
phone = "541122677318"
# The item number is appended: "... APA #007".
message_prefix = "Hola! Me interesa consultar sobre la APA"

# ---------------------------------------------------------------------------
# Hero banner
# ---------------------------------------------------------------------------
[hero]
# Background images, relative to public_dir, cross-faded in order.
images = ["hero/hero-1.jpg", "hero/hero-2.jpg"]
# Seconds each background stays on screen.
rotate_seconds = 7

# ---------------------------------------------------------------------------
# Brand palette
# ---------------------------------------------------------------------------
[colors]
yellow = "#fbb110"
red = "#ff1333"
brown = "#241917"
cream = "#faf0e4"

# ---------------------------------------------------------------------------
# Server
# ---------------------------------------------------------------------------
[server]
bind = "127.0.0.1:3000"
"##
}

/// Generate CSS custom properties from the brand palette.
pub fn generate_color_css(colors: &BrandColors) -> String {
    format!(
        r#":root {{
    --brand-yellow: {yellow};
    --brand-red: {red};
    --brand-brown: {brown};
    --brand-cream: {cream};
}}"#,
        yellow = colors.yellow,
        red = colors.red,
        brown = colors.brown,
        cream = colors.cream,
    )
}
