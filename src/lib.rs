//! # APAS
//!
//! Server-rendered catalog site for a decorative-art brand: a hero banner,
//! an image catalog with tag filters, text search and a detail view with a
//! carousel, and a "how to install" guide.
//!
//! The site directory is the data source. Image files in `public/cuadros/`
//! are the inventory; `public/catalog-config.json` adds titles, tags,
//! descriptions and related images keyed by filename.
//!
//! # Architecture: Snapshot, State, Page
//!
//! ```text
//! 1. Snapshot   cuadros/ + catalog-config.json  →  Catalog        (scan)
//! 2. State      query string + Catalog          →  CatalogState   (state)
//! 3. Page       Catalog + CatalogState          →  HTML           (render)
//! ```
//!
//! The snapshot is immutable; the state is a small value whose transitions
//! are pure functions. Every control on the rendered page links to the URL
//! of the next state, so the whole interaction runs without client-side
//! scripts and each step is reproducible from its URL.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`catalog`] | Immutable snapshot: lookup with fallbacks, tag vocabulary, filtering, item numbers |
//! | [`state`] | UI state record, [`state::Action`] transitions, query string codec |
//! | [`metadata`] | Metadata store parsing and field resolution |
//! | [`scan`] | Reads the inventory directory and metadata file into a [`catalog::Catalog`] |
//! | [`render`] | Maud templates for the page and the detail view |
//! | [`links`] | Percent-encoded asset, image, and contact URLs |
//! | [`config`] | `config.toml` loading, validation, merging, and CSS generation |
//! | [`server`] | axum router: page, health check, static files |
//! | [`generate`] | Static snapshot export for the `build` command |
//! | [`output`] | CLI output formatting for `check` and `build` |
//!
//! # Design Decisions
//!
//! ## Read Per Request
//!
//! The catalog is small and edited by hand. Reading the directory and the
//! JSON file on every page request means there is no cache to invalidate:
//! drop a file into `cuadros/`, reload, and it is there.
//!
//! ## Degrade, Don't Fail
//!
//! A missing or broken metadata file renders the catalog with filename
//! titles and the placeholder description instead of an error page. A bad
//! `config.toml` is different: it is rejected at startup.

pub mod catalog;
pub mod config;
pub mod generate;
pub mod links;
pub mod metadata;
pub mod output;
pub mod render;
pub mod scan;
pub mod server;
pub mod state;

#[cfg(test)]
pub(crate) mod test_helpers;
