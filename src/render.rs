//! HTML page rendering.
//!
//! Renders the single catalog page for a given [`CatalogState`]. The page has
//! four fixed sections (navbar, hero, catalog, install guide) and a footer;
//! the detail view is layered on top when an item is selected.
//!
//! ## Interaction Without Scripts
//!
//! Every control is a plain link or a GET form. A link's target is the state
//! that results from applying its [`Action`] to the current state:
//!
//! ```text
//! tag button "retro"   →  href = state.apply(ToggleTag("retro")).href() + "#catalogo"
//! card 002.jpg         →  href = state.apply(Select("002.jpg")).href() + "#catalogo"
//! carousel ›           →  href = state.apply(CarouselNext).href() + "#catalogo"
//! ```
//!
//! The search box is a GET form that carries the selected tags and the
//! filter panel flag as hidden inputs, so submitting it only replaces `q`.
//!
//! ## CSS
//!
//! `static/style.css` is embedded at compile time. The brand palette custom
//! properties and the hero keyframes depend on config and are prepended at
//! render time.
//!
//! ## HTML Generation
//!
//! Uses [maud](https://maud.lambda.xyz/); all interpolated text is escaped.

use crate::catalog::{Catalog, ResultCount, tag_color};
use crate::config::{self, SiteConfig};
use crate::links::{asset_url, contact_home_url, contact_url, image_url};
use crate::state::{Action, CatalogState};
use maud::{DOCTYPE, Markup, PreEscaped, html};

const CSS_STATIC: &str = include_str!("../static/style.css");

/// Fragment every catalog link jumps back to.
const CATALOG_ANCHOR: &str = "catalogo";

/// Render the whole page for `state`.
pub fn render_page(config: &SiteConfig, catalog: &Catalog, state: &CatalogState) -> Markup {
    let css = page_css(config);
    let selected = state.selected().filter(|id| catalog.contains(id));

    let content = html! {
        (navbar(config))
        main {
            (hero(config))
            (catalog_section(config, catalog, state))
            (install_section(config))
        }
        (footer(config))
        @if let Some(id) = selected {
            (detail_view(config, catalog, state, id))
        }
    };

    base_document(config, &css, selected.map(|_| "modal-open"), content)
}

/// Full stylesheet: palette variables, hero keyframes, static rules.
pub fn page_css(config: &SiteConfig) -> String {
    format!(
        "{}\n\n{}\n\n{}",
        config::generate_color_css(&config.colors),
        hero_animation_css(config.hero.images.len(), config.hero.rotate_seconds),
        CSS_STATIC
    )
}

/// Link target for the state reached by `action`, anchored on the catalog.
fn action_href(state: &CatalogState, action: Action, catalog: &Catalog) -> String {
    format!("{}#{CATALOG_ANCHOR}", state.apply(action, catalog).href())
}

// ============================================================================
// HTML Components
// ============================================================================

/// Renders the base HTML document structure
fn base_document(
    config: &SiteConfig,
    css: &str,
    body_class: Option<&str>,
    content: Markup,
) -> Markup {
    html! {
        (DOCTYPE)
        html lang=(config.site.lang) {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                meta name="description" content=(config.site.description);
                title { (config.site.title) }
                style { (PreEscaped(css)) }
            }
            body class=[body_class] {
                (content)
            }
        }
    }
}

fn navbar(config: &SiteConfig) -> Markup {
    html! {
        nav.navbar {
            a.navbar-logo href="/" {
                img src=(asset_url("logo.png")) alt={ (config.site.title) " Logo" };
            }
            div.navbar-links {
                a href="#catalogo" { "Catálogo" }
                a href="#como-colocar" { "Cómo Colocar" }
                a.navbar-cta href="#contacto" { "Contacto" }
            }
        }
    }
}

// ============================================================================
// Hero
// ============================================================================

const HERO_CHIPS: &[(&str, &str)] = &[
    ("✓", "Diseño original"),
    ("★", "Estética única"),
    ("◆", "Estilo atemporal"),
];

const HERO_CARDS: &[(&str, &str, &str)] = &[
    ("01", "Vintage", "Inspiración en el diseño clásico"),
    ("02", "Artesanal", "Cuidado en cada detalle"),
    ("03", "Carácter", "Piezas que expresan personalidad"),
    ("04", "Contemporáneo", "Retro con visión moderna"),
];

/// Keyframes cross-fading `count` hero slides, each visible for `rotate_seconds`.
///
/// Every slide runs the same animation over the full cycle and is delayed by
/// its position, so exactly one slide is opaque at any time. A single slide
/// needs no animation.
pub fn hero_animation_css(count: usize, rotate_seconds: u32) -> String {
    if count < 2 {
        return ".hero-slide { opacity: 1; }".to_string();
    }

    let cycle = count as u64 * u64::from(rotate_seconds);
    let share = 100.0 / count as f64;
    let fade = share * 0.15;

    let mut css = format!(
        "@keyframes hero-fade {{\n    0% {{ opacity: 0; }}\n    {fade_in:.2}% {{ opacity: 1; }}\n    {hold:.2}% {{ opacity: 1; }}\n    {fade_out:.2}% {{ opacity: 0; }}\n    100% {{ opacity: 0; }}\n}}\n.hero-slide {{ animation: hero-fade {cycle}s linear infinite both; }}",
        fade_in = fade,
        hold = share,
        fade_out = share + fade,
    );
    for index in 1..count {
        css.push_str(&format!(
            "\n.hero-slide:nth-child({}) {{ animation-delay: {}s; }}",
            index + 1,
            index as u64 * u64::from(rotate_seconds)
        ));
    }
    css
}

fn hero(config: &SiteConfig) -> Markup {
    html! {
        section.hero {
            div.hero-slides aria-hidden="true" {
                @for image in &config.hero.images {
                    div.hero-slide style={ "background-image: url('" (asset_url(image)) "')" } {}
                }
            }
            div.hero-overlay {}
            div.hero-content {
                div.hero-text {
                    h1 {
                        "Arte gráfico"
                        br;
                        span.accent { "con identidad" }
                    }
                    p.hero-lead {
                        "Cuadros y chapas decorativas con personalidad."
                        span { "Diseño vintage actualizado para espacios con carácter." }
                    }
                    ul.hero-chips {
                        @for (icon, label) in HERO_CHIPS {
                            li { span.chip-icon { (icon) } (label) }
                        }
                    }
                    div.hero-actions {
                        a.button.primary href="#catalogo" { "Ver Colección" }
                        a.button.ghost href="#contacto" { "Contacto" }
                    }
                }
                div.hero-cards {
                    @for (number, title, text) in HERO_CARDS {
                        div.hero-card {
                            div.hero-card-number { (number) }
                            div.hero-card-title { (title) }
                            p { (text) }
                        }
                    }
                }
            }
        }
    }
}

// ============================================================================
// Catalog
// ============================================================================

fn catalog_section(config: &SiteConfig, catalog: &Catalog, state: &CatalogState) -> Markup {
    let visible = state.visible_images(catalog);
    let label = &config.catalog.item_label;

    html! {
        section.catalog id=(CATALOG_ANCHOR) {
            header.section-header {
                h2 { "catálogo" }
            }
            (search_form(catalog, state))
            (filter_bar(catalog, state))
            @if !catalog.is_empty() {
                p.result-count { (ResultCount::new(visible.len(), catalog.len()).label(label)) }
            }
            @if !visible.is_empty() {
                div.catalog-grid {
                    @for id in &visible {
                        (catalog_card(config, catalog, state, id))
                    }
                }
            }
            @if catalog.is_empty() {
                div.empty-state.empty-inventory {
                    p { "No hay " (label) " disponibles en este momento" }
                }
            } @else if visible.is_empty() {
                div.empty-state.empty-results {
                    p { "No se encontraron " (label) " con los criterios seleccionados" }
                    a.button.primary href=(action_href(state, Action::ClearFilters, catalog)) {
                        "Limpiar Filtros"
                    }
                }
            }
        }
    }
}

fn search_form(catalog: &Catalog, state: &CatalogState) -> Markup {
    html! {
        form.search-form method="get" action={ "/#" (CATALOG_ANCHOR) } role="search" {
            @for tag in state.selected_tags() {
                input type="hidden" name="tag" value=(tag);
            }
            @if state.filters_open() {
                input type="hidden" name="filters" value="1";
            }
            input.search-input
                type="search"
                name="q"
                value=(state.search_text())
                placeholder="Buscar por título o descripción..."
                aria-label="Buscar";
            @if !state.search_text().is_empty() {
                a.search-clear
                    href=(action_href(state, Action::SetSearchText(String::new()), catalog))
                    aria-label="Borrar búsqueda" { "✕" }
            }
            button.search-submit type="submit" { "Buscar" }
        }
    }
}

fn filter_bar(catalog: &Catalog, state: &CatalogState) -> Markup {
    let all_tags = catalog.all_tags();

    html! {
        div.filter-bar {
            @if !all_tags.is_empty() {
                a.filter-toggle.open[state.filters_open()]
                    href=(action_href(state, Action::ToggleFilterPanel, catalog))
                    aria-expanded=(if state.filters_open() { "true" } else { "false" }) {
                    "filtrar por categoría"
                    @if !state.selected_tags().is_empty() {
                        span.filter-count { (state.selected_tags().len()) }
                    }
                }
            }
            @if state.has_active_filters() {
                a.clear-all href=(action_href(state, Action::ClearFilters, catalog)) { "Limpiar todo" }
            }
        }
        @if state.filters_open() && !all_tags.is_empty() {
            div.filter-panel {
                h3 { "Categorías" }
                div.tag-list {
                    @for tag in &all_tags {
                        @let selected = state.is_tag_selected(tag);
                        a class=(tag_button_class(tag, selected))
                            href=(action_href(state, Action::ToggleTag(tag.clone()), catalog))
                            aria-pressed=(if selected { "true" } else { "false" }) {
                            @if selected { "✓ " }
                            (tag)
                        }
                    }
                }
            }
        } @else if !state.selected_tags().is_empty() {
            div.active-tags {
                @for tag in state.selected_tags() {
                    a class={ "tag-chip tag-color-" (tag_color(tag)) }
                        href=(action_href(state, Action::ToggleTag(tag.clone()), catalog))
                        title={ "Quitar " (tag) } {
                        (tag) " ✕"
                    }
                }
            }
        }
    }
}

fn tag_button_class(tag: &str, selected: bool) -> String {
    if selected {
        format!("tag-button selected tag-color-{}", tag_color(tag))
    } else {
        "tag-button".to_string()
    }
}

fn catalog_card(config: &SiteConfig, catalog: &Catalog, state: &CatalogState, id: &str) -> Markup {
    let record = catalog.lookup(id);
    let position = catalog.position(id);
    let hovered = position.is_some() && state.hovered() == position;
    let primary = catalog.card_image(id, hovered);
    let hover_image = catalog.card_image(id, true);
    let images_dir = &config.catalog.images_dir;

    html! {
        a.catalog-card.hovered[hovered] href=(action_href(state, Action::Select(id.to_string()), catalog)) {
            div.card-image {
                img.card-img src=(image_url(images_dir, primary)) alt=(record.title) loading="lazy";
                @if hover_image != primary {
                    img.card-img-hover src=(image_url(images_dir, hover_image)) alt="" loading="lazy";
                }
            }
            @if let Some(number) = catalog.display_number(id) {
                div.card-badge { (number) }
            }
            div.card-body {
                p { (record.description) }
            }
        }
    }
}

// ============================================================================
// Detail view
// ============================================================================

fn detail_view(config: &SiteConfig, catalog: &Catalog, state: &CatalogState, id: &str) -> Markup {
    let record = catalog.lookup(id);
    let sequence = record.carousel_sequence();
    let index = state.carousel_index();
    let current = state.current_image(catalog).unwrap_or_else(|| id.to_string());
    let number = catalog.display_number(id).unwrap_or_default();
    let dismiss = action_href(state, Action::Dismiss, catalog);
    let images_dir = &config.catalog.images_dir;

    html! {
        div.modal role="dialog" aria-modal="true" aria-label=(record.title) {
            a.modal-backdrop href=(dismiss) aria-label="Cerrar" {}
            div.modal-panel {
                a.modal-close href=(dismiss) aria-label="Cerrar" { "✕" }
                div.carousel {
                    img.carousel-image src=(image_url(images_dir, &current)) alt=(record.title);
                    @if sequence.len() > 1 {
                        a.carousel-prev href=(action_href(state, Action::CarouselPrev, catalog)) aria-label="Anterior" { "‹" }
                        a.carousel-next href=(action_href(state, Action::CarouselNext, catalog)) aria-label="Siguiente" { "›" }
                        div.carousel-dots {
                            @for i in 0..sequence.len() {
                                a.carousel-dot.active[i == index]
                                    href=(action_href(state, Action::CarouselGoto(i), catalog))
                                    aria-label={ "Ir a imagen " (i + 1) } {}
                            }
                        }
                    }
                }
                div.modal-info {
                    div.card-badge { (number) }
                    h2 { (record.title) }
                    p.modal-description { (record.description) }
                    @if !record.tags.is_empty() {
                        div.modal-tags {
                            @for tag in &record.tags {
                                a class={ "tag-chip tag-color-" (tag_color(tag)) }
                                    href=(action_href(state, Action::FilterByTagFromDetail(tag.clone()), catalog))
                                    title={ "Filtrar por " (tag) } {
                                    (tag)
                                }
                            }
                        }
                    }
                    a.button.primary.contact-button
                        href=(contact_url(&config.contact.phone, &config.contact.message_prefix, &number))
                        target="_blank"
                        rel="noopener noreferrer" {
                        "Consultar Disponibilidad"
                    }
                }
            }
        }
    }
}

// ============================================================================
// Install guide and footer
// ============================================================================

struct InstallStep {
    title: &'static str,
    description: &'static str,
    image: &'static str,
    tone: &'static str,
}

const INSTALL_STEPS: &[InstallStep] = &[
    InstallStep {
        title: "Preparar el Soporte",
        description: "Selecciona la ubicación ideal y marca los puntos donde colocarás los soportes. Asegúrate de que la superficie esté limpia y nivelada para un resultado profesional.",
        image: "como-colocar/soporte.png",
        tone: "yellow",
    },
    InstallStep {
        title: "Atornillar con Cuidado",
        description: "Fija los soportes a la pared usando los tornillos adecuados. Asegúrate de que queden bien sujetos y nivelados antes de proceder con el siguiente paso.",
        image: "como-colocar/atornillar.png",
        tone: "red",
    },
    InstallStep {
        title: "Colocar tu Obra",
        description: "Con cuidado, coloca tu obra de arte sobre los soportes. Ajusta la posición hasta conseguir el ángulo perfecto y disfruta de tu nueva decoración.",
        image: "como-colocar/colocar.png",
        tone: "cream",
    },
];

fn install_section(config: &SiteConfig) -> Markup {
    html! {
        section.install id="como-colocar" {
            header.section-header {
                h2 { "cómo colocar" }
                p { "Sigue estos simples pasos para instalar tu obra de arte de manera segura y profesional" }
            }
            ol.install-steps {
                @for (i, step) in INSTALL_STEPS.iter().enumerate() {
                    li class={ "install-step tone-" (step.tone) } {
                        span.step-number { (i + 1) }
                        img src=(asset_url(step.image)) alt=(step.title) loading="lazy";
                        h3 { (step.title) }
                        p { (step.description) }
                    }
                }
            }
            div.install-cta {
                p { "¿Necesitas ayuda con la instalación?" }
                a.button.primary href=(contact_home_url(&config.contact.phone)) target="_blank" rel="noopener noreferrer" {
                    "Contáctanos"
                }
            }
        }
    }
}

fn footer(config: &SiteConfig) -> Markup {
    html! {
        footer.site-footer id="contacto" {
            img src=(asset_url("logo.png")) alt={ (config.site.title) " Logo" } loading="lazy";
            p { (config.site.description) }
            a.button.primary href=(contact_home_url(&config.contact.phone)) target="_blank" rel="noopener noreferrer" {
                "Escribinos por WhatsApp"
            }
            p.copyright { "© " (config.site.title) }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
