//! Session-local catalog UI state and its transitions.
//!
//! The whole interactive surface of the catalog (selected tags, search text,
//! open detail view, carousel position, filter panel) is one immutable
//! [`CatalogState`] record. Interactions are [`Action`]s, and
//! [`CatalogState::apply`] is a pure function from the current state to the
//! next one.
//!
//! ## State in the URL
//!
//! Pages are rendered on the server, so the state travels in the query string
//! and every control on the page is a link to `current.apply(action).href()`:
//!
//! ```text
//! /?tag=retro&tag=bold&q=cafetera&filters=1&item=002.jpg&slide=1
//! ```
//!
//! | key       | field            | omitted when     |
//! |-----------|------------------|------------------|
//! | `tag`     | `selected_tags`  | no tag selected  |
//! | `q`       | `search_text`    | empty            |
//! | `filters` | `filters_open`   | panel closed     |
//! | `item`    | `selected`       | detail closed    |
//! | `slide`   | `carousel_index` | index 0          |
//!
//! `hovered` is pointer state and never leaves the page: it is kept so the
//! model covers the whole interaction, and served pages render the hover swap
//! through CSS (`.card-img-hover`) instead.

use crate::catalog::Catalog;
use crate::links::encode_component;

/// A user interaction on the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    ToggleTag(String),
    SetSearchText(String),
    ClearFilters,
    Select(String),
    Dismiss,
    CarouselNext,
    CarouselPrev,
    CarouselGoto(usize),
    Hover(usize),
    Unhover,
    ToggleFilterPanel,
    /// Tag chip inside the detail view: close the view and toggle the tag.
    FilterByTagFromDetail(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogState {
    selected_tags: Vec<String>,
    search_text: String,
    selected: Option<String>,
    hovered: Option<usize>,
    carousel_index: usize,
    filters_open: bool,
}

impl CatalogState {
    pub fn selected_tags(&self) -> &[String] {
        &self.selected_tags
    }

    pub fn is_tag_selected(&self, tag: &str) -> bool {
        self.selected_tags.iter().any(|t| t == tag)
    }

    /// Search text exactly as typed.
    pub fn search_text(&self) -> &str {
        &self.search_text
    }

    /// Id of the item open in the detail view.
    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn hovered(&self) -> Option<usize> {
        self.hovered
    }

    pub fn carousel_index(&self) -> usize {
        self.carousel_index
    }

    pub fn filters_open(&self) -> bool {
        self.filters_open
    }

    /// Whether the "clear all" control should be offered.
    pub fn has_active_filters(&self) -> bool {
        !self.selected_tags.is_empty() || !self.search_text.is_empty()
    }

    /// Visible inventory ids for this state.
    pub fn visible_images<'a>(&self, catalog: &'a Catalog) -> Vec<&'a str> {
        catalog.filter(&self.selected_tags, &self.search_text)
    }

    /// Image currently shown by the detail carousel.
    pub fn current_image(&self, catalog: &Catalog) -> Option<String> {
        let selected = self.selected.as_deref()?;
        let record = catalog.lookup(selected);
        record
            .carousel_sequence()
            .get(self.carousel_index)
            .map(|s| s.to_string())
    }

    /// Apply one interaction, returning the next state.
    pub fn apply(&self, action: Action, catalog: &Catalog) -> CatalogState {
        let mut next = self.clone();
        match action {
            Action::ToggleTag(tag) => next.toggle_tag(tag),
            Action::SetSearchText(text) => next.search_text = text,
            Action::ClearFilters => {
                next.selected_tags.clear();
                next.search_text.clear();
            }
            Action::Select(id) => {
                next.selected = Some(id);
                next.carousel_index = 0;
            }
            Action::Dismiss => next.dismiss(),
            Action::CarouselNext => {
                if let Some(len) = self.carousel_len(catalog) {
                    next.carousel_index = (self.carousel_index + 1) % len;
                }
            }
            Action::CarouselPrev => {
                if let Some(len) = self.carousel_len(catalog) {
                    next.carousel_index = if self.carousel_index == 0 {
                        len - 1
                    } else {
                        (self.carousel_index - 1).min(len - 1)
                    };
                }
            }
            Action::CarouselGoto(index) => {
                if let Some(len) = self.carousel_len(catalog) {
                    if index < len {
                        next.carousel_index = index;
                    }
                }
            }
            Action::Hover(index) => next.hovered = Some(index),
            Action::Unhover => next.hovered = None,
            Action::ToggleFilterPanel => next.filters_open = !self.filters_open,
            Action::FilterByTagFromDetail(tag) => {
                next.dismiss();
                next.toggle_tag(tag);
            }
        }
        next
    }

    fn toggle_tag(&mut self, tag: String) {
        if let Some(pos) = self.selected_tags.iter().position(|t| *t == tag) {
            self.selected_tags.remove(pos);
        } else {
            self.selected_tags.push(tag);
        }
    }

    fn dismiss(&mut self) {
        self.selected = None;
        self.carousel_index = 0;
    }

    fn carousel_len(&self, catalog: &Catalog) -> Option<usize> {
        self.selected.as_deref().map(|id| catalog.carousel_len(id))
    }

    // =========================================================================
    // Query string encoding
    // =========================================================================

    /// Encode as a query string (without the leading `?`).
    pub fn to_query(&self) -> String {
        let mut pairs: Vec<String> = Vec::new();
        for tag in &self.selected_tags {
            pairs.push(format!("tag={}", encode_component(tag)));
        }
        if !self.search_text.is_empty() {
            pairs.push(format!("q={}", encode_component(&self.search_text)));
        }
        if self.filters_open {
            pairs.push("filters=1".to_string());
        }
        if let Some(id) = &self.selected {
            pairs.push(format!("item={}", encode_component(id)));
            if self.carousel_index > 0 {
                pairs.push(format!("slide={}", self.carousel_index));
            }
        }
        pairs.join("&")
    }

    /// Link target for this state.
    pub fn href(&self) -> String {
        let query = self.to_query();
        if query.is_empty() {
            "/".to_string()
        } else {
            format!("/?{query}")
        }
    }

    /// Decode a state from already percent-decoded query pairs.
    ///
    /// Values that do not make sense for `catalog` are dropped rather than
    /// rejected: unknown items close the detail view, and a slide outside the
    /// item's carousel falls back to the primary image.
    pub fn from_query(pairs: &[(String, String)], catalog: &Catalog) -> CatalogState {
        let mut state = CatalogState::default();
        let mut slide: Option<&str> = None;

        for (key, value) in pairs {
            match key.as_str() {
                "tag" => {
                    if !value.is_empty() && !state.is_tag_selected(value) {
                        state.selected_tags.push(value.clone());
                    }
                }
                "q" => state.search_text = value.clone(),
                "filters" => state.filters_open = matches!(value.as_str(), "1" | "true" | "on"),
                "item" => {
                    state.selected = catalog.contains(value).then(|| value.clone());
                }
                "slide" => slide = Some(value.as_str()),
                _ => {}
            }
        }

        if let Some(len) = state.carousel_len(catalog) {
            state.carousel_index = slide
                .and_then(|s| s.parse::<usize>().ok())
                .filter(|&i| i < len)
                .unwrap_or(0);
        }
        state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::*;

    fn pairs(raw: &[(&str, &str)]) -> Vec<(String, String)> {
        raw.iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn carousel_catalog() -> Catalog {
        catalog_from(
            &["001.jpg", "002.jpg"],
            r#"{"001.jpg": {"images": ["001-b.jpg", "001-c.jpg"]}}"#,
        )
    }

    // =========================================================================
    // Filter transitions
    // =========================================================================

    #[test]
    fn scenario_toggle_search_clear() {
        let catalog = scenario_catalog();
        let state = CatalogState::default();

        let state = state.apply(Action::ToggleTag("retro".into()), &catalog);
        assert_eq!(state.visible_images(&catalog), vec!["001.jpg", "002.jpg"]);

        let state = state.apply(Action::SetSearchText("bold".into()), &catalog);
        assert_eq!(state.visible_images(&catalog), vec!["002.jpg"]);

        let state = state.apply(Action::ClearFilters, &catalog);
        assert_eq!(
            state.visible_images(&catalog),
            vec!["001.jpg", "002.jpg", "003.jpg"]
        );
    }

    #[test]
    fn toggle_tag_twice_restores_selection() {
        let catalog = scenario_catalog();
        let start = CatalogState::default()
            .apply(Action::ToggleTag("bold".into()), &catalog);
        let round_trip = start
            .apply(Action::ToggleTag("retro".into()), &catalog)
            .apply(Action::ToggleTag("retro".into()), &catalog);
        assert_eq!(round_trip, start);
    }

    #[test]
    fn toggle_tag_preserves_selection_order() {
        let catalog = scenario_catalog();
        let state = CatalogState::default()
            .apply(Action::ToggleTag("retro".into()), &catalog)
            .apply(Action::ToggleTag("bold".into()), &catalog);
        assert_eq!(state.selected_tags(), ["retro", "bold"]);
    }

    #[test]
    fn search_text_stored_verbatim() {
        let catalog = scenario_catalog();
        let state =
            CatalogState::default().apply(Action::SetSearchText(" Bold ".into()), &catalog);
        assert_eq!(state.search_text(), " Bold ");
        assert_eq!(state.visible_images(&catalog), vec!["002.jpg"]);

        // Surrounding spaces take part in the match
        let state = state.apply(Action::SetSearchText("Bold  ".into()), &catalog);
        assert!(state.visible_images(&catalog).is_empty());
    }

    #[test]
    fn clear_filters_resets_tags_and_search_together() {
        let catalog = scenario_catalog();
        let state = CatalogState::default()
            .apply(Action::ToggleTag("bold".into()), &catalog)
            .apply(Action::SetSearchText("nada".into()), &catalog)
            .apply(Action::ToggleFilterPanel, &catalog)
            .apply(Action::ClearFilters, &catalog);
        assert!(state.selected_tags().is_empty());
        assert!(state.search_text().is_empty());
        assert!(!state.has_active_filters());
        // Panel visibility is not a filter
        assert!(state.filters_open());
        assert_eq!(state.visible_images(&catalog), catalog.inventory());
    }

    #[test]
    fn active_filters_include_whitespace_search() {
        let catalog = scenario_catalog();
        let state = CatalogState::default().apply(Action::SetSearchText(" ".into()), &catalog);
        assert!(state.has_active_filters());
        assert_eq!(state.visible_images(&catalog).len(), 3);
    }

    // =========================================================================
    // Detail view and carousel
    // =========================================================================

    #[test]
    fn select_resets_carousel() {
        let catalog = carousel_catalog();
        let state = CatalogState::default()
            .apply(Action::Select("001.jpg".into()), &catalog)
            .apply(Action::CarouselNext, &catalog)
            .apply(Action::Select("001.jpg".into()), &catalog);
        assert_eq!(state.selected(), Some("001.jpg"));
        assert_eq!(state.carousel_index(), 0);
    }

    #[test]
    fn dismiss_closes_detail_view() {
        let catalog = carousel_catalog();
        let state = CatalogState::default()
            .apply(Action::Select("001.jpg".into()), &catalog)
            .apply(Action::CarouselNext, &catalog)
            .apply(Action::Dismiss, &catalog);
        assert_eq!(state.selected(), None);
        assert_eq!(state.carousel_index(), 0);
    }

    #[test]
    fn carousel_next_wraps_after_full_cycle() {
        let catalog = carousel_catalog();
        let mut state =
            CatalogState::default().apply(Action::Select("001.jpg".into()), &catalog);
        let mut seen = Vec::new();
        for _ in 0..3 {
            seen.push(state.current_image(&catalog).unwrap());
            state = state.apply(Action::CarouselNext, &catalog);
        }
        assert_eq!(seen, vec!["001.jpg", "001-b.jpg", "001-c.jpg"]);
        assert_eq!(state.carousel_index(), 0);
    }

    #[test]
    fn carousel_prev_from_zero_goes_to_last() {
        let catalog = carousel_catalog();
        let state = CatalogState::default()
            .apply(Action::Select("001.jpg".into()), &catalog)
            .apply(Action::CarouselPrev, &catalog);
        assert_eq!(state.carousel_index(), 2);
        let state = state.apply(Action::CarouselPrev, &catalog);
        assert_eq!(state.carousel_index(), 1);
    }

    #[test]
    fn carousel_single_image_stays_put() {
        let catalog = carousel_catalog();
        let state = CatalogState::default()
            .apply(Action::Select("002.jpg".into()), &catalog)
            .apply(Action::CarouselNext, &catalog)
            .apply(Action::CarouselPrev, &catalog);
        assert_eq!(state.carousel_index(), 0);
    }

    #[test]
    fn carousel_goto_in_range_and_out_of_range() {
        let catalog = carousel_catalog();
        let state = CatalogState::default()
            .apply(Action::Select("001.jpg".into()), &catalog)
            .apply(Action::CarouselGoto(2), &catalog);
        assert_eq!(state.carousel_index(), 2);

        let unchanged = state.apply(Action::CarouselGoto(3), &catalog);
        assert_eq!(unchanged.carousel_index(), 2);
    }

    #[test]
    fn carousel_ignored_when_nothing_selected() {
        let catalog = carousel_catalog();
        let state = CatalogState::default()
            .apply(Action::CarouselNext, &catalog)
            .apply(Action::CarouselGoto(1), &catalog);
        assert_eq!(state, CatalogState::default());
        assert_eq!(state.current_image(&catalog), None);
    }

    #[test]
    fn filter_by_tag_from_detail_dismisses_and_toggles() {
        let catalog = scenario_catalog();
        let state = CatalogState::default()
            .apply(Action::Select("002.jpg".into()), &catalog)
            .apply(Action::FilterByTagFromDetail("bold".into()), &catalog);
        assert_eq!(state.selected(), None);
        assert_eq!(state.selected_tags(), ["bold"]);
        assert_eq!(state.visible_images(&catalog), vec!["002.jpg"]);
    }

    #[test]
    fn hover_and_panel_toggle() {
        let catalog = scenario_catalog();
        let state = CatalogState::default()
            .apply(Action::Hover(2), &catalog)
            .apply(Action::ToggleFilterPanel, &catalog);
        assert_eq!(state.hovered(), Some(2));
        assert!(state.filters_open());

        let state = state
            .apply(Action::Unhover, &catalog)
            .apply(Action::ToggleFilterPanel, &catalog);
        assert_eq!(state.hovered(), None);
        assert!(!state.filters_open());
    }

    // =========================================================================
    // Query string encoding
    // =========================================================================

    #[test]
    fn default_state_href_is_root() {
        assert_eq!(CatalogState::default().href(), "/");
        assert_eq!(CatalogState::default().to_query(), "");
    }

    #[test]
    fn to_query_encodes_all_fields() {
        let catalog = carousel_catalog();
        let state = CatalogState::default()
            .apply(Action::ToggleTag("arte pop".into()), &catalog)
            .apply(Action::SetSearchText("café & té".into()), &catalog)
            .apply(Action::ToggleFilterPanel, &catalog)
            .apply(Action::Select("001.jpg".into()), &catalog)
            .apply(Action::CarouselNext, &catalog);
        assert_eq!(
            state.to_query(),
            "tag=arte%20pop&q=caf%C3%A9%20%26%20t%C3%A9&filters=1&item=001.jpg&slide=1"
        );
    }

    #[test]
    fn from_query_restores_state() {
        let catalog = carousel_catalog();
        let state = CatalogState::from_query(
            &pairs(&[
                ("tag", "retro"),
                ("tag", "bold"),
                ("q", " Cafetera "),
                ("filters", "1"),
                ("item", "001.jpg"),
                ("slide", "2"),
            ]),
            &catalog,
        );
        assert_eq!(state.selected_tags(), ["retro", "bold"]);
        assert_eq!(state.search_text(), " Cafetera ");
        assert!(state.filters_open());
        assert_eq!(state.selected(), Some("001.jpg"));
        assert_eq!(state.carousel_index(), 2);
    }

    #[test]
    fn from_query_drops_unknown_item_and_bad_slide() {
        let catalog = carousel_catalog();
        let state = CatalogState::from_query(
            &pairs(&[("item", "999.jpg"), ("slide", "1")]),
            &catalog,
        );
        assert_eq!(state.selected(), None);
        assert_eq!(state.carousel_index(), 0);

        let state = CatalogState::from_query(
            &pairs(&[("item", "001.jpg"), ("slide", "7")]),
            &catalog,
        );
        assert_eq!(state.selected(), Some("001.jpg"));
        assert_eq!(state.carousel_index(), 0);

        let state = CatalogState::from_query(
            &pairs(&[("item", "001.jpg"), ("slide", "dos")]),
            &catalog,
        );
        assert_eq!(state.carousel_index(), 0);
    }

    #[test]
    fn from_query_ignores_empty_and_repeated_tags_and_unknown_keys() {
        let catalog = scenario_catalog();
        let state = CatalogState::from_query(
            &pairs(&[("tag", ""), ("tag", "retro"), ("tag", "retro"), ("utm", "x")]),
            &catalog,
        );
        assert_eq!(state.selected_tags(), ["retro"]);
    }

    #[test]
    fn query_round_trip_for_reachable_state() {
        let catalog = carousel_catalog();
        let state = CatalogState::default()
            .apply(Action::ToggleTag("retro".into()), &catalog)
            .apply(Action::SetSearchText("x".into()), &catalog)
            .apply(Action::Select("001.jpg".into()), &catalog)
            .apply(Action::CarouselPrev, &catalog);

        let decoded = CatalogState::from_query(&parse_query(&state.to_query()), &catalog);
        assert_eq!(decoded, state);
    }
}
