//! Filter state <-> URL query string
//!
//! `q` holds the search text (`search` is accepted as an alias when reading),
//! `cat` holds the category. Parameters at their default value are omitted, so
//! the URL of an unfiltered catalog is just the page path.

use contracts::shared::catalog_filter::{FilterState, ALL_CATEGORIES};
use serde::Serialize;
use std::collections::HashMap;
use web_sys::window;

#[derive(Debug, Default, Serialize)]
struct CatalogQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    q: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    cat: Option<String>,
}

/// Filter parameters as found in the URL, before normalization
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterParams {
    /// Raw search text, used to prefill the inputs
    pub query: String,
    pub category: String,
}

impl Default for FilterParams {
    fn default() -> Self {
        Self {
            query: String::new(),
            category: ALL_CATEGORIES.to_string(),
        }
    }
}

impl FilterParams {
    pub fn to_state(&self) -> FilterState {
        FilterState::new(&self.query, &self.category)
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// Percent-decode one key or value; `+` is a space. `None` for invalid UTF-8.
fn decode_component(raw: &str) -> Option<String> {
    urlencoding::decode(&raw.replace('+', " "))
        .ok()
        .map(|v| v.into_owned())
}

/// First value of every key. A value that fails to decode is kept as `None`
/// so it only resets its own parameter.
fn first_values(raw: &str) -> HashMap<String, Option<String>> {
    let mut values = HashMap::new();
    for pair in raw.split('&').filter(|p| !p.is_empty()) {
        let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
        let Some(key) = decode_component(key) else {
            continue;
        };
        if values.contains_key(&key) {
            continue;
        }
        let decoded = decode_component(value);
        if decoded.is_none() {
            log::warn!("Ignoring undecodable value of '{}' in query string", key);
        }
        values.insert(key, decoded);
    }
    values
}

/// Parse `location.search` (leading `?` optional)
pub fn parse_filter_params(search: &str) -> FilterParams {
    let raw = search.trim_start_matches('?');
    if raw.is_empty() {
        return FilterParams::default();
    }

    let mut values = first_values(raw);
    let mut take = |key: &str| non_empty(values.remove(key).flatten());

    let query = take("q").or_else(|| take("search")).unwrap_or_default();
    let category = take("cat").unwrap_or_else(|| ALL_CATEGORIES.to_string());
    FilterParams { query, category }
}

/// Query string (without `?`) for a filter state; empty when nothing is filtered
pub fn build_query(state: &FilterState) -> String {
    let query = CatalogQuery {
        q: state.has_text_filter().then(|| state.query().to_string()),
        cat: state
            .has_category_filter()
            .then(|| state.category().to_string()),
    };
    serde_qs::to_string(&query).unwrap_or_default()
}

/// Same path, new query string
pub fn state_url(pathname: &str, state: &FilterState) -> String {
    let query = build_query(state);
    if query.is_empty() {
        pathname.to_string()
    } else {
        format!("{}?{}", pathname, query)
    }
}

/// Link to the catalog page with the search text applied
pub fn catalog_redirect_url(catalog_page: &str, text: &str) -> String {
    format!("{}?q={}", catalog_page, urlencoding::encode(text.trim()))
}

// ============================================================================
// Browser side
// ============================================================================

pub fn current_pathname() -> String {
    window()
        .and_then(|w| w.location().pathname().ok())
        .unwrap_or_default()
}

/// Filter parameters of the page URL; does not touch history
pub fn read_initial_state() -> FilterParams {
    let search = window()
        .and_then(|w| w.location().search().ok())
        .unwrap_or_default();
    parse_filter_params(&search)
}

/// Replace the current history entry with the URL of `state`.
/// No navigation, no new history entry.
pub fn write_state(state: &FilterState) {
    let Some(w) = window() else {
        return;
    };
    let location = w.location();
    let pathname = location.pathname().unwrap_or_default();
    let new_url = state_url(&pathname, state);

    let current_url = format!("{}{}", pathname, location.search().unwrap_or_default());
    if current_url == new_url {
        return;
    }

    match w.history() {
        Ok(history) => {
            if let Err(e) =
                history.replace_state_with_url(&wasm_bindgen::JsValue::NULL, "", Some(&new_url))
            {
                log::warn!("history.replaceState failed: {:?}", e);
            }
        }
        Err(e) => log::warn!("history is not available: {:?}", e),
    }
}

/// Full page navigation
pub fn navigate_to(url: &str) {
    log::debug!("Navigating to {}", url);
    if let Some(w) = window() {
        if let Err(e) = w.location().set_href(url) {
            log::error!("Navigation to {} failed: {:?}", url, e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_empty_search() {
        assert_eq!(parse_filter_params(""), FilterParams::default());
        assert_eq!(parse_filter_params("?"), FilterParams::default());
    }

    #[test]
    fn test_parse_q_and_cat() {
        let params = parse_filter_params("?q=red&cat=apparel");
        assert_eq!(params.query, "red");
        assert_eq!(params.category, "apparel");
    }

    #[test]
    fn test_search_alias() {
        assert_eq!(parse_filter_params("search=mug").query, "mug");
        assert_eq!(parse_filter_params("q=cup&search=mug").query, "cup");
        assert_eq!(parse_filter_params("q=&search=mug").query, "mug");
    }

    #[test]
    fn test_percent_decoding() {
        assert_eq!(parse_filter_params("?q=red%20shirt").query, "red shirt");
    }

    #[test]
    fn test_plus_is_a_space() {
        assert_eq!(parse_filter_params("?q=red+shirt").query, "red shirt");
    }

    #[test]
    fn test_repeated_key_keeps_first_value() {
        let params = parse_filter_params("?q=a&q=b&cat=home");
        assert_eq!(params.query, "a");
        assert_eq!(params.category, "home");
    }

    #[test]
    fn test_bad_value_only_resets_its_own_param() {
        let params = parse_filter_params("?q=%FF&cat=home");
        assert_eq!(params.query, "");
        assert_eq!(params.category, "home");

        let params = parse_filter_params("?q=%FF&search=mug&cat=%FE");
        assert_eq!(params.query, "mug");
        assert_eq!(params.category, ALL_CATEGORIES);
    }

    #[test]
    fn test_missing_or_empty_cat_defaults_to_all() {
        assert_eq!(parse_filter_params("?q=red").category, ALL_CATEGORIES);
        assert_eq!(parse_filter_params("?cat=").category, ALL_CATEGORIES);
    }

    #[test]
    fn test_unknown_params_are_ignored() {
        let params = parse_filter_params("?utm_source=mail&cat=home");
        assert_eq!(params.category, "home");
        assert_eq!(params.query, "");
    }

    #[test]
    fn test_build_query_omits_defaults() {
        assert_eq!(build_query(&FilterState::default()), "");
        assert_eq!(build_query(&FilterState::new("Red", "all")), "q=red");
        assert_eq!(build_query(&FilterState::new("", "home")), "cat=home");
        assert_eq!(build_query(&FilterState::new("red", "apparel")), "q=red&cat=apparel");
    }

    #[test]
    fn test_state_url() {
        assert_eq!(state_url("/shop.html", &FilterState::default()), "/shop.html");
        assert_eq!(
            state_url("/shop.html", &FilterState::new("mug", "home")),
            "/shop.html?q=mug&cat=home"
        );
    }

    #[test]
    fn test_write_then_read_round_trip() {
        let cases = [
            FilterState::new("red shirt", "apparel"),
            FilterState::new("", "home"),
            FilterState::new("mug & cup", "all"),
            FilterState::default(),
        ];
        for state in cases {
            let restored = parse_filter_params(&build_query(&state)).to_state();
            assert_eq!(restored, state);
        }
    }

    #[test]
    fn test_redirect_url_encodes_text() {
        assert_eq!(catalog_redirect_url("shop.html", "  mug  "), "shop.html?q=mug");
        assert_eq!(
            catalog_redirect_url("shop.html", "red & blue"),
            "shop.html?q=red%20%26%20blue"
        );
        let url = catalog_redirect_url("shop.html", "red & blue");
        let search = url.split_once('?').map(|(_, s)| s).unwrap();
        assert_eq!(parse_filter_params(search).query, "red & blue");
    }
}
