//! Catalog page configuration
//!
//! Names of the DOM elements the catalog attaches to and the few constants
//! that tune its behavior. The surrounding page supplies the markup.

/// Default catalog endpoint
pub const PRODUCTS_URL: &str = "/data/products.json";

/// Page that hosts the full catalog UI
pub const CATALOG_PAGE: &str = "shop.html";

/// Quiet period for the live search inputs
pub const SEARCH_DEBOUNCE_MS: u32 = 220;

/// Attribute on the grid container that overrides [`PRODUCTS_URL`]
pub const PRODUCTS_URL_ATTR: &str = "data-products-url";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogConfig {
    pub products_url: String,
    pub catalog_page: String,
    pub debounce_ms: u32,
    pub grid_id: &'static str,
    pub empty_state_id: &'static str,
    pub page_search_id: &'static str,
    pub global_search_id: &'static str,
    pub tab_selector: &'static str,
    pub tab_category_attr: &'static str,
    pub active_tab_class: &'static str,
    pub hidden_class: &'static str,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            products_url: PRODUCTS_URL.to_string(),
            catalog_page: CATALOG_PAGE.to_string(),
            debounce_ms: SEARCH_DEBOUNCE_MS,
            grid_id: "grid",
            empty_state_id: "emptyState",
            page_search_id: "mobileSearch",
            global_search_id: "globalSearch",
            tab_selector: ".tab-btn",
            tab_category_attr: "data-cat",
            active_tab_class: "bg-gray-200",
            hidden_class: "hidden",
        }
    }
}

impl CatalogConfig {
    /// Apply the endpoint override read from the grid container, if any
    pub fn with_products_url_override(mut self, value: Option<String>) -> Self {
        if let Some(url) = value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty()) {
            self.products_url = url;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CatalogConfig::default();
        assert_eq!(config.products_url, "/data/products.json");
        assert_eq!(config.catalog_page, "shop.html");
        assert_eq!(config.debounce_ms, 220);
    }

    #[test]
    fn test_products_url_override() {
        let config = CatalogConfig::default().with_products_url_override(Some(" /api/items.json ".into()));
        assert_eq!(config.products_url, "/api/items.json");

        let config = CatalogConfig::default().with_products_url_override(Some("  ".into()));
        assert_eq!(config.products_url, PRODUCTS_URL);

        let config = CatalogConfig::default().with_products_url_override(None);
        assert_eq!(config.products_url, PRODUCTS_URL);
    }
}
