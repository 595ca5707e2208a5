//! Catalog filtering by free-text query and category tab.
//!
//! The filter is a pure function over the loaded product list: it never
//! reorders, only drops products that fail either condition.

use crate::domain::a001_catalog_product::aggregate::CatalogProduct;

/// Sentinel category meaning "no category filter"
pub const ALL_CATEGORIES: &str = "all";

/// Текущее состояние фильтра (запрос + категория)
///
/// Always normalized: the query is trimmed and lower-cased, an empty category
/// becomes [`ALL_CATEGORIES`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterState {
    query: String,
    category: String,
}

impl FilterState {
    pub fn new(query: &str, category: &str) -> Self {
        let category = if category.is_empty() {
            ALL_CATEGORIES.to_string()
        } else {
            category.to_string()
        };
        Self {
            query: query.trim().to_lowercase(),
            category,
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn has_text_filter(&self) -> bool {
        !self.query.is_empty()
    }

    pub fn has_category_filter(&self) -> bool {
        self.category != ALL_CATEGORIES
    }

    /// Same category, new query text
    pub fn with_query(&self, query: &str) -> Self {
        Self::new(query, &self.category)
    }
}

impl Default for FilterState {
    fn default() -> Self {
        Self::new("", ALL_CATEGORIES)
    }
}

/// Trait для типов данных, поддерживающих поиск по каталогу
pub trait Searchable {
    /// `query` is already normalized (lower-case, trimmed, non-empty)
    fn matches_query(&self, query: &str) -> bool;

    fn in_category(&self, category: &str) -> bool;
}

impl Searchable for CatalogProduct {
    fn matches_query(&self, query: &str) -> bool {
        let contains = |field: Option<&str>| {
            field.map_or(false, |v| v.to_lowercase().contains(query))
        };

        self.name.to_lowercase().contains(query)
            || contains(self.short.as_deref())
            || contains(self.category.as_deref())
    }

    fn in_category(&self, category: &str) -> bool {
        self.category.as_deref() == Some(category)
    }
}

/// Return the products matching `state`, preserving their original order.
pub fn filter_products<'a, T: Searchable>(products: &'a [T], state: &FilterState) -> Vec<&'a T> {
    products
        .iter()
        .filter(|p| !state.has_category_filter() || p.in_category(state.category()))
        .filter(|p| !state.has_text_filter() || p.matches_query(state.query()))
        .collect()
}
