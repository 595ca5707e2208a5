//! Catalog UI controller
//!
//! Every user interaction is turned into a [`CatalogEvent`] and handed to
//! [`CatalogController::handle`], which updates the filter state and answers
//! with the [`CatalogCommand`] the DOM bindings must carry out. Nothing here
//! touches the DOM.

use contracts::domain::a001_catalog_product::aggregate::CatalogProduct;
use contracts::shared::catalog_filter::{filter_products, FilterState, ALL_CATEGORIES};

use crate::shared::url_state::{catalog_redirect_url, FilterParams};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageKind {
    Catalog,
    Other,
}

impl PageKind {
    pub fn detect(pathname: &str, catalog_page: &str) -> Self {
        if pathname.ends_with(catalog_page) {
            PageKind::Catalog
        } else {
            PageKind::Other
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogEvent {
    /// Click on a category tab; `search_text` is the current search input value
    TabClicked {
        category: String,
        search_text: String,
    },
    /// Debounced input in the in-page search field
    PageSearchInput(String),
    /// Debounced input in the navbar search field
    GlobalSearchInput(String),
    /// Enter pressed in the navbar search field
    GlobalSearchEnter(String),
}

/// Input field that must receive the typed value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mirror {
    PageSearch(String),
    GlobalSearch(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct FilterOutcome {
    pub state: FilterState,
    pub matches: Vec<CatalogProduct>,
    /// Tab to mark active, when the interaction changed it
    pub active_tab: Option<String>,
    pub mirror: Option<Mirror>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CatalogCommand {
    /// Render matches, then sync the URL
    Apply(FilterOutcome),
    Navigate(String),
    Ignore,
}

/// What the page looks like right after the catalog is loaded
#[derive(Debug, Clone, PartialEq)]
pub struct StartupPlan {
    pub active_tab: Option<String>,
    pub prefill: String,
    pub outcome: FilterOutcome,
}

pub struct CatalogController {
    products: Vec<CatalogProduct>,
    state: FilterState,
    page: PageKind,
    catalog_page: String,
}

impl CatalogController {
    /// Build the controller from the loaded catalog and the URL parameters.
    /// `tabs` are the categories carried by the tab buttons on the page.
    pub fn start(
        products: Vec<CatalogProduct>,
        params: &FilterParams,
        page: PageKind,
        catalog_page: &str,
        tabs: &[String],
    ) -> (Self, StartupPlan) {
        let mut controller = Self {
            products,
            state: FilterState::default(),
            page,
            catalog_page: catalog_page.to_string(),
        };

        let active_tab = if tabs.iter().any(|t| *t == params.category) {
            Some(params.category.clone())
        } else if tabs.iter().any(|t| t == ALL_CATEGORIES) {
            Some(ALL_CATEGORIES.to_string())
        } else {
            None
        };

        // The URL category drives the first filter even when no tab carries it.
        let outcome = controller.apply(params.to_state(), None, None);

        let plan = StartupPlan {
            active_tab,
            prefill: params.query.clone(),
            outcome,
        };
        (controller, plan)
    }

    pub fn state(&self) -> &FilterState {
        &self.state
    }

    pub fn page(&self) -> PageKind {
        self.page
    }

    pub fn product_count(&self) -> usize {
        self.products.len()
    }

    pub fn handle(&mut self, event: CatalogEvent) -> CatalogCommand {
        match event {
            CatalogEvent::TabClicked {
                category,
                search_text,
            } => {
                let state = FilterState::new(&search_text, &category);
                CatalogCommand::Apply(self.apply(state, Some(category), None))
            }
            CatalogEvent::PageSearchInput(text) => {
                let state = self.state.with_query(&text);
                CatalogCommand::Apply(self.apply(state, None, Some(Mirror::GlobalSearch(text))))
            }
            CatalogEvent::GlobalSearchInput(text) => match self.page {
                // Off the catalog page only Enter navigates.
                PageKind::Other => CatalogCommand::Ignore,
                PageKind::Catalog => {
                    let state = self.state.with_query(&text);
                    CatalogCommand::Apply(self.apply(
                        state,
                        None,
                        Some(Mirror::PageSearch(text)),
                    ))
                }
            },
            CatalogEvent::GlobalSearchEnter(text) => {
                match redirect_for_enter(self.page, &self.catalog_page, &text) {
                    Some(url) => CatalogCommand::Navigate(url),
                    None => {
                        let state = self.state.with_query(text.trim());
                        CatalogCommand::Apply(self.apply(state, None, None))
                    }
                }
            }
        }
    }

    fn apply(
        &mut self,
        state: FilterState,
        active_tab: Option<String>,
        mirror: Option<Mirror>,
    ) -> FilterOutcome {
        let matches: Vec<CatalogProduct> = filter_products(&self.products, &state)
            .into_iter()
            .cloned()
            .collect();
        log::debug!(
            "Filter q='{}' cat='{}': {} of {}",
            state.query(),
            state.category(),
            matches.len(),
            self.products.len()
        );
        self.state = state.clone();
        FilterOutcome {
            state,
            matches,
            active_tab,
            mirror,
        }
    }
}

/// Navigation for Enter in the navbar search on a page without the catalog
/// UI. `None` on the catalog page itself.
pub fn redirect_for_enter(page: PageKind, catalog_page: &str, text: &str) -> Option<String> {
    match page {
        PageKind::Other => Some(catalog_redirect_url(catalog_page, text)),
        PageKind::Catalog => None,
    }
}
