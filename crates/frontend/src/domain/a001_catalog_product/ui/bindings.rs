//! DOM bindings of the catalog page
//!
//! Looks up the elements the page provides, feeds their events into the
//! [`CatalogController`] and carries out the returned commands.

use std::cell::RefCell;
use std::rc::Rc;

use contracts::domain::a001_catalog_product::aggregate::CatalogProduct;
use leptos::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlInputElement};

use super::controller::{
    redirect_for_enter, CatalogCommand, CatalogController, CatalogEvent, Mirror, PageKind,
};
use super::grid::CatalogGrid;
use crate::shared::config::CatalogConfig;
use crate::shared::debounce::Debouncer;
use crate::shared::dom;
use crate::shared::url_state;

/// Elements of the catalog page. Only the grid is mandatory.
pub struct CatalogElements {
    pub grid: Element,
    pub empty_state: Option<Element>,
    pub tabs: Vec<Element>,
    pub page_search: Option<HtmlInputElement>,
    pub global_search: Option<HtmlInputElement>,
}

impl CatalogElements {
    pub fn find(config: &CatalogConfig, grid: Element) -> Self {
        Self {
            grid,
            empty_state: dom::element_by_id(config.empty_state_id),
            tabs: dom::query_all(config.tab_selector),
            page_search: dom::input_by_id(config.page_search_id),
            global_search: dom::input_by_id(config.global_search_id),
        }
    }
}

struct CatalogUi {
    controller: RefCell<CatalogController>,
    matches: RwSignal<Vec<CatalogProduct>>,
    tabs: Vec<Element>,
    page_search: Option<HtmlInputElement>,
    global_search: Option<HtmlInputElement>,
    config: CatalogConfig,
}

impl CatalogUi {
    fn dispatch(&self, event: CatalogEvent) {
        let command = self.controller.borrow_mut().handle(event);
        self.execute(command);
    }

    fn execute(&self, command: CatalogCommand) {
        match command {
            CatalogCommand::Apply(outcome) => {
                if let Some(category) = &outcome.active_tab {
                    self.activate_tab(category);
                }
                match &outcome.mirror {
                    Some(Mirror::PageSearch(text)) => set_input(&self.page_search, text),
                    Some(Mirror::GlobalSearch(text)) => set_input(&self.global_search, text),
                    None => {}
                }
                self.matches.set(outcome.matches);
                url_state::write_state(&outcome.state);
            }
            CatalogCommand::Navigate(url) => url_state::navigate_to(&url),
            CatalogCommand::Ignore => {}
        }
    }

    fn tab_category(&self, tab: &Element) -> Option<String> {
        tab.get_attribute(self.config.tab_category_attr)
    }

    fn activate_tab(&self, category: &str) {
        let class = self.config.active_tab_class;
        for tab in &self.tabs {
            let classes = tab.class_list();
            let result = if self.tab_category(tab).as_deref() == Some(category) {
                classes.add_1(class)
            } else {
                classes.remove_1(class)
            };
            if let Err(e) = result {
                log::warn!("Failed to toggle tab class: {:?}", e);
            }
        }
    }

    /// Текущее значение поиска для клика по вкладке
    fn search_text(&self) -> String {
        self.page_search
            .as_ref()
            .or(self.global_search.as_ref())
            .map(|input| input.value())
            .unwrap_or_default()
    }
}

fn set_input(input: &Option<HtmlInputElement>, value: &str) {
    if let Some(input) = input {
        if input.value() != value {
            input.set_value(value);
        }
    }
}

fn input_value(event: &web_sys::Event) -> Option<String> {
    event
        .target()
        .and_then(|t| t.dyn_into::<HtmlInputElement>().ok())
        .map(|input| input.value())
}

fn wire(ui: &Rc<CatalogUi>) {
    for tab in &ui.tabs {
        let Some(category) = ui.tab_category(tab) else {
            continue;
        };
        let ui = ui.clone();
        dom::listen(tab, "click", move |_| {
            ui.dispatch(CatalogEvent::TabClicked {
                category: category.clone(),
                search_text: ui.search_text(),
            });
        });
    }

    if let Some(input) = &ui.page_search {
        let debouncer = Rc::new(Debouncer::browser(ui.config.debounce_ms));
        let ui = ui.clone();
        dom::listen(input, "input", move |event| {
            let Some(text) = input_value(&event) else {
                return;
            };
            let ui = ui.clone();
            debouncer.trigger(move || ui.dispatch(CatalogEvent::PageSearchInput(text)));
        });
    }

    if let Some(input) = &ui.global_search {
        let debouncer = Rc::new(Debouncer::browser(ui.config.debounce_ms));
        let input_ui = ui.clone();
        dom::listen(input, "input", move |event| {
            let Some(text) = input_value(&event) else {
                return;
            };
            let ui = input_ui.clone();
            debouncer.trigger(move || ui.dispatch(CatalogEvent::GlobalSearchInput(text)));
        });

        // Off the catalog page Enter belongs to the redirect guard.
        if ui.controller.borrow().page() == PageKind::Catalog {
            let ui = ui.clone();
            dom::listen(input, "keydown", move |event| {
                if dom::event_key(&event).as_deref() != Some("Enter") {
                    return;
                }
                if let Some(text) = input_value(&event) {
                    ui.dispatch(CatalogEvent::GlobalSearchEnter(text));
                }
            });
        }
    }
}

/// Start the catalog UI on `grid` with the loaded products.
///
/// Reads the initial filter from the URL, marks the active tab, fills both
/// search inputs and renders the first result before wiring any handler.
pub fn mount_catalog(products: Vec<CatalogProduct>, config: CatalogConfig, grid: Element) {
    let elements = CatalogElements::find(&config, grid);
    let page = PageKind::detect(&url_state::current_pathname(), &config.catalog_page);
    let params = url_state::read_initial_state();

    let tab_categories: Vec<String> = elements
        .tabs
        .iter()
        .filter_map(|t| t.get_attribute(config.tab_category_attr))
        .collect();

    let (controller, plan) =
        CatalogController::start(products, &params, page, &config.catalog_page, &tab_categories);
    log::info!(
        "Catalog ready: {} products, initial q='{}' cat='{}'",
        controller.product_count(),
        plan.outcome.state.query(),
        plan.outcome.state.category()
    );

    let grid_element = match elements.grid.clone().dyn_into::<web_sys::HtmlElement>() {
        Ok(el) => el,
        Err(_) => {
            log::error!("Catalog grid '{}' is not an HTML element", config.grid_id);
            return;
        }
    };
    grid_element.set_inner_html("");

    let CatalogElements {
        grid,
        empty_state,
        tabs,
        page_search,
        global_search,
    } = elements;
    let hidden_class = config.hidden_class;

    leptos::mount::mount_to(grid_element, move || {
        let matches = RwSignal::new(Vec::new());
        let ui = Rc::new(CatalogUi {
            controller: RefCell::new(controller),
            matches,
            tabs,
            page_search,
            global_search,
            config,
        });

        if let Some(category) = &plan.active_tab {
            ui.activate_tab(category);
        }
        set_input(&ui.page_search, &plan.prefill);
        set_input(&ui.global_search, &plan.prefill);
        ui.execute(CatalogCommand::Apply(plan.outcome));
        wire(&ui);

        view! {
            <CatalogGrid
                matches=matches
                grid=grid
                empty_state=empty_state
                hidden_class=hidden_class
            />
        }
    })
    .forget();
}

/// Enter in the navbar search on any page other than the catalog redirects to
/// the catalog with the typed query. Works whether or not the catalog loaded.
pub fn attach_redirect_guard(config: &CatalogConfig) {
    let Some(input) = dom::input_by_id(config.global_search_id) else {
        return;
    };

    // Prefill from ?q= / ?search= on every page.
    let params = url_state::read_initial_state();
    if !params.query.is_empty() {
        input.set_value(&params.query);
    }

    let page = PageKind::detect(&url_state::current_pathname(), &config.catalog_page);
    let catalog_page = config.catalog_page.clone();
    dom::listen(&input, "keydown", move |event| {
        if dom::event_key(&event).as_deref() != Some("Enter") {
            return;
        }
        let text = input_value(&event).unwrap_or_default();
        if let Some(url) = redirect_for_enter(page, &catalog_page, &text) {
            url_state::navigate_to(&url);
        }
    });
}
