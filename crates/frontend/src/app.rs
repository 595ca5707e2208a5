use contracts::domain::a001_catalog_product::aggregate::CatalogProduct;

use crate::domain::a001_catalog_product::api::{load_catalog, LoadError};
use crate::domain::a001_catalog_product::ui::bindings::{attach_redirect_guard, mount_catalog};
use crate::domain::a001_catalog_product::ui::grid::render_load_error;
use crate::shared::config::{CatalogConfig, PRODUCTS_URL_ATTR};
use crate::shared::dom;

/// Entry point of the page script.
///
/// The catalog fetch starts right away; wiring waits for both the fetch and
/// the document. The navbar redirect guard does not depend on the fetch.
pub fn start() {
    let defaults = CatalogConfig::default();
    // The module script is deferred, so the grid usually exists already.
    let products_url = dom::element_by_id(defaults.grid_id)
        .and_then(|grid| grid.get_attribute(PRODUCTS_URL_ATTR));
    let config = defaults.with_products_url_override(products_url);

    let guard_config = config.clone();
    wasm_bindgen_futures::spawn_local(async move {
        dom::dom_ready().await;
        attach_redirect_guard(&guard_config);
    });

    wasm_bindgen_futures::spawn_local(run_catalog(config));
}

/// What to do with the page once both the load and the document are done
#[derive(Debug)]
pub enum CatalogStartup {
    /// Wire the catalog UI
    Mount(Vec<CatalogProduct>),
    /// Replace the grid with the error line; no handlers are wired
    ShowError(LoadError),
    /// The page has no grid container
    Skip,
}

pub fn plan_startup(
    loaded: Result<Vec<CatalogProduct>, LoadError>,
    has_grid: bool,
) -> CatalogStartup {
    match (has_grid, loaded) {
        (false, _) => CatalogStartup::Skip,
        (true, Ok(products)) => CatalogStartup::Mount(products),
        (true, Err(err)) => CatalogStartup::ShowError(err),
    }
}

async fn run_catalog(config: CatalogConfig) {
    let loaded = load_catalog(&config.products_url).await;
    dom::dom_ready().await;

    let grid = dom::element_by_id(config.grid_id);
    match (plan_startup(loaded, grid.is_some()), grid) {
        (CatalogStartup::Mount(products), Some(grid)) => mount_catalog(products, config, grid),
        (CatalogStartup::ShowError(err), Some(grid)) => {
            // The catalog stays inert until reload.
            log::error!("Failed loading {}: {}", config.products_url, err);
            render_load_error(&grid);
        }
        _ => log::debug!("No catalog grid on this page, skipping catalog UI"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_failure_shows_error_without_mounting() {
        let startup = plan_startup(Err(LoadError::Status(500)), true);
        assert!(matches!(startup, CatalogStartup::ShowError(LoadError::Status(500))));

        let startup = plan_startup(Err(LoadError::Transport("offline".into())), true);
        assert!(matches!(startup, CatalogStartup::ShowError(LoadError::Transport(_))));
    }

    #[test]
    fn test_loaded_catalog_is_mounted() {
        let products = vec![CatalogProduct::new("Red Mug", Some("home"))];
        match plan_startup(Ok(products), true) {
            CatalogStartup::Mount(products) => assert_eq!(products.len(), 1),
            other => panic!("expected Mount, got {:?}", other),
        }
        assert!(matches!(plan_startup(Ok(Vec::new()), true), CatalogStartup::Mount(_)));
    }

    #[test]
    fn test_page_without_grid_is_skipped() {
        assert!(matches!(plan_startup(Ok(Vec::new()), false), CatalogStartup::Skip));
        assert!(matches!(
            plan_startup(Err(LoadError::Status(404)), false),
            CatalogStartup::Skip
        ));
    }
}
