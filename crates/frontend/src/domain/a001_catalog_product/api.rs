//! Загрузка каталога товаров
//!
//! One GET of the catalog endpoint at startup. No retries: a failure leaves
//! the catalog inert until the page is reloaded.

use contracts::domain::a001_catalog_product::aggregate::CatalogProduct;
use gloo_net::http::Request;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("network error while loading the catalog: {0}")]
    Transport(String),

    #[error("catalog endpoint answered HTTP {0}")]
    Status(u16),

    #[error("catalog body is not a product list: {0}")]
    Decode(String),
}

pub async fn load_catalog(url: &str) -> Result<Vec<CatalogProduct>, LoadError> {
    log::debug!("Loading catalog from {}", url);

    let response = Request::get(url)
        .header("Accept", "application/json")
        .send()
        .await
        .map_err(|e| LoadError::Transport(e.to_string()))?;

    if !response.ok() {
        return Err(LoadError::Status(response.status()));
    }

    let products: Vec<CatalogProduct> = response
        .json()
        .await
        .map_err(|e| LoadError::Decode(e.to_string()))?;

    log::info!("Catalog loaded: {} products", products.len());
    Ok(products)
}
