use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::domain::a001_catalog_product::service::{self, CatalogError};
use crate::AppState;

impl IntoResponse for CatalogError {
    fn into_response(self) -> Response {
        let status = match &self {
            CatalogError::NotFound(_) => StatusCode::NOT_FOUND,
            CatalogError::Io { .. } | CatalogError::Parse { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        tracing::error!("{}", self);
        status.into_response()
    }
}

/// GET /data/products.json
pub async fn list_all(
    State(state): State<AppState>,
) -> Result<Json<Vec<contracts::domain::a001_catalog_product::aggregate::CatalogProduct>>, CatalogError>
{
    let products = service::load_products(&state.products_path).await?;
    tracing::debug!("Serving {} catalog products", products.len());
    Ok(Json(products))
}
