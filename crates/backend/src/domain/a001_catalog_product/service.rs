use contracts::domain::a001_catalog_product::aggregate::{parse_catalog, CatalogProduct};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Ошибки чтения файла каталога
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("failed to read catalog file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("catalog file {} is not a product list: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Read and validate the catalog file. Read on every request so edits to the
/// file show up on the next page load.
pub async fn load_products(path: &Path) -> Result<Vec<CatalogProduct>, CatalogError> {
    let contents = tokio::fs::read_to_string(path).await.map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            CatalogError::NotFound(path.to_path_buf())
        } else {
            CatalogError::Io {
                path: path.to_path_buf(),
                source: e,
            }
        }
    })?;

    parse_catalog(&contents).map_err(|e| CatalogError::Parse {
        path: path.to_path_buf(),
        source: e,
    })
}
