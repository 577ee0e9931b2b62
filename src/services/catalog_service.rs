use crate::data::repos::implementors::product_repo::{CatalogRow, ProductFilter, ProductRepo};
use crate::services::errors::CatalogError;

/// Stateless buyer-facing browse/search over available listings.
pub struct CatalogService;

impl CatalogService {
    pub fn new() -> Self {
        CatalogService
    }

    /// Matching products joined with category name and seller name/city.
    /// Hidden and out-of-stock listings never appear, whatever the filter.
    pub async fn browse(&self, filter: ProductFilter) -> Result<Vec<CatalogRow>, CatalogError> {
        let repo = ProductRepo::new();

        repo.search(filter).await.map_err(|e| {
            tracing::error!("catalog search failed: {}", e);
            CatalogError::DatabaseError
        })
    }
}

impl Default for CatalogService {
    fn default() -> Self {
        Self::new()
    }
}
