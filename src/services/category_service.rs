use crate::data::models::category::Category;
use crate::data::repos::implementors::category_repo::CategoryRepo;
use crate::services::errors::CatalogError;
use std::collections::HashMap;

pub struct CategoryService;

impl CategoryService {
    pub fn new() -> Self {
        CategoryService
    }

    /// Leaf categories paired with their parent's label, resolved through
    /// an adjacency lookup instead of assuming a fixed tree depth.
    pub async fn list_leaves(
        &self,
    ) -> Result<Vec<(Category, Option<String>)>, CatalogError> {
        let repo = CategoryRepo::new();

        let leaves = repo
            .get_leaves()
            .await
            .map_err(|_| CatalogError::DatabaseError)?
            .unwrap_or_default();
        let roots = repo
            .get_roots()
            .await
            .map_err(|_| CatalogError::DatabaseError)?
            .unwrap_or_default();

        let parents: HashMap<i32, String> = roots
            .into_iter()
            .map(|c| (c.category_id, c.category_name))
            .collect();

        Ok(leaves
            .into_iter()
            .map(|leaf| {
                let parent = leaf.parent_id.and_then(|id| parents.get(&id).cloned());
                (leaf, parent)
            })
            .collect())
    }
}

impl Default for CategoryService {
    fn default() -> Self {
        Self::new()
    }
}
