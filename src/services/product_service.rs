use crate::data::models::product::{Condition, NewProduct, Product, UpdateProduct};
use crate::data::repos::implementors::category_repo::CategoryRepo;
use crate::data::repos::implementors::product_repo::ProductRepo;
use crate::data::repos::traits::repository::Repository;
use crate::security::identity::Identity;
use crate::services::errors::ProductServiceError;
use bigdecimal::BigDecimal;
use serde_json::json;

/// Seller's listing form. The free-form hardware fields end up in the
/// JSON specifications column; absent fields are omitted from the map.
#[derive(Debug, Clone)]
pub struct ProductInput {
    pub name: String,
    pub description: Option<String>,
    pub brand: String,
    pub model: Option<String>,
    pub color: Option<String>,
    pub condition: String,
    pub storage: Option<String>,
    pub ram: Option<String>,
    pub battery: Option<String>,
    pub screen: Option<String>,
    pub price: BigDecimal,
    pub stock_quantity: i32,
    pub category_id: i32,
    pub purchase_date: Option<chrono::NaiveDate>,
}

/// What happened to a retired listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetireOutcome {
    /// Order history references the product; it was marked unavailable
    /// and its stock zeroed, but the row survives.
    Retired,
    /// Nothing references it; the row is gone.
    Deleted,
}

pub struct ProductService;

impl ProductService {
    pub fn new() -> Self {
        ProductService
    }

    /// Creates a listing and returns its new id. Sellers only.
    pub async fn create_product(
        &self,
        identity: Identity,
        input: ProductInput,
    ) -> Result<i32, ProductServiceError> {
        if !identity.is_seller() {
            return Err(ProductServiceError::PermissionDenied);
        }
        let condition = self.validate(&input).await?;

        let repo = ProductRepo::new();
        let specifications = build_specifications(&input);

        let new_product = NewProduct {
            seller_id: identity.user_id,
            category_id: input.category_id,
            name: &input.name,
            description: input.description.as_deref(),
            brand: &input.brand,
            model: input.model.as_deref(),
            color: input.color.as_deref(),
            condition: condition.as_str(),
            specifications,
            price: input.price.clone(),
            stock_quantity: input.stock_quantity,
            purchase_date: input.purchase_date,
        };

        let product_id = repo.create(new_product).await.map_err(|e| {
            tracing::error!("product create failed: {}", e);
            ProductServiceError::DatabaseError
        })?;

        tracing::info!(product_id, seller = identity.user_id, "product listed");
        Ok(product_id)
    }

    /// Full-form update of an owned listing, including the availability
    /// toggle.
    pub async fn update_product(
        &self,
        identity: Identity,
        product_id: i32,
        input: ProductInput,
        is_available: bool,
    ) -> Result<(), ProductServiceError> {
        let repo = ProductRepo::new();
        self.owned_product(&repo, identity, product_id).await?;
        let condition = self.validate(&input).await?;

        let update = UpdateProduct {
            category_id: Some(input.category_id),
            name: Some(&input.name),
            description: input.description.as_deref(),
            brand: Some(&input.brand),
            model: input.model.as_deref(),
            color: input.color.as_deref(),
            condition: Some(condition.as_str()),
            specifications: build_specifications(&input),
            price: Some(input.price.clone()),
            stock_quantity: Some(input.stock_quantity),
            is_available: Some(is_available),
            purchase_date: input.purchase_date,
        };

        repo.update(product_id, update).await.map_err(|e| {
            tracing::error!("product update failed: {}", e);
            ProductServiceError::DatabaseError
        })?;

        tracing::info!(product_id, "product updated");
        Ok(())
    }

    /// Removes a listing. Products referenced by any non-cancelled order
    /// are retired in place so old receipts keep resolving; unreferenced
    /// ones are deleted outright.
    pub async fn retire_product(
        &self,
        identity: Identity,
        product_id: i32,
    ) -> Result<RetireOutcome, ProductServiceError> {
        let repo = ProductRepo::new();
        self.owned_product(&repo, identity, product_id).await?;

        let refs = repo
            .count_active_order_refs(product_id)
            .await
            .map_err(|_| ProductServiceError::DatabaseError)?;

        if refs > 0 {
            repo.retire(product_id)
                .await
                .map_err(|_| ProductServiceError::DatabaseError)?;
            tracing::info!(product_id, "product retired (kept for order history)");
            Ok(RetireOutcome::Retired)
        } else {
            repo.delete(product_id)
                .await
                .map_err(|_| ProductServiceError::DatabaseError)?;
            tracing::info!(product_id, "product deleted");
            Ok(RetireOutcome::Deleted)
        }
    }

    /// Seller's own listings with category names, retired ones included.
    pub async fn my_products(
        &self,
        identity: Identity,
    ) -> Result<Vec<(Product, String)>, ProductServiceError> {
        if !identity.is_seller() {
            return Err(ProductServiceError::PermissionDenied);
        }

        let repo = ProductRepo::new();
        Ok(repo
            .get_by_seller(identity.user_id)
            .await
            .map_err(|_| ProductServiceError::DatabaseError)?
            .unwrap_or_default())
    }

    /// Shared form validation. Runs before any write; a failure here
    /// means nothing was touched.
    async fn validate(&self, input: &ProductInput) -> Result<Condition, ProductServiceError> {
        if input.name.trim().is_empty() {
            return Err(ProductServiceError::MissingField("name"));
        }
        if input.brand.trim().is_empty() {
            return Err(ProductServiceError::MissingField("brand"));
        }
        if input.price <= BigDecimal::from(0) {
            return Err(ProductServiceError::InvalidPrice);
        }
        if input.stock_quantity < 0 {
            return Err(ProductServiceError::InvalidStock);
        }

        let condition: Condition = input
            .condition
            .parse()
            .map_err(|_| ProductServiceError::InvalidCondition)?;

        // Only leaf categories may hold products.
        let category_repo = CategoryRepo::new();
        let category = category_repo
            .get_by_id(input.category_id)
            .await
            .map_err(|_| ProductServiceError::DatabaseError)?
            .ok_or(ProductServiceError::InvalidCategory)?;
        if !category.is_leaf() {
            return Err(ProductServiceError::InvalidCategory);
        }

        Ok(condition)
    }

    async fn owned_product(
        &self,
        repo: &ProductRepo,
        identity: Identity,
        product_id: i32,
    ) -> Result<Product, ProductServiceError> {
        if !identity.is_seller() {
            return Err(ProductServiceError::PermissionDenied);
        }

        let product = repo
            .get_by_id(product_id)
            .await
            .map_err(|_| ProductServiceError::DatabaseError)?
            .ok_or(ProductServiceError::ProductNotFound)?;

        if product.seller_id != identity.user_id {
            return Err(ProductServiceError::PermissionDenied);
        }

        Ok(product)
    }
}

fn build_specifications(input: &ProductInput) -> Option<serde_json::Value> {
    let mut map = serde_json::Map::new();
    if let Some(storage) = &input.storage {
        map.insert("storage".into(), json!(storage));
    }
    if let Some(ram) = &input.ram {
        map.insert("ram".into(), json!(ram));
    }
    if let Some(battery) = &input.battery {
        map.insert("battery".into(), json!(battery));
    }
    if let Some(screen) = &input.screen {
        map.insert("screen".into(), json!(screen));
    }

    if map.is_empty() {
        None
    } else {
        Some(serde_json::Value::Object(map))
    }
}

impl Default for ProductService {
    fn default() -> Self {
        Self::new()
    }
}
