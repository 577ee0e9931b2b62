use crate::data::models::product::Product;
use crate::data::repos::implementors::product_repo::CatalogRow;
use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

/// Listing form shared by create and update; `is_available` only matters
/// on update (new listings always start available).
#[derive(Deserialize)]
pub struct ProductFormRequest {
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
    pub is_available: Option<bool>,
}

/// Catalog search parameters as they arrive on the query string.
#[derive(Deserialize, Default)]
pub struct CatalogQuery {
    pub search: Option<String>,
    pub category: Option<i32>,
    pub condition: Option<String>,
    pub min_price: Option<BigDecimal>,
    pub max_price: Option<BigDecimal>,
    pub sort: Option<String>,
}

#[skip_serializing_none]
#[derive(Serialize, Deserialize)]
pub struct ProductResponse {
    pub product_id: i32,
    pub name: String,
    pub description: Option<String>,
    pub brand: String,
    pub model: Option<String>,
    pub color: Option<String>,
    pub condition: String,
    pub specifications: Option<serde_json::Value>,
    pub price: BigDecimal,
    pub stock_quantity: i32,
    pub total_sales: i32,
    pub average_rating: Option<BigDecimal>,
    pub is_available: bool,
    pub category_name: String,
    pub seller_name: Option<String>,
    pub seller_city: Option<String>,
    pub listed_at: Option<String>,
}

impl From<CatalogRow> for ProductResponse {
    fn from((product, category_name, seller_name, seller_city): CatalogRow) -> Self {
        let mut response = ProductResponse::from((product, category_name));
        response.seller_name = Some(seller_name);
        response.seller_city = seller_city;
        response
    }
}

impl From<(Product, String)> for ProductResponse {
    fn from((product, category_name): (Product, String)) -> Self {
        Self {
            product_id: product.product_id,
            name: product.name,
            description: product.description,
            brand: product.brand,
            model: product.model,
            color: product.color,
            condition: product.condition,
            specifications: product.specifications,
            price: product.price,
            stock_quantity: product.stock_quantity,
            total_sales: product.total_sales,
            average_rating: product.average_rating,
            is_available: product.is_available,
            category_name,
            seller_name: None,
            seller_city: None,
            listed_at: product.created_at.map(|dt| dt.to_string()),
        }
    }
}
