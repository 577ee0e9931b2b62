use crate::data::models::category::Category;
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

#[skip_serializing_none]
#[derive(Serialize, Deserialize)]
pub struct CategoryResponse {
    pub category_id: i32,
    pub category_name: String,
    pub parent_name: Option<String>,
}

impl From<(Category, Option<String>)> for CategoryResponse {
    fn from((category, parent_name): (Category, Option<String>)) -> Self {
        Self {
            category_id: category.category_id,
            category_name: category.category_name,
            parent_name,
        }
    }
}
