use crate::data::models::schema::*;
use crate::data::models::user::User;
use bigdecimal::BigDecimal;
use diesel::prelude::*;
use std::str::FromStr;

#[derive(Queryable, Selectable, Identifiable, Associations, PartialEq, Debug, Clone)]
#[diesel(table_name = products)]
#[diesel(primary_key(product_id))]
#[diesel(belongs_to(User, foreign_key = seller_id))]
#[diesel(check_for_backend(diesel::mysql::Mysql))]
pub struct Product {
    pub product_id: i32,
    pub seller_id: i32,
    pub category_id: i32,
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
    pub purchase_date: Option<chrono::NaiveDate>,
    pub created_at: Option<chrono::NaiveDateTime>,
    pub updated_at: Option<chrono::NaiveDateTime>,
}

#[derive(Insertable, PartialEq, Debug)]
#[diesel(table_name = products)]
pub struct NewProduct<'a> {
    pub seller_id: i32,
    pub category_id: i32,
    pub name: &'a str,
    pub description: Option<&'a str>,
    pub brand: &'a str,
    pub model: Option<&'a str>,
    pub color: Option<&'a str>,
    pub condition: &'a str,
    pub specifications: Option<serde_json::Value>,
    pub price: BigDecimal,
    pub stock_quantity: i32,
    pub purchase_date: Option<chrono::NaiveDate>,
}

#[derive(AsChangeset, PartialEq, Debug)]
#[diesel(table_name = products)]
pub struct UpdateProduct<'a> {
    pub category_id: Option<i32>,
    pub name: Option<&'a str>,
    pub description: Option<&'a str>,
    pub brand: Option<&'a str>,
    pub model: Option<&'a str>,
    pub color: Option<&'a str>,
    pub condition: Option<&'a str>,
    pub specifications: Option<serde_json::Value>,
    pub price: Option<BigDecimal>,
    pub stock_quantity: Option<i32>,
    pub is_available: Option<bool>,
    pub purchase_date: Option<chrono::NaiveDate>,
}

/// Wear grade of a second-hand listing, also the discount-pricing input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Condition {
    New,
    LikeNew,
    Good,
    Fair,
    Poor,
}

impl Condition {
    pub fn as_str(&self) -> &'static str {
        match self {
            Condition::New => "new",
            Condition::LikeNew => "like_new",
            Condition::Good => "good",
            Condition::Fair => "fair",
            Condition::Poor => "poor",
        }
    }
}

impl FromStr for Condition {
    type Err = ();
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "new" => Ok(Condition::New),
            "like_new" => Ok(Condition::LikeNew),
            "good" => Ok(Condition::Good),
            "fair" => Ok(Condition::Fair),
            "poor" => Ok(Condition::Poor),
            _ => Err(()),
        }
    }
}
