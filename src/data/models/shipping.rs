use crate::data::models::order::Order;
use crate::data::models::schema::*;
use bigdecimal::BigDecimal;
use diesel::prelude::*;

#[derive(Queryable, Selectable, Identifiable, Associations, PartialEq, Debug, Clone)]
#[diesel(table_name = shipping)]
#[diesel(primary_key(shipping_id))]
#[diesel(belongs_to(Order, foreign_key = order_id))]
#[diesel(check_for_backend(diesel::mysql::Mysql))]
pub struct Shipping {
    pub shipping_id: i32,
    pub order_id: i32,
    pub shipping_address: String,
    pub phone: String,
    pub status: String,
    pub shipping_cost: BigDecimal,
    pub tracking_number: Option<String>,
    pub estimated_delivery: Option<chrono::NaiveDate>,
    pub actual_delivery: Option<chrono::NaiveDate>,
    pub created_at: Option<chrono::NaiveDateTime>,
    pub updated_at: Option<chrono::NaiveDateTime>,
}

#[derive(Insertable, PartialEq, Debug)]
#[diesel(table_name = shipping)]
pub struct NewShipping<'a> {
    pub order_id: i32,
    pub shipping_address: &'a str,
    pub phone: &'a str,
    pub status: &'a str,
    pub shipping_cost: BigDecimal,
}
