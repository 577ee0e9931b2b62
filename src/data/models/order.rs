use crate::data::models::schema::*;
use crate::data::models::user::User;
use bigdecimal::BigDecimal;
use diesel::prelude::*;

#[derive(Queryable, Selectable, Identifiable, Associations, PartialEq, Debug, Clone)]
#[diesel(table_name = orders)]
#[diesel(primary_key(order_id))]
#[diesel(belongs_to(User, foreign_key = user_id))]
#[diesel(check_for_backend(diesel::mysql::Mysql))]
pub struct Order {
    pub order_id: i32,
    pub user_id: i32,
    pub total_amount: BigDecimal,
    pub status: String,
    pub payment_method: String,
    pub payment_status: String,
    pub notes: Option<String>,
    pub order_date: Option<chrono::NaiveDateTime>,
}

#[derive(Insertable, PartialEq, Debug)]
#[diesel(table_name = orders)]
pub struct NewOrder<'a> {
    pub user_id: i32,
    pub total_amount: BigDecimal,
    pub status: &'a str,
    pub payment_method: &'a str,
    pub notes: Option<&'a str>,
}

/// Lifecycle changeset. `total_amount` is deliberately absent: the grand
/// total is fixed at placement and never recomputed.
#[derive(AsChangeset, PartialEq, Debug)]
#[diesel(table_name = orders)]
pub struct UpdateOrder<'a> {
    pub status: Option<&'a str>,
    pub payment_status: Option<&'a str>,
    pub notes: Option<&'a str>,
}
