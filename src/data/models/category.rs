use crate::data::models::schema::*;
use diesel::prelude::*;

/// Two-level category tree as an adjacency list. A category with a
/// `parent_id` is a leaf; only leaves may hold products.
#[derive(Queryable, Selectable, Identifiable, PartialEq, Debug, Clone)]
#[diesel(table_name = categories)]
#[diesel(primary_key(category_id))]
#[diesel(check_for_backend(diesel::mysql::Mysql))]
pub struct Category {
    pub category_id: i32,
    pub category_name: String,
    pub parent_id: Option<i32>,
    pub created_at: Option<chrono::NaiveDateTime>,
    pub updated_at: Option<chrono::NaiveDateTime>,
}

impl Category {
    pub fn is_leaf(&self) -> bool {
        self.parent_id.is_some()
    }
}

#[derive(Insertable, PartialEq, Debug)]
#[diesel(table_name = categories)]
pub struct NewCategory<'a> {
    pub category_name: &'a str,
    pub parent_id: Option<i32>,
}
