use crate::data::models::category::{Category, NewCategory};
use crate::data::repos::acquire;
use crate::data::repos::traits::repository::Repository;
use async_trait::async_trait;
use diesel::prelude::*;
use diesel::result;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};

pub struct CategoryRepo {}

impl CategoryRepo {
    pub fn new() -> Self {
        CategoryRepo {}
    }

    /// Leaf categories (non-NULL parent), the only ones products attach to.
    pub async fn get_leaves(&self) -> Result<Option<Vec<Category>>, result::Error> {
        use crate::data::models::schema::categories::dsl::{
            categories, category_name, parent_id,
        };

        let mut conn = acquire().await?;

        match categories
            .filter(parent_id.is_not_null())
            .order(category_name.asc())
            .load::<Category>(&mut conn)
            .await
        {
            Ok(value) if value.is_empty() => Ok(None),
            Ok(value) => Ok(Some(value)),
            Err(result::Error::NotFound) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Top-level categories, used to resolve a leaf's parent label.
    pub async fn get_roots(&self) -> Result<Option<Vec<Category>>, result::Error> {
        use crate::data::models::schema::categories::dsl::{
            categories, category_name, parent_id,
        };

        let mut conn = acquire().await?;

        match categories
            .filter(parent_id.is_null())
            .order(category_name.asc())
            .load::<Category>(&mut conn)
            .await
        {
            Ok(value) if value.is_empty() => Ok(None),
            Ok(value) => Ok(Some(value)),
            Err(result::Error::NotFound) => Ok(None),
            Err(e) => Err(e),
        }
    }

    pub async fn get_by_name(&self, name: &str) -> Result<Option<Category>, result::Error> {
        use crate::data::models::schema::categories::dsl::{categories, category_name};

        let mut conn = acquire().await?;

        match categories
            .filter(category_name.eq(name))
            .first::<Category>(&mut conn)
            .await
        {
            Ok(value) => Ok(Some(value)),
            Err(result::Error::NotFound) => Ok(None),
            Err(e) => Err(e),
        }
    }
}

#[async_trait]
impl Repository for CategoryRepo {
    type Id = i32;
    type Item = Category;
    type NewItem<'a> = NewCategory<'a>;
    type UpdateForm<'a> = NewCategory<'a>;

    async fn get_all(&self) -> Result<Option<Vec<Self::Item>>, result::Error> {
        use crate::data::models::schema::categories::dsl::categories;

        let mut conn = acquire().await?;

        match categories.load::<Self::Item>(&mut conn).await {
            Ok(value) if value.is_empty() => Ok(None),
            Ok(value) => Ok(Some(value)),
            Err(result::Error::NotFound) => Ok(None),
            Err(e) => Err(e),
        }
    }

    async fn get_by_id(&self, id: Self::Id) -> Result<Option<Self::Item>, result::Error> {
        use crate::data::models::schema::categories::dsl::{categories, category_id};

        let mut conn = acquire().await?;

        match categories
            .filter(category_id.eq(id))
            .first::<Self::Item>(&mut conn)
            .await
        {
            Ok(value) => Ok(Some(value)),
            Err(result::Error::NotFound) => Ok(None),
            Err(e) => Err(e),
        }
    }

    async fn add<'a>(&self, item: Self::NewItem<'a>) -> Result<(), result::Error> {
        use crate::data::models::schema::categories::dsl::categories;

        let mut conn = acquire().await?;

        conn.transaction(|connection| {
            async move {
                diesel::insert_into(categories)
                    .values(&item)
                    .execute(connection)
                    .await?;
                Ok(())
            }
            .scope_boxed()
        })
        .await
    }

    async fn update<'a>(
        &self,
        id: Self::Id,
        item: Self::UpdateForm<'a>,
    ) -> Result<(), result::Error> {
        use crate::data::models::schema::categories::dsl::{
            categories, category_id, category_name, parent_id,
        };

        let mut conn = acquire().await?;

        conn.transaction(|connection| {
            async move {
                diesel::update(categories.filter(category_id.eq(id)))
                    .set((
                        category_name.eq(item.category_name),
                        parent_id.eq(item.parent_id),
                    ))
                    .execute(connection)
                    .await?;
                Ok(())
            }
            .scope_boxed()
        })
        .await
    }

    async fn delete(&self, id: Self::Id) -> Result<(), result::Error> {
        use crate::data::models::schema::categories::dsl::{categories, category_id};

        let mut conn = acquire().await?;

        conn.transaction(|connection| {
            async move {
                diesel::delete(categories.filter(category_id.eq(id)))
                    .execute(connection)
                    .await?;
                Ok(())
            }
            .scope_boxed()
        })
        .await
    }
}

impl Default for CategoryRepo {
    fn default() -> Self {
        Self::new()
    }
}
