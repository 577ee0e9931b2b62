use crate::data::models::product::{NewProduct, Product, UpdateProduct};
use crate::data::repos::acquire;
use crate::data::repos::traits::repository::Repository;
use async_trait::async_trait;
use bigdecimal::BigDecimal;
use diesel::prelude::*;
use diesel::result;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};
use std::str::FromStr;

/// Catalog search parameters. Everything is optional; the repo only ever
/// returns listings that are available and in stock.
#[derive(Debug, Default, Clone)]
pub struct ProductFilter {
    pub search: Option<String>,
    pub category_id: Option<i32>,
    pub condition: Option<String>,
    pub min_price: Option<BigDecimal>,
    pub max_price: Option<BigDecimal>,
    pub sort: SortKey,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    #[default]
    Newest,
    PriceLow,
    PriceHigh,
    Name,
}

impl FromStr for SortKey {
    type Err = ();
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "newest" => Ok(SortKey::Newest),
            "price_low" => Ok(SortKey::PriceLow),
            "price_high" => Ok(SortKey::PriceHigh),
            "name" => Ok(SortKey::Name),
            _ => Err(()),
        }
    }
}

/// A catalog row: the product plus its category name and the seller's
/// display name and city.
pub type CatalogRow = (Product, String, String, Option<String>);

pub struct ProductRepo {}

impl ProductRepo {
    pub fn new() -> Self {
        ProductRepo {}
    }

    /// Buyer-facing catalog query. Filters compose onto a boxed statement
    /// so unused parameters cost nothing.
    pub async fn search(
        &self,
        filter: ProductFilter,
    ) -> Result<Vec<CatalogRow>, result::Error> {
        use crate::data::models::schema::{categories, products, users};

        let mut conn = acquire().await?;

        let mut query = products::table
            .inner_join(categories::table)
            .inner_join(users::table)
            .filter(products::is_available.eq(true))
            .filter(products::stock_quantity.gt(0))
            .select((
                Product::as_select(),
                categories::category_name,
                users::full_name,
                users::city,
            ))
            .into_boxed();

        if let Some(term) = filter.search {
            let pattern = format!("%{}%", term);
            query = query.filter(
                products::name
                    .like(pattern.clone())
                    .nullable()
                    .or(products::brand.like(pattern.clone()).nullable())
                    .or(products::model.like(pattern.clone()))
                    .or(products::description.like(pattern)),
            );
        }
        if let Some(id) = filter.category_id {
            query = query.filter(products::category_id.eq(id));
        }
        if let Some(grade) = filter.condition {
            query = query.filter(products::condition.eq(grade));
        }
        if let Some(min) = filter.min_price {
            query = query.filter(products::price.ge(min));
        }
        if let Some(max) = filter.max_price {
            query = query.filter(products::price.le(max));
        }

        query = match filter.sort {
            SortKey::Newest => query.order(products::created_at.desc()),
            SortKey::PriceLow => query.order(products::price.asc()),
            SortKey::PriceHigh => query.order(products::price.desc()),
            SortKey::Name => query.order(products::name.asc()),
        };

        query.load::<CatalogRow>(&mut conn).await
    }

    /// Seller's own listings (including retired ones), newest first.
    pub async fn get_by_seller(
        &self,
        seller: i32,
    ) -> Result<Option<Vec<(Product, String)>>, result::Error> {
        use crate::data::models::schema::{categories, products};

        let mut conn = acquire().await?;

        match products::table
            .inner_join(categories::table)
            .filter(products::seller_id.eq(seller))
            .order(products::created_at.desc())
            .select((Product::as_select(), categories::category_name))
            .load::<(Product, String)>(&mut conn)
            .await
        {
            Ok(value) if value.is_empty() => Ok(None),
            Ok(value) => Ok(Some(value)),
            Err(result::Error::NotFound) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Number of order items referencing this product under orders that
    /// were not cancelled. Drives the soft-vs-hard retire branch.
    pub async fn count_active_order_refs(
        &self,
        product: i32,
    ) -> Result<i64, result::Error> {
        use crate::data::models::schema::{order_items, orders};

        let mut conn = acquire().await?;

        order_items::table
            .inner_join(orders::table)
            .filter(order_items::product_id.eq(product))
            .filter(orders::status.ne("cancelled"))
            .count()
            .get_result(&mut conn)
            .await
    }

    /// Inserts a listing and hands back its generated id.
    pub async fn create(&self, item: NewProduct<'_>) -> Result<i32, result::Error> {
        use crate::data::models::schema::products::dsl::products;

        let mut conn = acquire().await?;

        conn.transaction::<i32, result::Error, _>(|connection| {
            async move {
                diesel::insert_into(products)
                    .values(&item)
                    .execute(connection)
                    .await?;

                let new_id: i32 = diesel::select(diesel::dsl::sql::<
                    diesel::sql_types::Integer,
                >("LAST_INSERT_ID()"))
                .get_result(connection)
                .await?;

                Ok(new_id)
            }
            .scope_boxed()
        })
        .await
    }

    /// Soft retire: the row survives for order history, but the listing is
    /// pulled from the catalog and its stock zeroed.
    pub async fn retire(&self, product: i32) -> Result<(), result::Error> {
        use crate::data::models::schema::products::dsl::{
            is_available, product_id, products, stock_quantity,
        };

        let mut conn = acquire().await?;

        conn.transaction(|connection| {
            async move {
                diesel::update(products.filter(product_id.eq(product)))
                    .set((is_available.eq(false), stock_quantity.eq(0)))
                    .execute(connection)
                    .await?;
                Ok(())
            }
            .scope_boxed()
        })
        .await
    }
}

#[async_trait]
impl Repository for ProductRepo {
    type Id = i32;
    type Item = Product;
    type NewItem<'a> = NewProduct<'a>;
    type UpdateForm<'a> = UpdateProduct<'a>;

    async fn get_all(&self) -> Result<Option<Vec<Self::Item>>, result::Error> {
        use crate::data::models::schema::products::dsl::products;

        let mut conn = acquire().await?;

        match products.load::<Self::Item>(&mut conn).await {
            Ok(value) if value.is_empty() => Ok(None),
            Ok(value) => Ok(Some(value)),
            Err(result::Error::NotFound) => Ok(None),
            Err(e) => Err(e),
        }
    }

    async fn get_by_id(&self, id: Self::Id) -> Result<Option<Self::Item>, result::Error> {
        use crate::data::models::schema::products::dsl::{product_id, products};

        let mut conn = acquire().await?;

        match products
            .filter(product_id.eq(id))
            .first::<Self::Item>(&mut conn)
            .await
        {
            Ok(value) => Ok(Some(value)),
            Err(result::Error::NotFound) => Ok(None),
            Err(e) => Err(e),
        }
    }

    async fn add<'a>(&self, item: Self::NewItem<'a>) -> Result<(), result::Error> {
        use crate::data::models::schema::products::dsl::products;

        let mut conn = acquire().await?;

        conn.transaction(|connection| {
            async move {
                diesel::insert_into(products)
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
        use crate::data::models::schema::products::dsl::{product_id, products};

        let mut conn = acquire().await?;

        conn.transaction(|connection| {
            async move {
                diesel::update(products.filter(product_id.eq(id)))
                    .set(&item)
                    .execute(connection)
                    .await?;
                Ok(())
            }
            .scope_boxed()
        })
        .await
    }

    async fn delete(&self, id: Self::Id) -> Result<(), result::Error> {
        use crate::data::models::schema::products::dsl::{product_id, products};

        let mut conn = acquire().await?;

        conn.transaction(|connection| {
            async move {
                diesel::delete(products.filter(product_id.eq(id)))
                    .execute(connection)
                    .await?;
                Ok(())
            }
            .scope_boxed()
        })
        .await
    }
}

impl Default for ProductRepo {
    fn default() -> Self {
        Self::new()
    }
}
