use crate::data::models::order::{NewOrder, Order, UpdateOrder};
use crate::data::models::order_item::{NewOrderItem, OrderItem};
use crate::data::models::product::Product;
use crate::data::models::shipping::{NewShipping, Shipping};
use crate::data::repos::acquire;
use crate::data::repos::traits::repository::Repository;
use async_trait::async_trait;
use bigdecimal::BigDecimal;
use diesel::prelude::*;
use diesel::result;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};

pub struct OrderRepo {}

impl OrderRepo {
    pub fn new() -> Self {
        OrderRepo {}
    }

    /// Places an order as a single transaction: the order row, its line
    /// item, the guarded stock decrement and the shipping record all land
    /// together or not at all.
    ///
    /// The decrement only matches rows still holding enough stock, so two
    /// concurrent checkouts of the last unit cannot both succeed; the
    /// loser's transaction is rolled back and `Ok(None)` is returned.
    #[allow(clippy::too_many_arguments)]
    pub async fn place_order(
        &self,
        new_order: NewOrder<'_>,
        product: i32,
        quantity: i32,
        unit_price: BigDecimal,
        shipping_address: &str,
        phone: &str,
        shipping_cost: BigDecimal,
    ) -> Result<Option<i32>, result::Error> {
        use crate::data::models::schema::order_items::dsl::order_items;
        use crate::data::models::schema::orders::dsl::orders;
        use crate::data::models::schema::products::dsl::{
            product_id as product_pk, products, stock_quantity, total_sales,
        };
        use crate::data::models::schema::shipping::dsl::shipping;

        let mut conn = acquire().await?;

        let outcome = conn
            .transaction::<i32, result::Error, _>(|connection| {
                async move {
                    diesel::insert_into(orders)
                        .values(&new_order)
                        .execute(connection)
                        .await?;

                    let new_id: i32 = diesel::select(diesel::dsl::sql::<
                        diesel::sql_types::Integer,
                    >("LAST_INSERT_ID()"))
                    .get_result(connection)
                    .await?;

                    diesel::insert_into(order_items)
                        .values(&NewOrderItem {
                            order_id: new_id,
                            product_id: product,
                            quantity,
                            unit_price,
                        })
                        .execute(connection)
                        .await?;

                    let affected = diesel::update(
                        products.filter(
                            product_pk.eq(product).and(stock_quantity.ge(quantity)),
                        ),
                    )
                    .set((
                        stock_quantity.eq(stock_quantity - quantity),
                        total_sales.eq(total_sales + quantity),
                    ))
                    .execute(connection)
                    .await?;

                    if affected == 0 {
                        return Err(result::Error::RollbackTransaction);
                    }

                    diesel::insert_into(shipping)
                        .values(&NewShipping {
                            order_id: new_id,
                            shipping_address,
                            phone,
                            status: "pending",
                            shipping_cost,
                        })
                        .execute(connection)
                        .await?;

                    Ok(new_id)
                }
                .scope_boxed()
            })
            .await;

        match outcome {
            Ok(id) => Ok(Some(id)),
            Err(result::Error::RollbackTransaction) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Cancels a pending order and undoes its stock movement. `Ok(None)`
    /// means the order was no longer pending when the update ran.
    pub async fn cancel(&self, order: i32) -> Result<Option<()>, result::Error> {
        use crate::data::models::schema::order_items::dsl::{
            order_id as item_order_id, order_items,
        };
        use crate::data::models::schema::orders::dsl::{order_id as order_pk, orders, status};
        use crate::data::models::schema::products::dsl::{
            product_id as product_pk, products, stock_quantity, total_sales,
        };
        use crate::data::models::schema::shipping::dsl::{
            order_id as shipping_order_id, shipping, status as shipping_status,
        };

        let mut conn = acquire().await?;

        let outcome = conn
            .transaction::<(), result::Error, _>(|connection| {
                async move {
                    let affected = diesel::update(
                        orders.filter(order_pk.eq(order).and(status.eq("pending"))),
                    )
                    .set(status.eq("cancelled"))
                    .execute(connection)
                    .await?;

                    if affected == 0 {
                        return Err(result::Error::RollbackTransaction);
                    }

                    let items: Vec<OrderItem> = order_items
                        .filter(item_order_id.eq(order))
                        .load(connection)
                        .await?;

                    for item in items {
                        diesel::update(products.filter(product_pk.eq(item.product_id)))
                            .set((
                                stock_quantity.eq(stock_quantity + item.quantity),
                                total_sales.eq(total_sales - item.quantity),
                            ))
                            .execute(connection)
                            .await?;
                    }

                    diesel::update(shipping.filter(shipping_order_id.eq(order)))
                        .set(shipping_status.eq("cancelled"))
                        .execute(connection)
                        .await?;

                    Ok(())
                }
                .scope_boxed()
            })
            .await;

        match outcome {
            Ok(()) => Ok(Some(())),
            Err(result::Error::RollbackTransaction) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Removes a terminal order. Children first: shipping, then items,
    /// then the order row itself.
    pub async fn delete_order(&self, order: i32) -> Result<(), result::Error> {
        use crate::data::models::schema::order_items::dsl::{
            order_id as item_order_id, order_items,
        };
        use crate::data::models::schema::orders::dsl::{order_id as order_pk, orders};
        use crate::data::models::schema::shipping::dsl::{
            order_id as shipping_order_id, shipping,
        };

        let mut conn = acquire().await?;

        conn.transaction(|connection| {
            async move {
                diesel::delete(shipping.filter(shipping_order_id.eq(order)))
                    .execute(connection)
                    .await?;
                diesel::delete(order_items.filter(item_order_id.eq(order)))
                    .execute(connection)
                    .await?;
                diesel::delete(orders.filter(order_pk.eq(order)))
                    .execute(connection)
                    .await?;
                Ok(())
            }
            .scope_boxed()
        })
        .await
    }

    /// Moves an order forward in its lifecycle, mirroring shipped and
    /// delivered onto the shipping record (delivery gets stamped).
    pub async fn set_status(&self, order: i32, new_status: &str) -> Result<(), result::Error> {
        use crate::data::models::schema::orders::dsl::{order_id as order_pk, orders, status};
        use crate::data::models::schema::shipping::dsl::{
            actual_delivery, order_id as shipping_order_id, shipping,
            status as shipping_status,
        };

        let mut conn = acquire().await?;

        conn.transaction(|connection| {
            async move {
                diesel::update(orders.filter(order_pk.eq(order)))
                    .set(status.eq(new_status))
                    .execute(connection)
                    .await?;

                match new_status {
                    "shipped" => {
                        diesel::update(shipping.filter(shipping_order_id.eq(order)))
                            .set(shipping_status.eq(new_status))
                            .execute(connection)
                            .await?;
                    }
                    "delivered" => {
                        diesel::update(shipping.filter(shipping_order_id.eq(order)))
                            .set((
                                shipping_status.eq(new_status),
                                actual_delivery
                                    .eq(chrono::Utc::now().date_naive()),
                            ))
                            .execute(connection)
                            .await?;
                    }
                    _ => {}
                }

                Ok(())
            }
            .scope_boxed()
        })
        .await
    }

    /// Buyer's order history with each order's shipping record, newest
    /// first.
    pub async fn get_by_user_with_shipping(
        &self,
        user: i32,
    ) -> Result<Option<Vec<(Order, Option<Shipping>)>>, result::Error> {
        use crate::data::models::schema::{orders, shipping};

        let mut conn = acquire().await?;

        match orders::table
            .left_join(shipping::table)
            .filter(orders::user_id.eq(user))
            .order(orders::order_date.desc())
            .select((Order::as_select(), Option::<Shipping>::as_select()))
            .load::<(Order, Option<Shipping>)>(&mut conn)
            .await
        {
            Ok(value) if value.is_empty() => Ok(None),
            Ok(value) => Ok(Some(value)),
            Err(result::Error::NotFound) => Ok(None),
            Err(e) => Err(e),
        }
    }

    pub async fn get_items_with_products(
        &self,
        order: i32,
    ) -> Result<Vec<(OrderItem, Product)>, result::Error> {
        use crate::data::models::schema::{order_items, products};

        let mut conn = acquire().await?;

        order_items::table
            .inner_join(products::table)
            .filter(order_items::order_id.eq(order))
            .select((OrderItem::as_select(), Product::as_select()))
            .load::<(OrderItem, Product)>(&mut conn)
            .await
    }

    pub async fn get_shipping(&self, order: i32) -> Result<Option<Shipping>, result::Error> {
        use crate::data::models::schema::shipping::dsl::{
            order_id as shipping_order_id, shipping,
        };

        let mut conn = acquire().await?;

        match shipping
            .filter(shipping_order_id.eq(order))
            .first::<Shipping>(&mut conn)
            .await
        {
            Ok(value) => Ok(Some(value)),
            Err(result::Error::NotFound) => Ok(None),
            Err(e) => Err(e),
        }
    }
}

#[async_trait]
impl Repository for OrderRepo {
    type Id = i32;
    type Item = Order;
    type NewItem<'a> = NewOrder<'a>;
    type UpdateForm<'a> = UpdateOrder<'a>;

    async fn get_all(&self) -> Result<Option<Vec<Self::Item>>, result::Error> {
        use crate::data::models::schema::orders::dsl::orders;

        let mut conn = acquire().await?;

        match orders.load::<Self::Item>(&mut conn).await {
            Ok(value) if value.is_empty() => Ok(None),
            Ok(value) => Ok(Some(value)),
            Err(result::Error::NotFound) => Ok(None),
            Err(e) => Err(e),
        }
    }

    async fn get_by_id(&self, id: Self::Id) -> Result<Option<Self::Item>, result::Error> {
        use crate::data::models::schema::orders::dsl::{order_id, orders};

        let mut conn = acquire().await?;

        match orders
            .filter(order_id.eq(id))
            .first::<Self::Item>(&mut conn)
            .await
        {
            Ok(value) => Ok(Some(value)),
            Err(result::Error::NotFound) => Ok(None),
            Err(e) => Err(e),
        }
    }

    async fn add<'a>(&self, item: Self::NewItem<'a>) -> Result<(), result::Error> {
        use crate::data::models::schema::orders::dsl::orders;

        let mut conn = acquire().await?;

        conn.transaction(|connection| {
            async move {
                diesel::insert_into(orders)
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
        use crate::data::models::schema::orders::dsl::{order_id, orders};

        let mut conn = acquire().await?;

        conn.transaction(|connection| {
            async move {
                diesel::update(orders.filter(order_id.eq(id)))
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
        use crate::data::models::schema::orders::dsl::{order_id, orders};

        let mut conn = acquire().await?;

        conn.transaction(|connection| {
            async move {
                diesel::delete(orders.filter(order_id.eq(id)))
                    .execute(connection)
                    .await?;
                Ok(())
            }
            .scope_boxed()
        })
        .await
    }
}

impl Default for OrderRepo {
    fn default() -> Self {
        Self::new()
    }
}
