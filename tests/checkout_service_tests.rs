use bigdecimal::BigDecimal;
use diesel::prelude::*;
use diesel::result;
use diesel_async::RunQueryDsl;
use resale_server_lib::data::database::Database;
use resale_server_lib::data::models::category::NewCategory;
use resale_server_lib::data::models::product::{NewProduct, UpdateProduct};
use resale_server_lib::data::models::user::NewUser;
use resale_server_lib::data::repos::implementors::category_repo::CategoryRepo;
use resale_server_lib::data::repos::implementors::order_repo::OrderRepo;
use resale_server_lib::data::repos::implementors::product_repo::ProductRepo;
use resale_server_lib::data::repos::implementors::user_repo::UserRepo;
use resale_server_lib::data::repos::traits::repository::Repository;
use resale_server_lib::security::auth::AuthService;
use resale_server_lib::security::identity::{Identity, UserRole};
use resale_server_lib::services::checkout_service::{CheckoutService, PlaceOrder};
use resale_server_lib::services::errors::CheckoutError;
use std::str::FromStr;

async fn setup() -> Result<(), result::Error> {
    let db = Database::new().await;

    let mut conn = db
        .get_connection()
        .await
        .expect("Failed to get a database connection");

    use resale_server_lib::data::models::schema::categories::dsl::{categories, parent_id};
    use resale_server_lib::data::models::schema::order_items::dsl::order_items;
    use resale_server_lib::data::models::schema::orders::dsl::orders;
    use resale_server_lib::data::models::schema::products::dsl::products;
    use resale_server_lib::data::models::schema::shipping::dsl::shipping;
    use resale_server_lib::data::models::schema::users::dsl::users;

    // Clean up in order due to foreign key constraints
    diesel::delete(shipping).execute(&mut conn).await?;
    diesel::delete(order_items).execute(&mut conn).await?;
    diesel::delete(orders).execute(&mut conn).await?;
    diesel::delete(products).execute(&mut conn).await?;
    diesel::delete(categories.filter(parent_id.is_not_null()))
        .execute(&mut conn)
        .await?;
    diesel::delete(categories).execute(&mut conn).await?;
    diesel::delete(users).execute(&mut conn).await?;

    Ok(())
}

async fn create_test_user(username: &str, role: &str) -> i32 {
    let auth = AuthService::new();
    let repo = UserRepo::new();

    let hashed = auth.hash_password("testpass").await.expect("Hashing failed");
    let email = format!("{}@example.com", username);

    let test_user = NewUser {
        username,
        email: &email,
        password_hash: &hashed,
        full_name: "Test User",
        phone: Some("+251911000000"),
        address: None,
        city: Some("Mekelle"),
        role,
    };

    repo.add(test_user).await.expect("Failed to add user");

    repo.get_by_username(username)
        .await
        .expect("Failed to get user")
        .expect("User not found")
        .user_id
}

async fn create_leaf_category() -> i32 {
    let repo = CategoryRepo::new();

    repo.add(NewCategory {
        category_name: "Electronics",
        parent_id: None,
    })
    .await
    .expect("Failed to add root category");

    let root = repo
        .get_by_name("Electronics")
        .await
        .expect("Failed to get category")
        .expect("Category not found");

    repo.add(NewCategory {
        category_name: "Smartphones",
        parent_id: Some(root.category_id),
    })
    .await
    .expect("Failed to add leaf category");

    repo.get_by_name("Smartphones")
        .await
        .expect("Failed to get category")
        .expect("Category not found")
        .category_id
}

async fn create_test_product(
    seller: i32,
    category: i32,
    name: &str,
    price: &str,
    stock: i32,
    condition: &str,
) -> i32 {
    let repo = ProductRepo::new();

    let new_product = NewProduct {
        seller_id: seller,
        category_id: category,
        name,
        description: Some("Lightly used, original box"),
        brand: "TestBrand",
        model: Some("X100"),
        color: Some("black"),
        condition,
        specifications: None,
        price: BigDecimal::from_str(price).unwrap(),
        stock_quantity: stock,
        purchase_date: None,
    };

    repo.create(new_product).await.expect("Failed to add product")
}

fn buyer(user_id: i32) -> Identity {
    Identity {
        user_id,
        role: UserRole::Buyer,
    }
}

fn place_request(product_id: i32, quantity: i32) -> PlaceOrder {
    PlaceOrder {
        product_id,
        quantity,
        payment_method: "cash_on_delivery".to_string(),
        shipping_address: "Hawelti, Mekelle".to_string(),
        phone: "+251911223344".to_string(),
        notes: None,
    }
}

fn amount(s: &str) -> BigDecimal {
    BigDecimal::from_str(s).unwrap()
}

#[tokio::test]
#[serial_test::serial]
async fn test_place_order_totals_and_stock_movement() {
    setup().await.expect("Setup failed");

    let seller_id = create_test_user("checkout_seller", "seller").await;
    let buyer_id = create_test_user("checkout_buyer", "buyer").await;
    let category_id = create_leaf_category().await;
    let product_id =
        create_test_product(seller_id, category_id, "Phone A", "1000.00", 5, "good").await;

    let service = CheckoutService::new();

    let order_id = service
        .place_order(buyer(buyer_id), place_request(product_id, 2))
        .await
        .expect("Placement failed");

    // grand_total = 900 * 2 + 50
    let order_repo = OrderRepo::new();
    let order = order_repo
        .get_by_id(order_id)
        .await
        .expect("Query failed")
        .expect("Order not found");
    assert_eq!(order.total_amount, amount("1850.00"));
    assert_eq!(order.status, "pending");
    assert_eq!(order.user_id, buyer_id);
    assert_eq!(order.payment_method, "cash_on_delivery");

    // The line item snapshots the discounted unit price.
    let items = order_repo
        .get_items_with_products(order_id)
        .await
        .expect("Query failed");
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].0.quantity, 2);
    assert_eq!(items[0].0.unit_price, amount("900.00"));

    // Stock decremented and sales incremented by exactly the quantity.
    let product_repo = ProductRepo::new();
    let product = product_repo
        .get_by_id(product_id)
        .await
        .expect("Query failed")
        .expect("Product not found");
    assert_eq!(product.stock_quantity, 3);
    assert_eq!(product.total_sales, 2);

    // Shipping record carries the address and the flat fee.
    let shipping = order_repo
        .get_shipping(order_id)
        .await
        .expect("Query failed")
        .expect("Shipping not found");
    assert_eq!(shipping.status, "pending");
    assert_eq!(shipping.shipping_cost, amount("50.00"));
    assert_eq!(shipping.shipping_address, "Hawelti, Mekelle");
    assert_eq!(shipping.phone, "+251911223344");
}

#[tokio::test]
#[serial_test::serial]
async fn test_zero_quantity_rejected_without_writes() {
    setup().await.expect("Setup failed");

    let seller_id = create_test_user("qty_seller", "seller").await;
    let buyer_id = create_test_user("qty_buyer", "buyer").await;
    let category_id = create_leaf_category().await;
    let product_id =
        create_test_product(seller_id, category_id, "Phone B", "500.00", 3, "good").await;

    let service = CheckoutService::new();

    let result = service
        .place_order(buyer(buyer_id), place_request(product_id, 0))
        .await;
    assert_eq!(result, Err(CheckoutError::InvalidQuantity { available: 3 }));

    // Nothing was written anywhere.
    let order_repo = OrderRepo::new();
    assert!(order_repo
        .get_by_user_with_shipping(buyer_id)
        .await
        .expect("Query failed")
        .is_none());

    let product = ProductRepo::new()
        .get_by_id(product_id)
        .await
        .expect("Query failed")
        .expect("Product not found");
    assert_eq!(product.stock_quantity, 3);
    assert_eq!(product.total_sales, 0);
}

#[tokio::test]
#[serial_test::serial]
async fn test_quantity_above_stock_rejected() {
    setup().await.expect("Setup failed");

    let seller_id = create_test_user("over_seller", "seller").await;
    let buyer_id = create_test_user("over_buyer", "buyer").await;
    let category_id = create_leaf_category().await;
    let product_id =
        create_test_product(seller_id, category_id, "Phone C", "500.00", 2, "good").await;

    let service = CheckoutService::new();

    let result = service
        .place_order(buyer(buyer_id), place_request(product_id, 3))
        .await;
    assert_eq!(result, Err(CheckoutError::InvalidQuantity { available: 2 }));
}

#[tokio::test]
#[serial_test::serial]
async fn test_missing_fields_rejected() {
    setup().await.expect("Setup failed");

    let seller_id = create_test_user("field_seller", "seller").await;
    let buyer_id = create_test_user("field_buyer", "buyer").await;
    let category_id = create_leaf_category().await;
    let product_id =
        create_test_product(seller_id, category_id, "Phone D", "500.00", 3, "good").await;

    let service = CheckoutService::new();

    let mut request = place_request(product_id, 1);
    request.payment_method = "   ".to_string();
    let result = service.place_order(buyer(buyer_id), request).await;
    assert_eq!(result, Err(CheckoutError::MissingField("payment_method")));

    let mut request = place_request(product_id, 1);
    request.shipping_address = String::new();
    let result = service.place_order(buyer(buyer_id), request).await;
    assert_eq!(result, Err(CheckoutError::MissingField("shipping_address")));

    let mut request = place_request(product_id, 1);
    request.phone = String::new();
    let result = service.place_order(buyer(buyer_id), request).await;
    assert_eq!(result, Err(CheckoutError::MissingField("phone")));

    assert!(OrderRepo::new()
        .get_by_user_with_shipping(buyer_id)
        .await
        .expect("Query failed")
        .is_none());
}

#[tokio::test]
#[serial_test::serial]
async fn test_retired_product_rejected() {
    setup().await.expect("Setup failed");

    let seller_id = create_test_user("ret_seller", "seller").await;
    let buyer_id = create_test_user("ret_buyer", "buyer").await;
    let category_id = create_leaf_category().await;
    let product_id =
        create_test_product(seller_id, category_id, "Phone E", "500.00", 3, "good").await;

    ProductRepo::new()
        .retire(product_id)
        .await
        .expect("Retire failed");

    let service = CheckoutService::new();
    let result = service
        .place_order(buyer(buyer_id), place_request(product_id, 1))
        .await;
    assert_eq!(result, Err(CheckoutError::ProductUnavailable));
}

#[tokio::test]
#[serial_test::serial]
async fn test_unit_price_snapshot_survives_price_change() {
    setup().await.expect("Setup failed");

    let seller_id = create_test_user("snap_seller", "seller").await;
    let buyer_id = create_test_user("snap_buyer", "buyer").await;
    let category_id = create_leaf_category().await;
    let product_id =
        create_test_product(seller_id, category_id, "Phone F", "1000.00", 5, "good").await;

    let service = CheckoutService::new();
    let order_id = service
        .place_order(buyer(buyer_id), place_request(product_id, 1))
        .await
        .expect("Placement failed");

    // Seller reprices the listing afterwards.
    let repo = ProductRepo::new();
    let reprice = UpdateProduct {
        category_id: None,
        name: None,
        description: None,
        brand: None,
        model: None,
        color: None,
        condition: None,
        specifications: None,
        price: Some(amount("2000.00")),
        stock_quantity: None,
        is_available: None,
        purchase_date: None,
    };
    repo.update(product_id, reprice).await.expect("Update failed");

    let items = OrderRepo::new()
        .get_items_with_products(order_id)
        .await
        .expect("Query failed");
    assert_eq!(items[0].0.unit_price, amount("900.00"));
    assert_eq!(items[0].1.price, amount("2000.00"));
}

#[tokio::test]
#[serial_test::serial]
async fn test_concurrent_checkout_of_last_unit() {
    setup().await.expect("Setup failed");

    let seller_id = create_test_user("race_seller", "seller").await;
    let buyer_a = create_test_user("race_buyer_a", "buyer").await;
    let buyer_b = create_test_user("race_buyer_b", "buyer").await;
    let category_id = create_leaf_category().await;
    let product_id =
        create_test_product(seller_id, category_id, "Phone G", "400.00", 1, "good").await;

    let task_a = tokio::spawn(async move {
        CheckoutService::new()
            .place_order(buyer(buyer_a), place_request(product_id, 1))
            .await
    });
    let task_b = tokio::spawn(async move {
        CheckoutService::new()
            .place_order(buyer(buyer_b), place_request(product_id, 1))
            .await
    });

    let result_a = task_a.await.expect("Task panicked");
    let result_b = task_b.await.expect("Task panicked");

    let successes = [&result_a, &result_b]
        .iter()
        .filter(|r| r.is_ok())
        .count();
    assert_eq!(successes, 1, "exactly one checkout may win the last unit");

    let loser = if result_a.is_ok() { result_b } else { result_a };
    assert!(matches!(
        loser,
        Err(CheckoutError::InsufficientStock)
            | Err(CheckoutError::ProductUnavailable)
            | Err(CheckoutError::InvalidQuantity { .. })
    ));

    // The stock never goes negative and only one unit was sold.
    let product = ProductRepo::new()
        .get_by_id(product_id)
        .await
        .expect("Query failed")
        .expect("Product not found");
    assert_eq!(product.stock_quantity, 0);
    assert_eq!(product.total_sales, 1);
}
