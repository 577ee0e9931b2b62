use bigdecimal::BigDecimal;
use diesel::prelude::*;
use diesel::result;
use diesel_async::RunQueryDsl;
use resale_server_lib::data::database::Database;
use resale_server_lib::data::models::category::NewCategory;
use resale_server_lib::data::models::user::NewUser;
use resale_server_lib::data::repos::implementors::category_repo::CategoryRepo;
use resale_server_lib::data::repos::implementors::product_repo::ProductRepo;
use resale_server_lib::data::repos::implementors::user_repo::UserRepo;
use resale_server_lib::data::repos::traits::repository::Repository;
use resale_server_lib::security::auth::AuthService;
use resale_server_lib::security::identity::{Identity, UserRole};
use resale_server_lib::services::checkout_service::{CheckoutService, PlaceOrder};
use resale_server_lib::services::errors::ProductServiceError;
use resale_server_lib::services::order_service::{OrderService, OrderStatus};
use resale_server_lib::services::product_service::{
    ProductInput, ProductService, RetireOutcome,
};
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
        phone: None,
        address: None,
        city: None,
        role,
    };

    repo.add(test_user).await.expect("Failed to add user");

    repo.get_by_username(username)
        .await
        .expect("Failed to get user")
        .expect("User not found")
        .user_id
}

/// Returns (root_id, leaf_id).
async fn create_category_tree() -> (i32, i32) {
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
        category_name: "Tablets",
        parent_id: Some(root.category_id),
    })
    .await
    .expect("Failed to add leaf category");

    let leaf = repo
        .get_by_name("Tablets")
        .await
        .expect("Failed to get category")
        .expect("Category not found");

    (root.category_id, leaf.category_id)
}

fn listing(category_id: i32) -> ProductInput {
    ProductInput {
        name: "Tab S8".to_string(),
        description: Some("Barely used".to_string()),
        brand: "Samsung".to_string(),
        model: Some("SM-X700".to_string()),
        color: Some("graphite".to_string()),
        condition: "like_new".to_string(),
        storage: Some("128GB".to_string()),
        ram: Some("8GB".to_string()),
        battery: None,
        screen: Some("11in".to_string()),
        price: BigDecimal::from_str("800.00").unwrap(),
        stock_quantity: 2,
        category_id,
        purchase_date: None,
    }
}

fn seller(user_id: i32) -> Identity {
    Identity {
        user_id,
        role: UserRole::Seller,
    }
}

fn buyer(user_id: i32) -> Identity {
    Identity {
        user_id,
        role: UserRole::Buyer,
    }
}

#[tokio::test]
#[serial_test::serial]
async fn test_create_product_returns_id_and_persists() {
    setup().await.expect("Setup failed");

    let seller_id = create_test_user("mk_seller", "seller").await;
    let (_, leaf_id) = create_category_tree().await;

    let service = ProductService::new();
    let product_id = service
        .create_product(seller(seller_id), listing(leaf_id))
        .await
        .expect("Create failed");

    let product = ProductRepo::new()
        .get_by_id(product_id)
        .await
        .expect("Query failed")
        .expect("Product not found");

    assert_eq!(product.seller_id, seller_id);
    assert_eq!(product.name, "Tab S8");
    assert_eq!(product.condition, "like_new");
    assert!(product.is_available);

    let specs = product.specifications.expect("Specifications missing");
    assert_eq!(specs["storage"], "128GB");
    assert_eq!(specs["ram"], "8GB");
    assert!(specs.get("battery").is_none());
}

#[tokio::test]
#[serial_test::serial]
async fn test_create_product_validation() {
    setup().await.expect("Setup failed");

    let seller_id = create_test_user("val_seller", "seller").await;
    let buyer_id = create_test_user("val_buyer", "buyer").await;
    let (root_id, leaf_id) = create_category_tree().await;

    let service = ProductService::new();

    // Buyers cannot list products.
    let result = service.create_product(buyer(buyer_id), listing(leaf_id)).await;
    assert_eq!(result, Err(ProductServiceError::PermissionDenied));

    let mut input = listing(leaf_id);
    input.brand = "  ".to_string();
    let result = service.create_product(seller(seller_id), input).await;
    assert_eq!(result, Err(ProductServiceError::MissingField("brand")));

    let mut input = listing(leaf_id);
    input.price = BigDecimal::from(0);
    let result = service.create_product(seller(seller_id), input).await;
    assert_eq!(result, Err(ProductServiceError::InvalidPrice));

    let mut input = listing(leaf_id);
    input.condition = "mint".to_string();
    let result = service.create_product(seller(seller_id), input).await;
    assert_eq!(result, Err(ProductServiceError::InvalidCondition));

    // Products only attach to leaf categories.
    let result = service
        .create_product(seller(seller_id), listing(root_id))
        .await;
    assert_eq!(result, Err(ProductServiceError::InvalidCategory));

    let result = service
        .create_product(seller(seller_id), listing(root_id + 9999))
        .await;
    assert_eq!(result, Err(ProductServiceError::InvalidCategory));

    // None of the rejected forms left a row behind.
    assert!(ProductRepo::new()
        .get_by_seller(seller_id)
        .await
        .expect("Query failed")
        .is_none());
}

#[tokio::test]
#[serial_test::serial]
async fn test_update_product_ownership_and_toggle() {
    setup().await.expect("Setup failed");

    let seller_id = create_test_user("upd_seller", "seller").await;
    let other_id = create_test_user("upd_other", "seller").await;
    let (_, leaf_id) = create_category_tree().await;

    let service = ProductService::new();
    let product_id = service
        .create_product(seller(seller_id), listing(leaf_id))
        .await
        .expect("Create failed");

    // Only the owner may touch the listing.
    let result = service
        .update_product(seller(other_id), product_id, listing(leaf_id), true)
        .await;
    assert_eq!(result, Err(ProductServiceError::PermissionDenied));

    let mut input = listing(leaf_id);
    input.price = BigDecimal::from_str("750.00").unwrap();
    service
        .update_product(seller(seller_id), product_id, input, false)
        .await
        .expect("Update failed");

    let product = ProductRepo::new()
        .get_by_id(product_id)
        .await
        .expect("Query failed")
        .expect("Product not found");
    assert_eq!(product.price, BigDecimal::from_str("750.00").unwrap());
    assert!(!product.is_available);
}

#[tokio::test]
#[serial_test::serial]
async fn test_retire_with_order_history_is_soft() {
    setup().await.expect("Setup failed");

    let seller_id = create_test_user("soft_seller", "seller").await;
    let buyer_id = create_test_user("soft_buyer", "buyer").await;
    let (_, leaf_id) = create_category_tree().await;

    let service = ProductService::new();
    let product_id = service
        .create_product(seller(seller_id), listing(leaf_id))
        .await
        .expect("Create failed");

    let order_id = CheckoutService::new()
        .place_order(
            buyer(buyer_id),
            PlaceOrder {
                product_id,
                quantity: 1,
                payment_method: "tele_birr".to_string(),
                shipping_address: "Quiha, Mekelle".to_string(),
                phone: "+251911222333".to_string(),
                notes: None,
            },
        )
        .await
        .expect("Placement failed");

    OrderService::new()
        .update_status(seller(seller_id), order_id, OrderStatus::Delivered)
        .await
        .expect("Delivery failed");

    let outcome = service
        .retire_product(seller(seller_id), product_id)
        .await
        .expect("Retire failed");
    assert_eq!(outcome, RetireOutcome::Retired);

    // The row survives for the delivered order's receipt.
    let product = ProductRepo::new()
        .get_by_id(product_id)
        .await
        .expect("Query failed")
        .expect("Product row must survive");
    assert!(!product.is_available);
    assert_eq!(product.stock_quantity, 0);
}

#[tokio::test]
#[serial_test::serial]
async fn test_retire_without_orders_is_hard_delete() {
    setup().await.expect("Setup failed");

    let seller_id = create_test_user("hard_seller", "seller").await;
    let (_, leaf_id) = create_category_tree().await;

    let service = ProductService::new();
    let product_id = service
        .create_product(seller(seller_id), listing(leaf_id))
        .await
        .expect("Create failed");

    let outcome = service
        .retire_product(seller(seller_id), product_id)
        .await
        .expect("Retire failed");
    assert_eq!(outcome, RetireOutcome::Deleted);

    assert!(ProductRepo::new()
        .get_by_id(product_id)
        .await
        .expect("Query failed")
        .is_none());
}

#[tokio::test]
#[serial_test::serial]
async fn test_my_products_includes_retired_listings() {
    setup().await.expect("Setup failed");

    let seller_id = create_test_user("mine_seller", "seller").await;
    let buyer_id = create_test_user("mine_buyer", "buyer").await;
    let (_, leaf_id) = create_category_tree().await;

    let service = ProductService::new();
    let keep_id = service
        .create_product(seller(seller_id), listing(leaf_id))
        .await
        .expect("Create failed");

    let mut second = listing(leaf_id);
    second.name = "Tab S9".to_string();
    let retired_id = service
        .create_product(seller(seller_id), second)
        .await
        .expect("Create failed");

    // Give the second listing order history so retiring keeps the row.
    CheckoutService::new()
        .place_order(
            buyer(buyer_id),
            PlaceOrder {
                product_id: retired_id,
                quantity: 1,
                payment_method: "cbe_birr".to_string(),
                shipping_address: "Ayder, Mekelle".to_string(),
                phone: "+251911444555".to_string(),
                notes: None,
            },
        )
        .await
        .expect("Placement failed");
    service
        .retire_product(seller(seller_id), retired_id)
        .await
        .expect("Retire failed");

    let rows = service
        .my_products(seller(seller_id))
        .await
        .expect("Listing failed");
    assert_eq!(rows.len(), 2);
    assert!(rows.iter().any(|(p, _)| p.product_id == keep_id));
    assert!(rows
        .iter()
        .any(|(p, _)| p.product_id == retired_id && !p.is_available));
    assert!(rows.iter().all(|(_, category)| category == "Tablets"));

    // Buyers have no seller listing page.
    let result = service.my_products(buyer(buyer_id)).await;
    assert_eq!(result, Err(ProductServiceError::PermissionDenied));
}
