use bigdecimal::BigDecimal;
use bookstore_server_lib::data::database::Database;
use bookstore_server_lib::data::models::book::{NewBook, UpdateBook};
use bookstore_server_lib::services::book_service::BookService;
use bookstore_server_lib::services::cart_service::CartService;
use bookstore_server_lib::services::errors::OrderServiceError;
use bookstore_server_lib::services::order_service::{OrderService, OrderStatus};
use bookstore_server_lib::services::user_service::UserService;
use diesel::result;
use diesel_async::RunQueryDsl;
use std::str::FromStr;

const SHIPPING_ADDRESS: &str = "42 Library Lane, Booktown, BT1 2RS";

async fn setup() -> Result<(), result::Error> {
    let db = Database::new().await;

    let mut conn = db
        .get_connection()
        .await
        .expect("Failed to get a database connection");

    use bookstore_server_lib::data::models::schema::books::dsl::books;
    use bookstore_server_lib::data::models::schema::cart_items::dsl::cart_items;
    use bookstore_server_lib::data::models::schema::order_items::dsl::order_items;
    use bookstore_server_lib::data::models::schema::orders::dsl::orders;
    use bookstore_server_lib::data::models::schema::reviews::dsl::reviews;
    use bookstore_server_lib::data::models::schema::users::dsl::users;

    diesel::delete(reviews).execute(&mut conn).await?;
    diesel::delete(order_items).execute(&mut conn).await?;
    diesel::delete(orders).execute(&mut conn).await?;
    diesel::delete(cart_items).execute(&mut conn).await?;
    diesel::delete(books).execute(&mut conn).await?;
    diesel::delete(users).execute(&mut conn).await?;

    Ok(())
}

fn money(s: &str) -> BigDecimal {
    BigDecimal::from_str(s).expect("Invalid decimal literal")
}

async fn create_test_user(email: &str) -> i32 {
    UserService::new()
        .register(email, "password123", "Test", "Buyer")
        .await
        .expect("Failed to create test user")
        .user_id
}

async fn create_test_book(title: &str, price: &str, stock: i32) -> i32 {
    BookService::new()
        .create_book(NewBook {
            title,
            author: "Test Author",
            isbn: None,
            description: None,
            price: money(price),
            stock_quantity: stock,
            category: "Fiction",
            publication_year: None,
            publisher: None,
            cover_image_url: None,
        })
        .await
        .expect("Failed to create test book")
        .book_id
}

#[tokio::test]
#[serial_test::serial]
async fn test_place_order_freezes_prices_decrements_stock_clears_cart() {
    setup().await.expect("Setup failed");

    let user_id = create_test_user("buyer@example.com").await;
    let novel_id = create_test_book("Paperback Novel", "19.99", 10).await;
    let hardcover_id = create_test_book("Hardcover Atlas", "29.99", 5).await;

    let cart = CartService::new();
    cart.add_to_cart(user_id, novel_id, 2)
        .await
        .expect("Add failed");
    cart.add_to_cart(user_id, hardcover_id, 1)
        .await
        .expect("Add failed");

    let order = OrderService::new()
        .place_order(user_id, SHIPPING_ADDRESS)
        .await
        .expect("Order placement failed");

    // 2 * 19.99 + 1 * 29.99
    assert_eq!(order.total_amount, money("69.97"));
    assert_eq!(order.status, "pending");
    assert_eq!(order.shipping_address, SHIPPING_ADDRESS);

    // Line items carry the prices in force at placement.
    let (_, items) = OrderService::new()
        .get_order(user_id, order.order_id)
        .await
        .expect("Order lookup failed")
        .expect("Placed order not found");

    assert_eq!(items.len(), 2);
    let novel_line = items
        .iter()
        .find(|(item, _)| item.book_id == novel_id)
        .expect("Missing novel line");
    let hardcover_line = items
        .iter()
        .find(|(item, _)| item.book_id == hardcover_id)
        .expect("Missing hardcover line");

    assert_eq!(novel_line.0.quantity, 2);
    assert_eq!(novel_line.0.price_at_time, money("19.99"));
    assert_eq!(hardcover_line.0.quantity, 1);
    assert_eq!(hardcover_line.0.price_at_time, money("29.99"));

    // Stock decremented per line quantity.
    let books = BookService::new();
    let novel = books
        .get_book(novel_id)
        .await
        .expect("Lookup failed")
        .expect("Book missing");
    let hardcover = books
        .get_book(hardcover_id)
        .await
        .expect("Lookup failed")
        .expect("Book missing");
    assert_eq!(novel.stock_quantity, 8);
    assert_eq!(hardcover.stock_quantity, 4);

    // The cart was consumed by the placement.
    let remaining = cart.get_cart(user_id).await.expect("Failed to get cart");
    assert!(remaining.is_empty());
}

#[tokio::test]
#[serial_test::serial]
async fn test_order_total_survives_later_price_change() {
    setup().await.expect("Setup failed");

    let user_id = create_test_user("buyer@example.com").await;
    let book_id = create_test_book("Repriced Later", "19.99", 10).await;

    CartService::new()
        .add_to_cart(user_id, book_id, 1)
        .await
        .expect("Add failed");

    let order = OrderService::new()
        .place_order(user_id, SHIPPING_ADDRESS)
        .await
        .expect("Order placement failed");

    BookService::new()
        .update_book(
            book_id,
            UpdateBook {
                price: Some(money("99.99")),
                ..Default::default()
            },
        )
        .await
        .expect("Price update failed");

    let (reloaded, items) = OrderService::new()
        .get_order(user_id, order.order_id)
        .await
        .expect("Order lookup failed")
        .expect("Placed order not found");

    assert_eq!(reloaded.total_amount, money("19.99"));
    assert_eq!(items[0].0.price_at_time, money("19.99"));
}

#[tokio::test]
#[serial_test::serial]
async fn test_empty_cart_cannot_be_checked_out() {
    setup().await.expect("Setup failed");

    let user_id = create_test_user("buyer@example.com").await;

    let service = OrderService::new();

    let result = service.place_order(user_id, SHIPPING_ADDRESS).await;
    assert_eq!(result, Err(OrderServiceError::EmptyCart));

    let orders = service.list_orders(user_id).await.expect("Listing failed");
    assert!(orders.is_empty());
}

#[tokio::test]
#[serial_test::serial]
async fn test_short_address_is_rejected_before_touching_the_cart() {
    setup().await.expect("Setup failed");

    let user_id = create_test_user("buyer@example.com").await;
    let book_id = create_test_book("Still Here", "10.00", 5).await;

    CartService::new()
        .add_to_cart(user_id, book_id, 1)
        .await
        .expect("Add failed");

    let result = OrderService::new().place_order(user_id, "short").await;
    assert_eq!(result, Err(OrderServiceError::AddressTooShort));

    let cart = CartService::new()
        .get_cart(user_id)
        .await
        .expect("Failed to get cart");
    assert_eq!(cart.len(), 1);
}

#[tokio::test]
#[serial_test::serial]
async fn test_insufficient_stock_fails_placement_with_no_writes() {
    setup().await.expect("Setup failed");

    let user_id = create_test_user("buyer@example.com").await;
    let stable_id = create_test_book("Plentiful", "10.00", 10).await;
    let scarce_id = create_test_book("Sold Out", "15.00", 2).await;

    let cart = CartService::new();
    cart.add_to_cart(user_id, stable_id, 1)
        .await
        .expect("Add failed");
    cart.add_to_cart(user_id, scarce_id, 2)
        .await
        .expect("Add failed");

    // Stock drops after the item went into the cart.
    BookService::new()
        .update_book(
            scarce_id,
            UpdateBook {
                stock_quantity: Some(0),
                ..Default::default()
            },
        )
        .await
        .expect("Stock update failed");

    let service = OrderService::new();

    let result = service.place_order(user_id, SHIPPING_ADDRESS).await;
    assert_eq!(
        result,
        Err(OrderServiceError::InsufficientStock(vec![
            "Sold Out".to_string()
        ]))
    );

    // Nothing changed: no order, cart intact, stock untouched.
    let orders = service.list_orders(user_id).await.expect("Listing failed");
    assert!(orders.is_empty());

    let remaining = cart.get_cart(user_id).await.expect("Failed to get cart");
    assert_eq!(remaining.len(), 2);

    let books = BookService::new();
    let stable = books
        .get_book(stable_id)
        .await
        .expect("Lookup failed")
        .expect("Book missing");
    assert_eq!(stable.stock_quantity, 10);
}

#[tokio::test]
#[serial_test::serial]
async fn test_orders_are_owner_scoped_and_listed_newest_first() {
    setup().await.expect("Setup failed");

    let buyer_id = create_test_user("buyer@example.com").await;
    let other_id = create_test_user("other@example.com").await;
    let book_id = create_test_book("Ordered Twice", "10.00", 10).await;

    let cart = CartService::new();
    let service = OrderService::new();

    cart.add_to_cart(buyer_id, book_id, 1)
        .await
        .expect("Add failed");
    let first = service
        .place_order(buyer_id, SHIPPING_ADDRESS)
        .await
        .expect("Placement failed");

    cart.add_to_cart(buyer_id, book_id, 2)
        .await
        .expect("Add failed");
    let second = service
        .place_order(buyer_id, SHIPPING_ADDRESS)
        .await
        .expect("Placement failed");

    let listed = service.list_orders(buyer_id).await.expect("Listing failed");
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0].0.order_id, second.order_id);
    assert_eq!(listed[1].0.order_id, first.order_id);

    // Someone else's order reads as absent.
    let foreign = service
        .get_order(other_id, first.order_id)
        .await
        .expect("Lookup failed");
    assert!(foreign.is_none());

    let own = service
        .get_order(buyer_id, first.order_id)
        .await
        .expect("Lookup failed");
    assert!(own.is_some());
}

#[tokio::test]
#[serial_test::serial]
async fn test_status_walks_the_lifecycle_and_rejects_skips() {
    setup().await.expect("Setup failed");

    let user_id = create_test_user("buyer@example.com").await;
    let book_id = create_test_book("Shipped Goods", "10.00", 10).await;

    CartService::new()
        .add_to_cart(user_id, book_id, 1)
        .await
        .expect("Add failed");

    let service = OrderService::new();
    let order = service
        .place_order(user_id, SHIPPING_ADDRESS)
        .await
        .expect("Placement failed");

    // pending cannot jump straight to shipped.
    let skipped = service
        .update_order_status(order.order_id, OrderStatus::Shipped)
        .await;
    assert_eq!(skipped, Err(OrderServiceError::InvalidStatusTransition));

    let confirmed = service
        .update_order_status(order.order_id, OrderStatus::Confirmed)
        .await
        .expect("pending -> confirmed failed");
    assert_eq!(confirmed.status, "confirmed");

    let shipped = service
        .update_order_status(order.order_id, OrderStatus::Shipped)
        .await
        .expect("confirmed -> shipped failed");
    assert_eq!(shipped.status, "shipped");

    // shipped orders can no longer be cancelled.
    let late_cancel = service
        .update_order_status(order.order_id, OrderStatus::Cancelled)
        .await;
    assert_eq!(late_cancel, Err(OrderServiceError::InvalidStatusTransition));

    let delivered = service
        .update_order_status(order.order_id, OrderStatus::Delivered)
        .await
        .expect("shipped -> delivered failed");
    assert_eq!(delivered.status, "delivered");

    let missing = service
        .update_order_status(424242, OrderStatus::Confirmed)
        .await;
    assert_eq!(missing, Err(OrderServiceError::OrderNotFound));
}

#[test]
fn test_status_transition_table() {
    use OrderStatus::*;

    assert!(Pending.can_transition_to(Confirmed));
    assert!(Pending.can_transition_to(Cancelled));
    assert!(Confirmed.can_transition_to(Shipped));
    assert!(Confirmed.can_transition_to(Cancelled));
    assert!(Shipped.can_transition_to(Delivered));

    assert!(!Pending.can_transition_to(Shipped));
    assert!(!Pending.can_transition_to(Delivered));
    assert!(!Shipped.can_transition_to(Cancelled));
    assert!(!Delivered.can_transition_to(Cancelled));
    assert!(!Cancelled.can_transition_to(Pending));
    assert!(!Delivered.can_transition_to(Pending));
}
