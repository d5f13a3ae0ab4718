use crate::data::database::Database;
use crate::data::models::book::Book;
use crate::data::models::cart_item::CartItem;
use crate::data::models::order::{NewOrder, Order};
use crate::data::models::order_item::{NewOrderItem, OrderItem};
use bigdecimal::BigDecimal;
use diesel::prelude::*;
use diesel::result;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};
use std::collections::HashMap;

/// Failure kinds of the cart-to-order transaction. Any variant rolls the
/// whole transaction back: no order row, no stock change, no cart deletion.
#[derive(Debug)]
pub enum OrderPlacementError {
    EmptyCart,
    /// Titles of every book whose requested quantity exceeds current stock.
    InsufficientStock(Vec<String>),
    Database(result::Error),
}

impl std::error::Error for OrderPlacementError {}

impl std::fmt::Display for OrderPlacementError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrderPlacementError::EmptyCart => write!(f, "Cart is empty"),
            OrderPlacementError::InsufficientStock(titles) => {
                write!(f, "Insufficient stock for: {}", titles.join(", "))
            }
            OrderPlacementError::Database(e) => write!(f, "Database error: {}", e),
        }
    }
}

impl From<result::Error> for OrderPlacementError {
    fn from(e: result::Error) -> Self {
        OrderPlacementError::Database(e)
    }
}

pub struct OrderRepo {}

impl OrderRepo {
    pub fn new() -> Self {
        OrderRepo {}
    }

    /// Converts the user's cart into a durable order inside one transaction:
    /// locked cart+book snapshot, stock validation, order + item inserts with
    /// frozen prices, stock decrement, cart clear. The FOR UPDATE lock on the
    /// snapshot keeps two concurrent orders from both passing the stock check
    /// against the same book.
    pub async fn place_from_cart(
        &self,
        uid: i32,
        shipping_address: &str,
    ) -> Result<Order, OrderPlacementError> {
        use crate::data::models::schema::books::dsl::{
            book_id as books_book_id, books, stock_quantity,
        };
        use crate::data::models::schema::cart_items::dsl::{
            cart_items, user_id as cart_user_id,
        };
        use crate::data::models::schema::order_items::dsl::order_items;
        use crate::data::models::schema::orders::dsl::{order_id, orders};

        let db = Database::new().await;
        let mut conn = db
            .connection()
            .await
            .map_err(OrderPlacementError::Database)?;

        conn.transaction::<Order, OrderPlacementError, _>(|connection| {
            async move {
                let lines: Vec<(CartItem, Book)> = cart_items
                    .inner_join(books)
                    .filter(cart_user_id.eq(uid))
                    .select((CartItem::as_select(), Book::as_select()))
                    .for_update()
                    .load::<(CartItem, Book)>(connection)
                    .await?;

                if lines.is_empty() {
                    return Err(OrderPlacementError::EmptyCart);
                }

                let out_of_stock: Vec<String> = lines
                    .iter()
                    .filter(|(item, book)| item.quantity > book.stock_quantity)
                    .map(|(_, book)| book.title.clone())
                    .collect();

                if !out_of_stock.is_empty() {
                    return Err(OrderPlacementError::InsufficientStock(out_of_stock));
                }

                let total_amount = lines.iter().fold(BigDecimal::from(0), |acc, (item, book)| {
                    acc + book.price.clone() * BigDecimal::from(item.quantity)
                });

                let new_order = NewOrder {
                    user_id: uid,
                    total_amount,
                    status: "pending",
                    shipping_address,
                };

                diesel::insert_into(orders)
                    .values(&new_order)
                    .execute(connection)
                    .await?;

                // LAST_INSERT_ID() is per-connection, so this is safe inside
                // the transaction. MySQL reports it as a LONGLONG.
                let new_id: i64 = diesel::select(diesel::dsl::sql::<diesel::sql_types::BigInt>(
                    "LAST_INSERT_ID()",
                ))
                .get_result(connection)
                .await?;
                let new_id = new_id as i32;

                let new_items: Vec<NewOrderItem> = lines
                    .iter()
                    .map(|(item, book)| NewOrderItem {
                        order_id: new_id,
                        book_id: item.book_id,
                        quantity: item.quantity,
                        price_at_time: book.price.clone(),
                    })
                    .collect();

                diesel::insert_into(order_items)
                    .values(&new_items)
                    .execute(connection)
                    .await?;

                // Sufficiency was validated against the same locked snapshot,
                // so the decrement can never go negative here.
                for (item, _) in &lines {
                    diesel::update(books.filter(books_book_id.eq(item.book_id)))
                        .set(stock_quantity.eq(stock_quantity - item.quantity))
                        .execute(connection)
                        .await?;
                }

                diesel::delete(cart_items.filter(cart_user_id.eq(uid)))
                    .execute(connection)
                    .await?;

                let order = orders
                    .filter(order_id.eq(new_id))
                    .first::<Order>(connection)
                    .await?;

                Ok(order)
            }
            .scope_boxed()
        })
        .await
    }

    /// All orders for a user, newest first.
    pub async fn get_by_user(&self, uid: i32) -> Result<Vec<Order>, result::Error> {
        use crate::data::models::schema::orders::dsl::{order_id, orders, user_id};

        let db = Database::new().await;
        let mut conn = db.connection().await?;

        orders
            .filter(user_id.eq(uid))
            .order(order_id.desc())
            .load::<Order>(&mut conn)
            .await
    }

    /// A single order scoped to its owner; another user's order reads as
    /// absent, not forbidden.
    pub async fn get_owned(&self, id: i32, uid: i32) -> Result<Option<Order>, result::Error> {
        use crate::data::models::schema::orders::dsl::{order_id, orders, user_id};

        let db = Database::new().await;
        let mut conn = db.connection().await?;

        match orders
            .filter(order_id.eq(id))
            .filter(user_id.eq(uid))
            .first::<Order>(&mut conn)
            .await
        {
            Ok(value) => Ok(Some(value)),
            Err(result::Error::NotFound) => Ok(None),
            Err(e) => Err(e),
        }
    }

    pub async fn get_by_id(&self, id: i32) -> Result<Option<Order>, result::Error> {
        use crate::data::models::schema::orders::dsl::{order_id, orders};

        let db = Database::new().await;
        let mut conn = db.connection().await?;

        match orders
            .filter(order_id.eq(id))
            .first::<Order>(&mut conn)
            .await
        {
            Ok(value) => Ok(Some(value)),
            Err(result::Error::NotFound) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Loads the line items (with their books) for a batch of orders.
    pub async fn attach_items(
        &self,
        orders_list: Vec<Order>,
    ) -> Result<Vec<(Order, Vec<(OrderItem, Book)>)>, result::Error> {
        if orders_list.is_empty() {
            return Ok(Vec::new());
        }

        use crate::data::models::schema::books::dsl::books;
        use crate::data::models::schema::order_items::dsl::{order_id, order_items};

        let db = Database::new().await;
        let mut conn = db.connection().await?;

        let ids: Vec<i32> = orders_list.iter().map(|o| o.order_id).collect();

        let items_data: Vec<(OrderItem, Book)> = order_items
            .inner_join(books)
            .filter(order_id.eq_any(ids))
            .select((OrderItem::as_select(), Book::as_select()))
            .load::<(OrderItem, Book)>(&mut conn)
            .await?;

        let mut map: HashMap<i32, Vec<(OrderItem, Book)>> = HashMap::new();

        for item in items_data {
            map.entry(item.0.order_id).or_default().push(item);
        }

        let result = orders_list
            .into_iter()
            .map(|o| {
                let items = map.remove(&o.order_id).unwrap_or_default();
                (o, items)
            })
            .collect();

        Ok(result)
    }

    /// Whether any of the user's orders contains the book. Review eligibility
    /// hangs off this.
    pub async fn user_has_purchased(&self, uid: i32, bid: i32) -> Result<bool, result::Error> {
        use crate::data::models::schema::order_items::dsl::{book_id, order_items};
        use crate::data::models::schema::orders::dsl::{orders, user_id};

        let db = Database::new().await;
        let mut conn = db.connection().await?;

        let count: i64 = orders
            .inner_join(order_items)
            .filter(user_id.eq(uid))
            .filter(book_id.eq(bid))
            .count()
            .get_result(&mut conn)
            .await?;

        Ok(count > 0)
    }

    pub async fn set_status(&self, id: i32, new_status: &str) -> Result<(), result::Error> {
        use crate::data::models::schema::orders::dsl::{order_id, orders, status};

        let db = Database::new().await;
        let mut conn = db.connection().await?;

        diesel::update(orders.filter(order_id.eq(id)))
            .set(status.eq(new_status))
            .execute(&mut conn)
            .await?;

        Ok(())
    }
}

impl Default for OrderRepo {
    fn default() -> Self {
        Self::new()
    }
}
