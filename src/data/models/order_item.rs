use crate::data::models::book::Book;
use crate::data::models::order::Order;
use crate::data::models::schema::*;
use bigdecimal::BigDecimal;
use diesel::prelude::*;

#[derive(Queryable, Selectable, Identifiable, Associations, PartialEq, Debug, Clone)]
#[diesel(table_name = order_items)]
#[diesel(primary_key(order_item_id))]
#[diesel(belongs_to(Order, foreign_key = order_id))]
#[diesel(belongs_to(Book, foreign_key = book_id))]
#[diesel(check_for_backend(diesel::mysql::Mysql))]
pub struct OrderItem {
    pub order_item_id: i32,
    pub order_id: i32,
    pub book_id: i32,
    pub quantity: i32,
    /// The book's price captured when the order was placed. Later catalog
    /// price changes never touch this.
    pub price_at_time: BigDecimal,
}

#[derive(Insertable, PartialEq, Debug)]
#[diesel(table_name = order_items)]
pub struct NewOrderItem {
    pub order_id: i32,
    pub book_id: i32,
    pub quantity: i32,
    pub price_at_time: BigDecimal,
}
