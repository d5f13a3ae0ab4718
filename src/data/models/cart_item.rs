use crate::data::models::book::Book;
use crate::data::models::schema::*;
use crate::data::models::user::User;
use diesel::prelude::*;

#[derive(Queryable, Selectable, Identifiable, Associations, PartialEq, Debug, Clone)]
#[diesel(table_name = cart_items)]
#[diesel(primary_key(cart_item_id))]
#[diesel(belongs_to(User, foreign_key = user_id))]
#[diesel(belongs_to(Book, foreign_key = book_id))]
#[diesel(check_for_backend(diesel::mysql::Mysql))]
pub struct CartItem {
    pub cart_item_id: i32,
    pub user_id: i32,
    pub book_id: i32,
    pub quantity: i32,
    pub created_at: Option<chrono::NaiveDateTime>,
    pub updated_at: Option<chrono::NaiveDateTime>,
}

#[derive(Insertable, PartialEq, Debug)]
#[diesel(table_name = cart_items)]
pub struct NewCartItem {
    pub user_id: i32,
    pub book_id: i32,
    pub quantity: i32,
}

#[derive(AsChangeset, PartialEq, Debug, Default)]
#[diesel(table_name = cart_items)]
pub struct UpdateCartItem {
    pub quantity: Option<i32>,
}
