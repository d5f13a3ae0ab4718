use crate::data::models::schema::*;
use crate::data::models::user::User;
use bigdecimal::BigDecimal;
use diesel::prelude::*;

#[derive(Queryable, Selectable, Identifiable, Associations, PartialEq, Debug, Clone)]
#[diesel(table_name = orders)]
#[diesel(primary_key(order_id))]
#[diesel(belongs_to(User, foreign_key = user_id))]
#[diesel(check_for_backend(diesel::mysql::Mysql))]
pub struct Order {
    pub order_id: i32,
    pub user_id: i32,
    /// Fixed at placement time from the cart snapshot; never recomputed.
    pub total_amount: BigDecimal,
    pub status: String,
    pub shipping_address: String,
    pub created_at: Option<chrono::NaiveDateTime>,
    pub updated_at: Option<chrono::NaiveDateTime>,
}

#[derive(Insertable, PartialEq, Debug)]
#[diesel(table_name = orders)]
pub struct NewOrder<'a> {
    pub user_id: i32,
    pub total_amount: BigDecimal,
    pub status: &'a str,
    pub shipping_address: &'a str,
}
