pub mod book;
pub mod cart_item;
pub mod order;
pub mod order_item;
pub mod review;
pub mod schema;
pub mod user;
