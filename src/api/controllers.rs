pub mod auth_controller;
pub mod book_controller;
pub mod cart_controller;
pub mod order_controller;
pub mod review_controller;
