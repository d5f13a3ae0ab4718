pub mod book_service;
pub mod cart_service;
pub mod errors;
pub mod order_service;
pub mod review_service;
pub mod user_service;
