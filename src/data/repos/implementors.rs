pub mod book_repo;
pub mod cart_repo;
pub mod order_repo;
pub mod review_repo;
pub mod user_repo;
