pub mod auth_routes;
pub mod book_routes;
pub mod cart_routes;
pub mod order_routes;
pub mod review_routes;
