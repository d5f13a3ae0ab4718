use crate::api::controllers::book_controller;
use axum::Router;
use axum::routing::{get, post};

pub fn routes() -> Router<()> {
    Router::new()
        .route("/", get(book_controller::search_books))
        .route("/", post(book_controller::create_book))
        .route("/{id}", get(book_controller::get_book))
        .route("/{id}", post(book_controller::update_book))
}
