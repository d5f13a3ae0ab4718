use crate::api::controllers::review_controller;
use axum::Router;
use axum::routing::{delete, get, post};

pub fn routes() -> Router<()> {
    Router::new()
        .route("/", post(review_controller::create_review))
        .route("/book/{book_id}", get(review_controller::list_reviews))
        .route("/{id}", post(review_controller::update_review))
        .route("/{id}", delete(review_controller::delete_review))
}
