use crate::api::controllers::cart_controller;
use axum::Router;
use axum::routing::{delete, get, post};

pub fn routes() -> Router<()> {
    Router::new()
        .route("/", get(cart_controller::get_cart))
        .route("/", post(cart_controller::add_to_cart))
        .route("/{id}", post(cart_controller::update_cart_item))
        .route("/{id}", delete(cart_controller::remove_from_cart))
}
