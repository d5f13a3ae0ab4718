use crate::api::controllers::order_controller;
use axum::Router;
use axum::routing::{get, post};

pub fn routes() -> Router<()> {
    Router::new()
        .route("/", get(order_controller::list_orders))
        .route("/", post(order_controller::place_order))
        .route("/{id}", get(order_controller::get_order))
}
