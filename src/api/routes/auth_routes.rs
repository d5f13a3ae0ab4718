use crate::api::controllers::auth_controller::{login, register_user};
use axum::Router;
use axum::routing::post;

pub fn routes() -> Router<()> {
    Router::new()
        .route("/register", post(register_user))
        .route("/login", post(login))
}
