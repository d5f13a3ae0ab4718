use crate::api::config::Config;
use crate::api::routes::{auth_routes, book_routes, cart_routes, order_routes, review_routes};
use axum::Router;
use axum::routing::get;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// The full application router; controller tests drive this directly.
pub fn app() -> Router {
    let cors_layer = CorsLayer::new().allow_origin(Any);

    Router::new()
        .route("/api", get(|| async { "Bookstore API is running!" }))
        .nest("/api/v1/auth", auth_routes::routes())
        .nest("/api/v1/books", book_routes::routes())
        .nest("/api/v1/cart", cart_routes::routes())
        .nest("/api/v1/orders", order_routes::routes())
        .nest("/api/v1/reviews", review_routes::routes())
        .layer(cors_layer)
        .layer(TraceLayer::new_for_http())
        .with_state::<()>(())
}

pub async fn start() {
    let config = Config::new();

    let listener = TcpListener::bind(&config.bind_addr)
        .await
        .expect("Failed to bind to address");

    tracing::info!("Server running on http://{}", config.bind_addr);

    axum::serve(listener, app())
        .await
        .expect("Failed to start the server");
}
