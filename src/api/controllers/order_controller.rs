use crate::api::request::PlaceOrderRequest;
use crate::api::response::OrderResponse;
use crate::security::jwt::AccessClaims;
use crate::services::errors::OrderServiceError;
use crate::services::order_service::OrderService;
use axum::Json;
use axum::extract::Path;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use validator::Validate;

/// Place an order from the caller's cart
pub async fn place_order(
    claims: AccessClaims,
    Json(payload): Json<PlaceOrderRequest>,
) -> impl IntoResponse {
    if let Err(e) = payload.validate() {
        return (StatusCode::UNPROCESSABLE_ENTITY, e.to_string()).into_response();
    }

    let service = OrderService::new();
    let user_id = claims.user_id();

    let order = match service.place_order(user_id, &payload.shipping_address).await {
        Ok(order) => order,
        Err(e @ OrderServiceError::EmptyCart) => {
            return (StatusCode::BAD_REQUEST, e.to_string()).into_response();
        }
        Err(e @ OrderServiceError::InsufficientStock(_)) => {
            return (StatusCode::CONFLICT, e.to_string()).into_response();
        }
        Err(e @ OrderServiceError::AddressTooShort) => {
            return (StatusCode::UNPROCESSABLE_ENTITY, e.to_string()).into_response();
        }
        Err(_) => {
            return (StatusCode::INTERNAL_SERVER_ERROR, "Database error").into_response();
        }
    };

    // Reload with line items so the response shows what was bought.
    match service.get_order(user_id, order.order_id).await {
        Ok(Some(with_items)) => {
            (StatusCode::CREATED, Json(OrderResponse::from(with_items))).into_response()
        }
        Ok(None) => {
            (StatusCode::CREATED, Json(OrderResponse::from((order, Vec::new())))).into_response()
        }
        Err(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Database error").into_response(),
    }
}

/// The caller's orders, newest first
pub async fn list_orders(claims: AccessClaims) -> impl IntoResponse {
    match OrderService::new().list_orders(claims.user_id()).await {
        Ok(orders) => {
            let response: Vec<OrderResponse> =
                orders.into_iter().map(OrderResponse::from).collect();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Database error").into_response(),
    }
}

/// One of the caller's orders; anyone else's order reads as absent
pub async fn get_order(claims: AccessClaims, Path(order_id): Path<i32>) -> impl IntoResponse {
    match OrderService::new()
        .get_order(claims.user_id(), order_id)
        .await
    {
        Ok(Some(with_items)) => {
            (StatusCode::OK, Json(OrderResponse::from(with_items))).into_response()
        }
        Ok(None) => (StatusCode::NOT_FOUND, "Order not found").into_response(),
        Err(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Database error").into_response(),
    }
}
