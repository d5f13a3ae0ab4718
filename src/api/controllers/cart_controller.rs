use crate::api::request::{AddToCartRequest, UpdateCartItemRequest};
use crate::api::response::{CartItemResponse, RemovedResponse};
use crate::security::jwt::AccessClaims;
use crate::services::cart_service::CartService;
use crate::services::errors::CartServiceError;
use axum::Json;
use axum::extract::Path;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use validator::Validate;

/// The caller's cart, each row joined with its book
pub async fn get_cart(claims: AccessClaims) -> impl IntoResponse {
    match CartService::new().get_cart(claims.user_id()).await {
        Ok(rows) => {
            let response: Vec<CartItemResponse> =
                rows.into_iter().map(CartItemResponse::from).collect();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Database error").into_response(),
    }
}

/// Add a book (merging with any existing row for it)
pub async fn add_to_cart(
    claims: AccessClaims,
    Json(payload): Json<AddToCartRequest>,
) -> impl IntoResponse {
    if let Err(e) = payload.validate() {
        return (StatusCode::UNPROCESSABLE_ENTITY, e.to_string()).into_response();
    }

    match CartService::new()
        .add_to_cart(claims.user_id(), payload.book_id, payload.quantity)
        .await
    {
        Ok(row) => (StatusCode::CREATED, Json(CartItemResponse::from(row))).into_response(),
        Err(e @ CartServiceError::BookNotFound) => {
            (StatusCode::NOT_FOUND, e.to_string()).into_response()
        }
        Err(e @ CartServiceError::InsufficientStock(_)) => {
            (StatusCode::CONFLICT, e.to_string()).into_response()
        }
        Err(e @ CartServiceError::InvalidQuantity) => {
            (StatusCode::UNPROCESSABLE_ENTITY, e.to_string()).into_response()
        }
        Err(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Database error").into_response(),
    }
}

/// Replace the quantity on one of the caller's cart rows
pub async fn update_cart_item(
    claims: AccessClaims,
    Path(cart_item_id): Path<i32>,
    Json(payload): Json<UpdateCartItemRequest>,
) -> impl IntoResponse {
    if let Err(e) = payload.validate() {
        return (StatusCode::UNPROCESSABLE_ENTITY, e.to_string()).into_response();
    }

    match CartService::new()
        .update_quantity(claims.user_id(), cart_item_id, payload.quantity)
        .await
    {
        Ok(row) => (StatusCode::OK, Json(CartItemResponse::from(row))).into_response(),
        Err(e @ CartServiceError::ItemNotFound) => {
            (StatusCode::NOT_FOUND, e.to_string()).into_response()
        }
        Err(e @ CartServiceError::InsufficientStock(_)) => {
            (StatusCode::CONFLICT, e.to_string()).into_response()
        }
        Err(e @ CartServiceError::InvalidQuantity) => {
            (StatusCode::UNPROCESSABLE_ENTITY, e.to_string()).into_response()
        }
        Err(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Database error").into_response(),
    }
}

/// Idempotent removal; reports whether a row was actually deleted
pub async fn remove_from_cart(
    claims: AccessClaims,
    Path(cart_item_id): Path<i32>,
) -> impl IntoResponse {
    match CartService::new()
        .remove_from_cart(claims.user_id(), cart_item_id)
        .await
    {
        Ok(removed) => (StatusCode::OK, Json(RemovedResponse { removed })).into_response(),
        Err(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Database error").into_response(),
    }
}
