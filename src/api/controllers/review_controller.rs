use crate::api::request::{CreateReviewRequest, UpdateReviewRequest};
use crate::api::response::{RemovedResponse, ReviewResponse};
use crate::data::models::review::UpdateReview;
use crate::security::jwt::AccessClaims;
use crate::services::errors::ReviewServiceError;
use crate::services::review_service::ReviewService;
use axum::Json;
use axum::extract::Path;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use validator::Validate;

/// All reviews for a book, with reviewer names, newest first
pub async fn list_reviews(Path(book_id): Path<i32>) -> impl IntoResponse {
    match ReviewService::new().list_reviews(book_id).await {
        Ok(rows) => {
            let response: Vec<ReviewResponse> =
                rows.into_iter().map(ReviewResponse::from).collect();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Database error").into_response(),
    }
}

/// Review a purchased book
pub async fn create_review(
    claims: AccessClaims,
    Json(payload): Json<CreateReviewRequest>,
) -> impl IntoResponse {
    if let Err(e) = payload.validate() {
        return (StatusCode::UNPROCESSABLE_ENTITY, e.to_string()).into_response();
    }

    match ReviewService::new()
        .create_review(
            claims.user_id(),
            payload.book_id,
            payload.rating,
            payload.comment.as_deref(),
        )
        .await
    {
        Ok(row) => (StatusCode::CREATED, Json(ReviewResponse::from(row))).into_response(),
        Err(e @ ReviewServiceError::BookNotFound) => {
            (StatusCode::NOT_FOUND, e.to_string()).into_response()
        }
        Err(e @ ReviewServiceError::PurchaseRequired) => {
            (StatusCode::FORBIDDEN, e.to_string()).into_response()
        }
        Err(e @ ReviewServiceError::AlreadyReviewed) => {
            (StatusCode::CONFLICT, e.to_string()).into_response()
        }
        Err(e @ ReviewServiceError::InvalidRating) => {
            (StatusCode::UNPROCESSABLE_ENTITY, e.to_string()).into_response()
        }
        Err(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Database error").into_response(),
    }
}

/// Patch the caller's own review
pub async fn update_review(
    claims: AccessClaims,
    Path(review_id): Path<i32>,
    Json(payload): Json<UpdateReviewRequest>,
) -> impl IntoResponse {
    if let Err(e) = payload.validate() {
        return (StatusCode::UNPROCESSABLE_ENTITY, e.to_string()).into_response();
    }

    let form = UpdateReview {
        rating: payload.rating,
        comment: payload.comment.as_ref().map(|o| o.as_deref()),
    };

    match ReviewService::new()
        .update_review(claims.user_id(), review_id, form)
        .await
    {
        Ok(row) => (StatusCode::OK, Json(ReviewResponse::from(row))).into_response(),
        Err(e @ ReviewServiceError::ReviewNotFound) => {
            (StatusCode::NOT_FOUND, e.to_string()).into_response()
        }
        Err(e @ ReviewServiceError::InvalidRating) => {
            (StatusCode::UNPROCESSABLE_ENTITY, e.to_string()).into_response()
        }
        Err(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Database error").into_response(),
    }
}

/// Idempotent removal of the caller's own review
pub async fn delete_review(
    claims: AccessClaims,
    Path(review_id): Path<i32>,
) -> impl IntoResponse {
    match ReviewService::new()
        .delete_review(claims.user_id(), review_id)
        .await
    {
        Ok(removed) => (StatusCode::OK, Json(RemovedResponse { removed })).into_response(),
        Err(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Database error").into_response(),
    }
}
