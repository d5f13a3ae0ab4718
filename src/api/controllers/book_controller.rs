use crate::api::request::{BookSearchParams, CreateBookRequest, UpdateBookRequest};
use crate::api::response::BookResponse;
use crate::data::models::book::{NewBook, UpdateBook};
use crate::security::jwt::AccessClaims;
use crate::services::book_service::{BookQuery, BookService};
use crate::services::errors::BookServiceError;
use crate::utils::mappers::money_from_f64;
use axum::Json;
use axum::extract::{Path, Query};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use validator::Validate;

/// Browse/search the catalog
pub async fn search_books(Query(params): Query<BookSearchParams>) -> impl IntoResponse {
    let min_price = match params.min_price.map(money_from_f64) {
        Some(None) => {
            return (StatusCode::UNPROCESSABLE_ENTITY, "Invalid min_price").into_response();
        }
        other => other.flatten(),
    };
    let max_price = match params.max_price.map(money_from_f64) {
        Some(None) => {
            return (StatusCode::UNPROCESSABLE_ENTITY, "Invalid max_price").into_response();
        }
        other => other.flatten(),
    };

    let query = BookQuery {
        query: params.query,
        category: params.category,
        author: params.author,
        min_price,
        max_price,
        limit: params.limit,
        offset: params.offset,
    };

    match BookService::new().search_books(query).await {
        Ok(books) => {
            let response: Vec<BookResponse> =
                books.into_iter().map(BookResponse::from).collect();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Database error").into_response(),
    }
}

/// Get one book by ID
pub async fn get_book(Path(book_id): Path<i32>) -> impl IntoResponse {
    match BookService::new().get_book(book_id).await {
        Ok(Some(book)) => (StatusCode::OK, Json(BookResponse::from(book))).into_response(),
        Ok(None) => (StatusCode::NOT_FOUND, "Book not found").into_response(),
        Err(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Database error").into_response(),
    }
}

/// Add a book to the catalog
pub async fn create_book(
    _claims: AccessClaims,
    Json(payload): Json<CreateBookRequest>,
) -> impl IntoResponse {
    if let Err(e) = payload.validate() {
        return (StatusCode::UNPROCESSABLE_ENTITY, e.to_string()).into_response();
    }

    let Some(price) = money_from_f64(payload.price) else {
        return (StatusCode::UNPROCESSABLE_ENTITY, "Invalid price").into_response();
    };

    let new_book = NewBook {
        title: &payload.title,
        author: &payload.author,
        isbn: payload.isbn.as_deref(),
        description: payload.description.as_deref(),
        price,
        stock_quantity: payload.stock_quantity,
        category: &payload.category,
        publication_year: payload.publication_year,
        publisher: payload.publisher.as_deref(),
        cover_image_url: payload.cover_image_url.as_deref(),
    };

    match BookService::new().create_book(new_book).await {
        Ok(book) => (StatusCode::CREATED, Json(BookResponse::from(book))).into_response(),
        Err(e @ BookServiceError::InvalidPrice) => {
            (StatusCode::UNPROCESSABLE_ENTITY, e.to_string()).into_response()
        }
        Err(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Database error").into_response(),
    }
}

/// Patch a book; only supplied fields change
pub async fn update_book(
    _claims: AccessClaims,
    Path(book_id): Path<i32>,
    Json(payload): Json<UpdateBookRequest>,
) -> impl IntoResponse {
    let price = match payload.price.map(money_from_f64) {
        Some(None) => {
            return (StatusCode::UNPROCESSABLE_ENTITY, "Invalid price").into_response();
        }
        other => other.flatten(),
    };

    let form = UpdateBook {
        title: payload.title.as_deref(),
        author: payload.author.as_deref(),
        isbn: payload.isbn.as_ref().map(|o| o.as_deref()),
        description: payload.description.as_ref().map(|o| o.as_deref()),
        price,
        stock_quantity: payload.stock_quantity,
        category: payload.category.as_deref(),
        publication_year: payload.publication_year,
        publisher: payload.publisher.as_ref().map(|o| o.as_deref()),
        cover_image_url: payload.cover_image_url.as_ref().map(|o| o.as_deref()),
    };

    match BookService::new().update_book(book_id, form).await {
        Ok(book) => (StatusCode::OK, Json(BookResponse::from(book))).into_response(),
        Err(e @ BookServiceError::BookNotFound) => {
            (StatusCode::NOT_FOUND, e.to_string()).into_response()
        }
        Err(e @ BookServiceError::InvalidPrice) => {
            (StatusCode::UNPROCESSABLE_ENTITY, e.to_string()).into_response()
        }
        Err(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Database error").into_response(),
    }
}
