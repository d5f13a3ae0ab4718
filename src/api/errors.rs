use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

#[derive(Debug)]
pub enum APIErrors {
    Unauthorized,
}

impl IntoResponse for APIErrors {
    fn into_response(self) -> Response {
        match self {
            APIErrors::Unauthorized => {
                (StatusCode::UNAUTHORIZED, "Invalid or missing credentials").into_response()
            }
        }
    }
}
