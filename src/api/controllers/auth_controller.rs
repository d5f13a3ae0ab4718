use crate::api::request::{LoginRequest, RegisterRequest};
use crate::api::response::{LoginResponse, UserResponse};
use crate::security::jwt::JwtService;
use crate::services::errors::UserServiceError;
use crate::services::user_service::UserService;
use axum::Json;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use validator::Validate;

/// Register a new account
pub async fn register_user(Json(payload): Json<RegisterRequest>) -> impl IntoResponse {
    if let Err(e) = payload.validate() {
        return (StatusCode::UNPROCESSABLE_ENTITY, e.to_string()).into_response();
    }

    let service = UserService::new();

    match service
        .register(
            &payload.email,
            &payload.password,
            &payload.first_name,
            &payload.last_name,
        )
        .await
    {
        Ok(user) => (StatusCode::CREATED, Json(UserResponse::from(user))).into_response(),
        Err(e @ UserServiceError::EmailAlreadyRegistered) => {
            (StatusCode::CONFLICT, e.to_string()).into_response()
        }
        Err(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Database error").into_response(),
    }
}

/// Exchange credentials for an access token
pub async fn login(Json(payload): Json<LoginRequest>) -> impl IntoResponse {
    let service = UserService::new();

    match service.login(&payload.email, &payload.password).await {
        Ok(user) => match JwtService::new().generate_token(user.user_id) {
            Ok(token) => (
                StatusCode::OK,
                Json(LoginResponse {
                    token,
                    user: UserResponse::from(user),
                }),
            )
                .into_response(),
            Err(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Token creation failed").into_response()
            }
        },
        Err(e @ UserServiceError::InvalidCredentials) => {
            (StatusCode::UNAUTHORIZED, e.to_string()).into_response()
        }
        Err(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Database error").into_response(),
    }
}
