use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use bookstore_server_lib::api::response::{LoginResponse, UserResponse};
use bookstore_server_lib::api::server;
use bookstore_server_lib::data::database::Database;
use diesel::result;
use diesel_async::RunQueryDsl;
use http_body_util::BodyExt;
use serde_json::json;
use tower::ServiceExt;

async fn setup() -> Result<(), result::Error> {
    let db = Database::new().await;

    let mut conn = db
        .get_connection()
        .await
        .expect("Failed to get a database connection");

    use bookstore_server_lib::data::models::schema::cart_items::dsl::cart_items;
    use bookstore_server_lib::data::models::schema::order_items::dsl::order_items;
    use bookstore_server_lib::data::models::schema::orders::dsl::orders;
    use bookstore_server_lib::data::models::schema::reviews::dsl::reviews;
    use bookstore_server_lib::data::models::schema::users::dsl::users;

    diesel::delete(reviews).execute(&mut conn).await?;
    diesel::delete(order_items).execute(&mut conn).await?;
    diesel::delete(orders).execute(&mut conn).await?;
    diesel::delete(cart_items).execute(&mut conn).await?;
    diesel::delete(users).execute(&mut conn).await?;

    Ok(())
}

fn json_request(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("Failed to build request")
}

async fn register(app: &axum::Router, email: &str) -> StatusCode {
    let response = app
        .clone()
        .oneshot(json_request(
            "/api/v1/auth/register",
            json!({
                "email": email,
                "password": "password123",
                "first_name": "Ada",
                "last_name": "Lovelace",
            }),
        ))
        .await
        .expect("Request failed");

    response.status()
}

#[tokio::test]
#[serial_test::serial]
async fn test_register_returns_created_user_without_password() {
    setup().await.expect("Setup failed");

    let app = server::app();

    let response = app
        .oneshot(json_request(
            "/api/v1/auth/register",
            json!({
                "email": "ada@example.com",
                "password": "password123",
                "first_name": "Ada",
                "last_name": "Lovelace",
            }),
        ))
        .await
        .expect("Request failed");

    assert_eq!(response.status(), StatusCode::CREATED);

    let body = response
        .into_body()
        .collect()
        .await
        .expect("Failed to read body")
        .to_bytes();
    let user: UserResponse = serde_json::from_slice(&body).expect("Invalid response body");

    assert_eq!(user.email, "ada@example.com");
    assert_eq!(user.first_name, "Ada");

    // The serialized form must not leak any credential material.
    let raw = String::from_utf8(body.to_vec()).expect("Body is not UTF-8");
    assert!(!raw.contains("password"));
}

#[tokio::test]
#[serial_test::serial]
async fn test_register_duplicate_email_conflicts() {
    setup().await.expect("Setup failed");

    let app = server::app();

    assert_eq!(register(&app, "ada@example.com").await, StatusCode::CREATED);
    assert_eq!(register(&app, "ada@example.com").await, StatusCode::CONFLICT);
}

#[tokio::test]
#[serial_test::serial]
async fn test_register_validates_payload() {
    setup().await.expect("Setup failed");

    let response = server::app()
        .oneshot(json_request(
            "/api/v1/auth/register",
            json!({
                "email": "not-an-email",
                "password": "password123",
                "first_name": "Ada",
                "last_name": "Lovelace",
            }),
        ))
        .await
        .expect("Request failed");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
#[serial_test::serial]
async fn test_login_issues_token_and_rejects_bad_credentials_alike() {
    setup().await.expect("Setup failed");

    let app = server::app();
    assert_eq!(register(&app, "ada@example.com").await, StatusCode::CREATED);

    let ok = app
        .clone()
        .oneshot(json_request(
            "/api/v1/auth/login",
            json!({"email": "ada@example.com", "password": "password123"}),
        ))
        .await
        .expect("Request failed");

    assert_eq!(ok.status(), StatusCode::OK);

    let body = ok
        .into_body()
        .collect()
        .await
        .expect("Failed to read body")
        .to_bytes();
    let login: LoginResponse = serde_json::from_slice(&body).expect("Invalid response body");
    assert!(!login.token.is_empty());
    assert_eq!(login.user.email, "ada@example.com");

    // Wrong password and unknown email produce the same status and message.
    let wrong_password = app
        .clone()
        .oneshot(json_request(
            "/api/v1/auth/login",
            json!({"email": "ada@example.com", "password": "wrong"}),
        ))
        .await
        .expect("Request failed");
    let unknown_email = app
        .clone()
        .oneshot(json_request(
            "/api/v1/auth/login",
            json!({"email": "nobody@example.com", "password": "password123"}),
        ))
        .await
        .expect("Request failed");

    assert_eq!(wrong_password.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_email.status(), StatusCode::UNAUTHORIZED);

    let wrong_body = wrong_password.into_body().collect().await.unwrap().to_bytes();
    let unknown_body = unknown_email.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(wrong_body, unknown_body);
}

#[tokio::test]
#[serial_test::serial]
async fn test_protected_routes_require_a_valid_token() {
    setup().await.expect("Setup failed");

    let app = server::app();
    assert_eq!(register(&app, "ada@example.com").await, StatusCode::CREATED);

    let login = app
        .clone()
        .oneshot(json_request(
            "/api/v1/auth/login",
            json!({"email": "ada@example.com", "password": "password123"}),
        ))
        .await
        .expect("Request failed");
    let body = login.into_body().collect().await.unwrap().to_bytes();
    let login: LoginResponse = serde_json::from_slice(&body).expect("Invalid response body");

    // No Authorization header.
    let anonymous = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/v1/cart")
                .body(Body::empty())
                .expect("Failed to build request"),
        )
        .await
        .expect("Request failed");
    assert_eq!(anonymous.status(), StatusCode::UNAUTHORIZED);

    // Garbage token.
    let forged = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/v1/cart")
                .header(header::AUTHORIZATION, "Bearer not.a.token")
                .body(Body::empty())
                .expect("Failed to build request"),
        )
        .await
        .expect("Request failed");
    assert_eq!(forged.status(), StatusCode::UNAUTHORIZED);

    // The real token reaches the handler and reads an empty cart.
    let authed = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/v1/cart")
                .header(
                    header::AUTHORIZATION,
                    format!("Bearer {}", login.token),
                )
                .body(Body::empty())
                .expect("Failed to build request"),
        )
        .await
        .expect("Request failed");
    assert_eq!(authed.status(), StatusCode::OK);

    let cart = authed.into_body().collect().await.unwrap().to_bytes();
    let items: Vec<serde_json::Value> =
        serde_json::from_slice(&cart).expect("Invalid response body");
    assert!(items.is_empty());
}
