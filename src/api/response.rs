use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct UserResponse {
    pub user_id: i32,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserResponse,
}

#[skip_serializing_none]
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct BookResponse {
    pub book_id: i32,
    pub title: String,
    pub author: String,
    pub isbn: Option<String>,
    pub description: Option<String>,
    /// Plain number; two-decimal fidelity is preserved by the DECIMAL(10,2)
    /// storage it came from.
    pub price: f64,
    pub stock_quantity: i32,
    pub category: String,
    pub publication_year: Option<i32>,
    pub publisher: Option<String>,
    pub cover_image_url: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct CartItemResponse {
    pub cart_item_id: i32,
    pub quantity: i32,
    pub book: BookResponse,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct OrderItemResponse {
    pub book_id: i32,
    pub title: String,
    pub quantity: i32,
    pub price_at_time: f64,
}

#[skip_serializing_none]
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct OrderResponse {
    pub order_id: i32,
    pub total_amount: f64,
    pub status: String,
    pub shipping_address: String,
    pub items: Vec<OrderItemResponse>,
    pub created_at: Option<String>,
}

#[skip_serializing_none]
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ReviewResponse {
    pub review_id: i32,
    pub book_id: i32,
    pub rating: i32,
    pub comment: Option<String>,
    pub reviewer_name: String,
    pub created_at: Option<String>,
}

/// Body for the idempotent delete endpoints.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RemovedResponse {
    pub removed: bool,
}
