use serde::Deserialize;
use validator::Validate;

#[derive(Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 8))]
    pub password: String,
    #[validate(length(min = 1))]
    pub first_name: String,
    #[validate(length(min = 1))]
    pub last_name: String,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Deserialize, Validate)]
pub struct CreateBookRequest {
    #[validate(length(min = 1))]
    pub title: String,
    #[validate(length(min = 1))]
    pub author: String,
    pub isbn: Option<String>,
    pub description: Option<String>,
    pub price: f64,
    #[validate(range(min = 0))]
    pub stock_quantity: i32,
    #[validate(length(min = 1))]
    pub category: String,
    pub publication_year: Option<i32>,
    pub publisher: Option<String>,
    pub cover_image_url: Option<String>,
}

/// Partial book patch. Nullable columns are double-Option so a JSON `null`
/// clears the field while an absent key leaves it untouched.
#[derive(Deserialize, Default)]
pub struct UpdateBookRequest {
    pub title: Option<String>,
    pub author: Option<String>,
    #[serde(default, with = "serde_with::rust::double_option")]
    pub isbn: Option<Option<String>>,
    #[serde(default, with = "serde_with::rust::double_option")]
    pub description: Option<Option<String>>,
    pub price: Option<f64>,
    pub stock_quantity: Option<i32>,
    pub category: Option<String>,
    #[serde(default, with = "serde_with::rust::double_option")]
    pub publication_year: Option<Option<i32>>,
    #[serde(default, with = "serde_with::rust::double_option")]
    pub publisher: Option<Option<String>>,
    #[serde(default, with = "serde_with::rust::double_option")]
    pub cover_image_url: Option<Option<String>>,
}

/// Query-string catalog filters; all optional, all intersected.
#[derive(Deserialize, Default)]
pub struct BookSearchParams {
    pub query: Option<String>,
    pub category: Option<String>,
    pub author: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

#[derive(Deserialize, Validate)]
pub struct AddToCartRequest {
    pub book_id: i32,
    #[validate(range(min = 1))]
    pub quantity: i32,
}

#[derive(Deserialize, Validate)]
pub struct UpdateCartItemRequest {
    #[validate(range(min = 1))]
    pub quantity: i32,
}

#[derive(Deserialize, Validate)]
pub struct PlaceOrderRequest {
    #[validate(length(min = 10))]
    pub shipping_address: String,
}

#[derive(Deserialize, Validate)]
pub struct CreateReviewRequest {
    pub book_id: i32,
    #[validate(range(min = 1, max = 5))]
    pub rating: i32,
    pub comment: Option<String>,
}

#[derive(Deserialize, Validate, Default)]
pub struct UpdateReviewRequest {
    #[validate(range(min = 1, max = 5))]
    pub rating: Option<i32>,
    #[serde(default, with = "serde_with::rust::double_option")]
    pub comment: Option<Option<String>>,
}
