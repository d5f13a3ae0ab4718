use crate::api::response::{
    BookResponse, CartItemResponse, OrderItemResponse, OrderResponse, ReviewResponse,
    UserResponse,
};
use crate::data::models::book::Book;
use crate::data::models::cart_item::CartItem;
use crate::data::models::order::Order;
use crate::data::models::order_item::OrderItem;
use crate::data::models::review::Review;
use crate::data::models::user::User;
use bigdecimal::{BigDecimal, FromPrimitive, RoundingMode, ToPrimitive};

/// Currency leaves the API as a plain number.
pub fn money_to_f64(amount: &BigDecimal) -> f64 {
    amount.to_f64().unwrap_or_default()
}

/// Currency entering the API is rounded to two decimals before it is stored.
/// None for non-finite input.
pub fn money_from_f64(value: f64) -> Option<BigDecimal> {
    BigDecimal::from_f64(value).map(|d| d.with_scale_round(2, RoundingMode::HalfUp))
}

fn fmt_timestamp(ts: Option<chrono::NaiveDateTime>) -> Option<String> {
    ts.map(|dt| dt.format("%Y-%m-%d %H:%M:%S").to_string())
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        UserResponse {
            user_id: user.user_id,
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
        }
    }
}

impl From<Book> for BookResponse {
    fn from(book: Book) -> Self {
        BookResponse {
            book_id: book.book_id,
            title: book.title,
            author: book.author,
            isbn: book.isbn,
            description: book.description,
            price: money_to_f64(&book.price),
            stock_quantity: book.stock_quantity,
            category: book.category,
            publication_year: book.publication_year,
            publisher: book.publisher,
            cover_image_url: book.cover_image_url,
            created_at: fmt_timestamp(book.created_at),
            updated_at: fmt_timestamp(book.updated_at),
        }
    }
}

impl From<(CartItem, Book)> for CartItemResponse {
    fn from((item, book): (CartItem, Book)) -> Self {
        CartItemResponse {
            cart_item_id: item.cart_item_id,
            quantity: item.quantity,
            book: BookResponse::from(book),
        }
    }
}

impl From<(OrderItem, Book)> for OrderItemResponse {
    fn from((item, book): (OrderItem, Book)) -> Self {
        OrderItemResponse {
            book_id: item.book_id,
            title: book.title,
            quantity: item.quantity,
            price_at_time: money_to_f64(&item.price_at_time),
        }
    }
}

impl From<(Order, Vec<(OrderItem, Book)>)> for OrderResponse {
    fn from((order, items): (Order, Vec<(OrderItem, Book)>)) -> Self {
        OrderResponse {
            order_id: order.order_id,
            total_amount: money_to_f64(&order.total_amount),
            status: order.status,
            shipping_address: order.shipping_address,
            items: items.into_iter().map(OrderItemResponse::from).collect(),
            created_at: fmt_timestamp(order.created_at),
        }
    }
}

impl From<(Review, User)> for ReviewResponse {
    fn from((review, user): (Review, User)) -> Self {
        ReviewResponse {
            review_id: review.review_id,
            book_id: review.book_id,
            rating: review.rating,
            comment: review.comment,
            reviewer_name: user.display_name(),
            created_at: fmt_timestamp(review.created_at),
        }
    }
}
