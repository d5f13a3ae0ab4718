#[derive(Debug, PartialEq)]
pub enum UserServiceError {
    EmailAlreadyRegistered,
    InvalidCredentials,
    DatabaseError,
}

impl std::error::Error for UserServiceError {}

impl std::fmt::Display for UserServiceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UserServiceError::EmailAlreadyRegistered => {
                write!(f, "An account with this email already exists")
            }
            // Deliberately the same message for unknown email and wrong
            // password so accounts cannot be enumerated.
            UserServiceError::InvalidCredentials => write!(f, "Invalid email or password"),
            UserServiceError::DatabaseError => write!(f, "Database error"),
        }
    }
}

#[derive(Debug, PartialEq)]
pub enum BookServiceError {
    BookNotFound,
    InvalidPrice,
    DatabaseError,
}

impl std::error::Error for BookServiceError {}

impl std::fmt::Display for BookServiceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BookServiceError::BookNotFound => write!(f, "Book not found"),
            BookServiceError::InvalidPrice => write!(f, "Price must be a positive amount"),
            BookServiceError::DatabaseError => write!(f, "Database error"),
        }
    }
}

#[derive(Debug, PartialEq)]
pub enum CartServiceError {
    BookNotFound,
    ItemNotFound,
    InvalidQuantity,
    /// Carries the title of the book that cannot cover the requested quantity.
    InsufficientStock(String),
    DatabaseError,
}

impl std::error::Error for CartServiceError {}

impl std::fmt::Display for CartServiceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CartServiceError::BookNotFound => write!(f, "Book not found"),
            CartServiceError::ItemNotFound => write!(f, "Cart item not found"),
            CartServiceError::InvalidQuantity => write!(f, "Quantity must be positive"),
            CartServiceError::InsufficientStock(title) => {
                write!(f, "Insufficient stock for: {}", title)
            }
            CartServiceError::DatabaseError => write!(f, "Database error"),
        }
    }
}

#[derive(Debug, PartialEq)]
pub enum OrderServiceError {
    EmptyCart,
    /// Titles of every book whose cart quantity exceeds current stock.
    InsufficientStock(Vec<String>),
    AddressTooShort,
    OrderNotFound,
    InvalidStatus,
    InvalidStatusTransition,
    DatabaseError,
}

impl std::error::Error for OrderServiceError {}

impl std::fmt::Display for OrderServiceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrderServiceError::EmptyCart => write!(f, "Cart is empty"),
            OrderServiceError::InsufficientStock(titles) => {
                write!(f, "Insufficient stock for: {}", titles.join(", "))
            }
            OrderServiceError::AddressTooShort => {
                write!(f, "Shipping address must be at least 10 characters")
            }
            OrderServiceError::OrderNotFound => write!(f, "Order not found"),
            OrderServiceError::InvalidStatus => write!(f, "Unknown order status"),
            OrderServiceError::InvalidStatusTransition => write!(f, "Invalid status transition"),
            OrderServiceError::DatabaseError => write!(f, "Database error"),
        }
    }
}

#[derive(Debug, PartialEq)]
pub enum ReviewServiceError {
    BookNotFound,
    PurchaseRequired,
    AlreadyReviewed,
    ReviewNotFound,
    InvalidRating,
    DatabaseError,
}

impl std::error::Error for ReviewServiceError {}

impl std::fmt::Display for ReviewServiceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReviewServiceError::BookNotFound => write!(f, "Book not found"),
            ReviewServiceError::PurchaseRequired => {
                write!(f, "Only customers who purchased this book can review it")
            }
            ReviewServiceError::AlreadyReviewed => {
                write!(f, "You have already reviewed this book")
            }
            ReviewServiceError::ReviewNotFound => write!(f, "Review not found"),
            ReviewServiceError::InvalidRating => write!(f, "Rating must be between 1 and 5"),
            ReviewServiceError::DatabaseError => write!(f, "Database error"),
        }
    }
}
