use crate::data::models::book::{Book, NewBook, UpdateBook};
use crate::data::repos::implementors::book_repo::{BookRepo, BookSearchFilter};
use crate::data::repos::traits::repository::Repository;
use crate::services::errors::BookServiceError;
use bigdecimal::BigDecimal;

pub const DEFAULT_PAGE_SIZE: i64 = 20;
pub const MAX_PAGE_SIZE: i64 = 100;

/// Raw (unclamped) catalog query as it arrives from the caller.
#[derive(Debug, Default, Clone)]
pub struct BookQuery {
    pub query: Option<String>,
    pub category: Option<String>,
    pub author: Option<String>,
    pub min_price: Option<BigDecimal>,
    pub max_price: Option<BigDecimal>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

pub struct BookService;

impl BookService {
    pub fn new() -> Self {
        BookService
    }

    pub async fn create_book(&self, new_book: NewBook<'_>) -> Result<Book, BookServiceError> {
        if new_book.price <= BigDecimal::from(0) {
            return Err(BookServiceError::InvalidPrice);
        }

        let repo = BookRepo::new();

        let id = repo
            .add_returning_id(new_book)
            .await
            .map_err(|_| BookServiceError::DatabaseError)?;

        repo.get_by_id(id)
            .await
            .map_err(|_| BookServiceError::DatabaseError)?
            .ok_or(BookServiceError::DatabaseError)
    }

    /// Partial patch: only supplied fields change, everything else keeps its
    /// prior value.
    pub async fn update_book(
        &self,
        book_id: i32,
        form: UpdateBook<'_>,
    ) -> Result<Book, BookServiceError> {
        if let Some(price) = &form.price {
            if *price <= BigDecimal::from(0) {
                return Err(BookServiceError::InvalidPrice);
            }
        }

        let repo = BookRepo::new();

        let existing = repo
            .get_by_id(book_id)
            .await
            .map_err(|_| BookServiceError::DatabaseError)?
            .ok_or(BookServiceError::BookNotFound)?;

        if !form.has_changes() {
            return Ok(existing);
        }

        repo.update(book_id, form)
            .await
            .map_err(|_| BookServiceError::DatabaseError)?;

        repo.get_by_id(book_id)
            .await
            .map_err(|_| BookServiceError::DatabaseError)?
            .ok_or(BookServiceError::BookNotFound)
    }

    /// Absent is not an error for single-book lookups.
    pub async fn get_book(&self, book_id: i32) -> Result<Option<Book>, BookServiceError> {
        BookRepo::new()
            .get_by_id(book_id)
            .await
            .map_err(|_| BookServiceError::DatabaseError)
    }

    /// Catalog search with paging defaults applied: limit 20, capped at 100,
    /// offset 0.
    pub async fn search_books(&self, query: BookQuery) -> Result<Vec<Book>, BookServiceError> {
        let limit = query
            .limit
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .clamp(1, MAX_PAGE_SIZE);
        let offset = query.offset.unwrap_or(0).max(0);

        let filter = BookSearchFilter {
            query: query.query,
            category: query.category,
            author: query.author,
            min_price: query.min_price,
            max_price: query.max_price,
            limit,
            offset,
        };

        BookRepo::new()
            .search(&filter)
            .await
            .map_err(|_| BookServiceError::DatabaseError)
    }
}

impl Default for BookService {
    fn default() -> Self {
        Self::new()
    }
}
