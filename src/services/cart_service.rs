use crate::data::models::book::Book;
use crate::data::models::cart_item::{CartItem, NewCartItem};
use crate::data::repos::implementors::book_repo::BookRepo;
use crate::data::repos::implementors::cart_repo::CartRepo;
use crate::data::repos::traits::repository::Repository;
use crate::services::errors::CartServiceError;

pub struct CartService;

impl CartService {
    pub fn new() -> Self {
        CartService
    }

    /// Adds a book to the cart. A second add for the same (user, book) merges
    /// into the existing row; the merged quantity must still fit the book's
    /// current stock. Stock is re-checked at order placement, so a later
    /// stock drop only surfaces there.
    pub async fn add_to_cart(
        &self,
        user_id: i32,
        book_id: i32,
        quantity: i32,
    ) -> Result<(CartItem, Book), CartServiceError> {
        if quantity <= 0 {
            return Err(CartServiceError::InvalidQuantity);
        }

        let book_repo = BookRepo::new();
        let cart_repo = CartRepo::new();

        let book = book_repo
            .get_by_id(book_id)
            .await
            .map_err(|_| CartServiceError::DatabaseError)?
            .ok_or(CartServiceError::BookNotFound)?;

        let existing = cart_repo
            .get_by_user_and_book(user_id, book_id)
            .await
            .map_err(|_| CartServiceError::DatabaseError)?;

        let merged = quantity + existing.as_ref().map(|item| item.quantity).unwrap_or(0);

        if merged > book.stock_quantity {
            return Err(CartServiceError::InsufficientStock(book.title.clone()));
        }

        match existing {
            Some(item) => {
                cart_repo
                    .set_quantity(item.cart_item_id, merged)
                    .await
                    .map_err(|_| CartServiceError::DatabaseError)?;

                self.get_owned(item.cart_item_id, user_id).await
            }
            None => {
                cart_repo
                    .add(NewCartItem {
                        user_id,
                        book_id,
                        quantity,
                    })
                    .await
                    .map_err(|_| CartServiceError::DatabaseError)?;

                let created = cart_repo
                    .get_by_user_and_book(user_id, book_id)
                    .await
                    .map_err(|_| CartServiceError::DatabaseError)?
                    .ok_or(CartServiceError::DatabaseError)?;

                self.get_owned(created.cart_item_id, user_id).await
            }
        }
    }

    /// Replaces the quantity on a cart row the caller owns. Someone else's
    /// row reads as not-found, never forbidden.
    pub async fn update_quantity(
        &self,
        user_id: i32,
        cart_item_id: i32,
        quantity: i32,
    ) -> Result<(CartItem, Book), CartServiceError> {
        if quantity <= 0 {
            return Err(CartServiceError::InvalidQuantity);
        }

        let cart_repo = CartRepo::new();

        let (item, book) = cart_repo
            .get_owned_with_book(cart_item_id, user_id)
            .await
            .map_err(|_| CartServiceError::DatabaseError)?
            .ok_or(CartServiceError::ItemNotFound)?;

        if quantity > book.stock_quantity {
            return Err(CartServiceError::InsufficientStock(book.title));
        }

        cart_repo
            .set_quantity(item.cart_item_id, quantity)
            .await
            .map_err(|_| CartServiceError::DatabaseError)?;

        self.get_owned(cart_item_id, user_id).await
    }

    /// Idempotent: false when no owned row was there to delete.
    pub async fn remove_from_cart(
        &self,
        user_id: i32,
        cart_item_id: i32,
    ) -> Result<bool, CartServiceError> {
        CartRepo::new()
            .remove_owned(cart_item_id, user_id)
            .await
            .map_err(|_| CartServiceError::DatabaseError)
    }

    pub async fn get_cart(&self, user_id: i32) -> Result<Vec<(CartItem, Book)>, CartServiceError> {
        CartRepo::new()
            .get_by_user(user_id)
            .await
            .map_err(|_| CartServiceError::DatabaseError)
    }

    async fn get_owned(
        &self,
        cart_item_id: i32,
        user_id: i32,
    ) -> Result<(CartItem, Book), CartServiceError> {
        CartRepo::new()
            .get_owned_with_book(cart_item_id, user_id)
            .await
            .map_err(|_| CartServiceError::DatabaseError)?
            .ok_or(CartServiceError::DatabaseError)
    }
}

impl Default for CartService {
    fn default() -> Self {
        Self::new()
    }
}
