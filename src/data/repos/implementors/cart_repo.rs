use crate::data::database::Database;
use crate::data::models::book::Book;
use crate::data::models::cart_item::{CartItem, NewCartItem, UpdateCartItem};
use crate::data::repos::traits::repository::Repository;
use async_trait::async_trait;
use diesel::prelude::*;
use diesel::result;
use diesel_async::RunQueryDsl;

pub struct CartRepo {}

impl CartRepo {
    pub fn new() -> Self {
        CartRepo {}
    }

    /// All cart rows for a user, each joined with its book for display.
    pub async fn get_by_user(&self, uid: i32) -> Result<Vec<(CartItem, Book)>, result::Error> {
        use crate::data::models::schema::books::dsl::books;
        use crate::data::models::schema::cart_items::dsl::{cart_item_id, cart_items, user_id};

        let db = Database::new().await;
        let mut conn = db.connection().await?;

        cart_items
            .inner_join(books)
            .filter(user_id.eq(uid))
            .order(cart_item_id.asc())
            .select((CartItem::as_select(), Book::as_select()))
            .load::<(CartItem, Book)>(&mut conn)
            .await
    }

    pub async fn get_by_user_and_book(
        &self,
        uid: i32,
        bid: i32,
    ) -> Result<Option<CartItem>, result::Error> {
        use crate::data::models::schema::cart_items::dsl::{book_id, cart_items, user_id};

        let db = Database::new().await;
        let mut conn = db.connection().await?;

        match cart_items
            .filter(user_id.eq(uid))
            .filter(book_id.eq(bid))
            .first::<CartItem>(&mut conn)
            .await
        {
            Ok(value) => Ok(Some(value)),
            Err(result::Error::NotFound) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// A single cart row joined with its book, scoped to the owning user so
    /// another user's row reads as absent.
    pub async fn get_owned_with_book(
        &self,
        id: i32,
        uid: i32,
    ) -> Result<Option<(CartItem, Book)>, result::Error> {
        use crate::data::models::schema::books::dsl::books;
        use crate::data::models::schema::cart_items::dsl::{cart_item_id, cart_items, user_id};

        let db = Database::new().await;
        let mut conn = db.connection().await?;

        match cart_items
            .inner_join(books)
            .filter(cart_item_id.eq(id))
            .filter(user_id.eq(uid))
            .select((CartItem::as_select(), Book::as_select()))
            .first::<(CartItem, Book)>(&mut conn)
            .await
        {
            Ok(value) => Ok(Some(value)),
            Err(result::Error::NotFound) => Ok(None),
            Err(e) => Err(e),
        }
    }

    pub async fn set_quantity(&self, id: i32, qty: i32) -> Result<(), result::Error> {
        use crate::data::models::schema::cart_items::dsl::{cart_item_id, cart_items, quantity};

        let db = Database::new().await;
        let mut conn = db.connection().await?;

        diesel::update(cart_items.filter(cart_item_id.eq(id)))
            .set(quantity.eq(qty))
            .execute(&mut conn)
            .await?;

        Ok(())
    }

    /// Owner-scoped removal. Idempotent: a miss (or someone else's row)
    /// reports false rather than an error.
    pub async fn remove_owned(&self, id: i32, uid: i32) -> Result<bool, result::Error> {
        use crate::data::models::schema::cart_items::dsl::{cart_item_id, cart_items, user_id};

        let db = Database::new().await;
        let mut conn = db.connection().await?;

        let deleted = diesel::delete(
            cart_items
                .filter(cart_item_id.eq(id))
                .filter(user_id.eq(uid)),
        )
        .execute(&mut conn)
        .await?;

        Ok(deleted > 0)
    }
}

impl Default for CartRepo {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Repository for CartRepo {
    type Id = i32;
    type Item = CartItem;
    type NewItem<'a> = NewCartItem;
    type UpdateForm<'a> = UpdateCartItem;

    async fn get_all(&self) -> Result<Option<Vec<Self::Item>>, result::Error> {
        use crate::data::models::schema::cart_items::dsl::cart_items;

        let db = Database::new().await;
        let mut conn = db.connection().await?;

        match cart_items.load::<Self::Item>(&mut conn).await {
            Ok(value) if value.is_empty() => Ok(None),
            Ok(value) => Ok(Some(value)),
            Err(result::Error::NotFound) => Ok(None),
            Err(e) => Err(e),
        }
    }

    async fn get_by_id(&self, id: Self::Id) -> Result<Option<Self::Item>, result::Error> {
        use crate::data::models::schema::cart_items::dsl::{cart_item_id, cart_items};

        let db = Database::new().await;
        let mut conn = db.connection().await?;

        match cart_items
            .filter(cart_item_id.eq(id))
            .first::<Self::Item>(&mut conn)
            .await
        {
            Ok(value) => Ok(Some(value)),
            Err(result::Error::NotFound) => Ok(None),
            Err(e) => Err(e),
        }
    }

    async fn add(&self, item: Self::NewItem<'_>) -> Result<(), result::Error> {
        use crate::data::models::schema::cart_items::dsl::cart_items;

        let db = Database::new().await;
        let mut conn = db.connection().await?;

        diesel::insert_into(cart_items)
            .values(&item)
            .execute(&mut conn)
            .await?;

        Ok(())
    }

    async fn update(&self, id: Self::Id, form: Self::UpdateForm<'_>) -> Result<(), result::Error> {
        use crate::data::models::schema::cart_items::dsl::{cart_item_id, cart_items};

        let db = Database::new().await;
        let mut conn = db.connection().await?;

        diesel::update(cart_items.filter(cart_item_id.eq(id)))
            .set(&form)
            .execute(&mut conn)
            .await?;

        Ok(())
    }

    async fn delete(&self, id: Self::Id) -> Result<bool, result::Error> {
        use crate::data::models::schema::cart_items::dsl::{cart_item_id, cart_items};

        let db = Database::new().await;
        let mut conn = db.connection().await?;

        let deleted = diesel::delete(cart_items.filter(cart_item_id.eq(id)))
            .execute(&mut conn)
            .await?;

        Ok(deleted > 0)
    }
}
