use crate::data::database::Database;
use crate::data::models::review::{NewReview, Review, UpdateReview};
use crate::data::models::user::User;
use crate::data::repos::traits::repository::Repository;
use async_trait::async_trait;
use diesel::prelude::*;
use diesel::result;
use diesel_async::RunQueryDsl;

pub struct ReviewRepo {}

impl ReviewRepo {
    pub fn new() -> Self {
        ReviewRepo {}
    }

    pub async fn get_by_user_and_book(
        &self,
        uid: i32,
        bid: i32,
    ) -> Result<Option<Review>, result::Error> {
        use crate::data::models::schema::reviews::dsl::{book_id, reviews, user_id};

        let db = Database::new().await;
        let mut conn = db.connection().await?;

        match reviews
            .filter(user_id.eq(uid))
            .filter(book_id.eq(bid))
            .first::<Review>(&mut conn)
            .await
        {
            Ok(value) => Ok(Some(value)),
            Err(result::Error::NotFound) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// All reviews for a book joined with the reviewer, newest first.
    pub async fn get_by_book_with_reviewer(
        &self,
        bid: i32,
    ) -> Result<Vec<(Review, User)>, result::Error> {
        use crate::data::models::schema::reviews::dsl::{book_id, review_id, reviews};
        use crate::data::models::schema::users::dsl::users;

        let db = Database::new().await;
        let mut conn = db.connection().await?;

        reviews
            .inner_join(users)
            .filter(book_id.eq(bid))
            .order(review_id.desc())
            .select((Review::as_select(), User::as_select()))
            .load::<(Review, User)>(&mut conn)
            .await
    }

    /// Owner-scoped, idempotent delete.
    pub async fn remove_owned(&self, id: i32, uid: i32) -> Result<bool, result::Error> {
        use crate::data::models::schema::reviews::dsl::{review_id, reviews, user_id};

        let db = Database::new().await;
        let mut conn = db.connection().await?;

        let deleted =
            diesel::delete(reviews.filter(review_id.eq(id)).filter(user_id.eq(uid)))
                .execute(&mut conn)
                .await?;

        Ok(deleted > 0)
    }
}

impl Default for ReviewRepo {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Repository for ReviewRepo {
    type Id = i32;
    type Item = Review;
    type NewItem<'a> = NewReview<'a>;
    type UpdateForm<'a> = UpdateReview<'a>;

    async fn get_all(&self) -> Result<Option<Vec<Self::Item>>, result::Error> {
        use crate::data::models::schema::reviews::dsl::reviews;

        let db = Database::new().await;
        let mut conn = db.connection().await?;

        match reviews.load::<Self::Item>(&mut conn).await {
            Ok(value) if value.is_empty() => Ok(None),
            Ok(value) => Ok(Some(value)),
            Err(result::Error::NotFound) => Ok(None),
            Err(e) => Err(e),
        }
    }

    async fn get_by_id(&self, id: Self::Id) -> Result<Option<Self::Item>, result::Error> {
        use crate::data::models::schema::reviews::dsl::{review_id, reviews};

        let db = Database::new().await;
        let mut conn = db.connection().await?;

        match reviews
            .filter(review_id.eq(id))
            .first::<Self::Item>(&mut conn)
            .await
        {
            Ok(value) => Ok(Some(value)),
            Err(result::Error::NotFound) => Ok(None),
            Err(e) => Err(e),
        }
    }

    async fn add(&self, item: Self::NewItem<'_>) -> Result<(), result::Error> {
        use crate::data::models::schema::reviews::dsl::reviews;

        let db = Database::new().await;
        let mut conn = db.connection().await?;

        diesel::insert_into(reviews)
            .values(&item)
            .execute(&mut conn)
            .await?;

        Ok(())
    }

    async fn update(&self, id: Self::Id, form: Self::UpdateForm<'_>) -> Result<(), result::Error> {
        use crate::data::models::schema::reviews::dsl::{review_id, reviews};

        let db = Database::new().await;
        let mut conn = db.connection().await?;

        diesel::update(reviews.filter(review_id.eq(id)))
            .set(&form)
            .execute(&mut conn)
            .await?;

        Ok(())
    }

    async fn delete(&self, id: Self::Id) -> Result<bool, result::Error> {
        use crate::data::models::schema::reviews::dsl::{review_id, reviews};

        let db = Database::new().await;
        let mut conn = db.connection().await?;

        let deleted = diesel::delete(reviews.filter(review_id.eq(id)))
            .execute(&mut conn)
            .await?;

        Ok(deleted > 0)
    }
}
