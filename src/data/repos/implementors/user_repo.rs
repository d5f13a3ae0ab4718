use crate::data::database::Database;
use crate::data::models::user::{NewUser, UpdateUser, User};
use crate::data::repos::traits::repository::Repository;
use async_trait::async_trait;
use diesel::prelude::*;
use diesel::result;
use diesel_async::RunQueryDsl;

pub struct UserRepo {}

impl UserRepo {
    pub fn new() -> Self {
        UserRepo {}
    }

    pub async fn get_by_email(&self, email_query: &str) -> Result<Option<User>, result::Error> {
        use crate::data::models::schema::users::dsl::{email, users};

        let db = Database::new().await;
        let mut conn = db.connection().await?;

        match users
            .filter(email.eq(email_query))
            .first::<User>(&mut conn)
            .await
        {
            Ok(value) => Ok(Some(value)),
            Err(result::Error::NotFound) => Ok(None),
            Err(e) => Err(e),
        }
    }
}

impl Default for UserRepo {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Repository for UserRepo {
    type Id = i32;
    type Item = User;
    type NewItem<'a> = NewUser<'a>;
    type UpdateForm<'a> = UpdateUser<'a>;

    async fn get_all(&self) -> Result<Option<Vec<Self::Item>>, result::Error> {
        use crate::data::models::schema::users::dsl::users;

        let db = Database::new().await;
        let mut conn = db.connection().await?;

        match users.load::<Self::Item>(&mut conn).await {
            Ok(value) if value.is_empty() => Ok(None),
            Ok(value) => Ok(Some(value)),
            Err(result::Error::NotFound) => Ok(None),
            Err(e) => Err(e),
        }
    }

    async fn get_by_id(&self, id: Self::Id) -> Result<Option<Self::Item>, result::Error> {
        use crate::data::models::schema::users::dsl::{user_id, users};

        let db = Database::new().await;
        let mut conn = db.connection().await?;

        match users
            .filter(user_id.eq(id))
            .first::<Self::Item>(&mut conn)
            .await
        {
            Ok(value) => Ok(Some(value)),
            Err(result::Error::NotFound) => Ok(None),
            Err(e) => Err(e),
        }
    }

    async fn add(&self, item: Self::NewItem<'_>) -> Result<(), result::Error> {
        use crate::data::models::schema::users::dsl::users;

        let db = Database::new().await;
        let mut conn = db.connection().await?;

        diesel::insert_into(users)
            .values(&item)
            .execute(&mut conn)
            .await?;

        Ok(())
    }

    async fn update(&self, id: Self::Id, form: Self::UpdateForm<'_>) -> Result<(), result::Error> {
        use crate::data::models::schema::users::dsl::{user_id, users};

        let db = Database::new().await;
        let mut conn = db.connection().await?;

        diesel::update(users.filter(user_id.eq(id)))
            .set(&form)
            .execute(&mut conn)
            .await?;

        Ok(())
    }

    async fn delete(&self, id: Self::Id) -> Result<bool, result::Error> {
        use crate::data::models::schema::users::dsl::{user_id, users};

        let db = Database::new().await;
        let mut conn = db.connection().await?;

        let deleted = diesel::delete(users.filter(user_id.eq(id)))
            .execute(&mut conn)
            .await?;

        Ok(deleted > 0)
    }
}
