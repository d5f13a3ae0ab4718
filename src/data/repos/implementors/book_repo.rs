use crate::data::database::Database;
use crate::data::models::book::{Book, NewBook, UpdateBook};
use crate::data::repos::traits::repository::Repository;
use async_trait::async_trait;
use bigdecimal::BigDecimal;
use diesel::prelude::*;
use diesel::result;
use diesel_async::RunQueryDsl;

/// Optional catalog filters; independently-applicable, composed as an
/// intersection. Matching is case-insensitive (MySQL CI collation on LIKE).
#[derive(Debug, Default, Clone)]
pub struct BookSearchFilter {
    pub query: Option<String>,
    pub category: Option<String>,
    pub author: Option<String>,
    pub min_price: Option<BigDecimal>,
    pub max_price: Option<BigDecimal>,
    pub limit: i64,
    pub offset: i64,
}

pub struct BookRepo {}

impl BookRepo {
    pub fn new() -> Self {
        BookRepo {}
    }

    /// Inserts a book and returns its generated id. The id read has to happen
    /// on the inserting connection since LAST_INSERT_ID() is per-connection.
    pub async fn add_returning_id(&self, item: NewBook<'_>) -> Result<i32, result::Error> {
        use crate::data::models::schema::books::dsl::books;

        let db = Database::new().await;
        let mut conn = db.connection().await?;

        diesel::insert_into(books)
            .values(&item)
            .execute(&mut conn)
            .await?;

        let new_id: i64 = diesel::select(diesel::dsl::sql::<diesel::sql_types::BigInt>(
            "LAST_INSERT_ID()",
        ))
        .get_result(&mut conn)
        .await?;

        Ok(new_id as i32)
    }

    /// Filtered catalog listing, newest-first, limit/offset paged.
    pub async fn search(&self, filter: &BookSearchFilter) -> Result<Vec<Book>, result::Error> {
        use crate::data::models::schema::books::dsl::{
            author, book_id, books, category, created_at, price, title,
        };
        use crate::data::models::schema::books::dsl::description;

        let db = Database::new().await;
        let mut conn = db.connection().await?;

        let mut query = books.into_boxed();

        if let Some(q) = &filter.query {
            let pattern = format!("%{}%", q);
            query = query.filter(
                title
                    .like(pattern.clone())
                    .or(author.like(pattern.clone()))
                    .or(description.assume_not_null().like(pattern)),
            );
        }

        if let Some(cat) = &filter.category {
            query = query.filter(category.eq(cat.clone()));
        }

        if let Some(a) = &filter.author {
            query = query.filter(author.like(format!("%{}%", a)));
        }

        if let Some(min) = &filter.min_price {
            query = query.filter(price.ge(min.clone()));
        }

        if let Some(max) = &filter.max_price {
            query = query.filter(price.le(max.clone()));
        }

        query
            .order((created_at.desc(), book_id.desc()))
            .limit(filter.limit)
            .offset(filter.offset)
            .load::<Book>(&mut conn)
            .await
    }
}

impl Default for BookRepo {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Repository for BookRepo {
    type Id = i32;
    type Item = Book;
    type NewItem<'a> = NewBook<'a>;
    type UpdateForm<'a> = UpdateBook<'a>;

    async fn get_all(&self) -> Result<Option<Vec<Self::Item>>, result::Error> {
        use crate::data::models::schema::books::dsl::books;

        let db = Database::new().await;
        let mut conn = db.connection().await?;

        match books.load::<Self::Item>(&mut conn).await {
            Ok(value) if value.is_empty() => Ok(None),
            Ok(value) => Ok(Some(value)),
            Err(result::Error::NotFound) => Ok(None),
            Err(e) => Err(e),
        }
    }

    async fn get_by_id(&self, id: Self::Id) -> Result<Option<Self::Item>, result::Error> {
        use crate::data::models::schema::books::dsl::{book_id, books};

        let db = Database::new().await;
        let mut conn = db.connection().await?;

        match books
            .filter(book_id.eq(id))
            .first::<Self::Item>(&mut conn)
            .await
        {
            Ok(value) => Ok(Some(value)),
            Err(result::Error::NotFound) => Ok(None),
            Err(e) => Err(e),
        }
    }

    async fn add(&self, item: Self::NewItem<'_>) -> Result<(), result::Error> {
        self.add_returning_id(item).await.map(|_| ())
    }

    async fn update(&self, id: Self::Id, form: Self::UpdateForm<'_>) -> Result<(), result::Error> {
        use crate::data::models::schema::books::dsl::{book_id, books};

        let db = Database::new().await;
        let mut conn = db.connection().await?;

        diesel::update(books.filter(book_id.eq(id)))
            .set(&form)
            .execute(&mut conn)
            .await?;

        Ok(())
    }

    async fn delete(&self, id: Self::Id) -> Result<bool, result::Error> {
        use crate::data::models::schema::books::dsl::{book_id, books};

        let db = Database::new().await;
        let mut conn = db.connection().await?;

        let deleted = diesel::delete(books.filter(book_id.eq(id)))
            .execute(&mut conn)
            .await?;

        Ok(deleted > 0)
    }
}
