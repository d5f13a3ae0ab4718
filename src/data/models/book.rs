use crate::data::models::schema::*;
use bigdecimal::BigDecimal;
use diesel::prelude::*;

#[derive(Queryable, Selectable, Identifiable, PartialEq, Debug, Clone)]
#[diesel(table_name = books)]
#[diesel(primary_key(book_id))]
#[diesel(check_for_backend(diesel::mysql::Mysql))]
pub struct Book {
    pub book_id: i32,
    pub title: String,
    pub author: String,
    pub isbn: Option<String>,
    pub description: Option<String>,
    pub price: BigDecimal,
    pub stock_quantity: i32,
    pub category: String,
    pub publication_year: Option<i32>,
    pub publisher: Option<String>,
    pub cover_image_url: Option<String>,
    pub created_at: Option<chrono::NaiveDateTime>,
    pub updated_at: Option<chrono::NaiveDateTime>,
}

#[derive(Insertable, PartialEq, Debug)]
#[diesel(table_name = books)]
pub struct NewBook<'a> {
    pub title: &'a str,
    pub author: &'a str,
    pub isbn: Option<&'a str>,
    pub description: Option<&'a str>,
    pub price: BigDecimal,
    pub stock_quantity: i32,
    pub category: &'a str,
    pub publication_year: Option<i32>,
    pub publisher: Option<&'a str>,
    pub cover_image_url: Option<&'a str>,
}

/// Partial patch for a book. Nullable columns are double-wrapped so that
/// "field absent" (outer None, column untouched) and "field set to null"
/// (Some(None)) stay distinguishable.
#[derive(AsChangeset, PartialEq, Debug, Default)]
#[diesel(table_name = books)]
pub struct UpdateBook<'a> {
    pub title: Option<&'a str>,
    pub author: Option<&'a str>,
    pub isbn: Option<Option<&'a str>>,
    pub description: Option<Option<&'a str>>,
    pub price: Option<BigDecimal>,
    pub stock_quantity: Option<i32>,
    pub category: Option<&'a str>,
    pub publication_year: Option<Option<i32>>,
    pub publisher: Option<Option<&'a str>>,
    pub cover_image_url: Option<Option<&'a str>>,
}

impl UpdateBook<'_> {
    /// An all-None changeset is not a valid diesel update statement, so
    /// callers skip the write entirely when nothing was supplied.
    pub fn has_changes(&self) -> bool {
        self.title.is_some()
            || self.author.is_some()
            || self.isbn.is_some()
            || self.description.is_some()
            || self.price.is_some()
            || self.stock_quantity.is_some()
            || self.category.is_some()
            || self.publication_year.is_some()
            || self.publisher.is_some()
            || self.cover_image_url.is_some()
    }
}
