use crate::data::models::book::Book;
use crate::data::models::schema::*;
use crate::data::models::user::User;
use diesel::prelude::*;

#[derive(Queryable, Selectable, Identifiable, Associations, PartialEq, Debug, Clone)]
#[diesel(table_name = reviews)]
#[diesel(primary_key(review_id))]
#[diesel(belongs_to(User, foreign_key = user_id))]
#[diesel(belongs_to(Book, foreign_key = book_id))]
#[diesel(check_for_backend(diesel::mysql::Mysql))]
pub struct Review {
    pub review_id: i32,
    pub user_id: i32,
    pub book_id: i32,
    pub rating: i32,
    pub comment: Option<String>,
    pub created_at: Option<chrono::NaiveDateTime>,
    pub updated_at: Option<chrono::NaiveDateTime>,
}

#[derive(Insertable, PartialEq, Debug)]
#[diesel(table_name = reviews)]
pub struct NewReview<'a> {
    pub user_id: i32,
    pub book_id: i32,
    pub rating: i32,
    pub comment: Option<&'a str>,
}

/// Partial patch for a review; `comment` is double-wrapped so a patch can
/// clear it without conflating "clear" with "leave alone".
#[derive(AsChangeset, PartialEq, Debug, Default)]
#[diesel(table_name = reviews)]
pub struct UpdateReview<'a> {
    pub rating: Option<i32>,
    pub comment: Option<Option<&'a str>>,
}

impl UpdateReview<'_> {
    pub fn has_changes(&self) -> bool {
        self.rating.is_some() || self.comment.is_some()
    }
}
