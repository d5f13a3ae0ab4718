use crate::data::models::review::{NewReview, Review, UpdateReview};
use crate::data::models::user::User;
use crate::data::repos::implementors::book_repo::BookRepo;
use crate::data::repos::implementors::order_repo::OrderRepo;
use crate::data::repos::implementors::review_repo::ReviewRepo;
use crate::data::repos::implementors::user_repo::UserRepo;
use crate::data::repos::traits::repository::Repository;
use crate::services::errors::ReviewServiceError;

pub struct ReviewService;

impl ReviewService {
    pub fn new() -> Self {
        ReviewService
    }

    /// A review requires an existing book, a prior order containing it, and
    /// no earlier review by the same user. Returns the review with its
    /// reviewer so responses can carry the display name.
    pub async fn create_review(
        &self,
        user_id: i32,
        book_id: i32,
        rating: i32,
        comment: Option<&str>,
    ) -> Result<(Review, User), ReviewServiceError> {
        if !(1..=5).contains(&rating) {
            return Err(ReviewServiceError::InvalidRating);
        }

        let review_repo = ReviewRepo::new();

        if BookRepo::new()
            .get_by_id(book_id)
            .await
            .map_err(|_| ReviewServiceError::DatabaseError)?
            .is_none()
        {
            return Err(ReviewServiceError::BookNotFound);
        }

        let purchased = OrderRepo::new()
            .user_has_purchased(user_id, book_id)
            .await
            .map_err(|_| ReviewServiceError::DatabaseError)?;

        if !purchased {
            return Err(ReviewServiceError::PurchaseRequired);
        }

        if review_repo
            .get_by_user_and_book(user_id, book_id)
            .await
            .map_err(|_| ReviewServiceError::DatabaseError)?
            .is_some()
        {
            return Err(ReviewServiceError::AlreadyReviewed);
        }

        review_repo
            .add(NewReview {
                user_id,
                book_id,
                rating,
                comment,
            })
            .await
            .map_err(|_| ReviewServiceError::DatabaseError)?;

        let review = review_repo
            .get_by_user_and_book(user_id, book_id)
            .await
            .map_err(|_| ReviewServiceError::DatabaseError)?
            .ok_or(ReviewServiceError::DatabaseError)?;

        let reviewer = self.get_reviewer(user_id).await?;

        Ok((review, reviewer))
    }

    /// Patch semantics as for books; a review owned by someone else reads as
    /// absent rather than forbidden.
    pub async fn update_review(
        &self,
        user_id: i32,
        review_id: i32,
        form: UpdateReview<'_>,
    ) -> Result<(Review, User), ReviewServiceError> {
        if let Some(rating) = form.rating {
            if !(1..=5).contains(&rating) {
                return Err(ReviewServiceError::InvalidRating);
            }
        }

        let repo = ReviewRepo::new();

        let existing = repo
            .get_by_id(review_id)
            .await
            .map_err(|_| ReviewServiceError::DatabaseError)?
            .filter(|r| r.user_id == user_id)
            .ok_or(ReviewServiceError::ReviewNotFound)?;

        let reviewer = self.get_reviewer(user_id).await?;

        if !form.has_changes() {
            return Ok((existing, reviewer));
        }

        repo.update(review_id, form)
            .await
            .map_err(|_| ReviewServiceError::DatabaseError)?;

        let updated = repo
            .get_by_id(review_id)
            .await
            .map_err(|_| ReviewServiceError::DatabaseError)?
            .ok_or(ReviewServiceError::ReviewNotFound)?;

        Ok((updated, reviewer))
    }

    async fn get_reviewer(&self, user_id: i32) -> Result<User, ReviewServiceError> {
        UserRepo::new()
            .get_by_id(user_id)
            .await
            .map_err(|_| ReviewServiceError::DatabaseError)?
            .ok_or(ReviewServiceError::DatabaseError)
    }

    /// Idempotent: false when the caller owns no such review.
    pub async fn delete_review(
        &self,
        user_id: i32,
        review_id: i32,
    ) -> Result<bool, ReviewServiceError> {
        ReviewRepo::new()
            .remove_owned(review_id, user_id)
            .await
            .map_err(|_| ReviewServiceError::DatabaseError)
    }

    pub async fn list_reviews(
        &self,
        book_id: i32,
    ) -> Result<Vec<(Review, User)>, ReviewServiceError> {
        ReviewRepo::new()
            .get_by_book_with_reviewer(book_id)
            .await
            .map_err(|_| ReviewServiceError::DatabaseError)
    }
}

impl Default for ReviewService {
    fn default() -> Self {
        Self::new()
    }
}
