//! Writing and listing reviews.

use bookstore_core::validation::{normalize_comment, validate_rating};
use bookstore_core::{BookId, NewReview, Review};
use tracing::info;

use crate::context::AppContext;
use crate::error::StorefrontResult;

/// Reviews a book as the logged-in user.
pub async fn submit(
    ctx: &AppContext,
    book_id: BookId,
    rating: u8,
    comment: Option<&str>,
) -> StorefrontResult<Review> {
    let user = ctx.require_user()?;
    let review = NewReview {
        book_id,
        user_id: user.id,
        rating: validate_rating(rating)?,
        comment: normalize_comment(comment),
    };

    let created = ctx.api.reviews.create_review(&review).await?;
    info!(review_id = created.id, book_id, "Review submitted");
    Ok(created)
}

/// Reviews written by the logged-in user.
pub async fn my_reviews(ctx: &AppContext) -> StorefrontResult<Vec<Review>> {
    let user = ctx.require_user()?;
    Ok(ctx.api.reviews.reviews_by_user(user.id).await?)
}
