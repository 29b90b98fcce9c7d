//! Reviews service.

use bookstore_core::{BookId, BookReviews, BookStatistics, NewReview, Review, ReviewUpdate, UserId};

use crate::error::ApiResult;
use crate::http::ServiceClient;

#[derive(Debug, Clone)]
pub struct ReviewsService {
    client: ServiceClient,
}

impl ReviewsService {
    pub fn new(client: ServiceClient) -> Self {
        ReviewsService { client }
    }

    /// `GET /reviews/`
    pub async fn list_reviews(&self) -> ApiResult<Vec<Review>> {
        self.client.get_list("/reviews/").await
    }

    /// `GET /reviews/{id}/`
    pub async fn get_review(&self, id: i64) -> ApiResult<Review> {
        self.client.get(&format!("/reviews/{}/", id)).await
    }

    /// `POST /reviews/`. The service allows one review per book and user.
    pub async fn create_review(&self, review: &NewReview) -> ApiResult<Review> {
        self.client.post("/reviews/", review).await
    }

    /// `PUT /reviews/{id}/`
    pub async fn update_review(&self, id: i64, review: &ReviewUpdate) -> ApiResult<Review> {
        self.client.put(&format!("/reviews/{}/", id), review).await
    }

    /// `DELETE /reviews/{id}/`
    pub async fn delete_review(&self, id: i64) -> ApiResult<()> {
        self.client.delete(&format!("/reviews/{}/", id)).await
    }

    /// `GET /reviews/by_book/?book_id=`
    pub async fn reviews_by_book(&self, book_id: BookId) -> ApiResult<BookReviews> {
        self.client
            .get_with("/reviews/by_book/", &[("book_id", book_id)])
            .await
    }

    /// `GET /reviews/by_user/?user_id=`
    pub async fn reviews_by_user(&self, user_id: UserId) -> ApiResult<Vec<Review>> {
        self.client
            .get_list_with("/reviews/by_user/", &[("user_id", user_id)])
            .await
    }

    /// `GET /reviews/book_statistics/?book_id=`
    pub async fn book_statistics(&self, book_id: BookId) -> ApiResult<BookStatistics> {
        self.client
            .get_with("/reviews/book_statistics/", &[("book_id", book_id)])
            .await
    }
}
