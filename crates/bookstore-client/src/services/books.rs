//! Books service: catalogue and categories.

use bookstore_core::{Book, BookId, BookInput, BookQuery, Category, NewCategory};

use crate::error::ApiResult;
use crate::http::ServiceClient;

#[derive(Debug, Clone)]
pub struct BooksService {
    client: ServiceClient,
}

impl BooksService {
    pub fn new(client: ServiceClient) -> Self {
        BooksService { client }
    }

    /// `GET /books/`
    pub async fn list_books(&self, query: &BookQuery) -> ApiResult<Vec<Book>> {
        self.client.get_list_with("/books/", query).await
    }

    /// `GET /books/{id}/`
    pub async fn get_book(&self, id: BookId) -> ApiResult<Book> {
        self.client.get(&format!("/books/{}/", id)).await
    }

    /// `POST /books/`
    pub async fn create_book(&self, book: &BookInput) -> ApiResult<Book> {
        self.client.post("/books/", book).await
    }

    /// `PUT /books/{id}/`
    pub async fn update_book(&self, id: BookId, book: &BookInput) -> ApiResult<Book> {
        self.client.put(&format!("/books/{}/", id), book).await
    }

    /// `DELETE /books/{id}/`
    pub async fn delete_book(&self, id: BookId) -> ApiResult<()> {
        self.client.delete(&format!("/books/{}/", id)).await
    }

    /// `GET /books/search/?q=`
    pub async fn search_books(&self, query: &str) -> ApiResult<Vec<Book>> {
        self.client
            .get_list_with("/books/search/", &[("q", query)])
            .await
    }

    /// `GET /books/by_category/?category_id=`
    pub async fn books_by_category(&self, category_id: i64) -> ApiResult<Vec<Book>> {
        self.client
            .get_list_with("/books/by_category/", &[("category_id", category_id)])
            .await
    }

    /// `GET /books/by_author/?author=`
    pub async fn books_by_author(&self, author: &str) -> ApiResult<Vec<Book>> {
        self.client
            .get_list_with("/books/by_author/", &[("author", author)])
            .await
    }

    /// `GET /categories/`
    pub async fn list_categories(&self) -> ApiResult<Vec<Category>> {
        self.client.get_list("/categories/").await
    }

    /// `POST /categories/`
    pub async fn create_category(&self, category: &NewCategory) -> ApiResult<Category> {
        self.client.post("/categories/", category).await
    }
}
