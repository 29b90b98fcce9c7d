//! Browsing and book detail.

use bookstore_core::validation::validate_search_query;
use bookstore_core::{Book, BookId, BookQuery, BookStatistics, Category, Review};
use tracing::warn;

use crate::context::AppContext;
use crate::error::{StorefrontError, StorefrontResult};

/// Which books to list. Search wins over category, category over author.
#[derive(Debug, Clone, Default)]
pub struct BookFilter {
    pub category: Option<i64>,
    pub search: Option<String>,
    pub author: Option<String>,
}

/// Everything the detail view shows.
#[derive(Debug, Clone)]
pub struct BookDetail {
    pub book: Book,
    pub reviews: Vec<Review>,
    pub stats: Option<BookStatistics>,
}

pub async fn list_books(ctx: &AppContext, filter: &BookFilter) -> StorefrontResult<Vec<Book>> {
    let books = if let Some(query) = &filter.search {
        let query = validate_search_query(query)?;
        ctx.api.books.search_books(&query).await?
    } else if let Some(category_id) = filter.category {
        ctx.api.books.books_by_category(category_id).await?
    } else if let Some(author) = &filter.author {
        ctx.api.books.books_by_author(author.trim()).await?
    } else {
        ctx.api.books.list_books(&BookQuery::default()).await?
    };
    Ok(books)
}

pub async fn list_categories(ctx: &AppContext) -> StorefrontResult<Vec<Category>> {
    Ok(ctx.api.books.list_categories().await?)
}

/// Fetches the book, its reviews and its rating statistics concurrently.
///
/// Only the book itself is required; missing reviews or statistics are
/// logged and left out.
pub async fn book_detail(ctx: &AppContext, id: BookId) -> StorefrontResult<BookDetail> {
    let (book, reviews, stats) = tokio::join!(
        ctx.api.books.get_book(id),
        ctx.api.reviews.reviews_by_book(id),
        ctx.api.reviews.book_statistics(id),
    );

    let reviews = match reviews {
        Ok(listing) => listing.reviews,
        Err(e) => {
            warn!(book_id = id, error = %e, "Could not load reviews");
            Vec::new()
        }
    };

    let stats = match stats {
        Ok(stats) => Some(stats),
        Err(e) => {
            warn!(book_id = id, error = %e, "Could not load rating statistics");
            None
        }
    };

    Ok(BookDetail {
        book: book.map_err(|e| StorefrontError::book_lookup(id, e))?,
        reviews,
        stats,
    })
}
