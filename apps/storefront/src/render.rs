//! Plain-text rendering of command results.

use std::fmt::Write;

use bookstore_core::{Book, Category, Order, Review, User};

use crate::commands::books::BookDetail;
use crate::commands::cart::CartSummary;
use crate::commands::checkout::Receipt;

pub fn books(books: &[Book]) -> String {
    if books.is_empty() {
        return "No books found.".to_string();
    }

    let mut out = String::new();
    for book in books {
        let availability = if book.in_stock() {
            format!("{} in stock", book.stock)
        } else {
            "out of stock".to_string()
        };
        let _ = writeln!(
            out,
            "#{:<5} {} by {}  {}  ({})",
            book.id, book.title, book.author, book.price, availability
        );
    }
    out
}

pub fn categories(categories: &[Category]) -> String {
    if categories.is_empty() {
        return "No categories.".to_string();
    }

    let mut out = String::new();
    for category in categories {
        let _ = writeln!(out, "#{:<5} {}", category.id, category.name);
    }
    out
}

pub fn book_detail(detail: &BookDetail) -> String {
    let book = &detail.book;
    let mut out = String::new();

    let _ = writeln!(out, "{}", book.title);
    let _ = writeln!(out, "by {}", book.author);
    if let Some(category) = &book.category_name {
        let _ = writeln!(out, "Category: {}", category);
    }
    if let Some(isbn) = &book.isbn {
        let _ = writeln!(out, "ISBN: {}", isbn);
    }
    let _ = writeln!(out, "Price: {}", book.price);
    if book.in_stock() {
        let _ = writeln!(out, "Stock: {}", book.stock);
    } else {
        let _ = writeln!(out, "Out of stock");
    }
    if let Some(description) = &book.description {
        let _ = writeln!(out, "\n{}", description);
    }

    if let Some(stats) = &detail.stats {
        let _ = writeln!(
            out,
            "\nRating: {} {:.1} ({} reviews)",
            stats.stars(),
            stats.average_rating,
            stats.total_reviews
        );
        for bucket in &stats.rating_distribution {
            let _ = writeln!(out, "  {}★  {}", bucket.rating, bucket.count);
        }
    }

    if !detail.reviews.is_empty() {
        let _ = writeln!(out, "\nReviews:");
        out.push_str(&reviews(&detail.reviews));
    }
    out
}

pub fn cart(summary: &CartSummary) -> String {
    if summary.is_empty() {
        return "Your cart is empty.".to_string();
    }

    let mut out = String::new();
    for item in &summary.items {
        let _ = writeln!(
            out,
            "#{:<5} {} by {}  {} x {} = {}",
            item.id,
            item.title,
            item.author,
            item.quantity,
            item.price,
            item.line_total()
        );
    }
    let _ = writeln!(out, "Items: {}", summary.count);
    let _ = writeln!(out, "Total: {}", summary.total);
    out
}

pub fn receipt(receipt: &Receipt) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Order #{} placed ({}), total {}",
        receipt.order.id, receipt.order.status, receipt.order.total_amount
    );
    let _ = writeln!(
        out,
        "Payment #{} {} via {}",
        receipt.payment.id, receipt.payment.status, receipt.payment.payment_method
    );
    if let Some(transaction) = &receipt.payment.transaction_id {
        let _ = writeln!(out, "Transaction: {}", transaction);
    }
    out
}

pub fn orders(orders: &[Order]) -> String {
    if orders.is_empty() {
        return "No orders yet.".to_string();
    }

    let mut out = String::new();
    for order in orders {
        let placed = order
            .created_at
            .map(|at| at.format("%Y-%m-%d").to_string())
            .unwrap_or_default();
        let _ = writeln!(
            out,
            "Order #{} {} {} {}  ship to: {}",
            order.id, placed, order.status, order.total_amount, order.shipping_address
        );
        for item in &order.items {
            let _ = writeln!(
                out,
                "    book #{} x {} @ {}",
                item.book_id, item.quantity, item.price
            );
        }
    }
    out
}

pub fn reviews(reviews: &[Review]) -> String {
    if reviews.is_empty() {
        return "No reviews.".to_string();
    }

    let mut out = String::new();
    for review in reviews {
        let stars = "★".repeat(review.rating as usize);
        let _ = write!(out, "  {} book #{} user #{}", stars, review.book_id, review.user_id);
        if let Some(comment) = &review.comment {
            let _ = write!(out, ": {}", comment);
        }
        out.push('\n');
    }
    out
}

pub fn user(user: &User) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} (#{}, {})", user.display_name(), user.id, user.username);

    let fields = [
        ("Last name", &user.last_name),
        ("Email", &user.email),
        ("Phone", &user.phone),
        ("Address", &user.address),
    ];
    for (label, value) in fields {
        if let Some(value) = value {
            let _ = writeln!(out, "{}: {}", label, value);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use bookstore_core::{LineItem, Money};

    fn book(id: i64, stock: i64) -> Book {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "title": "Dune",
            "author": "Frank Herbert",
            "price": "9.99",
            "stock": stock
        }))
        .unwrap()
    }

    #[test]
    fn test_books() {
        let out = books(&[book(1, 3), book(2, 0)]);
        assert!(out.contains("Dune by Frank Herbert  $9.99  (3 in stock)"));
        assert!(out.contains("out of stock"));
        assert_eq!(books(&[]), "No books found.");
    }

    #[test]
    fn test_cart() {
        let summary = CartSummary {
            items: vec![LineItem {
                id: 1,
                title: "A".to_string(),
                author: "X".to_string(),
                price: Money::from_cents(999),
                quantity: 2,
                stock: 3,
            }],
            total: Money::from_cents(1998),
            count: 2,
        };
        let out = cart(&summary);
        assert!(out.contains("2 x $9.99 = $19.98"));
        assert!(out.contains("Total: $19.98"));

        let empty = CartSummary {
            items: vec![],
            total: Money::zero(),
            count: 0,
        };
        assert_eq!(cart(&empty), "Your cart is empty.");
    }

    #[test]
    fn test_user_skips_missing_fields() {
        let ada: User = serde_json::from_value(serde_json::json!({
            "id": 3,
            "username": "ada",
            "first_name": "Ada",
            "email": "ada@example.com"
        }))
        .unwrap();
        let out = user(&ada);
        assert!(out.starts_with("Ada (#3, ada)"));
        assert!(out.contains("Email: ada@example.com"));
        assert!(!out.contains("Phone"));
    }
}
