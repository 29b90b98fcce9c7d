//! # Domain Types
//!
//! Records returned by the five backend services and the payloads the
//! storefront sends back to them.
//!
//! ## Type Map
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Backend Records                                 │
//! │                                                                         │
//! │  users ────► User            books ────► Book, Category                 │
//! │  orders ───► Order, OrderItem, OrderStatus                              │
//! │  payments ─► Payment, PaymentMethod, PaymentStatus                      │
//! │  reviews ──► Review, BookReviews, BookStatistics                        │
//! │                                                                         │
//! │                         Request Payloads                                │
//! │                                                                         │
//! │  Registration, Credentials, ProfileUpdate, BookInput, NewCategory,      │
//! │  NewOrder, NewOrderItem, NewPayment, NewReview, ReviewUpdate            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Identifiers
//! Every service keys its records by integer id. Cross-service references
//! (`Order.user_id`, `Review.book_id`, ...) are plain integers with no
//! referential guarantees on the client side.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;
use crate::money::Money;

/// Book identifier (books service primary key).
pub type BookId = i64;

/// User identifier (users service primary key).
pub type UserId = i64;

/// Order identifier (orders service primary key).
pub type OrderId = i64;

// =============================================================================
// Lenient Identifier Decoding
// =============================================================================

/// Some aggregate endpoints echo the query parameter back, so an id can
/// arrive as `"7"` instead of `7`.
fn de_lenient_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum IdRepr {
        Int(i64),
        Str(String),
    }

    match IdRepr::deserialize(deserializer)? {
        IdRepr::Int(id) => Ok(id),
        IdRepr::Str(s) => s.trim().parse().map_err(serde::de::Error::custom),
    }
}

// =============================================================================
// Users
// =============================================================================

/// A storefront user.
///
/// Only `id`, `username` and `first_name` are relied upon. Everything else
/// the users service sends is kept in `extra` so a round trip through the
/// session store loses nothing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub username: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl User {
    /// Name to greet the user with: first name, falling back to username.
    pub fn display_name(&self) -> &str {
        if self.first_name.trim().is_empty() {
            &self.username
        } else {
            &self.first_name
        }
    }
}

/// Response of the register and login endpoints.
///
/// The users service answers `{ "message": ..., "user": {...} }`. A bearer
/// token is picked up when the deployment issues one.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    #[serde(default)]
    pub message: Option<String>,
    pub user: User,
    #[serde(default, alias = "access", alias = "access_token")]
    pub token: Option<String>,
}

/// Registration form.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Registration {
    pub username: String,
    pub email: String,
    pub password: String,
    pub password2: String,
    pub first_name: String,
    pub last_name: String,
}

/// Login form.
#[derive(Debug, Clone, Serialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// Editable profile fields. Unset fields are omitted from the request.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

impl ProfileUpdate {
    pub fn is_empty(&self) -> bool {
        *self == ProfileUpdate::default()
    }
}

// =============================================================================
// Books
// =============================================================================

/// A book as listed by the books service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    pub id: BookId,
    pub title: String,
    pub author: String,
    #[serde(default)]
    pub description: Option<String>,
    pub price: Money,
    #[serde(default)]
    pub category: Option<i64>,
    #[serde(default)]
    pub category_name: Option<String>,
    #[serde(default)]
    pub stock: i64,
    #[serde(default)]
    pub isbn: Option<String>,
    #[serde(default)]
    pub published_date: Option<NaiveDate>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Book {
    pub fn in_stock(&self) -> bool {
        self.stock > 0
    }
}

/// A book category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Create/update payload for a book.
#[derive(Debug, Clone, Serialize)]
pub struct BookInput {
    pub title: String,
    pub author: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub price: Money,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<i64>,
    pub stock: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub isbn: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published_date: Option<NaiveDate>,
}

/// Create payload for a category.
#[derive(Debug, Clone, Serialize)]
pub struct NewCategory {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Query parameters accepted by the book listing endpoint.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BookQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ordering: Option<String>,
}

// =============================================================================
// Orders
// =============================================================================

/// Lifecycle of an order on the orders service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    #[default]
    Pending,
    Confirmed,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "PENDING",
            OrderStatus::Confirmed => "CONFIRMED",
            OrderStatus::Processing => "PROCESSING",
            OrderStatus::Shipped => "SHIPPED",
            OrderStatus::Delivered => "DELIVERED",
            OrderStatus::Cancelled => "CANCELLED",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "PENDING" => Ok(OrderStatus::Pending),
            "CONFIRMED" => Ok(OrderStatus::Confirmed),
            "PROCESSING" => Ok(OrderStatus::Processing),
            "SHIPPED" => Ok(OrderStatus::Shipped),
            "DELIVERED" => Ok(OrderStatus::Delivered),
            "CANCELLED" | "CANCELED" => Ok(OrderStatus::Cancelled),
            _ => Err(ValidationError::NotAllowed {
                field: "status".to_string(),
                allowed: [
                    "PENDING",
                    "CONFIRMED",
                    "PROCESSING",
                    "SHIPPED",
                    "DELIVERED",
                    "CANCELLED",
                ]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            }),
        }
    }
}

/// One line of a placed order. Price is frozen at order time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    #[serde(default)]
    pub id: Option<i64>,
    pub book_id: BookId,
    pub quantity: i64,
    pub price: Money,
}

impl OrderItem {
    pub fn line_total(&self) -> Money {
        self.price.multiply_quantity(self.quantity)
    }
}

/// An order as returned by the orders service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub user_id: UserId,
    #[serde(default)]
    pub status: OrderStatus,
    pub total_amount: Money,
    #[serde(default)]
    pub shipping_address: String,
    #[serde(default)]
    pub items: Vec<OrderItem>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Line of a [`NewOrder`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewOrderItem {
    pub book_id: BookId,
    pub quantity: i64,
    pub price: Money,
}

/// Create payload for an order. The service computes `total_amount`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewOrder {
    pub user_id: UserId,
    pub shipping_address: String,
    pub items: Vec<NewOrderItem>,
}

/// Update payload for an order's editable fields.
#[derive(Debug, Clone, Serialize)]
pub struct OrderUpdate {
    pub user_id: UserId,
    pub shipping_address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<OrderStatus>,
}

// =============================================================================
// Payments
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMethod {
    #[default]
    CreditCard,
    DebitCard,
    Paypal,
    BankTransfer,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::CreditCard => "CREDIT_CARD",
            PaymentMethod::DebitCard => "DEBIT_CARD",
            PaymentMethod::Paypal => "PAYPAL",
            PaymentMethod::BankTransfer => "BANK_TRANSFER",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentMethod {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "credit_card" | "credit" | "card" => Ok(PaymentMethod::CreditCard),
            "debit_card" | "debit" => Ok(PaymentMethod::DebitCard),
            "paypal" => Ok(PaymentMethod::Paypal),
            "bank_transfer" | "bank" => Ok(PaymentMethod::BankTransfer),
            _ => Err(ValidationError::NotAllowed {
                field: "payment method".to_string(),
                allowed: vec![
                    "credit_card".to_string(),
                    "debit_card".to_string(),
                    "paypal".to_string(),
                    "bank_transfer".to_string(),
                ],
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    #[default]
    Pending,
    Processing,
    Completed,
    Failed,
    Refunded,
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PaymentStatus::Pending => "PENDING",
            PaymentStatus::Processing => "PROCESSING",
            PaymentStatus::Completed => "COMPLETED",
            PaymentStatus::Failed => "FAILED",
            PaymentStatus::Refunded => "REFUNDED",
        };
        f.write_str(s)
    }
}

/// A payment towards an order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    pub id: i64,
    pub order_id: OrderId,
    pub user_id: UserId,
    pub amount: Money,
    pub payment_method: PaymentMethod,
    #[serde(default)]
    pub status: PaymentStatus,
    #[serde(default)]
    pub transaction_id: Option<String>,
    #[serde(default)]
    pub payment_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Create payload for a payment. `amount` must equal the order total.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewPayment {
    pub order_id: OrderId,
    pub user_id: UserId,
    pub amount: Money,
    pub payment_method: PaymentMethod,
}

// =============================================================================
// Reviews
// =============================================================================

/// A review of a book. One per (book, user) pair on the service side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub id: i64,
    pub book_id: BookId,
    pub user_id: UserId,
    pub rating: u8,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Create payload for a review.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewReview {
    pub book_id: BookId,
    pub user_id: UserId,
    pub rating: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

/// Update payload for a review.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReviewUpdate {
    pub book_id: BookId,
    pub user_id: UserId,
    pub rating: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

/// Reviews for one book with the running average.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BookReviews {
    #[serde(deserialize_with = "de_lenient_id")]
    pub book_id: BookId,
    #[serde(default)]
    pub average_rating: f64,
    #[serde(default)]
    pub total_reviews: u64,
    #[serde(default)]
    pub reviews: Vec<Review>,
}

/// How many reviews gave a particular star rating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct RatingCount {
    pub rating: u8,
    pub count: u64,
}

/// Aggregate rating statistics for one book.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BookStatistics {
    #[serde(deserialize_with = "de_lenient_id")]
    pub book_id: BookId,
    #[serde(default)]
    pub average_rating: f64,
    #[serde(default)]
    pub total_reviews: u64,
    #[serde(default)]
    pub rating_distribution: Vec<RatingCount>,
}

impl BookStatistics {
    /// Star bar for the average, e.g. `★★★★☆` for 3.6.
    pub fn stars(&self) -> String {
        let filled = self.average_rating.round().clamp(0.0, 5.0) as usize;
        format!("{}{}", "★".repeat(filled), "☆".repeat(5 - filled))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
