//! # Cart Store
//!
//! The shopping cart, persisted under the `"cart"` storage key as a JSON
//! array of line items.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Store Operations                                │
//! │                                                                         │
//! │  View Action              Store Call              Persisted Change      │
//! │  ───────────              ──────────              ────────────────      │
//! │                                                                         │
//! │  Add to cart ────────────► add_to_cart() ───────► qty += 1 / push      │
//! │                                                                         │
//! │  Add N copies ───────────► add_many() ──────────► qty += N / push      │
//! │                                                                         │
//! │  Change quantity ────────► update_quantity() ───► items[i].qty = n     │
//! │                            (n <= 0 → remove)                           │
//! │                                                                         │
//! │  Click remove ───────────► remove_from_cart() ──► items.retain(..)     │
//! │                                                                         │
//! │  Checkout succeeded ─────► clear_cart() ────────► key removed          │
//! │                                                                         │
//! │  View cart ──────────────► get_cart() ──────────► (read only)          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - At most one line item per book id, in insertion order
//! - Quantity is at least 1 while the item exists
//! - `stock` is a snapshot taken when the item was first added. The store
//!   never clamps to it; [`CartStore::can_increment`] and
//!   [`CartStore::check_stock`] expose the bound to the views.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;
use crate::storage::{read_json, write_json, SharedStorage, CART_KEY};
use crate::types::{Book, BookId};
use crate::validation::{validate_price, validate_stock};

// =============================================================================
// Line Item
// =============================================================================

/// One cart entry for a single book.
///
/// Title, author, price and stock are frozen when the book is first added.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub id: BookId,
    pub title: String,
    pub author: String,
    pub price: Money,
    pub quantity: i64,
    pub stock: i64,
}

impl LineItem {
    /// Unit price × quantity.
    pub fn line_total(&self) -> Money {
        self.price.multiply_quantity(self.quantity)
    }
}

/// The book fields needed to put a copy in the cart.
///
/// Fields are private so every descriptor has passed [`BookDescriptor::new`]:
/// the price is numeric and non-negative and the stock is non-negative.
/// Text prices go through [`crate::validation::parse_price`] first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookDescriptor {
    id: BookId,
    title: String,
    author: String,
    price: Money,
    stock: i64,
}

impl BookDescriptor {
    pub fn new(
        id: BookId,
        title: impl Into<String>,
        author: impl Into<String>,
        price: Money,
        stock: i64,
    ) -> Result<Self, ValidationError> {
        Ok(BookDescriptor {
            id,
            title: title.into(),
            author: author.into(),
            price: validate_price(price)?,
            stock: validate_stock(stock)?,
        })
    }

    /// Builds a descriptor from a book returned by the books service.
    pub fn from_book(book: &Book) -> Result<Self, ValidationError> {
        Self::new(
            book.id,
            book.title.clone(),
            book.author.clone(),
            book.price,
            book.stock,
        )
    }

    pub fn id(&self) -> BookId {
        self.id
    }

    pub fn price(&self) -> Money {
        self.price
    }

    pub fn stock(&self) -> i64 {
        self.stock
    }

    fn to_line_item(&self, quantity: i64) -> LineItem {
        LineItem {
            id: self.id,
            title: self.title.clone(),
            author: self.author.clone(),
            price: self.price,
            quantity,
            stock: self.stock,
        }
    }
}

// =============================================================================
// Cart Store
// =============================================================================

/// Persistent cart over an injected key-value store.
///
/// Every operation reads the current sequence from storage, so two stores
/// over the same backend always agree.
#[derive(Clone)]
pub struct CartStore {
    storage: SharedStorage,
}

impl std::fmt::Debug for CartStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartStore")
            .field("items", &self.get_cart().len())
            .finish()
    }
}

impl CartStore {
    pub fn new(storage: SharedStorage) -> Self {
        CartStore { storage }
    }

    /// Returns all line items. Absent or unreadable storage yields an
    /// empty cart.
    pub fn get_cart(&self) -> Vec<LineItem> {
        read_json(self.storage.as_ref(), CART_KEY).unwrap_or_default()
    }

    /// Adds one copy of `book`.
    ///
    /// An existing line for the same id gets `quantity + 1`; otherwise a new
    /// line with quantity 1 is appended.
    pub fn add_to_cart(&self, book: &BookDescriptor) -> Vec<LineItem> {
        self.add_many(book, 1)
    }

    /// Adds `count` copies of `book` in one write. Same result as `count`
    /// calls to [`CartStore::add_to_cart`]; a non-positive `count` changes
    /// nothing. Quantities saturate at `i64::MAX`.
    pub fn add_many(&self, book: &BookDescriptor, count: i64) -> Vec<LineItem> {
        let mut items = self.get_cart();
        if count <= 0 {
            return items;
        }

        match items.iter_mut().find(|item| item.id == book.id) {
            Some(item) => item.quantity = item.quantity.saturating_add(count),
            None => items.push(book.to_line_item(count)),
        }

        debug!(book_id = book.id, count, "Added book to cart");
        self.persist(&items);
        items
    }

    /// Removes the line for `id`. Removing an absent id still persists the
    /// (unchanged) sequence and is not an error.
    pub fn remove_from_cart(&self, id: BookId) -> Vec<LineItem> {
        let mut items = self.get_cart();
        items.retain(|item| item.id != id);

        debug!(book_id = id, "Removed book from cart");
        self.persist(&items);
        items
    }

    /// Sets the quantity for `id`.
    ///
    /// ## Behavior
    /// - `quantity <= 0`: same as [`CartStore::remove_from_cart`]
    /// - id present: overwrite quantity and persist
    /// - id absent: return the current sequence, nothing is written
    pub fn update_quantity(&self, id: BookId, quantity: i64) -> Vec<LineItem> {
        if quantity <= 0 {
            return self.remove_from_cart(id);
        }

        let mut items = self.get_cart();
        match items.iter_mut().find(|item| item.id == id) {
            Some(item) => {
                item.quantity = quantity;
                debug!(book_id = id, quantity, "Updated cart quantity");
                self.persist(&items);
            }
            None => debug!(book_id = id, "Quantity update for book not in cart"),
        }
        items
    }

    /// Removes the persisted cart. Idempotent.
    pub fn clear_cart(&self) {
        debug!("Clearing cart");
        self.storage.remove(CART_KEY);
    }

    /// Σ price × quantity.
    pub fn get_total(&self) -> Money {
        self.get_cart().iter().map(LineItem::line_total).sum()
    }

    /// Σ quantity.
    pub fn get_item_count(&self) -> i64 {
        self.get_cart()
            .iter()
            .fold(0i64, |count, item| count.saturating_add(item.quantity))
    }

    /// Returns the line for `id`, if present.
    pub fn line_item(&self, id: BookId) -> Option<LineItem> {
        self.get_cart().into_iter().find(|item| item.id == id)
    }

    /// True when one more copy of `id` stays within the stock snapshot.
    ///
    /// Books not in the cart cannot be incremented from the cart view.
    pub fn can_increment(&self, id: BookId) -> bool {
        self.line_item(id)
            .map(|item| item.quantity < item.stock)
            .unwrap_or(false)
    }

    /// Checks that adding `count` copies of `book` stays within its stock.
    ///
    /// A request too large to count is reported as `i64::MAX` requested.
    pub fn check_stock(&self, book: &BookDescriptor, count: i64) -> CoreResult<()> {
        let in_cart = self.line_item(book.id).map(|item| item.quantity).unwrap_or(0);
        let requested = in_cart.checked_add(count).unwrap_or(i64::MAX);

        if requested > book.stock {
            return Err(CoreError::InsufficientStock {
                book_id: book.id,
                available: book.stock,
                requested,
            });
        }
        Ok(())
    }

    /// Looks up the line for `id`, failing when it is absent.
    pub fn require_line_item(&self, id: BookId) -> CoreResult<LineItem> {
        self.line_item(id).ok_or(CoreError::NotInCart(id))
    }

    fn persist(&self, items: &[LineItem]) {
        write_json(self.storage.as_ref(), CART_KEY, items);
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{KeyValueStore, MemoryStorage};
    use std::sync::Arc;

    fn store() -> (CartStore, Arc<MemoryStorage>) {
        let storage = Arc::new(MemoryStorage::new());
        (CartStore::new(storage.clone()), storage)
    }

    fn book_a() -> BookDescriptor {
        BookDescriptor::new(1, "A", "X", Money::from_cents(999), 3).unwrap()
    }

    fn book_b() -> BookDescriptor {
        BookDescriptor::new(2, "B", "Y", Money::from_cents(500), 1).unwrap()
    }

    #[test]
    fn test_empty_cart() {
        let (cart, _) = store();
        assert!(cart.get_cart().is_empty());
        assert_eq!(cart.get_total(), Money::zero());
        assert_eq!(cart.get_item_count(), 0);
    }

    #[test]
    fn test_repeated_add_merges_into_one_line() {
        let (cart, _) = store();
        for _ in 0..4 {
            cart.add_to_cart(&book_a());
        }

        let items = cart.get_cart();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].quantity, 4);
    }

    #[test]
    fn test_scenario_two_books() {
        let (cart, _) = store();
        cart.add_to_cart(&book_a());
        cart.add_to_cart(&book_a());
        let items = cart.add_to_cart(&book_b());

        assert_eq!(items.len(), 2);
        assert_eq!(items[0].id, 1);
        assert_eq!(items[0].quantity, 2);
        assert_eq!(items[1].id, 2);
        assert_eq!(cart.get_total().cents(), 2498);
        assert_eq!(cart.get_item_count(), 3);
    }

    #[test]
    fn test_update_quantity_zero_matches_remove() {
        let (a, _) = store();
        let (b, _) = store();
        for cart in [&a, &b] {
            cart.add_to_cart(&book_a());
            cart.add_to_cart(&book_b());
        }

        let removed = a.remove_from_cart(1);
        let zeroed = b.update_quantity(1, 0);
        assert_eq!(removed, zeroed);
        assert_eq!(a.get_cart(), b.get_cart());

        let negative = b.update_quantity(2, -3);
        assert!(negative.is_empty());
    }

    #[test]
    fn test_update_quantity_overwrites() {
        let (cart, _) = store();
        cart.add_to_cart(&book_a());
        let items = cart.update_quantity(1, 7);
        assert_eq!(items[0].quantity, 7);
        assert_eq!(cart.get_item_count(), 7);
        assert_eq!(cart.get_total().cents(), 6993);
    }

    #[test]
    fn test_update_absent_on_empty_cart_persists_nothing() {
        let (cart, storage) = store();
        let items = cart.update_quantity(1, 5);
        assert!(items.is_empty());
        assert!(cart.get_cart().is_empty());
        assert!(storage.is_empty());
    }

    #[test]
    fn test_update_absent_leaves_cart_unchanged() {
        let (cart, _) = store();
        cart.add_to_cart(&book_a());
        let before = cart.get_cart();
        assert_eq!(cart.update_quantity(99, 2), before);
        assert_eq!(cart.get_cart(), before);
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let (cart, _) = store();
        cart.add_to_cart(&book_a());
        let items = cart.remove_from_cart(42);
        assert_eq!(items.len(), 1);
    }

    #[test]
    fn test_clear_cart() {
        let (cart, storage) = store();
        cart.add_to_cart(&book_a());
        cart.add_to_cart(&book_b());

        cart.clear_cart();
        assert!(cart.get_cart().is_empty());
        assert_eq!(cart.get_total(), Money::zero());
        assert_eq!(cart.get_item_count(), 0);
        assert!(storage.get(CART_KEY).is_none());

        cart.clear_cart();
        assert!(cart.get_cart().is_empty());
    }

    #[test]
    fn test_add_many() {
        let (cart, _) = store();
        let items = cart.add_many(&book_a(), 3);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].quantity, 3);

        let items = cart.add_many(&book_b(), 0);
        assert_eq!(items.len(), 1);
    }

    #[test]
    fn test_snapshot_is_frozen_on_first_add() {
        let (cart, _) = store();
        cart.add_to_cart(&book_a());

        let repriced =
            BookDescriptor::new(1, "A (2nd ed.)", "X", Money::from_cents(1500), 10).unwrap();
        cart.add_to_cart(&repriced);

        let item = cart.line_item(1).unwrap();
        assert_eq!(item.title, "A");
        assert_eq!(item.price.cents(), 999);
        assert_eq!(item.stock, 3);
        assert_eq!(item.quantity, 2);
    }

    #[test]
    fn test_store_does_not_clamp_to_stock() {
        let (cart, _) = store();
        cart.add_many(&book_b(), 3);
        assert_eq!(cart.get_item_count(), 3);
    }

    #[test]
    fn test_can_increment() {
        let (cart, _) = store();
        assert!(!cart.can_increment(1));

        cart.add_to_cart(&book_a());
        assert!(cart.can_increment(1));

        cart.update_quantity(1, 3);
        assert!(!cart.can_increment(1));
    }

    #[test]
    fn test_check_stock() {
        let (cart, _) = store();
        assert!(cart.check_stock(&book_a(), 3).is_ok());

        cart.add_to_cart(&book_a());
        match cart.check_stock(&book_a(), 3) {
            Err(CoreError::InsufficientStock {
                book_id,
                available,
                requested,
            }) => {
                assert_eq!(book_id, 1);
                assert_eq!(available, 3);
                assert_eq!(requested, 4);
            }
            other => panic!("expected InsufficientStock, got {:?}", other),
        }
    }

    #[test]
    fn test_require_line_item() {
        let (cart, _) = store();
        assert!(matches!(cart.require_line_item(5), Err(CoreError::NotInCart(5))));
        cart.add_to_cart(&book_a());
        assert_eq!(cart.require_line_item(1).unwrap().quantity, 1);
    }

    #[test]
    fn test_corrupt_cart_reads_as_empty() {
        let (cart, storage) = store();
        storage.set(CART_KEY, "not json");
        assert!(cart.get_cart().is_empty());

        let items = cart.add_to_cart(&book_a());
        assert_eq!(items.len(), 1);
    }

    #[test]
    fn test_persisted_shape() {
        let (cart, storage) = store();
        cart.add_to_cart(&book_a());

        let raw = storage.get(CART_KEY).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value[0]["id"], 1);
        assert_eq!(value[0]["title"], "A");
        assert_eq!(value[0]["price"], 9.99);
        assert_eq!(value[0]["quantity"], 1);
        assert_eq!(value[0]["stock"], 3);
    }

    #[test]
    fn test_two_stores_share_backend() {
        let storage = Arc::new(MemoryStorage::new());
        let a = CartStore::new(storage.clone());
        let b = CartStore::new(storage);
        a.add_to_cart(&book_a());
        assert_eq!(b.get_item_count(), 1);
    }

    #[test]
    fn test_descriptor_rejects_negative_price_and_stock() {
        assert_eq!(
            BookDescriptor::new(9, "Neg", "X", Money::from_cents(-500), 3),
            Err(ValidationError::MustNotBeNegative {
                field: "price".to_string()
            })
        );
        assert_eq!(
            BookDescriptor::new(9, "Neg", "X", Money::from_cents(500), -1),
            Err(ValidationError::MustNotBeNegative {
                field: "stock".to_string()
            })
        );
        assert!(BookDescriptor::new(9, "Free", "X", Money::zero(), 0).is_ok());
    }

    #[test]
    fn test_descriptor_from_book() {
        let book: Book = serde_json::from_value(serde_json::json!({
            "id": 7,
            "title": "Emma",
            "author": "Jane Austen",
            "price": "12.50",
            "stock": 4
        }))
        .unwrap();
        let descriptor = BookDescriptor::from_book(&book).unwrap();
        assert_eq!(descriptor.price().cents(), 1250);
        assert_eq!(descriptor.stock(), 4);
        assert_eq!(descriptor.id(), 7);

        let mut negative = book.clone();
        negative.price = Money::from_cents(-1);
        assert!(BookDescriptor::from_book(&negative).is_err());
    }

    #[test]
    fn test_check_stock_huge_request_is_refused() {
        let (cart, _) = store();
        cart.add_to_cart(&book_a());

        match cart.check_stock(&book_a(), i64::MAX) {
            Err(CoreError::InsufficientStock { requested, .. }) => {
                assert_eq!(requested, i64::MAX)
            }
            other => panic!("expected InsufficientStock, got {:?}", other),
        }
        assert_eq!(cart.get_item_count(), 1);
    }

    #[test]
    fn test_add_many_is_one_write_and_saturates() {
        let (cart, _) = store();
        cart.add_to_cart(&book_a());

        let items = cart.add_many(&book_a(), i64::MAX);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].quantity, i64::MAX);
        assert_eq!(cart.get_item_count(), i64::MAX);

        cart.add_to_cart(&book_b());
        assert_eq!(cart.get_item_count(), i64::MAX);
    }

    #[test]
    fn test_total_saturates_on_huge_quantity() {
        let (cart, _) = store();
        cart.add_to_cart(&book_a());
        cart.update_quantity(1, i64::MAX / 100);

        assert_eq!(cart.get_total(), Money::MAX);
        assert_eq!(cart.line_item(1).unwrap().line_total(), Money::MAX);
    }
}
