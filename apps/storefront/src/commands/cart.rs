//! Cart view.
//!
//! The store itself never looks at stock; these commands apply the same
//! bound the detail and cart pages do before touching it.

use bookstore_core::validation::validate_quantity;
use bookstore_core::{BookDescriptor, BookId, CartStore, CoreError, LineItem, Money};
use tracing::info;

use crate::context::AppContext;
use crate::error::{StorefrontError, StorefrontResult};

/// Cart contents with totals, as shown after every cart command.
#[derive(Debug, Clone, PartialEq)]
pub struct CartSummary {
    pub items: Vec<LineItem>,
    pub total: Money,
    pub count: i64,
}

impl CartSummary {
    pub fn of(cart: &CartStore) -> Self {
        CartSummary {
            items: cart.get_cart(),
            total: cart.get_total(),
            count: cart.get_item_count(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

pub fn show(ctx: &AppContext) -> CartSummary {
    CartSummary::of(&ctx.cart)
}

/// Adds `quantity` copies of a book, fetching its current details first.
pub async fn add(ctx: &AppContext, book_id: BookId, quantity: i64) -> StorefrontResult<CartSummary> {
    let quantity = validate_quantity(quantity)?;
    let book = ctx
        .api
        .books
        .get_book(book_id)
        .await
        .map_err(|e| StorefrontError::book_lookup(book_id, e))?;
    let descriptor = BookDescriptor::from_book(&book)?;

    ctx.cart.check_stock(&descriptor, quantity)?;
    ctx.cart.add_many(&descriptor, quantity);

    info!(book_id, quantity, "Added to cart");
    Ok(CartSummary::of(&ctx.cart))
}

pub fn remove(ctx: &AppContext, book_id: BookId) -> CartSummary {
    ctx.cart.remove_from_cart(book_id);
    CartSummary::of(&ctx.cart)
}

/// Sets a line's quantity. Zero or less removes it; more than the stock
/// snapshot is refused.
pub fn update(ctx: &AppContext, book_id: BookId, quantity: i64) -> StorefrontResult<CartSummary> {
    if quantity > 0 {
        let item = ctx.cart.require_line_item(book_id)?;
        if quantity > item.stock {
            return Err(CoreError::InsufficientStock {
                book_id,
                available: item.stock,
                requested: quantity,
            }
            .into());
        }
    }

    ctx.cart.update_quantity(book_id, quantity);
    Ok(CartSummary::of(&ctx.cart))
}

pub fn clear(ctx: &AppContext) -> CartSummary {
    ctx.cart.clear_cart();
    CartSummary::of(&ctx.cart)
}
