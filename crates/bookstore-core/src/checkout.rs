//! # Checkout
//!
//! Turns the current session and cart into the two requests checkout sends.
//!
//! ```text
//!   SessionStore ──► user_id ─┐
//!                             ├──► CheckoutDraft ──► NewOrder   ──► orders service
//!   CartStore ────► items ────┤         │                              │ order.id
//!                   total ────┘         └─────────► NewPayment ◄───────┘
//!   address ──► validated ──────────────────────────────────────► payments service
//! ```
//!
//! The draft is a snapshot. Clearing the cart after both requests succeed
//! is the caller's job; a failed request leaves the cart as it was.

use thiserror::Error;

use crate::cart::{CartStore, LineItem};
use crate::error::ValidationError;
use crate::money::Money;
use crate::session::SessionStore;
use crate::types::{NewOrder, NewOrderItem, NewPayment, OrderId, PaymentMethod, UserId};
use crate::validation::validate_shipping_address;

/// Why a checkout could not be started.
#[derive(Debug, Error, PartialEq)]
pub enum CheckoutError {
    #[error("Please log in to place an order")]
    NotAuthenticated,

    #[error("Your cart is empty")]
    EmptyCart,

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Everything needed to place one order.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckoutDraft {
    pub user_id: UserId,
    pub shipping_address: String,
    pub items: Vec<LineItem>,
    pub total: Money,
}

impl CheckoutDraft {
    /// Checks the preconditions in order: logged in, non-empty cart,
    /// non-blank address.
    pub fn prepare(
        session: &SessionStore,
        cart: &CartStore,
        shipping_address: &str,
    ) -> Result<Self, CheckoutError> {
        let user = session.get_user().ok_or(CheckoutError::NotAuthenticated)?;

        let items = cart.get_cart();
        if items.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        let shipping_address = validate_shipping_address(shipping_address)?;
        let total = items.iter().map(LineItem::line_total).sum();

        Ok(CheckoutDraft {
            user_id: user.id,
            shipping_address,
            items,
            total,
        })
    }

    /// The create-order payload.
    pub fn order(&self) -> NewOrder {
        NewOrder {
            user_id: self.user_id,
            shipping_address: self.shipping_address.clone(),
            items: self
                .items
                .iter()
                .map(|item| NewOrderItem {
                    book_id: item.id,
                    quantity: item.quantity,
                    price: item.price,
                })
                .collect(),
        }
    }

    /// The payment for the order the service created. The amount is the
    /// cart total.
    pub fn payment_for(&self, order_id: OrderId, method: PaymentMethod) -> NewPayment {
        NewPayment {
            order_id,
            user_id: self.user_id,
            amount: self.total,
            payment_method: method,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::BookDescriptor;
    use crate::storage::MemoryStorage;
    use crate::types::User;
    use std::sync::Arc;

    fn stores() -> (SessionStore, CartStore) {
        let storage = Arc::new(MemoryStorage::new());
        (SessionStore::new(storage.clone()), CartStore::new(storage))
    }

    fn login(session: &SessionStore) {
        let user: User = serde_json::from_value(serde_json::json!({
            "id": 42,
            "username": "ada",
            "first_name": "Ada"
        }))
        .unwrap();
        session.login(&user, Some("tok"));
    }

    fn fill(cart: &CartStore) {
        let a = BookDescriptor::new(1, "A", "X", Money::from_cents(999), 3).unwrap();
        let b = BookDescriptor::new(2, "B", "Y", Money::from_cents(500), 1).unwrap();
        cart.add_many(&a, 2);
        cart.add_to_cart(&b);
    }

    #[test]
    fn test_requires_login_first() {
        let (session, cart) = stores();
        fill(&cart);
        assert_eq!(
            CheckoutDraft::prepare(&session, &cart, "1 Main St"),
            Err(CheckoutError::NotAuthenticated)
        );
    }

    #[test]
    fn test_requires_items() {
        let (session, cart) = stores();
        login(&session);
        assert_eq!(
            CheckoutDraft::prepare(&session, &cart, ""),
            Err(CheckoutError::EmptyCart)
        );
    }

    #[test]
    fn test_requires_address() {
        let (session, cart) = stores();
        login(&session);
        fill(&cart);
        assert!(matches!(
            CheckoutDraft::prepare(&session, &cart, "   "),
            Err(CheckoutError::Validation(ValidationError::Required { .. }))
        ));
    }

    #[test]
    fn test_builds_order_and_payment() {
        let (session, cart) = stores();
        login(&session);
        fill(&cart);

        let draft = CheckoutDraft::prepare(&session, &cart, " 1 Main St ").unwrap();
        assert_eq!(draft.total.cents(), 2498);

        let order = draft.order();
        assert_eq!(order.user_id, 42);
        assert_eq!(order.shipping_address, "1 Main St");
        assert_eq!(order.items.len(), 2);
        assert_eq!(order.items[0].book_id, 1);
        assert_eq!(order.items[0].quantity, 2);
        assert_eq!(order.items[0].price.cents(), 999);

        let payment = draft.payment_for(7, PaymentMethod::default());
        assert_eq!(payment.order_id, 7);
        assert_eq!(payment.user_id, 42);
        assert_eq!(payment.amount.cents(), 2498);
        assert_eq!(payment.payment_method, PaymentMethod::CreditCard);

        // Preparing does not touch the cart
        assert_eq!(cart.get_item_count(), 3);
    }

    #[test]
    fn test_order_payload_shape() {
        let (session, cart) = stores();
        login(&session);
        fill(&cart);

        let draft = CheckoutDraft::prepare(&session, &cart, "1 Main St").unwrap();
        let body = serde_json::to_value(draft.order()).unwrap();
        assert_eq!(body["user_id"], 42);
        assert_eq!(body["items"][1]["book_id"], 2);
        assert_eq!(body["items"][1]["price"], 5.0);

        let payment = serde_json::to_value(draft.payment_for(3, PaymentMethod::Paypal)).unwrap();
        assert_eq!(payment["amount"], 24.98);
        assert_eq!(payment["payment_method"], "PAYPAL");
    }
}
