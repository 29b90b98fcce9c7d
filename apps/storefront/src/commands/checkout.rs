//! Checkout: order, then payment, then empty the cart.

use bookstore_core::{CheckoutDraft, Order, Payment, PaymentMethod};
use tracing::info;

use crate::context::AppContext;
use crate::error::StorefrontResult;

/// What a successful checkout produced.
#[derive(Debug, Clone)]
pub struct Receipt {
    pub order: Order,
    pub payment: Payment,
}

/// Places an order for the whole cart and pays for it.
///
/// ## Sequence
/// 1. Preconditions: logged in, cart not empty, address not blank
/// 2. `POST /orders/` with every line item
/// 3. `POST /payments/` for the new order, amount = cart total
/// 4. Clear the cart
///
/// The cart is cleared only after step 3 succeeds. If the payment fails the
/// order already exists on the service and the cart is left as it was.
pub async fn place_order(
    ctx: &AppContext,
    shipping_address: &str,
    method: PaymentMethod,
) -> StorefrontResult<Receipt> {
    let draft = CheckoutDraft::prepare(&ctx.session, &ctx.cart, shipping_address)?;

    let order = ctx.api.orders.create_order(&draft.order()).await?;
    let payment = ctx
        .api
        .payments
        .create_payment(&draft.payment_for(order.id, method))
        .await?;

    ctx.cart.clear_cart();
    info!(
        order_id = order.id,
        payment_id = payment.id,
        total = %draft.total,
        "Checkout complete"
    );

    Ok(Receipt { order, payment })
}
