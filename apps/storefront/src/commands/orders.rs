//! Order history.

use bookstore_core::Order;

use crate::context::AppContext;
use crate::error::StorefrontResult;

/// Orders placed by the logged-in user.
pub async fn my_orders(ctx: &AppContext) -> StorefrontResult<Vec<Order>> {
    let user = ctx.require_user()?;
    Ok(ctx.api.orders.orders_by_user(user.id).await?)
}
