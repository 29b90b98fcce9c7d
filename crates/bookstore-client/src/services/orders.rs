//! Orders service.

use bookstore_core::{NewOrder, Order, OrderId, OrderStatus, OrderUpdate, UserId};
use serde::Serialize;
use tracing::info;

use crate::error::ApiResult;
use crate::http::ServiceClient;

#[derive(Serialize)]
struct StatusChange {
    status: OrderStatus,
}

#[derive(Debug, Clone)]
pub struct OrdersService {
    client: ServiceClient,
}

impl OrdersService {
    pub fn new(client: ServiceClient) -> Self {
        OrdersService { client }
    }

    /// `GET /orders/`
    pub async fn list_orders(&self) -> ApiResult<Vec<Order>> {
        self.client.get_list("/orders/").await
    }

    /// `GET /orders/{id}/`
    pub async fn get_order(&self, id: OrderId) -> ApiResult<Order> {
        self.client.get(&format!("/orders/{}/", id)).await
    }

    /// `POST /orders/`
    pub async fn create_order(&self, order: &NewOrder) -> ApiResult<Order> {
        let created: Order = self.client.post("/orders/", order).await?;
        info!(order_id = created.id, total = %created.total_amount, "Created order");
        Ok(created)
    }

    /// `PUT /orders/{id}/`
    pub async fn update_order(&self, id: OrderId, update: &OrderUpdate) -> ApiResult<Order> {
        self.client.put(&format!("/orders/{}/", id), update).await
    }

    /// `PATCH /orders/{id}/update_status/`
    pub async fn update_order_status(&self, id: OrderId, status: OrderStatus) -> ApiResult<Order> {
        self.client
            .patch(&format!("/orders/{}/update_status/", id), &StatusChange { status })
            .await
    }

    /// `GET /orders/by_user/?user_id=`
    pub async fn orders_by_user(&self, user_id: UserId) -> ApiResult<Vec<Order>> {
        self.client
            .get_list_with("/orders/by_user/", &[("user_id", user_id)])
            .await
    }
}
