//! Payments service.

use bookstore_core::{NewPayment, OrderId, Payment, UserId};
use tracing::info;

use crate::error::ApiResult;
use crate::http::ServiceClient;

#[derive(Debug, Clone)]
pub struct PaymentsService {
    client: ServiceClient,
}

impl PaymentsService {
    pub fn new(client: ServiceClient) -> Self {
        PaymentsService { client }
    }

    /// `GET /payments/`
    pub async fn list_payments(&self) -> ApiResult<Vec<Payment>> {
        self.client.get_list("/payments/").await
    }

    /// `GET /payments/{id}/`
    pub async fn get_payment(&self, id: i64) -> ApiResult<Payment> {
        self.client.get(&format!("/payments/{}/", id)).await
    }

    /// `POST /payments/`
    pub async fn create_payment(&self, payment: &NewPayment) -> ApiResult<Payment> {
        let created: Payment = self.client.post("/payments/", payment).await?;
        info!(
            payment_id = created.id,
            order_id = created.order_id,
            status = %created.status,
            "Created payment"
        );
        Ok(created)
    }

    /// `GET /payments/by_order/?order_id=`
    pub async fn payments_by_order(&self, order_id: OrderId) -> ApiResult<Vec<Payment>> {
        self.client
            .get_list_with("/payments/by_order/", &[("order_id", order_id)])
            .await
    }

    /// `GET /payments/by_user/?user_id=`
    pub async fn payments_by_user(&self, user_id: UserId) -> ApiResult<Vec<Payment>> {
        self.client
            .get_list_with("/payments/by_user/", &[("user_id", user_id)])
            .await
    }

    /// `POST /payments/{id}/refund/`
    pub async fn refund_payment(&self, id: i64) -> ApiResult<Payment> {
        self.client
            .post_empty(&format!("/payments/{}/refund/", id))
            .await
    }
}
