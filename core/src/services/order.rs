use super::MallApi;
use crate::envelope::Envelope;
use crate::error::GatewayError;
use crate::http::{with_query, HttpRequest};
use crate::transport::Transport;
use crate::types::order::{OrderDetailResult, OrderNowParams, OrderPreResult, OrderSubmitParams, OrderSubmitResult};

impl<T: Transport> MallApi<T> {
    /// Checkout preview for the selected cart items.
    pub async fn order_pre(&self) -> Result<Envelope<OrderPreResult>, GatewayError> {
        self.get("/member/order/pre".to_string()).await
    }

    /// Checkout preview for a single SKU bought directly.
    pub async fn order_now(&self, params: &OrderNowParams) -> Result<Envelope<OrderPreResult>, GatewayError> {
        let mut query = vec![
            ("skuId", params.sku_id.clone()),
            ("count", params.count.to_string()),
        ];
        if let Some(address_id) = params.address_id.as_deref().filter(|s| !s.is_empty()) {
            query.push(("addressId", address_id.to_string()));
        }
        self.get(with_query("/member/order/pre/now", &query)).await
    }

    /// Checkout preview that re-buys the goods of order `id`.
    pub async fn order_repurchase(&self, id: &str) -> Result<Envelope<OrderPreResult>, GatewayError> {
        self.get(format!("/member/order/repurchase/{}", urlencoding::encode(id)))
            .await
    }

    pub async fn submit_order(&self, params: &OrderSubmitParams) -> Result<Envelope<OrderSubmitResult>, GatewayError> {
        self.send_json(HttpRequest::post("/member/order"), params).await
    }

    pub async fn order_detail(&self, id: &str) -> Result<Envelope<OrderDetailResult>, GatewayError> {
        self.get(format!("/member/order/{}", urlencoding::encode(id))).await
    }
}
