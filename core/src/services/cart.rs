use super::MallApi;
use crate::envelope::Envelope;
use crate::error::GatewayError;
use crate::http::HttpRequest;
use crate::transport::Transport;
use crate::types::cart::{AddToCartParams, AddToCartResult, CartAck, CartResult};

impl<T: Transport> MallApi<T> {
    pub async fn add_to_cart(&self, params: &AddToCartParams) -> Result<Envelope<AddToCartResult>, GatewayError> {
        self.send_json(HttpRequest::post("/member/cart"), params).await
    }

    pub async fn cart_list(&self) -> Result<Envelope<CartResult>, GatewayError> {
        self.get("/member/cart".to_string()).await
    }

    pub async fn delete_cart(&self, ids: &[String]) -> Result<Envelope<CartAck>, GatewayError> {
        self.send_json(HttpRequest::delete("/member/cart"), &serde_json::json!({ "ids": ids }))
            .await
    }

    pub async fn update_cart_item(&self, sku_id: &str, count: u32) -> Result<Envelope<CartAck>, GatewayError> {
        self.send_json(
            HttpRequest::put(format!("/member/cart/{}", urlencoding::encode(sku_id))),
            &serde_json::json!({ "count": count }),
        )
        .await
    }

    pub async fn select_all_cart(&self, selected: bool) -> Result<Envelope<CartAck>, GatewayError> {
        self.send_json(
            HttpRequest::put("/member/cart/selected"),
            &serde_json::json!({ "selected": selected }),
        )
        .await
    }

    pub async fn select_cart_item(&self, sku_id: &str, selected: bool) -> Result<Envelope<CartAck>, GatewayError> {
        self.send_json(
            HttpRequest::put(format!("/member/cart/{}/selected", urlencoding::encode(sku_id))),
            &serde_json::json!({ "selected": selected }),
        )
        .await
    }
}
