use super::MallApi;
use crate::envelope::Envelope;
use crate::error::GatewayError;
use crate::http::HttpRequest;
use crate::transport::Transport;
use crate::types::address::{AddressId, AddressItem, AddressParams};

impl<T: Transport> MallApi<T> {
    pub async fn address_list(&self) -> Result<Envelope<Vec<AddressItem>>, GatewayError> {
        self.get("/member/address".to_string()).await
    }

    pub async fn address_by_id(&self, id: &str) -> Result<Envelope<AddressItem>, GatewayError> {
        self.get(address_path(id)).await
    }

    pub async fn add_address(&self, params: &AddressParams) -> Result<Envelope<AddressId>, GatewayError> {
        self.send_json(HttpRequest::post("/member/address"), params).await
    }

    pub async fn update_address(
        &self,
        id: &str,
        params: &AddressParams,
    ) -> Result<Envelope<AddressId>, GatewayError> {
        self.send_json(HttpRequest::put(address_path(id)), params).await
    }

    pub async fn delete_address(&self, id: &str) -> Result<Envelope<AddressId>, GatewayError> {
        self.gateway.send(HttpRequest::delete(address_path(id))).await
    }
}

fn address_path(id: &str) -> String {
    format!("/member/address/{}", urlencoding::encode(id))
}
