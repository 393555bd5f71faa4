use super::MallApi;
use crate::envelope::Envelope;
use crate::error::GatewayError;
use crate::http::HttpRequest;
use crate::transport::Transport;
use crate::types::member::{LoginParams, LoginResult};

impl<T: Transport> MallApi<T> {
    /// Phone-number login with the code and encrypted payload from the platform.
    pub async fn login_wx_min(&self, params: &LoginParams) -> Result<Envelope<LoginResult>, GatewayError> {
        self.send_json(HttpRequest::post("/login/wxMin"), params).await
    }

    /// Demo login by phone number only.
    pub async fn login_demo(&self, phone_number: &str) -> Result<Envelope<LoginResult>, GatewayError> {
        self.send_json(
            HttpRequest::post("/login/wxMin/simple"),
            &serde_json::json!({ "phoneNumber": phone_number }),
        )
        .await
    }
}
