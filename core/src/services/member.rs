use std::path::Path;

use super::MallApi;
use crate::envelope::Envelope;
use crate::error::GatewayError;
use crate::http::{HttpRequest, UploadRequest};
use crate::transport::Transport;
use crate::types::member::{AvatarResult, ProfileDetail, ProfileParams};

impl<T: Transport> MallApi<T> {
    pub async fn member_profile(&self) -> Result<Envelope<ProfileDetail>, GatewayError> {
        self.get("/member/profile".to_string()).await
    }

    pub async fn update_member_profile(
        &self,
        params: &ProfileParams,
    ) -> Result<Envelope<ProfileDetail>, GatewayError> {
        self.send_json(HttpRequest::put("/member/profile"), params).await
    }

    pub async fn upload_avatar(&self, file: &Path) -> Result<Envelope<AvatarResult>, GatewayError> {
        self.gateway
            .upload(UploadRequest::new("/member/profile/avatar", file, "file"))
            .await
    }
}
