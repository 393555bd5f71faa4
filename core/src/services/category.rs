use super::MallApi;
use crate::envelope::Envelope;
use crate::error::GatewayError;
use crate::transport::Transport;
use crate::types::category::CategoryTopItem;

impl<T: Transport> MallApi<T> {
    /// Top-level categories with their banners and children.
    pub async fn category_top(&self) -> Result<Envelope<Vec<CategoryTopItem>>, GatewayError> {
        self.get("/category/top".to_string()).await
    }
}
