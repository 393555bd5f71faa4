use super::MallApi;
use crate::envelope::Envelope;
use crate::error::GatewayError;
use crate::http::with_query;
use crate::transport::Transport;
use crate::types::goods::GoodsResult;

impl<T: Transport> MallApi<T> {
    pub async fn goods_by_id(&self, id: &str) -> Result<Envelope<GoodsResult>, GatewayError> {
        self.get(with_query("/goods", &[("id", id.to_string())])).await
    }
}
