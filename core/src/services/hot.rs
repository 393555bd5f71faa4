use super::MallApi;
use crate::envelope::Envelope;
use crate::error::GatewayError;
use crate::http::with_query;
use crate::transport::Transport;
use crate::types::global::{DEFAULT_PAGE, DEFAULT_PAGE_SIZE};
use crate::types::hot::{HotParams, HotResult};

impl<T: Transport> MallApi<T> {
    /// Recommendation page at `api_path` (the `target` of a home hot item).
    pub async fn hot(&self, api_path: &str, params: &HotParams) -> Result<Envelope<HotResult>, GatewayError> {
        let mut query = vec![
            ("page", params.page.unwrap_or(DEFAULT_PAGE).to_string()),
            ("pageSize", params.page_size.unwrap_or(DEFAULT_PAGE_SIZE).to_string()),
        ];
        if let Some(sub_type) = params.sub_type.as_deref().filter(|s| !s.is_empty()) {
            query.push(("subType", sub_type.to_string()));
        }
        self.get(with_query(api_path, &query)).await
    }
}
