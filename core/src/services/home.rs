use super::MallApi;
use crate::envelope::Envelope;
use crate::error::GatewayError;
use crate::http::with_query;
use crate::pager::Pager;
use crate::transport::Transport;
use crate::types::home::{BannerItem, CategoryItem, GuessItem, GuessResult, HotItem};
use crate::types::PageParams;

/// Distribution site of the home page carousel.
pub const DEFAULT_DISTRIBUTION_SITE: u32 = 1;

impl<T: Transport> MallApi<T> {
    /// Carousel for `distribution_site` (1 is the home page).
    pub async fn home_banner(&self, distribution_site: u32) -> Result<Envelope<Vec<BannerItem>>, GatewayError> {
        self.get(with_query(
            "/home/banner",
            &[("distributionSite", distribution_site.to_string())],
        ))
        .await
    }

    pub async fn home_banner_default(&self) -> Result<Envelope<Vec<BannerItem>>, GatewayError> {
        self.home_banner(DEFAULT_DISTRIBUTION_SITE).await
    }

    pub async fn home_category(&self) -> Result<Envelope<Vec<CategoryItem>>, GatewayError> {
        self.get("/home/category/mutli".to_string()).await
    }

    pub async fn home_hot(&self) -> Result<Envelope<Vec<HotItem>>, GatewayError> {
        self.get("/home/hot/mutli".to_string()).await
    }

    pub async fn home_guess_like(&self, params: PageParams) -> Result<Envelope<GuessResult>, GatewayError> {
        self.get(with_query(
            "/home/goods/guessLike",
            &[
                ("page", params.page().to_string()),
                ("pageSize", params.page_size().to_string()),
            ],
        ))
        .await
    }

    /// Fetch the next guess-you-like page into `pager`.
    ///
    /// Returns `Ok(false)` without a request when the pager is finished or
    /// already loading. A non-success envelope leaves the pager unchanged.
    pub async fn load_more_guess(&self, pager: &mut Pager<GuessItem>) -> Result<bool, GatewayError> {
        let Some(params) = pager.begin() else {
            return Ok(false);
        };
        let outcome = self.home_guess_like(params).await;
        match outcome {
            Ok(envelope) if envelope.is_success() => {
                pager.absorb(envelope.result);
                Ok(true)
            }
            Ok(envelope) => {
                pager.abort();
                tracing::warn!(code = %envelope.code, msg = %envelope.msg, "guess-like page rejected");
                Ok(false)
            }
            Err(err) => {
                pager.abort();
                Err(err)
            }
        }
    }
}
