//! Gateway configuration.
//!
//! Timeout and login path are fixed; base URL and the client marker may come
//! from the environment (a `.env` file is honoured when present).

use std::env;
use std::time::Duration;

use thiserror::Error;

pub const DEFAULT_BASE_URL: &str = "https://pcapi-xiaotuxian-front-devtest.itheima.net";
pub const DEFAULT_SOURCE_CLIENT: &str = "miniapp";
pub const REQUEST_TIMEOUT: Duration = Duration::from_millis(20_000);
pub const LOGIN_PAGE: &str = "/pages/login/login";

pub const SOURCE_CLIENT_HEADER: &str = "source-client";
pub const AUTHORIZATION_HEADER: &str = "Authorization";

/// Toast text for non-2xx responses whose body has no usable `msg`.
pub const FALLBACK_ERROR_MESSAGE: &str = "请求错误";
/// Toast text when no response was received at all.
pub const NETWORK_ERROR_MESSAGE: &str = "网络错误，换个网络试试";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayConfig {
    /// Prefix for relative request paths, without a trailing slash.
    pub base_url: String,
    /// Value of the `source-client` header.
    pub source_client: String,
    pub timeout: Duration,
    /// Screen the navigator is sent to when the session expires.
    pub login_path: String,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl GatewayConfig {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            source_client: DEFAULT_SOURCE_CLIENT.to_string(),
            timeout: REQUEST_TIMEOUT,
            login_path: LOGIN_PAGE.to_string(),
        }
    }

    /// Load overrides from `MALL_BASE_URL` and `MALL_SOURCE_CLIENT`.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let mut config = match env::var("MALL_BASE_URL") {
            Ok(url) => {
                validate_base_url(&url)?;
                Self::new(&url)
            }
            Err(_) => Self::default(),
        };
        if let Ok(client) = env::var("MALL_SOURCE_CLIENT") {
            if client.trim().is_empty() {
                return Err(ConfigError::InvalidValue {
                    key: "MALL_SOURCE_CLIENT".to_string(),
                    message: "must not be empty".to_string(),
                });
            }
            config.source_client = client;
        }
        Ok(config)
    }
}

fn validate_base_url(url: &str) -> Result<(), ConfigError> {
    if crate::interceptor::has_scheme(url) {
        Ok(())
    } else {
        Err(ConfigError::InvalidValue {
            key: "MALL_BASE_URL".to_string(),
            message: format!("{url:?} is not an absolute URL"),
        })
    }
}
