//! Pre-dispatch request policy.
//!
//! Every outgoing call, ordinary or upload, passes through
//! [`Interceptor::intercept`] before reaching a transport:
//!
//! 1. relative paths are prefixed with the base URL,
//! 2. the timeout is forced to the configured value,
//! 3. `source-client` is set, other caller headers are kept,
//! 4. `Authorization: Bearer <token>` is set when the session has a token.

use std::sync::Arc;

use crate::config::{GatewayConfig, AUTHORIZATION_HEADER, SOURCE_CLIENT_HEADER};
use crate::http::{set_header, Outgoing};
use crate::session::SessionStore;

#[derive(Clone)]
pub struct Interceptor {
    config: GatewayConfig,
    session: Arc<dyn SessionStore>,
}

impl std::fmt::Debug for Interceptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Interceptor")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Interceptor {
    pub fn new(config: GatewayConfig, session: Arc<dyn SessionStore>) -> Self {
        Self { config, session }
    }

    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    pub fn session(&self) -> &Arc<dyn SessionStore> {
        &self.session
    }

    pub fn intercept<R: Outgoing + ?Sized>(&self, request: &mut R) {
        let url = request.url_mut();
        if !has_scheme(url) {
            url.insert_str(0, &self.config.base_url);
        }

        request.set_timeout(self.config.timeout);

        let headers = request.headers_mut();
        headers.retain(|(k, _)| !k.eq_ignore_ascii_case(SOURCE_CLIENT_HEADER));
        headers.insert(
            0,
            (SOURCE_CLIENT_HEADER.to_string(), self.config.source_client.clone()),
        );

        if let Some(token) = self.session.token() {
            set_header(headers, AUTHORIZATION_HEADER, &format!("Bearer {token}"));
        }
    }
}

/// Whether `url` starts with `scheme://`.
pub fn has_scheme(url: &str) -> bool {
    let Some((scheme, _)) = url.split_once("://") else {
        return false;
    };
    let mut chars = scheme.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}
