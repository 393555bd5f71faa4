//! The single-shot network primitive the gateway wraps.
//!
//! A transport executes one already-intercepted request and reports either a
//! response (any status, returned as data) or a [`TransportError`] when no
//! response was obtained. It is also responsible for enforcing the timeout
//! carried on the request.

use std::future::Future;

use crate::error::TransportError;
use crate::http::{HttpRequest, HttpResponse, UploadRequest};

pub trait Transport: Send + Sync {
    fn request(
        &self,
        request: HttpRequest,
    ) -> impl Future<Output = Result<HttpResponse, TransportError>> + Send;

    fn upload(
        &self,
        request: UploadRequest,
    ) -> impl Future<Output = Result<HttpResponse, TransportError>> + Send;
}

#[cfg(feature = "reqwest")]
pub use self::reqwest_transport::ReqwestTransport;

#[cfg(feature = "reqwest")]
mod reqwest_transport {
    use reqwest::multipart::{Form, Part};

    use super::Transport;
    use crate::error::{TransportError, TransportErrorKind};
    use crate::http::{Headers, HttpMethod, HttpRequest, HttpResponse, UploadRequest};

    /// [`Transport`] over a shared `reqwest::Client`.
    #[derive(Debug, Clone, Default)]
    pub struct ReqwestTransport {
        client: reqwest::Client,
    }

    impl ReqwestTransport {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_client(client: reqwest::Client) -> Self {
            Self { client }
        }

        async fn execute(&self, builder: reqwest::RequestBuilder) -> Result<HttpResponse, TransportError> {
            let response = builder.send().await.map_err(map_error)?;
            let status = response.status().as_u16();
            let headers: Headers = response
                .headers()
                .iter()
                .filter_map(|(k, v)| Some((k.as_str().to_string(), v.to_str().ok()?.to_string())))
                .collect();
            let body = response.text().await.map_err(map_error)?;
            Ok(HttpResponse { status, headers, body })
        }
    }

    impl Transport for ReqwestTransport {
        async fn request(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
            let method = match request.method {
                HttpMethod::Get => reqwest::Method::GET,
                HttpMethod::Post => reqwest::Method::POST,
                HttpMethod::Put => reqwest::Method::PUT,
                HttpMethod::Delete => reqwest::Method::DELETE,
            };
            let mut builder = self.client.request(method, &request.url);
            for (key, value) in &request.headers {
                builder = builder.header(key.as_str(), value.as_str());
            }
            if let Some(timeout) = request.timeout {
                builder = builder.timeout(timeout);
            }
            if let Some(body) = request.body {
                builder = builder.body(body);
            }
            self.execute(builder).await
        }

        async fn upload(&self, request: UploadRequest) -> Result<HttpResponse, TransportError> {
            let bytes = tokio::fs::read(&request.file_path).await.map_err(|err| {
                TransportError::new(
                    TransportErrorKind::Io,
                    format!("{}: {err}", request.file_path.display()),
                )
            })?;
            let file_name = request
                .file_path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| request.name.clone());

            let mut form = Form::new().part(request.name.clone(), Part::bytes(bytes).file_name(file_name));
            for (key, value) in request.form_data {
                form = form.text(key, value);
            }

            let mut builder = self.client.post(&request.url).multipart(form);
            for (key, value) in &request.headers {
                builder = builder.header(key.as_str(), value.as_str());
            }
            if let Some(timeout) = request.timeout {
                builder = builder.timeout(timeout);
            }
            self.execute(builder).await
        }
    }

    fn map_error(err: reqwest::Error) -> TransportError {
        let kind = if err.is_timeout() {
            TransportErrorKind::Timeout
        } else if err.is_connect() {
            TransportErrorKind::Connect
        } else {
            TransportErrorKind::Other
        };
        TransportError::new(kind, err.to_string())
    }
}
