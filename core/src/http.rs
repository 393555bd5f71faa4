//! HTTP transport types for the host-does-IO pattern.
//!
//! # Design
//! Requests and responses are plain data. The gateway mutates an outgoing
//! request in place (see [`crate::interceptor`]) and hands it to whatever
//! executes I/O: a [`crate::transport::Transport`] implementation in Rust, or
//! a host runtime on the other side of the FFI boundary.
//!
//! Fields are owned (`String`, `Vec`, `PathBuf`) so an intercepted request
//! can be handed across the C ABI unchanged.

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

/// Header list in insertion order. Keys compare ASCII-case-insensitively.
pub type Headers = Vec<(String, String)>;

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An HTTP request described as plain data.
///
/// `url` may be a backend-relative path until interception rewrites it.
/// `timeout` is always overwritten by interception.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Headers,
    pub body: Option<String>,
    pub timeout: Option<Duration>,
}

impl HttpRequest {
    pub fn new(method: HttpMethod, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: Vec::new(),
            body: None,
            timeout: None,
        }
    }

    pub fn get(url: impl Into<String>) -> Self {
        Self::new(HttpMethod::Get, url)
    }

    pub fn post(url: impl Into<String>) -> Self {
        Self::new(HttpMethod::Post, url)
    }

    pub fn put(url: impl Into<String>) -> Self {
        Self::new(HttpMethod::Put, url)
    }

    pub fn delete(url: impl Into<String>) -> Self {
        Self::new(HttpMethod::Delete, url)
    }

    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((key.into(), value.into()));
        self
    }

    /// Attach a JSON body and the matching content type.
    pub fn json<B: serde::Serialize + ?Sized>(mut self, body: &B) -> Result<Self, serde_json::Error> {
        self.body = Some(serde_json::to_string(body)?);
        set_header(&mut self.headers, "content-type", "application/json");
        Ok(self)
    }
}

/// A multipart file upload described as plain data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadRequest {
    pub url: String,
    pub file_path: PathBuf,
    /// Multipart field name the file is sent under.
    pub name: String,
    pub form_data: Vec<(String, String)>,
    pub headers: Headers,
    pub timeout: Option<Duration>,
}

impl UploadRequest {
    pub fn new(url: impl Into<String>, file_path: impl Into<PathBuf>, name: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            file_path: file_path.into(),
            name: name.into(),
            form_data: Vec::new(),
            headers: Vec::new(),
            timeout: None,
        }
    }
}

/// An HTTP response described as plain data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Headers,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// The parts of an outgoing call that interception touches. Implemented by
/// both ordinary requests and uploads so they share one pre-dispatch path.
pub trait Outgoing {
    fn url_mut(&mut self) -> &mut String;
    fn headers_mut(&mut self) -> &mut Headers;
    fn set_timeout(&mut self, timeout: Duration);
}

impl Outgoing for HttpRequest {
    fn url_mut(&mut self) -> &mut String {
        &mut self.url
    }

    fn headers_mut(&mut self) -> &mut Headers {
        &mut self.headers
    }

    fn set_timeout(&mut self, timeout: Duration) {
        self.timeout = Some(timeout);
    }
}

impl Outgoing for UploadRequest {
    fn url_mut(&mut self) -> &mut String {
        &mut self.url
    }

    fn headers_mut(&mut self) -> &mut Headers {
        &mut self.headers
    }

    fn set_timeout(&mut self, timeout: Duration) {
        self.timeout = Some(timeout);
    }
}

pub fn header_value<'a>(headers: &'a [(String, String)], key: &str) -> Option<&'a str> {
    headers
        .iter()
        .find(|(k, _)| k.eq_ignore_ascii_case(key))
        .map(|(_, v)| v.as_str())
}

/// Replace the first header matching `key` and drop any duplicates, or
/// append it when absent.
pub fn set_header(headers: &mut Headers, key: &str, value: &str) {
    match headers.iter().position(|(k, _)| k.eq_ignore_ascii_case(key)) {
        Some(index) => {
            headers[index].1 = value.to_string();
            let mut seen = false;
            headers.retain(|(k, _)| {
                if !k.eq_ignore_ascii_case(key) {
                    return true;
                }
                let keep = !seen;
                seen = true;
                keep
            });
        }
        None => headers.push((key.to_string(), value.to_string())),
    }
}

/// Join `path` and percent-encoded `pairs` into `path?k=v&k=v`. Empty pairs yield `path`.
pub fn with_query(path: &str, pairs: &[(&str, String)]) -> String {
    if pairs.is_empty() {
        return path.to_string();
    }
    let query = pairs
        .iter()
        .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&");
    format!("{path}?{query}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_header_replaces_case_insensitively() {
        let mut headers = vec![
            ("Authorization".to_string(), "old".to_string()),
            ("x-a".to_string(), "1".to_string()),
            ("authorization".to_string(), "dup".to_string()),
        ];
        set_header(&mut headers, "authorization", "new");
        assert_eq!(
            headers,
            vec![
                ("Authorization".to_string(), "new".to_string()),
                ("x-a".to_string(), "1".to_string()),
            ]
        );
    }

    #[test]
    fn set_header_appends_when_missing() {
        let mut headers = Vec::new();
        set_header(&mut headers, "content-type", "application/json");
        assert_eq!(header_value(&headers, "Content-Type"), Some("application/json"));
    }

    #[test]
    fn json_body_sets_content_type() {
        let req = HttpRequest::post("/member/cart")
            .json(&serde_json::json!({"skuId": "1", "count": 2}))
            .unwrap();
        assert_eq!(header_value(&req.headers, "content-type"), Some("application/json"));
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body["count"], 2);
    }

    #[test]
    fn query_components_are_encoded() {
        assert_eq!(
            with_query("/goods", &[("id", "a b&c".to_string())]),
            "/goods?id=a%20b%26c"
        );
        assert_eq!(with_query("/category/top", &[]), "/category/top");
        assert_eq!(
            with_query("/goods", &[("id", "商品~1".to_string())]),
            "/goods?id=%E5%95%86%E5%93%81~1"
        );
    }

    #[test]
    fn method_display_is_uppercase() {
        assert_eq!(HttpMethod::Delete.to_string(), "DELETE");
    }
}
