//! `#[repr(C)]` types for the FFI boundary.
//!
//! # Design
//! Each type mirrors a core type but uses C-compatible representations:
//! `*mut c_char` instead of `String`, raw pointers instead of `Vec`, and
//! tagged enums with explicit discriminants. Conversion functions live here
//! to keep `lib.rs` focused on the `extern "C"` surface.

use std::ffi::{CStr, CString};
use std::os::raw::c_char;
use std::sync::Arc;

use mall_core::effects::Effect;
use mall_core::http::{Headers, HttpMethod};
use mall_core::{GatewayConfig, GatewayError, HttpRequest, Interceptor, MemorySession, SessionStore, UploadRequest};

/// Opaque handle owning the interception policy and the session it reads.
/// C callers receive a pointer to this and pass it back into every function.
pub struct FfiGateway {
    pub(crate) interceptor: Interceptor,
    pub(crate) session: Arc<MemorySession>,
}

impl FfiGateway {
    pub(crate) fn new(config: GatewayConfig) -> Self {
        let session = Arc::new(MemorySession::new());
        let store: Arc<dyn SessionStore> = session.clone();
        Self {
            interceptor: Interceptor::new(config, store),
            session,
        }
    }
}

/// Owned C string from `s`. Interior NULs are dropped rather than failing.
pub(crate) fn c_string(s: impl Into<String>) -> *mut c_char {
    let mut s = s.into();
    s.retain(|c| c != '\0');
    CString::new(s).unwrap_or_default().into_raw()
}

pub(crate) fn c_string_or_null(s: Option<String>) -> *mut c_char {
    s.map_or(std::ptr::null_mut(), c_string)
}

/// Borrow a caller-provided C string as UTF-8, lossily.
///
/// # Safety
/// `ptr` must be null or point to a NUL-terminated string.
pub(crate) unsafe fn read_str(ptr: *const c_char) -> Option<String> {
    if ptr.is_null() {
        return None;
    }
    Some(unsafe { CStr::from_ptr(ptr) }.to_string_lossy().into_owned())
}

/// Release a string produced by [`c_string`]. Null is ignored.
pub(crate) fn free_c_string(ptr: *mut c_char) {
    if !ptr.is_null() {
        drop(unsafe { CString::from_raw(ptr) });
    }
}

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// HTTP method as a C enum.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FfiHttpMethod {
    Get = 0,
    Post = 1,
    Put = 2,
    Delete = 3,
}

impl From<HttpMethod> for FfiHttpMethod {
    fn from(m: HttpMethod) -> Self {
        match m {
            HttpMethod::Get => FfiHttpMethod::Get,
            HttpMethod::Post => FfiHttpMethod::Post,
            HttpMethod::Put => FfiHttpMethod::Put,
            HttpMethod::Delete => FfiHttpMethod::Delete,
        }
    }
}

impl From<FfiHttpMethod> for HttpMethod {
    fn from(m: FfiHttpMethod) -> Self {
        match m {
            FfiHttpMethod::Get => HttpMethod::Get,
            FfiHttpMethod::Post => HttpMethod::Post,
            FfiHttpMethod::Put => HttpMethod::Put,
            FfiHttpMethod::Delete => HttpMethod::Delete,
        }
    }
}

/// A key-value pair of C strings: an HTTP header or an upload form field.
#[repr(C)]
pub struct FfiHeader {
    pub key: *mut c_char,
    pub value: *mut c_char,
}

/// Read `len` caller-provided pairs. Entries with a null key are skipped.
///
/// # Safety
/// `headers` must be null or point to `len` valid `FfiHeader`s.
pub(crate) unsafe fn read_headers(headers: *const FfiHeader, len: u32) -> Headers {
    if headers.is_null() || len == 0 {
        return Vec::new();
    }
    let slice = unsafe { std::slice::from_raw_parts(headers, len as usize) };
    slice
        .iter()
        .filter_map(|h| {
            let key = unsafe { read_str(h.key) }?;
            let value = unsafe { read_str(h.value) }.unwrap_or_default();
            Some((key, value))
        })
        .collect()
}

fn headers_into_raw(headers: Headers) -> (*mut FfiHeader, u32) {
    if headers.is_empty() {
        return (std::ptr::null_mut(), 0);
    }
    let len = headers.len() as u32;
    let ffi_headers: Box<[FfiHeader]> = headers
        .into_iter()
        .map(|(k, v)| FfiHeader {
            key: c_string(k),
            value: c_string(v),
        })
        .collect();
    (Box::into_raw(ffi_headers) as *mut FfiHeader, len)
}

/// Free pairs produced by `headers_into_raw`.
pub(crate) fn free_headers(headers: *mut FfiHeader, len: u32) {
    if headers.is_null() {
        return;
    }
    let slice = std::ptr::slice_from_raw_parts_mut(headers, len as usize);
    let headers = unsafe { Box::from_raw(slice) };
    for h in headers.iter() {
        free_c_string(h.key);
        free_c_string(h.value);
    }
}

fn timeout_ms(timeout: Option<std::time::Duration>) -> u32 {
    timeout.map_or(0, |t| u32::try_from(t.as_millis()).unwrap_or(u32::MAX))
}

/// An intercepted HTTP request, ready for the host to execute.
///
/// `url` is absolute, `headers` carry `source-client` first and the bearer
/// token when logged in, and `timeout_ms` is the deadline the host must
/// enforce. `body` is null when there is none.
#[repr(C)]
pub struct FfiHttpRequest {
    pub method: FfiHttpMethod,
    pub url: *mut c_char,
    pub headers: *mut FfiHeader,
    pub headers_len: u32,
    pub body: *mut c_char,
    pub timeout_ms: u32,
}

impl FfiHttpRequest {
    pub(crate) fn from_core(req: HttpRequest) -> *mut Self {
        let (headers, headers_len) = headers_into_raw(req.headers);
        Box::into_raw(Box::new(FfiHttpRequest {
            method: req.method.into(),
            url: c_string(req.url),
            headers,
            headers_len,
            body: c_string_or_null(req.body),
            timeout_ms: timeout_ms(req.timeout),
        }))
    }
}

/// An intercepted multipart upload, ready for the host to execute.
///
/// `form_data` holds the extra text fields sent alongside the file, in the
/// order the caller gave them; it is null when `form_data_len` is 0.
#[repr(C)]
pub struct FfiUploadRequest {
    pub url: *mut c_char,
    pub file_path: *mut c_char,
    /// Multipart field name for the file.
    pub name: *mut c_char,
    pub form_data: *mut FfiHeader,
    pub form_data_len: u32,
    pub headers: *mut FfiHeader,
    pub headers_len: u32,
    pub timeout_ms: u32,
}

impl FfiUploadRequest {
    pub(crate) fn from_core(req: UploadRequest) -> *mut Self {
        let (headers, headers_len) = headers_into_raw(req.headers);
        let (form_data, form_data_len) = headers_into_raw(req.form_data);
        Box::into_raw(Box::new(FfiUploadRequest {
            url: c_string(req.url),
            file_path: c_string(req.file_path.to_string_lossy()),
            name: c_string(req.name),
            form_data,
            form_data_len,
            headers,
            headers_len,
            timeout_ms: timeout_ms(req.timeout),
        }))
    }
}

// ---------------------------------------------------------------------------
// Response input (caller-provided, not heap-allocated by us)
// ---------------------------------------------------------------------------

/// An HTTP response described as C-compatible plain data.
///
/// The C caller constructs this after executing a prepared request and
/// passes a pointer to `mall_settle_response`. The FFI layer reads but does
/// not free these fields.
#[repr(C)]
pub struct FfiHttpResponse {
    pub status: u16,
    pub body: *const c_char,
}

// ---------------------------------------------------------------------------
// Outcome
// ---------------------------------------------------------------------------

/// How a dispatch settled.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FfiOutcomeKind {
    Success = 0,
    Unauthorized = 1,
    HttpError = 2,
    TransportError = 3,
    DecodeError = 4,
    NullArg = 5,
    Panic = 6,
}

/// Settled dispatch plus the UI work the host still owes the user.
///
/// Session clearing has already happened inside the gateway when
/// `session_cleared` is set. `toast` and `navigate_to` are null when there is
/// nothing to show. On success `body` holds the envelope JSON.
#[repr(C)]
pub struct FfiOutcome {
    pub kind: FfiOutcomeKind,
    pub http_status: u16,
    pub body: *mut c_char,
    pub toast: *mut c_char,
    pub navigate_to: *mut c_char,
    pub session_cleared: bool,
    pub error_message: *mut c_char,
}

impl FfiOutcome {
    fn empty(kind: FfiOutcomeKind) -> FfiOutcome {
        FfiOutcome {
            kind,
            http_status: 0,
            body: std::ptr::null_mut(),
            toast: std::ptr::null_mut(),
            navigate_to: std::ptr::null_mut(),
            session_cleared: false,
            error_message: std::ptr::null_mut(),
        }
    }

    pub(crate) fn success(status: u16, body: String) -> *mut Self {
        Box::into_raw(Box::new(FfiOutcome {
            http_status: status,
            body: c_string(body),
            ..Self::empty(FfiOutcomeKind::Success)
        }))
    }

    /// Describe a failed dispatch. `effects` must already exclude anything
    /// the gateway performed itself, except `ClearSession`, which is
    /// reported through `session_cleared`.
    pub(crate) fn failure(err: &GatewayError, effects: Vec<Effect>) -> *mut Self {
        let kind = match err {
            GatewayError::Unauthorized(_) => FfiOutcomeKind::Unauthorized,
            GatewayError::Status { .. } => FfiOutcomeKind::HttpError,
            GatewayError::Transport(_) => FfiOutcomeKind::TransportError,
            _ => FfiOutcomeKind::DecodeError,
        };
        let mut outcome = FfiOutcome {
            http_status: err.response().map_or(0, |r| r.status),
            error_message: c_string(err.to_string()),
            ..Self::empty(kind)
        };
        for effect in effects {
            match effect {
                Effect::ClearSession => outcome.session_cleared = true,
                Effect::NavigateTo(url) => outcome.navigate_to = c_string(url),
                Effect::Toast { title, .. } => outcome.toast = c_string(title),
            }
        }
        Box::into_raw(Box::new(outcome))
    }

    pub(crate) fn null_arg(name: &str) -> *mut Self {
        Box::into_raw(Box::new(FfiOutcome {
            error_message: c_string(format!("null argument: {name}")),
            ..Self::empty(FfiOutcomeKind::NullArg)
        }))
    }

    pub(crate) fn panic(msg: &str) -> *mut Self {
        Box::into_raw(Box::new(FfiOutcome {
            error_message: c_string(msg),
            ..Self::empty(FfiOutcomeKind::Panic)
        }))
    }
}
