//! C-ABI wrapper around `mall-core`.
//!
//! # Overview
//! Exposes the gateway's pure halves through `extern "C"` functions so a host
//! runtime can perform the HTTP I/O itself: `mall_prepare_*` applies the
//! interception policy to a request, the host executes it, and
//! `mall_settle_*` classifies the result and reports what the user must see.
//!
//! # Design
//! - Every `extern "C"` function wraps its body in `catch_unwind` so panics
//!   never cross the FFI boundary.
//! - The handle owns the session. A 401 clears it before `mall_settle_*`
//!   returns; toast and navigation are handed back as strings because only
//!   the host can show them.
//! - The C caller owns all returned pointers and must call the matching
//!   `mall_free_*` function to release them.

pub mod types;

use std::os::raw::c_char;
use std::panic::{catch_unwind, AssertUnwindSafe};

use mall_core::classify::{classify, decode};
use mall_core::{
    Effect, GatewayConfig, HttpRequest, HttpResponse, Profile, SessionStore, TransportError, TransportErrorKind,
    UploadRequest,
};

use types::*;

// ---------------------------------------------------------------------------
// Gateway lifecycle
// ---------------------------------------------------------------------------

/// Create a gateway handle for `base_url`, or the default backend when
/// `base_url` is null.
///
/// Returns null if `base_url` is empty or an internal panic occurs.
/// The caller must free the returned pointer with `mall_gateway_free`.
#[unsafe(no_mangle)]
pub extern "C" fn mall_gateway_new(base_url: *const c_char) -> *mut FfiGateway {
    catch_unwind(|| {
        let config = match unsafe { read_str(base_url) } {
            None => GatewayConfig::default(),
            Some(url) if url.trim().is_empty() => return std::ptr::null_mut(),
            Some(url) => GatewayConfig::new(url.trim()),
        };
        Box::into_raw(Box::new(FfiGateway::new(config)))
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Free a handle created by `mall_gateway_new`. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn mall_gateway_free(gateway: *mut FfiGateway) {
    if !gateway.is_null() {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            drop(unsafe { Box::from_raw(gateway) });
        }));
    }
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

/// Store the login result JSON (`{id, mobile, token, nickname, avatar,
/// account}`) as the current session.
///
/// Returns false if an argument is null or the JSON does not match.
#[unsafe(no_mangle)]
pub extern "C" fn mall_session_set_profile(gateway: *const FfiGateway, profile_json: *const c_char) -> bool {
    catch_unwind(AssertUnwindSafe(|| {
        if gateway.is_null() {
            return false;
        }
        let gateway = unsafe { &*gateway };
        let Some(json) = (unsafe { read_str(profile_json) }) else {
            return false;
        };
        match serde_json::from_str::<Profile>(&json) {
            Ok(profile) => {
                gateway.session.set_profile(profile);
                true
            }
            Err(_) => false,
        }
    }))
    .unwrap_or(false)
}

/// Drop the current session. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn mall_session_clear(gateway: *const FfiGateway) {
    if !gateway.is_null() {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            unsafe { &*gateway }.session.clear();
        }));
    }
}

/// Current bearer token, or null when logged out.
///
/// The caller must free a non-null result with `mall_free_string`.
#[unsafe(no_mangle)]
pub extern "C" fn mall_session_token(gateway: *const FfiGateway) -> *mut c_char {
    catch_unwind(AssertUnwindSafe(|| {
        if gateway.is_null() {
            return std::ptr::null_mut();
        }
        c_string_or_null(unsafe { &*gateway }.session.token())
    }))
    .unwrap_or(std::ptr::null_mut())
}

// ---------------------------------------------------------------------------
// Prepare
// ---------------------------------------------------------------------------

/// Intercept a request: resolve `url` against the base URL, force the
/// timeout, and set `source-client` and the bearer token.
///
/// `headers` may be null when `headers_len` is 0; `body` may be null.
/// Returns null if `gateway` or `url` is null.
/// The caller must free the returned pointer with `mall_free_request`.
#[unsafe(no_mangle)]
pub extern "C" fn mall_prepare_request(
    gateway: *const FfiGateway,
    method: FfiHttpMethod,
    url: *const c_char,
    headers: *const FfiHeader,
    headers_len: u32,
    body: *const c_char,
) -> *mut FfiHttpRequest {
    catch_unwind(AssertUnwindSafe(|| {
        if gateway.is_null() {
            return std::ptr::null_mut();
        }
        let gateway = unsafe { &*gateway };
        let Some(url) = (unsafe { read_str(url) }) else {
            return std::ptr::null_mut();
        };
        let mut request = HttpRequest::new(method.into(), url);
        request.headers = unsafe { read_headers(headers, headers_len) };
        request.body = unsafe { read_str(body) };
        gateway.interceptor.intercept(&mut request);
        FfiHttpRequest::from_core(request)
    }))
    .unwrap_or(std::ptr::null_mut())
}

/// Intercept a multipart upload of `file_path` under field `name`, with
/// `form_data_len` extra text fields from `form_data`.
///
/// Returns null if `gateway`, `url`, `file_path` or `name` is null.
/// `form_data` may be null when `form_data_len` is 0.
/// The caller must free the returned pointer with `mall_free_upload`.
#[unsafe(no_mangle)]
pub extern "C" fn mall_prepare_upload(
    gateway: *const FfiGateway,
    url: *const c_char,
    file_path: *const c_char,
    name: *const c_char,
    form_data: *const FfiHeader,
    form_data_len: u32,
) -> *mut FfiUploadRequest {
    catch_unwind(AssertUnwindSafe(|| {
        if gateway.is_null() {
            return std::ptr::null_mut();
        }
        let gateway = unsafe { &*gateway };
        let (Some(url), Some(file_path), Some(name)) =
            (unsafe { read_str(url) }, unsafe { read_str(file_path) }, unsafe { read_str(name) })
        else {
            return std::ptr::null_mut();
        };
        let mut request = UploadRequest::new(url, file_path, name);
        request.form_data = unsafe { read_headers(form_data, form_data_len) };
        gateway.interceptor.intercept(&mut request);
        FfiUploadRequest::from_core(request)
    }))
    .unwrap_or(std::ptr::null_mut())
}

// ---------------------------------------------------------------------------
// Settle
// ---------------------------------------------------------------------------

fn settle(gateway: &FfiGateway, outcome: Result<HttpResponse, TransportError>) -> *mut FfiOutcome {
    let result = classify(outcome).and_then(|response| {
        let status = response.status;
        decode::<serde_json::Value>(response.clone()).map(|_| (status, response.body))
    });
    match result {
        Ok((status, body)) => FfiOutcome::success(status, body),
        Err(err) => {
            let effects = err.effects(gateway.interceptor.config());
            if effects.contains(&Effect::ClearSession) {
                gateway.session.clear();
            }
            FfiOutcome::failure(&err, effects)
        }
    }
}

/// Classify the response to a prepared request.
///
/// A 401 clears the session; the outcome says which toast or navigation the
/// host must perform. The caller must free the result with
/// `mall_free_outcome`.
#[unsafe(no_mangle)]
pub extern "C" fn mall_settle_response(
    gateway: *const FfiGateway,
    response: *const FfiHttpResponse,
) -> *mut FfiOutcome {
    catch_unwind(AssertUnwindSafe(|| {
        if gateway.is_null() {
            return FfiOutcome::null_arg("gateway");
        }
        if response.is_null() {
            return FfiOutcome::null_arg("response");
        }
        let gateway = unsafe { &*gateway };
        let response = unsafe { &*response };
        let body = unsafe { read_str(response.body) }.unwrap_or_default();
        settle(gateway, Ok(HttpResponse::new(response.status, body)))
    }))
    .unwrap_or_else(|_| FfiOutcome::panic("panic in mall_settle_response"))
}

/// Report that a prepared request produced no response (timeout, DNS,
/// refused connection). `message` may be null.
#[unsafe(no_mangle)]
pub extern "C" fn mall_settle_transport_failure(
    gateway: *const FfiGateway,
    message: *const c_char,
) -> *mut FfiOutcome {
    catch_unwind(AssertUnwindSafe(|| {
        if gateway.is_null() {
            return FfiOutcome::null_arg("gateway");
        }
        let gateway = unsafe { &*gateway };
        let message = unsafe { read_str(message) }.unwrap_or_default();
        settle(gateway, Err(TransportError::new(TransportErrorKind::Other, message)))
    }))
    .unwrap_or_else(|_| FfiOutcome::panic("panic in mall_settle_transport_failure"))
}

// ---------------------------------------------------------------------------
// Free functions
// ---------------------------------------------------------------------------

/// Free a request returned by `mall_prepare_request`. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn mall_free_request(req: *mut FfiHttpRequest) {
    if req.is_null() {
        return;
    }
    let _ = catch_unwind(AssertUnwindSafe(|| {
        let req = unsafe { Box::from_raw(req) };
        free_c_string(req.url);
        free_c_string(req.body);
        free_headers(req.headers, req.headers_len);
    }));
}

/// Free an upload returned by `mall_prepare_upload`. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn mall_free_upload(req: *mut FfiUploadRequest) {
    if req.is_null() {
        return;
    }
    let _ = catch_unwind(AssertUnwindSafe(|| {
        let req = unsafe { Box::from_raw(req) };
        free_c_string(req.url);
        free_c_string(req.file_path);
        free_c_string(req.name);
        free_headers(req.form_data, req.form_data_len);
        free_headers(req.headers, req.headers_len);
    }));
}

/// Free an outcome returned by `mall_settle_*`. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn mall_free_outcome(outcome: *mut FfiOutcome) {
    if outcome.is_null() {
        return;
    }
    let _ = catch_unwind(AssertUnwindSafe(|| {
        let outcome = unsafe { Box::from_raw(outcome) };
        free_c_string(outcome.body);
        free_c_string(outcome.toast);
        free_c_string(outcome.navigate_to);
        free_c_string(outcome.error_message);
    }));
}

/// Free a string returned by this library. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn mall_free_string(s: *mut c_char) {
    let _ = catch_unwind(AssertUnwindSafe(|| free_c_string(s)));
}
