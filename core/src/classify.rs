//! Pure response classification.
//!
//! # Design
//! [`classify`] turns a transport outcome into either the 2xx response or a
//! typed [`GatewayError`], and [`GatewayError::effects`] lists what the user
//! must see for that error. Nothing here performs a side effect, so the
//! whole policy is testable without a UI or a session.

use serde::de::DeserializeOwned;

use crate::config::{GatewayConfig, FALLBACK_ERROR_MESSAGE, NETWORK_ERROR_MESSAGE};
use crate::effects::{Effect, ToastIcon};
use crate::envelope::Envelope;
use crate::error::{GatewayError, TransportError};
use crate::http::HttpResponse;

pub fn classify(outcome: Result<HttpResponse, TransportError>) -> Result<HttpResponse, GatewayError> {
    let response = outcome?;
    if response.is_success() {
        return Ok(response);
    }
    if response.status == 401 {
        return Err(GatewayError::Unauthorized(response));
    }
    let message = backend_message(&response.body).unwrap_or_else(|| FALLBACK_ERROR_MESSAGE.to_string());
    Err(GatewayError::Status { response, message })
}

/// Decode a 2xx body into an envelope of `T`.
pub fn decode<T: DeserializeOwned>(response: HttpResponse) -> Result<Envelope<T>, GatewayError> {
    match serde_json::from_str(&response.body) {
        Ok(envelope) => Ok(envelope),
        Err(err) => Err(GatewayError::Decode {
            message: err.to_string(),
            response,
        }),
    }
}

/// Non-empty `msg` string of a JSON body, if any.
pub fn backend_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    value
        .get("msg")?
        .as_str()
        .filter(|msg| !msg.is_empty())
        .map(str::to_string)
}

impl GatewayError {
    /// Side effects owed to the user for this error, in dispatch order.
    pub fn effects(&self, config: &GatewayConfig) -> Vec<Effect> {
        match self {
            GatewayError::Unauthorized(_) => vec![
                Effect::ClearSession,
                Effect::NavigateTo(config.login_path.clone()),
            ],
            GatewayError::Status { message, .. } => vec![toast(message)],
            GatewayError::Transport(_) => vec![toast(NETWORK_ERROR_MESSAGE)],
            // The status was 2xx, so the gateway owes the user nothing.
            GatewayError::Decode { .. } | GatewayError::Encode(_) | GatewayError::Cancelled => Vec::new(),
        }
    }
}

fn toast(title: &str) -> Effect {
    Effect::Toast {
        icon: ToastIcon::None,
        title: title.to_string(),
    }
}
