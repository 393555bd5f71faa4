//! Verify interception and settlement against JSON vectors in `test-vectors/`.
//!
//! The same vectors drive the C ABI tests in `mall-ffi`, so both surfaces
//! agree on the wire-level policy. Effects are compared as tagged arrays,
//! e.g. `["toast", "请求错误"]`.

use std::sync::Arc;
use std::time::Duration;

use mall_core::classify::{classify, decode};
use mall_core::{
    Effect, GatewayConfig, GatewayError, HttpMethod, HttpRequest, HttpResponse, Interceptor, MemorySession,
    Profile, TransportError, TransportErrorKind,
};
use serde_json::Value;

fn parse_method(s: &str) -> HttpMethod {
    match s {
        "GET" => HttpMethod::Get,
        "POST" => HttpMethod::Post,
        "PUT" => HttpMethod::Put,
        "DELETE" => HttpMethod::Delete,
        other => panic!("unknown method: {other}"),
    }
}

fn parse_headers(value: &Value) -> Vec<(String, String)> {
    value
        .as_array()
        .unwrap()
        .iter()
        .map(|h| {
            let arr = h.as_array().unwrap();
            (arr[0].as_str().unwrap().to_string(), arr[1].as_str().unwrap().to_string())
        })
        .collect()
}

fn session_with(token: Option<&str>) -> Arc<MemorySession> {
    let session = MemorySession::new();
    if let Some(token) = token {
        session.set_profile(Profile {
            id: 7,
            mobile: "13800000000".to_string(),
            token: token.to_string(),
            nickname: String::new(),
            avatar: String::new(),
            account: String::new(),
        });
    }
    Arc::new(session)
}

fn effect_json(effect: &Effect) -> Value {
    match effect {
        Effect::ClearSession => serde_json::json!(["clear_session"]),
        Effect::NavigateTo(url) => serde_json::json!(["navigate", url]),
        Effect::Toast { title, .. } => serde_json::json!(["toast", title]),
    }
}

fn outcome_name(result: &Result<mall_core::Envelope<Value>, GatewayError>) -> &'static str {
    match result {
        Ok(_) => "success",
        Err(GatewayError::Unauthorized(_)) => "unauthorized",
        Err(GatewayError::Status { .. }) => "status",
        Err(GatewayError::Transport(_)) => "transport",
        Err(GatewayError::Decode { .. }) => "decode",
        Err(other) => panic!("unexpected outcome: {other:?}"),
    }
}

// ---------------------------------------------------------------------------
// Intercept
// ---------------------------------------------------------------------------

#[test]
fn intercept_test_vectors() {
    let raw = include_str!("../../test-vectors/intercept.json");
    let vectors: Value = serde_json::from_str(raw).unwrap();
    let base_url = vectors["base_url"].as_str().unwrap();

    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let input = &case["request"];
        let expected = &case["expected"];

        let interceptor = Interceptor::new(GatewayConfig::new(base_url), session_with(case["token"].as_str()));
        let mut request = HttpRequest::new(
            parse_method(input["method"].as_str().unwrap()),
            input["url"].as_str().unwrap(),
        );
        request.headers = parse_headers(&input["headers"]);
        interceptor.intercept(&mut request);

        assert_eq!(request.url, expected["url"].as_str().unwrap(), "{name}: url");
        assert_eq!(
            request.timeout,
            Some(Duration::from_millis(expected["timeout_ms"].as_u64().unwrap())),
            "{name}: timeout"
        );
        assert_eq!(request.headers, parse_headers(&expected["headers"]), "{name}: headers");
    }
}

// ---------------------------------------------------------------------------
// Settle
// ---------------------------------------------------------------------------

#[test]
fn settle_test_vectors() {
    let raw = include_str!("../../test-vectors/settle.json");
    let vectors: Value = serde_json::from_str(raw).unwrap();
    let config = GatewayConfig::default();
    assert_eq!(config.login_path, vectors["login_path"].as_str().unwrap());

    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let expected = &case["expected"];

        let outcome = match case["transport_error"].as_str() {
            Some(message) => Err(TransportError::new(TransportErrorKind::Other, message)),
            None => {
                let sim = &case["response"];
                Ok(HttpResponse::new(
                    sim["status"].as_u64().unwrap() as u16,
                    sim["body"].as_str().unwrap(),
                ))
            }
        };

        let result = classify(outcome).and_then(decode::<Value>);
        assert_eq!(outcome_name(&result), expected["outcome"].as_str().unwrap(), "{name}: outcome");

        let effects: Vec<Value> = match &result {
            Ok(_) => Vec::new(),
            Err(err) => err.effects(&config).iter().map(effect_json).collect(),
        };
        assert_eq!(Value::from(effects), expected["effects"], "{name}: effects");
    }
}
