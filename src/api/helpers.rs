//! Response builders shared by the route handlers.
//!
//! Every response is an API Gateway proxy envelope with a JSON body.

use serde::Serialize;
use serde_json::{Map, Value, json};

use crate::core::config::CorsPolicy;
use crate::errors::SummarizerError;

const DEFAULT_ALLOW_HEADERS: &str = "Content-Type";

/// Returns a response with the given status and a serializable JSON body.
#[must_use]
pub fn json_response<T: Serialize>(status_code: u16, body: &T) -> Value {
    let body = serde_json::to_string(body).unwrap_or_else(|_| "{}".to_string());
    json!({
        "statusCode": status_code,
        "headers": { "Content-Type": "application/json" },
        "body": body
    })
}

/// Returns an error response with the given status code and `detail` message.
#[must_use]
pub fn err_response(status_code: u16, detail: &str) -> Value {
    json_response(status_code, &json!({ "detail": detail }))
}

/// Maps a classified error to its status code and caller-facing detail.
#[must_use]
pub fn error_response(error: &SummarizerError) -> Value {
    err_response(error.status_code(), &error.detail())
}

/// Returns a 204 answer to a CORS preflight request.
///
/// Credentialed requests do not honour a `*` wildcard, so the headers the browser
/// asked for are echoed back.
#[must_use]
pub fn preflight(requested_headers: Option<&str>) -> Value {
    let allow_headers = requested_headers
        .map(str::trim)
        .filter(|h| !h.is_empty())
        .unwrap_or(DEFAULT_ALLOW_HEADERS);
    json!({
        "statusCode": 204,
        "headers": {
            "Access-Control-Allow-Methods": "GET, POST, OPTIONS",
            "Access-Control-Allow-Headers": allow_headers,
            "Access-Control-Max-Age": "600",
            "Vary": "Access-Control-Request-Headers"
        },
        "body": ""
    })
}

/// Adds CORS headers to `response` when `origin` is allowed.
pub fn apply_cors(response: &mut Value, cors: &CorsPolicy, origin: Option<&str>) {
    let Some(origin) = origin.filter(|o| cors.allows(o)) else {
        return;
    };

    let Some(envelope) = response.as_object_mut() else {
        return;
    };
    let headers = envelope
        .entry("headers")
        .or_insert_with(|| Value::Object(Map::new()));
    if let Some(headers) = headers.as_object_mut() {
        headers.insert("Access-Control-Allow-Origin".into(), json!(origin));
        headers.insert("Access-Control-Allow-Credentials".into(), json!("true"));
        let vary = match headers.get("Vary").and_then(Value::as_str) {
            Some(existing) => format!("{existing}, Origin"),
            None => "Origin".to_string(),
        };
        headers.insert("Vary".into(), json!(vary));
    }
}
