use base64::{Engine as _, engine::general_purpose};
use serde_json::Value;

use crate::errors::ValidationError;

pub fn v_path<'a>(root: &'a Value, path: &[&str]) -> Option<&'a Value> {
    let mut cur = root;
    for key in path {
        cur = cur.get(*key)?;
    }
    Some(cur)
}

pub fn v_str<'a>(root: &'a Value, path: &[&str]) -> Option<&'a str> {
    v_path(root, path).and_then(|v| v.as_str())
}

pub fn get_header_value<'a>(headers: &'a Value, name: &str) -> Option<&'a str> {
    if let Some(v) = headers.get(name).and_then(|s| s.as_str()) {
        return Some(v);
    }
    headers.as_object().and_then(|map| {
        map.iter().find_map(|(k, v)| {
            if k.eq_ignore_ascii_case(name) {
                v.as_str()
            } else {
                None
            }
        })
    })
}

/// HTTP method of an API Gateway event (payload v2 first, then v1).
pub fn request_method(event: &Value) -> String {
    v_str(event, &["requestContext", "http", "method"])
        .or_else(|| v_str(event, &["httpMethod"]))
        .unwrap_or("GET")
        .to_ascii_uppercase()
}

/// Request path without a trailing slash; the root path is returned as `/`.
pub fn request_path(event: &Value) -> String {
    let raw = v_str(event, &["rawPath"])
        .or_else(|| v_str(event, &["path"]))
        .unwrap_or("/");
    let trimmed = raw.trim_end_matches('/');
    if trimmed.is_empty() {
        "/".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Correlation id for logs: the gateway request id when present.
pub fn request_id(event: &Value) -> Option<&str> {
    v_str(event, &["requestContext", "requestId"])
}

pub fn header<'a>(event: &'a Value, name: &str) -> Option<&'a str> {
    event.get("headers").and_then(|h| get_header_value(h, name))
}

/// Raw request body, base64-decoded when the gateway flagged it as such.
pub fn body_bytes(event: &Value) -> Result<Vec<u8>, ValidationError> {
    let Some(body) = event.get("body").and_then(|b| b.as_str()) else {
        return Ok(Vec::new());
    };

    let encoded = event
        .get("isBase64Encoded")
        .and_then(Value::as_bool)
        .unwrap_or(false);
    if encoded {
        general_purpose::STANDARD
            .decode(body)
            .map_err(|e| ValidationError::InvalidRequest(format!("body is not valid base64: {e}")))
    } else {
        Ok(body.as_bytes().to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_method_and_path_v2() {
        let event = json!({
            "rawPath": "/prod/api/health/",
            "requestContext": { "http": { "method": "get" }, "requestId": "abc" }
        });
        assert_eq!(request_method(&event), "GET");
        assert_eq!(request_path(&event), "/prod/api/health");
        assert_eq!(request_id(&event), Some("abc"));
    }

    #[test]
    fn test_method_and_path_v1() {
        let event = json!({ "path": "/", "httpMethod": "POST" });
        assert_eq!(request_method(&event), "POST");
        assert_eq!(request_path(&event), "/");
        assert_eq!(request_id(&event), None);
    }

    #[test]
    fn test_header_lookup_is_case_insensitive() {
        let event = json!({ "headers": { "content-type": "application/json" } });
        assert_eq!(header(&event, "Content-Type"), Some("application/json"));
        assert_eq!(header(&event, "Origin"), None);
    }

    #[test]
    fn test_body_bytes() {
        let plain = json!({ "body": "hello" });
        assert_eq!(body_bytes(&plain).unwrap(), b"hello");

        let encoded = json!({ "body": "aGVsbG8=", "isBase64Encoded": true });
        assert_eq!(body_bytes(&encoded).unwrap(), b"hello");

        let broken = json!({ "body": "***", "isBase64Encoded": true });
        assert!(matches!(
            body_bytes(&broken),
            Err(ValidationError::InvalidRequest(_))
        ));

        assert!(body_bytes(&json!({})).unwrap().is_empty());
    }
}
