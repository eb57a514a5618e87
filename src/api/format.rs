use reqwest::Response;
use serde_json::{json, Value};

use crate::error::{ClientError, ClientResult};

/// Read a response body as JSON, treating an empty or non-JSON body as `{}`
pub async fn read_json_lenient(response: Response) -> ClientResult<Value> {
    let bytes = response.bytes().await?;
    Ok(parse_lenient(&bytes))
}

pub fn parse_lenient(bytes: &[u8]) -> Value {
    serde_json::from_slice(bytes).unwrap_or_else(|_| json!({}))
}

/// Error message carried by an API error body, if any
pub fn error_message(body: &Value) -> Option<String> {
    match body.get("error") {
        Some(Value::String(msg)) if !msg.is_empty() => Some(msg.clone()),
        Some(Value::Object(obj)) => obj
            .get("message")
            .and_then(Value::as_str)
            .map(str::to_string),
        _ => body
            .get("message")
            .and_then(Value::as_str)
            .filter(|msg| !msg.is_empty())
            .map(str::to_string),
    }
}

/// Convert a non-2xx response into `ClientError::Api`, otherwise return its JSON body
pub async fn expect_success(response: Response, fallback: &str) -> ClientResult<Value> {
    let status = response.status();
    let body = read_json_lenient(response).await?;

    if !status.is_success() {
        let message = error_message(&body).unwrap_or_else(|| fallback.to_string());
        return Err(ClientError::api(status.as_u16(), message));
    }

    Ok(body)
}

/// Like [`expect_success`], falling back to the HTTP reason phrase
pub async fn expect_success_or_reason(response: Response) -> ClientResult<Value> {
    let status = response.status();
    let fallback = status
        .canonical_reason()
        .map(str::to_string)
        .unwrap_or_else(|| format!("HTTP {}", status.as_u16()));
    expect_success(response, &fallback).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_json_body_is_empty_object() {
        assert_eq!(parse_lenient(b"<html>oops</html>"), json!({}));
        assert_eq!(parse_lenient(b""), json!({}));
    }

    #[test]
    fn error_message_prefers_error_field() {
        assert_eq!(
            error_message(&json!({"error": "Invalid credentials", "message": "x"})).as_deref(),
            Some("Invalid credentials")
        );
        assert_eq!(
            error_message(&json!({"error": {"message": "nested"}})).as_deref(),
            Some("nested")
        );
        assert_eq!(error_message(&json!({"message": "plain"})).as_deref(), Some("plain"));
        assert_eq!(error_message(&json!({"error": ""})), None);
        assert_eq!(error_message(&json!({})), None);
    }
}
