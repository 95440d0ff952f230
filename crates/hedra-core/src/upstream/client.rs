//! Blocking JSON client for `generateContent`-style endpoints.

use anyhow::{Context, Result};
use serde_json::{json, Value};
use std::time::Duration;
use url::Url;

use super::error::UpstreamError;

/// Inline media attached to a generation request (base64, with mime type).
#[derive(Debug, Clone)]
pub struct InlineData {
    pub mime_type: String,
    pub data_base64: String,
}

/// One generation request: instruction text plus optional inline media.
#[derive(Debug, Clone)]
pub struct GenerateRequest {
    pub prompt: String,
    pub inline_data: Option<InlineData>,
}

/// Client bound to one endpoint/model/key. Cheap to clone; each `generate`
/// call uses its own curl Easy handle.
#[derive(Debug, Clone)]
pub struct UpstreamClient {
    endpoint: Url,
    api_key: String,
    timeout: Duration,
}

impl UpstreamClient {
    /// Build a client for `model` hosted under `base_url`.
    ///
    /// The endpoint URL is validated eagerly so a config typo fails at
    /// startup rather than on the first upload.
    pub fn new(base_url: &str, model: &str, api_key: &str, timeout: Duration) -> Result<Self> {
        let endpoint = format!(
            "{}/v1beta/models/{}:generateContent",
            base_url.trim_end_matches('/'),
            model
        );
        let endpoint = Url::parse(&endpoint)
            .with_context(|| format!("invalid upstream endpoint: {endpoint}"))?;
        Ok(Self {
            endpoint,
            api_key: api_key.to_string(),
            timeout,
        })
    }

    /// POST the request and return the concatenated candidate text.
    ///
    /// Blocking; run under `tokio::task::spawn_blocking` from async code.
    pub fn generate(&self, req: &GenerateRequest) -> Result<String, UpstreamError> {
        let payload = serde_json::to_vec(&request_body(req))
            .map_err(|e| UpstreamError::Malformed(format!("request serialization: {e}")))?;

        let mut easy = curl::easy::Easy::new();
        easy.url(self.endpoint.as_str()).map_err(UpstreamError::Curl)?;
        easy.post(true).map_err(UpstreamError::Curl)?;
        easy.post_fields_copy(&payload).map_err(UpstreamError::Curl)?;
        easy.connect_timeout(Duration::from_secs(15))
            .map_err(UpstreamError::Curl)?;
        easy.timeout(self.timeout).map_err(UpstreamError::Curl)?;

        let mut headers = curl::easy::List::new();
        headers
            .append("Content-Type: application/json")
            .map_err(UpstreamError::Curl)?;
        headers
            .append(&format!("x-goog-api-key: {}", self.api_key))
            .map_err(UpstreamError::Curl)?;
        easy.http_headers(headers).map_err(UpstreamError::Curl)?;

        let mut response: Vec<u8> = Vec::new();
        {
            let mut transfer = easy.transfer();
            transfer
                .write_function(|data| {
                    response.extend_from_slice(data);
                    Ok(data.len())
                })
                .map_err(UpstreamError::Curl)?;
            transfer.perform().map_err(UpstreamError::Curl)?;
        }

        let code = easy.response_code().map_err(UpstreamError::Curl)?;
        if !(200..300).contains(&code) {
            return Err(UpstreamError::http(code, &response));
        }

        extract_text(&response)
    }
}

/// JSON body in the vendor's `generateContent` shape: a single content with
/// a text part and, when media is attached, an inline_data part.
fn request_body(req: &GenerateRequest) -> Value {
    let mut parts = vec![json!({ "text": req.prompt })];
    if let Some(inline) = &req.inline_data {
        parts.push(json!({
            "inline_data": {
                "mime_type": inline.mime_type,
                "data": inline.data_base64,
            }
        }));
    }
    json!({ "contents": [ { "parts": parts } ] })
}

/// Pull the first candidate's text parts out of a 2xx response body.
fn extract_text(body: &[u8]) -> Result<String, UpstreamError> {
    let value: Value = serde_json::from_slice(body)
        .map_err(|e| UpstreamError::Malformed(format!("response JSON: {e}")))?;
    let parts = value
        .pointer("/candidates/0/content/parts")
        .and_then(Value::as_array)
        .ok_or_else(|| UpstreamError::Malformed("no candidates in response".to_string()))?;
    let text: String = parts
        .iter()
        .filter_map(|p| p.get("text").and_then(Value::as_str))
        .collect();
    if text.is_empty() {
        return Err(UpstreamError::Malformed(
            "candidate contained no text parts".to_string(),
        ));
    }
    Ok(text)
}
